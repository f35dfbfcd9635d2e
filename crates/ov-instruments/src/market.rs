//! Market inputs shared by every engine.

use ov_core::{
    discount_factor,
    errors::{require_finite, require_non_negative, require_positive},
    DiscountFactor, Rate, Real, Result, Time,
};

/// Spot, rates, and time to maturity.
///
/// `maturity == 0` is valid and makes every engine return intrinsic value.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketParameters {
    /// Spot price `S > 0`.
    pub spot: Real,
    /// Continuously compounded risk-free rate `r`.
    pub rate: Rate,
    /// Continuous dividend / convenience yield `q`.
    pub dividend_yield: Rate,
    /// Time to maturity in years, `T >= 0`.
    pub maturity: Time,
}

impl MarketParameters {
    /// Create validated market parameters.
    pub fn new(spot: Real, rate: Rate, dividend_yield: Rate, maturity: Time) -> Result<Self> {
        let params = Self {
            spot,
            rate,
            dividend_yield,
            maturity,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check the domain of every field.
    pub fn validate(&self) -> Result<()> {
        require_positive("spot", self.spot)?;
        require_finite("rate", self.rate)?;
        require_finite("dividend yield", self.dividend_yield)?;
        require_non_negative("maturity", self.maturity)?;
        Ok(())
    }

    /// `true` when the option is at expiry.
    pub fn is_expired(&self) -> bool {
        self.maturity == 0.0
    }

    /// Risk-free discount factor to maturity.
    pub fn discount(&self) -> DiscountFactor {
        discount_factor(self.rate, self.maturity)
    }

    /// Dividend discount factor to maturity.
    pub fn dividend_discount(&self) -> DiscountFactor {
        discount_factor(self.dividend_yield, self.maturity)
    }

    /// Forward price `S·exp((r − q)T)`.
    pub fn forward(&self) -> Real {
        self.spot * ((self.rate - self.dividend_yield) * self.maturity).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn forward_and_discounts() {
        let m = MarketParameters::new(100.0, 0.05, 0.02, 2.0).unwrap();
        assert_relative_eq!(m.forward(), 100.0 * (0.06_f64).exp(), max_relative = 1e-14);
        assert_relative_eq!(m.discount(), (-0.1_f64).exp(), max_relative = 1e-14);
        assert_relative_eq!(m.dividend_discount(), (-0.04_f64).exp(), max_relative = 1e-14);
        assert!(!m.is_expired());
    }

    #[test]
    fn zero_maturity_is_valid() {
        assert!(MarketParameters::new(100.0, 0.05, 0.0, 0.0).unwrap().is_expired());
    }

    #[test]
    fn invalid_inputs() {
        assert!(MarketParameters::new(0.0, 0.05, 0.0, 1.0).is_err());
        assert!(MarketParameters::new(100.0, 0.05, 0.0, -0.1).is_err());
        assert!(MarketParameters::new(100.0, f64::NAN, 0.0, 1.0).is_err());
    }
}
