//! Option payoffs.
//!
//! Payoffs describe the terminal (or exercise) value of an option as a
//! function of the underlying asset price.

use ov_core::{Real, Result};
use std::fmt;

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OptionType {
    /// A call option (right to buy).
    Call,
    /// A put option (right to sell).
    Put,
}

impl OptionType {
    /// +1 for Call, −1 for Put.
    pub fn sign(self) -> Real {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// Intrinsic value `max(φ(S − K), 0)`.
    #[inline]
    pub fn intrinsic(self, spot: Real, strike: Real) -> Real {
        (self.sign() * (spot - strike)).max(0.0)
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}

/// A payoff as a function of a single underlying level.
pub trait Payoff: fmt::Debug + Send + Sync {
    /// Compute the payoff given the underlying price at exercise/expiry.
    fn value(&self, price: Real) -> Real;

    /// Human-readable name.
    fn name(&self) -> &str;

    /// Human-readable description.
    fn description(&self) -> String {
        self.name().to_string()
    }
}

/// Standard "plain vanilla" payoff: `max(φ(S − K), 0)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlainVanillaPayoff {
    /// Option type.
    pub option_type: OptionType,
    /// Strike price.
    pub strike: Real,
}

impl PlainVanillaPayoff {
    /// Create a new plain vanilla payoff. The strike must be positive.
    pub fn new(option_type: OptionType, strike: Real) -> Result<Self> {
        ov_core::errors::require_positive("strike", strike)?;
        Ok(Self {
            option_type,
            strike,
        })
    }
}

impl Payoff for PlainVanillaPayoff {
    #[inline]
    fn value(&self, price: Real) -> Real {
        self.option_type.intrinsic(price, self.strike)
    }

    fn name(&self) -> &str {
        "Vanilla"
    }

    fn description(&self) -> String {
        format!("{} {} @ {}", self.name(), self.option_type, self.strike)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vanilla_call_and_put() {
        let call = PlainVanillaPayoff::new(OptionType::Call, 100.0).unwrap();
        let put = PlainVanillaPayoff::new(OptionType::Put, 100.0).unwrap();
        assert_eq!(call.value(120.0), 20.0);
        assert_eq!(call.value(80.0), 0.0);
        assert_eq!(put.value(80.0), 20.0);
        assert_eq!(put.value(120.0), 0.0);
        assert_eq!(call.description(), "Vanilla Call @ 100");
    }

    #[test]
    fn non_positive_strike_rejected() {
        assert!(PlainVanillaPayoff::new(OptionType::Call, 0.0)
            .unwrap_err()
            .is_invalid_parameter());
    }

    proptest::proptest! {
        #[test]
        fn call_minus_put_is_forward_payoff(s in 0.01f64..500.0, k in 0.01f64..500.0) {
            let c = OptionType::Call.intrinsic(s, k);
            let p = OptionType::Put.intrinsic(s, k);
            proptest::prop_assert!((c - p - (s - k)).abs() < 1e-9);
        }
    }
}
