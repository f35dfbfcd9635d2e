//! Monte Carlo engine for arithmetic-average Asian options.
//!
//! The average runs over the monitoring dates after the valuation date. A
//! European payoff on the same strike serves as the optional control
//! variate.

use crate::analytic_european_engine::black_scholes_merton;
use crate::mc_settings::McSettings;
use ov_core::{ensure, errors::require_positive, Real, Result, Volatility};
use ov_instruments::{MarketParameters, OptionSpec, OptionType, PriceEstimate, PricingEngine};
use ov_methods::monte_carlo::{AsianArithmeticPathPricer, EuropeanPathPricer, MonteCarloModel};
use ov_models::VolatilityInput;

/// Source of the control payoff's expectation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ControlExpectation {
    /// The Black-Scholes price of the European control.
    #[default]
    Analytic,
    /// A caller-supplied present value of the European control.
    Known(Real),
    /// The control's sample mean. This keeps the variance reduction but
    /// gives up the bias correction: the price equals the plain estimate.
    SampleMean,
}

/// Monte Carlo Asian engine under GBM.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct McAsianEngine {
    volatility: Volatility,
    settings: McSettings,
    control_variate: Option<ControlExpectation>,
}

impl McAsianEngine {
    /// Create an engine with default settings and no control variate.
    pub fn new(volatility: Volatility) -> Result<Self> {
        require_positive("sigma", volatility)?;
        Ok(Self {
            volatility,
            settings: McSettings::default(),
            control_variate: None,
        })
    }

    /// Create an engine from a [`VolatilityInput`]; only the flat case is accepted.
    pub fn from_input(input: &VolatilityInput) -> Result<Self> {
        Self::new(input.require_flat()?)
    }

    /// Replace the simulation settings.
    pub fn with_settings(mut self, settings: McSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Enable the European control variate.
    pub fn with_control_variate(mut self, expectation: ControlExpectation) -> Self {
        self.control_variate = Some(expectation);
        self
    }

    fn control_mean(&self, market: &MarketParameters, option: &OptionSpec) -> Option<Real> {
        let present_value = match self.control_variate? {
            ControlExpectation::Analytic => {
                black_scholes_merton(
                    option.option_type,
                    market.spot,
                    option.strike,
                    market.rate,
                    market.dividend_yield,
                    self.volatility,
                    market.maturity,
                )
                .price
            }
            ControlExpectation::Known(pv) => pv,
            ControlExpectation::SampleMean => return None,
        };
        Some(present_value / market.discount())
    }
}

impl PricingEngine for McAsianEngine {
    fn calculate(&self, market: &MarketParameters, option: &OptionSpec) -> Result<PriceEstimate> {
        ensure!(
            !option.exercise.is_american() && option.barrier.is_none(),
            "the Monte Carlo Asian engine prices European-style averages only"
        );
        let ensemble = self.settings.simulate(market, self.volatility)?;
        let model = MonteCarloModel::new(&ensemble, market.discount());
        let asian = AsianArithmeticPathPricer::new(option.payoff());

        let estimate = match self.control_variate {
            None => model.estimate(&asian)?,
            Some(_) => model.estimate_with_control(
                &asian,
                &EuropeanPathPricer::new(option.payoff()),
                self.control_mean(market, option),
            )?,
        };
        tracing::debug!(
            %estimate,
            control_variate = estimate.control_variate_applied,
            antithetic = self.settings.antithetic,
            "Monte Carlo Asian"
        );
        Ok(estimate)
    }
}

/// Arithmetic Asian price `(price, std_error)` for flat-volatility GBM.
#[allow(clippy::too_many_arguments)]
pub fn asian_price(
    spot: Real,
    strike: Real,
    rate: Real,
    dividend_yield: Real,
    volatility: Volatility,
    maturity: Real,
    option_type: OptionType,
    settings: McSettings,
    control_variate: Option<ControlExpectation>,
) -> Result<PriceEstimate> {
    let market = MarketParameters::new(spot, rate, dividend_yield, maturity)?;
    let option = OptionSpec::european(option_type, strike)?;
    let mut engine = McAsianEngine::new(volatility)?.with_settings(settings);
    engine.control_variate = control_variate;
    engine.calculate(&market, &option)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> McSettings {
        McSettings::default().with_steps(50).with_paths(4_000).with_seed(11)
    }

    fn price(cv: Option<ControlExpectation>) -> PriceEstimate {
        asian_price(100.0, 100.0, 0.01, 0.0, 0.25, 0.5, OptionType::Call, settings(), cv).unwrap()
    }

    #[test]
    fn asian_call_cheaper_than_european() {
        let asian = price(None);
        let european =
            black_scholes_merton(OptionType::Call, 100.0, 100.0, 0.01, 0.0, 0.25, 0.5).price;
        assert!(asian.price < european);
        assert!(asian.price > 0.0);
        assert_eq!(asian.samples, 4_000);
        assert!(!asian.control_variate_applied);
    }

    #[test]
    fn analytic_control_reduces_error() {
        let plain = price(None);
        let cv = price(Some(ControlExpectation::Analytic));
        assert!(cv.control_variate_applied);
        assert!(cv.std_error < plain.std_error);
        assert!((cv.price - plain.price).abs() < 3.0 * plain.std_error);
    }

    #[test]
    fn known_expectation_matches_analytic() {
        let bs = black_scholes_merton(OptionType::Call, 100.0, 100.0, 0.01, 0.0, 0.25, 0.5).price;
        let analytic = price(Some(ControlExpectation::Analytic));
        let known = price(Some(ControlExpectation::Known(bs)));
        assert_eq!(analytic, known);
    }

    #[test]
    fn sample_mean_control_keeps_plain_price() {
        let plain = price(None);
        let cv = price(Some(ControlExpectation::SampleMean));
        assert!((cv.price - plain.price).abs() < 1e-9);
        assert!(cv.std_error <= plain.std_error);
    }

    #[test]
    fn rejects_barrier_terms() {
        let market = MarketParameters::new(100.0, 0.01, 0.0, 0.5).unwrap();
        let barrier = ov_instruments::Barrier::new(ov_instruments::BarrierType::UpOut, 120.0)
            .unwrap();
        let option = OptionSpec::european(OptionType::Call, 100.0)
            .unwrap()
            .with_barrier(barrier);
        assert!(McAsianEngine::new(0.2).unwrap().calculate(&market, &option).is_err());
    }
}
