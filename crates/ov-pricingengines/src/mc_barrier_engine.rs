//! Monte Carlo engine for discretely monitored barrier options.

use crate::mc_settings::McSettings;
use ov_core::{errors::require_positive, Error, Real, Result, Volatility};
use ov_instruments::{
    Barrier, BarrierType, MarketParameters, OptionSpec, OptionType, PriceEstimate, PricingEngine,
};
use ov_methods::monte_carlo::{BarrierPathPricer, MonteCarloModel};
use ov_models::VolatilityInput;

/// Monte Carlo barrier engine under GBM.
///
/// The barrier is checked at each of the `steps` monitoring dates, not at
/// the valuation date.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct McBarrierEngine {
    volatility: Volatility,
    settings: McSettings,
}

impl McBarrierEngine {
    /// Create an engine with default settings.
    pub fn new(volatility: Volatility) -> Result<Self> {
        require_positive("sigma", volatility)?;
        Ok(Self {
            volatility,
            settings: McSettings::default(),
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
}

impl PricingEngine for McBarrierEngine {
    fn calculate(&self, market: &MarketParameters, option: &OptionSpec) -> Result<PriceEstimate> {
        let barrier = option.barrier.ok_or_else(|| {
            Error::InvalidParameter("barrier engine needs an option with a barrier".into())
        })?;
        ov_core::ensure!(
            !option.exercise.is_american(),
            "barrier options are priced with European exercise only"
        );
        let ensemble = self.settings.simulate(market, self.volatility)?;
        let model = MonteCarloModel::new(&ensemble, market.discount());
        let estimate = model.estimate(&BarrierPathPricer::new(option.payoff(), barrier))?;
        tracing::debug!(%estimate, barrier = %barrier.barrier_type, level = barrier.level, "Monte Carlo barrier");
        Ok(estimate)
    }
}

/// Barrier option price `(price, std_error)` for flat-volatility GBM.
#[allow(clippy::too_many_arguments)]
pub fn barrier_price(
    spot: Real,
    strike: Real,
    rate: Real,
    dividend_yield: Real,
    volatility: Volatility,
    maturity: Real,
    option_type: OptionType,
    barrier_level: Real,
    barrier_type: BarrierType,
    settings: McSettings,
) -> Result<PriceEstimate> {
    let market = MarketParameters::new(spot, rate, dividend_yield, maturity)?;
    let option = OptionSpec::european(option_type, strike)?
        .with_barrier(Barrier::new(barrier_type, barrier_level)?);
    McBarrierEngine::new(volatility)?
        .with_settings(settings)
        .calculate(&market, &option)
}
