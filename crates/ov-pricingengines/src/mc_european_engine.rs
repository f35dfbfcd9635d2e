//! Monte Carlo engine for European vanilla options.

use crate::mc_settings::McSettings;
use ov_core::{ensure, errors::require_positive, Result, Volatility};
use ov_instruments::{MarketParameters, OptionSpec, PriceEstimate, PricingEngine};
use ov_methods::monte_carlo::{EuropeanPathPricer, MonteCarloModel};
use ov_models::VolatilityInput;

/// Monte Carlo European engine under GBM.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct McEuropeanEngine {
    volatility: Volatility,
    settings: McSettings,
}

impl McEuropeanEngine {
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

impl PricingEngine for McEuropeanEngine {
    fn calculate(&self, market: &MarketParameters, option: &OptionSpec) -> Result<PriceEstimate> {
        ensure!(
            !option.exercise.is_american() && option.barrier.is_none(),
            "the Monte Carlo European engine prices European vanillas only"
        );
        let ensemble = self.settings.simulate(market, self.volatility)?;
        let model = MonteCarloModel::new(&ensemble, market.discount());
        let estimate = model.estimate(&EuropeanPathPricer::new(option.payoff()))?;
        tracing::debug!(%estimate, "Monte Carlo European");
        Ok(estimate)
    }
}
