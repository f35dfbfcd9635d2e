//! Shared configuration for the Monte Carlo engines.

use ov_core::{errors::require_positive, Result, Volatility};
use ov_instruments::MarketParameters;
use ov_math::random_numbers::RngKind;
use ov_methods::monte_carlo::{PathEnsemble, PathGenerator};

/// Simulation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct McSettings {
    /// Monitoring steps per path.
    pub steps: usize,
    /// Number of paths (rounded down to even with antithetic sampling).
    pub paths: usize,
    /// RNG seed.
    pub seed: u64,
    /// Antithetic sampling.
    pub antithetic: bool,
    /// RNG back-end.
    pub rng: RngKind,
}

impl Default for McSettings {
    fn default() -> Self {
        Self {
            steps: 100,
            paths: 20_000,
            seed: 42,
            antithetic: false,
            rng: RngKind::MersenneTwister,
        }
    }
}

impl McSettings {
    /// Set the number of monitoring steps.
    pub fn with_steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Set the number of paths.
    pub fn with_paths(mut self, paths: usize) -> Self {
        self.paths = paths;
        self
    }

    /// Set the seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Enable or disable antithetic sampling.
    pub fn with_antithetic(mut self, antithetic: bool) -> Self {
        self.antithetic = antithetic;
        self
    }

    /// Select the RNG back-end.
    pub fn with_rng(mut self, rng: RngKind) -> Self {
        self.rng = rng;
        self
    }

    /// Simulate the ensemble for `market` at flat volatility `sigma`.
    pub(crate) fn simulate(
        &self,
        market: &MarketParameters,
        sigma: Volatility,
    ) -> Result<PathEnsemble> {
        market.validate()?;
        require_positive("sigma", sigma)?;
        PathGenerator::new(
            market.spot,
            market.rate,
            market.dividend_yield,
            sigma,
            market.maturity,
            self.steps,
        )?
        .with_rng(self.rng)
        .generate(self.paths, self.seed, self.antithetic)
    }
}
