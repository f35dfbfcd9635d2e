//! Volatility input: a flat Black-Scholes volatility or a Heston set.

use crate::heston_model::HestonParameters;
use ov_core::{errors::require_positive, Error, Real, Result, Volatility};

/// The volatility description consumed by an engine.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum VolatilityInput {
    /// Constant volatility `σ > 0` (Black-Scholes, binomial, GBM paths).
    Flat(Volatility),
    /// Heston stochastic volatility.
    Heston(HestonParameters),
}

impl VolatilityInput {
    /// A validated flat volatility.
    pub fn flat(sigma: Volatility) -> Result<Self> {
        require_positive("sigma", sigma)?;
        Ok(VolatilityInput::Flat(sigma))
    }

    /// Check the wrapped parameters.
    pub fn validate(&self) -> Result<()> {
        match self {
            VolatilityInput::Flat(sigma) => require_positive("sigma", *sigma).map(|_| ()),
            VolatilityInput::Heston(params) => params.validate(),
        }
    }

    /// The flat volatility, if this is one.
    pub fn as_flat(&self) -> Option<Volatility> {
        match self {
            VolatilityInput::Flat(sigma) => Some(*sigma),
            VolatilityInput::Heston(_) => None,
        }
    }

    /// The Heston parameters, if this is a Heston set.
    pub fn as_heston(&self) -> Option<&HestonParameters> {
        match self {
            VolatilityInput::Heston(params) => Some(params),
            VolatilityInput::Flat(_) => None,
        }
    }

    /// The validated flat volatility; a Heston set is rejected.
    pub fn require_flat(&self) -> Result<Volatility> {
        match self {
            VolatilityInput::Flat(sigma) => require_positive("sigma", *sigma),
            VolatilityInput::Heston(_) => Err(Error::InvalidParameter(
                "engine requires a flat volatility, got Heston parameters".into(),
            )),
        }
    }

    /// The validated Heston parameters; a flat volatility is rejected.
    pub fn require_heston(&self) -> Result<HestonParameters> {
        match self {
            VolatilityInput::Heston(params) => {
                params.validate()?;
                Ok(*params)
            }
            VolatilityInput::Flat(sigma) => Err(Error::InvalidParameter(format!(
                "engine requires Heston parameters, got flat volatility {sigma}"
            ))),
        }
    }

    /// Root-mean-square volatility over `[0, t]`.
    pub fn effective_volatility(&self, t: Real) -> Volatility {
        match self {
            VolatilityInput::Flat(sigma) => *sigma,
            VolatilityInput::Heston(params) => params.mean_variance(t).max(0.0).sqrt(),
        }
    }
}

impl From<HestonParameters> for VolatilityInput {
    fn from(params: HestonParameters) -> Self {
        VolatilityInput::Heston(params)
    }
}
