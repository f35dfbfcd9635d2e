//! # optionvol
//!
//! Option pricing and volatility engines: Black-Scholes with Greeks and
//! implied volatility, the Cox-Ross-Rubinstein binomial lattice with early
//! exercise, semi-analytic Heston, and GBM Monte Carlo for Asian and barrier
//! options.
//!
//! This crate is a **façade** that re-exports the underlying workspace
//! crates. Application code should depend on this crate rather than the
//! individual `ov-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use optionvol::instruments::{MarketParameters, OptionSpec, OptionType, PricingEngine};
//! use optionvol::pricingengines::{AnalyticEuropeanEngine, BinomialEngine};
//!
//! let market = MarketParameters::new(100.0, 0.05, 0.0, 1.0)?;
//! let call = OptionSpec::european(OptionType::Call, 100.0)?;
//! let bs = AnalyticEuropeanEngine::new(0.2)?.calculate(&market, &call)?;
//! let crr = BinomialEngine::new(0.2)?.with_steps(800).calculate(&market, &call)?;
//! assert!((bs.price - crr.price).abs() < 1e-2);
//! # Ok::<(), optionvol::core::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use ov_core as core;

/// Mathematical utilities: normal distribution, quadrature, solvers, RNG.
pub use ov_math as math;

/// Option terms, market inputs, and results.
pub use ov_instruments as instruments;

/// Volatility model parameters.
pub use ov_models as models;

/// Numerical methods (binomial lattice, Monte Carlo).
pub use ov_methods as methods;

/// Pricing engines.
pub use ov_pricingengines as pricingengines;

pub use ov_core::{Error, Result};
