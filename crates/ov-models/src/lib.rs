//! # ov-models
//!
//! Volatility model parameter sets: a flat Black-Scholes volatility and the
//! Heston stochastic-volatility parameters `{κ, θ, σ_v, ρ, v0}`.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod heston_model;
pub mod volatility;

pub use heston_model::HestonParameters;
pub use volatility::VolatilityInput;
