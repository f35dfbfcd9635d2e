//! # ov-pricingengines
//!
//! Pricing engines: closed-form, lattice, semi-analytic and Monte Carlo
//! implementations for single-asset equity options.
//!
//! ## Engines
//!
//! - [`AnalyticEuropeanEngine`]: Black-Scholes-Merton closed form with Greeks
//! - [`BinomialEngine`]: Cox-Ross-Rubinstein lattice, European and American
//! - [`AnalyticHestonEngine`]: Heston characteristic-function integration
//! - [`McEuropeanEngine`], [`McAsianEngine`], [`McBarrierEngine`]: GBM Monte
//!   Carlo with antithetic sampling and an optional control variate
//!
//! [`implied_volatility()`] inverts the Black-Scholes price.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analytic_european_engine;
pub mod analytic_heston_engine;
pub mod binomial_engine;
pub mod implied_volatility;
pub mod mc_asian_engine;
pub mod mc_barrier_engine;
pub mod mc_european_engine;
pub mod mc_settings;

pub use analytic_european_engine::{
    black_scholes_merton, black_scholes_price, black_scholes_vega, AnalyticEuropeanEngine,
    BlackScholesResults,
};
pub use analytic_heston_engine::{
    heston_characteristic_function, heston_price, heston_probabilities, AnalyticHestonEngine,
    HestonIntegrationSettings,
};
pub use binomial_engine::{crr_price, BinomialEngine};
pub use implied_volatility::{implied_volatility, implied_volatility_newton, try_implied_volatility};
pub use mc_asian_engine::{asian_price, ControlExpectation, McAsianEngine};
pub use mc_barrier_engine::{barrier_price, McBarrierEngine};
pub use mc_european_engine::McEuropeanEngine;
pub use mc_settings::McSettings;
