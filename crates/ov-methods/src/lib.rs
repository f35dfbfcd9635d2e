//! # ov-methods
//!
//! Numerical methods: the CRR binomial lattice with backward induction and
//! the Monte Carlo framework (GBM path generation, path pricers, estimators).
//!
//! # Modules
//!
//! * [`lattice`]: binomial tree and European/American backward induction
//! * [`monte_carlo`]: path generation, path pricing, control-variate estimation

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Lattice methods: CRR binomial tree, backward induction.
pub mod lattice;

/// Monte Carlo simulation: path generation, pricing, statistics.
pub mod monte_carlo;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use lattice::{price_american, price_european, BinomialTree};
pub use monte_carlo::{
    control_variate_estimate, generate_paths, plain_estimate, AsianArithmeticPathPricer,
    BarrierPathPricer, EuropeanPathPricer, MonteCarloModel, PathEnsemble, PathGenerator,
    PathPricer,
};
