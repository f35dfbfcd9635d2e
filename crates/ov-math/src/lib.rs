//! # ov-math
//!
//! Mathematical utilities: the normal distribution (via statrs), adaptive
//! Gauss-Kronrod quadrature, 1-D root finders, seeded Gaussian random number
//! generators, and statistics accumulators.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Probability distributions.
pub mod distributions;

/// Numerical integration.
pub mod integrals;

/// Random number generators.
pub mod random_numbers;

/// 1D root-finding solvers.
pub mod solvers1d;

/// Statistics accumulators.
pub mod statistics;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use distributions::{normal_cdf, normal_cdf_inverse, normal_pdf};
pub use integrals::{GaussKronrodAdaptive, IntegrationResult, Integrator};
pub use random_numbers::{GaussianRng, RngKind};
pub use statistics::Statistics;
