//! Probability distributions.
//!
//! Only the standard normal is needed by the pricing engines; the CDF
//! delegates to the `statrs` complementary error function.

pub mod normal;

pub use normal::{normal_cdf, normal_cdf_inverse, normal_pdf};
