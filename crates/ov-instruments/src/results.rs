//! Pricing results.

use ov_core::Real;
use std::fmt;

/// A price together with its statistical error.
///
/// Deterministic engines report `std_error == 0` and `samples == 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceEstimate {
    /// Present value.
    pub price: Real,
    /// Standard error of the estimate (discounted sample standard deviation
    /// over `√samples`).
    pub std_error: Real,
    /// Number of payoff samples averaged.
    pub samples: usize,
    /// Whether a control-variate correction was applied.
    pub control_variate_applied: bool,
}

impl PriceEstimate {
    /// An exact (non-statistical) price.
    pub fn exact(price: Real) -> Self {
        Self {
            price,
            std_error: 0.0,
            samples: 0,
            control_variate_applied: false,
        }
    }

    /// `(price, std_error)`.
    pub fn as_tuple(&self) -> (Real, Real) {
        (self.price, self.std_error)
    }

    /// Symmetric confidence interval `price ± z·std_error`.
    pub fn confidence_interval(&self, z: Real) -> (Real, Real) {
        (self.price - z * self.std_error, self.price + z * self.std_error)
    }
}

impl fmt::Display for PriceEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6} ± {:.6} (n = {})", self.price, self.std_error, self.samples)
    }
}
