//! Error types for optionvol.
//!
//! Every engine reports failure through the single `thiserror`-derived
//! [`Error`] enum. The categories mirror the failure modes of the numerical
//! pipelines: bad inputs, an arbitrage-inconsistent discretisation, and an
//! iterative routine that did not meet its tolerance. The `ensure!` and
//! `fail!` macros keep the precondition checks at the top of each engine
//! short.

use thiserror::Error;

/// The top-level error type used throughout optionvol.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// An input violated its domain (non-positive spot, `steps < 1`,
    /// `rho` outside `[-1, 1]`, ...).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The discretisation is numerically degenerate, e.g. a binomial
    /// risk-neutral probability outside `[0, 1]`.
    #[error("numerically degenerate: {0}")]
    NumericalDegenerate(String),

    /// An iterative routine (root finder, adaptive quadrature) failed to
    /// meet its tolerance within its budget.
    #[error("no convergence: {0}")]
    NonConvergence(String),

    /// General runtime error.
    #[error("{0}")]
    Runtime(String),
}

impl Error {
    /// `true` for [`Error::InvalidParameter`].
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Error::InvalidParameter(_))
    }

    /// `true` for [`Error::NumericalDegenerate`].
    pub fn is_degenerate(&self) -> bool {
        matches!(self, Error::NumericalDegenerate(_))
    }

    /// `true` for [`Error::NonConvergence`].
    pub fn is_non_convergence(&self) -> bool {
        matches!(self, Error::NonConvergence(_))
    }
}

/// Shorthand `Result` type used throughout optionvol.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Require `value > 0` (and finite).
pub fn require_positive(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidParameter(format!(
            "{name} must be positive, got {value}"
        )))
    }
}

/// Require `value >= 0` (and finite).
pub fn require_non_negative(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value >= 0.0 {
        Ok(value)
    } else {
        Err(Error::InvalidParameter(format!(
            "{name} must be non-negative, got {value}"
        )))
    }
}

/// Require a finite value.
pub fn require_finite(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::InvalidParameter(format!(
            "{name} must be finite, got {value}"
        )))
    }
}

/// Return `Err(Error::InvalidParameter(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use ov_core::{ensure, errors::Error};
/// fn positive(x: f64) -> ov_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(matches!(positive(-1.0), Err(Error::InvalidParameter(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidParameter(
                format!($($msg)*)
            ));
        }
    };
}

/// Return `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use ov_core::{fail, errors::Error};
/// fn always_err() -> ov_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_predicates() {
        assert!(Error::InvalidParameter("x".into()).is_invalid_parameter());
        assert!(Error::NumericalDegenerate("p".into()).is_degenerate());
        assert!(Error::NonConvergence("quad".into()).is_non_convergence());
        assert!(!Error::Runtime("boom".into()).is_non_convergence());
    }

    #[test]
    fn require_helpers() {
        assert_eq!(require_positive("spot", 100.0), Ok(100.0));
        assert!(require_positive("spot", 0.0).is_err());
        assert!(require_positive("spot", f64::NAN).is_err());
        assert_eq!(require_non_negative("t", 0.0), Ok(0.0));
        assert!(require_non_negative("t", -1e-12).is_err());
        assert!(require_finite("r", f64::INFINITY).is_err());
    }

    #[test]
    fn display_messages() {
        let e = Error::InvalidParameter("steps must be >= 1, got 0".into());
        assert_eq!(e.to_string(), "invalid parameter: steps must be >= 1, got 0");
    }
}
