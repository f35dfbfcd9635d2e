//! Heston stochastic volatility model parameters.
//!
//! ```text
//! dS = (r − q)·S dt + √v·S dW₁
//! dv = κ(θ − v) dt + σ_v √v dW₂
//! dW₁·dW₂ = ρ dt
//! ```

use ov_core::{
    ensure,
    errors::{require_non_negative, require_positive},
    Real, Result,
};

/// The five Heston parameters `{κ, θ, σ_v, ρ, v0}`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HestonParameters {
    /// Mean-reversion speed `κ > 0`.
    pub kappa: Real,
    /// Long-run variance `θ >= 0`.
    pub theta: Real,
    /// Volatility of variance `σ_v >= 0`.
    pub sigma_v: Real,
    /// Spot/variance correlation `ρ ∈ [−1, 1]`.
    pub rho: Real,
    /// Initial variance `v0 >= 0`.
    pub v0: Real,
}

impl HestonParameters {
    /// Create a validated parameter set.
    pub fn new(kappa: Real, theta: Real, sigma_v: Real, rho: Real, v0: Real) -> Result<Self> {
        let params = Self {
            kappa,
            theta,
            sigma_v,
            rho,
            v0,
        };
        params.validate()?;
        Ok(params)
    }

    /// Parameters under which the model collapses to Black-Scholes with
    /// volatility `sigma`: `v0 = θ = σ²`, zero vol-of-vol and correlation.
    pub fn black_scholes_limit(sigma: Real, kappa: Real) -> Result<Self> {
        require_positive("sigma", sigma)?;
        let variance = sigma * sigma;
        Self::new(kappa, variance, 0.0, 0.0, variance)
    }

    /// Check the domain of every parameter.
    pub fn validate(&self) -> Result<()> {
        require_positive("kappa", self.kappa)?;
        require_non_negative("theta", self.theta)?;
        require_non_negative("sigma_v", self.sigma_v)?;
        require_non_negative("v0", self.v0)?;
        ensure!(
            self.rho.is_finite() && (-1.0..=1.0).contains(&self.rho),
            "rho must lie in [-1, 1], got {}",
            self.rho
        );
        Ok(())
    }

    /// Feller condition `2κθ >= σ_v²` (variance stays strictly positive).
    pub fn satisfies_feller(&self) -> bool {
        2.0 * self.kappa * self.theta >= self.sigma_v * self.sigma_v
    }

    /// Expected average variance over `[0, t]`.
    pub fn mean_variance(&self, t: Real) -> Real {
        if t <= 0.0 {
            return self.v0;
        }
        let kt = self.kappa * t;
        self.theta + (self.v0 - self.theta) * (1.0 - (-kt).exp()) / kt
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn valid_parameters() {
        let p = HestonParameters::new(2.0, 0.04, 0.3, -0.7, 0.04).unwrap();
        assert!(p.satisfies_feller());
        assert_relative_eq!(p.mean_variance(1.0), 0.04, max_relative = 1e-14);
    }

    #[test]
    fn feller_violation_is_not_an_error() {
        let p = HestonParameters::new(1.0, 0.04, 1.0, -0.5, 0.04).unwrap();
        assert!(!p.satisfies_feller());
    }

    #[test]
    fn invalid_parameters() {
        assert!(HestonParameters::new(0.0, 0.04, 0.3, 0.0, 0.04).is_err());
        assert!(HestonParameters::new(2.0, -0.01, 0.3, 0.0, 0.04).is_err());
        assert!(HestonParameters::new(2.0, 0.04, -0.3, 0.0, 0.04).is_err());
        assert!(HestonParameters::new(2.0, 0.04, 0.3, 1.5, 0.04).is_err());
        assert!(HestonParameters::new(2.0, 0.04, 0.3, f64::NAN, 0.04).is_err());
        assert!(HestonParameters::new(2.0, 0.04, 0.3, 0.0, -0.04).is_err());
    }

    #[test]
    fn black_scholes_limit_parameters() {
        let p = HestonParameters::black_scholes_limit(0.2, 10.0).unwrap();
        assert_relative_eq!(p.v0, 0.04, max_relative = 1e-14);
        assert_eq!(p.theta, p.v0);
        assert_eq!(p.sigma_v, 0.0);
    }

    #[test]
    fn mean_variance_interpolates_towards_theta() {
        let p = HestonParameters::new(3.0, 0.09, 0.2, 0.0, 0.01).unwrap();
        let short = p.mean_variance(0.01);
        let long = p.mean_variance(50.0);
        assert!(short < 0.02);
        assert!((long - 0.09).abs() < 0.01);
    }
}
