//! Monte Carlo simulation framework.
//!
//! * [`PathGenerator`]: seeded GBM path ensembles, optionally antithetic
//! * [`PathPricer`]: payoff of a single path
//! * [`MonteCarloModel`]: evaluates a pricer over an ensemble and turns the
//!   payoff sample into a [`PriceEstimate`], with an optional control variate

pub mod path_generator;
pub mod path_pricers;

pub use path_generator::{generate_paths, PathEnsemble, PathGenerator};
pub use path_pricers::{
    AsianArithmeticPathPricer, BarrierPathPricer, EuropeanPathPricer, PathPricer,
};

use ov_core::{ensure, DiscountFactor, Real, Result};
use ov_instruments::PriceEstimate;
use ov_math::statistics::{covariance_and_variance, Statistics};

// ─── MonteCarloModel ──────────────────────────────────────────────────────────

/// Payoff evaluation and estimation over one path ensemble.
///
/// The ensemble is borrowed and not retained past the call.
#[derive(Debug, Clone, Copy)]
pub struct MonteCarloModel<'a> {
    ensemble: &'a PathEnsemble,
    discount: DiscountFactor,
}

impl<'a> MonteCarloModel<'a> {
    /// Create a model over `ensemble` discounting payoffs by `discount`.
    pub fn new(ensemble: &'a PathEnsemble, discount: DiscountFactor) -> Self {
        Self { ensemble, discount }
    }

    /// Undiscounted payoff of every path, in path order.
    pub fn payoffs(&self, pricer: &dyn PathPricer) -> Vec<Real> {
        self.ensemble.iter().map(|path| pricer.value(path)).collect()
    }

    /// Plain estimator: discounted mean with standard error
    /// `disc·stdev(ddof = 1)/√n`.
    pub fn estimate(&self, pricer: &dyn PathPricer) -> Result<PriceEstimate> {
        plain_estimate(&self.payoffs(pricer), self.discount)
    }

    /// Control-variate estimator using `control` on the same paths.
    ///
    /// See [`control_variate_estimate`].
    pub fn estimate_with_control(
        &self,
        pricer: &dyn PathPricer,
        control: &dyn PathPricer,
        control_expectation: Option<Real>,
    ) -> Result<PriceEstimate> {
        let targets = self.payoffs(pricer);
        let controls = self.payoffs(control);
        control_variate_estimate(&targets, &controls, control_expectation, self.discount)
    }
}

// ─── Estimators ───────────────────────────────────────────────────────────────

/// Discounted sample mean and standard error of `payoffs`.
pub fn plain_estimate(payoffs: &[Real], discount: DiscountFactor) -> Result<PriceEstimate> {
    ensure!(
        payoffs.len() >= 2,
        "a standard error needs at least 2 samples, got {}",
        payoffs.len()
    );
    let stats: Statistics = payoffs.iter().copied().collect();
    let (Some(mean), Some(error)) = (stats.mean(), stats.error_estimate()) else {
        ov_core::fail!("payoff statistics unavailable for {} samples", payoffs.len());
    };
    Ok(PriceEstimate {
        price: discount * mean,
        std_error: discount * error,
        samples: stats.samples(),
        control_variate_applied: false,
    })
}

/// Control-variate estimator.
///
/// Forms `y − b̂·(c − E[c])` with `b̂ = Cov(y, c)/Var(c)` (population
/// moments) and returns its discounted mean and standard error.
/// `control_expectation` is the undiscounted expectation of the control
/// payoff. When it is `None` the sample mean of `controls` is used, which
/// keeps the variance reduction but leaves the correction term at exactly
/// zero mean. A control with zero sample variance falls back to the plain
/// estimator with `control_variate_applied == false`.
pub fn control_variate_estimate(
    targets: &[Real],
    controls: &[Real],
    control_expectation: Option<Real>,
    discount: DiscountFactor,
) -> Result<PriceEstimate> {
    ensure!(
        targets.len() == controls.len(),
        "target and control samples differ in length: {} vs {}",
        targets.len(),
        controls.len()
    );
    ensure!(
        targets.len() >= 2,
        "a standard error needs at least 2 samples, got {}",
        targets.len()
    );
    let Some((cov, var)) = covariance_and_variance(targets, controls) else {
        ov_core::fail!("covariance undefined for {} samples", targets.len());
    };
    if !(var > 0.0) {
        tracing::warn!(
            samples = targets.len(),
            "control payoff has zero variance; using the plain estimator"
        );
        return plain_estimate(targets, discount);
    }

    let expectation = match control_expectation {
        Some(e) => e,
        None => {
            tracing::warn!(
                "no control expectation supplied; falling back to the sample mean, \
                 which removes the bias correction"
            );
            controls.iter().sum::<Real>() / controls.len() as Real
        }
    };
    let beta = cov / var;
    tracing::debug!(beta, expectation, samples = targets.len(), "control variate");

    let adjusted: Vec<Real> = targets
        .iter()
        .zip(controls)
        .map(|(&y, &c)| y - beta * (c - expectation))
        .collect();
    Ok(PriceEstimate {
        control_variate_applied: true,
        ..plain_estimate(&adjusted, discount)?
    })
}

// ─── Tests ────────────────────────────────────────────────────────────────────
