//! Numerical integration.
//!
//! Provides a globally adaptive Gauss-Kronrod (G7/K15) integrator over a
//! finite interval with absolute and relative tolerances. Failure to meet the
//! tolerance within the subdivision budget is reported as
//! [`Error::NonConvergence`], distinct from a converged result, which carries
//! its own error estimate.

use ov_core::{
    errors::{Error, Result},
    Real,
};

/// A numerical integrator.
pub trait Integrator {
    /// Integrate `f` on `[a, b]`.
    fn integrate<F: Fn(Real) -> Real>(&self, f: F, a: Real, b: Real) -> Result<Real>;
}

/// Outcome of a converged adaptive integration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntegrationResult {
    /// Estimated value of the integral.
    pub value: Real,
    /// Estimated absolute error.
    pub error: Real,
    /// Number of integrand evaluations.
    pub evaluations: usize,
    /// Number of subintervals in the final partition.
    pub subintervals: usize,
}

// ── Gauss-Kronrod ─────────────────────────────────────────────────────────────

// 15-point Kronrod abscissae on [0, 1]; the odd-indexed ones are the 7-point
// Gauss abscissae.
const XGK: [Real; 8] = [
    0.991_455_371_120_812_6,
    0.949_107_912_342_758_5,
    0.864_864_423_359_769_1,
    0.741_531_185_599_394_4,
    0.586_087_235_467_691_1,
    0.405_845_151_377_397_2,
    0.207_784_955_007_898_5,
    0.0,
];

const WGK: [Real; 8] = [
    0.022_935_322_010_529_22,
    0.063_092_092_629_978_55,
    0.104_790_010_322_250_2,
    0.140_653_259_715_525_9,
    0.169_004_726_639_267_9,
    0.190_350_578_064_785_4,
    0.204_432_940_075_298_9,
    0.209_482_141_084_727_8,
];

const WG: [Real; 4] = [
    0.129_484_966_168_869_7,
    0.279_705_391_489_276_7,
    0.381_830_050_505_118_9,
    0.417_959_183_673_469_4,
];

/// Globally adaptive Gauss-Kronrod integration (G7/K15 pair).
///
/// The interval with the largest error estimate is bisected until the total
/// error satisfies `error <= max(absolute_accuracy, relative_accuracy·|I|)`.
/// The number of subintervals is capped at `max_subintervals`.
#[derive(Debug, Clone)]
pub struct GaussKronrodAdaptive {
    absolute_accuracy: Real,
    relative_accuracy: Real,
    max_subintervals: usize,
}

#[derive(Debug, Clone, Copy)]
struct Segment {
    a: Real,
    b: Real,
    value: Real,
    error: Real,
}

impl GaussKronrodAdaptive {
    /// Create a new integrator.
    pub fn new(absolute_accuracy: Real, relative_accuracy: Real, max_subintervals: usize) -> Self {
        Self {
            absolute_accuracy,
            relative_accuracy,
            max_subintervals: max_subintervals.max(1),
        }
    }

    /// Absolute tolerance.
    pub fn absolute_accuracy(&self) -> Real {
        self.absolute_accuracy
    }

    /// Relative tolerance.
    pub fn relative_accuracy(&self) -> Real {
        self.relative_accuracy
    }

    /// Integrate `f` on `[a, b]`, returning the value with its error estimate.
    pub fn integrate_with_error<F: Fn(Real) -> Real>(
        &self,
        f: F,
        a: Real,
        b: Real,
    ) -> Result<IntegrationResult> {
        if !(a.is_finite() && b.is_finite()) {
            return Err(Error::InvalidParameter(format!(
                "integration bounds must be finite, got [{a}, {b}]"
            )));
        }
        if a == b {
            return Ok(IntegrationResult {
                value: 0.0,
                error: 0.0,
                evaluations: 0,
                subintervals: 0,
            });
        }

        let first = kronrod_15(&f, a, b);
        let mut evaluations = 15;
        let mut segments = vec![first];
        let mut total = first.value;
        let mut total_error = first.error;

        loop {
            if !total.is_finite() || !total_error.is_finite() {
                return Err(Error::NonConvergence(format!(
                    "integrand produced a non-finite value on [{a}, {b}]"
                )));
            }
            let tolerance = self.absolute_accuracy.max(self.relative_accuracy * total.abs());
            if total_error <= tolerance {
                tracing::trace!(
                    evaluations,
                    subintervals = segments.len(),
                    value = total,
                    error = total_error,
                    "Gauss-Kronrod converged"
                );
                return Ok(IntegrationResult {
                    value: total,
                    error: total_error,
                    evaluations,
                    subintervals: segments.len(),
                });
            }
            if segments.len() >= self.max_subintervals {
                return Err(Error::NonConvergence(format!(
                    "Gauss-Kronrod: error estimate {total_error:.3e} exceeds tolerance \
                     {tolerance:.3e} after {} subintervals",
                    segments.len()
                )));
            }

            // Bisect the worst segment.
            let worst = segments
                .iter()
                .enumerate()
                .max_by(|(_, x), (_, y)| x.error.total_cmp(&y.error))
                .map(|(i, _)| i)
                .unwrap_or(0);
            let seg = segments.swap_remove(worst);
            let mid = 0.5 * (seg.a + seg.b);
            if mid <= seg.a || mid >= seg.b {
                return Err(Error::NonConvergence(format!(
                    "Gauss-Kronrod: subinterval [{}, {}] cannot be bisected further",
                    seg.a, seg.b
                )));
            }
            let left = kronrod_15(&f, seg.a, mid);
            let right = kronrod_15(&f, mid, seg.b);
            evaluations += 30;

            total += left.value + right.value - seg.value;
            total_error += left.error + right.error - seg.error;
            segments.push(left);
            segments.push(right);
        }
    }
}

impl Integrator for GaussKronrodAdaptive {
    fn integrate<F: Fn(Real) -> Real>(&self, f: F, a: Real, b: Real) -> Result<Real> {
        self.integrate_with_error(f, a, b).map(|r| r.value)
    }
}

fn kronrod_15<F: Fn(Real) -> Real>(f: &F, a: Real, b: Real) -> Segment {
    let center = 0.5 * (a + b);
    let half = 0.5 * (b - a);

    let fc = f(center);
    let mut kronrod = WGK[7] * fc;
    let mut gauss = WG[3] * fc;

    for (j, (&x, &w)) in XGK.iter().zip(WGK.iter()).take(7).enumerate() {
        let dx = half * x;
        let pair = f(center - dx) + f(center + dx);
        kronrod += w * pair;
        if j % 2 == 1 {
            gauss += WG[j / 2] * pair;
        }
    }

    Segment {
        a,
        b,
        value: kronrod * half,
        error: ((kronrod - gauss) * half).abs(),
    }
}
