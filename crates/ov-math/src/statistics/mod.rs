//! Statistics accumulators.

use ov_core::Real;

/// Incremental statistics accumulator.
///
/// Accumulates samples with Welford's update and reports mean, variance
/// (Bessel-corrected), standard deviation, standard error of the mean,
/// min, max, and count.
#[derive(Debug, Clone)]
pub struct Statistics {
    count: usize,
    mean: Real,
    m2: Real,
    min: Real,
    max: Real,
}

impl Default for Statistics {
    fn default() -> Self {
        Self::new()
    }
}

impl Statistics {
    /// Create a new empty accumulator.
    pub fn new() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }

    /// Add a single sample.
    pub fn add(&mut self, x: Real) {
        self.count += 1;
        let delta = x - self.mean;
        self.mean += delta / self.count as Real;
        self.m2 += delta * (x - self.mean);
        self.min = self.min.min(x);
        self.max = self.max.max(x);
    }

    /// Number of samples.
    pub fn samples(&self) -> usize {
        self.count
    }

    /// Sample mean.  Returns `None` if no samples have been added.
    pub fn mean(&self) -> Option<Real> {
        (self.count > 0).then_some(self.mean)
    }

    /// Unbiased (ddof = 1) variance.  Returns `None` for fewer than 2 samples.
    pub fn variance(&self) -> Option<Real> {
        (self.count >= 2).then(|| self.m2 / (self.count as Real - 1.0))
    }

    /// Standard deviation.  Returns `None` for fewer than 2 samples.
    pub fn std_dev(&self) -> Option<Real> {
        self.variance().map(|v| v.sqrt())
    }

    /// Standard error of the mean, `std_dev / √n`.
    pub fn error_estimate(&self) -> Option<Real> {
        self.std_dev().map(|s| s / (self.count as Real).sqrt())
    }

    /// Minimum sample value.  Returns `None` if no samples have been added.
    pub fn minimum(&self) -> Option<Real> {
        (self.count > 0).then_some(self.min)
    }

    /// Maximum sample value.  Returns `None` if no samples have been added.
    pub fn maximum(&self) -> Option<Real> {
        (self.count > 0).then_some(self.max)
    }

    /// Reset the accumulator to its initial state.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Extend<Real> for Statistics {
    fn extend<I: IntoIterator<Item = Real>>(&mut self, iter: I) {
        for x in iter {
            self.add(x);
        }
    }
}

impl FromIterator<Real> for Statistics {
    fn from_iter<I: IntoIterator<Item = Real>>(iter: I) -> Self {
        let mut s = Self::new();
        s.extend(iter);
        s
    }
}

/// Population (ddof = 0) covariance of `xs` and `ys` together with the
/// population variance of `ys`.
///
/// Returns `None` when the slices are empty or of different lengths.
pub fn covariance_and_variance(xs: &[Real], ys: &[Real]) -> Option<(Real, Real)> {
    if xs.is_empty() || xs.len() != ys.len() {
        return None;
    }
    let n = xs.len() as Real;
    let mx = xs.iter().sum::<Real>() / n;
    let my = ys.iter().sum::<Real>() / n;
    let (cov, var_y) = xs
        .iter()
        .zip(ys)
        .fold((0.0, 0.0), |(c, v), (&x, &y)| {
            let dy = y - my;
            (c + (x - mx) * dy, v + dy * dy)
        });
    Some((cov / n, var_y / n))
}
