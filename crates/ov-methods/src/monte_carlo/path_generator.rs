//! Geometric Brownian motion path generation.

use ov_core::{
    ensure,
    errors::{require_finite, require_positive},
    Rate, Real, Result, Time, Volatility,
};
use ov_math::random_numbers::RngKind;

// ─── PathEnsemble ─────────────────────────────────────────────────────────────

/// A set of simulated price paths, one row per path.
///
/// Every path holds `steps + 1` prices, the first being the initial spot.
/// Storage is a single row-major buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct PathEnsemble {
    values: Vec<Real>,
    paths: usize,
    points: usize,
}

impl PathEnsemble {
    /// Number of paths.
    pub fn paths(&self) -> usize {
        self.paths
    }

    /// Number of time points per path (`steps + 1`).
    pub fn points(&self) -> usize {
        self.points
    }

    /// Number of time steps per path.
    pub fn steps(&self) -> usize {
        self.points - 1
    }

    /// The `i`-th path, or `None` when out of range.
    pub fn path(&self, i: usize) -> Option<&[Real]> {
        if i >= self.paths {
            return None;
        }
        let start = i * self.points;
        self.values.get(start..start + self.points)
    }

    /// Iterate over the paths in order.
    pub fn iter(&self) -> impl Iterator<Item = &[Real]> + '_ {
        self.values.chunks_exact(self.points)
    }

    /// The raw row-major buffer.
    pub fn as_slice(&self) -> &[Real] {
        &self.values
    }
}

// ─── PathGenerator ────────────────────────────────────────────────────────────

/// Generates discretized GBM paths under the risk-neutral measure.
///
/// Log increments are `ν·dt + σ√dt·Z` with `ν = r − q − σ²/2`. Normals are
/// drawn in `(steps, draws)` order, i.e. all paths' first increments come
/// before any second increment.
///
/// The generator holds only parameters: each [`generate`](Self::generate)
/// call seeds a fresh RNG, so identical seeds give bit-identical ensembles.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathGenerator {
    spot: Real,
    rate: Rate,
    dividend_yield: Rate,
    sigma: Volatility,
    maturity: Time,
    steps: usize,
    rng: RngKind,
}

impl PathGenerator {
    /// Create a validated generator using the default RNG back-end.
    pub fn new(
        spot: Real,
        rate: Rate,
        dividend_yield: Rate,
        sigma: Volatility,
        maturity: Time,
        steps: usize,
    ) -> Result<Self> {
        require_positive("spot", spot)?;
        require_finite("rate", rate)?;
        require_finite("dividend yield", dividend_yield)?;
        require_positive("sigma", sigma)?;
        require_positive("maturity", maturity)?;
        ensure!(steps >= 1, "path generator needs at least one step, got {steps}");
        Ok(Self {
            spot,
            rate,
            dividend_yield,
            sigma,
            maturity,
            steps,
            rng: RngKind::default(),
        })
    }

    /// Select the RNG back-end.
    pub fn with_rng(mut self, rng: RngKind) -> Self {
        self.rng = rng;
        self
    }

    /// Time increment per step.
    pub fn dt(&self) -> Time {
        self.maturity / self.steps as Real
    }

    /// Number of time steps.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Simulate `paths` trajectories from `seed`.
    ///
    /// With `antithetic`, only `paths / 2` independent draws are made and the
    /// second half of the ensemble replays them negated, so an odd `paths`
    /// yields `paths − 1` trajectories.
    pub fn generate(&self, paths: usize, seed: u64, antithetic: bool) -> Result<PathEnsemble> {
        let (draws, total) = if antithetic {
            ensure!(paths >= 2, "antithetic sampling needs at least 2 paths, got {paths}");
            (paths / 2, 2 * (paths / 2))
        } else {
            ensure!(paths >= 1, "at least one path is required");
            (paths, paths)
        };

        let mut normals = vec![0.0; self.steps * draws];
        let mut rng = self.rng.make(seed);
        rng.fill(&mut normals);

        let dt = self.dt();
        let drift = (self.rate - self.dividend_yield - 0.5 * self.sigma * self.sigma) * dt;
        let diffusion = self.sigma * dt.sqrt();
        let points = self.steps + 1;

        let mut values = vec![0.0; total * points];
        for (p, row) in values.chunks_exact_mut(points).enumerate() {
            let (column, sign) = if p < draws { (p, 1.0) } else { (p - draws, -1.0) };
            let mut log_price = 0.0;
            row[0] = self.spot;
            for (step, slot) in row[1..].iter_mut().enumerate() {
                log_price += drift + diffusion * sign * normals[step * draws + column];
                *slot = self.spot * log_price.exp();
            }
        }

        tracing::debug!(
            paths = total,
            steps = self.steps,
            seed,
            antithetic,
            rng = ?self.rng,
            "generated GBM path ensemble"
        );

        Ok(PathEnsemble {
            values,
            paths: total,
            points,
        })
    }
}

/// Free-function form of [`PathGenerator::generate`].
#[allow(clippy::too_many_arguments)]
pub fn generate_paths(
    spot: Real,
    rate: Rate,
    dividend_yield: Rate,
    sigma: Volatility,
    maturity: Time,
    steps: usize,
    paths: usize,
    seed: u64,
    antithetic: bool,
) -> Result<PathEnsemble> {
    PathGenerator::new(spot, rate, dividend_yield, sigma, maturity, steps)?
        .generate(paths, seed, antithetic)
}
