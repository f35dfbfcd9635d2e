//! Cox-Ross-Rubinstein recombining binomial tree.
//!
//! Node `(i, j)` is the state after `j` up-moves and `i − j` down-moves, with
//! underlying level `S·u^j·d^(i−j)`. The tree has `steps + 1` layers; layer
//! `i` holds `i + 1` nodes.

use ov_core::{
    ensure,
    errors::{require_finite, require_positive, Error},
    Real, Result, Time, Volatility,
};

/// A CRR binomial tree for geometric Brownian motion.
#[derive(Debug, Clone, PartialEq)]
pub struct BinomialTree {
    x0: Real,
    dt: Time,
    steps: usize,
    log_up: Real,
    up: Real,
    down: Real,
    pu: Real,
}

impl BinomialTree {
    /// Build the CRR tree: `dt = T/N`, `u = exp(σ√dt)`, `d = 1/u` and
    /// `p = (exp((r − q)dt) − d)/(u − d)`.
    ///
    /// Returns [`Error::NumericalDegenerate`] when `u == d` or `p ∉ [0, 1]`
    /// (too few steps for the drift).
    pub fn cox_ross_rubinstein(
        spot: Real,
        rate: Real,
        dividend_yield: Real,
        sigma: Volatility,
        maturity: Time,
        steps: usize,
    ) -> Result<Self> {
        ensure!(steps >= 1, "binomial tree needs at least one step, got {steps}");
        require_positive("spot", spot)?;
        require_positive("sigma", sigma)?;
        require_positive("maturity", maturity)?;
        require_finite("rate", rate)?;
        require_finite("dividend yield", dividend_yield)?;

        let dt = maturity / steps as Real;
        let log_up = sigma * dt.sqrt();
        let up = log_up.exp();
        let down = 1.0 / up;
        if !(up > down) {
            return Err(Error::NumericalDegenerate(format!(
                "CRR: up and down factors coincide (u = {up}, sigma·√dt = {log_up:e})"
            )));
        }
        let growth = ((rate - dividend_yield) * dt).exp();
        let pu = (growth - down) / (up - down);
        if !(0.0..=1.0).contains(&pu) {
            return Err(Error::NumericalDegenerate(format!(
                "CRR: risk-neutral probability {pu} outside [0, 1] with {steps} steps; \
                 increase steps or sigma"
            )));
        }

        Ok(Self {
            x0: spot,
            dt,
            steps,
            log_up,
            up,
            down,
            pu,
        })
    }

    // ── Accessors ────────────────────────────────────────────────────────

    /// Number of time steps.
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Time increment per step.
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// Initial underlying value.
    pub fn x0(&self) -> Real {
        self.x0
    }

    /// Up factor `u`.
    pub fn up(&self) -> Real {
        self.up
    }

    /// Down factor `d = 1/u`.
    pub fn down(&self) -> Real {
        self.down
    }

    /// Risk-neutral up probability `p`.
    pub fn pu(&self) -> Real {
        self.pu
    }

    /// Down probability `1 − p`.
    pub fn pd(&self) -> Real {
        1.0 - self.pu
    }

    /// Number of nodes at step `i`.
    pub fn size(&self, i: usize) -> usize {
        i + 1
    }

    /// Underlying level `S·u^j·d^(i−j)` at node `(i, j)`.
    #[inline]
    pub fn underlying(&self, i: usize, j: usize) -> Real {
        let net_ups = 2.0 * j as Real - i as Real;
        self.x0 * (net_ups * self.log_up).exp()
    }
}
