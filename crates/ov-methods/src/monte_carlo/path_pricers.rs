//! Undiscounted payoffs evaluated on a single simulated path.

use ov_core::Real;
use ov_instruments::{Barrier, Payoff, PlainVanillaPayoff};

/// Evaluates the payoff of one path (`path[0]` is the initial spot).
pub trait PathPricer: Send + Sync {
    /// The undiscounted payoff of `path`.
    fn value(&self, path: &[Real]) -> Real;
}

/// European payoff on the terminal price.
#[derive(Debug, Clone, Copy)]
pub struct EuropeanPathPricer {
    payoff: PlainVanillaPayoff,
}

impl EuropeanPathPricer {
    /// Create a European pricer.
    pub fn new(payoff: PlainVanillaPayoff) -> Self {
        Self { payoff }
    }
}

impl PathPricer for EuropeanPathPricer {
    fn value(&self, path: &[Real]) -> Real {
        path.last().map_or(0.0, |&s| self.payoff.value(s))
    }
}

/// Arithmetic-average Asian payoff over the monitoring dates, excluding the
/// initial spot.
#[derive(Debug, Clone, Copy)]
pub struct AsianArithmeticPathPricer {
    payoff: PlainVanillaPayoff,
}

impl AsianArithmeticPathPricer {
    /// Create an Asian arithmetic-average pricer.
    pub fn new(payoff: PlainVanillaPayoff) -> Self {
        Self { payoff }
    }
}

impl PathPricer for AsianArithmeticPathPricer {
    fn value(&self, path: &[Real]) -> Real {
        let monitored = path.get(1..).unwrap_or(&[]);
        if monitored.is_empty() {
            return 0.0;
        }
        let avg = monitored.iter().sum::<Real>() / monitored.len() as Real;
        self.payoff.value(avg)
    }
}

/// Discretely monitored barrier payoff.
///
/// The breach test uses the extremes of `path[1..]`; the terminal vanilla
/// payoff is kept or zeroed according to [`BarrierType::pays`](ov_instruments::BarrierType::pays).
#[derive(Debug, Clone, Copy)]
pub struct BarrierPathPricer {
    payoff: PlainVanillaPayoff,
    barrier: Barrier,
}

impl BarrierPathPricer {
    /// Create a barrier pricer.
    pub fn new(payoff: PlainVanillaPayoff, barrier: Barrier) -> Self {
        Self { payoff, barrier }
    }
}

impl PathPricer for BarrierPathPricer {
    fn value(&self, path: &[Real]) -> Real {
        let monitored = path.get(1..).unwrap_or(&[]);
        let Some(&terminal) = monitored.last() else {
            return 0.0;
        };
        let (lo, hi) = monitored
            .iter()
            .fold((Real::INFINITY, Real::NEG_INFINITY), |(lo, hi), &s| {
                (lo.min(s), hi.max(s))
            });
        let kind = self.barrier.barrier_type;
        if kind.pays(kind.is_breached(self.barrier.level, lo, hi)) {
            self.payoff.value(terminal)
        } else {
            0.0
        }
    }
}
