//! Option contract terms: strike, payoff kind, exercise, and an optional
//! discretely monitored barrier.

use crate::exercise::ExerciseType;
use crate::payoff::{OptionType, PlainVanillaPayoff};
use ov_core::{errors::require_positive, Real, Result};
use std::fmt;

/// Barrier type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BarrierType {
    /// Down-and-in: becomes active when price drops to the barrier.
    DownIn,
    /// Up-and-in: becomes active when price rises to the barrier.
    UpIn,
    /// Down-and-out: expires when price drops to the barrier.
    DownOut,
    /// Up-and-out: expires when price rises to the barrier.
    UpOut,
}

impl BarrierType {
    /// `true` for up barriers (breach tested on the path maximum).
    pub fn is_up(self) -> bool {
        matches!(self, BarrierType::UpIn | BarrierType::UpOut)
    }

    /// `true` for knock-out barriers.
    pub fn is_knock_out(self) -> bool {
        matches!(self, BarrierType::UpOut | BarrierType::DownOut)
    }

    /// Whether a monitored path with the given extremes breaches `level`.
    ///
    /// Up barriers breach when `max >= level`, down barriers when
    /// `min <= level`.
    #[inline]
    pub fn is_breached(self, level: Real, path_min: Real, path_max: Real) -> bool {
        if self.is_up() {
            path_max >= level
        } else {
            path_min <= level
        }
    }

    /// Whether the terminal payoff survives given the breach outcome.
    ///
    /// Knock-outs pay only without a breach, knock-ins only with one.
    #[inline]
    pub fn pays(self, breached: bool) -> bool {
        breached != self.is_knock_out()
    }
}

impl fmt::Display for BarrierType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BarrierType::DownIn => "down-and-in",
            BarrierType::UpIn => "up-and-in",
            BarrierType::DownOut => "down-and-out",
            BarrierType::UpOut => "up-and-out",
        };
        f.write_str(s)
    }
}

/// A barrier: kind plus level.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Barrier {
    /// Barrier kind.
    pub barrier_type: BarrierType,
    /// Barrier level (must be positive).
    pub level: Real,
}

impl Barrier {
    /// Create a barrier; the level must be positive.
    pub fn new(barrier_type: BarrierType, level: Real) -> Result<Self> {
        require_positive("barrier level", level)?;
        Ok(Self {
            barrier_type,
            level,
        })
    }
}

/// Contract terms of a single-asset option.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OptionSpec {
    /// Strike (must be positive).
    pub strike: Real,
    /// Call or put.
    pub option_type: OptionType,
    /// Exercise style.
    pub exercise: ExerciseType,
    /// Optional barrier (Monte Carlo only).
    pub barrier: Option<Barrier>,
}

impl OptionSpec {
    /// A European vanilla option.
    pub fn european(option_type: OptionType, strike: Real) -> Result<Self> {
        require_positive("strike", strike)?;
        Ok(Self {
            strike,
            option_type,
            exercise: ExerciseType::European,
            barrier: None,
        })
    }

    /// An American vanilla option.
    pub fn american(option_type: OptionType, strike: Real) -> Result<Self> {
        Ok(Self {
            exercise: ExerciseType::American,
            ..Self::european(option_type, strike)?
        })
    }

    /// Attach a barrier.
    pub fn with_barrier(mut self, barrier: Barrier) -> Self {
        self.barrier = Some(barrier);
        self
    }

    /// The terminal payoff.
    pub fn payoff(&self) -> PlainVanillaPayoff {
        PlainVanillaPayoff {
            option_type: self.option_type,
            strike: self.strike,
        }
    }
}
