//! Option exercise styles.

use std::fmt;

/// Type of exercise right.
///
/// American exercise is only meaningful for lattice pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExerciseType {
    /// Can only be exercised at expiry.
    #[default]
    European,
    /// Can be exercised at any time up to expiry.
    American,
}

impl ExerciseType {
    /// `true` for [`ExerciseType::American`].
    pub fn is_american(self) -> bool {
        self == ExerciseType::American
    }
}

impl fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExerciseType::European => write!(f, "European"),
            ExerciseType::American => write!(f, "American"),
        }
    }
}
