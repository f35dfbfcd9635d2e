//! Seeded Gaussian random number generators.
//!
//! Two back-ends are available behind the [`GaussianRng`] trait:
//!
//! * [`InverseCumulativeNormalRng`]: Mersenne Twister MT19937-64 (`rand_mt`)
//!   pushed through the inverse normal CDF. This is the default.
//! * [`StandardNormalRng`]: `rand`'s `StdRng` sampled with
//!   `rand_distr::StandardNormal`.
//!
//! Both are fully determined by their `u64` seed.

use ov_core::Real;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use rand_mt::Mt19937GenRand64;

/// A source of independent standard-normal deviates.
pub trait GaussianRng: Send {
    /// Draw the next standard-normal deviate.
    fn next_gaussian(&mut self) -> Real;

    /// Fill `out` with standard-normal deviates, in order.
    fn fill(&mut self, out: &mut [Real]) {
        for z in out.iter_mut() {
            *z = self.next_gaussian();
        }
    }
}

/// Which generator back-end to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RngKind {
    /// MT19937-64 with inverse-CDF normals.
    #[default]
    MersenneTwister,
    /// ChaCha-based `StdRng` with `rand_distr::StandardNormal`.
    StdRng,
}

impl RngKind {
    /// Build a fresh generator of this kind from `seed`.
    pub fn make(self, seed: u64) -> Box<dyn GaussianRng> {
        match self {
            RngKind::MersenneTwister => Box::new(InverseCumulativeNormalRng::new(seed)),
            RngKind::StdRng => Box::new(StandardNormalRng::new(seed)),
        }
    }
}

/// A uniform pseudo-random number generator based on the Mersenne Twister
/// MT19937-64 algorithm.
pub struct MersenneTwisterUniformRng {
    rng: Mt19937GenRand64,
}

impl MersenneTwisterUniformRng {
    /// Create a new generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Mt19937GenRand64::new(seed),
        }
    }

    /// Generate the next uniform deviate in `[0, 1)`.
    pub fn next_real(&mut self) -> Real {
        // 53 random mantissa bits
        (self.rng.next_u64() >> 11) as Real * (1.0 / (1u64 << 53) as Real)
    }
}

/// Inverse-cumulative normal generator over a Mersenne Twister.
pub struct InverseCumulativeNormalRng {
    inner: MersenneTwisterUniformRng,
}

impl InverseCumulativeNormalRng {
    /// Create a new generator backed by a Mersenne Twister with the given
    /// seed.
    pub fn new(seed: u64) -> Self {
        Self {
            inner: MersenneTwisterUniformRng::new(seed),
        }
    }
}

impl GaussianRng for InverseCumulativeNormalRng {
    fn next_gaussian(&mut self) -> Real {
        // Avoid exact 0 which would produce −∞
        let u = loop {
            let u = self.inner.next_real();
            if u > 0.0 {
                break u;
            }
        };
        crate::distributions::normal_cdf_inverse(u)
    }
}

/// Standard-normal generator over `rand`'s seeded `StdRng`.
pub struct StandardNormalRng {
    rng: StdRng,
}

impl StandardNormalRng {
    /// Create a new generator with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl GaussianRng for StandardNormalRng {
    fn next_gaussian(&mut self) -> Real {
        self.rng.sample(StandardNormal)
    }
}
