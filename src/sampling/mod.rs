//! Angle sampling.
//!
//! Produces [`AngleSample`]s under two generative models:
//! - uniform on the circle
//! - von Mises, concentrated around a known mean direction
//!
//! Every sampler owns its own [`CircRng`], so independent samplers never
//! share state and can run on separate threads without coordination.

mod rng;

pub use rng::{wrap_to_pi, CircRng};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DemoError, DemoResult};

/// An ordered, immutable sequence of angles in radians.
///
/// Values are conceptually on the circle but are not required to be
/// normalized. Never empty; every value is finite.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<f64>", into = "Vec<f64>")]
pub struct AngleSample {
    angles: Vec<f64>,
}

impl AngleSample {
    /// Wrap a vector of angles.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `angles` is empty or contains a
    /// non-finite value.
    pub fn new(angles: Vec<f64>) -> DemoResult<Self> {
        if angles.is_empty() {
            return Err(DemoError::invalid_argument(
                "sample",
                "must contain at least one angle",
            ));
        }
        if let Some(i) = angles.iter().position(|a| !a.is_finite()) {
            return Err(DemoError::invalid_argument(
                "sample",
                format!("angle at index {i} is not finite"),
            ));
        }
        Ok(Self { angles })
    }

    /// Angles in draw order.
    #[must_use]
    pub fn angles(&self) -> &[f64] {
        &self.angles
    }

    /// Number of angles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.angles.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.angles.is_empty()
    }

    /// Iterate over the angles.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.angles.iter()
    }
}

impl TryFrom<Vec<f64>> for AngleSample {
    type Error = DemoError;

    fn try_from(angles: Vec<f64>) -> DemoResult<Self> {
        Self::new(angles)
    }
}

impl From<AngleSample> for Vec<f64> {
    fn from(sample: AngleSample) -> Self {
        sample.angles
    }
}

impl<'a> IntoIterator for &'a AngleSample {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.angles.iter()
    }
}

/// Draws angle samples from a single random stream.
#[derive(Debug, Clone)]
pub struct AngleSampler {
    rng: CircRng,
}

impl AngleSampler {
    /// Create a sampler. `Some(seed)` is reproducible, `None` is not.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            rng: CircRng::from_optional_seed(seed),
        }
    }

    /// Create a sampler over an existing stream (e.g. a partition).
    #[must_use]
    pub const fn from_rng(rng: CircRng) -> Self {
        Self { rng }
    }

    /// Seed that drives this sampler.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.rng.master_seed()
    }

    /// Draw `n` angles uniformly from `[0, 2π)`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `n == 0`.
    pub fn uniform(&mut self, n: usize) -> DemoResult<AngleSample> {
        check_count(n)?;
        let angles: Vec<f64> = (0..n).map(|_| self.rng.gen_uniform_angle()).collect();
        debug!(n, seed = self.rng.master_seed(), "drew uniform sample");
        AngleSample::new(angles)
    }

    /// Draw `n` von Mises angles around `mean_angle`.
    ///
    /// Higher `concentration` gives tighter clustering. Angles are wrapped
    /// to `[-π, π)`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `n == 0`, if `concentration` is not a
    /// positive finite number, or if `mean_angle` is not finite.
    pub fn concentrated(
        &mut self,
        mean_angle: f64,
        concentration: f64,
        n: usize,
    ) -> DemoResult<AngleSample> {
        check_count(n)?;
        if !mean_angle.is_finite() {
            return Err(DemoError::invalid_argument(
                "mean_angle",
                format!("must be finite, got {mean_angle}"),
            ));
        }
        if !(concentration.is_finite() && concentration > 0.0) {
            return Err(DemoError::invalid_argument(
                "concentration",
                format!("must be positive and finite, got {concentration}"),
            ));
        }

        let angles: Vec<f64> = (0..n)
            .map(|_| self.rng.gen_von_mises(mean_angle, concentration))
            .collect();
        debug!(
            n,
            mean_angle,
            concentration,
            seed = self.rng.master_seed(),
            "drew concentrated sample"
        );
        AngleSample::new(angles)
    }
}

fn check_count(n: usize) -> DemoResult<()> {
    if n == 0 {
        return Err(DemoError::invalid_argument("n", "must be at least 1"));
    }
    Ok(())
}

/// Draw `n` uniform angles on `[0, 2π)`.
///
/// The same `seed` always yields the same sample; `None` draws a fresh seed.
///
/// # Errors
///
/// Returns `InvalidArgument` if `n == 0`.
///
/// # Example
///
/// ```rust
/// use circdemo::sampling::sample_uniform;
///
/// let a = sample_uniform(100, Some(42)).unwrap();
/// let b = sample_uniform(100, Some(42)).unwrap();
/// assert_eq!(a, b);
/// ```
pub fn sample_uniform(n: usize, seed: Option<u64>) -> DemoResult<AngleSample> {
    AngleSampler::new(seed).uniform(n)
}

/// Draw `n` von Mises angles around `mean_angle` with the given concentration.
///
/// # Errors
///
/// Returns `InvalidArgument` if `n == 0`, if `concentration` is not a
/// positive finite number, or if `mean_angle` is not finite.
pub fn sample_concentrated(
    mean_angle: f64,
    concentration: f64,
    n: usize,
    seed: Option<u64>,
) -> DemoResult<AngleSample> {
    AngleSampler::new(seed).concentrated(mean_angle, concentration, n)
}
