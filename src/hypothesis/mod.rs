//! Circular hypothesis tests.
//!
//! The two tests are collaborators behind trait seams:
//! - [`UniformityTest`]: H0 "angles are uniform on the circle"
//! - [`MeanDirectionTest`]: H0 "uniform", against clustering at a known angle
//!
//! [`CircularTestRunner`] wraps one of each, validates inputs and checks
//! that what comes back is a probability. The defaults are
//! [`RayleighTest`] and [`VTest`]; any other implementation (a different
//! library, a permutation test, a stub in a unit test) can be injected.
//!
//! # Example
//!
//! ```rust
//! use circdemo::hypothesis::CircularTestRunner;
//! use circdemo::sampling::sample_concentrated;
//! use std::f64::consts::PI;
//!
//! let sample = sample_concentrated(PI, 2.0, 58, Some(7)).unwrap();
//! let result = CircularTestRunner::standard().run(&sample, PI).unwrap();
//! assert!(result.p_rayleigh < 0.01);
//! assert!(result.p_vtest < 0.01);
//! ```

mod rayleigh;
mod vtest;

pub use rayleigh::{rayleigh_test, RayleighTest};
pub use vtest::{v_test, VTest};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{DemoError, DemoResult};
use crate::sampling::AngleSample;

/// A test whose null hypothesis is uniformity on the circle.
pub trait UniformityTest {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str {
        "uniformity"
    }

    /// p-value for `sample`.
    ///
    /// # Errors
    ///
    /// Implementations return `InvalidArgument` for input they cannot test.
    fn p_value(&self, sample: &AngleSample) -> DemoResult<f64>;
}

/// A test of uniformity against clustering around a known mean direction.
pub trait MeanDirectionTest {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str {
        "mean-direction"
    }

    /// p-value for `sample` against `known_mean_angle`.
    ///
    /// # Errors
    ///
    /// Implementations return `InvalidArgument` for input they cannot test.
    fn p_value(&self, sample: &AngleSample, known_mean_angle: f64) -> DemoResult<f64>;
}

/// The pair of p-values computed for one sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TestResult {
    /// Uniformity test p-value.
    pub p_rayleigh: f64,
    /// Mean-direction test p-value.
    pub p_vtest: f64,
}

impl TestResult {
    /// Whether the uniformity null is rejected at level `alpha`.
    #[must_use]
    pub fn rejects_uniformity(&self, alpha: f64) -> bool {
        self.p_rayleigh < alpha
    }

    /// Whether the mean-direction null is rejected at level `alpha`.
    #[must_use]
    pub fn rejects_mean_direction(&self, alpha: f64) -> bool {
        self.p_vtest < alpha
    }
}

/// Runs a uniformity test and a mean-direction test on angle samples.
#[derive(Debug, Clone)]
pub struct CircularTestRunner<U = RayleighTest, M = VTest> {
    uniformity: U,
    mean_direction: M,
}

impl CircularTestRunner {
    /// Runner over the Rayleigh test and the V-test.
    #[must_use]
    pub fn standard() -> Self {
        Self::new(RayleighTest, VTest)
    }
}

impl Default for CircularTestRunner {
    fn default() -> Self {
        Self::standard()
    }
}

impl<U: UniformityTest, M: MeanDirectionTest> CircularTestRunner<U, M> {
    /// Create a runner over the given collaborators.
    pub fn new(uniformity: U, mean_direction: M) -> Self {
        Self {
            uniformity,
            mean_direction,
        }
    }

    /// p-value of the uniformity test.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the sample is empty or the collaborator
    /// returns something that is not a probability.
    pub fn run_uniformity_test(&self, sample: &AngleSample) -> DemoResult<f64> {
        check_angles(sample.angles())?;
        let p = self.uniformity.p_value(sample)?;
        let p = checked_probability(self.uniformity.name(), p)?;
        debug!(test = self.uniformity.name(), n = sample.len(), p, "ran uniformity test");
        Ok(p)
    }

    /// p-value of the mean-direction test against `known_mean_angle`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the sample is empty, the angle is not
    /// finite, or the collaborator returns something that is not a
    /// probability.
    pub fn run_mean_direction_test(
        &self,
        sample: &AngleSample,
        known_mean_angle: f64,
    ) -> DemoResult<f64> {
        check_angles(sample.angles())?;
        if !known_mean_angle.is_finite() {
            return Err(DemoError::invalid_argument(
                "known_mean_angle",
                format!("must be finite, got {known_mean_angle}"),
            ));
        }
        let p = self.mean_direction.p_value(sample, known_mean_angle)?;
        let p = checked_probability(self.mean_direction.name(), p)?;
        debug!(
            test = self.mean_direction.name(),
            n = sample.len(),
            known_mean_angle,
            p,
            "ran mean-direction test"
        );
        Ok(p)
    }

    /// Run both tests.
    ///
    /// # Errors
    ///
    /// See [`Self::run_uniformity_test`] and [`Self::run_mean_direction_test`].
    pub fn run(&self, sample: &AngleSample, known_mean_angle: f64) -> DemoResult<TestResult> {
        Ok(TestResult {
            p_rayleigh: self.run_uniformity_test(sample)?,
            p_vtest: self.run_mean_direction_test(sample, known_mean_angle)?,
        })
    }
}

fn check_angles(angles: &[f64]) -> DemoResult<()> {
    if angles.is_empty() {
        return Err(DemoError::invalid_argument(
            "sample",
            "must contain at least one angle",
        ));
    }
    Ok(())
}

/// Clamp a computed p-value into `[0, 1]`.
///
/// The series corrections of both tests can overshoot by a small amount.
fn clamp_probability(test: &str, p: f64) -> f64 {
    if (0.0..=1.0).contains(&p) {
        return p;
    }
    let clamped = p.clamp(0.0, 1.0);
    if (p - clamped).abs() > 1e-6 {
        warn!(test, p, clamped, "p-value outside [0, 1] clamped");
    }
    clamped
}

/// Reject NaN from a collaborator and clamp the rest.
fn checked_probability(test: &str, p: f64) -> DemoResult<f64> {
    if p.is_nan() {
        return Err(DemoError::invalid_argument(
            "p_value",
            format!("{test} returned NaN"),
        ));
    }
    Ok(clamp_probability(test, p))
}
