//! Rayleigh test of uniformity.
//!
//! H0: the angles are uniformly distributed on the circle.
//! H1: they are unimodal around some (unknown) mean direction.
//!
//! With `z = n R̄²` the p-value is `exp(-z)`, refined by the Greenwood &
//! Durand series correction for samples smaller than 50.

use crate::error::DemoResult;
use crate::sampling::AngleSample;
use crate::stats::Resultant;

use super::UniformityTest;

/// Sample size from which the small-sample correction is dropped.
const SMALL_SAMPLE_LIMIT: usize = 50;

/// The Rayleigh uniformity test.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RayleighTest;

impl UniformityTest for RayleighTest {
    fn name(&self) -> &'static str {
        "rayleigh"
    }

    fn p_value(&self, sample: &AngleSample) -> DemoResult<f64> {
        rayleigh_test(sample.angles(), None)
    }
}

/// Rayleigh p-value for `angles`, optionally weighted.
///
/// The result is clamped to `[0, 1]`.
///
/// # Errors
///
/// Returns `InvalidArgument` if `angles` is empty or the weights are
/// malformed.
pub fn rayleigh_test(angles: &[f64], weights: Option<&[f64]>) -> DemoResult<f64> {
    super::check_angles(angles)?;
    let n = angles.len() as f64;
    let r_bar = Resultant::new(angles, weights)?.mean_length();
    let z = n * r_bar * r_bar;

    let correction = if angles.len() < SMALL_SAMPLE_LIMIT {
        1.0 + (2.0 * z - z * z) / (4.0 * n)
            - (24.0 * z - 132.0 * z.powi(2) + 76.0 * z.powi(3) - 9.0 * z.powi(4))
                / (288.0 * n * n)
    } else {
        1.0
    };

    Ok(super::clamp_probability("rayleigh", (-z).exp() * correction))
}
