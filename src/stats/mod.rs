//! Descriptive circular statistics.
//!
//! The quantities here (resultant vector, mean direction, circular
//! variance) are the building blocks of the Rayleigh test and the V-test,
//! and are reported alongside their p-values.

use serde::{Deserialize, Serialize};

use crate::error::{DemoError, DemoResult};
use crate::sampling::AngleSample;

/// 1 / sqrt(2 * pi)
const INV_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

/// Summary of an angle sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CircularSummary {
    /// Number of angles.
    pub n: usize,
    /// Circular mean direction in `(-π, π]`.
    pub mean_direction: f64,
    /// Mean resultant length in `[0, 1]`.
    pub mean_resultant_length: f64,
    /// Circular variance, `1 - R̄`.
    pub circular_variance: f64,
}

impl CircularSummary {
    /// Summarize a sample.
    #[must_use]
    pub fn of(sample: &AngleSample) -> Self {
        let r = Resultant::unweighted(sample.angles());
        Self {
            n: sample.len(),
            mean_direction: r.direction(),
            mean_resultant_length: r.mean_length(),
            circular_variance: 1.0 - r.mean_length(),
        }
    }
}

/// Weighted sum of unit vectors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resultant {
    /// Sum of `w * cos(θ)`.
    pub cos_sum: f64,
    /// Sum of `w * sin(θ)`.
    pub sin_sum: f64,
    /// Sum of weights.
    pub total_weight: f64,
}

impl Resultant {
    /// Resultant with unit weights.
    #[must_use]
    pub fn unweighted(angles: &[f64]) -> Self {
        let (cos_sum, sin_sum) = angles
            .iter()
            .fold((0.0, 0.0), |(c, s), a| (c + a.cos(), s + a.sin()));
        Self {
            cos_sum,
            sin_sum,
            total_weight: angles.len() as f64,
        }
    }

    /// Resultant with per-angle weights.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the weights do not pass
    /// [`validate_weights`].
    pub fn weighted(angles: &[f64], weights: &[f64]) -> DemoResult<Self> {
        validate_weights(weights, angles.len())?;
        let (cos_sum, sin_sum) = angles
            .iter()
            .zip(weights)
            .fold((0.0, 0.0), |(c, s), (a, w)| (c + w * a.cos(), s + w * a.sin()));
        Ok(Self {
            cos_sum,
            sin_sum,
            total_weight: weights.iter().sum(),
        })
    }

    /// Build from optional weights.
    ///
    /// # Errors
    ///
    /// Same as [`Resultant::weighted`].
    pub fn new(angles: &[f64], weights: Option<&[f64]>) -> DemoResult<Self> {
        weights.map_or_else(
            || Ok(Self::unweighted(angles)),
            |w| Self::weighted(angles, w),
        )
    }

    /// Mean resultant length `R̄`.
    #[must_use]
    pub fn mean_length(&self) -> f64 {
        if self.total_weight <= 0.0 {
            return 0.0;
        }
        (self.cos_sum.hypot(self.sin_sum) / self.total_weight).min(1.0)
    }

    /// Direction of the resultant vector.
    #[must_use]
    pub fn direction(&self) -> f64 {
        self.sin_sum.atan2(self.cos_sum)
    }
}

/// Check that weights fit a sample of `n` angles.
///
/// # Errors
///
/// Returns `InvalidArgument` unless there are exactly `n` finite,
/// non-negative weights with a positive sum.
pub fn validate_weights(weights: &[f64], n: usize) -> DemoResult<()> {
    if weights.len() != n {
        return Err(DemoError::invalid_argument(
            "weights",
            format!("expected {n} weights, got {}", weights.len()),
        ));
    }
    if weights.iter().any(|w| !w.is_finite() || *w < 0.0) {
        return Err(DemoError::invalid_argument(
            "weights",
            "every weight must be finite and non-negative",
        ));
    }
    if weights.iter().sum::<f64>() <= 0.0 {
        return Err(DemoError::invalid_argument(
            "weights",
            "weights must have a positive sum",
        ));
    }
    Ok(())
}

/// Mean resultant length `R̄` of a sample.
#[must_use]
pub fn mean_resultant_length(sample: &AngleSample) -> f64 {
    Resultant::unweighted(sample.angles()).mean_length()
}

/// Circular mean direction of a sample, in `(-π, π]`.
#[must_use]
pub fn circular_mean(sample: &AngleSample) -> f64 {
    Resultant::unweighted(sample.angles()).direction()
}

/// Circular variance `1 - R̄` of a sample.
#[must_use]
pub fn circular_variance(sample: &AngleSample) -> f64 {
    1.0 - mean_resultant_length(sample)
}

/// Standard normal PDF.
#[must_use]
pub fn normal_pdf(z: f64) -> f64 {
    INV_SQRT_2PI * (-0.5 * z * z).exp()
}

/// Complementary error function.
///
/// Abramowitz and Stegun 7.1.26; absolute error below 1.5e-7.
#[must_use]
pub fn erfc(x: f64) -> f64 {
    const A1: f64 = 0.254_829_592;
    const A2: f64 = -0.284_496_736;
    const A3: f64 = 1.421_413_741;
    const A4: f64 = -1.453_152_027;
    const A5: f64 = 1.061_405_429;
    const P: f64 = 0.327_591_1;

    let x_abs = x.abs();
    let t = 1.0 / (1.0 + P * x_abs);
    let tail = ((((A5 * t + A4) * t + A3) * t + A2) * t + A1) * t * (-x_abs * x_abs).exp();

    if x < 0.0 {
        2.0 - tail
    } else {
        tail
    }
}

/// Standard normal survival function `1 - Φ(z)`.
///
/// Computed directly from the tail so that small upper-tail probabilities
/// do not cancel to zero.
#[must_use]
pub fn normal_sf(z: f64) -> f64 {
    0.5 * erfc(z / std::f64::consts::SQRT_2)
}

/// Standard normal CDF `Φ(z)`.
#[must_use]
pub fn normal_cdf(z: f64) -> f64 {
    1.0 - normal_sf(z)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    fn sample(angles: &[f64]) -> AngleSample {
        AngleSample::new(angles.to_vec()).unwrap()
    }

    #[test]
    fn test_identical_angles_have_unit_resultant() {
        let s = sample(&[0.7; 20]);
        assert!((mean_resultant_length(&s) - 1.0).abs() < 1e-12);
        assert!((circular_mean(&s) - 0.7).abs() < 1e-12);
        assert!(circular_variance(&s).abs() < 1e-12);
    }

    #[test]
    fn test_balanced_angles_have_zero_resultant() {
        let s = sample(&[0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2]);
        assert!(mean_resultant_length(&s) < 1e-12);
        assert!((circular_variance(&s) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_circular_mean_wraps_across_zero() {
        // Arithmetic mean would be pi; circular mean is 0.
        let s = sample(&[0.1, 2.0 * PI - 0.1]);
        assert!(circular_mean(&s).abs() < 1e-12);
    }

    #[test]
    fn test_summary() {
        let s = sample(&[PI, PI, PI]);
        let summary = CircularSummary::of(&s);
        assert_eq!(summary.n, 3);
        assert!((summary.mean_direction.abs() - PI).abs() < 1e-12);
        assert!((summary.mean_resultant_length - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_weighted_resultant() {
        // Zero weight on the opposing angle leaves a unit resultant.
        let r = Resultant::weighted(&[0.0, PI], &[1.0, 0.0]).unwrap();
        assert!((r.mean_length() - 1.0).abs() < 1e-12);
        assert!(r.direction().abs() < 1e-12);

        let r = Resultant::weighted(&[0.0, PI], &[3.0, 1.0]).unwrap();
        assert!((r.mean_length() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_validate_weights() {
        assert!(validate_weights(&[1.0, 2.0], 2).is_ok());
        assert!(validate_weights(&[1.0], 2).is_err());
        assert!(validate_weights(&[1.0, -1.0], 2).is_err());
        assert!(validate_weights(&[0.0, 0.0], 2).is_err());
        assert!(validate_weights(&[1.0, f64::NAN], 2).is_err());
    }

    #[test]
    fn test_normal_known_values() {
        assert!((normal_cdf(0.0) - 0.5).abs() < 1e-6);
        assert!((normal_cdf(1.96) - 0.975).abs() < 1e-4);
        assert!((normal_cdf(-1.96) - 0.025).abs() < 1e-4);
        assert!((normal_pdf(0.0) - INV_SQRT_2PI).abs() < 1e-15);
    }

    #[test]
    fn test_normal_sf_tail_is_positive() {
        let p = normal_sf(7.5);
        assert!(p > 0.0 && p < 1e-12, "upper tail {p}");
    }

    #[test]
    fn test_erfc_symmetry() {
        for x in [0.1, 0.5, 1.0, 2.5] {
            assert!((erfc(x) + erfc(-x) - 2.0).abs() < 1e-12);
        }
    }
}
