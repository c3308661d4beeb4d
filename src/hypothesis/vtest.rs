//! V-test (modified Rayleigh test) against a known mean direction.
//!
//! H0: the angles are uniformly distributed on the circle.
//! H1: they cluster around the known angle `μ`.
//!
//! With `R̄₀ = mean(cos(θ - μ))` and `z = √(2n) R̄₀`, the p-value is the
//! normal upper tail of `z` plus a second-order series correction.

use crate::error::{DemoError, DemoResult};
use crate::sampling::AngleSample;
use crate::stats::{normal_pdf, normal_sf, validate_weights};

use super::MeanDirectionTest;

/// The V-test for a known mean direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VTest;

impl MeanDirectionTest for VTest {
    fn name(&self) -> &'static str {
        "vtest"
    }

    fn p_value(&self, sample: &AngleSample, known_mean_angle: f64) -> DemoResult<f64> {
        v_test(sample.angles(), known_mean_angle, None)
    }
}

/// V-test p-value for `angles` against `mu`, optionally weighted.
///
/// The result is clamped to `[0, 1]`.
///
/// # Errors
///
/// Returns `InvalidArgument` if `angles` is empty, `mu` is not finite, or
/// the weights are malformed.
pub fn v_test(angles: &[f64], mu: f64, weights: Option<&[f64]>) -> DemoResult<f64> {
    super::check_angles(angles)?;
    if !mu.is_finite() {
        return Err(DemoError::invalid_argument(
            "known_mean_angle",
            format!("must be finite, got {mu}"),
        ));
    }

    let n = angles.len() as f64;
    let r0_bar = match weights {
        Some(w) => {
            validate_weights(w, angles.len())?;
            let total: f64 = w.iter().sum();
            angles
                .iter()
                .zip(w)
                .map(|(a, wi)| wi * (a - mu).cos())
                .sum::<f64>()
                / total
        }
        None => angles.iter().map(|a| (a - mu).cos()).sum::<f64>() / n,
    };

    let z = (2.0 * n).sqrt() * r0_bar;
    let series = (3.0 * z - z.powi(3)) / (16.0 * n)
        + (15.0 * z + 305.0 * z.powi(3) - 125.0 * z.powi(5) + 9.0 * z.powi(7)) / (4608.0 * n * n);
    let p = normal_sf(z) + normal_pdf(z) * series;

    Ok(super::clamp_probability("vtest", p))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI};

    #[test]
    fn test_orthogonal_data_gives_half() {
        // Projection onto mu is zero, so z = 0 and p = 1 - Φ(0) = 0.5.
        let p = v_test(&[0.0, PI], FRAC_PI_2, None).unwrap();
        assert!((p - 0.5).abs() < 1e-6, "p = {p}");

        let p = v_test(&[0.0, PI], 0.0, None).unwrap();
        assert!((p - 0.5).abs() < 1e-6, "p = {p}");
    }

    #[test]
    fn test_clustered_at_mu_rejects() {
        let angles = vec![PI; 30];
        let p = v_test(&angles, PI, None).unwrap();
        assert!(p < 1e-6, "p = {p}");
    }

    #[test]
    fn test_clustered_opposite_mu_does_not_reject() {
        let angles = vec![0.0; 30];
        let p = v_test(&angles, PI, None).unwrap();
        assert!(p > 0.99, "p = {p}");
    }

    #[test]
    fn test_p_in_unit_interval_for_small_samples() {
        for n in 1..10 {
            for mu in [0.0, 0.5, PI, 4.0] {
                let angles = vec![0.3; n];
                let p = v_test(&angles, mu, None).unwrap();
                assert!((0.0..=1.0).contains(&p), "n={n} mu={mu}: p = {p}");
            }
        }
    }

    #[test]
    fn test_weighted_matches_unweighted_for_unit_weights() {
        let angles = [0.1, 0.7, 2.0, 3.5, 5.9];
        let a = v_test(&angles, 0.4, None).unwrap();
        let b = v_test(&angles, 0.4, Some(&[1.0; 5])).unwrap();
        assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn test_nonfinite_mu_is_invalid() {
        let err = v_test(&[0.0], f64::INFINITY, None).err();
        assert!(err.is_some_and(|e| e.is_invalid_argument()));
    }

    #[test]
    fn test_empty_is_invalid() {
        let err = v_test(&[], 0.0, None).err();
        assert!(err.is_some_and(|e| e.is_invalid_argument()));
    }
}
