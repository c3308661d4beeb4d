//! Deterministic random number generation for angular data.
//!
//! Wraps PCG-64 with a recorded master seed and partitioned streams.
//!
//! # Reproducibility Guarantee
//!
//! Given the same master seed, every angle sequence is bitwise-identical
//! across runs and platforms. Partitioned streams are reproducible
//! regardless of the order in which they are consumed.

use std::f64::consts::{PI, TAU};

use rand::prelude::*;
use rand_pcg::Pcg64;
use serde::{Deserialize, Serialize};

/// Golden-ratio increment used to spread partition seeds.
const STREAM_STRIDE: u64 = 0x9E37_79B9_7F4A_7C15;

/// Below this concentration the von Mises distribution is uniform to
/// double precision.
const KAPPA_UNIFORM: f64 = 1e-8;

/// Below this concentration the envelope parameter uses its series form.
const KAPPA_SMALL: f64 = 1e-5;

/// Above this concentration draws come from a wrapped normal with
/// variance `1 / kappa`.
const KAPPA_LARGE: f64 = 1e6;

/// Deterministic, reproducible random source for circular sampling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircRng {
    /// Master seed for reproducibility.
    master_seed: u64,
    /// Current stream index for partitioning.
    stream: u64,
    /// Internal PCG state.
    rng: Pcg64,
}

impl CircRng {
    /// Create a new RNG with the given master seed.
    #[must_use]
    pub fn new(master_seed: u64) -> Self {
        Self {
            master_seed,
            stream: 0,
            rng: Pcg64::seed_from_u64(master_seed),
        }
    }

    /// Create an RNG seeded from OS entropy.
    ///
    /// The drawn seed is still recorded, so a surprising run can be
    /// reproduced by reading [`CircRng::master_seed`].
    #[must_use]
    pub fn from_entropy() -> Self {
        Self::new(rand::random())
    }

    /// Create from an optional seed: seeded when `Some`, entropy otherwise.
    #[must_use]
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::new)
    }

    /// Get the master seed.
    #[must_use]
    pub const fn master_seed(&self) -> u64 {
        self.master_seed
    }

    /// Get current stream index.
    #[must_use]
    pub const fn stream(&self) -> u64 {
        self.stream
    }

    /// Create partitioned RNGs for independent use.
    ///
    /// Each partition gets its own stream derived from the master seed.
    ///
    /// # Example
    ///
    /// ```rust
    /// use circdemo::sampling::CircRng;
    ///
    /// let mut rng = CircRng::new(42);
    /// let partitions = rng.partition(4);
    /// assert_eq!(partitions.len(), 4);
    /// ```
    #[must_use]
    pub fn partition(&mut self, n: usize) -> Vec<Self> {
        let partitions: Vec<Self> = (0..n)
            .map(|i| {
                let stream = self.stream + i as u64 + 1;
                let seed = self
                    .master_seed
                    .wrapping_add(stream.wrapping_mul(STREAM_STRIDE));
                Self {
                    master_seed: self.master_seed,
                    stream,
                    rng: Pcg64::seed_from_u64(seed),
                }
            })
            .collect();

        self.stream += n as u64;
        partitions
    }

    /// Generate a random f64 in [0, 1).
    pub fn gen_f64(&mut self) -> f64 {
        self.rng.gen()
    }

    /// Generate a standard normal sample using the Box-Muller transform.
    pub fn gen_standard_normal(&mut self) -> f64 {
        let u1 = self.gen_f64();
        let u2 = self.gen_f64();

        // Avoid log(0)
        let u1 = if u1 < f64::EPSILON { f64::EPSILON } else { u1 };

        (-2.0 * u1.ln()).sqrt() * (TAU * u2).cos()
    }

    /// Generate an angle uniformly distributed on `[0, 2π)`.
    pub fn gen_uniform_angle(&mut self) -> f64 {
        TAU * self.gen_f64()
    }

    /// Generate a von Mises variate with mean `mu` and concentration `kappa`.
    ///
    /// Uses the Best–Fisher (1979) wrapped-Cauchy envelope with rejection,
    /// and a wrapped normal above `kappa = 1e6`. The result is wrapped to
    /// `[-π, π)`. Callers must pass a finite `kappa >= 0`.
    pub fn gen_von_mises(&mut self, mu: f64, kappa: f64) -> f64 {
        if kappa < KAPPA_UNIFORM {
            return wrap_to_pi(mu + PI * (2.0 * self.gen_f64() - 1.0));
        }
        if kappa > KAPPA_LARGE {
            return wrap_to_pi(mu + self.gen_standard_normal() / kappa.sqrt());
        }

        let s = if kappa < KAPPA_SMALL {
            1.0 / kappa + kappa
        } else {
            let r = 1.0 + (1.0 + 4.0 * kappa * kappa).sqrt();
            let rho = (r - (2.0 * r).sqrt()) / (2.0 * kappa);
            (1.0 + rho * rho) / (2.0 * rho)
        };

        let w = loop {
            let z = (PI * self.gen_f64()).cos();
            let w = (1.0 + s * z) / (s + z);
            let y = kappa * (s - w);
            let v = self.gen_f64();

            if y * (2.0 - y) - v >= 0.0 || (y / v).ln() + 1.0 - y >= 0.0 {
                break w;
            }
        };

        let mut theta = w.clamp(-1.0, 1.0).acos();
        if self.gen_f64() < 0.5 {
            theta = -theta;
        }

        wrap_to_pi(theta + mu)
    }
}

/// Wrap an angle to `[-π, π)`.
#[must_use]
pub fn wrap_to_pi(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid can round up to TAU for tiny negative inputs
    if wrapped >= PI {
        -PI
    } else {
        wrapped
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    /// Property: Same seed produces same sequence.
    #[test]
    fn test_reproducibility() {
        let mut rng1 = CircRng::new(42);
        let mut rng2 = CircRng::new(42);

        let seq1: Vec<f64> = (0..100).map(|_| rng1.gen_f64()).collect();
        let seq2: Vec<f64> = (0..100).map(|_| rng2.gen_f64()).collect();

        assert_eq!(seq1, seq2, "Same seed must produce identical sequences");
    }

    /// Property: Different seeds produce different sequences.
    #[test]
    fn test_different_seeds() {
        let mut rng1 = CircRng::new(42);
        let mut rng2 = CircRng::new(43);

        let seq1: Vec<f64> = (0..100).map(|_| rng1.gen_f64()).collect();
        let seq2: Vec<f64> = (0..100).map(|_| rng2.gen_f64()).collect();

        assert_ne!(
            seq1, seq2,
            "Different seeds must produce different sequences"
        );
    }

    #[test]
    fn test_entropy_seed_is_recorded() {
        let mut rng = CircRng::from_entropy();
        let mut replay = CircRng::new(rng.master_seed());
        assert_eq!(rng.gen_f64(), replay.gen_f64());
    }

    #[test]
    fn test_optional_seed() {
        let rng = CircRng::from_optional_seed(Some(7));
        assert_eq!(rng.master_seed(), 7);
    }

    /// Property: Partitions are independent.
    #[test]
    fn test_partition_independence() {
        let mut rng = CircRng::new(42);
        let mut partitions = rng.partition(4);

        let seqs: Vec<Vec<f64>> = partitions
            .iter_mut()
            .map(|p| (0..10).map(|_| p.gen_f64()).collect())
            .collect();

        for i in 0..seqs.len() {
            for j in (i + 1)..seqs.len() {
                assert_ne!(seqs[i], seqs[j], "Partitions must be independent");
            }
        }
    }

    #[test]
    fn test_partition_differs_from_parent() {
        let mut rng = CircRng::new(42);
        let mut parts = rng.partition(1);
        let mut fresh = CircRng::new(42);

        let parent: Vec<f64> = (0..10).map(|_| fresh.gen_f64()).collect();
        let child: Vec<f64> = (0..10).map(|_| parts[0].gen_f64()).collect();
        assert_ne!(parent, child);
    }

    #[test]
    fn test_partition_stream_increment() {
        let mut rng = CircRng::new(42);
        assert_eq!(rng.stream(), 0);

        let _ = rng.partition(4);
        assert_eq!(rng.stream(), 4);

        let _ = rng.partition(3);
        assert_eq!(rng.stream(), 7);
    }

    #[test]
    fn test_uniform_angle_bounds() {
        let mut rng = CircRng::new(42);
        for _ in 0..10_000 {
            let a = rng.gen_uniform_angle();
            assert!((0.0..TAU).contains(&a), "Angle out of range: {a}");
        }
    }

    #[test]
    fn test_von_mises_range() {
        let mut rng = CircRng::new(42);
        for kappa in [0.0, 1e-6, 0.5, 2.0, 50.0] {
            for _ in 0..2000 {
                let a = rng.gen_von_mises(PI, kappa);
                assert!((-PI..PI).contains(&a), "kappa={kappa}: angle {a} not wrapped");
            }
        }
    }

    /// Concentrated samples cluster around the requested mean.
    #[test]
    fn test_von_mises_mean_direction() {
        let mut rng = CircRng::new(7);
        let mu = 1.0;
        let n = 20_000;
        let (mut c, mut s) = (0.0, 0.0);
        for _ in 0..n {
            let a = rng.gen_von_mises(mu, 4.0);
            c += a.cos();
            s += a.sin();
        }
        let mean = s.atan2(c);
        assert!((mean - mu).abs() < 0.05, "Mean direction {mean} far from {mu}");
    }

    /// For kappa = 2 the expected resultant length is I1(2)/I0(2) ≈ 0.698.
    #[test]
    fn test_von_mises_resultant_length() {
        let mut rng = CircRng::new(11);
        let n = 50_000;
        let (mut c, mut s) = (0.0, 0.0);
        for _ in 0..n {
            let a = rng.gen_von_mises(0.0, 2.0);
            c += a.cos();
            s += a.sin();
        }
        let r = (c * c + s * s).sqrt() / f64::from(n);
        assert!((r - 0.698).abs() < 0.02, "Resultant length {r} not near 0.698");
    }

    #[test]
    fn test_standard_normal_moments() {
        let mut rng = CircRng::new(5);
        let n = 20_000;
        let draws: Vec<f64> = (0..n).map(|_| rng.gen_standard_normal()).collect();
        let mean = draws.iter().sum::<f64>() / f64::from(n);
        let var = draws.iter().map(|d| (d - mean).powi(2)).sum::<f64>() / f64::from(n);
        assert!(mean.abs() < 0.05, "mean {mean}");
        assert!((var - 1.0).abs() < 0.05, "variance {var}");
    }

    /// Extreme concentrations return promptly and collapse onto the mean.
    #[test]
    fn test_von_mises_extreme_concentration_terminates() {
        let (tx, rx) = std::sync::mpsc::channel();
        std::thread::spawn(move || {
            let mut rng = CircRng::new(42);
            let draws: Vec<(f64, f64)> = [1e7, 1e16, 1e100, 1e160, f64::MAX]
                .iter()
                .flat_map(|&kappa| (0..5).map(move |_| kappa))
                .map(|kappa| (kappa, rng.gen_von_mises(1.0, kappa)))
                .collect();
            let _ = tx.send(draws);
        });

        let draws = rx
            .recv_timeout(std::time::Duration::from_secs(5))
            .expect("von Mises draw did not return within 5 s");
        for (kappa, a) in draws {
            assert!((-PI..PI).contains(&a), "kappa={kappa}: angle {a} not wrapped");
            assert!((a - 1.0).abs() < 0.01, "kappa={kappa}: angle {a} far from mean");
        }
    }

    /// The wrapped-normal branch keeps the mean direction across the seam.
    #[test]
    fn test_von_mises_large_kappa_wraps_at_pi() {
        let mut rng = CircRng::new(9);
        for _ in 0..1000 {
            let a = rng.gen_von_mises(PI, 1e8);
            assert!((-PI..PI).contains(&a));
            assert!(PI - a.abs() < 0.01, "angle {a} not near the seam");
        }
    }

    #[test]
    fn test_wrap_to_pi() {
        assert!((wrap_to_pi(0.0)).abs() < 1e-12);
        assert!((wrap_to_pi(TAU + 0.5) - 0.5).abs() < 1e-12);
        assert!((wrap_to_pi(-TAU - 0.5) + 0.5).abs() < 1e-12);
        assert!((wrap_to_pi(PI) + PI).abs() < 1e-12);
    }

    #[test]
    fn test_rng_serde_roundtrip_continues_stream() {
        let mut rng = CircRng::new(42);
        let _ = rng.gen_f64();
        let json = serde_json::to_string(&rng).unwrap_or_default();
        let restored: Result<CircRng, _> = serde_json::from_str(&json);
        assert!(restored.is_ok());
        if let Ok(mut restored) = restored {
            assert_eq!(restored.gen_f64(), rng.gen_f64());
        }
    }
}
