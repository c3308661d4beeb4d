//! Configuration with YAML loading and validation.
//!
//! Every field has a default, so an empty document (or no file at all)
//! reproduces the stock demonstration: seed 42, 1000 uniform angles, then
//! 58 von Mises angles around π with concentration 2.

use std::f64::consts::PI;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{DemoError, DemoResult};
use crate::scenarios::Scenario;
use crate::visualization::{PlotFormat, DEFAULT_RESOLUTION};

/// Top-level demo configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct DemoConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Reproducibility settings.
    #[serde(default)]
    pub reproducibility: ReproducibilityConfig,

    /// Uniform-data scenario.
    #[validate(nested)]
    #[serde(default)]
    pub uniform: UniformConfig,

    /// Concentrated-data scenario.
    #[validate(nested)]
    #[serde(default)]
    pub concentrated: ConcentratedConfig,

    /// Plot output.
    #[validate(nested)]
    #[serde(default)]
    pub plot: PlotConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            reproducibility: ReproducibilityConfig::default(),
            uniform: UniformConfig::default(),
            concentrated: ConcentratedConfig::default(),
            plot: PlotConfig::default(),
        }
    }
}

impl DemoConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - File cannot be read
    /// - YAML parsing fails
    /// - Validation fails
    pub fn load<P: AsRef<Path>>(path: P) -> DemoResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> DemoResult<Self> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml::from_str(yaml)?
        };

        config.validate()?;
        config.validate_semantic()?;

        Ok(config)
    }

    /// Create a builder for configuration.
    #[must_use]
    pub fn builder() -> DemoConfigBuilder {
        DemoConfigBuilder::default()
    }

    /// Validate constraints the derive cannot express.
    fn validate_semantic(&self) -> DemoResult<()> {
        if !self.uniform.known_mean_angle.is_finite() {
            return Err(DemoError::config("uniform.known_mean_angle must be finite"));
        }
        if !self.concentrated.mean_angle.is_finite() {
            return Err(DemoError::config("concentrated.mean_angle must be finite"));
        }
        let kappa = self.concentrated.concentration;
        if !(kappa.is_finite() && kappa > 0.0) {
            return Err(DemoError::config(format!(
                "concentrated.concentration must be positive, got {kappa}"
            )));
        }
        Ok(())
    }

    /// The scenarios to run, in order.
    #[must_use]
    pub fn scenarios(&self) -> Vec<Scenario> {
        vec![
            Scenario::Uniform {
                samples: self.uniform.samples,
                known_mean_angle: self.uniform.known_mean_angle,
            },
            Scenario::Concentrated {
                samples: self.concentrated.samples,
                mean_angle: self.concentrated.mean_angle,
                concentration: self.concentrated.concentration,
            },
        ]
    }
}

/// Configuration builder for programmatic construction.
#[derive(Debug, Default)]
pub struct DemoConfigBuilder {
    seed: Option<Option<u64>>,
    plot_resolution: Option<usize>,
    plots_enabled: Option<bool>,
    output_dir: Option<PathBuf>,
    plot_format: Option<PlotFormat>,
}

impl DemoConfigBuilder {
    /// Set the random seed.
    #[must_use]
    pub const fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(Some(seed));
        self
    }

    /// Seed from OS entropy (non-reproducible).
    #[must_use]
    pub const fn entropy_seed(mut self) -> Self {
        self.seed = Some(None);
        self
    }

    /// Set the reference-circle resolution.
    #[must_use]
    pub const fn plot_resolution(mut self, resolution: usize) -> Self {
        self.plot_resolution = Some(resolution);
        self
    }

    /// Turn plot output on or off.
    #[must_use]
    pub const fn plots_enabled(mut self, enabled: bool) -> Self {
        self.plots_enabled = Some(enabled);
        self
    }

    /// Set the plot output directory.
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Set the plot file format.
    #[must_use]
    pub const fn plot_format(mut self, format: PlotFormat) -> Self {
        self.plot_format = Some(format);
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> DemoConfig {
        let mut config = DemoConfig::default();

        if let Some(seed) = self.seed {
            config.reproducibility.seed = seed;
        }
        if let Some(resolution) = self.plot_resolution {
            config.plot.resolution = resolution;
        }
        if let Some(enabled) = self.plots_enabled {
            config.plot.enabled = enabled;
        }
        if let Some(dir) = self.output_dir {
            config.plot.output_dir = dir;
        }
        if let Some(format) = self.plot_format {
            config.plot.format = format;
        }

        config
    }
}

/// Reproducibility settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReproducibilityConfig {
    /// Seed for the single stream both scenarios draw from, in order.
    /// `null` draws a seed from OS entropy.
    pub seed: Option<u64>,
}

impl Default for ReproducibilityConfig {
    fn default() -> Self {
        Self { seed: Some(42) }
    }
}

/// Uniform-data scenario.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct UniformConfig {
    /// Number of angles.
    #[validate(range(min = 1))]
    #[serde(default = "default_uniform_samples")]
    pub samples: usize,
    /// Angle the V-test is run against.
    #[serde(default = "default_angle")]
    pub known_mean_angle: f64,
}

const fn default_uniform_samples() -> usize {
    1000
}

const fn default_angle() -> f64 {
    PI
}

impl Default for UniformConfig {
    fn default() -> Self {
        Self {
            samples: default_uniform_samples(),
            known_mean_angle: default_angle(),
        }
    }
}

/// Concentrated-data scenario. The V-test runs against `mean_angle`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ConcentratedConfig {
    /// Number of angles.
    #[validate(range(min = 1))]
    #[serde(default = "default_concentrated_samples")]
    pub samples: usize,
    /// Mean direction of the von Mises model.
    #[serde(default = "default_angle")]
    pub mean_angle: f64,
    /// Von Mises concentration (kappa).
    #[serde(default = "default_concentration")]
    pub concentration: f64,
}

const fn default_concentrated_samples() -> usize {
    58
}

const fn default_concentration() -> f64 {
    2.0
}

impl Default for ConcentratedConfig {
    fn default() -> Self {
        Self {
            samples: default_concentrated_samples(),
            mean_angle: default_angle(),
            concentration: default_concentration(),
        }
    }
}

/// Plot output settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct PlotConfig {
    /// Whether plots are written.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Reference-circle resolution.
    #[validate(range(min = 1))]
    #[serde(default = "default_resolution")]
    pub resolution: usize,
    /// Directory plot files are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// File format.
    #[serde(default)]
    pub format: PlotFormat,
    /// SVG edge length in pixels.
    #[validate(range(min = 100, max = 10_000))]
    #[serde(default = "default_size_px")]
    pub size_px: u32,
}

const fn default_true() -> bool {
    true
}

const fn default_resolution() -> usize {
    DEFAULT_RESOLUTION
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("plots")
}

const fn default_size_px() -> u32 {
    800
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            resolution: default_resolution(),
            output_dir: default_output_dir(),
            format: PlotFormat::default(),
            size_px: default_size_px(),
        }
    }
}
