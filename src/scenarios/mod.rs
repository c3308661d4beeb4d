//! The two scripted demonstrations.
//!
//! - Uniform: angles spread evenly over the circle; neither test should
//!   reject.
//! - Concentrated: von Mises angles clustered around a known direction;
//!   both tests should reject.
//!
//! [`DemoRunner`] executes a scenario end to end (draw, test, format, build
//! the figure) and returns a [`ScenarioOutcome`]. Scenarios run in order
//! against one sampler, so a seed fixes every sample of a run.

use std::f64::consts::PI;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{DemoConfig, PlotConfig};
use crate::error::DemoResult;
use crate::format::format_result;
use crate::hypothesis::{
    CircularTestRunner, MeanDirectionTest, RayleighTest, TestResult, UniformityTest, VTest,
};
use crate::sampling::{AngleSample, AngleSampler};
use crate::stats::CircularSummary;
use crate::visualization::{file_sink, Figure, PlotDataBuilder, PlotSink};

/// One scripted demonstration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Scenario {
    /// Uniform angles on `[0, 2π)`.
    Uniform {
        /// Sample size.
        samples: usize,
        /// Angle the mean-direction test is run against.
        known_mean_angle: f64,
    },
    /// Von Mises angles around `mean_angle`; the mean-direction test runs
    /// against the same angle.
    Concentrated {
        /// Sample size.
        samples: usize,
        /// Mean direction.
        mean_angle: f64,
        /// Von Mises concentration (kappa).
        concentration: f64,
    },
}

impl Scenario {
    /// 1000 uniform angles tested against π.
    #[must_use]
    pub const fn uniform_default() -> Self {
        Self::Uniform {
            samples: 1000,
            known_mean_angle: PI,
        }
    }

    /// 58 von Mises angles around π with concentration 2.
    #[must_use]
    pub const fn concentrated_default() -> Self {
        Self::Concentrated {
            samples: 58,
            mean_angle: PI,
            concentration: 2.0,
        }
    }

    /// Short identifier, also used as the plot file stem.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Uniform { .. } => "uniform",
            Self::Concentrated { .. } => "concentrated",
        }
    }

    /// Plot title.
    #[must_use]
    pub fn title(&self) -> String {
        match self {
            Self::Uniform { samples, .. } => format!("Uniform data (n = {samples})"),
            Self::Concentrated {
                samples,
                concentration,
                ..
            } => format!("Von Mises data (n = {samples}, kappa = {concentration})"),
        }
    }

    /// Sample size.
    #[must_use]
    pub const fn samples(&self) -> usize {
        match self {
            Self::Uniform { samples, .. } | Self::Concentrated { samples, .. } => *samples,
        }
    }

    /// Angle the mean-direction test is run against.
    #[must_use]
    pub const fn known_mean_angle(&self) -> f64 {
        match self {
            Self::Uniform {
                known_mean_angle, ..
            } => *known_mean_angle,
            Self::Concentrated { mean_angle, .. } => *mean_angle,
        }
    }

    /// Draw this scenario's sample from `sampler`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` for a zero sample size, a non-finite mean
    /// angle or a non-positive concentration.
    pub fn draw(&self, sampler: &mut AngleSampler) -> DemoResult<AngleSample> {
        match self {
            Self::Uniform { samples, .. } => sampler.uniform(*samples),
            Self::Concentrated {
                samples,
                mean_angle,
                concentration,
            } => sampler.concentrated(*mean_angle, *concentration, *samples),
        }
    }
}

/// Summary of one executed scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Scenario identifier.
    pub scenario: String,
    /// Seed of the stream the sample was drawn from.
    pub seed: u64,
    /// Sample size.
    pub samples: usize,
    /// Angle the mean-direction test was run against.
    pub known_mean_angle: f64,
    /// Both p-values.
    pub result: TestResult,
    /// Descriptive statistics of the sample.
    pub summary: CircularSummary,
    /// The printed lines, uniformity first.
    pub lines: [String; 2],
}

/// A report plus the figure that goes with it.
#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    /// Scenario identifier (plot file stem).
    pub name: &'static str,
    /// Report.
    pub report: ScenarioReport,
    /// Plot data.
    pub figure: Figure,
}

/// Executes scenarios end to end.
#[derive(Debug, Clone)]
pub struct DemoRunner<U = RayleighTest, M = VTest> {
    tests: CircularTestRunner<U, M>,
    plots: PlotDataBuilder,
}

impl DemoRunner {
    /// Runner over the standard tests with the configured plot resolution.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if the plot resolution is zero.
    pub fn from_config(config: &DemoConfig) -> DemoResult<Self> {
        Ok(Self::new(
            CircularTestRunner::standard(),
            PlotDataBuilder::new(config.plot.resolution)?,
        ))
    }
}

impl<U: UniformityTest, M: MeanDirectionTest> DemoRunner<U, M> {
    /// Create a runner over the given tests and plot builder.
    pub const fn new(tests: CircularTestRunner<U, M>, plots: PlotDataBuilder) -> Self {
        Self { tests, plots }
    }

    /// Draw, test, format and build the figure for one scenario.
    ///
    /// # Errors
    ///
    /// Propagates `InvalidArgument` from any stage.
    pub fn run_scenario(
        &self,
        scenario: &Scenario,
        sampler: &mut AngleSampler,
    ) -> DemoResult<ScenarioOutcome> {
        let sample = scenario.draw(sampler)?;
        let known_mean_angle = scenario.known_mean_angle();
        let result = self.tests.run(&sample, known_mean_angle)?;
        let lines = format_result(&result)?;
        let figure = self.plots.figure(scenario.title(), &sample)?;

        info!(
            scenario = scenario.name(),
            n = sample.len(),
            p_rayleigh = result.p_rayleigh,
            p_vtest = result.p_vtest,
            "scenario complete"
        );

        Ok(ScenarioOutcome {
            name: scenario.name(),
            report: ScenarioReport {
                scenario: scenario.name().to_string(),
                seed: sampler.seed(),
                samples: sample.len(),
                known_mean_angle,
                result,
                summary: CircularSummary::of(&sample),
                lines,
            },
            figure,
        })
    }

    /// Run `scenarios` in order, all drawing from one stream seeded with
    /// `seed` (`None` draws a seed from OS entropy).
    ///
    /// # Errors
    ///
    /// Stops at the first failing scenario.
    pub fn run_all(
        &self,
        scenarios: &[Scenario],
        seed: Option<u64>,
    ) -> DemoResult<Vec<ScenarioOutcome>> {
        let mut sampler = AngleSampler::new(seed);
        scenarios
            .iter()
            .map(|scenario| self.run_scenario(scenario, &mut sampler))
            .collect()
    }
}

/// Run every scenario `config` describes.
///
/// # Errors
///
/// Propagates any scenario error.
pub fn run_config(config: &DemoConfig) -> DemoResult<Vec<ScenarioOutcome>> {
    DemoRunner::from_config(config)?.run_all(&config.scenarios(), config.reproducibility.seed)
}

/// Write one plot file per outcome into `plot.output_dir`, named
/// `<scenario>.<ext>`. Returns the written paths.
///
/// # Errors
///
/// Returns `Io` or `Serialization` if a file cannot be written.
pub fn write_plots(plot: &PlotConfig, outcomes: &[ScenarioOutcome]) -> DemoResult<Vec<PathBuf>> {
    outcomes
        .iter()
        .map(|outcome| {
            let path = plot
                .output_dir
                .join(format!("{}.{}", outcome.name, plot.format.extension()));
            file_sink(plot.format, &path, plot.size_px).render(&outcome.figure)?;
            Ok(path)
        })
        .collect()
}
