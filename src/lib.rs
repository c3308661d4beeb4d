//! # circdemo
//!
//! Uniformity versus known-mean-direction testing on circular data.
//!
//! Draws angle samples (uniform, or von Mises around a known direction),
//! runs a uniformity test (Rayleigh) and a mean-direction test (V-test) on
//! them, formats the p-values and turns the sample into scatter-plus-circle
//! plot data:
//! - [`sampling`]: seeded samplers over a PCG-64 stream
//! - [`hypothesis`]: the two tests behind trait seams, plus a runner
//! - [`format`]: three-decimal p-value rendering
//! - [`visualization`]: plot data, SVG and JSON/CSV sinks
//! - [`scenarios`]: the two scripted demonstrations
//!
//! ## Example
//!
//! ```rust
//! use circdemo::prelude::*;
//! use std::f64::consts::PI;
//!
//! let sample = sample_concentrated(PI, 2.0, 58, Some(42)).unwrap();
//! let result = CircularTestRunner::standard().run(&sample, PI).unwrap();
//! let lines = format_result(&result).unwrap();
//! assert_eq!(lines[0], "p_rayleigh = 0.000");
//! ```

#![forbid(unsafe_code)]
#![deny(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::similar_names,
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops,  // Manual Horner's method is intentional
    clippy::imprecise_flops,   // Numerical code choices are intentional
    clippy::missing_const_for_fn,
)]

pub mod config;
pub mod error;
pub mod format;
pub mod hypothesis;
pub mod sampling;
pub mod scenarios;
pub mod stats;
pub mod visualization;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{DemoConfig, DemoConfigBuilder};
    pub use crate::error::{DemoError, DemoResult};
    pub use crate::format::{format_line, format_p, format_result};
    pub use crate::hypothesis::{
        CircularTestRunner, MeanDirectionTest, TestResult, UniformityTest,
    };
    pub use crate::sampling::{sample_concentrated, sample_uniform, AngleSample, AngleSampler};
    pub use crate::scenarios::{DemoRunner, Scenario, ScenarioReport};
    pub use crate::visualization::{
        reference_circle, to_plot_points, Figure, PlotDataBuilder, PlotPoints, PlotSink,
    };
}

/// Re-export for public API
pub use error::{DemoError, DemoResult};
