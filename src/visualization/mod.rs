//! Plot data for circular samples.
//!
//! Maps angles onto the unit circle and bundles them with a reference
//! circle into a [`Figure`], which is handed to a [`PlotSink`]:
//! - [`SvgRenderer`]: scatter plus faint circle as a standalone SVG
//! - [`FigureExporter`]: JSON or CSV of both point sets
//!
//! # Example
//!
//! ```rust
//! use circdemo::sampling::sample_uniform;
//! use circdemo::visualization::{PlotDataBuilder, PlotSink, Figure};
//!
//! let sample = sample_uniform(100, Some(42)).unwrap();
//! let figure = PlotDataBuilder::default().figure("uniform", &sample).unwrap();
//!
//! let mut collected: Vec<Figure> = Vec::new();
//! collected.render(&figure).unwrap();
//! assert_eq!(collected[0].data.len(), 100);
//! ```

mod export;
mod svg;

pub use export::{ExportFormat, FigureExporter};
pub use svg::SvgRenderer;

use std::f64::consts::TAU;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{DemoError, DemoResult};
use crate::sampling::AngleSample;

/// Default number of points on the reference circle.
pub const DEFAULT_RESOLUTION: usize = 1000;

/// Legend label of the sample scatter.
pub const DATA_LABEL: &str = "Data Points";

/// Legend label of the reference circle.
pub const CIRCLE_LABEL: &str = "Circle";

// ============================================================================
// Point sets
// ============================================================================

/// Parallel x/y coordinates, always of equal length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPlotPoints")]
pub struct PlotPoints {
    x: Vec<f64>,
    y: Vec<f64>,
}

#[derive(Deserialize)]
struct RawPlotPoints {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl TryFrom<RawPlotPoints> for PlotPoints {
    type Error = DemoError;

    fn try_from(raw: RawPlotPoints) -> DemoResult<Self> {
        Self::new(raw.x, raw.y)
    }
}

impl PlotPoints {
    /// Pair up coordinate vectors.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `x` and `y` differ in length.
    pub fn new(x: Vec<f64>, y: Vec<f64>) -> DemoResult<Self> {
        if x.len() != y.len() {
            return Err(DemoError::invalid_argument(
                "points",
                format!("{} x coordinates but {} y coordinates", x.len(), y.len()),
            ));
        }
        Ok(Self { x, y })
    }

    /// Map angles to `(cos θ, sin θ)`, preserving order.
    #[must_use]
    pub fn from_angles(angles: &[f64]) -> Self {
        let (x, y) = angles.iter().map(|a| (a.cos(), a.sin())).unzip();
        Self { x, y }
    }

    /// X coordinates.
    #[must_use]
    pub fn x(&self) -> &[f64] {
        &self.x
    }

    /// Y coordinates.
    #[must_use]
    pub fn y(&self) -> &[f64] {
        &self.y
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.x.len()
    }

    /// Check if empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }

    /// Iterate over `(x, y)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.x.iter().copied().zip(self.y.iter().copied())
    }
}

/// The unit circle sampled on an evenly spaced grid over `[0, 2π]`.
///
/// Both endpoints are included, so the outline closes on itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawReferenceCircle")]
pub struct ReferenceCircle {
    resolution: usize,
    points: PlotPoints,
}

#[derive(Deserialize)]
struct RawReferenceCircle {
    resolution: usize,
    points: PlotPoints,
}

impl TryFrom<RawReferenceCircle> for ReferenceCircle {
    type Error = DemoError;

    fn try_from(raw: RawReferenceCircle) -> DemoResult<Self> {
        if raw.resolution == 0 || raw.points.len() != raw.resolution {
            return Err(DemoError::invalid_argument(
                "circle",
                format!(
                    "resolution {} does not match {} points",
                    raw.resolution,
                    raw.points.len()
                ),
            ));
        }
        Ok(Self {
            resolution: raw.resolution,
            points: raw.points,
        })
    }
}

impl ReferenceCircle {
    /// Build a circle of `resolution` points.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `resolution == 0`.
    pub fn new(resolution: usize) -> DemoResult<Self> {
        if resolution == 0 {
            return Err(DemoError::invalid_argument(
                "resolution",
                "must be at least 1",
            ));
        }
        let angles: Vec<f64> = if resolution == 1 {
            vec![0.0]
        } else {
            let step = TAU / (resolution - 1) as f64;
            (0..resolution).map(|i| step * i as f64).collect()
        };
        Ok(Self {
            resolution,
            points: PlotPoints::from_angles(&angles),
        })
    }

    /// Number of grid points.
    #[must_use]
    pub const fn resolution(&self) -> usize {
        self.resolution
    }

    /// The circle's coordinates.
    #[must_use]
    pub const fn points(&self) -> &PlotPoints {
        &self.points
    }
}

/// Map a sample onto the unit circle.
#[must_use]
pub fn to_plot_points(sample: &AngleSample) -> PlotPoints {
    PlotPoints::from_angles(sample.angles())
}

/// Reference circle of `resolution` points.
///
/// # Errors
///
/// Returns `InvalidArgument` if `resolution == 0`.
pub fn reference_circle(resolution: usize) -> DemoResult<ReferenceCircle> {
    ReferenceCircle::new(resolution)
}

// ============================================================================
// Figure
// ============================================================================

/// Everything a renderer needs for one scatter-plus-circle plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    /// Plot title.
    pub title: String,
    /// Sample points on the unit circle.
    pub data: PlotPoints,
    /// Reference outline.
    pub circle: ReferenceCircle,
}

/// Builds plot data at a fixed reference-circle resolution.
#[derive(Debug, Clone)]
pub struct PlotDataBuilder {
    resolution: usize,
}

impl Default for PlotDataBuilder {
    fn default() -> Self {
        Self {
            resolution: DEFAULT_RESOLUTION,
        }
    }
}

impl PlotDataBuilder {
    /// Create a builder.
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `resolution == 0`.
    pub fn new(resolution: usize) -> DemoResult<Self> {
        if resolution == 0 {
            return Err(DemoError::invalid_argument(
                "resolution",
                "must be at least 1",
            ));
        }
        Ok(Self { resolution })
    }

    /// Reference-circle resolution.
    #[must_use]
    pub const fn resolution(&self) -> usize {
        self.resolution
    }

    /// Map a sample onto the unit circle.
    #[must_use]
    pub fn to_plot_points(&self, sample: &AngleSample) -> PlotPoints {
        to_plot_points(sample)
    }

    /// Reference circle at this builder's resolution.
    ///
    /// # Errors
    ///
    /// Never fails for a builder made through [`PlotDataBuilder::new`].
    pub fn reference_circle(&self) -> DemoResult<ReferenceCircle> {
        ReferenceCircle::new(self.resolution)
    }

    /// Assemble a figure for `sample`.
    ///
    /// # Errors
    ///
    /// Never fails for a builder made through [`PlotDataBuilder::new`].
    pub fn figure(&self, title: impl Into<String>, sample: &AngleSample) -> DemoResult<Figure> {
        Ok(Figure {
            title: title.into(),
            data: self.to_plot_points(sample),
            circle: self.reference_circle()?,
        })
    }
}

// ============================================================================
// Sinks
// ============================================================================

/// Consumer of figures. Rendering is a pure sink: nothing flows back.
pub trait PlotSink {
    /// Render one figure.
    ///
    /// # Errors
    ///
    /// Returns an error if the figure cannot be written.
    fn render(&mut self, figure: &Figure) -> DemoResult<()>;
}

/// Collects figures in memory.
impl PlotSink for Vec<Figure> {
    fn render(&mut self, figure: &Figure) -> DemoResult<()> {
        self.push(figure.clone());
        Ok(())
    }
}

/// Output format for file sinks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotFormat {
    /// Standalone SVG image.
    #[default]
    Svg,
    /// Pretty-printed JSON of the figure.
    Json,
    /// CSV with `series,x,y` rows.
    Csv,
}

impl PlotFormat {
    /// File extension for this format.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Svg => "svg",
            Self::Json => "json",
            Self::Csv => "csv",
        }
    }
}

/// File sink for `format` writing to `path`.
#[must_use]
pub fn file_sink(format: PlotFormat, path: &Path, size_px: u32) -> Box<dyn PlotSink> {
    match format {
        PlotFormat::Svg => Box::new(SvgRenderer::new(path).with_size(size_px)),
        PlotFormat::Json => Box::new(FigureExporter::new(path, ExportFormat::Json)),
        PlotFormat::Csv => Box::new(FigureExporter::new(path, ExportFormat::Csv)),
    }
}
