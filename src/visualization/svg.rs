//! SVG rendering of a [`Figure`].

use std::fs;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::info;

use super::{Figure, PlotSink, CIRCLE_LABEL, DATA_LABEL};
use crate::error::{DemoError, DemoResult};

/// Half-width of the plotted square in data units; leaves a margin
/// around the unit circle.
const EXTENT: f64 = 1.15;

const DATA_COLOR: RGBColor = RGBColor(0x1f, 0x77, 0xb4);

/// Writes figures as square SVG images.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    path: PathBuf,
    size_px: u32,
}

impl SvgRenderer {
    /// Renderer writing to `path` at the default 800 px.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            size_px: 800,
        }
    }

    /// Set the image edge length in pixels.
    #[must_use]
    pub const fn with_size(mut self, size_px: u32) -> Self {
        self.size_px = size_px;
        self
    }

    /// Output path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Render `figure` to an SVG document.
    ///
    /// # Errors
    ///
    /// Returns `Serialization` if the chart cannot be drawn.
    pub fn to_svg_string(&self, figure: &Figure) -> DemoResult<String> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (self.size_px, self.size_px))
                .into_drawing_area();
            root.fill(&WHITE).map_err(render_error)?;

            let mut chart = ChartBuilder::on(&root)
                .caption(&figure.title, ("sans-serif", 20))
                .margin(10)
                .build_cartesian_2d(-EXTENT..EXTENT, -EXTENT..EXTENT)
                .map_err(render_error)?;

            chart
                .draw_series(LineSeries::new(
                    figure.circle.points().iter(),
                    BLACK.mix(0.4).stroke_width(2),
                ))
                .map_err(render_error)?
                .label(CIRCLE_LABEL)
                .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLACK.mix(0.4)));

            chart
                .draw_series(
                    figure
                        .data
                        .iter()
                        .map(|point| Circle::new(point, 3, DATA_COLOR.filled())),
                )
                .map_err(render_error)?
                .label(DATA_LABEL)
                .legend(|(x, y)| Circle::new((x + 10, y), 3, DATA_COLOR.filled()));

            chart
                .configure_series_labels()
                .background_style(WHITE.mix(0.8))
                .border_style(BLACK)
                .draw()
                .map_err(render_error)?;

            root.present().map_err(render_error)?;
        }
        Ok(svg)
    }
}

fn render_error(e: impl std::fmt::Display) -> DemoError {
    DemoError::serialization(format!("SVG rendering failed: {e}"))
}

impl PlotSink for SvgRenderer {
    fn render(&mut self, figure: &Figure) -> DemoResult<()> {
        let svg = self.to_svg_string(figure)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| DemoError::io(format!("Failed to create directory: {e}")))?;
            }
        }
        fs::write(&self.path, svg)
            .map_err(|e| DemoError::io(format!("Failed to write SVG: {e}")))?;
        info!(path = %self.path.display(), points = figure.data.len(), "wrote SVG plot");
        Ok(())
    }
}
