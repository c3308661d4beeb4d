//! JSON and CSV export of figures.

use std::fs::{self, File};
use std::io::{BufWriter, Write as IoWrite};
use std::path::{Path, PathBuf};

use tracing::info;

use super::{Figure, PlotPoints, PlotSink};
use crate::error::{DemoError, DemoResult};

/// Export format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Pretty-printed JSON of the whole figure.
    Json,
    /// `series,x,y` rows; series is `data` or `circle`.
    Csv,
}

/// Writes figures to a file for an external plotting tool.
#[derive(Debug, Clone)]
pub struct FigureExporter {
    path: PathBuf,
    format: ExportFormat,
}

impl FigureExporter {
    /// Exporter writing `format` to `path`.
    #[must_use]
    pub fn new(path: impl AsRef<Path>, format: ExportFormat) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            format,
        }
    }

    /// Export figure to JSON.
    ///
    /// # Errors
    ///
    /// Returns error if file operations or serialization fail.
    pub fn to_json(&self, figure: &Figure) -> DemoResult<()> {
        let mut writer = self.create()?;
        serde_json::to_writer_pretty(&mut writer, figure)
            .map_err(|e| DemoError::serialization(format!("JSON serialization failed: {e}")))?;
        writer
            .flush()
            .map_err(|e| DemoError::io(format!("Flush failed: {e}")))
    }

    /// Export figure to CSV.
    ///
    /// # Errors
    ///
    /// Returns error if file operations fail.
    pub fn to_csv(&self, figure: &Figure) -> DemoResult<()> {
        let mut writer = self.create()?;
        writeln!(writer, "series,x,y")
            .map_err(|e| DemoError::io(format!("Write header failed: {e}")))?;
        write_series(&mut writer, "data", &figure.data)?;
        write_series(&mut writer, "circle", figure.circle.points())?;
        writer
            .flush()
            .map_err(|e| DemoError::io(format!("Flush failed: {e}")))
    }

    fn create(&self) -> DemoResult<BufWriter<File>> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .map_err(|e| DemoError::io(format!("Failed to create directory: {e}")))?;
            }
        }
        let file = File::create(&self.path)
            .map_err(|e| DemoError::io(format!("Failed to create file: {e}")))?;
        Ok(BufWriter::new(file))
    }
}

fn write_series<W: IoWrite>(writer: &mut W, series: &str, points: &PlotPoints) -> DemoResult<()> {
    for (x, y) in points.iter() {
        writeln!(writer, "{series},{x},{y}")
            .map_err(|e| DemoError::io(format!("Write failed: {e}")))?;
    }
    Ok(())
}

impl PlotSink for FigureExporter {
    fn render(&mut self, figure: &Figure) -> DemoResult<()> {
        match self.format {
            ExportFormat::Json => self.to_json(figure)?,
            ExportFormat::Csv => self.to_csv(figure)?,
        }
        info!(path = %self.path.display(), format = ?self.format, "exported figure");
        Ok(())
    }
}
