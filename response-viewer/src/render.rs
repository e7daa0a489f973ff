//! Chart and CSV output for reconstructed response curves.

use std::fs;
use std::io::Write;
use std::ops::Range;
use std::path::{Path, PathBuf};

use log::info;
use plotters::prelude::*;
use response_math::SegmentedCurve;
use thiserror::Error;

use crate::response::ResponseCurve;

const X_LABEL: &str = "energy, MeV";
const Y_LABEL: &str = "a";

/// Errors that can occur while writing chart or sample output
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("curve has no finite samples to plot")]
    EmptyCurve,
    #[error("failed to create output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to draw chart: {0}")]
    Drawing(String),
    #[error("failed to write samples: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write samples: {0}")]
    Io(#[from] std::io::Error),
}

fn drawing<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Drawing(err.to_string())
}

/// Output image settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartOptions {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
        }
    }
}

fn finite_extent(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |extent, v| match extent {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Axis ranges for a curve, or `None` if it has no finite samples.
///
/// The y range gets a 5% margin. A flat curve is widened so plotters never
/// receives an empty range.
pub fn chart_ranges(curve: &SegmentedCurve) -> Option<(Range<f64>, Range<f64>)> {
    let (x_min, x_max) = finite_extent(&curve.energies)?;
    let (y_min, y_max) = finite_extent(&curve.values)?;

    let x_range = if x_max > x_min {
        x_min..x_max
    } else {
        x_min - 1.0..x_max + 1.0
    };
    let y_pad = if y_max > y_min {
        (y_max - y_min) * 0.05
    } else {
        y_min.abs().max(1.0) * 0.1
    };

    Some((x_range, y_min - y_pad..y_max + y_pad))
}

fn ensure_parent_dir(path: &Path) -> Result<(), RenderError> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|source| RenderError::CreateDir {
                path: dir.to_path_buf(),
                source,
            })
        }
        _ => Ok(()),
    }
}

/// Draw the response curve as a red line chart and save it as PNG.
pub fn plot_response(
    response: &ResponseCurve,
    path: &Path,
    options: &ChartOptions,
) -> Result<(), RenderError> {
    let (x_range, y_range) = chart_ranges(&response.curve).ok_or(RenderError::EmptyCurve)?;
    ensure_parent_dir(path)?;

    let root = BitMapBackend::new(path, (options.width, options.height)).into_drawing_area();
    root.fill(&WHITE).map_err(drawing)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(response.title(), ("sans-serif", 30).into_font())
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range, y_range)
        .map_err(drawing)?;

    chart
        .configure_mesh()
        .x_label_formatter(&|x| format!("{x:.0}"))
        .x_desc(X_LABEL)
        .y_desc(Y_LABEL)
        .axis_desc_style(("sans-serif", 18))
        .draw()
        .map_err(drawing)?;

    chart
        .draw_series(LineSeries::new(
            response.curve.points().filter(|(x, y)| x.is_finite() && y.is_finite()),
            &RED,
        ))
        .map_err(drawing)?;

    root.present().map_err(drawing)?;
    info!("Chart saved to {}", path.display());
    Ok(())
}

/// Write the sampled curve as CSV with columns `energy_kev,value`.
pub fn write_samples_csv<W: Write>(curve: &SegmentedCurve, writer: W) -> Result<(), RenderError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(["energy_kev", "value"])?;

    for (energy, value) in curve.points() {
        wtr.write_record(&[format!("{energy:.6}"), format!("{value:.10e}")])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Write the sampled curve to a CSV file, creating its directory if needed.
pub fn write_samples_csv_file(curve: &SegmentedCurve, path: &Path) -> Result<(), RenderError> {
    ensure_parent_dir(path)?;
    let file = fs::File::create(path)?;
    write_samples_csv(curve, file)?;
    info!("Wrote {} samples to {}", curve.len(), path.display());
    Ok(())
}
