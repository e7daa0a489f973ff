//! Plot detector response polynomials from a DRGen CalcResults export
//!
//! Without a point index the tool lists the energies for which a response
//! was calculated. With a 1-based point index it rebuilds that point's
//! Compton response curve and saves it as a PNG chart.
//!
//! Usage:
//! ```
//! cargo run --bin plot_response_poly -- <CalcResults.csv> [POINT] [OPTIONS]
//! ```
//!
//! See --help for detailed options.

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use response_viewer::{
    plot_response, read_energy_list, read_point, reconstruct, write_energy_listing,
    write_samples_csv_file, ChartOptions,
};

/// Command line arguments for response plotting
#[derive(Parser, Debug)]
#[command(
    name = "plot_response_poly",
    version,
    about = "Plot detector response polynomials from a DRGen CalcResults CSV export",
    long_about = "Reads the polynomial coefficients exported from a detector response \
        calculation.\n\nWithout POINT, lists the energies for which a response was \
        calculated. With POINT, plots the reconstructed Compton response of that \
        calculation point."
)]
struct Args {
    /// Path to the CalcResults CSV file
    csv_path: PathBuf,

    /// 1-based calculation point to plot; omit (or pass a value below 1) to list energies
    #[arg(allow_negative_numbers = true)]
    point: Option<i64>,

    /// Output PNG path [default: plots/compton_point_<POINT>.png]
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also write the sampled curve to this CSV file
    #[arg(long)]
    samples_csv: Option<PathBuf>,

    /// Chart width in pixels
    #[arg(long, default_value_t = 1024)]
    width: u32,

    /// Chart height in pixels
    #[arg(long, default_value_t = 768)]
    height: u32,
}

fn list_energies(csv_path: &Path) -> Result<()> {
    let energies = read_energy_list(csv_path)
        .with_context(|| format!("Failed to read energies from {}", csv_path.display()))?;

    write_energy_listing(&energies, io::stdout().lock())?;
    Ok(())
}

fn plot_point(args: &Args, point: usize) -> Result<()> {
    let row = read_point(&args.csv_path, point).with_context(|| {
        format!(
            "Failed to read point {point} from {}",
            args.csv_path.display()
        )
    })?;

    let response = reconstruct(&row)
        .with_context(|| format!("Failed to rebuild response for point {point}"))?;

    println!(
        "Point {point}: {} keV, {} zones, {} samples",
        response.energy_kev,
        response.layout.zone_count(),
        response.curve.len()
    );

    let output = args
        .output
        .clone()
        .unwrap_or_else(|| PathBuf::from(format!("plots/compton_point_{point}.png")));
    let options = ChartOptions {
        width: args.width,
        height: args.height,
    };

    plot_response(&response, &output, &options)
        .with_context(|| format!("Failed to plot {}", output.display()))?;
    println!("Plot saved to: {}", output.display());

    if let Some(samples_path) = &args.samples_csv {
        write_samples_csv_file(&response.curve, samples_path)
            .with_context(|| format!("Failed to write {}", samples_path.display()))?;
        println!("Samples saved to: {}", samples_path.display());
    }

    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging from environment variables
    env_logger::init();

    let args = Args::parse();

    match args.point {
        Some(point) if point >= 1 => plot_point(&args, point as usize),
        _ => list_energies(&args.csv_path),
    }
}
