//! Reconstruct a response curve from one table row.

use log::{debug, info};
use response_math::compton::TABLE_ZONES;
use response_math::{energy_bounds, evaluate_segments, SegmentError, SegmentedCurve, ZoneLayout};
use thiserror::Error;

use crate::table::ResponseRow;

/// Errors that can occur while rebuilding a response curve
#[derive(Error, Debug)]
pub enum ResponseError {
    #[error("response row carries {found} zones, expected {expected}", expected = TABLE_ZONES)]
    ZoneCount { found: usize },
    #[error("cannot sample response curve: {0}")]
    Segment(#[from] SegmentError),
}

/// Response curve of one calculation point
#[derive(Debug, Clone)]
pub struct ResponseCurve {
    /// Incident photon energy in keV
    pub energy_kev: f64,
    pub layout: ZoneLayout,
    /// Zone boundaries in keV
    pub bounds: Vec<f64>,
    /// Sampled curve; energies in keV
    pub curve: SegmentedCurve,
}

impl ResponseCurve {
    /// Chart title for this curve
    pub fn title(&self) -> String {
        format!("Compton for energy {:?} keV", self.energy_kev)
    }
}

/// Sample the piecewise polynomial stored in `row`.
///
/// The table energy is converted from MeV to keV, which picks the zone
/// layout. Below the pair-production threshold the last three zones of the
/// row are paired with four boundaries; above it all six zones are paired
/// with seven.
pub fn reconstruct(row: &ResponseRow) -> Result<ResponseCurve, ResponseError> {
    let found = row.coefficients.nrows();
    if found != TABLE_ZONES {
        return Err(ResponseError::ZoneCount { found });
    }

    let energy_kev = row.energy_kev();
    let layout = ZoneLayout::for_energy(energy_kev);
    let zones = row.zone_polynomials(layout);
    let bounds = energy_bounds(energy_kev);
    debug!("Zone bounds for {energy_kev} keV ({layout}): {bounds:?}");

    let curve = evaluate_segments(&zones, &bounds, energy_kev, layout.sample_budget())?;
    info!(
        "Reconstructed {} samples over {} zones for {energy_kev} keV",
        curve.len(),
        zones.len()
    );

    Ok(ResponseCurve {
        energy_kev,
        layout,
        bounds,
        curve,
    })
}
