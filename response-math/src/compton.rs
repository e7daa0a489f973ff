//! Compton-scattering zone boundaries for detector response spectra.
//!
//! A detector response curve for a monochromatic photon source is split into
//! zones whose edges come from Compton kinematics: the backscatter edge (photon
//! scattered at 180°) and the Compton edge (incident minus backscatter). Above
//! the pair-production threshold three annihilation-related edges are added:
//! the double escape peak, a shoulder at `E - 4/3 mc²`, and the single escape
//! peak.
//!
//! All energies in this module are in keV.

/// Electron rest energy mc² in keV
pub const ELECTRON_REST_ENERGY_KEV: f64 = 511.008;

/// Pair-production threshold 2mc² in keV
pub const PAIR_THRESHOLD_KEV: f64 = 2.0 * ELECTRON_REST_ENERGY_KEV;

/// Number of samples allotted per zone when sizing a full curve
pub const SAMPLES_PER_ZONE: usize = 20;

/// Number of polynomial zones stored per energy in a response table
pub const TABLE_ZONES: usize = 6;

/// Energy deposited by a photon scattered at 180°.
///
/// Follows from the Compton formula at θ = π:
/// `E' = mc² / (2 + mc²/E)`.
///
/// # Arguments
/// * `energy` - Incident photon energy in keV, must be positive
pub fn compton_backscatter(energy: f64) -> f64 {
    ELECTRON_REST_ENERGY_KEV / (2.0 + ELECTRON_REST_ENERGY_KEV / energy)
}

/// Maximum energy transferred to the recoil electron (the Compton edge).
pub fn compton_edge(energy: f64) -> f64 {
    energy - compton_backscatter(energy)
}

/// Ordered zone boundaries of the response spectrum for an incident energy.
///
/// Returns 4 points for `energy <= 1022.016` keV and 7 points above it.
/// The result always starts at 0, ends at `energy` and is sorted ascending.
/// Neighbouring points can coincide for particular energies; that is not
/// treated as an error.
///
/// # Arguments
/// * `energy` - Incident photon energy in keV, positive and finite
///
/// # Examples
/// ```
/// use response_math::compton::energy_bounds;
///
/// let bounds = energy_bounds(662.0);
/// assert_eq!(bounds.len(), 4);
/// assert_eq!(bounds[0], 0.0);
/// assert_eq!(bounds[3], 662.0);
/// ```
pub fn energy_bounds(energy: f64) -> Vec<f64> {
    let backscatter = compton_backscatter(energy);
    let edge = energy - backscatter;

    let mut bounds = if energy <= PAIR_THRESHOLD_KEV {
        vec![0.0, backscatter, edge, energy]
    } else {
        vec![
            0.0,
            backscatter,
            edge,
            energy - PAIR_THRESHOLD_KEV,
            energy - 4.0 / 3.0 * ELECTRON_REST_ENERGY_KEV,
            energy - ELECTRON_REST_ENERGY_KEV,
            energy,
        ]
    };
    bounds.sort_by(f64::total_cmp);
    bounds
}

/// Zone structure of a response curve, decided by the incident energy.
///
/// Below the pair-production threshold only the Compton continuum exists and
/// the curve is modeled by the last three zones of a table row. Above it all
/// six zones are used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneLayout {
    /// Incident energy at or below 1022.016 keV: 3 zones, 4 boundaries
    BelowPairThreshold,
    /// Incident energy above 1022.016 keV: 6 zones, 7 boundaries
    AbovePairThreshold,
}

impl ZoneLayout {
    /// Pick the layout for an incident energy in keV.
    ///
    /// Uses the same comparison as [`energy_bounds`] so that the zone count
    /// and the boundary count always agree.
    pub fn for_energy(energy_kev: f64) -> Self {
        if energy_kev <= PAIR_THRESHOLD_KEV {
            ZoneLayout::BelowPairThreshold
        } else {
            ZoneLayout::AbovePairThreshold
        }
    }

    /// Number of polynomial zones in this layout
    pub fn zone_count(self) -> usize {
        match self {
            ZoneLayout::BelowPairThreshold => 3,
            ZoneLayout::AbovePairThreshold => TABLE_ZONES,
        }
    }

    /// Number of zone boundaries, always `zone_count() + 1`
    pub fn bound_count(self) -> usize {
        self.zone_count() + 1
    }

    /// Index of the first table zone used by this layout.
    ///
    /// Table rows always carry six zones; the low-energy layout uses the
    /// trailing three.
    pub fn first_table_zone(self) -> usize {
        TABLE_ZONES - self.zone_count()
    }

    /// Target sample count for the whole curve
    pub fn sample_budget(self) -> usize {
        SAMPLES_PER_ZONE * self.zone_count()
    }
}

impl std::fmt::Display for ZoneLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZoneLayout::BelowPairThreshold => write!(f, "below pair threshold"),
            ZoneLayout::AbovePairThreshold => write!(f, "above pair threshold"),
        }
    }
}
