//! response-math - Core math for Compton detector response curves
//!
//! Detector response tables describe the spectrum a detector records for a
//! monochromatic photon source as a set of polynomials, one per energy zone.
//! This crate provides:
//!
//! - **Compton kinematics** - backscatter and Compton edges, zone boundaries
//! - **Polynomials** - power-series evaluation and evenly spaced grids
//! - **Segmented curves** - sampling a piecewise polynomial zone by zone
//!
//! # Example
//!
//! ```
//! use response_math::{energy_bounds, evaluate_segments, Polynomial, ZoneLayout};
//!
//! let energy_kev = 662.0;
//! let layout = ZoneLayout::for_energy(energy_kev);
//! let bounds = energy_bounds(energy_kev);
//! let zones: Vec<Polynomial> = (0..layout.zone_count())
//!     .map(|_| Polynomial::new(vec![1.0]))
//!     .collect();
//!
//! let curve = evaluate_segments(&zones, &bounds, energy_kev, layout.sample_budget()).unwrap();
//! assert!(curve.values.iter().all(|&v| v == 1.0));
//! ```

pub mod compton;
pub mod polynomial;
pub mod segmented;

// Re-export commonly used types
pub use compton::{
    compton_backscatter, compton_edge, energy_bounds, ZoneLayout, ELECTRON_REST_ENERGY_KEV,
    PAIR_THRESHOLD_KEV,
};
pub use polynomial::{linspace, Polynomial};
pub use segmented::{evaluate_segments, zone_sample_count, SegmentError, SegmentedCurve};
