//! Piecewise polynomial curves sampled zone by zone.
//!
//! Each zone carries its own polynomial defined on the normalized coordinate
//! `t ∈ [0, 1]` across the zone. Sample density is allocated in proportion
//! to the zone width relative to the incident energy, so narrow zones get few
//! points and wide zones get many.

use log::{debug, warn};
use thiserror::Error;

use crate::polynomial::{linspace, Polynomial};

/// Errors raised when zone inputs do not describe a consistent curve
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SegmentError {
    #[error("{zones} zones need {} boundaries, got {bounds}", .zones + 1)]
    MismatchedBounds { zones: usize, bounds: usize },
    #[error("zone {zone} needs {samples} samples, more than the whole-curve budget of {budget}")]
    SampleBudgetExceeded {
        zone: usize,
        samples: usize,
        budget: usize,
    },
    #[error("incident energy must be positive and finite, got {0}")]
    InvalidEnergy(f64),
}

/// Sampled curve as two parallel sequences in ascending zone order.
///
/// Adjacent zones both include their shared boundary, so every internal
/// boundary appears twice in `energies`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SegmentedCurve {
    /// Absolute energy of each sample
    pub energies: Vec<f64>,
    /// Polynomial value of each sample
    pub values: Vec<f64>,
}

impl SegmentedCurve {
    /// Number of samples
    pub fn len(&self) -> usize {
        self.energies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }

    /// Iterate over `(energy, value)` pairs
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.energies.iter().copied().zip(self.values.iter().copied())
    }

    fn extend(&mut self, energies: Vec<f64>, values: Vec<f64>) {
        self.energies.extend(energies);
        self.values.extend(values);
    }
}

/// Samples allotted to a zone spanning `[lower, upper]`.
///
/// The width is taken relative to the incident energy, not to the full
/// boundary span, and rounded half to even. The per-zone counts therefore
/// need not add up to `sample_budget`.
pub fn zone_sample_count(
    lower: f64,
    upper: f64,
    incident_energy: f64,
    sample_budget: usize,
) -> usize {
    let share = (upper - lower) / incident_energy * sample_budget as f64;
    share.round_ties_even().max(0.0) as usize
}

/// Evaluate a piecewise polynomial over consecutive zones.
///
/// Zone `i` spans `bounds[i]..=bounds[i + 1]`. Its polynomial is evaluated at
/// evenly spaced fractions of the zone in `[0, 1]` and the fractions are mapped
/// back to absolute energies for the x coordinates.
///
/// # Arguments
/// * `zones` - One polynomial per zone, in ascending energy order
/// * `bounds` - Zone edges, exactly `zones.len() + 1` values
/// * `incident_energy` - Energy used to size each zone's sample count
/// * `sample_budget` - Target sample count for the full curve
///
/// # Errors
/// * `MismatchedBounds` if `bounds.len() != zones.len() + 1`
/// * `SampleBudgetExceeded` if any single zone would need more samples than
///   the whole curve is budgeted for, which happens when the bounds do not
///   belong to `incident_energy`
/// * `InvalidEnergy` if `incident_energy` is not positive and finite
pub fn evaluate_segments(
    zones: &[Polynomial],
    bounds: &[f64],
    incident_energy: f64,
    sample_budget: usize,
) -> Result<SegmentedCurve, SegmentError> {
    if bounds.len() != zones.len() + 1 {
        return Err(SegmentError::MismatchedBounds {
            zones: zones.len(),
            bounds: bounds.len(),
        });
    }
    if !incident_energy.is_finite() || incident_energy <= 0.0 {
        return Err(SegmentError::InvalidEnergy(incident_energy));
    }

    let mut curve = SegmentedCurve::default();

    for (zone, (poly, edges)) in zones.iter().zip(bounds.windows(2)).enumerate() {
        let (lower, upper) = (edges[0], edges[1]);
        let width = upper - lower;

        let samples = zone_sample_count(lower, upper, incident_energy, sample_budget);
        if samples > sample_budget {
            return Err(SegmentError::SampleBudgetExceeded {
                zone,
                samples,
                budget: sample_budget,
            });
        }
        if samples == 0 {
            warn!("Zone {zone} [{lower:.3}, {upper:.3}] is too narrow to receive samples");
        }
        debug!("Zone {zone} [{lower:.3}, {upper:.3}]: {samples} samples");

        let fractions = linspace(0.0, 1.0, samples);
        let energies = fractions.iter().map(|t| lower + t * width).collect();
        let values = poly.eval_all(&fractions);
        curve.extend(energies, values);
    }

    Ok(curve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compton::{energy_bounds, ZoneLayout};
    use approx::assert_relative_eq;

    fn constants(values: &[f64]) -> Vec<Polynomial> {
        values.iter().map(|&c| Polynomial::new(vec![c])).collect()
    }

    #[test]
    fn test_constant_zone_reproduces_constant() {
        let zones = constants(&[3.5]);
        let curve = evaluate_segments(&zones, &[20.0, 60.0], 100.0, 50).unwrap();

        assert_eq!(curve.len(), 20);
        assert!(curve.values.iter().all(|&v| v == 3.5));
        assert_eq!(curve.energies[0], 20.0);
        assert_eq!(*curve.energies.last().unwrap(), 60.0);
    }

    #[test]
    fn test_polynomial_uses_zone_fraction() {
        // p(t) = t, so values run 0..1 regardless of absolute energy
        let zones = vec![Polynomial::new(vec![0.0, 1.0])];
        let curve = evaluate_segments(&zones, &[500.0, 1000.0], 1000.0, 10).unwrap();

        assert_eq!(curve.len(), 5);
        assert_eq!(curve.values, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(curve.energies, vec![500.0, 625.0, 750.0, 875.0, 1000.0]);
    }

    #[test]
    fn test_shared_boundaries_are_duplicated() {
        let zones = constants(&[1.0, 2.0]);
        let curve = evaluate_segments(&zones, &[0.0, 50.0, 100.0], 100.0, 10).unwrap();

        assert_eq!(curve.len(), 10);
        assert_eq!(curve.energies[4], 50.0);
        assert_eq!(curve.energies[5], 50.0);
        assert_eq!(curve.values[4], 1.0);
        assert_eq!(curve.values[5], 2.0);
    }

    #[test]
    fn test_sample_count_rounds_half_to_even() {
        assert_eq!(zone_sample_count(0.0, 25.0, 100.0, 10), 2);
        assert_eq!(zone_sample_count(25.0, 100.0, 100.0, 10), 8);
    }

    #[test]
    fn test_sample_allocation_662_kev() {
        let energy = 662.0;
        let layout = ZoneLayout::for_energy(energy);
        let bounds = energy_bounds(energy);
        let zones = constants(&[1.0, 2.0, 3.0]);

        let curve = evaluate_segments(&zones, &bounds, energy, layout.sample_budget()).unwrap();

        // 16.7, 26.6, 16.7 rounded; the total overshoots the budget of 60
        let count = |v: f64| curve.values.iter().filter(|&&x| x == v).count();
        assert_eq!(count(1.0), 17);
        assert_eq!(count(2.0), 27);
        assert_eq!(count(3.0), 17);
        assert_eq!(curve.len(), 61);
    }

    #[test]
    fn test_sample_allocation_2000_kev() {
        let energy = 2000.0;
        let layout = ZoneLayout::for_energy(energy);
        let bounds = energy_bounds(energy);
        let zones = constants(&[0.0, 1.0, 2.0, 3.0, 4.0, 5.0]);

        let curve = evaluate_segments(&zones, &bounds, energy, layout.sample_budget()).unwrap();

        let counts: Vec<usize> = (0..6)
            .map(|z| curve.values.iter().filter(|&&v| v == z as f64).count())
            .collect();
        assert_eq!(counts, vec![20, 68, 31, 15, 26, 20]);
        assert_eq!(curve.energies[0], 0.0);
        assert_relative_eq!(*curve.energies.last().unwrap(), energy, epsilon = 1e-9);
    }

    #[test]
    fn test_energies_non_decreasing() {
        let energy = 1173.2;
        let bounds = energy_bounds(energy);
        let zones = constants(&[0.0; 6]);
        let curve = evaluate_segments(&zones, &bounds, energy, 180).unwrap();

        assert!(curve.energies.windows(2).all(|w| w[0] <= w[1] + 1e-9));
        for (x, y) in curve.points() {
            assert!((-1e-9..=energy + 1e-9).contains(&x));
            assert_eq!(y, 0.0);
        }
    }

    #[test]
    fn test_zero_width_zone_gets_no_samples() {
        let zones = constants(&[1.0, 2.0, 3.0]);
        let curve = evaluate_segments(&zones, &[0.0, 40.0, 40.0, 100.0], 100.0, 60).unwrap();
        assert!(curve.values.iter().all(|&v| v != 2.0));
        assert_eq!(curve.len(), 24 + 36);
    }

    #[test]
    fn test_mismatched_bounds_rejected() {
        let zones = constants(&[1.0, 2.0, 3.0]);
        let bounds = energy_bounds(2000.0);

        let err = evaluate_segments(&zones, &bounds, 2000.0, 60).unwrap_err();
        assert_eq!(err, SegmentError::MismatchedBounds { zones: 3, bounds: 7 });
        assert!(err.to_string().contains("3 zones need 4 boundaries, got 7"));
    }

    #[test]
    fn test_budget_exceeded_rejected() {
        // Bounds wider than the incident energy ask for more than the budget
        let zones = constants(&[1.0]);
        let err = evaluate_segments(&zones, &[0.0, 200.0], 100.0, 10).unwrap_err();
        assert_eq!(
            err,
            SegmentError::SampleBudgetExceeded {
                zone: 0,
                samples: 20,
                budget: 10
            }
        );
    }

    #[test]
    fn test_invalid_energy_rejected() {
        let zones = constants(&[1.0]);
        for energy in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let result = evaluate_segments(&zones, &[0.0, 1.0], energy, 10);
            assert!(matches!(result, Err(SegmentError::InvalidEnergy(_))));
        }
    }

    #[test]
    fn test_points_pairs_match_sequences() {
        let zones = vec![Polynomial::new(vec![1.0, 0.0, 1.0])];
        let curve = evaluate_segments(&zones, &[0.0, 10.0], 10.0, 3).unwrap();
        let points: Vec<(f64, f64)> = curve.points().collect();

        assert_eq!(points.len(), 3);
        assert_relative_eq!(points[1].0, 5.0);
        assert_relative_eq!(points[1].1, 1.25);
    }
}
