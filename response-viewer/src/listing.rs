//! Listing of the calculation points available in a response table.

use std::io::{self, Write};

/// Write the energies of all calculation points with their 1-based index.
///
/// Energies are printed in their shortest round-trip form, so whole values
/// keep a trailing `.0` (`1.0`, not `1`).
pub fn write_energy_listing<W: Write>(energies: &[f64], mut out: W) -> io::Result<()> {
    writeln!(out, "Found energies:")?;
    for (i, energy) in energies.iter().enumerate() {
        writeln!(out, "{}\t{energy:?}", i + 1)?;
    }
    out.flush()
}
