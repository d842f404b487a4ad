//! APASS DR9 colour transformations.
//!
//! APASS carries Johnson B/V and Sloan g'r'i' natively; Cousins R and I
//! come from quadratic fits in g-r against the Landolt standards.

use skytable::{Column, Table};

use crate::PhotometryError;

/// Derive Cousins R and I and add BVRI convenience aliases.
///
/// Adds `Rmag`/`Imag` with errors copied from the Sloan bands they derive
/// from, then `B`, `V`, `R`, `I` aliases of the `Bmag`..`Imag` columns.
pub fn apass_ri(cat: &mut Table) -> Result<(), PhotometryError> {
    let g = cat.float("g_mag")?.clone();
    let r = cat.float("r_mag")?.clone();
    let i = cat.float("i_mag")?.clone();
    let gr = g.sub(&r);

    let r_mag = r.zip_map(&gr, |r, c| r - 0.157 - 0.087 * c - 0.014 * c * c);
    let i_mag = i.zip_map(&gr, |i, c| i - 0.354 - 0.118 * c - 0.004 * c * c);

    cat.add_column("Rmag", Column::Float(r_mag))?;
    cat.add_column("e_Rmag", Column::Float(cat.float("e_r_mag")?.clone()))?;
    cat.add_column("Imag", Column::Float(i_mag))?;
    cat.add_column("e_Imag", Column::Float(cat.float("e_i_mag")?.clone()))?;

    // Copies of columns for convenience
    for band in ["B", "V", "R", "I"] {
        let source = cat.float(&format!("{band}mag"))?.clone();
        cat.add_column(band, Column::Float(source))?;
    }

    Ok(())
}
