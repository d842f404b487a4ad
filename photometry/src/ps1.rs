//! Pan-STARRS DR1 and ATLAS-REFCAT2 colour transformations.
//!
//! Both catalogues carry Pan-STARRS-like griz magnitudes, so they share one
//! transform: Johnson-Cousins B, V, R and I from cubic colour-term fits
//! against the Landolt and Stetson standard samples, plus SDSS griz via the
//! Tonry et al. (2012) quadratic colour terms.

use skytable::{Column, MaskedColumn, Table};

use crate::polynomial::polyval_column;
use crate::PhotometryError;

// Cubic fits on Landolt and Stetson standards. Each band uses a polynomial
// in g-r plus a polynomial in a second colour (r-i for BVR, i-z for I).
const P_B_GR: [f64; 4] = [
    0.10339527794499666,
    -0.492149523946056,
    1.2093816061394638,
    0.061925048331498395,
];
const P_B_RI: [f64; 4] = [
    -0.2571974580267897,
    0.9211495207523038,
    -0.8243222108864755,
    0.0619250483314976,
];
const P_V_GR: [f64; 4] = [
    -0.011452922062676726,
    -9.949308251868327e-05,
    -0.4650511584366353,
    -0.007076854914511554,
];
const P_V_RI: [f64; 4] = [
    0.012749150754020416,
    0.057554580469724864,
    -0.09019328095355343,
    -0.007076854914511329,
];
const P_R_GR: [f64; 4] = [
    0.004905242602502597,
    -0.046545625824660514,
    0.07830702317352654,
    -0.08438139204305026,
];
const P_R_RI: [f64; 4] = [
    -0.07782426914647306,
    0.14090289318728444,
    -0.3634922073369279,
    -0.08438139204305031,
];
const P_I_GR: [f64; 4] = [
    -0.02274814414922734,
    0.048462952908062046,
    -0.046965058282604985,
    -0.19478935830847588,
];
const P_I_IZ: [f64; 4] = [
    0.025124060889537177,
    -0.048672562735374666,
    -1.199591061144479,
    -0.1947893583084762,
];

/// Colour-index domain the BVRI fits are valid over.
const GR_RANGE: (f64, f64) = (-0.5, 2.5);
const RI_RANGE: (f64, f64) = (-0.5, 2.0);
const IZ_RANGE: (f64, f64) = (-0.5, 1.0);

/// Derive Johnson-Cousins BVRI and SDSS griz from Pan-STARRS griz columns.
///
/// Adds `B`, `V`, `R`, `I`, a `good` validity flag, and `g_SDSS`..`z_SDSS`.
/// `good` is true exactly when all three colour indices (g-r, r-i, i-z)
/// fall inside the fitted domain; rows with a missing input magnitude are
/// flagged false.
pub fn pan_starrs_bvri(cat: &mut Table) -> Result<(), PhotometryError> {
    let g = cat.float("gmag")?.clone();
    let r = cat.float("rmag")?.clone();
    let i = cat.float("imag")?.clone();
    let z = cat.float("zmag")?.clone();

    let gr = g.sub(&r);
    let ri = r.sub(&i);
    let iz = i.sub(&z);

    let b_mag = g.add(&polyval_column(&P_B_GR, &gr)).add(&polyval_column(&P_B_RI, &ri));
    let v_mag = g.add(&polyval_column(&P_V_GR, &gr)).add(&polyval_column(&P_V_RI, &ri));
    let r_mag = r.add(&polyval_column(&P_R_GR, &gr)).add(&polyval_column(&P_R_RI, &ri));
    let i_mag = i.add(&polyval_column(&P_I_GR, &gr)).add(&polyval_column(&P_I_IZ, &iz));

    cat.add_column("B", Column::Float(b_mag))?;
    cat.add_column("V", Column::Float(v_mag))?;
    cat.add_column("R", Column::Float(r_mag))?;
    cat.add_column("I", Column::Float(i_mag))?;

    cat.add_column("good", Column::Bool(validity_flag(&gr, &ri, &iz)))?;

    // Zero points and colour terms from Tonry et al. 2012 (arXiv:1203.0297)
    let g_sdss = g.zip_map(&gr, |g, c| g + 0.013 + 0.145 * c + 0.019 * c * c);
    let r_sdss = r.zip_map(&gr, |r, c| r - 0.001 + 0.004 * c + 0.007 * c * c);
    let i_sdss = i.zip_map(&gr, |i, c| i - 0.005 + 0.011 * c + 0.010 * c * c);

    cat.add_column("g_SDSS", Column::Float(g_sdss))?;
    cat.add_column("r_SDSS", Column::Float(r_sdss))?;
    cat.add_column("i_SDSS", Column::Float(i_sdss))?;
    cat.add_column("z_SDSS", Column::Float(z))?;

    Ok(())
}

fn validity_flag(
    gr: &MaskedColumn<f64>,
    ri: &MaskedColumn<f64>,
    iz: &MaskedColumn<f64>,
) -> MaskedColumn<bool> {
    let flags = (0..gr.len())
        .map(|row| {
            gr.in_open_range(row, GR_RANGE.0, GR_RANGE.1)
                && ri.in_open_range(row, RI_RANGE.0, RI_RANGE.1)
                && iz.in_open_range(row, IZ_RANGE.0, IZ_RANGE.1)
        })
        .collect();
    MaskedColumn::from_values(flags)
}
