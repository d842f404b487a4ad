//! Gaia DR3 synthetic photometry post-processing.
//!
//! The DR3 synthetic photometry catalogue publishes fluxes alongside
//! magnitudes in eleven passbands; magnitude errors are reconstructed from
//! the flux errors. Its ugriz magnitudes are in the Sloan system, so
//! Pan-STARRS griz are added via quadratic fits in g-r on the clean
//! Landolt sample of Tonry et al. (2012).

use skytable::{Column, Table};

use crate::polynomial::{mag_err_from_flux, polyval_column};
use crate::PhotometryError;

/// Passbands the synthetic photometry catalogue carries fluxes for.
const BANDS: [&str; 11] = ["U", "B", "V", "R", "I", "u", "g", "r", "i", "z", "y"];

const P_G: [f64; 3] = [
    -0.030414391501015867,
    -0.09960002492299584,
    -0.002910024005294562,
];
const P_R: [f64; 3] = [
    -0.009566553708653305,
    0.014924591443344211,
    -0.003928147919030857,
];
const P_I: [f64; 3] = [
    -0.010802807724098494,
    0.01124900218746879,
    0.01274293783734852,
];
const P_Z: [f64; 3] = [
    -0.0031896767661109523,
    0.06537983414287968,
    0.007695587806229381,
];

/// Add magnitude errors from fluxes and Pan-STARRS griz columns.
///
/// For every band X in UBVRI/ugrizy, derives `e_Xmag` from `FX`/`e_FX` via
/// the standard `2.5/ln(10) * σ_F/F` relation, then adds `g_ps1`..`z_ps1`
/// from the Sloan ugriz magnitudes.
pub fn gaia_dr3_synthetic(cat: &mut Table) -> Result<(), PhotometryError> {
    for band in BANDS {
        let flux = cat.float(&format!("F{band}"))?.clone();
        let err = cat.float(&format!("e_F{band}"))?;
        let mag_err = flux.zip_map(err, mag_err_from_flux);
        cat.add_column(&format!("e_{band}mag"), Column::Float(mag_err))?;
    }

    let g = cat.float("gmag")?.clone();
    let r = cat.float("rmag")?.clone();
    let i = cat.float("imag")?.clone();
    let z = cat.float("zmag")?.clone();
    let gr = g.sub(&r);

    cat.add_column("g_ps1", Column::Float(g.add(&polyval_column(&P_G, &gr))))?;
    cat.add_column("r_ps1", Column::Float(r.add(&polyval_column(&P_R, &gr))))?;
    cat.add_column("i_ps1", Column::Float(i.add(&polyval_column(&P_I, &gr))))?;
    cat.add_column("z_ps1", Column::Float(z.add(&polyval_column(&P_Z, &gr))))?;

    Ok(())
}
