//! Per-catalogue augmentation dispatch.

use log::debug;
use skytable::Table;

use crate::{apass, gaia, gaia_synthetic, ps1, skymapper, PhotometryError};

/// Apply the catalogue-specific photometric transform, if one exists.
///
/// `catalog` is the short catalogue name used by the descriptor registry.
/// Returns `true` when a transform ran, `false` for catalogues without one
/// (the table is left untouched). ATLAS-REFCAT2 shares the Pan-STARRS
/// transform since its magnitudes are on the same system.
pub fn augment(catalog: &str, cat: &mut Table) -> Result<bool, PhotometryError> {
    let applied = match catalog {
        "ps1" | "atlas" => {
            ps1::pan_starrs_bvri(cat)?;
            true
        }
        "gaiadr2" => {
            gaia::gaia_dr2_bvri(cat)?;
            true
        }
        "apass" => {
            apass::apass_ri(cat)?;
            true
        }
        "gaiadr3syn" => {
            gaia_synthetic::gaia_dr3_synthetic(cat)?;
            true
        }
        "skymapper" => {
            skymapper::skymapper_ps1(cat)?;
            true
        }
        _ => false,
    };

    if applied {
        debug!("Augmented {catalog} table with derived photometry");
    }
    Ok(applied)
}
