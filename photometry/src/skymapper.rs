//! SkyMapper DR1.1 passband aliases.
//!
//! SkyMapper PSF magnitudes are close enough to the Pan-STARRS system for
//! calibration use; they are exposed under `*_PS1` names so downstream code
//! can address every catalogue uniformly.

use skytable::{Column, Table};

use crate::PhotometryError;

/// Copy the `uPSF`..`zPSF` magnitudes to `u_PS1`..`z_PS1`.
pub fn skymapper_ps1(cat: &mut Table) -> Result<(), PhotometryError> {
    for band in ["u", "g", "r", "i", "z"] {
        let source = cat.float(&format!("{band}PSF"))?.clone();
        cat.add_column(&format!("{band}_PS1"), Column::Float(source))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use skytable::MaskedColumn;

    #[test]
    fn test_psf_copies() {
        let mut cat = Table::new();
        for (k, band) in ["u", "g", "r", "i", "z"].iter().enumerate() {
            cat.add_column(
                &format!("{band}PSF"),
                Column::Float(MaskedColumn::from_values(vec![14.0 + k as f64])),
            )
            .unwrap();
        }

        skymapper_ps1(&mut cat).unwrap();
        for (k, band) in ["u", "g", "r", "i", "z"].iter().enumerate() {
            assert_relative_eq!(
                *cat.float(&format!("{band}_PS1")).unwrap().get(0).unwrap(),
                14.0 + k as f64
            );
        }
    }

    #[test]
    fn test_missing_band_is_error() {
        let mut cat = Table::new();
        cat.add_column("uPSF", Column::Float(MaskedColumn::from_values(vec![14.0])))
            .unwrap();
        assert!(skymapper_ps1(&mut cat).is_err());
    }
}
