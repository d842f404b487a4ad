//! Photometric augmentation of catalogue tables.
//!
//! Several well-known survey catalogues ship magnitudes in their own
//! passband systems only. This crate derives auxiliary magnitudes in other
//! systems (Johnson-Cousins BVRI, SDSS griz, Pan-STARRS griz) from the
//! native columns, using empirical polynomial colour-term fits. Each
//! supported catalogue has its own transform; all of them are closed-form,
//! deterministic, and operate on a table in place.
//!
//! The polynomial coefficients are calibration data fitted against standard
//! star samples (Landolt and Stetson standards, survey release papers) and
//! are applied exactly as fitted.

pub mod apass;
pub mod augment;
pub mod gaia;
pub mod gaia_synthetic;
pub mod polynomial;
pub mod ps1;
pub mod skymapper;

pub use augment::augment;
pub use polynomial::{mag_err_from_flux, polyval, polyval_column};

use thiserror::Error;

/// Errors raised while augmenting a catalogue table.
#[derive(Error, Debug)]
pub enum PhotometryError {
    /// A native magnitude column the transform needs is absent or has the
    /// wrong type.
    #[error(transparent)]
    Table(#[from] skytable::TableError),
}
