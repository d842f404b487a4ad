//! In-memory tables for astronomical catalogue data.
//!
//! This crate provides the tabular data structures shared by the catalogue
//! retrieval and photometry crates: named columns of floats or strings with
//! per-row validity masks, plus the spherical geometry needed to locate a
//! field centre and cross-match source lists on the sky.
//!
//! Tables are short-lived: they hold the result of a single remote query
//! while derived columns are computed, and are never persisted.

pub mod column;
pub mod sphere;
pub mod table;

pub use column::MaskedColumn;
pub use table::{Column, Table, TableError};
