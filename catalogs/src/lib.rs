//! Remote astronomical catalogue retrieval and cross-matching.
//!
//! This crate talks to the external services the calibration pipeline
//! depends on:
//!
//! - **VizieR** for downloading reference catalogues around a sky position,
//!   with derived photometry added for the well-known ones
//!   (see [`vizier::VizierClient`]),
//! - **CDS XMatch** for bulk cross-matching an object list against any
//!   VizieR catalogue ([`xmatch::vizier_xmatch`]),
//! - **SkyBoT** for identifying solar-system objects crossing the field at
//!   a given epoch ([`skybot::skybot_match`]),
//! - **NED** for per-object extragalactic identifications
//!   ([`ned::ned_match`]).
//!
//! All calls are synchronous and blocking; results are in-memory
//! [`skytable::Table`]s.

pub mod cache;
pub mod descriptors;
pub mod error;
pub mod http;
pub mod ned;
pub mod parse;
pub mod skybot;
pub mod vizier;
pub mod xmatch;

pub use descriptors::{resolve, CatalogDescriptor, CATALOGS};
pub use error::{CatalogError, Result};
pub use vizier::{QueryOptions, VizierClient};
