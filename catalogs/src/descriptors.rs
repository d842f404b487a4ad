//! Registry of well-known catalogue identifiers.
//!
//! Maps the short names used throughout the pipeline to VizieR identifiers,
//! display names, and the extra columns worth requesting beyond the VizieR
//! defaults. Anything not in the registry is treated as a raw VizieR
//! identifier.

use std::collections::HashMap;

use lazy_static::lazy_static;

/// Static description of a supported catalogue.
#[derive(Debug, Clone, Copy)]
pub struct CatalogDescriptor {
    /// VizieR catalogue identifier.
    pub vizier_id: &'static str,
    /// Human-readable catalogue name.
    pub name: &'static str,
    /// Extra columns to request beyond the defaults.
    pub extra: &'static [&'static str],
}

lazy_static! {
    /// Short name to descriptor map for the catalogues with dedicated support.
    pub static ref CATALOGS: HashMap<&'static str, CatalogDescriptor> = {
        let mut m = HashMap::new();
        m.insert("ps1", CatalogDescriptor {
            vizier_id: "II/349/ps1",
            name: "PanSTARRS DR1",
            extra: &[],
        });
        m.insert("gaiadr2", CatalogDescriptor {
            vizier_id: "I/345/gaia2",
            name: "Gaia DR2",
            extra: &["E(BR/RP)"],
        });
        m.insert("gaiaedr3", CatalogDescriptor {
            vizier_id: "I/350/gaiaedr3",
            name: "Gaia EDR3",
            extra: &[],
        });
        m.insert("gaiadr3syn", CatalogDescriptor {
            vizier_id: "I/360/syntphot",
            name: "Gaia DR3 synthetic photometry",
            extra: &["**", "_RAJ2000", "_DEJ2000"],
        });
        m.insert("usnob1", CatalogDescriptor {
            vizier_id: "I/284/out",
            name: "USNO-B1",
            extra: &[],
        });
        m.insert("gsc", CatalogDescriptor {
            vizier_id: "I/271/out",
            name: "GSC 2.2",
            extra: &[],
        });
        m.insert("skymapper", CatalogDescriptor {
            vizier_id: "II/358/smss",
            name: "SkyMapper DR1.1",
            extra: &[],
        });
        m.insert("vsx", CatalogDescriptor {
            vizier_id: "B/vsx/vsx",
            name: "AAVSO VSX",
            extra: &[],
        });
        m.insert("apass", CatalogDescriptor {
            vizier_id: "II/336/apass9",
            name: "APASS DR9",
            extra: &[],
        });
        m.insert("sdss", CatalogDescriptor {
            vizier_id: "V/147/sdss12",
            name: "SDSS DR12",
            extra: &["_RAJ2000", "_DEJ2000"],
        });
        m.insert("atlas", CatalogDescriptor {
            vizier_id: "J/ApJ/867/105/refcat2",
            name: "ATLAS-REFCAT2",
            extra: &[
                "_RAJ2000", "_DEJ2000",
                "e_Gmag", "e_gmag", "e_rmag", "e_imag", "e_zmag", "e_Jmag", "e_Kmag",
            ],
        });
        m
    };
}

/// A selector resolved to its VizieR identity.
#[derive(Debug, Clone)]
pub struct ResolvedCatalog {
    /// Short name if the selector was one, otherwise the raw selector.
    pub short_name: String,
    pub vizier_id: String,
    pub name: String,
    pub extra: &'static [&'static str],
}

/// Resolve a catalogue selector (short name or VizieR identifier).
///
/// Unknown selectors are passed through as their own VizieR identifier and
/// display name, with no extra columns.
pub fn resolve(selector: &str) -> ResolvedCatalog {
    match CATALOGS.get(selector) {
        Some(desc) => ResolvedCatalog {
            short_name: selector.to_string(),
            vizier_id: desc.vizier_id.to_string(),
            name: desc.name.to_string(),
            extra: desc.extra,
        },
        None => ResolvedCatalog {
            short_name: selector.to_string(),
            vizier_id: selector.to_string(),
            name: selector.to_string(),
            extra: &[],
        },
    }
}
