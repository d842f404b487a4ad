//! Bulk cross-matching through the CDS XMatch service.
//!
//! Uploads the object list as CSV and lets the service match it against
//! any VizieR catalogue within a maximum separation. The response is the
//! match table: one row per (object, catalogue source) pair within the
//! radius, carrying columns from both sides.

use log::debug;
use reqwest::blocking::multipart::{Form, Part};
use skytable::Table;

use crate::descriptors::resolve;
use crate::error::Result;
use crate::http;
use crate::parse::parse_csv;

/// Synchronous XMatch API endpoint.
pub const XMATCH_URL: &str = "http://cdsxmatch.u-strasbg.fr/xmatch/api/v1/sync";

/// Cross-match an object list against a VizieR catalogue.
///
/// `selector` is a registry short name or VizieR identifier; `sr_deg` is
/// the maximum separation in degrees; `col_ra`/`col_dec` name the
/// coordinate columns of `obj`. Service failures propagate as errors.
pub fn vizier_xmatch(
    obj: &Table,
    selector: &str,
    sr_deg: f64,
    col_ra: &str,
    col_dec: &str,
) -> Result<Table> {
    let resolved = resolve(selector);
    debug!(
        "XMatch: {} objects against vizier:{} within {} arcsec",
        obj.len(),
        resolved.vizier_id,
        sr_deg * 3600.0
    );

    let upload = Part::text(object_csv(obj))
        .file_name("objects.csv")
        .mime_str("text/csv")?;
    let form = Form::new()
        .text("request", "xmatch")
        .text("distMaxArcsec", format!("{}", sr_deg * 3600.0))
        .text("RESPONSEFORMAT", "csv")
        .text("colRA1", col_ra.to_string())
        .text("colDec1", col_dec.to_string())
        .text("cat2", format!("vizier:{}", resolved.vizier_id))
        .part("cat1", upload);

    let body = http::client()?
        .post(XMATCH_URL)
        .multipart(form)
        .send()?
        .error_for_status()?
        .text()?;

    parse_csv(&body)
}

/// Serialize a table as the CSV the XMatch upload expects.
///
/// Masked cells become empty fields; fields containing a delimiter or
/// quote are double-quoted.
fn object_csv(obj: &Table) -> String {
    let names: Vec<&str> = obj.column_names().collect();
    let mut out = String::new();
    out.push_str(&names.join(","));
    out.push('\n');

    for row in 0..obj.len() {
        let cells: Vec<String> = names
            .iter()
            .map(|name| quote_field(obj.cell_text(name, row).unwrap_or_default()))
            .collect();
        out.push_str(&cells.join(","));
        out.push('\n');
    }
    out
}

fn quote_field(field: String) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field
    }
}
