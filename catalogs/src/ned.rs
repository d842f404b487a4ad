//! Per-object identification against the NED database.
//!
//! NED only answers positional queries one at a time, so the object list
//! is worked through sequentially. Non-empty per-object results are
//! stamped with the originating object identifier and concatenated.

use log::debug;
use skytable::{Column, MaskedColumn, Table};

use crate::error::{CatalogError, Result};
use crate::http;
use crate::parse::{build_table, split_record};

/// NED object search endpoint (ascii bar-separated output).
pub const NED_URL: &str = "https://ned.ipac.caltech.edu/cgi-bin/objsearch";

/// Cross-match an object list against NED, one position at a time.
///
/// Each object gets a cone query of radius `sr_deg`; results are stamped
/// with an `id` column carrying the object's `col_id` value and stacked.
/// Objects with no NED counterpart contribute nothing; an overall empty
/// result is an empty table. Service failures propagate as errors.
pub fn ned_match(
    obj: &Table,
    sr_deg: f64,
    col_ra: &str,
    col_dec: &str,
    col_id: &str,
) -> Result<Table> {
    let ra = obj.float(col_ra)?;
    let dec = obj.float(col_dec)?;
    let client = http::client()?;

    let mut parts = Vec::new();
    for row in 0..obj.len() {
        let (Some(&r), Some(&d)) = (ra.get(row), dec.get(row)) else {
            continue;
        };

        let body = client
            .get(query_url(r, d, sr_deg))
            .send()?
            .error_for_status()?
            .text()?;

        if let Some(mut table) = parse_ned_ascii(&body)? {
            let stamp = id_column(obj, col_id, row, table.len())?;
            table.add_column("id", stamp)?;
            parts.push(table);
        }
    }

    debug!(
        "NED: {} of {} objects returned counterparts",
        parts.len(),
        obj.len()
    );
    Ok(Table::vstack(&parts)?)
}

/// Build the per-position query URL.
///
/// NED wants the search type verbatim ("Near Position Search"), degrees
/// suffixed with `d`, and the radius in arcminutes.
fn query_url(ra: f64, dec: f64, sr_deg: f64) -> String {
    format!(
        "{NED_URL}?search_type={}&in_csys=Equatorial&in_equinox=J2000.0&lon={}&lat={}&radius={}&of=ascii_bar",
        urlencoding::encode("Near Position Search"),
        urlencoding::encode(&format!("{ra}d")),
        urlencoding::encode(&format!("{dec:+}d")),
        sr_deg * 60.0,
    )
}

/// Parse an `ascii_bar` response; `None` when the position had no entries.
///
/// The payload is preamble text, then a bar-separated header line, then
/// one bar-separated line per object.
pub(crate) fn parse_ned_ascii(body: &str) -> Result<Option<Table>> {
    let mut names: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<Option<String>>> = Vec::new();

    for line in body.lines() {
        let trimmed = line.trim();
        if !trimmed.contains('|') {
            continue;
        }
        let cells: Vec<String> = split_record(trimmed, '|')
            .into_iter()
            .map(|c| c.trim().to_string())
            .collect();
        match &names {
            None => names = Some(cells),
            Some(header) => {
                if cells.len() != header.len() {
                    return Err(CatalogError::Parse(format!(
                        "NED row has {} fields, header has {}",
                        cells.len(),
                        header.len()
                    )));
                }
                rows.push(
                    cells
                        .into_iter()
                        .map(|c| (!c.is_empty()).then_some(c))
                        .collect(),
                );
            }
        }
    }

    match names {
        Some(names) if !rows.is_empty() => build_table(&names, &rows).map(Some),
        _ => Ok(None),
    }
}

/// A constant identifier column replicating `obj[col_id]` at `row`.
fn id_column(obj: &Table, col_id: &str, row: usize, len: usize) -> Result<Column> {
    let source = obj
        .column(col_id)
        .ok_or_else(|| skytable::TableError::MissingColumn(col_id.to_string()))?;

    let column = match source {
        Column::Float(c) => match c.get(row) {
            Some(&v) => Column::Float(MaskedColumn::from_values(vec![v; len])),
            None => Column::Float(MaskedColumn::masked(len)),
        },
        Column::Str(c) => match c.get(row) {
            Some(v) => Column::Str(MaskedColumn::from_values(vec![v.clone(); len])),
            None => Column::Str(MaskedColumn::masked(len)),
        },
        Column::Bool(c) => match c.get(row) {
            Some(&v) => Column::Bool(MaskedColumn::from_values(vec![v; len])),
            None => Column::Bool(MaskedColumn::masked(len)),
        },
    };
    Ok(column)
}
