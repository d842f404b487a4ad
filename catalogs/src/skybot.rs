//! Solar-system object identification via the SkyBoT service.
//!
//! SkyBoT returns the known solar-system objects crossing a cone on the
//! sky at a given epoch. The cone is sized to cover the whole object list
//! plus the match tolerance; matching against the input objects then
//! happens locally, and matched ephemeris rows are annotated with the
//! identifier of their nearest input object.

use chrono::{DateTime, SecondsFormat, Utc};
use log::debug;
use skytable::sphere::{field_center, spherical_match};
use skytable::{Column, MaskedColumn, Table};
use url::Url;

use crate::error::{CatalogError, Result};
use crate::http;
use crate::parse::build_table;

/// SkyBoT cone-search endpoint.
pub const SKYBOT_URL: &str =
    "https://vo.imcce.fr/webservices/skybot/skybotconesearch_query.php";

/// Cross-match an object list against solar-system object ephemerides.
///
/// Queries a cone covering the full extent of `obj` plus `2 * sr_deg` at
/// `epoch`, then matches the returned positions against the objects within
/// `sr_deg`. The result table gains a `col_id` column carrying, for each
/// matched ephemeris row, the identifier of its nearest input object;
/// unmatched rows stay masked.
///
/// Network failures, malformed responses, and empty cones are all mapped
/// to `Ok(None)` so transient ephemeris-service trouble never aborts a
/// pipeline run. Problems with the input table itself are errors.
pub fn skybot_match(
    obj: &Table,
    sr_deg: f64,
    epoch: DateTime<Utc>,
    col_ra: &str,
    col_dec: &str,
    col_id: &str,
) -> Result<Option<Table>> {
    let ra = obj.float(col_ra)?;
    let dec = obj.float(col_dec)?;

    let mut ras = Vec::new();
    let mut decs = Vec::new();
    for i in 0..ra.len() {
        if let (Some(&r), Some(&d)) = (ra.get(i), dec.get(i)) {
            ras.push(r);
            decs.push(d);
        }
    }
    let Some((ra0, dec0, sr0)) = field_center(&ras, &decs) else {
        debug!("SkyBoT: no usable object positions");
        return Ok(None);
    };

    let mut xcat = match cone_search(ra0, dec0, sr0 + 2.0 * sr_deg, epoch) {
        Ok(table) => table,
        Err(err) if is_transient(&err) => {
            debug!("SkyBoT query yielded nothing: {err}");
            return Ok(None);
        }
        Err(err) => return Err(err),
    };

    annotate_matches(obj, &mut xcat, sr_deg, col_ra, col_dec, col_id)?;
    Ok(Some(xcat))
}

/// Failures that mean "no ephemerides available", not a caller bug.
fn is_transient(err: &CatalogError) -> bool {
    matches!(
        err,
        CatalogError::Http(_)
            | CatalogError::Io(_)
            | CatalogError::Parse(_)
            | CatalogError::EmptyResponse
    )
}

/// Query SkyBoT for all solar-system objects in a cone at an epoch.
pub fn cone_search(ra0: f64, dec0: f64, sr0: f64, epoch: DateTime<Utc>) -> Result<Table> {
    let mut url = Url::parse(SKYBOT_URL)?;
    url.query_pairs_mut()
        .append_pair("-ra", &format!("{ra0}"))
        .append_pair("-dec", &format!("{dec0}"))
        .append_pair("-rd", &format!("{sr0}"))
        .append_pair("-ep", &epoch.to_rfc3339_opts(SecondsFormat::Secs, true))
        .append_pair("-mime", "text")
        .append_pair("-output", "object")
        .append_pair("-loc", "500");

    debug!("SkyBoT cone: {ra0} {dec0} radius {sr0} at {epoch}");
    let body = http::client()?
        .get(url)
        .send()?
        .error_for_status()?
        .text()?;
    parse_skybot_text(&body)
}

/// Parse the `-mime=text` pipe-separated SkyBoT response.
///
/// Sexagesimal `RA(h)`/`DE(deg)` columns are converted to decimal degrees
/// and exposed as `RA`/`DEC`.
pub(crate) fn parse_skybot_text(body: &str) -> Result<Table> {
    let mut names: Option<Vec<String>> = None;
    let mut rows: Vec<Vec<Option<String>>> = Vec::new();

    for line in body.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(comment) = trimmed.strip_prefix('#') {
            if comment.contains('|') {
                names = Some(
                    comment
                        .split('|')
                        .map(|s| s.trim().to_string())
                        .collect(),
                );
            }
            continue;
        }
        if trimmed.contains('|') {
            rows.push(
                trimmed
                    .split('|')
                    .map(|cell| {
                        let cell = cell.trim();
                        (!cell.is_empty()).then(|| cell.to_string())
                    })
                    .collect(),
            );
        }
    }

    let mut names = names.ok_or(CatalogError::EmptyResponse)?;
    if rows.is_empty() {
        return Err(CatalogError::EmptyResponse);
    }

    let ra_idx = names.iter().position(|n| n.starts_with("RA"));
    let de_idx = names.iter().position(|n| n.starts_with("DE"));
    let (Some(ra_idx), Some(de_idx)) = (ra_idx, de_idx) else {
        return Err(CatalogError::Parse("no coordinate columns".into()));
    };
    names[ra_idx] = "RA".to_string();
    names[de_idx] = "DEC".to_string();

    for row in &mut rows {
        convert_cell(row, ra_idx, hours_to_degrees)?;
        convert_cell(row, de_idx, dms_to_degrees)?;
    }

    build_table(&names, &rows)
}

fn convert_cell(
    row: &mut [Option<String>],
    idx: usize,
    convert: fn(&str) -> Option<f64>,
) -> Result<()> {
    if let Some(text) = &row[idx] {
        let value = convert(text)
            .ok_or_else(|| CatalogError::Parse(format!("bad coordinate {text:?}")))?;
        row[idx] = Some(format!("{value:.9}"));
    }
    Ok(())
}

/// Sexagesimal hours ("10 30 15.12") to degrees.
fn hours_to_degrees(text: &str) -> Option<f64> {
    sexagesimal(text).map(|v| v * 15.0)
}

/// Signed sexagesimal degrees ("+20 15 30.1") to degrees.
fn dms_to_degrees(text: &str) -> Option<f64> {
    sexagesimal(text)
}

fn sexagesimal(text: &str) -> Option<f64> {
    let mut parts = text.split_whitespace();
    let lead = parts.next()?;
    let negative = lead.starts_with('-');
    let first: f64 = lead.trim_start_matches(['+', '-']).parse().ok()?;
    let minutes: f64 = match parts.next() {
        Some(p) => p.parse().ok()?,
        None => 0.0,
    };
    let seconds: f64 = match parts.next() {
        Some(p) => p.parse().ok()?,
        None => 0.0,
    };
    if parts.next().is_some() {
        return None;
    }
    let value = first + minutes / 60.0 + seconds / 3600.0;
    Some(if negative { -value } else { value })
}

/// Add a `col_id` column to `xcat` carrying the identifier of the nearest
/// input object within `sr_deg` for every matched row.
pub(crate) fn annotate_matches(
    obj: &Table,
    xcat: &mut Table,
    sr_deg: f64,
    col_ra: &str,
    col_dec: &str,
    col_id: &str,
) -> Result<()> {
    let pairs = spherical_match(
        obj.float(col_ra)?,
        obj.float(col_dec)?,
        xcat.float("RA")?,
        xcat.float("DEC")?,
        sr_deg,
    );
    debug!("SkyBoT: {} of {} ephemeris rows matched", pairs.len(), xcat.len());

    let source = obj
        .column(col_id)
        .ok_or_else(|| skytable::TableError::MissingColumn(col_id.to_string()))?;

    let annotated = match source {
        Column::Float(src) => {
            let mut out: MaskedColumn<f64> = MaskedColumn::masked(xcat.len());
            for pair in &pairs {
                if let Some(&v) = src.get(pair.first) {
                    out.set(pair.second, v);
                }
            }
            Column::Float(out)
        }
        Column::Str(src) => {
            let mut out: MaskedColumn<String> = MaskedColumn::masked(xcat.len());
            for pair in &pairs {
                if let Some(v) = src.get(pair.first) {
                    out.set(pair.second, v.clone());
                }
            }
            Column::Str(out)
        }
        Column::Bool(src) => {
            let mut out: MaskedColumn<bool> = MaskedColumn::masked(xcat.len());
            for pair in &pairs {
                if let Some(&v) = src.get(pair.first) {
                    out.set(pair.second, v);
                }
            }
            Column::Bool(out)
        }
    };

    xcat.add_column(col_id, annotated)?;
    Ok(())
}
