//! Parsers for the text formats the catalogue services return.
//!
//! VizieR speaks tab-separated text with `#` comment lines and a dashed
//! ruler under the column header; XMatch returns plain CSV. Both are
//! parsed into [`Table`]s with column types inferred per column: a column
//! whose every present cell parses as a float becomes a float column,
//! anything else stays a string column. Blank cells are masked.

use lazy_static::lazy_static;
use regex::Regex;
use skytable::{Column, MaskedColumn, Table};

use crate::error::{CatalogError, Result};

lazy_static! {
    /// Ruler line under a VizieR TSV header: dash runs separated by tabs.
    static ref TSV_RULER: Regex = Regex::new(r"^-+(\t-+)*$").unwrap();
}

/// Normalise a service column name to an identifier-safe form.
///
/// Any character outside `[A-Za-z0-9_]` becomes an underscore, so e.g. the
/// Gaia excess factor `E(BR/RP)` is addressed as `E_BR_RP_`.
pub fn sanitize_name(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect()
}

/// Build a table from header names and rows of optional cell text.
///
/// Every row must have one cell per column; missing cells are masked.
pub(crate) fn build_table(names: &[String], rows: &[Vec<Option<String>>]) -> Result<Table> {
    for row in rows {
        if row.len() != names.len() {
            return Err(CatalogError::Parse(format!(
                "row has {} cells, header has {} columns",
                row.len(),
                names.len()
            )));
        }
    }

    let mut table = Table::new();
    for (idx, name) in names.iter().enumerate() {
        let cells: Vec<Option<&str>> = rows.iter().map(|r| r[idx].as_deref()).collect();
        table.add_column(&sanitize_name(name), infer_column(&cells))?;
    }
    Ok(table)
}

/// Infer a typed column from raw cell text.
fn infer_column(cells: &[Option<&str>]) -> Column {
    let numeric = cells
        .iter()
        .flatten()
        .all(|cell| cell.trim().parse::<f64>().is_ok());

    if numeric {
        let mut col = MaskedColumn::from_values(Vec::new());
        for cell in cells {
            match cell {
                // Parse cannot fail after the check above; fall back to masked
                Some(text) => match text.trim().parse::<f64>() {
                    Ok(v) => col.push(v),
                    Err(_) => col.push_masked(),
                },
                None => col.push_masked(),
            }
        }
        Column::Float(col)
    } else {
        let mut col = MaskedColumn::from_values(Vec::new());
        for cell in cells {
            match cell {
                Some(text) => col.push(text.trim().to_string()),
                None => col.push_masked(),
            }
        }
        Column::Str(col)
    }
}

fn cell_of(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parse a VizieR `asu-tsv` response into its result tables.
///
/// A response may contain zero, one, or several tables; each is a header
/// line, an optional units line, a dashed ruler, and data rows. Comment
/// lines start with `#`; blank lines separate tables.
pub fn parse_vizier_tsv(body: &str) -> Result<Vec<Table>> {
    let mut tables = Vec::new();
    let mut section: Vec<&str> = Vec::new();

    for line in body.lines().chain(std::iter::once("")) {
        let trimmed = line.trim_end_matches(['\r', '\n']);
        if trimmed.starts_with('#') {
            continue;
        }
        if trimmed.trim().is_empty() {
            if let Some(table) = parse_tsv_section(&section)? {
                tables.push(table);
            }
            section.clear();
        } else {
            section.push(trimmed);
        }
    }

    Ok(tables)
}

/// Parse one header/ruler/data block; `None` for blocks without a ruler
/// (trailing free text in the response).
fn parse_tsv_section(lines: &[&str]) -> Result<Option<Table>> {
    let Some(ruler_idx) = lines.iter().position(|l| TSV_RULER.is_match(l)) else {
        return Ok(None);
    };
    if ruler_idx == 0 {
        return Err(CatalogError::Parse("ruler line without a header".into()));
    }

    let names: Vec<String> = lines[0].split('\t').map(|s| s.trim().to_string()).collect();
    let rows: Vec<Vec<Option<String>>> = lines[ruler_idx + 1..]
        .iter()
        .map(|line| line.split('\t').map(cell_of).collect())
        .collect();

    build_table(&names, &rows).map(Some)
}

/// Split one delimited record, honouring double-quoted fields.
pub(crate) fn split_record(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;

    for c in line.chars() {
        match c {
            '"' => quoted = !quoted,
            c if c == delimiter && !quoted => {
                fields.push(std::mem::take(&mut current));
            }
            c => current.push(c),
        }
    }
    fields.push(current);
    fields
}

/// Parse a CSV response (header plus data rows) into a table.
pub fn parse_csv(body: &str) -> Result<Table> {
    let mut lines = body.lines().filter(|l| !l.trim().is_empty());

    let Some(header) = lines.next() else {
        return Err(CatalogError::EmptyResponse);
    };
    let names: Vec<String> = split_record(header, ',')
        .into_iter()
        .map(|s| s.trim().to_string())
        .collect();

    let rows: Vec<Vec<Option<String>>> = lines
        .map(|line| split_record(line, ',').iter().map(|c| cell_of(c)).collect())
        .collect();

    build_table(&names, &rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rstest::rstest;

    const VIZIER_BODY: &str = "\
#\n\
#   VizieR Astronomical Server vizier.cds.unistra.fr\n\
#Column RAJ2000 (F10.6)\n\
RAJ2000\tDEJ2000\tgmag\tName\n\
deg\tdeg\tmag\t\n\
----------\t---------\t------\t-----\n\
10.684708\t41.268750\t14.32\tNGC224\n\
10.700000\t41.300000\t\tFaint\n";

    #[rstest]
    #[case("E(BR/RP)", "E_BR_RP_")]
    #[case("e_RAJ2000", "e_RAJ2000")]
    #[case(" gmag ", "gmag")]
    #[case("B-V", "B_V")]
    fn test_sanitize_name(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(sanitize_name(raw), expected);
    }

    #[test]
    fn test_parse_vizier_tsv() {
        let tables = parse_vizier_tsv(VIZIER_BODY).unwrap();
        assert_eq!(tables.len(), 1);

        let cat = &tables[0];
        assert_eq!(cat.len(), 2);
        assert_relative_eq!(*cat.float("RAJ2000").unwrap().get(0).unwrap(), 10.684708);
        assert_eq!(
            cat.string("Name").unwrap().get(0),
            Some(&"NGC224".to_string())
        );
        // Blank gmag cell in the second row is masked
        assert!(cat.float("gmag").unwrap().is_masked(1));
    }

    #[test]
    fn test_parse_vizier_tsv_multiple_tables() {
        let body = format!("{VIZIER_BODY}\n#Another\nid\tx\n--\t--\n1\t2.5\n");
        let tables = parse_vizier_tsv(&body).unwrap();
        assert_eq!(tables.len(), 2);
        assert_relative_eq!(*tables[1].float("x").unwrap().get(0).unwrap(), 2.5);
    }

    #[test]
    fn test_parse_vizier_tsv_empty() {
        let body = "#\n# No rows matched the query\n#\n";
        assert!(parse_vizier_tsv(body).unwrap().is_empty());
    }

    #[test]
    fn test_column_type_inference() {
        let tables = parse_vizier_tsv(VIZIER_BODY).unwrap();
        assert!(matches!(
            tables[0].column("gmag"),
            Some(Column::Float(_))
        ));
        assert!(matches!(tables[0].column("Name"), Some(Column::Str(_))));
    }

    #[test]
    fn test_split_record_quoted() {
        let fields = split_record("a,\"b,c\",d", ',');
        assert_eq!(fields, vec!["a", "b,c", "d"]);
    }

    #[test]
    fn test_parse_csv() {
        let body = "angDist,ra,dec,Name\n0.21,10.5,-3.25,\"Star, bright\"\n0.35,10.6,,Other\n";
        let cat = parse_csv(body).unwrap();
        assert_eq!(cat.len(), 2);
        assert_relative_eq!(*cat.float("angDist").unwrap().get(1).unwrap(), 0.35);
        assert!(cat.float("dec").unwrap().is_masked(1));
        assert_eq!(
            cat.string("Name").unwrap().get(0),
            Some(&"Star, bright".to_string())
        );
    }

    #[test]
    fn test_parse_csv_empty_is_error() {
        assert!(matches!(
            parse_csv("\n\n"),
            Err(CatalogError::EmptyResponse)
        ));
    }

    #[test]
    fn test_ragged_row_is_error() {
        let body = "a\tb\n--\t--\n1\t2\t3\n";
        assert!(matches!(
            parse_vizier_tsv(body),
            Err(CatalogError::Parse(_))
        ));
    }
}
