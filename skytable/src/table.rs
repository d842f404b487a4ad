//! Rectangular tables of named, masked columns.
//!
//! A [`Table`] holds the rows returned by one remote catalogue query:
//! ordered columns of floats, strings, or booleans, all with the same row
//! count, plus a small string metadata map (catalogue identifier, display
//! name). Derived photometric columns are added in place.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use thiserror::Error;

use crate::column::MaskedColumn;

/// Errors from table construction and access.
#[derive(Error, Debug)]
pub enum TableError {
    #[error("column {0:?} not found")]
    MissingColumn(String),

    #[error("column {0:?} is not a {1} column")]
    TypeMismatch(String, &'static str),

    #[error("column {name:?} has {got} rows but the table has {expected}")]
    LengthMismatch {
        name: String,
        got: usize,
        expected: usize,
    },

    #[error("cannot stack tables with different layouts: {0}")]
    SchemaMismatch(String),
}

/// A single named column of a table.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Float(MaskedColumn<f64>),
    Str(MaskedColumn<String>),
    Bool(MaskedColumn<bool>),
}

impl Column {
    pub fn len(&self) -> usize {
        match self {
            Column::Float(c) => c.len(),
            Column::Str(c) => c.len(),
            Column::Bool(c) => c.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn kind(&self) -> &'static str {
        match self {
            Column::Float(_) => "float",
            Column::Str(_) => "string",
            Column::Bool(_) => "bool",
        }
    }

    fn format_cell(&self, row: usize) -> String {
        match self {
            Column::Float(c) => c.get(row).map(|v| format!("{v}")).unwrap_or_default(),
            Column::Str(c) => c.get(row).cloned().unwrap_or_default(),
            Column::Bool(c) => c.get(row).map(|v| format!("{v}")).unwrap_or_default(),
        }
    }
}

/// An ordered collection of equally-long named columns.
#[derive(Debug, Clone, Default)]
pub struct Table {
    columns: Vec<(String, Column)>,
    meta: BTreeMap<String, String>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of rows (zero for a table with no columns).
    pub fn len(&self) -> usize {
        self.columns.first().map(|(_, c)| c.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|(n, _)| n == name)
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, c)| c)
    }

    /// Add a column, replacing any existing column with the same name.
    ///
    /// The length must match the table's row count unless the table has no
    /// columns yet.
    pub fn add_column(&mut self, name: &str, column: Column) -> Result<(), TableError> {
        if !self.columns.is_empty() && column.len() != self.len() {
            return Err(TableError::LengthMismatch {
                name: name.to_string(),
                got: column.len(),
                expected: self.len(),
            });
        }

        if let Some(slot) = self.columns.iter_mut().find(|(n, _)| n == name) {
            slot.1 = column;
        } else {
            self.columns.push((name.to_string(), column));
        }
        Ok(())
    }

    /// Borrow a float column.
    pub fn float(&self, name: &str) -> Result<&MaskedColumn<f64>, TableError> {
        match self.column(name) {
            Some(Column::Float(c)) => Ok(c),
            Some(_) => Err(TableError::TypeMismatch(name.to_string(), "float")),
            None => Err(TableError::MissingColumn(name.to_string())),
        }
    }

    /// Mutably borrow a float column.
    pub fn float_mut(&mut self, name: &str) -> Result<&mut MaskedColumn<f64>, TableError> {
        match self.column_mut(name) {
            Some(Column::Float(c)) => Ok(c),
            Some(_) => Err(TableError::TypeMismatch(name.to_string(), "float")),
            None => Err(TableError::MissingColumn(name.to_string())),
        }
    }

    /// Borrow a string column.
    pub fn string(&self, name: &str) -> Result<&MaskedColumn<String>, TableError> {
        match self.column(name) {
            Some(Column::Str(c)) => Ok(c),
            Some(_) => Err(TableError::TypeMismatch(name.to_string(), "string")),
            None => Err(TableError::MissingColumn(name.to_string())),
        }
    }

    /// Rename a column in place, keeping its position.
    pub fn rename_column(&mut self, from: &str, to: &str) -> Result<(), TableError> {
        match self.columns.iter_mut().find(|(n, _)| n == from) {
            Some(slot) => {
                slot.0 = to.to_string();
                Ok(())
            }
            None => Err(TableError::MissingColumn(from.to_string())),
        }
    }

    pub fn meta(&self, key: &str) -> Option<&str> {
        self.meta.get(key).map(|s| s.as_str())
    }

    pub fn set_meta(&mut self, key: &str, value: &str) {
        self.meta.insert(key.to_string(), value.to_string());
    }

    /// Stack tables with identical column layouts into one.
    ///
    /// An exact join: every table must have the same column names, order,
    /// and types. Metadata is taken from the first table; conflicts in the
    /// others are ignored. An empty input slice gives an empty table.
    pub fn vstack(tables: &[Table]) -> Result<Table, TableError> {
        let Some(first) = tables.first() else {
            return Ok(Table::new());
        };

        let mut out = first.clone();
        for table in &tables[1..] {
            if table.n_columns() != out.n_columns() {
                return Err(TableError::SchemaMismatch(format!(
                    "{} columns vs {}",
                    table.n_columns(),
                    out.n_columns()
                )));
            }
            for ((name, col), (other_name, other_col)) in
                out.columns.iter_mut().zip(table.columns.iter())
            {
                if name != other_name {
                    return Err(TableError::SchemaMismatch(format!(
                        "column {name:?} vs {other_name:?}"
                    )));
                }
                match (col, other_col) {
                    (Column::Float(a), Column::Float(b)) => a.extend_from(b),
                    (Column::Str(a), Column::Str(b)) => a.extend_from(b),
                    (Column::Bool(a), Column::Bool(b)) => a.extend_from(b),
                    (a, b) => {
                        return Err(TableError::SchemaMismatch(format!(
                            "column {name:?}: {} vs {}",
                            a.kind(),
                            b.kind()
                        )))
                    }
                }
            }
        }
        Ok(out)
    }

    /// Text form of one cell, or `None` when the cell is masked or the
    /// column does not exist. Used by plain-text serializers.
    pub fn cell_text(&self, name: &str, row: usize) -> Option<String> {
        let column = self.column(name)?;
        match column {
            Column::Float(c) => c.get(row).map(|v| format!("{v}")),
            Column::Str(c) => c.get(row).cloned(),
            Column::Bool(c) => c.get(row).map(|v| format!("{v}")),
        }
    }

    /// Render the table as tab-separated text with a header row.
    ///
    /// Masked cells render as empty fields.
    pub fn to_tsv(&self) -> String {
        let mut out = String::new();
        let names: Vec<&str> = self.column_names().collect();
        let _ = writeln!(out, "{}", names.join("\t"));
        for row in 0..self.len() {
            let cells: Vec<String> = self
                .columns
                .iter()
                .map(|(_, c)| c.format_cell(row))
                .collect();
            let _ = writeln!(out, "{}", cells.join("\t"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample_table() -> Table {
        let mut t = Table::new();
        t.add_column(
            "ra",
            Column::Float(MaskedColumn::from_values(vec![10.0, 20.0])),
        )
        .unwrap();
        t.add_column(
            "name",
            Column::Str(MaskedColumn::from_values(vec![
                "alpha".to_string(),
                "beta".to_string(),
            ])),
        )
        .unwrap();
        t
    }

    #[test]
    fn test_add_and_access() {
        let t = sample_table();
        assert_eq!(t.len(), 2);
        assert_eq!(t.n_columns(), 2);
        assert!(t.has_column("ra"));
        assert_relative_eq!(*t.float("ra").unwrap().get(0).unwrap(), 10.0);
        assert_eq!(t.string("name").unwrap().get(1), Some(&"beta".to_string()));
    }

    #[test]
    fn test_length_check() {
        let mut t = sample_table();
        let short = Column::Float(MaskedColumn::from_values(vec![1.0]));
        assert!(matches!(
            t.add_column("bad", short),
            Err(TableError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_replace_keeps_position() {
        let mut t = sample_table();
        t.add_column(
            "ra",
            Column::Float(MaskedColumn::from_values(vec![1.0, 2.0])),
        )
        .unwrap();
        let names: Vec<&str> = t.column_names().collect();
        assert_eq!(names, vec!["ra", "name"]);
        assert_relative_eq!(*t.float("ra").unwrap().get(0).unwrap(), 1.0);
    }

    #[test]
    fn test_type_and_missing_errors() {
        let t = sample_table();
        assert!(matches!(
            t.float("name"),
            Err(TableError::TypeMismatch(_, "float"))
        ));
        assert!(matches!(
            t.float("nope"),
            Err(TableError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_mutable_access() {
        let mut t = sample_table();

        t.float_mut("ra").unwrap().set(0, 99.0);
        assert_relative_eq!(*t.float("ra").unwrap().get(0).unwrap(), 99.0);

        match t.column_mut("name") {
            Some(Column::Str(c)) => c.set_masked(1),
            _ => panic!("expected the string column"),
        }
        assert!(t.string("name").unwrap().is_masked(1));

        assert!(matches!(
            t.float_mut("name"),
            Err(TableError::TypeMismatch(_, "float"))
        ));
        assert!(matches!(
            t.float_mut("gone"),
            Err(TableError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_rename() {
        let mut t = sample_table();
        t.rename_column("ra", "RAJ2000").unwrap();
        assert!(t.has_column("RAJ2000"));
        assert!(!t.has_column("ra"));
        assert!(t.rename_column("gone", "x").is_err());
    }

    #[test]
    fn test_meta() {
        let mut t = sample_table();
        t.set_meta("name", "PanSTARRS DR1");
        assert_eq!(t.meta("name"), Some("PanSTARRS DR1"));
        assert_eq!(t.meta("vizier_id"), None);
    }

    #[test]
    fn test_vstack_exact() {
        let a = sample_table();
        let b = sample_table();
        let stacked = Table::vstack(&[a, b]).unwrap();
        assert_eq!(stacked.len(), 4);
        assert_relative_eq!(*stacked.float("ra").unwrap().get(2).unwrap(), 10.0);
    }

    #[test]
    fn test_vstack_schema_mismatch() {
        let a = sample_table();
        let mut b = sample_table();
        b.rename_column("name", "id").unwrap();
        assert!(matches!(
            Table::vstack(&[a, b]),
            Err(TableError::SchemaMismatch(_))
        ));
    }

    #[test]
    fn test_vstack_empty() {
        let stacked = Table::vstack(&[]).unwrap();
        assert!(stacked.is_empty());
        assert_eq!(stacked.n_columns(), 0);
    }

    #[test]
    fn test_cell_text() {
        let mut t = sample_table();
        let mut col = MaskedColumn::from_values(vec![1.5, 2.5]);
        col.set_masked(1);
        t.add_column("mag", Column::Float(col)).unwrap();

        assert_eq!(t.cell_text("mag", 0), Some("1.5".to_string()));
        assert_eq!(t.cell_text("mag", 1), None);
        assert_eq!(t.cell_text("name", 0), Some("alpha".to_string()));
        assert_eq!(t.cell_text("absent", 0), None);
    }

    #[test]
    fn test_to_tsv_masks_as_blank() {
        let mut t = sample_table();
        let mut col = MaskedColumn::from_values(vec![1.5, 2.5]);
        col.set_masked(1);
        t.add_column("mag", Column::Float(col)).unwrap();

        let tsv = t.to_tsv();
        let lines: Vec<&str> = tsv.lines().collect();
        assert_eq!(lines[0], "ra\tname\tmag");
        assert_eq!(lines[1], "10\talpha\t1.5");
        assert_eq!(lines[2], "20\tbeta\t");
    }
}
