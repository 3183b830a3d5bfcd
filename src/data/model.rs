use std::fmt;

use thiserror::Error;

// ---------------------------------------------------------------------------
// CellValue – a single cell in a table
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value mirroring common Pandas dtypes.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// A raw delimited-text field before column typing: empty → Null.
    pub fn raw(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Null
        } else {
            CellValue::Text(s.to_string())
        }
    }

    /// The text payload, if this cell is textual.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }

    /// Value written back out when exporting to CSV. Nulls become empty fields.
    pub fn to_field(&self) -> String {
        match self {
            CellValue::Null => String::new(),
            other => other.to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – ordered columns, rectangular rows
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum TableError {
    #[error("row {row} has {found} cells but the table has {expected} columns")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[error("column '{column}' has {found} values but the table has {expected} rows")]
    LengthMismatch {
        column: String,
        expected: usize,
        found: usize,
    },
}

/// A rectangular table: every row holds exactly `columns.len()` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub(super) columns: Vec<String>,
    pub(super) rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Build a table, rejecting any row whose width differs from the header.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Result<Self, TableError> {
        let expected = columns.len();
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != expected) {
            return Err(TableError::Ragged {
                row,
                expected,
                found: r.len(),
            });
        }
        Ok(Table {
            columns: normalize_headers(columns),
            rows,
        })
    }

    /// Build a table from records that may be short. Short rows are padded
    /// with [`CellValue::Null`]; rows wider than the header are an error.
    pub fn from_records(
        columns: Vec<String>,
        records: Vec<Vec<CellValue>>,
    ) -> Result<Self, TableError> {
        let expected = columns.len();
        let mut rows = Vec::with_capacity(records.len());
        for (row, mut record) in records.into_iter().enumerate() {
            if record.len() > expected {
                return Err(TableError::Ragged {
                    row,
                    expected,
                    found: record.len(),
                });
            }
            record.resize(expected, CellValue::Null);
            rows.push(record);
        }
        Self::new(columns, rows)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True for a header-only table.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Iterate over the cells of one column, top to bottom.
    pub fn column(&self, name: &str) -> Option<impl Iterator<Item = &CellValue> + '_> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |r| &r[idx]))
    }

    /// The first `n` rows as a new table (a preview).
    pub fn head(&self, n: usize) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Replace the column called `name`, or append it when absent.
    pub fn set_column(&mut self, name: &str, values: Vec<CellValue>) -> Result<(), TableError> {
        if values.len() != self.rows.len() {
            return Err(TableError::LengthMismatch {
                column: name.to_string(),
                expected: self.rows.len(),
                found: values.len(),
            });
        }
        match self.column_index(name) {
            Some(idx) => {
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row[idx] = value;
                }
            }
            None => {
                self.columns.push(name.to_string());
                for (row, value) in self.rows.iter_mut().zip(values) {
                    row.push(value);
                }
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Column typing
// ---------------------------------------------------------------------------

/// Dtype shared by every non-null cell of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColumnType {
    Integer,
    Float,
    Bool,
    Text,
}

fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

/// The narrowest type every value parses as; `Text` as soon as one does not.
fn infer_column_type<'a, I: Iterator<Item = &'a str> + Clone>(values: I) -> ColumnType {
    if values.clone().all(|v| v.parse::<i64>().is_ok()) {
        ColumnType::Integer
    } else if values.clone().all(|v| v.parse::<f64>().is_ok()) {
        ColumnType::Float
    } else if values.clone().all(|v| parse_bool(v).is_some()) {
        ColumnType::Bool
    } else {
        ColumnType::Text
    }
}

fn convert(cell: &CellValue, ty: ColumnType) -> CellValue {
    let Some(s) = cell.as_text() else {
        return cell.clone();
    };
    let typed = match ty {
        ColumnType::Integer => s.parse().ok().map(CellValue::Integer),
        ColumnType::Float => s.parse().ok().map(CellValue::Float),
        ColumnType::Bool => parse_bool(s).map(CellValue::Bool),
        ColumnType::Text => None,
    };
    typed.unwrap_or_else(|| cell.clone())
}

impl Table {
    /// Type each column as a whole, the way a data frame reader does: a
    /// column becomes Integer, Float or Bool only when every non-null cell
    /// parses as that type. Any other column keeps all its cells as text.
    pub fn infer_column_types(&mut self) {
        for idx in 0..self.columns.len() {
            let texts = self.rows.iter().filter_map(|r| r[idx].as_text());
            let ty = infer_column_type(texts);
            if ty == ColumnType::Text {
                continue;
            }
            for row in &mut self.rows {
                row[idx] = convert(&row[idx], ty);
            }
        }
    }
}

/// Blank headers become `Unnamed: <i>`; repeats get `.1`, `.2`, … suffixes.
fn normalize_headers(columns: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(columns.len());
    for (i, name) in columns.into_iter().enumerate() {
        let base = if name.trim().is_empty() {
            format!("Unnamed: {i}")
        } else {
            name
        };
        let mut candidate = base.clone();
        let mut n = 1;
        while out.contains(&candidate) {
            candidate = format!("{base}.{n}");
            n += 1;
        }
        out.push(candidate);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn raw_table(columns: &[&str], rows: &[&[&str]]) -> Table {
        let records = rows
            .iter()
            .map(|r| r.iter().map(|s| CellValue::raw(s)).collect())
            .collect();
        let mut t = Table::from_records(cols(columns), records).unwrap();
        t.infer_column_types();
        t
    }

    #[test]
    fn raw_fields_are_text_or_null() {
        assert_eq!(CellValue::raw(""), CellValue::Null);
        assert_eq!(CellValue::raw("42"), text("42"));
    }

    #[test]
    fn uniform_columns_get_a_dtype() {
        let t = raw_table(
            &["n", "x", "ok"],
            &[&["1", "4.5", "TRUE"], &["", "2", "false"], &["3", "", "True"]],
        );
        assert_eq!(
            t.rows()[0],
            vec![CellValue::Integer(1), CellValue::Float(4.5), CellValue::Bool(true)]
        );
        assert_eq!(
            t.rows()[1],
            vec![CellValue::Null, CellValue::Float(2.0), CellValue::Bool(false)]
        );
        assert_eq!(t.rows()[2][1], CellValue::Null);
    }

    #[test]
    fn mixed_columns_stay_text() {
        let t = raw_table(&["User", "Feedback"], &[&["A", "Great app"], &["B", "10"], &["C", "True"]]);
        let cells: Vec<_> = t.column("Feedback").unwrap().cloned().collect();
        assert_eq!(cells, vec![text("Great app"), text("10"), text("True")]);
    }

    #[test]
    fn all_null_column_stays_null() {
        let t = raw_table(&["a", "b"], &[&["x", ""], &["y", ""]]);
        assert!(t.column("b").unwrap().all(CellValue::is_null));
    }

    #[test]
    fn new_rejects_ragged_rows() {
        let err = Table::new(
            cols(&["a", "b"]),
            vec![vec![text("1"), text("2")], vec![text("3")]],
        )
        .unwrap_err();
        assert_eq!(
            err,
            TableError::Ragged {
                row: 1,
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn from_records_pads_short_rows() {
        let t = Table::from_records(cols(&["a", "b", "c"]), vec![vec![text("x")]]).unwrap();
        assert_eq!(t.rows()[0], vec![text("x"), CellValue::Null, CellValue::Null]);
    }

    #[test]
    fn from_records_rejects_long_rows() {
        let res = Table::from_records(cols(&["a"]), vec![vec![text("x"), text("y")]]);
        assert!(matches!(res, Err(TableError::Ragged { found: 2, .. })));
    }

    #[test]
    fn headers_are_normalized() {
        let t = Table::new(cols(&["id", "", "id", "id"]), vec![]).unwrap();
        assert_eq!(t.columns(), &["id", "Unnamed: 1", "id.1", "id.2"]);
    }

    #[test]
    fn set_column_appends_then_replaces() {
        let mut t = Table::new(cols(&["a", "b"]), vec![vec![text("1"), text("2")]]).unwrap();
        t.set_column("Sentiment", vec![text("Positive")]).unwrap();
        assert_eq!(t.num_columns(), 3);
        t.set_column("Sentiment", vec![text("Negative")]).unwrap();
        assert_eq!(t.num_columns(), 3);
        let cells: Vec<_> = t.column("Sentiment").unwrap().cloned().collect();
        assert_eq!(cells, vec![text("Negative")]);
    }

    #[test]
    fn set_column_checks_length() {
        let mut t = Table::new(cols(&["a", "b"]), vec![vec![text("1"), text("2")]]).unwrap();
        assert!(matches!(
            t.set_column("c", vec![]),
            Err(TableError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn head_truncates_rows() {
        let rows = (0..10).map(|i| vec![CellValue::Integer(i), CellValue::Null]).collect();
        let t = Table::new(cols(&["n", "x"]), rows).unwrap();
        assert_eq!(t.head(5).len(), 5);
        assert_eq!(t.head(50).len(), 10);
        assert!(!t.is_empty());
    }

    #[test]
    fn header_only_table_is_empty() {
        let t = Table::new(cols(&["a", "b"]), Vec::new()).unwrap();
        assert!(t.is_empty());
        assert_eq!(t.num_columns(), 2);
        assert!(t.head(5).is_empty());
    }
}
