use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, ArrayRef, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::ingest;
use super::model::{CellValue, Table};

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv` / `.tsv` / `.txt` – delimited text of unknown encoding and delimiter
/// * `.json`    – `[{ "User": "...", "Feedback": "..." }, ...]`
/// * `.parquet` – flat columns of strings, integers, floats or booleans
pub fn load_file(path: &Path) -> Result<Table> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" | "tsv" | "txt" => load_delimited(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// Delimited text loader
// ---------------------------------------------------------------------------

/// The open file is handed straight to the ingestion search, which rewinds
/// it before every (encoding, delimiter) attempt.
fn load_delimited(path: &Path) -> Result<Table> {
    let mut file = std::fs::File::open(path).context("opening delimited text file")?;
    let parsed = ingest::parse(&mut file)
        .with_context(|| format!("parsing {}", path.display()))?;
    log::info!("{} read as {}", path.display(), parsed.attempt);
    Ok(parsed.table)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "User": "Amit", "Feedback": "This app is amazing and very helpful!" },
///   ...
/// ]
/// ```
///
/// Columns appear in first-seen order; a key missing from a record is Null.
fn load_json(path: &Path) -> Result<Table> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut columns: Vec<String> = Vec::new();
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        for key in obj.keys() {
            if !columns.contains(key) {
                columns.push(key.clone());
            }
        }
    }

    let rows = records
        .iter()
        .filter_map(|rec| rec.as_object())
        .map(|obj| {
            columns
                .iter()
                .map(|col| obj.get(col).map(json_to_cell).unwrap_or(CellValue::Null))
                .collect()
        })
        .collect();

    Table::new(columns, rows).context("building table from JSON records")
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::Text(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::Text(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::Text(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file as a table.
///
/// Every top-level field becomes a column. Works with files written by both
/// **Pandas** (`df.to_parquet()`) and **Polars** (`df.write_parquet()`).
fn load_parquet(path: &Path) -> Result<Table> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let columns: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder.build().context("building parquet reader")?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        for row in 0..batch.num_rows() {
            rows.push(
                batch
                    .columns()
                    .iter()
                    .map(|col| extract_cell(col, row))
                    .collect(),
            );
        }
    }

    Table::new(columns, rows).context("building table from parquet batches")
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &ArrayRef, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    match col.data_type() {
        DataType::Utf8 => CellValue::Text(col.as_string::<i32>().value(row).to_string()),
        DataType::LargeUtf8 => CellValue::Text(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => CellValue::Integer(col.as_primitive::<Int32Type>().value(row) as i64),
        DataType::Int64 => CellValue::Integer(col.as_primitive::<Int64Type>().value(row)),
        DataType::Float32 => CellValue::Float(col.as_primitive::<Float32Type>().value(row) as f64),
        DataType::Float64 => CellValue::Float(col.as_primitive::<Float64Type>().value(row)),
        DataType::Boolean => CellValue::Bool(col.as_boolean().value(row)),
        other => CellValue::Text(format!("{other:?}")),
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;
    use std::sync::Arc;

    use arrow::array::{Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("rusty-sentiment-{}-{name}", std::process::id()))
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = load_file(Path::new("feedback.xlsx")).unwrap_err();
        assert!(err.to_string().contains(".xlsx"));
    }

    #[test]
    fn loads_semicolon_tsv_named_file() {
        let path = temp_path("semi.tsv");
        std::fs::write(&path, "User;Feedback;Stars\nAmit;Nice;5\n").unwrap();
        let table = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(table.columns(), &["User", "Feedback", "Stars"]);
        assert_eq!(table.rows()[0][2], CellValue::Integer(5));
    }

    #[test]
    fn unparsable_csv_carries_context() {
        let path = temp_path("blob.csv");
        std::fs::write(&path, "just one column\nof text\n").unwrap();
        let err = load_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        let msg = format!("{err:#}");
        assert!(msg.contains("parsing"));
        assert!(msg.contains("could not parse the file"));
    }

    #[test]
    fn loads_json_records_in_key_order() {
        let path = temp_path("records.json");
        std::fs::write(
            &path,
            r#"[{"User": "Amit", "Feedback": "Great"}, {"User": "Sara", "Score": 2.5}]"#,
        )
        .unwrap();
        let table = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(table.columns(), &["User", "Feedback", "Score"]);
        assert_eq!(table.rows()[0], vec![text("Amit"), text("Great"), CellValue::Null]);
        assert_eq!(table.rows()[1], vec![text("Sara"), CellValue::Null, CellValue::Float(2.5)]);
    }

    #[test]
    fn json_must_be_an_array_of_objects() {
        let path = temp_path("bad.json");
        std::fs::write(&path, r#"[1, 2]"#).unwrap();
        let err = load_file(&path).unwrap_err();
        std::fs::remove_file(&path).ok();
        assert!(err.to_string().contains("Row 0 is not a JSON object"));
    }

    #[test]
    fn loads_parquet_columns() {
        let path = temp_path("table.parquet");
        let schema = Arc::new(Schema::new(vec![
            Field::new("User", DataType::Utf8, false),
            Field::new("Feedback", DataType::Utf8, true),
            Field::new("Visits", DataType::Int64, false),
        ]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec!["Amit", "Sara"])),
                Arc::new(StringArray::from(vec![Some("Love it"), None])),
                Arc::new(Int64Array::from(vec![3, 9])),
            ],
        )
        .unwrap();
        let file = std::fs::File::create(&path).unwrap();
        let mut writer = ArrowWriter::try_new(file, schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let table = load_file(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(table.columns(), &["User", "Feedback", "Visits"]);
        assert_eq!(table.rows()[0], vec![text("Amit"), text("Love it"), CellValue::Integer(3)]);
        assert_eq!(table.rows()[1][1], CellValue::Null);
    }
}
