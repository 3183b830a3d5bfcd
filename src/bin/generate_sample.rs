use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use arrow::util::pretty::pretty_format_batches;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const OUTPUT_DIR: &str = "sample_data";
const ROWS: usize = 40;

const USERS: &[&str] = &[
    "Amit", "Sara", "John", "Meera", "Rahul", "René", "Zoë", "Ingrid", "José", "Priya",
];

const OPENINGS: &[&str] = &[
    "The new release",
    "Checkout",
    "Customer support",
    "The mobile app",
    "Search",
    "Delivery",
];

/// (phrase, expected leaning) – the leaning only documents intent.
const VERDICTS: &[(&str, &str)] = &[
    ("is amazing and very helpful", "positive"),
    ("works great, I love it", "positive"),
    ("is fast and easy to use", "positive"),
    ("is okay, but could be better", "positive"),
    ("is not bad at all", "positive"),
    ("exists", "neutral"),
    ("was updated on Tuesday", "neutral"),
    ("is terrible and keeps crashing", "negative"),
    ("is very slow", "negative"),
    ("was the worst, very disappointed", "negative"),
    ("is not good", "negative"),
];

#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct FeedbackRow {
    id: i64,
    user: String,
    feedback: String,
    #[serde(skip)]
    leaning: &'static str,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn generate_rows(rng: &mut SimpleRng, n: usize) -> Vec<FeedbackRow> {
    (0..n)
        .map(|i| {
            let user = rng.pick(USERS);
            let opening = rng.pick(OPENINGS);
            let &(verdict, leaning) = rng.pick(VERDICTS);
            FeedbackRow {
                id: i as i64 + 1,
                user: user.to_string(),
                feedback: format!("{opening} {verdict}."),
                leaning,
            }
        })
        .collect()
}

/// Delimited text as UTF-8, header first.
fn to_delimited(rows: &[FeedbackRow], delimiter: u8) -> Result<String> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(delimiter)
        .from_writer(Vec::new());
    for row in rows {
        wtr.serialize(row).context("serializing row")?;
    }
    let bytes = wtr.into_inner().context("flushing CSV buffer")?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

fn utf16le_with_bom(text: &str) -> Vec<u8> {
    let mut out = vec![0xFF, 0xFE];
    for unit in text.encode_utf16() {
        out.extend_from_slice(&unit.to_le_bytes());
    }
    out
}

fn write_file(dir: &Path, name: &str, bytes: &[u8]) -> Result<()> {
    let path = dir.join(name);
    std::fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn to_record_batch(rows: &[FeedbackRow]) -> Result<RecordBatch> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Id", DataType::Int64, false),
        Field::new("User", DataType::Utf8, false),
        Field::new("Feedback", DataType::Utf8, false),
    ]));
    RecordBatch::try_new(
        schema,
        vec![
            Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.id))),
            Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.user.as_str()))),
            Arc::new(StringArray::from_iter_values(
                rows.iter().map(|r| r.feedback.as_str()),
            )),
        ],
    )
    .context("building record batch")
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(&mut rng, ROWS);

    let dir = Path::new(OUTPUT_DIR);
    std::fs::create_dir_all(dir).context("creating output directory")?;

    // One file per ingestion path: each should be picked up by a different
    // (encoding, delimiter) attempt.
    write_file(dir, "feedback_utf8_comma.csv", to_delimited(&rows, b',')?.as_bytes())?;
    write_file(dir, "feedback_utf8_tab.tsv", to_delimited(&rows, b'\t')?.as_bytes())?;
    write_file(
        dir,
        "feedback_utf16_tab.tsv",
        &utf16le_with_bom(&to_delimited(&rows, b'\t')?),
    )?;
    write_file(
        dir,
        "feedback_latin1_semicolon.csv",
        &encoding_rs::mem::encode_latin1_lossy(&to_delimited(&rows, b';')?),
    )?;

    let json = serde_json::to_string_pretty(&rows).context("serializing JSON")?;
    write_file(dir, "feedback.json", json.as_bytes())?;

    let batch = to_record_batch(&rows)?;
    let parquet_path = dir.join("feedback.parquet");
    let file = std::fs::File::create(&parquet_path).context("creating parquet file")?;
    let mut writer =
        ArrowWriter::try_new(file, batch.schema(), None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    println!("Wrote {}", parquet_path.display());

    let preview = pretty_format_batches(&[batch.slice(0, batch.num_rows().min(5))])
        .context("formatting preview")?;
    println!("{preview}");

    let mut leanings: Vec<(&str, usize)> = Vec::new();
    for row in &rows {
        match leanings.iter_mut().find(|(l, _)| *l == row.leaning) {
            Some((_, n)) => *n += 1,
            None => leanings.push((row.leaning, 1)),
        }
    }
    println!("Generated {} rows, intended leanings: {leanings:?}", rows.len());
    Ok(())
}
