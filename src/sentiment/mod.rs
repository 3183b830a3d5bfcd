//! Sentiment layer: polarity scoring, labelling, and tallies.
//!
//! ```text
//!   cell value ──► classify ──► Label ──► SentimentCounts
//!                     │
//!                     ▼
//!             dyn PolarityScorer  (LexiconScorer by default)
//! ```

pub mod lexicon;

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::data::model::{CellValue, Table, TableError};

/// Name of the column written by [`annotate`].
pub const SENTIMENT_COLUMN: &str = "Sentiment";

// ---------------------------------------------------------------------------
// Scorer seam
// ---------------------------------------------------------------------------

/// Any backend that maps text to a polarity, conventionally in `[-1, 1]`.
pub trait PolarityScorer {
    fn score(&self, text: &str) -> f32;
}

// ---------------------------------------------------------------------------
// Label
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Label {
    Positive,
    Neutral,
    Negative,
}

impl Label {
    /// Display order for metrics and charts.
    pub const ALL: [Label; 3] = [Label::Positive, Label::Neutral, Label::Negative];

    /// Threshold a polarity at zero. NaN is treated as no signal.
    pub fn from_polarity(score: f32) -> Self {
        if score > 0.0 {
            Label::Positive
        } else if score < 0.0 {
            Label::Negative
        } else {
            Label::Neutral
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Label::Positive => "Positive",
            Label::Neutral => "Neutral",
            Label::Negative => "Negative",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Label one cell. Non-text cells are Neutral and never reach the scorer.
pub fn classify<S: PolarityScorer + ?Sized>(scorer: &S, value: &CellValue) -> Label {
    match value.as_text() {
        Some(text) => Label::from_polarity(scorer.score(text)),
        None => Label::Neutral,
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum SentimentError {
    #[error("no column named '{0}'")]
    UnknownColumn(String),
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Label every cell of `column`, top to bottom.
pub fn classify_column<S: PolarityScorer + ?Sized>(
    scorer: &S,
    table: &Table,
    column: &str,
) -> Result<Vec<Label>, SentimentError> {
    let cells = table
        .column(column)
        .ok_or_else(|| SentimentError::UnknownColumn(column.to_string()))?;
    Ok(cells.map(|cell| classify(scorer, cell)).collect())
}

/// Per-label tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SentimentCounts {
    pub positive: usize,
    pub neutral: usize,
    pub negative: usize,
}

impl SentimentCounts {
    pub fn from_labels<'a, I: IntoIterator<Item = &'a Label>>(labels: I) -> Self {
        let mut counts = Self::default();
        for label in labels {
            match label {
                Label::Positive => counts.positive += 1,
                Label::Neutral => counts.neutral += 1,
                Label::Negative => counts.negative += 1,
            }
        }
        counts
    }

    pub fn get(&self, label: Label) -> usize {
        match label {
            Label::Positive => self.positive,
            Label::Neutral => self.neutral,
            Label::Negative => self.negative,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.neutral + self.negative
    }
}

/// The result of running the classifier over one column.
#[derive(Debug, Clone)]
pub struct Analysis {
    /// Source column that was classified.
    pub text_column: String,
    /// Input table plus the [`SENTIMENT_COLUMN`].
    pub table: Table,
    pub labels: Vec<Label>,
    pub counts: SentimentCounts,
}

/// Classify `column` and write the labels into a copy of `table` under
/// [`SENTIMENT_COLUMN`], replacing any earlier run.
pub fn annotate<S: PolarityScorer + ?Sized>(
    scorer: &S,
    table: &Table,
    column: &str,
) -> Result<Analysis, SentimentError> {
    let labels = classify_column(scorer, table, column)?;
    let counts = SentimentCounts::from_labels(&labels);

    let mut annotated = table.clone();
    annotated.set_column(
        SENTIMENT_COLUMN,
        labels
            .iter()
            .map(|l| CellValue::Text(l.to_string()))
            .collect(),
    )?;

    log::info!(
        "Classified {} rows of '{column}': {} positive, {} neutral, {} negative",
        counts.total(),
        counts.positive,
        counts.neutral,
        counts.negative
    );

    Ok(Analysis {
        text_column: column.to_string(),
        table: annotated,
        labels,
        counts,
    })
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::lexicon::LexiconScorer;
    use super::*;
    use crate::data::demo::demo_table;

    /// Returns a fixed score and counts calls.
    struct FixedScorer {
        value: f32,
        calls: Cell<usize>,
    }

    impl FixedScorer {
        fn new(value: f32) -> Self {
            Self {
                value,
                calls: Cell::new(0),
            }
        }
    }

    impl PolarityScorer for FixedScorer {
        fn score(&self, _text: &str) -> f32 {
            self.calls.set(self.calls.get() + 1);
            self.value
        }
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn threshold_is_strict_at_zero() {
        assert_eq!(Label::from_polarity(0.01), Label::Positive);
        assert_eq!(Label::from_polarity(-0.01), Label::Negative);
        assert_eq!(Label::from_polarity(0.0), Label::Neutral);
        assert_eq!(Label::from_polarity(-0.0), Label::Neutral);
        assert_eq!(Label::from_polarity(f32::NAN), Label::Neutral);
    }

    #[test]
    fn non_text_is_neutral_without_scoring() {
        let scorer = FixedScorer::new(0.9);
        for cell in [
            CellValue::Null,
            CellValue::Integer(7),
            CellValue::Float(-2.5),
            CellValue::Bool(false),
        ] {
            assert_eq!(classify(&scorer, &cell), Label::Neutral);
        }
        assert_eq!(scorer.calls.get(), 0);
        assert_eq!(classify(&scorer, &text("anything")), Label::Positive);
        assert_eq!(scorer.calls.get(), 1);
    }

    #[test]
    fn default_scorer_examples() {
        let scorer = LexiconScorer::default();
        assert_eq!(classify(&scorer, &text("I love this")), Label::Positive);
        assert_eq!(classify(&scorer, &text("I hate this")), Label::Negative);
        assert_eq!(classify(&scorer, &text("It exists")), Label::Neutral);
    }

    #[test]
    fn demo_feedback_end_to_end() {
        let scorer = LexiconScorer::default();
        let analysis = annotate(&scorer, &demo_table(), "Feedback").unwrap();
        assert_eq!(
            analysis.labels,
            vec![
                Label::Positive,
                Label::Negative,
                Label::Positive,
                Label::Positive,
                Label::Negative,
            ]
        );
        assert_eq!(
            analysis.counts,
            SentimentCounts {
                positive: 3,
                neutral: 0,
                negative: 2
            }
        );
        assert_eq!(analysis.table.columns(), &["User", "Feedback", "Sentiment"]);
        assert_eq!(analysis.table.rows()[4][2], text("Negative"));
    }

    #[test]
    fn reannotating_is_idempotent() {
        let scorer = LexiconScorer::default();
        let first = annotate(&scorer, &demo_table(), "Feedback").unwrap();
        let second = annotate(&scorer, &first.table, "Feedback").unwrap();
        assert_eq!(first.labels, second.labels);
        assert_eq!(first.table, second.table);
    }

    #[test]
    fn classifying_the_user_column_is_neutral() {
        let scorer = LexiconScorer::default();
        let analysis = annotate(&scorer, &demo_table(), "User").unwrap();
        assert_eq!(analysis.counts.neutral, 5);
        assert_eq!(analysis.counts.total(), 5);
    }

    #[test]
    fn numeric_looking_feedback_is_still_scored() {
        let parsed =
            crate::data::ingest::parse_bytes(b"User,Feedback\nA,Great app\nB,10\nC,True\n").unwrap();
        let scorer = FixedScorer::new(0.5);
        let labels = classify_column(&scorer, &parsed.table, "Feedback").unwrap();
        assert_eq!(labels, vec![Label::Positive; 3]);
        assert_eq!(scorer.calls.get(), 3);
    }

    #[test]
    fn unknown_column_is_an_error() {
        let scorer = LexiconScorer::default();
        let err = classify_column(&scorer, &demo_table(), "Comments").unwrap_err();
        assert_eq!(err, SentimentError::UnknownColumn("Comments".to_string()));
    }

    #[test]
    fn trait_objects_are_substitutable() {
        let boxed: Box<dyn PolarityScorer> = Box::new(FixedScorer::new(-0.4));
        assert_eq!(classify(boxed.as_ref(), &text("great")), Label::Negative);
    }

    #[test]
    fn counts_lookup_by_label() {
        let counts = SentimentCounts::from_labels(&[Label::Negative, Label::Negative, Label::Neutral]);
        assert_eq!(counts.get(Label::Negative), 2);
        assert_eq!(counts.get(Label::Positive), 0);
        assert_eq!(counts.total(), 3);
    }
}
