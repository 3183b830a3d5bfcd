use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::data::demo::demo_table;
use crate::data::model::Table;
use crate::sentiment::lexicon::LexiconScorer;
use crate::sentiment::{Analysis, annotate};

/// Rows shown in the data preview.
pub const PREVIEW_ROWS: usize = 5;

// ---------------------------------------------------------------------------
// Upload outcome
// ---------------------------------------------------------------------------

/// What happened to the most recent upload.
#[derive(Debug, Clone)]
pub enum Upload {
    None,
    Loaded { path: PathBuf, table: Table },
    Failed { path: PathBuf, message: String },
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub upload: Upload,

    /// "Use sample testing data" toggle. Ignored while a file is uploaded.
    pub use_demo: bool,

    /// Cached demo table, built on first use.
    demo: Option<Table>,

    /// Column whose text is classified.
    pub text_column: Option<String>,

    /// Latest classification result for the active table.
    pub analysis: Option<Analysis>,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,

    scorer: LexiconScorer,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            upload: Upload::None,
            use_demo: false,
            demo: None,
            text_column: None,
            analysis: None,
            status_message: None,
            scorer: LexiconScorer::default(),
        }
    }
}

impl AppState {
    /// The table currently on screen. An upload, successful or not, takes
    /// precedence over the demo toggle.
    pub fn active_table(&self) -> Option<&Table> {
        match &self.upload {
            Upload::Loaded { table, .. } => Some(table),
            Upload::Failed { .. } => None,
            Upload::None if self.use_demo => self.demo.as_ref(),
            Upload::None => None,
        }
    }

    /// Human-readable name of the active source.
    pub fn source_name(&self) -> Option<String> {
        match &self.upload {
            Upload::Loaded { path, .. } => Some(path.display().to_string()),
            Upload::None if self.use_demo => Some("sample testing data".to_string()),
            _ => None,
        }
    }

    /// Load `path` as the new upload.
    pub fn load_path(&mut self, path: &Path) {
        match crate::data::loader::load_file(path) {
            Ok(table) => {
                log::info!(
                    "Loaded {} rows with columns {:?}",
                    table.len(),
                    table.columns()
                );
                self.upload = Upload::Loaded {
                    path: path.to_path_buf(),
                    table,
                };
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                self.upload = Upload::Failed {
                    path: path.to_path_buf(),
                    message: format!("{e:#}"),
                };
                self.status_message = Some(
                    "Could not parse the file. Please ensure it is a valid CSV or TSV.".to_string(),
                );
            }
        }
        self.source_changed();
    }

    /// Forget the upload and fall back to the demo toggle.
    pub fn clear_upload(&mut self) {
        self.upload = Upload::None;
        self.status_message = None;
        self.source_changed();
    }

    /// Flip the demo toggle.
    pub fn set_use_demo(&mut self, use_demo: bool) {
        self.use_demo = use_demo;
        if use_demo && self.demo.is_none() {
            self.demo = Some(demo_table());
        }
        self.source_changed();
    }

    /// Pick the text column; a different choice discards the old result.
    pub fn set_text_column(&mut self, column: String) {
        if self.text_column.as_deref() != Some(column.as_str()) {
            self.text_column = Some(column);
            self.analysis = None;
        }
    }

    /// Classify the selected column of the active table.
    pub fn run_analysis(&mut self) {
        let (Some(table), Some(column)) = (self.active_table(), self.text_column.as_deref()) else {
            return;
        };
        match annotate(&self.scorer, table, column) {
            Ok(analysis) => {
                self.analysis = Some(analysis);
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Analysis failed: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Write the annotated table to `path` as UTF-8 CSV.
    pub fn export_analysis(&self, path: &Path) -> Result<()> {
        let analysis = self.analysis.as_ref().context("no analysis to export")?;
        let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
        writer
            .write_record(analysis.table.columns())
            .context("writing CSV header")?;
        for (i, row) in analysis.table.rows().iter().enumerate() {
            writer
                .write_record(row.iter().map(|c| c.to_field()))
                .with_context(|| format!("writing CSV row {i}"))?;
        }
        writer.flush().context("flushing CSV file")?;
        log::info!("Exported {} rows to {}", analysis.table.len(), path.display());
        Ok(())
    }

    /// A new source invalidates the column choice and any old result.
    fn source_changed(&mut self) {
        self.analysis = None;
        self.text_column = self
            .active_table()
            .and_then(|t| t.columns().first().cloned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sentiment::Label;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("rusty-sentiment-state-{}-{name}", std::process::id()))
    }

    #[test]
    fn nothing_is_active_by_default() {
        let state = AppState::default();
        assert!(state.active_table().is_none());
        assert!(state.source_name().is_none());
    }

    #[test]
    fn demo_toggle_supplies_sample_table() {
        let mut state = AppState::default();
        state.set_use_demo(true);
        assert_eq!(state.active_table().map(|t| t.len()), Some(5));
        assert_eq!(state.text_column.as_deref(), Some("User"));

        state.set_use_demo(false);
        assert!(state.active_table().is_none());
    }

    #[test]
    fn run_analysis_on_demo_feedback() {
        let mut state = AppState::default();
        state.set_use_demo(true);
        state.set_text_column("Feedback".to_string());
        state.run_analysis();
        let analysis = state.analysis.as_ref().unwrap();
        assert_eq!(analysis.counts.get(Label::Positive), 3);
        assert_eq!(analysis.counts.get(Label::Negative), 2);

        // Switching columns drops the stale result.
        state.set_text_column("User".to_string());
        assert!(state.analysis.is_none());
    }

    #[test]
    fn failed_upload_hides_demo_and_reports() {
        let path = temp_path("one-column.csv");
        std::fs::write(&path, "Feedback\nfine\n").unwrap();
        let mut state = AppState::default();
        state.set_use_demo(true);
        state.load_path(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(state.upload, Upload::Failed { .. }));
        assert!(state.active_table().is_none());
        assert!(state.status_message.is_some());

        state.clear_upload();
        assert_eq!(state.active_table().map(|t| t.len()), Some(5));
    }

    #[test]
    fn upload_takes_precedence_over_demo() {
        let path = temp_path("upload.csv");
        std::fs::write(&path, "Name,Comment\nAda,Great work\n").unwrap();
        let mut state = AppState::default();
        state.set_use_demo(true);
        state.load_path(&path);
        std::fs::remove_file(&path).ok();

        let table = state.active_table().unwrap();
        assert_eq!(table.columns(), &["Name", "Comment"]);
        assert_eq!(state.text_column.as_deref(), Some("Name"));
    }

    #[test]
    fn export_writes_sentiment_column() {
        let mut state = AppState::default();
        state.set_use_demo(true);
        state.set_text_column("Feedback".to_string());
        state.run_analysis();

        let path = temp_path("export.csv");
        state.export_analysis(&path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(written.starts_with("User,Feedback,Sentiment\n"));
        assert!(written.contains("Rahul,\"Worst service ever, very disappointed.\",Negative\n"));
    }

    #[test]
    fn export_without_analysis_fails() {
        let state = AppState::default();
        assert!(state.export_analysis(&temp_path("none.csv")).is_err());
    }
}
