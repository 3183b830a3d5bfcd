use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::state::{AppState, PREVIEW_ROWS, Upload};
use crate::ui::{plot, table};

// ---------------------------------------------------------------------------
// Left side panel – data source controls
// ---------------------------------------------------------------------------

/// Render the left side panel: about blurb, upload and demo toggle.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("About this App");
    ui.label(
        "Classifies free-text feedback in CSV/TSV files as Positive, Neutral or \
         Negative using a word-polarity lexicon.",
    );
    ui.separator();

    ui.strong("Step 1: Get Data");
    ui.add_space(4.0);

    if ui.button("Upload CSV/TSV…").clicked() {
        open_file_dialog(state);
    }

    let uploaded_name = match &state.upload {
        Upload::Loaded { path, .. } | Upload::Failed { path, .. } => Some(
            path.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        ),
        Upload::None => None,
    };
    if let Some(name) = uploaded_name {
        ui.horizontal(|ui: &mut Ui| {
            ui.label(name);
            if ui.small_button("✕").on_hover_text("Remove upload").clicked() {
                state.clear_upload();
            }
        });
    }

    let mut use_demo = state.use_demo;
    if ui.checkbox(&mut use_demo, "Use Sample Testing Data").changed() {
        state.set_use_demo(use_demo);
    }
    if state.use_demo && matches!(state.upload, Upload::None) {
        ui.label(RichText::new("Loaded Sample Data").color(Color32::from_rgb(60, 160, 90)));
    }
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            let can_export = state.analysis.is_some();
            if ui
                .add_enabled(can_export, egui::Button::new("Save results…"))
                .clicked()
            {
                save_file_dialog(state);
                ui.close_menu();
            }
        });

        ui.separator();

        if let (Some(source), Some(table)) = (state.source_name(), state.active_table()) {
            ui.label(format!(
                "{source}: {} rows, {} columns",
                table.len(),
                table.num_columns()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Central panel – preview, analysis, results
// ---------------------------------------------------------------------------

/// Render the main screen.
pub fn central_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("AI Data Sentiment Analyzer");

    if let Upload::Failed { message, .. } = &state.upload {
        ui.label(
            RichText::new("Could not parse the file. Please ensure it is a valid CSV or TSV.")
                .color(Color32::RED),
        );
        ui.label(RichText::new(message).small().weak());
        return;
    }

    let Some(active) = state.active_table() else {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("Please upload a file or check 'Use Sample Testing Data' in the sidebar to begin.");
        });
        return;
    };
    let columns = active.columns().to_vec();
    let preview = active.head(PREVIEW_ROWS);
    let header_only = active.is_empty();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Data Preview");
            table::data_table(ui, "preview_table", &preview, None);
            if header_only {
                ui.label(RichText::new("The file has a header but no rows.").weak());
            }
            ui.separator();

            ui.strong("NLP Sentiment Analysis");
            let current = state.text_column.clone().unwrap_or_default();
            ui.horizontal(|ui: &mut Ui| {
                ui.label("Select the column containing text/feedback:");
                egui::ComboBox::from_id_salt("text_column")
                    .selected_text(&current)
                    .show_ui(ui, |ui: &mut Ui| {
                        for col in &columns {
                            if ui.selectable_label(current == *col, col).clicked() {
                                state.set_text_column(col.clone());
                            }
                        }
                    });
            });

            if ui.button("Run Analysis").clicked() {
                state.run_analysis();
            }

            let Some(analysis) = &state.analysis else {
                return;
            };

            ui.label(
                RichText::new(format!("Analysis of '{}' complete!", analysis.text_column))
                    .color(Color32::from_rgb(60, 160, 90)),
            );
            table::data_table(ui, "result_table", &analysis.table, Some(analysis.labels.as_slice()));
            ui.separator();

            plot::metrics_row(ui, &analysis.counts);
            ui.add_space(8.0);
            ui.strong("Sentiment Distribution");
            plot::sentiment_chart(ui, &analysis.counts);
        });
}

// ---------------------------------------------------------------------------
// File dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open feedback data")
        .add_filter("Supported files", &["csv", "tsv", "txt", "json", "parquet", "pq"])
        .add_filter("CSV / TSV", &["csv", "tsv", "txt"])
        .add_filter("JSON", &["json"])
        .add_filter("Parquet", &["parquet", "pq"])
        .pick_file();

    if let Some(path) = file {
        state.load_path(&path);
    }
}

pub fn save_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Save sentiment results")
        .set_file_name("sentiment_results.csv")
        .add_filter("CSV", &["csv"])
        .save_file();

    if let Some(path) = file {
        if let Err(e) = state.export_analysis(&path) {
            log::error!("Failed to export results: {e:#}");
            state.status_message = Some(format!("Error: {e:#}"));
        }
    }
}
