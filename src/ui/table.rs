use eframe::egui::{RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::color::label_color;
use crate::data::model::{CellValue, Table};
use crate::sentiment::{Label, SENTIMENT_COLUMN};

const ROW_HEIGHT: f32 = 20.0;
const MAX_TABLE_HEIGHT: f32 = 320.0;

// ---------------------------------------------------------------------------
// Data grid
// ---------------------------------------------------------------------------

/// Render `table` as a striped grid. When `labels` is given, cells of the
/// sentiment column are tinted with their label colour.
pub fn data_table(ui: &mut Ui, id_salt: &str, table: &Table, labels: Option<&[Label]>) {
    let sentiment_idx = labels.and_then(|_| table.column_index(SENTIMENT_COLUMN));

    ui.push_id(id_salt, |ui: &mut Ui| {
        TableBuilder::new(ui)
            .striped(true)
            .resizable(true)
            .max_scroll_height(MAX_TABLE_HEIGHT)
            .column(Column::auto().at_least(40.0))
            .columns(Column::auto().at_least(80.0).clip(true), table.num_columns())
            .header(ROW_HEIGHT, |mut header| {
                header.col(|ui| {
                    ui.strong("#");
                });
                for name in table.columns() {
                    header.col(|ui| {
                        ui.strong(name);
                    });
                }
            })
            .body(|body| {
                body.rows(ROW_HEIGHT, table.len(), |mut row| {
                    let i = row.index();
                    row.col(|ui| {
                        ui.label(i.to_string());
                    });
                    for (j, cell) in table.rows()[i].iter().enumerate() {
                        row.col(|ui| {
                            let label = match (sentiment_idx, labels) {
                                (Some(idx), Some(labels)) if idx == j => labels.get(i).copied(),
                                _ => None,
                            };
                            match label {
                                Some(l) => {
                                    ui.label(RichText::new(l.as_str()).color(label_color(l)));
                                }
                                None => {
                                    cell_label(ui, cell);
                                }
                            }
                        });
                    }
                });
            });
    });
}

fn cell_label(ui: &mut Ui, cell: &CellValue) {
    if cell.is_null() {
        ui.label(RichText::new("None").weak().italics());
    } else {
        ui.label(cell.to_string());
    }
}
