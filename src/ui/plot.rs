use eframe::egui::{RichText, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::color::label_color;
use crate::sentiment::{Label, SentimentCounts};

// ---------------------------------------------------------------------------
// Summary metrics
// ---------------------------------------------------------------------------

/// One metric per label: name on top, count below.
pub fn metrics_row(ui: &mut Ui, counts: &SentimentCounts) {
    ui.columns(Label::ALL.len(), |cols| {
        for (label, col) in Label::ALL.into_iter().zip(cols.iter_mut()) {
            col.label(RichText::new(label.as_str()).color(label_color(label)));
            col.label(RichText::new(counts.get(label).to_string()).heading());
        }
    });
}

// ---------------------------------------------------------------------------
// Distribution chart
// ---------------------------------------------------------------------------

/// Bar chart of counts, one bar per label in display order.
pub fn sentiment_chart(ui: &mut Ui, counts: &SentimentCounts) {
    Plot::new("sentiment_chart")
        .legend(Legend::default())
        .height(240.0)
        .y_axis_label("Rows")
        .show_x(false)
        .allow_drag(false)
        .allow_scroll(false)
        .allow_zoom(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for (i, label) in Label::ALL.into_iter().enumerate() {
                let bar = Bar::new(i as f64, counts.get(label) as f64)
                    .name(label.as_str())
                    .width(0.6)
                    .fill(label_color(label));
                let chart = BarChart::new(vec![bar])
                    .name(label.as_str())
                    .color(label_color(label));
                plot_ui.bar_chart(chart);
            }
        });
}
