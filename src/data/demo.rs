use serde::Serialize;

use super::model::{CellValue, Table};

/// One row of the built-in sample data.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct FeedbackRecord {
    pub user: String,
    pub feedback: String,
}

const DEMO_ROWS: [(&str, &str); 5] = [
    ("Amit", "This app is amazing and very helpful!"),
    ("Sara", "I hate the new update, it is very slow."),
    ("John", "It is okay, but could be better."),
    ("Meera", "Great experience, I love the UI design."),
    ("Rahul", "Worst service ever, very disappointed."),
];

pub fn demo_records() -> Vec<FeedbackRecord> {
    DEMO_ROWS
        .iter()
        .map(|(user, feedback)| FeedbackRecord {
            user: user.to_string(),
            feedback: feedback.to_string(),
        })
        .collect()
}

/// The fixed five-row `User` / `Feedback` table used when no file is loaded.
pub fn demo_table() -> Table {
    let rows = demo_records()
        .into_iter()
        .map(|r| vec![CellValue::Text(r.user), CellValue::Text(r.feedback)])
        .collect();
    Table {
        columns: vec!["User".to_string(), "Feedback".to_string()],
        rows,
    }
}
