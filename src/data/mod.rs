//! Data layer: core types, ingestion, and loading.
//!
//! Architecture:
//! ```text
//!  .csv / .tsv / .txt      .json / .parquet
//!        │                       │
//!        ▼                       │
//!   ┌──────────┐                 │
//!   │  ingest   │  encodings × delimiters, first parse with >1 column
//!   └──────────┘                 │
//!        │                       ▼
//!        │                 ┌──────────┐
//!        └───────────────► │  loader   │  dispatch by extension
//!                          └──────────┘
//!                                │          ┌──────────┐
//!                                ▼          │   demo    │  fixed sample rows
//!                          ┌──────────┐ ◄── └──────────┘
//!                          │   Table   │  ordered columns, rectangular rows
//!                          └──────────┘
//! ```

pub mod demo;
pub mod ingest;
pub mod loader;
pub mod model;
