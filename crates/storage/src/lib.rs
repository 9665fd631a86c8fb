//! Company catalog storage for Scout.
//!
//! A single SQLite database holds the company catalog and a small
//! settings table that records whether the catalog has been seeded
//! from the bundled CSV dataset.

pub mod dataset;
pub mod sqlite;

pub use dataset::{DatasetRecord, parse_dataset};
pub use sqlite::SqliteCatalog;
