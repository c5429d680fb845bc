//! Snapshot loading for the recnews engine.
//!
//! Responsibilities:
//! - Read the interaction, item, and cluster tables from a SQLite warehouse
//!   export into [`SnapshotTables`](recnews_core::SnapshotTables).
//! - Derive item recency from publication timestamps when the export leaves
//!   it blank.
//!
//! Boundaries:
//! - Do not encode ranking rules (they live in `recnews-core`).
//! - Never write to the source database.
//!
//! Invariants:
//! - Rows are returned in `rowid` order, so identifier indices built from the
//!   tables are reproducible between loads.

#![forbid(unsafe_code)]

mod error;
mod recency;
mod sqlite;

pub use error::LoadError;
pub use recency::recency_from_issued;
pub use sqlite::{load_snapshot, load_snapshot_at};
