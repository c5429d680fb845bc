//! Test helpers for seeding snapshot databases and stubbing the loader.

use super::*;
use crate::recommend::{RecommendConfig, SnapshotLoader};
use camino::{Utf8Path, Utf8PathBuf};
use recnews_core::SnapshotTables;
use rusqlite::Connection;
use tempfile::TempDir;

/// Loader returning fixed tables without touching the filesystem.
pub(super) struct StubSnapshotLoader {
    pub(super) tables: SnapshotTables,
}

impl SnapshotLoader for StubSnapshotLoader {
    fn load(&self, _config: &RecommendConfig) -> Result<SnapshotTables, CliError> {
        Ok(self.tables.clone())
    }
}

/// Temporary directory holding a seeded snapshot database.
pub(super) struct SnapshotDatabase {
    _dir: TempDir,
    path: Utf8PathBuf,
}

impl SnapshotDatabase {
    /// Seed the mirrored two-reader snapshot.
    pub(super) fn mirrored() -> Self {
        let dir = TempDir::new().expect("tempdir");
        let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).expect("utf-8 workspace");
        let path = root.join("recnews.db");
        let connection = Connection::open(path.as_std_path()).expect("create database");
        connection
            .execute_batch(
                "
                CREATE TABLE interactions (user_id TEXT, item_id TEXT, interaction_score REAL);
                CREATE TABLE news_items (
                    item_id TEXT, popularity_score REAL, recency_score REAL, title TEXT
                );
                CREATE TABLE cluster_assignments (user_id TEXT, cluster_id INTEGER, history TEXT);
                INSERT INTO interactions VALUES
                    ('u1', 'i1', 5), ('u1', 'i2', 1), ('u2', 'i1', 1), ('u2', 'i2', 5);
                INSERT INTO news_items VALUES
                    ('i1', 0.1, 0.1, 'Council budget'),
                    ('i2', 0.9, 0.9, 'Cup final');
                INSERT INTO cluster_assignments VALUES
                    ('u1', 0, '[\"i1\"]'),
                    ('u2', 0, '[\"i2\"]');
                ",
            )
            .expect("seed database");
        Self { _dir: dir, path }
    }

    pub(super) fn path(&self) -> &Utf8Path {
        &self.path
    }
}
