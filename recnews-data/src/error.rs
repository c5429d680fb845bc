//! Errors raised while loading a snapshot.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Error raised when reading snapshot tables from SQLite.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Opening the SQLite database failed.
    #[error("failed to open SQLite database at {path}")]
    OpenDatabase {
        /// Location of the SQLite database on disk.
        path: Utf8PathBuf,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// Reading a table failed, including missing tables or columns.
    #[error("failed to read table `{table}`")]
    Query {
        /// Table being read.
        table: &'static str,
        /// Source error returned by `rusqlite`.
        #[source]
        source: rusqlite::Error,
    },
    /// A cluster row carried a history that is not a JSON array of ids.
    #[error("failed to decode reading history for user {user_id}")]
    DecodeHistory {
        /// User whose history failed to decode.
        user_id: String,
        /// JSON decoding failure.
        #[source]
        source: serde_json::Error,
    },
    /// A cluster label did not fit the engine's `u32` cluster ids.
    #[error("cluster id {cluster_id} for user {user_id} is out of range")]
    ClusterIdOutOfRange {
        /// User the row describes.
        user_id: String,
        /// Label as stored.
        cluster_id: i64,
    },
    /// An item had neither a recency score nor an `issued` timestamp.
    #[error("item {item_id} has no recency score and no issued timestamp")]
    MissingRecency {
        /// Item lacking recency information.
        item_id: String,
    },
    /// An item's `issued` timestamp was not valid RFC 3339.
    #[error("item {item_id} has an invalid issued timestamp {issued:?}")]
    InvalidIssued {
        /// Item whose timestamp failed to parse.
        item_id: String,
        /// Timestamp as stored.
        issued: String,
        /// Parse failure reported by `chrono`.
        #[source]
        source: chrono::ParseError,
    },
}
