//! Error types emitted by the recnews CLI.
//!
//! Keep this error type reasonably small, as many CLI helpers return
//! `Result<_, CliError>` and the workspace enables `clippy::result_large_err`.

use std::sync::Arc;

use camino::Utf8PathBuf;
use recnews_core::{ParameterError, RecommendError};
use recnews_data::LoadError;
use recnews_hybrid::SnapshotError;
use thiserror::Error;

/// Errors emitted by the recnews CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        /// Flag name of the missing option.
        field: &'static str,
        /// Environment variable that can supply it.
        env: &'static str,
    },
    /// A referenced input path does not exist on disk.
    #[error("{field} path {path:?} does not exist")]
    MissingSourceFile {
        /// Flag naming the path.
        field: &'static str,
        /// Path as configured.
        path: Utf8PathBuf,
    },
    /// A referenced input path exists but is not a file.
    #[error("{field} path {path:?} exists but is not a file")]
    SourcePathNotFile {
        /// Flag naming the path.
        field: &'static str,
        /// Path as configured.
        path: Utf8PathBuf,
    },
    /// A referenced input path could not be inspected due to an IO error.
    #[error("failed to inspect {field} path {path:?}: {source}")]
    InspectSourcePath {
        /// Flag naming the path.
        field: &'static str,
        /// Path as configured.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Request parameters were out of range.
    #[error("invalid request: {0}")]
    InvalidParameter(#[from] ParameterError),
    /// Reading the snapshot tables failed.
    #[error("failed to load snapshot from {path:?}: {source}")]
    LoadSnapshot {
        /// Database the snapshot was read from.
        path: Utf8PathBuf,
        /// Loader failure.
        #[source]
        source: LoadError,
    },
    /// The loaded tables could not be turned into a model snapshot.
    #[error("failed to build recommendation snapshot: {0}")]
    BuildSnapshot(#[from] SnapshotError),
    /// The recommender rejected the request.
    #[error(transparent)]
    Recommend(#[from] RecommendError),
    /// The request was valid but produced no items.
    #[error("no recommendations found for user {user_id}")]
    NoRecommendations {
        /// Reader the request was made for.
        user_id: String,
    },
    /// Serialising the recommendations failed.
    #[error("failed to serialise recommendations: {0}")]
    SerialiseRecommendations(#[source] serde_json::Error),
    /// Writing the recommendations failed.
    #[error("failed to write recommendations: {0}")]
    WriteOutput(#[source] std::io::Error),
}
