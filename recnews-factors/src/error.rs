//! Error types raised while fitting latent factors.
#![forbid(unsafe_code)]

use thiserror::Error;

/// Errors raised while factorising an interaction matrix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FactorError {
    /// A factorisation rank of zero was requested.
    #[error("factorisation rank must be at least 1")]
    ZeroRank,
    /// The singular value decomposition failed to converge.
    #[error("singular value decomposition of a {rows}x{cols} matrix did not converge")]
    Decomposition {
        /// Number of users.
        rows: usize,
        /// Number of items.
        cols: usize,
    },
}
