//! Errors surfaced by recommendation strategies.

use thiserror::Error;

/// Errors returned by [`Recommender`](crate::Recommender) strategies.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecommendError {
    /// The user has no row in the cluster-assignment table.
    #[error("user {user_id} has no cluster assignment")]
    UserNotFound {
        /// Identifier that was looked up.
        user_id: String,
    },
}
