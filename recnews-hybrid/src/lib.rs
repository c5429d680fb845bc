//! Hybrid recommendation orchestration for recnews.
//!
//! [`Snapshot::build`] is the explicit initialisation step: it validates the
//! raw tables, builds the item catalogue and cluster table, and fits the
//! latent-factor model once. [`HybridRecommender`] then serves both entry
//! points of the [`Recommender`](recnews_core::Recommender) trait:
//!
//! | entry point          | `use_history = true`                          | `use_history = false`  |
//! |----------------------|-----------------------------------------------|------------------------|
//! | `by_latent_factors`  | cosine similarity over latent factors         | catalogue popularity   |
//! | `by_cluster`         | peers' items ranked by popularity and recency | catalogue popularity   |
//!
//! Unknown users are an empty list on the latent-factor path and a
//! [`RecommendError::UserNotFound`](recnews_core::RecommendError::UserNotFound)
//! on the cluster path.

#![forbid(unsafe_code)]

mod recommender;
mod snapshot;

pub use recommender::HybridRecommender;
pub use snapshot::{ModelConfig, Snapshot, SnapshotError};
