//! Core domain types for the recnews recommendation engine.
//!
//! The crate owns the snapshot tables (items, interactions, cluster
//! assignments), the identifier indices, request validation, and the two
//! strategies that need no numeric model: cluster-neighbour candidate
//! generation and popularity/recency ranking. The latent-factor model lives
//! in `recnews-factors`; the orchestration of all strategies lives in
//! `recnews-hybrid` behind the [`Recommender`] trait defined here.

#![forbid(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod cluster;
mod error;
mod index;
mod interaction;
mod item;
mod popularity;
mod recommender;
mod request;
mod tables;

#[cfg(any(test, feature = "test-support"))]
#[cfg_attr(docsrs, doc(cfg(feature = "test-support")))]
pub mod test_support;

pub use cluster::{ClusterAssignment, ClusterNeighbours, ClusterTable};
pub use error::RecommendError;
pub use index::IdIndex;
pub use interaction::Interaction;
pub use item::{CatalogueError, Fields, Item, ItemCatalogue};
pub use popularity::{popularity_order, rank_by_popularity};
pub use recommender::{Recommendation, Recommender};
pub use request::{
    DEFAULT_TOP_K, MAX_TOP_K, MIN_TOP_K, MIN_TOP_P, ParameterError, RecommendRequest,
};
pub use tables::SnapshotTables;
