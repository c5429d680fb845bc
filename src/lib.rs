//! Facade crate for the recnews hybrid recommendation engine.
//!
//! This crate re-exports the core domain types, the latent-factor model, and
//! the hybrid recommender, and exposes the SQLite snapshot loader behind the
//! `store-sqlite` feature.
//!
//! # Examples
//!
//! ```
//! use recnews_engine::{
//!     ClusterAssignment, HybridRecommender, Interaction, Item, ModelConfig, RecommendRequest,
//!     Recommender, Snapshot, SnapshotTables,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let tables = SnapshotTables {
//!     interactions: vec![
//!         Interaction::new("u1", "i1", 5.0),
//!         Interaction::new("u1", "i2", 1.0),
//!         Interaction::new("u2", "i1", 1.0),
//!         Interaction::new("u2", "i2", 5.0),
//!     ],
//!     items: vec![Item::new("i1", 0.1, 0.1), Item::new("i2", 0.9, 0.9)],
//!     clusters: vec![
//!         ClusterAssignment::new("u1", 0, ["i1"]),
//!         ClusterAssignment::new("u2", 0, ["i2"]),
//!     ],
//! };
//! let recommender = HybridRecommender::new(Snapshot::build(tables, ModelConfig::default())?);
//!
//! let personal = recommender.by_latent_factors(&RecommendRequest::new("u1", 1, None, true)?);
//! assert_eq!(personal[0].item.id, "i1");
//!
//! let popular = recommender.by_cluster(&RecommendRequest::new("u1", 2, None, false)?)?;
//! assert_eq!(popular[0].item.id, "i2");
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

pub use recnews_core::{
    CatalogueError, ClusterAssignment, ClusterNeighbours, ClusterTable, DEFAULT_TOP_K, Fields,
    IdIndex, Interaction, Item, ItemCatalogue, MAX_TOP_K, MIN_TOP_K, MIN_TOP_P, ParameterError,
    RecommendError, RecommendRequest, Recommendation, Recommender, SnapshotTables,
    popularity_order, rank_by_popularity,
};
pub use recnews_factors::{
    DEFAULT_RANK, FactorError, FactorModel, InteractionMatrix, LatentFactors, cosine_similarity,
    similarity_order,
};
pub use recnews_hybrid::{HybridRecommender, ModelConfig, Snapshot, SnapshotError};

#[cfg(feature = "store-sqlite")]
pub use recnews_data::{LoadError, load_snapshot, load_snapshot_at, recency_from_issued};
