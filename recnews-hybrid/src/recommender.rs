//! Strategy selection over a shared, swappable snapshot.
#![forbid(unsafe_code)]

use std::sync::Arc;

use arc_swap::ArcSwap;
use log::{debug, info};
use recnews_core::{
    RecommendError, RecommendRequest, Recommendation, Recommender, rank_by_popularity,
};

use crate::Snapshot;

/// Hybrid recommender combining latent factors, cluster peers, and
/// popularity.
///
/// The current [`Snapshot`] sits in an [`ArcSwap`]. Each request loads the
/// `Arc` without taking a lock and ranks against that snapshot, so a
/// concurrent [`HybridRecommender::replace`] never blocks readers or exposes
/// a half-built model to them.
///
/// # Examples
/// ```
/// use recnews_core::{RecommendRequest, Recommender};
/// use recnews_core::test_support::sample_tables;
/// use recnews_hybrid::{HybridRecommender, ModelConfig, Snapshot};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let snapshot = Snapshot::build(sample_tables(), ModelConfig::default())?;
/// let recommender = HybridRecommender::new(snapshot);
///
/// let request = RecommendRequest::new("u1", 3, None, false)?;
/// let fallback = recommender.by_latent_factors(&request);
/// assert_eq!(fallback.len(), 3);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct HybridRecommender {
    current: ArcSwap<Snapshot>,
}

impl HybridRecommender {
    /// Serve recommendations from `snapshot`.
    #[must_use]
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            current: ArcSwap::from_pointee(snapshot),
        }
    }

    /// The snapshot requests are currently served from.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Snapshot> {
        self.current.load_full()
    }

    /// Swap in a freshly built snapshot, returning the previous one.
    ///
    /// Requests already running keep the snapshot they started with.
    pub fn replace(&self, snapshot: Snapshot) -> Arc<Snapshot> {
        info!("swapping in a new recommendation snapshot");
        self.current.swap(Arc::new(snapshot))
    }

    fn popular(snapshot: &Snapshot, top_k: usize) -> Vec<Recommendation> {
        rank_by_popularity(snapshot.catalogue().items(), top_k)
            .into_iter()
            .cloned()
            .map(Recommendation::ranked)
            .collect()
    }
}

impl Recommender for HybridRecommender {
    fn by_latent_factors(&self, request: &RecommendRequest) -> Vec<Recommendation> {
        let snapshot = self.snapshot();
        if !request.use_history() {
            debug!("latent-factor request for {} without history: popularity", request.user_id());
            return Self::popular(&snapshot, request.top_k());
        }
        debug!("latent-factor request for {}: similarity", request.user_id());
        snapshot.factors().rank_by_similarity(
            snapshot.catalogue(),
            request.user_id(),
            request.top_k(),
            request.top_p(),
        )
    }

    fn by_cluster(
        &self,
        request: &RecommendRequest,
    ) -> Result<Vec<Recommendation>, RecommendError> {
        let snapshot = self.snapshot();
        if !request.use_history() {
            debug!("cluster request for {} without history: popularity", request.user_id());
            return Ok(Self::popular(&snapshot, request.top_k()));
        }
        let found = snapshot
            .clusters()
            .neighbours(request.user_id(), request.top_p())?;
        debug!(
            "cluster request for {}: {} of {} peers in cluster {} offered {} candidates",
            request.user_id(),
            found.neighbours.len(),
            found.members.len(),
            found.cluster_id,
            found.candidates.len()
        );
        let candidates = found.candidate_set();
        Ok(
            rank_by_popularity(snapshot.catalogue().restrict(&candidates), request.top_k())
                .into_iter()
                .cloned()
                .map(Recommendation::ranked)
                .collect(),
        )
    }
}
