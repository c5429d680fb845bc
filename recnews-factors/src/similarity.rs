//! Latent-factor similarity ranking.
#![forbid(unsafe_code)]

use std::cmp::Ordering;

use log::{debug, info, warn};
use nalgebra::DVector;
use recnews_core::{IdIndex, Interaction, ItemCatalogue, Recommendation};

use crate::{FactorError, FactorModel, InteractionMatrix};

/// Cosine similarity in `[-1.0, 1.0]`.
///
/// Zero-norm vectors, mismatched dimensions, and non-finite results all
/// yield `0.0`.
///
/// # Examples
/// ```
/// use nalgebra::DVector;
/// use recnews_factors::cosine_similarity;
///
/// let a = DVector::from_vec(vec![1.0, 0.0]);
/// let b = DVector::from_vec(vec![2.0, 0.0]);
/// assert!((cosine_similarity(&a, &b) - 1.0).abs() < 1e-12);
/// assert_eq!(cosine_similarity(&a, &DVector::zeros(2)), 0.0);
/// ```
#[expect(
    clippy::float_arithmetic,
    reason = "cosine similarity divides the dot product by both norms"
)]
#[must_use]
pub fn cosine_similarity(a: &DVector<f64>, b: &DVector<f64>) -> f64 {
    if a.len() != b.len() {
        return 0.0;
    }
    let denominator = a.norm() * b.norm();
    if !denominator.is_finite() || denominator <= 0.0 {
        return 0.0;
    }
    let similarity = a.dot(b) / denominator;
    if similarity.is_finite() {
        similarity.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Descending (similarity, recency, popularity) comparison.
#[must_use]
pub fn similarity_order(a: &Recommendation, b: &Recommendation) -> Ordering {
    let a_similarity = a.similarity.unwrap_or(0.0);
    let b_similarity = b.similarity.unwrap_or(0.0);
    b_similarity
        .total_cmp(&a_similarity)
        .then_with(|| b.item.recency_score.total_cmp(&a.item.recency_score))
        .then_with(|| b.item.popularity_score.total_cmp(&a.item.popularity_score))
}

/// Factor model together with the indices it was fitted against.
///
/// Keeping the indices beside the vectors guarantees that lookups and factors
/// always come from the same build.
#[derive(Debug, Clone, PartialEq)]
pub struct LatentFactors {
    users: IdIndex,
    items: IdIndex,
    model: FactorModel,
}

impl LatentFactors {
    /// Build the interaction matrix and factorise it at `rank`.
    ///
    /// # Errors
    /// Propagates [`FactorError`] from [`FactorModel::fit`].
    pub fn fit(interactions: &[Interaction], rank: usize) -> Result<Self, FactorError> {
        let matrix = InteractionMatrix::from_interactions(interactions);
        let model = FactorModel::fit(&matrix, rank)?;
        let (users, items) = matrix.into_indices();
        info!(
            "fitted rank-{} latent factors for {} users and {} items",
            model.rank(),
            users.len(),
            items.len()
        );
        Ok(Self {
            users,
            items,
            model,
        })
    }

    /// User index.
    #[must_use]
    pub const fn users(&self) -> &IdIndex {
        &self.users
    }

    /// Item index.
    #[must_use]
    pub const fn items(&self) -> &IdIndex {
        &self.items
    }

    /// Underlying factor model.
    #[must_use]
    pub const fn model(&self) -> &FactorModel {
        &self.model
    }

    /// Similarity of `user_id` to every item, in item-index order.
    ///
    /// Returns `None` for users absent from the interaction snapshot.
    #[must_use]
    pub fn similarities(&self, user_id: &str) -> Option<Vec<f64>> {
        let user = self
            .users
            .position(user_id)
            .and_then(|position| self.model.user_factor(position))?;
        Some(
            self.model
                .item_factors()
                .iter()
                .map(|item| cosine_similarity(user, item))
                .collect(),
        )
    }

    /// Rank catalogue items for `user_id` by factor similarity.
    ///
    /// The `top_p` most similar items (all items by default) form the
    /// candidate pool, which is ordered by similarity, recency, then
    /// popularity and truncated to `top_k`. Unknown users get an empty list.
    /// Items missing from `catalogue` are skipped.
    #[must_use]
    pub fn rank_by_similarity(
        &self,
        catalogue: &ItemCatalogue,
        user_id: &str,
        top_k: usize,
        top_p: Option<usize>,
    ) -> Vec<Recommendation> {
        let Some(scores) = self.similarities(user_id) else {
            info!("user {user_id} has no latent factors; returning no recommendations");
            return Vec::new();
        };
        let pool = top_p.map_or(scores.len(), |p| p.min(scores.len()));

        let mut nearest: Vec<(usize, f64)> = scores.into_iter().enumerate().collect();
        nearest.sort_by(|a, b| b.1.total_cmp(&a.1));
        nearest.truncate(pool);

        let mut ranked: Vec<Recommendation> = nearest
            .into_iter()
            .filter_map(|(position, similarity)| {
                let id = self.items.id(position)?;
                let Some(item) = catalogue.get(id) else {
                    warn!("item {id} has latent factors but no catalogue entry");
                    return None;
                };
                Some(Recommendation::with_similarity(item.clone(), similarity))
            })
            .collect();
        ranked.sort_by(similarity_order);
        ranked.truncate(top_k);
        debug!(
            "ranked {} of {pool} nearest items for user {user_id}",
            ranked.len()
        );
        ranked
    }
}
