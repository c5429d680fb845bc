use crate::{Item, RecommendError, RecommendRequest};

/// A ranked item, optionally annotated with its latent-factor similarity.
///
/// `similarity` is only set on the latent-factor path.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Recommendation {
    /// The recommended item with its original metadata.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub item: Item,
    /// Cosine similarity between the user's and the item's factors.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub similarity: Option<f64>,
}

impl Recommendation {
    /// Wrap an item ranked without a similarity score.
    #[must_use]
    pub const fn ranked(item: Item) -> Self {
        Self {
            item,
            similarity: None,
        }
    }

    /// Wrap an item ranked by latent-factor similarity.
    #[must_use]
    pub const fn with_similarity(item: Item, similarity: f64) -> Self {
        Self {
            item,
            similarity: Some(similarity),
        }
    }
}

/// Hybrid recommendation entry points.
///
/// Both methods select a strategy from [`RecommendRequest::use_history`]. With
/// history disabled they must return the same catalogue-wide
/// popularity/recency ranking regardless of the user.
///
/// Implementations must be `Send + Sync` so a single recommender can serve
/// concurrent requests.
///
/// # Examples
/// ```rust
/// use recnews_core::{Item, RecommendError, RecommendRequest, Recommendation, Recommender};
///
/// struct Headlines(Vec<Item>);
///
/// impl Recommender for Headlines {
///     fn by_latent_factors(&self, request: &RecommendRequest) -> Vec<Recommendation> {
///         self.0
///             .iter()
///             .take(request.top_k())
///             .cloned()
///             .map(Recommendation::ranked)
///             .collect()
///     }
///
///     fn by_cluster(
///         &self,
///         request: &RecommendRequest,
///     ) -> Result<Vec<Recommendation>, RecommendError> {
///         Ok(self.by_latent_factors(request))
///     }
/// }
///
/// let recommender = Headlines(vec![Item::new("i1", 1.0, 1.0)]);
/// let request = RecommendRequest::for_user("u1");
/// assert_eq!(recommender.by_latent_factors(&request).len(), 1);
/// ```
pub trait Recommender: Send + Sync {
    /// Rank by latent-factor similarity, or by popularity without history.
    ///
    /// Unknown users yield an empty list rather than an error.
    fn by_latent_factors(&self, request: &RecommendRequest) -> Vec<Recommendation>;

    /// Rank the items read by cluster peers, or by popularity without history.
    ///
    /// # Errors
    /// Returns [`RecommendError::UserNotFound`] when history is requested for
    /// a user without a cluster assignment.
    fn by_cluster(&self, request: &RecommendRequest)
    -> Result<Vec<Recommendation>, RecommendError>;
}
