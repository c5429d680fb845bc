//! Validated recommendation request parameters.

use thiserror::Error;

/// Smallest accepted `top_k`.
pub const MIN_TOP_K: usize = 1;
/// Largest accepted `top_k`.
pub const MAX_TOP_K: usize = 50;
/// Smallest accepted explicit `top_p`.
pub const MIN_TOP_P: usize = 5;
/// `top_k` used when the caller does not supply one.
pub const DEFAULT_TOP_K: usize = 5;

/// Errors returned by [`RecommendRequest::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParameterError {
    /// `top_k` fell outside `MIN_TOP_K..=MAX_TOP_K`.
    #[error("top_k must be between 1 and 50, got {0}")]
    TopKOutOfRange(usize),
    /// An explicit `top_p` was below `MIN_TOP_P`.
    #[error("top_p must be at least 5, got {0}")]
    TopPTooSmall(usize),
}

/// Parameters shared by both recommendation entry points.
///
/// `top_k` is the number of items returned; `top_p` bounds the candidate pool
/// (most similar items on the latent-factor path, cluster peers on the
/// cluster path) and defaults to "everything". `use_history` selects the
/// personalised path; when false both entry points fall back to the
/// catalogue-wide popularity ranking.
///
/// # Examples
/// ```
/// use recnews_core::{ParameterError, RecommendRequest};
///
/// let request = RecommendRequest::new("u1", 10, Some(20), true).expect("valid bounds");
/// assert_eq!(request.top_k(), 10);
///
/// let err = RecommendRequest::new("u1", 0, None, true).expect_err("top_k too small");
/// assert_eq!(err, ParameterError::TopKOutOfRange(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecommendRequest {
    user_id: String,
    top_k: usize,
    top_p: Option<usize>,
    use_history: bool,
}

impl RecommendRequest {
    /// Validate parameter bounds and build a request.
    ///
    /// # Errors
    /// Returns [`ParameterError`] when `top_k` or `top_p` is out of bounds.
    pub fn new(
        user_id: impl Into<String>,
        top_k: usize,
        top_p: Option<usize>,
        use_history: bool,
    ) -> Result<Self, ParameterError> {
        if !(MIN_TOP_K..=MAX_TOP_K).contains(&top_k) {
            return Err(ParameterError::TopKOutOfRange(top_k));
        }
        if let Some(p) = top_p.filter(|&p| p < MIN_TOP_P) {
            return Err(ParameterError::TopPTooSmall(p));
        }
        Ok(Self {
            user_id: user_id.into(),
            top_k,
            top_p,
            use_history,
        })
    }

    /// Request with default `top_k`, unbounded `top_p`, and history enabled.
    #[must_use]
    pub fn for_user(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            top_k: DEFAULT_TOP_K,
            top_p: None,
            use_history: true,
        }
    }

    /// Requested user.
    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// Number of items to return.
    #[must_use]
    pub const fn top_k(&self) -> usize {
        self.top_k
    }

    /// Candidate pool bound, if any.
    #[must_use]
    pub const fn top_p(&self) -> Option<usize> {
        self.top_p
    }

    /// Whether personalisation is requested.
    #[must_use]
    pub const fn use_history(&self) -> bool {
        self.use_history
    }
}
