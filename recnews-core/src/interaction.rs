/// An observed engagement between a user and an item.
///
/// Repeated interactions for the same pair are summed when the interaction
/// matrix is built.
///
/// # Examples
/// ```
/// use recnews_core::Interaction;
///
/// let interaction = Interaction::new("u1", "i1", 5.0);
/// assert_eq!(interaction.user_id, "u1");
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interaction {
    /// User that engaged.
    pub user_id: String,
    /// Item engaged with.
    pub item_id: String,
    /// Engagement strength.
    pub score: f64,
}

impl Interaction {
    /// Construct an interaction record.
    #[must_use]
    pub fn new(user_id: impl Into<String>, item_id: impl Into<String>, score: f64) -> Self {
        Self {
            user_id: user_id.into(),
            item_id: item_id.into(),
            score,
        }
    }
}
