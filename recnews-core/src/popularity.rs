//! Popularity/recency ranking.
//!
//! Used as the cold-start fallback over the whole catalogue and as the base
//! ordering inside a cluster candidate subset.

use std::cmp::Ordering;

use crate::Item;

/// Rank items by popularity, then recency, both descending.
///
/// The sort is stable: items tied on both scores keep their input order. At
/// most `top_k` items are returned.
///
/// # Examples
/// ```
/// use recnews_core::{Item, rank_by_popularity};
///
/// let items = [Item::new("i1", 0.9, 0.1), Item::new("i2", 0.9, 0.9)];
/// let ranked: Vec<&str> = rank_by_popularity(&items, 2)
///     .into_iter()
///     .map(|item| item.id.as_str())
///     .collect();
/// assert_eq!(ranked, ["i2", "i1"]);
/// ```
pub fn rank_by_popularity<'a, I>(items: I, top_k: usize) -> Vec<&'a Item>
where
    I: IntoIterator<Item = &'a Item>,
{
    let mut ranked: Vec<&Item> = items.into_iter().collect();
    ranked.sort_by(|a, b| popularity_order(a, b));
    ranked.truncate(top_k);
    ranked
}

/// Descending (popularity, recency) comparison.
#[must_use]
pub fn popularity_order(a: &Item, b: &Item) -> Ordering {
    b.popularity_score
        .total_cmp(&a.popularity_score)
        .then_with(|| b.recency_score.total_cmp(&a.recency_score))
}
