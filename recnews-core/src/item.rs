//! Catalogue items and the keyed item table.
//!
//! An [`Item`] carries the two ranking signals used across every strategy
//! plus free-form content fields that are passed through untouched. The
//! [`ItemCatalogue`] keeps items in table order, which is the reference order
//! for stable ranking.

use std::collections::{BTreeMap, HashMap, HashSet};

use thiserror::Error;

/// Free-form content fields attached to an item (title, url, body, …).
pub type Fields = BTreeMap<String, String>;

/// A news article that can be recommended.
///
/// # Examples
/// ```
/// use recnews_core::Item;
///
/// let item = Item::new("i1", 0.9, 0.1).with_field("title", "Budget approved");
/// assert_eq!(item.id, "i1");
/// assert_eq!(item.fields.get("title").map(String::as_str), Some("Budget approved"));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Item {
    /// Unique identifier.
    pub id: String,
    /// Higher values mean more popular.
    pub popularity_score: f64,
    /// Higher values mean more recent.
    pub recency_score: f64,
    /// Opaque content fields.
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub fields: Fields,
}

impl Item {
    /// Construct an item without content fields.
    #[must_use]
    pub fn new(id: impl Into<String>, popularity_score: f64, recency_score: f64) -> Self {
        Self {
            id: id.into(),
            popularity_score,
            recency_score,
            fields: Fields::new(),
        }
    }

    /// Attach a content field while returning `self` for chaining.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

/// Errors returned by [`ItemCatalogue::new`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogueError {
    /// Two rows share the same item identifier.
    #[error("item {id} appears more than once in the catalogue")]
    DuplicateItem {
        /// The repeated identifier.
        id: String,
    },
}

/// Item table keyed uniquely by identifier.
///
/// # Examples
/// ```
/// use recnews_core::{Item, ItemCatalogue};
///
/// # fn main() -> Result<(), recnews_core::CatalogueError> {
/// let catalogue = ItemCatalogue::new(vec![Item::new("a", 1.0, 0.0), Item::new("b", 0.5, 0.5)])?;
/// assert_eq!(catalogue.len(), 2);
/// assert!(catalogue.get("b").is_some());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemCatalogue {
    items: Vec<Item>,
    positions: HashMap<String, usize>,
}

impl ItemCatalogue {
    /// Build a catalogue, rejecting duplicate identifiers.
    ///
    /// # Errors
    /// Returns [`CatalogueError::DuplicateItem`] when an identifier repeats.
    pub fn new(items: Vec<Item>) -> Result<Self, CatalogueError> {
        let mut positions = HashMap::with_capacity(items.len());
        for (position, item) in items.iter().enumerate() {
            if positions.insert(item.id.clone(), position).is_some() {
                return Err(CatalogueError::DuplicateItem {
                    id: item.id.clone(),
                });
            }
        }
        Ok(Self { items, positions })
    }

    /// Look up an item by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Item> {
        self.positions
            .get(id)
            .and_then(|&position| self.items.get(position))
    }

    /// All items in table order.
    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Items whose identifier is in `ids`, in table order.
    pub fn restrict<'a>(&'a self, ids: &'a HashSet<&str>) -> impl Iterator<Item = &'a Item> + 'a {
        self.items
            .iter()
            .filter(move |item| ids.contains(item.id.as_str()))
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Report whether the catalogue holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
