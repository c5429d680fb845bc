//! Bidirectional identifier ↔ dense index mapping.

use std::collections::HashMap;

/// Maps raw identifiers to zero-based positions and back.
///
/// Positions are assigned to distinct identifiers in first-seen order, so
/// rebuilding from the same sequence reproduces the same mapping. The index
/// is immutable once built.
///
/// # Examples
/// ```
/// use recnews_core::IdIndex;
///
/// let index = IdIndex::from_ids(["u2", "u1", "u2"]);
/// assert_eq!(index.len(), 2);
/// assert_eq!(index.position("u1"), Some(1));
/// assert_eq!(index.id(0), Some("u2"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdIndex {
    ids: Vec<String>,
    positions: HashMap<String, usize>,
}

impl IdIndex {
    /// Enumerate distinct identifiers in encounter order.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut index = Self::default();
        for id in ids {
            index.intern(id.as_ref());
        }
        index
    }

    fn intern(&mut self, id: &str) -> usize {
        if let Some(&position) = self.positions.get(id) {
            return position;
        }
        let position = self.ids.len();
        self.ids.push(id.to_owned());
        self.positions.insert(id.to_owned(), position);
        position
    }

    /// Position assigned to `id`, if known.
    #[must_use]
    pub fn position(&self, id: &str) -> Option<usize> {
        self.positions.get(id).copied()
    }

    /// Identifier stored at `position`, if in range.
    #[must_use]
    pub fn id(&self, position: usize) -> Option<&str> {
        self.ids.get(position).map(String::as_str)
    }

    /// Identifiers in position order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }

    /// Number of distinct identifiers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Report whether the index is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
