//! Sparse user × item interaction matrix.
#![forbid(unsafe_code)]

use nalgebra::DMatrix;
use recnews_core::{IdIndex, Interaction};
use sprs::{CsMat, TriMat};

/// Interaction strengths keyed by dense user and item indices.
///
/// Rows are users and columns are items, both indexed in first-seen table
/// order. Entry `(i, j)` is the sum of every interaction score recorded for
/// that pair.
///
/// # Examples
/// ```
/// use recnews_core::Interaction;
/// use recnews_factors::InteractionMatrix;
///
/// let matrix = InteractionMatrix::from_interactions(&[
///     Interaction::new("u1", "i1", 2.0),
///     Interaction::new("u1", "i1", 3.0),
///     Interaction::new("u2", "i2", 1.0),
/// ]);
/// assert_eq!(matrix.shape(), (2, 2));
/// assert_eq!(matrix.score("u1", "i1"), 5.0);
/// ```
#[derive(Debug, Clone)]
pub struct InteractionMatrix {
    users: IdIndex,
    items: IdIndex,
    values: CsMat<f64>,
}

impl InteractionMatrix {
    /// Build the matrix and both indices from an interaction table.
    #[must_use]
    pub fn from_interactions(interactions: &[Interaction]) -> Self {
        let users = IdIndex::from_ids(interactions.iter().map(|row| row.user_id.as_str()));
        let items = IdIndex::from_ids(interactions.iter().map(|row| row.item_id.as_str()));
        let shape = (users.len(), items.len());
        if interactions.is_empty() {
            return Self {
                users,
                items,
                values: CsMat::zero(shape),
            };
        }

        let mut triplets = TriMat::with_capacity(shape, interactions.len());
        for row in interactions {
            if let (Some(user), Some(item)) =
                (users.position(&row.user_id), items.position(&row.item_id))
            {
                triplets.add_triplet(user, item, row.score);
            }
        }
        // CSR conversion sums repeated (user, item) triplets.
        let values: CsMat<f64> = triplets.to_csr();
        Self {
            users,
            items,
            values,
        }
    }

    /// `(users, items)` dimensions.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        self.values.shape()
    }

    /// Summed score for a user/item pair, `0.0` when absent.
    #[must_use]
    pub fn score(&self, user_id: &str, item_id: &str) -> f64 {
        let (Some(user), Some(item)) = (self.users.position(user_id), self.items.position(item_id))
        else {
            return 0.0;
        };
        self.values.get(user, item).copied().unwrap_or(0.0)
    }

    /// Number of stored non-zero entries.
    #[must_use]
    pub fn nnz(&self) -> usize {
        self.values.nnz()
    }

    /// User index backing the rows.
    #[must_use]
    pub const fn users(&self) -> &IdIndex {
        &self.users
    }

    /// Item index backing the columns.
    #[must_use]
    pub const fn items(&self) -> &IdIndex {
        &self.items
    }

    /// Release the indices once the matrix is no longer needed.
    #[must_use]
    pub fn into_indices(self) -> (IdIndex, IdIndex) {
        (self.users, self.items)
    }

    /// Dense copy for the decomposition step.
    #[expect(
        clippy::float_arithmetic,
        reason = "densifying accumulates stored values into a zeroed matrix"
    )]
    #[must_use]
    pub fn to_dense(&self) -> DMatrix<f64> {
        let (rows, cols) = self.shape();
        let mut dense = DMatrix::zeros(rows, cols);
        for (value, (row, col)) in self.values.iter() {
            if let Some(cell) = dense.get_mut((row, col)) {
                *cell += *value;
            }
        }
        dense
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recnews_core::test_support::mirrored_interactions;
    use rstest::rstest;

    #[rstest]
    fn empty_table_yields_empty_matrix() {
        let matrix = InteractionMatrix::from_interactions(&[]);
        assert_eq!(matrix.shape(), (0, 0));
        assert_eq!(matrix.nnz(), 0);
        assert!(matrix.users().is_empty());
    }

    #[rstest]
    fn repeated_pairs_are_summed() {
        let matrix = InteractionMatrix::from_interactions(&[
            Interaction::new("u1", "i1", 1.5),
            Interaction::new("u2", "i1", 1.0),
            Interaction::new("u1", "i1", 2.5),
        ]);
        assert_eq!(matrix.shape(), (2, 1));
        assert_eq!(matrix.nnz(), 2);
        assert!((matrix.score("u1", "i1") - 4.0).abs() < 1e-12);
        assert!((matrix.score("u2", "i1") - 1.0).abs() < 1e-12);
    }

    #[rstest]
    fn indices_follow_table_order() {
        let matrix = InteractionMatrix::from_interactions(&[
            Interaction::new("zed", "b", 1.0),
            Interaction::new("amy", "a", 1.0),
        ]);
        assert_eq!(matrix.users().position("zed"), Some(0));
        assert_eq!(matrix.items().position("a"), Some(1));
    }

    #[rstest]
    fn dense_copy_matches_sparse_entries() {
        let matrix = InteractionMatrix::from_interactions(&mirrored_interactions());
        let dense = matrix.to_dense();
        assert_eq!(dense.shape(), (2, 2));
        assert_eq!(dense.get((0, 0)).copied(), Some(5.0));
        assert_eq!(dense.get((0, 1)).copied(), Some(1.0));
        assert_eq!(dense.get((1, 1)).copied(), Some(5.0));
    }

    #[rstest]
    fn unknown_pairs_score_zero() {
        let matrix = InteractionMatrix::from_interactions(&mirrored_interactions());
        assert_eq!(matrix.score("u1", "missing"), 0.0);
        assert_eq!(matrix.score("nobody", "i1"), 0.0);
    }
}
