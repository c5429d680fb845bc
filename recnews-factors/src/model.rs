//! Truncated SVD factor model.
//!
//! The interaction matrix `A` is decomposed exactly as `A = U Σ Vᵀ`. Keeping
//! the `k` largest singular triplets gives user factors `U_k Σ_k` (one row per
//! user) and item factors `V_k` (one row per item). The decomposition is
//! deterministic, and each triplet's sign is fixed so that the largest
//! user-side component is positive.
#![forbid(unsafe_code)]

use log::{debug, warn};
use nalgebra::{DVector, linalg::SVD};

use crate::{FactorError, InteractionMatrix};

/// Rank used when none is configured.
pub const DEFAULT_RANK: usize = 2;

/// Fitted user and item factor vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct FactorModel {
    rank: usize,
    singular_values: Vec<f64>,
    user_factors: Vec<DVector<f64>>,
    item_factors: Vec<DVector<f64>>,
}

impl FactorModel {
    /// Factorise `matrix`, keeping at most `rank` latent dimensions.
    ///
    /// The rank is clamped to `min(users, items)` so every vector shares the
    /// same dimensionality. An empty matrix yields empty factor tables.
    ///
    /// # Errors
    /// Returns [`FactorError::ZeroRank`] for `rank == 0` and
    /// [`FactorError::Decomposition`] when the SVD does not converge.
    ///
    /// # Examples
    /// ```
    /// use recnews_core::Interaction;
    /// use recnews_factors::{FactorModel, InteractionMatrix};
    ///
    /// # fn main() -> Result<(), recnews_factors::FactorError> {
    /// let matrix = InteractionMatrix::from_interactions(&[
    ///     Interaction::new("u1", "i1", 5.0),
    ///     Interaction::new("u2", "i2", 3.0),
    /// ]);
    /// let model = FactorModel::fit(&matrix, 2)?;
    /// assert_eq!(model.rank(), 2);
    /// assert_eq!(model.user_factors().len(), 2);
    /// # Ok(())
    /// # }
    /// ```
    pub fn fit(matrix: &InteractionMatrix, rank: usize) -> Result<Self, FactorError> {
        if rank == 0 {
            return Err(FactorError::ZeroRank);
        }
        let (rows, cols) = matrix.shape();
        let effective = rank.min(rows).min(cols);
        if effective == 0 {
            return Ok(Self {
                rank: 0,
                singular_values: Vec::new(),
                user_factors: Vec::new(),
                item_factors: Vec::new(),
            });
        }
        if effective < rank {
            warn!("requested rank {rank} exceeds the {rows}x{cols} matrix; using {effective}");
        }

        let svd = SVD::try_new(matrix.to_dense(), true, true, f64::EPSILON, 0)
            .ok_or(FactorError::Decomposition { rows, cols })?;
        let (Some(u), Some(v_t)) = (svd.u.as_ref(), svd.v_t.as_ref()) else {
            return Err(FactorError::Decomposition { rows, cols });
        };

        let mut triplets: Vec<(usize, f64)> =
            svd.singular_values.iter().copied().enumerate().collect();
        triplets.sort_by(|a, b| b.1.total_cmp(&a.1));
        triplets.truncate(effective);

        let signs: Vec<f64> = triplets
            .iter()
            .map(|&(component, _)| dominant_sign(u.column(component).iter().copied()))
            .collect();

        let user_factors = (0..rows)
            .map(|row| {
                DVector::from_iterator(
                    effective,
                    triplets
                        .iter()
                        .zip(&signs)
                        .map(|(&(component, sigma), &sign)| {
                            scaled(u.get((row, component)).copied(), sigma, sign)
                        }),
                )
            })
            .collect();
        let item_factors = (0..cols)
            .map(|col| {
                DVector::from_iterator(
                    effective,
                    triplets
                        .iter()
                        .zip(&signs)
                        .map(|(&(component, _), &sign)| {
                            scaled(v_t.get((component, col)).copied(), 1.0, sign)
                        }),
                )
            })
            .collect();

        let singular_values = triplets.iter().map(|&(_, sigma)| sigma).collect();
        debug!("factorised {rows}x{cols} interaction matrix at rank {effective}");
        Ok(Self {
            rank: effective,
            singular_values,
            user_factors,
            item_factors,
        })
    }

    /// Latent dimensionality shared by every factor vector.
    #[must_use]
    pub const fn rank(&self) -> usize {
        self.rank
    }

    /// Retained singular values, largest first.
    #[must_use]
    pub fn singular_values(&self) -> &[f64] {
        &self.singular_values
    }

    /// Factor vector for a user index.
    #[must_use]
    pub fn user_factor(&self, position: usize) -> Option<&DVector<f64>> {
        self.user_factors.get(position)
    }

    /// Factor vector for an item index.
    #[must_use]
    pub fn item_factor(&self, position: usize) -> Option<&DVector<f64>> {
        self.item_factors.get(position)
    }

    /// All user factors in user-index order.
    #[must_use]
    pub fn user_factors(&self) -> &[DVector<f64>] {
        &self.user_factors
    }

    /// All item factors in item-index order.
    #[must_use]
    pub fn item_factors(&self) -> &[DVector<f64>] {
        &self.item_factors
    }
}

#[expect(
    clippy::float_arithmetic,
    reason = "factor entries are scaled by singular values"
)]
fn scaled(value: Option<f64>, sigma: f64, sign: f64) -> f64 {
    value.unwrap_or(0.0) * sigma * sign
}

/// `-1.0` when the largest-magnitude entry is negative, else `1.0`.
fn dominant_sign(values: impl Iterator<Item = f64>) -> f64 {
    let dominant = values.fold(0.0_f64, |best, value| {
        if value.abs() > best.abs() { value } else { best }
    });
    if dominant < 0.0 { -1.0 } else { 1.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recnews_core::Interaction;
    use recnews_core::test_support::{mirrored_interactions, sample_tables};
    use rstest::rstest;

    const TOLERANCE: f64 = 1e-9;

    #[rstest]
    fn rejects_zero_rank() {
        let matrix = InteractionMatrix::from_interactions(&mirrored_interactions());
        assert_eq!(FactorModel::fit(&matrix, 0), Err(FactorError::ZeroRank));
    }

    #[rstest]
    fn empty_matrix_has_no_factors() {
        let matrix = InteractionMatrix::from_interactions(&[]);
        let model = FactorModel::fit(&matrix, DEFAULT_RANK).expect("empty fit");
        assert_eq!(model.rank(), 0);
        assert!(model.user_factors().is_empty());
        assert!(model.item_factors().is_empty());
    }

    #[rstest]
    fn mirrored_matrix_has_known_spectrum() {
        let matrix = InteractionMatrix::from_interactions(&mirrored_interactions());
        let model = FactorModel::fit(&matrix, 2).expect("fit");
        let sigma = model.singular_values();
        assert_eq!(sigma.len(), 2);
        assert!(sigma.iter().zip([6.0, 4.0]).all(|(s, e)| (s - e).abs() < TOLERANCE));
    }

    #[rstest]
    fn factors_reconstruct_the_matrix_at_full_rank() {
        let matrix = InteractionMatrix::from_interactions(&mirrored_interactions());
        let model = FactorModel::fit(&matrix, 2).expect("fit");
        let dense = matrix.to_dense();
        for (row, user) in model.user_factors().iter().enumerate() {
            for (col, item) in model.item_factors().iter().enumerate() {
                let expected = dense.get((row, col)).copied().expect("in range");
                assert!((user.dot(item) - expected).abs() < TOLERANCE);
            }
        }
    }

    #[rstest]
    #[case(1, 1)]
    #[case(2, 2)]
    #[case(10, 2)]
    fn rank_is_clamped_and_shared(#[case] requested: usize, #[case] expected: usize) {
        let matrix = InteractionMatrix::from_interactions(&mirrored_interactions());
        let model = FactorModel::fit(&matrix, requested).expect("fit");
        assert_eq!(model.rank(), expected);
        assert!(model.user_factors().iter().all(|v| v.len() == expected));
        assert!(model.item_factors().iter().all(|v| v.len() == expected));
    }

    #[rstest]
    fn one_vector_per_user_and_item() {
        let tables = sample_tables();
        let matrix = InteractionMatrix::from_interactions(&tables.interactions);
        let model = FactorModel::fit(&matrix, DEFAULT_RANK).expect("fit");
        assert_eq!(model.user_factors().len(), matrix.users().len());
        assert_eq!(model.item_factors().len(), matrix.items().len());
    }

    #[rstest]
    fn refitting_is_deterministic() {
        let matrix = InteractionMatrix::from_interactions(&[
            Interaction::new("a", "x", 3.0),
            Interaction::new("a", "y", 1.0),
            Interaction::new("b", "y", 2.0),
            Interaction::new("c", "z", 4.0),
            Interaction::new("c", "x", 0.5),
        ]);
        let first = FactorModel::fit(&matrix, 2).expect("fit");
        let second = FactorModel::fit(&matrix, 2).expect("fit");
        assert_eq!(first, second);
    }
}
