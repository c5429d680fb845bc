//! Immutable model snapshot built once per data refresh.
#![forbid(unsafe_code)]

use log::info;
use recnews_core::{CatalogueError, ClusterTable, ItemCatalogue, SnapshotTables};
use recnews_factors::{DEFAULT_RANK, FactorError, LatentFactors};
use thiserror::Error;

/// Tunable model parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelConfig {
    /// Number of latent dimensions kept by the factorisation.
    pub rank: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self { rank: DEFAULT_RANK }
    }
}

/// Errors raised while building a [`Snapshot`].
#[derive(Debug, Error)]
pub enum SnapshotError {
    /// A required table was empty; the engine must not start serving.
    #[error("snapshot table `{table}` is empty")]
    EmptyTable {
        /// Name of the empty table.
        table: &'static str,
    },
    /// The item table repeated an identifier.
    #[error("invalid item catalogue")]
    Catalogue(#[source] CatalogueError),
    /// Factorising the interaction matrix failed.
    #[error("failed to fit latent factors")]
    Factors(#[source] FactorError),
}

/// Catalogue, cluster assignments, and latent factors from one data snapshot.
///
/// A snapshot is never mutated after [`Snapshot::build`]; refreshing data
/// means building a new snapshot and swapping it in.
#[derive(Debug, Clone)]
pub struct Snapshot {
    catalogue: ItemCatalogue,
    clusters: ClusterTable,
    factors: LatentFactors,
}

impl Snapshot {
    /// Validate the raw tables and fit the factor model.
    ///
    /// # Errors
    /// Returns [`SnapshotError::EmptyTable`] when any table is empty, and
    /// wraps catalogue and factorisation failures.
    ///
    /// # Examples
    /// ```
    /// use recnews_core::{ClusterAssignment, Interaction, Item, SnapshotTables};
    /// use recnews_hybrid::{ModelConfig, Snapshot};
    ///
    /// # fn main() -> Result<(), recnews_hybrid::SnapshotError> {
    /// let tables = SnapshotTables {
    ///     interactions: vec![Interaction::new("u1", "i1", 1.0)],
    ///     items: vec![Item::new("i1", 0.5, 0.5)],
    ///     clusters: vec![ClusterAssignment::new("u1", 0, ["i1"])],
    /// };
    /// let snapshot = Snapshot::build(tables, ModelConfig::default())?;
    /// assert_eq!(snapshot.catalogue().len(), 1);
    /// # Ok(())
    /// # }
    /// ```
    pub fn build(tables: SnapshotTables, config: ModelConfig) -> Result<Self, SnapshotError> {
        let SnapshotTables {
            interactions,
            items,
            clusters,
        } = tables;
        require_rows("interactions", interactions.len())?;
        require_rows("items", items.len())?;
        require_rows("clusters", clusters.len())?;

        let catalogue = ItemCatalogue::new(items).map_err(SnapshotError::Catalogue)?;
        let clusters = ClusterTable::new(clusters);
        let factors =
            LatentFactors::fit(&interactions, config.rank).map_err(SnapshotError::Factors)?;
        info!(
            "snapshot ready: {} items, {} clustered users, {} interactions",
            catalogue.len(),
            clusters.len(),
            interactions.len()
        );
        Ok(Self {
            catalogue,
            clusters,
            factors,
        })
    }

    /// Item catalogue.
    #[must_use]
    pub const fn catalogue(&self) -> &ItemCatalogue {
        &self.catalogue
    }

    /// Cluster-assignment table.
    #[must_use]
    pub const fn clusters(&self) -> &ClusterTable {
        &self.clusters
    }

    /// Fitted latent factors.
    #[must_use]
    pub const fn factors(&self) -> &LatentFactors {
        &self.factors
    }
}

const fn require_rows(table: &'static str, rows: usize) -> Result<(), SnapshotError> {
    if rows == 0 {
        Err(SnapshotError::EmptyTable { table })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recnews_core::Item;
    use recnews_core::test_support::sample_tables;
    use rstest::rstest;

    #[rstest]
    #[case("interactions")]
    #[case("items")]
    #[case("clusters")]
    fn empty_tables_are_fatal(#[case] table: &'static str) {
        let mut tables = sample_tables();
        match table {
            "interactions" => tables.interactions.clear(),
            "items" => tables.items.clear(),
            _ => tables.clusters.clear(),
        }
        let err = Snapshot::build(tables, ModelConfig::default()).expect_err("empty table");
        match err {
            SnapshotError::EmptyTable { table: reported } => assert_eq!(reported, table),
            other => panic!("expected EmptyTable, found {other:?}"),
        }
    }

    #[rstest]
    fn duplicate_items_are_rejected() {
        let mut tables = sample_tables();
        tables.items.push(Item::new("i1", 0.0, 0.0));
        let err = Snapshot::build(tables, ModelConfig::default()).expect_err("duplicate");
        assert!(matches!(err, SnapshotError::Catalogue(_)));
    }

    #[rstest]
    fn zero_rank_is_rejected() {
        let err = Snapshot::build(sample_tables(), ModelConfig { rank: 0 }).expect_err("rank 0");
        assert!(matches!(err, SnapshotError::Factors(FactorError::ZeroRank)));
    }

    #[rstest]
    fn builds_every_component() {
        let snapshot = Snapshot::build(sample_tables(), ModelConfig::default()).expect("build");
        assert_eq!(snapshot.catalogue().len(), 5);
        assert_eq!(snapshot.clusters().len(), 4);
        assert_eq!(snapshot.factors().model().rank(), DEFAULT_RANK);
    }
}
