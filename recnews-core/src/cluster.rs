//! Cluster assignments and cluster-neighbour candidate generation.
//!
//! Users are grouped into discrete clusters offline. At request time the
//! [`ClusterTable`] finds the peers sharing a user's cluster and unions their
//! reading histories into a candidate set. Unlike the latent-factor path, an
//! unknown user is a hard error here: there is no meaningful empty candidate
//! set for a user without a cluster.

use std::collections::{HashMap, HashSet};

use log::warn;

use crate::RecommendError;

/// One user's cluster label and reading history.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClusterAssignment {
    /// User the row describes.
    pub user_id: String,
    /// Cluster label.
    pub cluster_id: u32,
    /// Items the user has read.
    pub history: Vec<String>,
}

impl ClusterAssignment {
    /// Construct an assignment row.
    pub fn new<I, S>(user_id: impl Into<String>, cluster_id: u32, history: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            user_id: user_id.into(),
            cluster_id,
            history: history.into_iter().map(Into::into).collect(),
        }
    }
}

/// Peers of a user and the items they have touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterNeighbours {
    /// Cluster shared by every neighbour.
    pub cluster_id: u32,
    /// Every user in the cluster in table order, including the user.
    pub members: Vec<String>,
    /// Leading `top_p` members whose histories fed `candidates`.
    pub neighbours: Vec<String>,
    /// Deduplicated candidate item ids in first-encounter order.
    pub candidates: Vec<String>,
}

impl ClusterNeighbours {
    /// Candidate ids as a borrowed set, ready for catalogue restriction.
    #[must_use]
    pub fn candidate_set(&self) -> HashSet<&str> {
        self.candidates.iter().map(String::as_str).collect()
    }
}

/// Cluster-assignment table holding at most one row per user.
///
/// When the source table repeats a user, the first row wins and later rows
/// are ignored.
///
/// # Examples
/// ```
/// use recnews_core::{ClusterAssignment, ClusterTable};
///
/// # fn main() -> Result<(), recnews_core::RecommendError> {
/// let table = ClusterTable::new(vec![
///     ClusterAssignment::new("u1", 0, ["a"]),
///     ClusterAssignment::new("u2", 0, ["b", "a"]),
///     ClusterAssignment::new("u3", 1, ["c"]),
/// ]);
/// let found = table.neighbours("u1", Some(1))?;
/// assert_eq!(found.members, ["u1", "u2"]);
/// assert_eq!(found.neighbours, ["u1"]);
/// assert_eq!(found.candidates, ["a"]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClusterTable {
    rows: Vec<ClusterAssignment>,
    by_user: HashMap<String, usize>,
}

impl ClusterTable {
    /// Build the table, keeping the first row for each user.
    #[must_use]
    pub fn new(rows: Vec<ClusterAssignment>) -> Self {
        let mut kept = Vec::with_capacity(rows.len());
        let mut by_user = HashMap::with_capacity(rows.len());
        for row in rows {
            if by_user.contains_key(&row.user_id) {
                warn!(
                    "ignoring repeated cluster assignment for user {} (cluster {})",
                    row.user_id, row.cluster_id
                );
                continue;
            }
            by_user.insert(row.user_id.clone(), kept.len());
            kept.push(row);
        }
        Self {
            rows: kept,
            by_user,
        }
    }

    /// Cluster assigned to `user_id`, if any.
    #[must_use]
    pub fn cluster_of(&self, user_id: &str) -> Option<u32> {
        self.by_user
            .get(user_id)
            .and_then(|&position| self.rows.get(position))
            .map(|row| row.cluster_id)
    }

    /// Find the cluster peers of `user_id` and the items they have touched.
    ///
    /// Every member of the cluster is reported. Only the first `top_p`
    /// members in table order contribute candidates; `top_p` defaults to,
    /// and is clamped to, the cluster size.
    ///
    /// # Errors
    /// Returns [`RecommendError::UserNotFound`] when the user has no row.
    pub fn neighbours(
        &self,
        user_id: &str,
        top_p: Option<usize>,
    ) -> Result<ClusterNeighbours, RecommendError> {
        let cluster_id = self
            .cluster_of(user_id)
            .ok_or_else(|| RecommendError::UserNotFound {
                user_id: user_id.to_owned(),
            })?;

        let members: Vec<&ClusterAssignment> = self
            .rows
            .iter()
            .filter(|row| row.cluster_id == cluster_id)
            .collect();
        let limit = top_p.map_or(members.len(), |p| p.min(members.len()));

        let mut seen = HashSet::new();
        let mut candidates = Vec::new();
        let mut neighbours = Vec::with_capacity(limit);
        for row in members.iter().take(limit) {
            neighbours.push(row.user_id.clone());
            for item in &row.history {
                if seen.insert(item.as_str()) {
                    candidates.push(item.clone());
                }
            }
        }

        Ok(ClusterNeighbours {
            cluster_id,
            members: members.into_iter().map(|row| row.user_id.clone()).collect(),
            neighbours,
            candidates,
        })
    }

    /// Number of users with an assignment.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Report whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn table() -> ClusterTable {
        ClusterTable::new(vec![
            ClusterAssignment::new("u1", 7, ["a", "b"]),
            ClusterAssignment::new("u2", 3, ["x"]),
            ClusterAssignment::new("u3", 7, ["b", "c"]),
            ClusterAssignment::new("u4", 7, ["d"]),
        ])
    }

    #[rstest]
    fn unknown_user_is_a_hard_error(table: ClusterTable) {
        let err = table.neighbours("ghost", None).expect_err("unknown user");
        assert_eq!(
            err,
            RecommendError::UserNotFound {
                user_id: "ghost".into()
            }
        );
    }

    #[rstest]
    fn collects_all_peers_by_default(table: ClusterTable) {
        let found = table.neighbours("u3", None).expect("known user");
        assert_eq!(found.cluster_id, 7);
        assert_eq!(found.members, ["u1", "u3", "u4"]);
        assert_eq!(found.neighbours, ["u1", "u3", "u4"]);
        assert_eq!(found.candidates, ["a", "b", "c", "d"]);
    }

    #[rstest]
    #[case(Some(1), &["u1"], &["a", "b"])]
    #[case(Some(2), &["u1", "u3"], &["a", "b", "c"])]
    #[case(Some(100), &["u1", "u3", "u4"], &["a", "b", "c", "d"])]
    #[case(Some(0), &[], &[])]
    fn top_p_limits_peers_in_table_order(
        table: ClusterTable,
        #[case] top_p: Option<usize>,
        #[case] neighbours: &[&str],
        #[case] candidates: &[&str],
    ) {
        let found = table.neighbours("u4", top_p).expect("known user");
        assert_eq!(found.neighbours, neighbours);
        assert_eq!(found.candidates, candidates);
    }

    #[rstest]
    #[case(Some(0))]
    #[case(Some(1))]
    #[case(Some(2))]
    fn narrow_top_p_still_reports_every_member(
        table: ClusterTable,
        #[case] top_p: Option<usize>,
    ) {
        let found = table.neighbours("u4", top_p).expect("known user");
        assert_eq!(found.members, ["u1", "u3", "u4"]);
        assert!(found.neighbours.len() < found.members.len());
        assert!(found.members.starts_with(&found.neighbours));
        assert!(!found.neighbours.iter().any(|peer| peer == "u4"));
    }

    #[rstest]
    fn repeated_users_keep_first_row() {
        let table = ClusterTable::new(vec![
            ClusterAssignment::new("u1", 1, ["a"]),
            ClusterAssignment::new("u1", 2, ["b"]),
            ClusterAssignment::new("u2", 2, ["c"]),
        ]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cluster_of("u1"), Some(1));
        let found = table.neighbours("u2", None).expect("known user");
        assert_eq!(found.neighbours, ["u2"]);
        assert_eq!(found.candidates, ["c"]);
    }

    #[rstest]
    fn peers_share_one_candidate_set(table: ClusterTable) {
        let first = table.neighbours("u1", Some(2)).expect("known user");
        let second = table.neighbours("u4", Some(2)).expect("known user");
        assert_eq!(first.candidate_set(), second.candidate_set());
    }
}
