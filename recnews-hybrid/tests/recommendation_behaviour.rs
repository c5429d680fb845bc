//! Behavioural coverage for the hybrid recommendation entry points.

use std::cell::RefCell;

use recnews_core::test_support::mirrored_interactions;
use recnews_core::{
    ClusterAssignment, Interaction, Item, RecommendError, RecommendRequest, Recommendation,
    Recommender, SnapshotTables,
};
use recnews_hybrid::{HybridRecommender, ModelConfig, Snapshot};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

type Outcome = Result<Vec<Recommendation>, RecommendError>;

/// Snapshot tables assembled by `Given` steps.
#[fixture]
pub fn tables() -> RefCell<SnapshotTables> {
    RefCell::new(SnapshotTables::default())
}

/// Captures the result of the `When` step.
#[fixture]
pub fn outcome() -> RefCell<Option<Outcome>> {
    RefCell::new(None)
}

fn recommender(tables: &RefCell<SnapshotTables>) -> HybridRecommender {
    let snapshot = Snapshot::build(tables.borrow().clone(), ModelConfig::default())
        .unwrap_or_else(|err| panic!("build snapshot: {err}"));
    HybridRecommender::new(snapshot)
}

fn request(user: &str, top_k: usize, top_p: Option<usize>, history: bool) -> RecommendRequest {
    RecommendRequest::new(user, top_k, top_p, history)
        .unwrap_or_else(|err| panic!("valid request parameters: {err}"))
}

fn recommended_ids(outcome: &RefCell<Option<Outcome>>) -> Vec<String> {
    let binding = outcome.borrow();
    match binding.as_ref() {
        Some(Ok(ranked)) => ranked.iter().map(|r| r.item.id.clone()).collect(),
        Some(Err(err)) => panic!("expected recommendations, got {err}"),
        None => panic!("a request must have been made"),
    }
}

#[given("a catalogue where i1 and i2 tie on popularity but i2 is fresher")]
fn popularity_tie(tables: &RefCell<SnapshotTables>) {
    *tables.borrow_mut() = SnapshotTables {
        interactions: vec![Interaction::new("u1", "i1", 1.0)],
        items: vec![Item::new("i1", 0.9, 0.1), Item::new("i2", 0.9, 0.9)],
        clusters: vec![ClusterAssignment::new("u1", 0, ["i1"])],
    };
}

#[given("the mirrored interaction snapshot")]
fn mirrored_snapshot(tables: &RefCell<SnapshotTables>) {
    *tables.borrow_mut() = SnapshotTables {
        interactions: mirrored_interactions(),
        items: vec![Item::new("i1", 0.1, 0.1), Item::new("i2", 0.9, 0.9)],
        clusters: vec![
            ClusterAssignment::new("u1", 0, ["i1"]),
            ClusterAssignment::new("u2", 0, ["i2"]),
        ],
    };
}

#[given("a cluster whose peers read three distinct items")]
fn three_item_cluster(tables: &RefCell<SnapshotTables>) {
    *tables.borrow_mut() = SnapshotTables {
        interactions: vec![
            Interaction::new("u1", "a", 1.0),
            Interaction::new("u2", "b", 1.0),
        ],
        items: vec![
            Item::new("a", 0.3, 0.3),
            Item::new("b", 0.2, 0.2),
            Item::new("c", 0.1, 0.1),
            Item::new("elsewhere", 1.0, 1.0),
        ],
        clusters: vec![
            ClusterAssignment::new("u1", 4, ["a", "b"]),
            ClusterAssignment::new("u2", 4, ["b", "c"]),
            ClusterAssignment::new("u3", 9, ["elsewhere"]),
        ],
    };
}

#[when("I request two recommendations without history")]
fn fallback_request(tables: &RefCell<SnapshotTables>, outcome: &RefCell<Option<Outcome>>) {
    let ranked = recommender(tables).by_latent_factors(&request("u1", 2, None, false));
    *outcome.borrow_mut() = Some(Ok(ranked));
}

#[when("I request one latent-factor recommendation for u1")]
fn latent_request(tables: &RefCell<SnapshotTables>, outcome: &RefCell<Option<Outcome>>) {
    let ranked = recommender(tables).by_latent_factors(&request("u1", 1, None, true));
    *outcome.borrow_mut() = Some(Ok(ranked));
}

#[when("I request cluster recommendations for u1 with a pool of 100")]
fn large_pool_request(tables: &RefCell<SnapshotTables>, outcome: &RefCell<Option<Outcome>>) {
    let result = recommender(tables).by_cluster(&request("u1", 50, Some(100), true));
    *outcome.borrow_mut() = Some(result);
}

#[when("I request cluster recommendations for an unknown reader")]
fn unknown_cluster_request(tables: &RefCell<SnapshotTables>, outcome: &RefCell<Option<Outcome>>) {
    let result = recommender(tables).by_cluster(&request("stranger", 5, None, true));
    *outcome.borrow_mut() = Some(result);
}

#[then("the items are ranked i2 then i1")]
fn ranked_by_recency(outcome: &RefCell<Option<Outcome>>) {
    assert_eq!(recommended_ids(outcome), ["i2", "i1"]);
}

#[then("i1 is ranked first")]
fn i1_ranked_first(outcome: &RefCell<Option<Outcome>>) {
    assert_eq!(recommended_ids(outcome), ["i1"]);
}

#[then("at most three items are returned")]
fn at_most_three(outcome: &RefCell<Option<Outcome>>) {
    let ids = recommended_ids(outcome);
    assert!(ids.len() <= 3, "expected at most three items, got {ids:?}");
    assert_eq!(ids, ["a", "b", "c"]);
}

#[then("the reader is reported as not found")]
fn reader_not_found(outcome: &RefCell<Option<Outcome>>) {
    let binding = outcome.borrow();
    match binding.as_ref() {
        Some(Err(RecommendError::UserNotFound { user_id })) => assert_eq!(user_id, "stranger"),
        Some(Ok(ranked)) => panic!("expected a not-found error, got {} items", ranked.len()),
        None => panic!("a request must have been made"),
    }
}

#[scenario(path = "tests/features/recommendation.feature", index = 0)]
fn fallback_tie_breaks_by_recency(
    tables: RefCell<SnapshotTables>,
    outcome: RefCell<Option<Outcome>>,
) {
    let _ = (tables, outcome);
}

#[scenario(path = "tests/features/recommendation.feature", index = 1)]
fn latent_factors_pick_favourite(
    tables: RefCell<SnapshotTables>,
    outcome: RefCell<Option<Outcome>>,
) {
    let _ = (tables, outcome);
}

#[scenario(path = "tests/features/recommendation.feature", index = 2)]
fn large_pool_is_clamped(tables: RefCell<SnapshotTables>, outcome: RefCell<Option<Outcome>>) {
    let _ = (tables, outcome);
}

#[scenario(path = "tests/features/recommendation.feature", index = 3)]
fn unclustered_reader_not_found(
    tables: RefCell<SnapshotTables>,
    outcome: RefCell<Option<Outcome>>,
) {
    let _ = (tables, outcome);
}
