//! Small, hand-checkable snapshot tables shared by unit and behaviour tests.

use crate::{ClusterAssignment, Interaction, Item, SnapshotTables};

/// Two users with mirrored tastes over two items.
///
/// `u1` mostly reads `i1` and `u2` mostly reads `i2`.
pub fn mirrored_interactions() -> Vec<Interaction> {
    vec![
        Interaction::new("u1", "i1", 5.0),
        Interaction::new("u1", "i2", 1.0),
        Interaction::new("u2", "i1", 1.0),
        Interaction::new("u2", "i2", 5.0),
    ]
}

/// A five-item catalogue with distinct popularity and recency scores.
pub fn sample_items() -> Vec<Item> {
    vec![
        Item::new("i1", 0.2, 0.9).with_field("title", "Local election results"),
        Item::new("i2", 0.6, 0.3).with_field("title", "Cup final report"),
        Item::new("i3", 0.9, 0.1).with_field("title", "Heatwave warning"),
        Item::new("i4", 0.4, 0.8).with_field("title", "New tram line"),
        Item::new("i5", 0.1, 0.2).with_field("title", "Museum reopens"),
    ]
}

/// Two clusters: `{u1, u2, u3}` and `{u4}`.
pub fn sample_clusters() -> Vec<ClusterAssignment> {
    vec![
        ClusterAssignment::new("u1", 0, ["i1", "i2"]),
        ClusterAssignment::new("u2", 0, ["i2", "i4"]),
        ClusterAssignment::new("u4", 1, ["i5"]),
        ClusterAssignment::new("u3", 0, ["i1"]),
    ]
}

/// A complete snapshot built from the helpers above.
pub fn sample_tables() -> SnapshotTables {
    let mut interactions = mirrored_interactions();
    interactions.extend([
        Interaction::new("u3", "i3", 2.0),
        Interaction::new("u3", "i4", 4.0),
        Interaction::new("u4", "i5", 3.0),
        Interaction::new("u1", "i1", 1.0),
    ]);
    SnapshotTables {
        interactions,
        items: sample_items(),
        clusters: sample_clusters(),
    }
}
