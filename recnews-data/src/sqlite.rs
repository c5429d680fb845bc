//! Read-only SQLite loader for snapshot tables.
#![forbid(unsafe_code)]

use camino::Utf8Path;
use chrono::{DateTime, Utc};
use log::{debug, info};
use recnews_core::{ClusterAssignment, Fields, Interaction, Item, SnapshotTables};
use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, Row};

use crate::{LoadError, recency_from_issued};

const INTERACTIONS: &str = "interactions";
const NEWS_ITEMS: &str = "news_items";
const CLUSTER_ASSIGNMENTS: &str = "cluster_assignments";

/// Columns of `news_items` that map onto [`Item`] fields rather than content.
const ITEM_COLUMNS: [&str; 3] = ["item_id", "popularity_score", "recency_score"];

/// Keys serialised alongside content fields; same-named columns are dropped.
const RESERVED_FIELDS: [&str; 2] = ["id", "similarity"];

/// Load every snapshot table from the SQLite database at `path`.
///
/// Missing recency scores are derived from `issued` timestamps relative to
/// the current time. See [`load_snapshot_at`] for the table layout.
///
/// # Errors
/// See [`load_snapshot_at`].
pub fn load_snapshot(path: &Utf8Path) -> Result<SnapshotTables, LoadError> {
    load_snapshot_at(path, Utc::now())
}

/// Load every snapshot table, deriving missing recency scores against `now`.
///
/// The database is opened read-only and must contain:
/// - `interactions(user_id, item_id, interaction_score)`
/// - `news_items(item_id, popularity_score, recency_score, ...)`, where every
///   other non-null text, integer, or real column becomes a content field
/// - `cluster_assignments(user_id, cluster_id, history)`, with `history` a
///   JSON array of item ids
///
/// # Errors
/// Returns [`LoadError`] when the database cannot be opened, a table or column
/// is missing, or a row cannot be decoded.
pub fn load_snapshot_at(path: &Utf8Path, now: DateTime<Utc>) -> Result<SnapshotTables, LoadError> {
    let connection = Connection::open_with_flags(path.as_std_path(), OpenFlags::SQLITE_OPEN_READ_ONLY)
        .map_err(|source| LoadError::OpenDatabase {
            path: path.to_path_buf(),
            source,
        })?;

    let tables = SnapshotTables {
        interactions: load_interactions(&connection)?,
        items: load_items(&connection, now)?,
        clusters: load_clusters(&connection)?,
    };
    info!(
        "loaded snapshot from {path}: {} interactions, {} items, {} cluster rows",
        tables.interactions.len(),
        tables.items.len(),
        tables.clusters.len()
    );
    Ok(tables)
}

fn query_error(table: &'static str) -> impl Fn(rusqlite::Error) -> LoadError {
    move |source| LoadError::Query { table, source }
}

fn load_interactions(connection: &Connection) -> Result<Vec<Interaction>, LoadError> {
    let mut statement = connection
        .prepare(
            "SELECT user_id, item_id, interaction_score FROM interactions ORDER BY rowid",
        )
        .map_err(query_error(INTERACTIONS))?;
    let rows = statement
        .query_map([], |row| {
            Ok(Interaction::new(
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, f64>(2)?,
            ))
        })
        .map_err(query_error(INTERACTIONS))?;
    rows.collect::<Result<Vec<_>, _>>()
        .map_err(query_error(INTERACTIONS))
}

/// Raw `news_items` row before recency resolution.
struct ItemRow {
    id: String,
    popularity_score: f64,
    recency_score: Option<f64>,
    fields: Fields,
}

fn load_items(connection: &Connection, now: DateTime<Utc>) -> Result<Vec<Item>, LoadError> {
    let mut statement = connection
        .prepare("SELECT * FROM news_items ORDER BY rowid")
        .map_err(query_error(NEWS_ITEMS))?;
    let columns: Vec<String> = statement
        .column_names()
        .into_iter()
        .map(str::to_owned)
        .collect();
    let rows = statement
        .query_map([], |row| read_item_row(row, &columns))
        .map_err(query_error(NEWS_ITEMS))?;

    let mut items = Vec::new();
    for row in rows {
        let item_row = row.map_err(query_error(NEWS_ITEMS))?;
        items.push(resolve_recency(item_row, now)?);
    }
    Ok(items)
}

fn read_item_row(row: &Row<'_>, columns: &[String]) -> rusqlite::Result<ItemRow> {
    let mut fields = Fields::new();
    for (index, name) in columns.iter().enumerate() {
        if ITEM_COLUMNS.contains(&name.as_str()) {
            continue;
        }
        if RESERVED_FIELDS.contains(&name.as_str()) {
            debug!("skipping column {name} in news_items: it clashes with a result key");
            continue;
        }
        let rendered = match row.get_ref(index)? {
            ValueRef::Null => continue,
            ValueRef::Integer(value) => value.to_string(),
            ValueRef::Real(value) => value.to_string(),
            ValueRef::Text(bytes) => String::from_utf8_lossy(bytes).into_owned(),
            ValueRef::Blob(_) => {
                debug!("skipping blob column {name} in news_items");
                continue;
            }
        };
        fields.insert(name.clone(), rendered);
    }
    Ok(ItemRow {
        id: row.get("item_id")?,
        popularity_score: row.get("popularity_score")?,
        recency_score: row.get("recency_score")?,
        fields,
    })
}

fn resolve_recency(row: ItemRow, now: DateTime<Utc>) -> Result<Item, LoadError> {
    let ItemRow {
        id,
        popularity_score,
        recency_score: stored_recency,
        fields,
    } = row;
    let recency_score = match stored_recency {
        Some(score) => score,
        None => {
            let Some(issued) = fields.get("issued") else {
                return Err(LoadError::MissingRecency { item_id: id });
            };
            let published = DateTime::parse_from_rfc3339(issued).map_err(|source| {
                LoadError::InvalidIssued {
                    item_id: id.clone(),
                    issued: issued.clone(),
                    source,
                }
            })?;
            recency_from_issued(published.with_timezone(&Utc), now)
        }
    };
    let mut item = Item::new(id, popularity_score, recency_score);
    item.fields = fields;
    Ok(item)
}

fn load_clusters(connection: &Connection) -> Result<Vec<ClusterAssignment>, LoadError> {
    let mut statement = connection
        .prepare(
            "SELECT user_id, cluster_id, history FROM cluster_assignments ORDER BY rowid",
        )
        .map_err(query_error(CLUSTER_ASSIGNMENTS))?;
    let rows = statement
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, i64>(1)?,
                row.get::<_, String>(2)?,
            ))
        })
        .map_err(query_error(CLUSTER_ASSIGNMENTS))?;

    let mut clusters = Vec::new();
    for row in rows {
        let (user_id, cluster_id, history_json) =
            row.map_err(query_error(CLUSTER_ASSIGNMENTS))?;
        let Ok(label) = u32::try_from(cluster_id) else {
            return Err(LoadError::ClusterIdOutOfRange {
                user_id,
                cluster_id,
            });
        };
        let history: Vec<String> = match serde_json::from_str(&history_json) {
            Ok(ids) => ids,
            Err(source) => return Err(LoadError::DecodeHistory { user_id, source }),
        };
        clusters.push(ClusterAssignment::new(user_id, label, history));
    }
    Ok(clusters)
}
