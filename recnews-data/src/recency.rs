//! Recency scores derived from publication timestamps.

use chrono::{DateTime, Utc};

const SECONDS_PER_HOUR: f64 = 3_600.0;

/// Score an article published at `issued`, as seen at `now`.
///
/// The score is `1 / (1 + age_hours)`: `1.0` for an article published now and
/// decaying towards zero with age. Timestamps in the future count as age zero.
///
/// # Examples
/// ```
/// use chrono::{Duration, Utc};
/// use recnews_data::recency_from_issued;
///
/// let now = Utc::now();
/// assert_eq!(recency_from_issued(now, now), 1.0);
/// assert!((recency_from_issued(now - Duration::hours(1), now) - 0.5).abs() < 1e-9);
/// ```
#[must_use]
#[expect(
    clippy::float_arithmetic,
    reason = "recency decays hyperbolically with age in hours"
)]
#[expect(
    clippy::cast_precision_loss,
    reason = "article ages in seconds are far below 2^52"
)]
pub fn recency_from_issued(issued: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    let age_seconds = now.signed_duration_since(issued).num_seconds().max(0);
    let age_hours = age_seconds as f64 / SECONDS_PER_HOUR;
    1.0 / (1.0 + age_hours)
}
