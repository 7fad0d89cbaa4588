use chrono::{DateTime, Utc};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// `(age upper bound in seconds, weight)`, most recent first. Older launches weigh 0.
const BUCKETS: [(i64, i64); 7] = [
    (15 * MINUTE, 8),
    (HOUR, 6),
    (6 * HOUR, 5),
    (DAY, 4),
    (3 * DAY, 3),
    (7 * DAY, 2),
    (14 * DAY, 1),
];

/// Weight of one launch that happened `at`, seen from `now`.
///
/// Timestamps in the future count as the most recent bucket.
pub fn recency_weight(at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let age = (now - at).num_seconds();
    BUCKETS
        .iter()
        .find(|(limit, _)| age < *limit)
        .map_or(0, |(_, weight)| *weight)
}

/// Sum of [`recency_weight`] over every timestamp, not just the latest.
pub fn decayed_score(timestamps: &[DateTime<Utc>], now: DateTime<Utc>) -> i64 {
    timestamps.iter().map(|&at| recency_weight(at, now)).sum()
}
