use std::collections::HashMap;

use chrono::{DateTime, Utc};
use tracing::trace;

use crate::decay::decayed_score;

/// Deviation from the average below which a record counts as average.
const NEUTRAL_EPSILON: f64 = 0.001;

/// One launch, in the order it was recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub display_name: String,
    pub normalized_path: String,
    pub at: DateTime<Utc>,
}

/// All launches of one normalized invocation text.
///
/// The display name is the one seen first; later launches under another name only add a
/// timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRecord {
    display_name: String,
    normalized_path: String,
    timestamps: Vec<DateTime<Utc>>,
    decayed_score: i64,
}

impl HistoryRecord {
    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn normalized_path(&self) -> &str {
        &self.normalized_path
    }

    pub fn timestamps(&self) -> &[DateTime<Utc>] {
        &self.timestamps
    }

    pub fn last_used(&self) -> Option<DateTime<Utc>> {
        self.timestamps.last().copied()
    }

    /// Score as of the last write to this record.
    pub fn decayed_score(&self) -> i64 {
        self.decayed_score
    }
}

/// Population statistics used to normalize record scores.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HistoryStats {
    pub average: f64,
    pub standard_error: f64,
}

/// In-memory history ledger.
///
/// Mutation is single-writer: callers serialize [`History::record_invocation`] themselves.
#[derive(Debug, Clone, Default)]
pub struct History {
    records: Vec<HistoryRecord>,
    by_path: HashMap<String, usize>,
    entries: Vec<HistoryEntry>,
    total_decayed_score: i64,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a launch, scoring it against the current time. Returns the record's new score.
    pub fn record_invocation(
        &mut self,
        normalized_path: &str,
        display_name: &str,
        at: DateTime<Utc>,
    ) -> i64 {
        self.record_invocation_at(normalized_path, display_name, at, Utc::now())
    }

    /// Same as [`History::record_invocation`] with an explicit "now".
    ///
    /// The ledger total is adjusted by the record's delta; it is never rescanned.
    pub fn record_invocation_at(
        &mut self,
        normalized_path: &str,
        display_name: &str,
        at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> i64 {
        let idx = match self.by_path.get(normalized_path) {
            Some(&idx) => idx,
            None => {
                self.records.push(HistoryRecord {
                    display_name: display_name.to_string(),
                    normalized_path: normalized_path.to_string(),
                    timestamps: Vec::new(),
                    decayed_score: 0,
                });
                let idx = self.records.len() - 1;
                self.by_path.insert(normalized_path.to_string(), idx);
                idx
            }
        };

        let record = &mut self.records[idx];
        record.timestamps.push(at);
        let old = record.decayed_score;
        record.decayed_score = decayed_score(&record.timestamps, now);
        let new = record.decayed_score;
        self.total_decayed_score += new - old;

        self.entries.push(HistoryEntry {
            display_name: display_name.to_string(),
            normalized_path: normalized_path.to_string(),
            at,
        });

        trace!(path = normalized_path, old, new, "history record updated");
        new
    }

    pub fn get(&self, normalized_path: &str) -> Option<&HistoryRecord> {
        self.by_path
            .get(normalized_path)
            .map(|&idx| &self.records[idx])
    }

    /// Distinct records in first-seen order.
    pub fn records(&self) -> &[HistoryRecord] {
        &self.records
    }

    /// Every recorded launch, oldest first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn most_recent_first(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().rev()
    }

    /// Number of distinct records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn total_decayed_score(&self) -> i64 {
        self.total_decayed_score
    }

    /// Sum of every record's score, recomputed. Only for checking the incremental total.
    pub fn reconcile(&self) -> i64 {
        self.records.iter().map(|r| r.decayed_score).sum()
    }

    pub fn average_score(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        self.total_decayed_score as f64 / self.records.len() as f64
    }

    /// Root of the mean squared deviation from [`History::average_score`].
    pub fn standard_error(&self) -> f64 {
        if self.records.is_empty() {
            return 0.0;
        }
        let average = self.average_score();
        let sum: f64 = self
            .records
            .iter()
            .map(|r| (r.decayed_score as f64 - average).powi(2))
            .sum();
        (sum / self.records.len() as f64).sqrt()
    }

    pub fn stats(&self) -> HistoryStats {
        HistoryStats {
            average: self.average_score(),
            standard_error: self.standard_error(),
        }
    }

    /// Maps a record's score to roughly `[0, 1]` around the population average.
    ///
    /// - No record: `0.0`.
    /// - Within `0.001` of the average: `0.5`.
    /// - Otherwise `((10 * deviation / standard_error) + 50) / 100`, capped at `1.0` but not
    ///   floored, so far-below-average records go negative.
    pub fn normalized_score(&self, normalized_path: &str, average: f64, standard_error: f64) -> f64 {
        let Some(record) = self.get(normalized_path) else {
            return 0.0;
        };
        let deviation = record.decayed_score as f64 - average;
        if deviation.abs() < NEUTRAL_EPSILON || standard_error <= 0.0 {
            return 0.5;
        }
        f64::min(1.0, ((10.0 * deviation) / standard_error + 50.0) / 100.0)
    }

    pub fn normalized_score_with(&self, normalized_path: &str, stats: HistoryStats) -> f64 {
        self.normalized_score(normalized_path, stats.average, stats.standard_error)
    }
}
