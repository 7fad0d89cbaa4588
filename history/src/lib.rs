//! Launch history ledger.
//!
//! Every launch appends an entry; entries that share a normalized invocation text fold into
//! one record whose recency-decayed score feeds the completion ranking.
//! Scores are computed at write time against the wall clock and never on read.

mod decay;
mod error;
mod ledger;
mod persist;
mod tests;

pub use decay::{decayed_score, recency_weight};
pub use error::HistoryError;
pub use ledger::{History, HistoryEntry, HistoryRecord, HistoryStats};
pub use persist::{format_line, parse_line};
