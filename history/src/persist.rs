//! Tab-separated history file: `display_name \t normalized_path \t unix_seconds`, one launch
//! per line.

use std::fs;
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::error::HistoryError;
use crate::ledger::{History, HistoryEntry};

/// Parses one persisted line. `line_no` is 1-based and only used for error reporting.
pub fn parse_line(line: &str, line_no: usize) -> Result<HistoryEntry, HistoryError> {
    let fields: Vec<&str> = line.split('\t').collect();
    let [display_name, normalized_path, timestamp] = fields[..] else {
        return Err(HistoryError::FieldCount {
            line: line_no,
            found: fields.len(),
        });
    };

    let at = timestamp
        .trim()
        .parse::<i64>()
        .ok()
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
        .ok_or_else(|| HistoryError::Timestamp {
            line: line_no,
            value: timestamp.to_string(),
        })?;

    Ok(HistoryEntry {
        display_name: display_name.to_string(),
        normalized_path: normalized_path.to_string(),
        at,
    })
}

pub fn format_line(entry: &HistoryEntry) -> String {
    format!(
        "{}\t{}\t{}",
        entry.display_name,
        entry.normalized_path,
        entry.at.timestamp()
    )
}

fn backup_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".bk");
    PathBuf::from(name)
}

impl History {
    /// Replays a history file. A missing file is an empty ledger; malformed lines are skipped.
    pub fn load_from(path: impl AsRef<Path>) -> Result<History, HistoryError> {
        let path = path.as_ref();
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %path.display(), "no history file");
                return Ok(History::new());
            }
            Err(err) => return Err(HistoryError::io(path, err)),
        };

        let now = Utc::now();
        let mut history = History::new();
        for (idx, line) in text.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            match parse_line(line, idx + 1) {
                Ok(entry) => {
                    history.record_invocation_at(
                        &entry.normalized_path,
                        &entry.display_name,
                        entry.at,
                        now,
                    );
                }
                Err(err) => warn!(path = %path.display(), "skipping history line: {err}"),
            }
        }

        debug!(
            path = %path.display(),
            entries = history.entries().len(),
            records = history.len(),
            "history loaded"
        );
        Ok(history)
    }

    /// Writes the last `max` entries to `path`, keeping the previous file as `<path>.bk`.
    pub fn save_to(&self, path: impl AsRef<Path>, max: usize) -> Result<(), HistoryError> {
        let path = path.as_ref();
        let backup = backup_path(path);
        let _ = fs::remove_file(&backup);
        let _ = fs::copy(path, &backup);

        let file = fs::File::create(path).map_err(|e| HistoryError::io(path, e))?;
        let mut out = BufWriter::new(file);

        let entries = self.entries();
        let skip = entries.len().saturating_sub(max);
        for entry in &entries[skip..] {
            writeln!(out, "{}", format_line(entry)).map_err(|e| HistoryError::io(path, e))?;
        }
        out.flush().map_err(|e| HistoryError::io(path, e))?;

        debug!(
            path = %path.display(),
            written = entries.len() - skip,
            dropped = skip,
            "history saved"
        );
        Ok(())
    }
}
