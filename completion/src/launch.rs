use chrono::{DateTime, Utc};
use history::History;
use tracing::debug;

use crate::candidate::Command;

/// Records a successful launch of `raw_input`.
///
/// A registered command with history enabled is stored under the typed text, so different
/// arguments stay separate records. With history disabled only the command name is kept.
/// Input that matched no command is stored as typed.
pub fn record_launch(
    history: &mut History,
    raw_input: &str,
    command: Option<&Command>,
    at: DateTime<Utc>,
) {
    let (name, path) = match command {
        Some(command) if command.history => (command.name.as_str(), raw_input),
        Some(command) => (command.name.as_str(), command.name.as_str()),
        None => (raw_input, raw_input),
    };
    let score = history.record_invocation(path, name, at);
    debug!(name, path, score, "launch recorded");
}
