//! Completion across keystrokes.
//!
//! Typing usually extends the previous cursor value, so the last command list can be
//! narrowed instead of rescanning the registry.

use input::tokenize;
use tracing::debug;

use crate::context::{CompletionKind, cursor_value, path_base_dir, resolve_path, select_kind};
use crate::ranking::{Completer, RankedCandidate};

/// Candidates to display for one input state.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Completion {
    pub kind: Option<CompletionKind>,
    pub candidates: Vec<RankedCandidate>,
}

impl Completion {
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct CompletionSession {
    prev_value: String,
    /// Last command list, before truncation.
    commands: Vec<RankedCandidate>,
}

impl CompletionSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.prev_value.clear();
        self.commands.clear();
    }

    /// Recomputes candidates for `text` with the cursor at byte offset `cursor`.
    pub fn update(
        &mut self,
        completer: &Completer<'_>,
        text: &str,
        cursor: usize,
        history_search: bool,
    ) -> Completion {
        let line = tokenize(text);
        let value = cursor_value(&line, cursor).to_string();
        if !value.starts_with(&self.prev_value) {
            self.commands.clear();
        }
        self.prev_value.clone_from(&value);

        if line.is_empty() {
            self.commands.clear();
            return Completion::default();
        }

        let kind = select_kind(completer, &line, cursor, history_search);
        debug!(?kind, value, "completion pass");
        let limit = completer.config().candidate_limit();

        let candidates = match kind {
            Some(CompletionKind::History) => {
                let mut ranked = completer.complete_history(line.first_value());
                truncate(&mut ranked, limit);
                ranked
            }
            Some(CompletionKind::Option) => completer.complete_option(&line, cursor),
            Some(CompletionKind::Path) => {
                let base = path_base_dir(completer, &line, cursor);
                completer.complete_path(&resolve_path(&base, &value))
            }
            Some(CompletionKind::Command) => {
                let previous = std::mem::take(&mut self.commands);
                let previous = (!previous.is_empty()).then_some(previous);
                self.commands = completer.complete_command(&value, previous);
                let mut ranked = self.commands.clone();
                truncate(&mut ranked, limit);
                ranked
            }
            None => Vec::new(),
        };

        if kind != Some(CompletionKind::Command) {
            self.commands.clear();
        }
        Completion { kind, candidates }
    }
}

fn truncate(ranked: &mut Vec<RankedCandidate>, limit: Option<usize>) {
    if let Some(max) = limit {
        ranked.truncate(max);
    }
}
