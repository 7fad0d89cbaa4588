//! Ranking orchestrator.
//!
//! [`Completer`] owns nothing: history, commands, option providers, directory listing and
//! the script translator are borrowed from the caller for the duration of a pass.
//! Every entry point is infallible; failures show up as fewer candidates.

use std::cmp::Ordering;
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::Path;
use std::sync::Arc;

use history::History;
use input::{TokenizedLine, is_path, split_path};
use tracing::{debug, trace};

use crate::candidate::{Candidate, CommandRegistry, HistoryCandidate, PathPart, TextCandidate};
use crate::config::CompletionConfig;
use crate::matchers::{NO_MATCH, ScriptTranslator};

/// A candidate with its score for the current pass.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    pub candidate: Candidate,
    pub score: f64,
}

impl RankedCandidate {
    pub fn new(candidate: Candidate, score: f64) -> Self {
        Self { candidate, score }
    }
}

/// One entry returned by an [`OptionProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionEntry {
    pub value: String,
    pub description: Option<String>,
    pub icon: Option<String>,
    /// Kept regardless of the typed text.
    pub always_match: bool,
}

impl OptionEntry {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            description: None,
            icon: None,
            always_match: false,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn always_match(mut self) -> Self {
        self.always_match = true;
        self
    }
}

/// Per-command parameter completion.
pub trait OptionProvider {
    fn has_options(&self, command: &str) -> bool;

    /// `params` are the line's parameter values; `current` is the 1-based index of the one
    /// under the cursor.
    fn options(&self, command: &str, params: &[String], current: usize) -> Vec<OptionEntry>;
}

pub trait DirectoryLister {
    fn list_directory(&self, dir: &Path) -> io::Result<Vec<String>>;
}

/// Lists directories through `std::fs`, sorted by name.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLister;

impl DirectoryLister for FsLister {
    fn list_directory(&self, dir: &Path) -> io::Result<Vec<String>> {
        let entries = fs::read_dir(dir)?.map(|entry| entry.map(|e| e.file_name()));
        let mut names = readable_names(entries);
        names.sort();
        Ok(names)
    }
}

/// Entry names that could be read; unreadable entries are skipped.
pub(crate) fn readable_names(
    entries: impl IntoIterator<Item = io::Result<OsString>>,
) -> Vec<String> {
    entries
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(name) => Some(name.to_string_lossy().into_owned()),
            Err(err) => {
                debug!(%err, "skipping unreadable directory entry");
                None
            }
        })
        .collect()
}

static FS_LISTER: FsLister = FsLister;

pub struct Completer<'a> {
    config: &'a CompletionConfig,
    history: &'a History,
    commands: &'a CommandRegistry,
    options: Option<&'a dyn OptionProvider>,
    lister: &'a dyn DirectoryLister,
    translator: Option<Arc<dyn ScriptTranslator>>,
    cwd: String,
}

impl<'a> Completer<'a> {
    pub fn new(
        config: &'a CompletionConfig,
        history: &'a History,
        commands: &'a CommandRegistry,
    ) -> Self {
        Self {
            config,
            history,
            commands,
            options: None,
            lister: &FS_LISTER,
            translator: None,
            cwd: String::from("/"),
        }
    }

    pub fn with_options(mut self, options: &'a dyn OptionProvider) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_lister(mut self, lister: &'a dyn DirectoryLister) -> Self {
        self.lister = lister;
        self
    }

    pub fn with_translator(mut self, translator: Arc<dyn ScriptTranslator>) -> Self {
        self.translator = Some(translator);
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<String>) -> Self {
        self.cwd = cwd.into();
        self
    }

    pub fn config(&self) -> &CompletionConfig {
        self.config
    }

    pub fn commands(&self) -> &CommandRegistry {
        self.commands
    }

    pub fn cwd(&self) -> &str {
        &self.cwd
    }

    pub(crate) fn has_options(&self, command: &str) -> bool {
        self.options
            .is_some_and(|provider| provider.has_options(command))
    }

    /// Past invocations whose normalized text matches `value`, most recent first before
    /// sorting, one per distinct text, scored by normalized history score.
    pub fn complete_history(&self, value: &str) -> Vec<RankedCandidate> {
        let mut strategy = self.config.strategy.history.build(self.translator.clone());
        let mut out = Vec::new();
        strategy.before_match(&mut out, value);

        let stats = self.history.stats();
        let mut seen = HashSet::new();
        for entry in self.history.most_recent_first() {
            if strategy.match_score(&entry.normalized_path, value) <= NO_MATCH {
                continue;
            }
            if !seen.insert(entry.normalized_path.as_str()) {
                continue;
            }
            let score = self
                .history
                .normalized_score_with(&entry.normalized_path, stats);
            out.push(RankedCandidate::new(
                Candidate::History(HistoryCandidate {
                    display_name: entry.display_name.clone(),
                    normalized_path: entry.normalized_path.clone(),
                }),
                score,
            ));
        }

        strategy.after_match(&mut out, value);
        sort_by_score(&mut out);
        trace!(value, matched = out.len(), "history completion");
        out
    }

    /// Registered commands matching `value`, blended with their history score.
    ///
    /// With `previous` set, only those candidates are re-scored (non-commands and rejected
    /// ones are dropped) instead of scanning the registry. A strategy that resets the batch
    /// falls back to a full scan.
    pub fn complete_command(
        &self,
        value: &str,
        previous: Option<Vec<RankedCandidate>>,
    ) -> Vec<RankedCandidate> {
        let mut strategy = self.config.strategy.command.build(self.translator.clone());
        let mut candidates = previous.unwrap_or_default();
        strategy.before_match(&mut candidates, value);

        if candidates.is_empty() {
            for command in self.commands.iter() {
                let score = strategy.match_score(&command.name, value);
                if score > NO_MATCH {
                    candidates.push(RankedCandidate::new(
                        Candidate::Command(Arc::clone(command)),
                        score,
                    ));
                }
            }
        } else {
            candidates.retain_mut(|ranked| {
                let Some(command) = ranked.candidate.as_command() else {
                    return false;
                };
                ranked.score = strategy.match_score(&command.name, value);
                ranked.score > NO_MATCH
            });
        }

        let stats = self.history.stats();
        let history_factor = self.config.history_factor;
        for ranked in &mut candidates {
            if let Some(command) = ranked.candidate.as_command() {
                let history_score = self.history.normalized_score_with(&command.name, stats);
                ranked.score =
                    ranked.score * (1.0 - history_factor) + history_score * history_factor;
            }
        }

        strategy.after_match(&mut candidates, value);
        sort_by_score(&mut candidates);
        trace!(value, matched = candidates.len(), "command completion");
        candidates
    }

    /// Entries of the directory named by `value`'s dirname whose names match its basename.
    ///
    /// `value` should already be resolved against a base directory. An empty basename keeps
    /// every entry. A listing error yields no candidates.
    pub fn complete_path(&self, value: &str) -> Vec<RankedCandidate> {
        if !is_path(value) {
            return Vec::new();
        }
        let (dir, base) = split_path(value);

        let mut strategy = self.config.strategy.path.build(self.translator.clone());
        let mut out = Vec::new();
        strategy.before_match(&mut out, base);

        match self.lister.list_directory(Path::new(dir)) {
            Ok(names) => {
                for name in names {
                    let score = if base.is_empty() {
                        0.0
                    } else {
                        strategy.match_score(&name, base)
                    };
                    if score > NO_MATCH {
                        out.push(RankedCandidate::new(
                            Candidate::PathPart(PathPart::new(dir, name)),
                            score,
                        ));
                    }
                }
            }
            Err(err) => debug!(dir, %err, "directory listing failed"),
        }

        strategy.after_match(&mut out, base);
        out
    }

    /// Options for the command on `line`, filtered by the parameter under the cursor.
    pub fn complete_option(&self, line: &TokenizedLine, cursor: usize) -> Vec<RankedCandidate> {
        let Some(provider) = self.options else {
            return Vec::new();
        };
        let command = line.first_value();
        if !provider.has_options(command) {
            return Vec::new();
        }

        let token = line.cursor_token(cursor);
        let on_value = token.is_value();
        let input = if on_value { token.value.as_str() } else { "" };
        let (params, current) = option_arguments(line, cursor);

        let mut strategy = self.config.strategy.option.build(self.translator.clone());
        let mut out = Vec::new();
        strategy.before_match(&mut out, input);

        for entry in provider.options(command, &params, current) {
            let score = if entry.always_match || !on_value {
                0.0
            } else {
                strategy.match_score(&entry.value, input)
            };
            if score <= NO_MATCH {
                continue;
            }

            let completion = match (entry.always_match, on_value) {
                (true, true) => input.to_string(),
                _ => entry.value.clone(),
            };
            let mut text = TextCandidate::new(entry.value).with_completion(completion);
            text.description = entry.description;
            text.icon = entry.icon;
            out.push(RankedCandidate::new(Candidate::Text(text), score));
        }

        strategy.after_match(&mut out, input);
        sort_by_score(&mut out);
        trace!(command, current, matched = out.len(), "option completion");
        out
    }
}

/// Parameter values for an option provider, and the 1-based index of the one being edited.
///
/// A cursor on a trailing delimiter adds an empty parameter and points at it.
pub fn option_arguments(line: &TokenizedLine, cursor: usize) -> (Vec<String>, usize) {
    let cursor = u32::try_from(cursor).unwrap_or(u32::MAX);
    let tokens = line.tokens();
    let mut params = Vec::new();
    let mut current = 1;

    for (idx, token) in tokens.iter().enumerate().skip(1) {
        let is_current = token.span.start < cursor && token.span.end >= cursor;
        let is_last = idx + 1 == tokens.len();

        if token.is_value() {
            params.push(token.value.clone());
            if is_current {
                current = params.len();
            }
        } else if is_current {
            current = params.len() + 1;
            if is_last {
                params.push(String::new());
            }
        }
    }
    (params, current)
}

/// Stable descending sort; equal scores keep their current order.
pub fn sort_by_score(items: &mut [RankedCandidate]) {
    items.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}
