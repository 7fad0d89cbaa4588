//! Completion and ranking for the launcher input line.
//!
//! Given a tokenized line (see `input`) and the cursor, [`CompletionSession::update`] picks
//! a [`CompletionKind`], runs the configured [`MatchStrategy`] over the candidate source,
//! blends command scores with `history`, and returns a stably sorted list.
//! Cursors are UTF-8 byte offsets into the line.

mod apply;
mod candidate;
mod config;
mod context;
mod debounce;
mod error;
mod launch;
mod matchers;
mod ranking;
mod session;
mod tests;

pub use apply::apply_completion;
pub use candidate::{
    Candidate, Command, CommandRegistry, HistoryCandidate, Ownership, PathPart, TextCandidate,
};
pub use config::{
    CompletionConfig, DEFAULT_DEBOUNCE_MS, DEFAULT_HISTORY_FACTOR, DEFAULT_MAX_CANDIDATES,
    DEFAULT_MAX_HISTORIES, StrategyConfig,
};
pub use context::{CompletionKind, cursor_value, path_base_dir, resolve_path, select_kind};
pub use debounce::DebounceTimer;
pub use error::ConfigError;
pub use launch::record_launch;
pub use matchers::{
    Abbreviation, BeginsWith, MIN_PREFILTER_LEN, MatchStrategy, NO_MATCH, Partial,
    ScriptPrefilter, ScriptTranslator, StrategyKind, abbreviation_score,
};
pub use ranking::{
    Completer, DirectoryLister, FsLister, OptionEntry, OptionProvider, RankedCandidate,
    option_arguments, sort_by_score,
};
pub use session::{Completion, CompletionSession};
