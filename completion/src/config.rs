use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;
use crate::matchers::StrategyKind;

pub const DEFAULT_HISTORY_FACTOR: f64 = 0.3;
pub const DEFAULT_DEBOUNCE_MS: u64 = 200;
pub const DEFAULT_MAX_HISTORIES: usize = 200;
/// No limit.
pub const DEFAULT_MAX_CANDIDATES: usize = 0;

/// Configuration knobs for ranking.
///
/// Every field is optional in TOML; missing ones take the defaults below.
///
/// ```toml
/// history_factor = 0.5
/// max_candidates = 20
///
/// [strategy]
/// command = "partial"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CompletionConfig {
    /// Weight of the history score in the command blend, in `[0, 1]`.
    pub history_factor: f64,
    /// Quiet period before a ranking pass.
    pub debounce_ms: u64,
    /// Entries kept when the history file is written.
    pub max_histories: usize,
    /// Length of command and history lists. `0` means no limit.
    pub max_candidates: usize,
    pub strategy: StrategyConfig,
}

/// Strategy per completion kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StrategyConfig {
    pub command: StrategyKind,
    pub path: StrategyKind,
    pub history: StrategyKind,
    pub option: StrategyKind,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            command: StrategyKind::Abbr,
            path: StrategyKind::BeginsWith,
            history: StrategyKind::Partial,
            option: StrategyKind::Partial,
        }
    }
}

impl Default for CompletionConfig {
    fn default() -> Self {
        Self {
            history_factor: DEFAULT_HISTORY_FACTOR,
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            max_histories: DEFAULT_MAX_HISTORIES,
            max_candidates: DEFAULT_MAX_CANDIDATES,
            strategy: StrategyConfig::default(),
        }
    }
}

impl CompletionConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: CompletionConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.history_factor) {
            return Err(ConfigError::HistoryFactor(self.history_factor));
        }
        Ok(())
    }

    /// `max_candidates` as a truncation length, `None` when unlimited.
    pub fn candidate_limit(&self) -> Option<usize> {
        (self.max_candidates > 0).then_some(self.max_candidates)
    }

    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}
