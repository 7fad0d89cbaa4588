use thiserror::Error;

/// Errors from reading a completion configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The TOML text could not be parsed into a configuration.
    #[error("invalid completion config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A strategy name other than `begins_with`, `partial`, or `abbr`.
    #[error("unknown match strategy `{0}` (expected begins_with, partial or abbr)")]
    UnknownStrategy(String),

    /// `history_factor` outside `[0, 1]`.
    #[error("history_factor must be within [0, 1], got {0}")]
    HistoryFactor(f64),
}
