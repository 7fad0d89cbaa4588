use std::time::Duration;

use crate::{
    CompletionConfig, ConfigError, DEFAULT_HISTORY_FACTOR, DEFAULT_MAX_CANDIDATES,
    StrategyConfig, StrategyKind,
};

#[test]
fn test_defaults() {
    let config = CompletionConfig::default();
    assert_eq!(config.history_factor, DEFAULT_HISTORY_FACTOR);
    assert_eq!(config.history_factor, 0.3);
    assert_eq!(config.max_candidates, DEFAULT_MAX_CANDIDATES);
    assert_eq!(config.candidate_limit(), None);
    assert_eq!(config.max_histories, 200);
    assert_eq!(config.debounce(), Duration::from_millis(200));
    assert_eq!(
        config.strategy,
        StrategyConfig {
            command: StrategyKind::Abbr,
            path: StrategyKind::BeginsWith,
            history: StrategyKind::Partial,
            option: StrategyKind::Partial,
        }
    );
    assert_eq!(CompletionConfig::from_toml_str("").unwrap(), config);
}

#[test]
fn test_partial_toml() {
    let config = CompletionConfig::from_toml_str(
        r#"
history_factor = 0.5
max_candidates = 20

[strategy]
command = "partial"
"#,
    )
    .unwrap();

    assert_eq!(config.history_factor, 0.5);
    assert_eq!(config.max_candidates, 20);
    assert_eq!(config.candidate_limit(), Some(20));
    assert_eq!(config.debounce_ms, 200);
    assert_eq!(config.strategy.command, StrategyKind::Partial);
    assert_eq!(config.strategy.path, StrategyKind::BeginsWith);
}

#[test]
fn test_history_factor_out_of_range() {
    let err = CompletionConfig::from_toml_str("history_factor = 1.5").unwrap_err();
    assert!(matches!(err, ConfigError::HistoryFactor(f) if f == 1.5));
    assert_eq!(
        err.to_string(),
        "history_factor must be within [0, 1], got 1.5"
    );

    assert!(CompletionConfig::from_toml_str("history_factor = 0.0").is_ok());
    assert!(CompletionConfig::from_toml_str("history_factor = 1.0").is_ok());
}

#[test]
fn test_rejects_unknown_keys_and_strategies() {
    let err = CompletionConfig::from_toml_str("max_candidate = 3").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)), "{err:?}");

    let err = CompletionConfig::from_toml_str("[strategy]\ncommand = \"fuzzy\"").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)), "{err:?}");
    assert!(err.to_string().starts_with("invalid completion config"));
}

#[test]
fn test_strategy_names() {
    for kind in [StrategyKind::BeginsWith, StrategyKind::Partial, StrategyKind::Abbr] {
        assert_eq!(kind.name().parse::<StrategyKind>().unwrap(), kind);
    }
    let err = "fuzzy".parse::<StrategyKind>().unwrap_err();
    assert!(matches!(&err, ConfigError::UnknownStrategy(name) if name == "fuzzy"));
    assert_eq!(
        err.to_string(),
        "unknown match strategy `fuzzy` (expected begins_with, partial or abbr)"
    );
}
