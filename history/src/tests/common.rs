use chrono::{DateTime, Duration, TimeZone, Utc};

/// Fixed "now" so bucket boundaries are deterministic.
pub fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

pub fn ago(d: Duration) -> DateTime<Utc> {
    now() - d
}

/// Routes `tracing` output to the test harness; `RUST_LOG` picks the level.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
