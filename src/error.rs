use thiserror::Error;

/// Reasons a [`GameConfig`](crate::config::GameConfig) is rejected.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("countdown duration must be a positive number of seconds, got {0}")]
    InvalidDuration(f64),
    #[error("a board needs at least one slot")]
    NoSlots,
    #[error("tick interval must be at least 1ms")]
    ZeroTickInterval,
    #[error("tick interval of {0}ms is longer than a browser timer can wait")]
    TickIntervalTooLong(u32),
    #[error("key '{key}' is bound to slot {slot}, but the board has slots 1..={slot_count}")]
    KeyOutOfRange {
        key: char,
        slot: usize,
        slot_count: usize,
    },
    #[error("key '{0}' is reserved for start / pause / resume")]
    ReservedKey(char),
    #[error("invalid config JSON: {0}")]
    Parse(String),
}
