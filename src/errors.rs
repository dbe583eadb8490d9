use std::io;

/// Failures raised synchronously while building a pool.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[from] io::Error),
}

/// Failures observed through a task handle.
#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum SpawnError {
    #[error("task panicked: {0}")]
    Panic(String),

    #[error("task failed: {0}")]
    Failed(String),

    /// The task was dropped without running, so no result will ever arrive.
    #[error("task was discarded before producing a result")]
    ProducerGone,
}

#[derive(Debug, PartialEq, Eq, Clone, thiserror::Error)]
pub enum ArgsError {
    #[error("prefix `{0}` is already registered")]
    DuplicatePrefix(String),

    #[error("unknown prefix `{0}`")]
    UnknownPrefix(String),

    #[error("prefix `{prefix}` expects {expected} value(s), found {found}")]
    TooFewValues {
        prefix: String,
        expected: usize,
        found: usize,
    },

    #[error("argument `{0}` is not present")]
    NotPresent(String),
}
