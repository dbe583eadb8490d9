use super::errors::SpawnError;

/// Outcome delivered to a [`JoinHandle`](crate::handle::JoinHandle).
pub type SpawnResult<T> = Result<T, SpawnError>;
