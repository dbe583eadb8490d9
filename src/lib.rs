//! Fixed-size thread pool with one-shot result handles
//!
//! # Features
//! - FIFO task queue shared by a fixed set of worker threads
//! - Busy-polling (yield) or parked idle workers
//! - Panics and task errors are delivered through the task's own handle
//! - Shutdown discards queued tasks; their handles report `ProducerGone`
//! - Small command-line argument parser and byte-order helper

pub mod args;
pub mod endian;
pub mod errors;
pub mod handle;
pub mod model;
pub mod pool;
pub mod result;

pub use args::ArgumentParser;
pub use endian::{reverse_byte_order, ReverseBytes};
pub use errors::{ArgsError, PoolError, SpawnError};
pub use handle::JoinHandle;
pub use model::PoolMetrics;
pub use pool::{Config, IdleStrategy, ThreadPool, DEFAULT_THREAD_COUNT};
pub use result::SpawnResult;
