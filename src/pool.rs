use super::{
    errors::{PoolError, SpawnError},
    handle::{JoinHandle, Task},
    model::PoolMetrics,
    result::SpawnResult,
};
use std::{
    any::Any,
    collections::VecDeque,
    fmt,
    panic::{self, AssertUnwindSafe},
    sync::{
        atomic::{AtomicBool, AtomicUsize, Ordering},
        Arc,
    },
    thread,
};
use crossbeam::utils::{Backoff, CachePadded};
use parking_lot::{Condvar, Mutex};
use tokio::sync::oneshot;
use tracing::{debug, error, trace, warn};


/// Worker count used when neither the caller nor the platform can supply one.
pub const DEFAULT_THREAD_COUNT: usize = 6;

/// What an idle worker does when the queue is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdleStrategy {
    /// Spin briefly, then yield the processor between queue polls. Never
    /// blocks, so idle workers keep burning CPU.
    #[default]
    Yield,
    /// Sleep on a condition variable until a task is submitted or the pool
    /// stops.
    Park,
}

/// Pool configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// `None` uses the hardware concurrency. `Some(0)` is only accepted when
    /// the platform cannot report it.
    pub num_threads: Option<usize>,
    /// Workers are named `{thread_name_prefix}-{index}`.
    pub thread_name_prefix: String,
    pub idle: IdleStrategy,
    /// Reports the hardware concurrency, `0` when unknown.
    pub hardware_concurrency: fn() -> usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            num_threads: None,
            thread_name_prefix: "spin-pool-worker".to_string(),
            idle: IdleStrategy::Yield,
            hardware_concurrency: num_cpus::get,
        }
    }
}

impl Config {
    /// One worker per physical core, parked while idle.
    pub fn cpu_bound() -> Self {
        Self {
            num_threads: Some(num_cpus::get_physical()),
            idle: IdleStrategy::Park,
            ..Default::default()
        }
    }

    /// One worker per logical core, polling while idle.
    pub fn low_latency() -> Self {
        Self {
            num_threads: None,
            idle: IdleStrategy::Yield,
            ..Default::default()
        }
    }

    pub fn worker_threads(&self) -> Result<usize, PoolError> {
        match self.num_threads {
            Some(n) if n > 0 => Ok(n),
            requested => match (requested, (self.hardware_concurrency)()) {
                (_, 0) => Ok(DEFAULT_THREAD_COUNT),
                (None, hardware) => Ok(hardware),
                (Some(_), hardware) => Err(PoolError::InvalidConfiguration(format!(
                    "a thread pool must have at least one thread ({hardware} available)"
                ))),
            },
        }
    }
}


#[derive(Debug, Default)]
struct Counters {
    submitted: AtomicUsize,
    completed: AtomicUsize,
    failed: AtomicUsize,
}

impl Counters {
    #[inline]
    fn record<T>(&self, result: &SpawnResult<T>) {
        let counter = if result.is_ok() { &self.completed } else { &self.failed };
        counter.fetch_add(1, Ordering::Relaxed);
    }
}

struct Shared {
    queue: Mutex<VecDeque<Task>>,
    available: Condvar,
    running: CachePadded<AtomicBool>,
    idle: IdleStrategy,
    counters: Arc<Counters>,
}

impl Shared {
    #[inline]
    fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    fn push(&self, task: Task) {
        self.queue.lock().push_back(task);
        if self.idle == IdleStrategy::Park {
            self.available.notify_one();
        }
    }

    #[inline]
    fn pop(&self) -> Option<Task> {
        self.queue.lock().pop_front()
    }

    fn wait_for_work(&self) {
        let mut queue = self.queue.lock();
        while queue.is_empty() && self.is_running() {
            self.available.wait(&mut queue);
        }
    }
}

fn worker_loop(shared: Arc<Shared>, index: usize) {
    trace!(worker = index, "worker started");
    let backoff = Backoff::new();

    while shared.is_running() {
        match shared.pop() {
            Some(task) => {
                backoff.reset();
                // Tasks report their own failures; anything escaping here was
                // raised while delivering the result and is dropped.
                if panic::catch_unwind(AssertUnwindSafe(|| task.run())).is_err() {
                    trace!(worker = index, "discarded failure raised during result delivery");
                }
            }
            None => match shared.idle {
                IdleStrategy::Yield => backoff.snooze(),
                IdleStrategy::Park => shared.wait_for_work(),
            },
        }
    }

    trace!(worker = index, "worker stopped");
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic payload".to_string()
    }
}


/// Fixed-size pool of worker threads consuming a shared FIFO queue.
///
/// Dropping the pool stops the workers, waits for in-flight tasks and
/// discards everything still queued.
pub struct ThreadPool {
    shared: Arc<Shared>,
    workers: Vec<thread::JoinHandle<()>>,
    num_threads: usize,
}

impl ThreadPool {
    pub fn new(num_threads: Option<usize>) -> Result<Self, PoolError> {
        Self::with_config(Config {
            num_threads,
            ..Default::default()
        })
    }

    pub fn with_config(config: Config) -> Result<Self, PoolError> {
        let num_threads = config.worker_threads()?;

        let shared = Arc::new(Shared {
            queue: Mutex::new(VecDeque::new()),
            available: Condvar::new(),
            running: CachePadded::new(AtomicBool::new(true)),
            idle: config.idle,
            counters: Arc::new(Counters::default()),
        });

        let mut pool = ThreadPool {
            shared,
            workers: Vec::with_capacity(num_threads),
            num_threads,
        };

        // On spawn failure `pool` is dropped, which joins the workers
        // started so far.
        for index in 0..num_threads {
            let shared = Arc::clone(&pool.shared);
            let worker = thread::Builder::new()
                .name(format!("{}-{}", config.thread_name_prefix, index))
                .spawn(move || worker_loop(shared, index))?;
            pool.workers.push(worker);
        }

        debug!(workers = num_threads, idle = ?config.idle, "thread pool started");
        Ok(pool)
    }

    /// Queues `f` and returns a handle to its result. Never blocks.
    pub fn submit<T, F>(&self, f: F) -> JoinHandle<T>
    where
        T: Send + 'static,
        F: FnOnce() -> T + Send + 'static,
    {
        self.spawn_outcome(move || Ok(f()))
    }

    /// Queues `f(args)`. `args` is moved into the task now, not when it runs.
    pub fn submit_with<T, A, F>(&self, f: F, args: A) -> JoinHandle<T>
    where
        T: Send + 'static,
        A: Send + 'static,
        F: FnOnce(A) -> T + Send + 'static,
    {
        self.spawn_outcome(move || Ok(f(args)))
    }

    /// Queues a fallible `f`; an `Err` is delivered as [`SpawnError::Failed`].
    pub fn submit_fallible<T, E, F>(&self, f: F) -> JoinHandle<T>
    where
        T: Send + 'static,
        E: fmt::Display,
        F: FnOnce() -> Result<T, E> + Send + 'static,
    {
        self.spawn_outcome(move || f().map_err(|e| SpawnError::Failed(e.to_string())))
    }

    fn spawn_outcome<T, F>(&self, f: F) -> JoinHandle<T>
    where
        T: Send + 'static,
        F: FnOnce() -> SpawnResult<T> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel::<SpawnResult<T>>();
        let counters = Arc::clone(&self.shared.counters);
        counters.submitted.fetch_add(1, Ordering::Relaxed);

        let task = Task::new(move || {
            let result = panic::catch_unwind(AssertUnwindSafe(f))
                .unwrap_or_else(|payload| Err(SpawnError::Panic(panic_message(payload.as_ref()))));
            counters.record(&result);
            if tx.send(result).is_err() {
                trace!("result receiver dropped, discarding task outcome");
            }
        });

        self.shared.push(task);
        JoinHandle::new(rx)
    }

    #[inline]
    pub fn num_threads(&self) -> usize {
        self.num_threads
    }

    pub fn metrics(&self) -> PoolMetrics {
        let counters = &self.shared.counters;
        PoolMetrics {
            workers: self.num_threads,
            queued_tasks: self.shared.queue.lock().len(),
            total_submitted: counters.submitted.load(Ordering::Relaxed),
            completed_tasks: counters.completed.load(Ordering::Relaxed),
            failed_tasks: counters.failed.load(Ordering::Relaxed),
        }
    }

    /// Stops the pool and returns how many queued tasks were discarded.
    pub fn shutdown(mut self) -> usize {
        self.stop()
    }

    fn stop(&mut self) -> usize {
        if !self.shared.running.swap(false, Ordering::AcqRel) {
            return 0;
        }

        if self.shared.idle == IdleStrategy::Park {
            let _queue = self.shared.queue.lock();
            self.shared.available.notify_all();
        }

        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                error!("worker thread terminated abnormally");
            }
        }

        let pending = std::mem::take(&mut *self.shared.queue.lock());
        let discarded = pending.len();
        drop(pending);

        if discarded > 0 {
            warn!(discarded, "thread pool stopped with queued tasks");
        }
        debug!("thread pool stopped");
        discarded
    }
}

impl Drop for ThreadPool {
    fn drop(&mut self) {
        self.stop();
    }
}

impl fmt::Debug for ThreadPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ThreadPool")
            .field("num_threads", &self.num_threads)
            .field("idle", &self.shared.idle)
            .field("running", &self.shared.is_running())
            .finish()
    }
}
