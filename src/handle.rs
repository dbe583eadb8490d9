use super::{
    errors::SpawnError,
    result::SpawnResult,
};
use std::{
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};
use tokio::sync::oneshot::{self, error::TryRecvError};


/// Type-erased run-once unit of work.
///
/// Dropping a `Task` without running it drops the producer side of its
/// result channel, which the matching [`JoinHandle`] reports as
/// [`SpawnError::ProducerGone`].
pub(crate) struct Task(Box<dyn FnOnce() + Send + 'static>);

impl Task {
    pub(crate) fn new<F>(f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        Task(Box::new(f))
    }

    #[inline]
    pub(crate) fn run(self) {
        (self.0)()
    }
}


/// Consumer side of a task's one-shot result channel.
///
/// Resolves exactly once: with the task's value, with the task's failure,
/// or with `ProducerGone` if the task was discarded unexecuted.
pub struct JoinHandle<T> {
    receiver: oneshot::Receiver<SpawnResult<T>>,
    ready: Option<SpawnResult<T>>,
    taken: bool,
}

// The stored result is never pinned.
impl<T> Unpin for JoinHandle<T> {}

impl<T> JoinHandle<T> {

    pub(crate) fn new(receiver: oneshot::Receiver<SpawnResult<T>>) -> Self {
        Self {
            receiver,
            ready: None,
            taken: false,
        }
    }

    /// Returns `true` once waiting would not block, either because the
    /// result has arrived or because the producer is gone.
    pub fn is_ready(&mut self) -> bool {
        if self.ready.is_some() || self.taken {
            return true;
        }
        match self.receiver.try_recv() {
            Ok(result) => {
                self.ready = Some(result);
                true
            }
            Err(TryRecvError::Closed) => {
                self.ready = Some(Err(SpawnError::ProducerGone));
                true
            }
            Err(TryRecvError::Empty) => false,
        }
    }

    /// Takes the result without blocking, or `None` while the task is still
    /// pending. The handle is spent once this returns `Some`; later calls
    /// return `None`.
    pub fn try_result(&mut self) -> Option<SpawnResult<T>> {
        if self.taken || !self.is_ready() {
            return None;
        }
        self.taken = true;
        self.ready.take()
    }

    /// Blocks the calling thread until the task resolves.
    ///
    /// Do not call this from inside an async task; `.await` the handle
    /// instead.
    pub fn await_result(self) -> SpawnResult<T> {
        futures::executor::block_on(self)
    }
}

impl<T> Future for JoinHandle<T> {
    type Output = SpawnResult<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        if let Some(result) = this.ready.take() {
            return Poll::Ready(result);
        }
        match Pin::new(&mut this.receiver).poll(cx) {
            Poll::Ready(res) => Poll::Ready(res.unwrap_or(Err(SpawnError::ProducerGone))),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<T> std::fmt::Debug for JoinHandle<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JoinHandle")
            .field("ready", &self.ready.is_some())
            .finish()
    }
}
