//! Awaitable results for the builder API

use crate::error::{Argon2Error, Result};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::oneshot;

const WORKER_DROPPED: &str = "Argon2 worker dropped before completing";

/// Result of an Argon2 operation running on the blocking pool
#[must_use = "the operation result is only delivered when awaited"]
pub struct AsyncArgon2Result<T> {
    receiver: oneshot::Receiver<Result<T>>,
}

/// Async result that hands its outcome to a user handler
#[must_use = "the handler only runs when awaited"]
pub struct AsyncArgon2ResultWithHandler<T, F> {
    receiver: oneshot::Receiver<Result<T>>,
    handler: Option<F>,
}

impl<T: Send + 'static> AsyncArgon2Result<T> {
    /// Run `work` on tokio's blocking pool.
    ///
    /// Must be called from within a tokio runtime. Dropping the returned
    /// value does not stop `work`.
    pub(crate) fn spawn_blocking<W>(work: W) -> Self
    where
        W: FnOnce() -> Result<T> + Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        tokio::task::spawn_blocking(move || {
            let _ = tx.send(work());
        });
        Self { receiver: rx }
    }
}

impl<T> AsyncArgon2Result<T> {
    /// An already completed result
    pub fn ready(result: Result<T>) -> Self {
        let (tx, rx) = oneshot::channel();
        let _ = tx.send(result);
        Self { receiver: rx }
    }

    /// An already failed result
    pub fn error(error: Argon2Error) -> Self {
        Self::ready(Err(error))
    }

    /// Resolve to whatever `handler` makes of the result
    pub fn on_result<F, U>(self, handler: F) -> AsyncArgon2ResultWithHandler<T, F>
    where
        F: FnOnce(Result<T>) -> U,
    {
        AsyncArgon2ResultWithHandler {
            receiver: self.receiver,
            handler: Some(handler),
        }
    }
}

impl<T> Future for AsyncArgon2Result<T> {
    type Output = Result<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match Pin::new(&mut self.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => Poll::Ready(result),
            Poll::Ready(Err(_)) => Poll::Ready(Err(Argon2Error::internal(WORKER_DROPPED))),
            Poll::Pending => Poll::Pending,
        }
    }
}

impl<T, F, U> Future for AsyncArgon2ResultWithHandler<T, F>
where
    F: FnOnce(Result<T>) -> U + Unpin,
{
    type Output = U;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.get_mut();
        let result = match Pin::new(&mut this.receiver).poll(cx) {
            Poll::Ready(Ok(result)) => result,
            Poll::Ready(Err(_)) => Err(Argon2Error::internal(WORKER_DROPPED)),
            Poll::Pending => return Poll::Pending,
        };
        // Polling again after completion stays pending.
        match this.handler.take() {
            Some(handler) => Poll::Ready(handler(result)),
            None => Poll::Pending,
        }
    }
}
