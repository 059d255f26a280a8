//! [`Pending`] computation definitions.

use std::{
    fmt,
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use futures::{
    future::{self, LocalBoxFuture, Shared},
    FutureExt as _,
};

/// Asynchronous computation eventually resolving to a value or failing.
///
/// Cloning a [`Pending`] doesn't start a new computation: every clone is a
/// handle to the same one, and observes the same result once it settles.
pub struct Pending<T, E> {
    /// Shared underlying computation.
    inner: Shared<LocalBoxFuture<'static, Result<T, E>>>,
}

impl<T, E> Pending<T, E>
where
    T: Clone,
    E: Clone,
{
    /// Wraps the provided `future` into a new [`Pending`] computation.
    #[must_use]
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = Result<T, E>> + 'static,
    {
        Self {
            inner: future.boxed_local().shared(),
        }
    }

    /// Creates a new [`Pending`] computation already settled with the
    /// provided `result`.
    #[must_use]
    pub fn ready(result: Result<T, E>) -> Self
    where
        T: 'static,
        E: 'static,
    {
        Self::new(future::ready(result))
    }

    /// Creates a new [`Pending`] computation resolved to the provided `value`.
    #[must_use]
    pub fn ok(value: T) -> Self
    where
        T: 'static,
        E: 'static,
    {
        Self::ready(Ok(value))
    }

    /// Creates a new [`Pending`] computation failed with the provided `err`.
    #[must_use]
    pub fn err(err: E) -> Self
    where
        T: 'static,
        E: 'static,
    {
        Self::ready(Err(err))
    }

    /// Returns the result of this [`Pending`] computation, if it has already
    /// settled.
    ///
    /// A computation settles only once polled, so [`None`] is returned for
    /// [`Pending::ready()`] as well until it has been awaited.
    #[must_use]
    pub fn peek(&self) -> Option<&Result<T, E>> {
        self.inner.peek()
    }

    /// Indicates whether both [`Pending`]s are handles to the same
    /// computation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        self.inner.ptr_eq(&other.inner)
    }
}

impl<T, E> Clone for Pending<T, E>
where
    T: Clone,
    E: Clone,
{
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T, E> fmt::Debug for Pending<T, E>
where
    T: Clone,
    E: Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.peek().is_some() { "settled" } else { "..." };
        write!(f, "Pending({state})")
    }
}

impl<T, E> Future for Pending<T, E>
where
    T: Clone,
    E: Clone,
{
    type Output = Result<T, E>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        self.get_mut().inner.poll_unpin(cx)
    }
}

#[cfg(test)]
mod spec {
    use std::{cell::Cell, rc::Rc};

    use futures::{channel::oneshot, executor::block_on, future, FutureExt as _};

    use super::Pending;

    #[test]
    fn clones_share_computation() {
        let (tx, rx) = oneshot::channel::<&str>();
        let pending = Pending::<_, oneshot::Canceled>::new(rx);
        let clone = pending.clone();

        assert!(pending.ptr_eq(&clone));
        assert!(clone.peek().is_none());

        tx.send("toto").unwrap();
        assert_eq!(block_on(pending.clone()), Ok("toto"));

        assert_eq!(clone.peek(), Some(&Ok("toto")));
        assert_eq!(block_on(clone), Ok("toto"));
    }

    #[test]
    fn distinct_computations_are_not_equal() {
        let a = Pending::<_, ()>::ok(1);
        let b = Pending::<_, ()>::ok(1);

        assert!(!a.ptr_eq(&b));
        assert!(a.ptr_eq(&a.clone()));
    }

    #[test]
    fn ready_settles_once_polled() {
        let pending = Pending::<u8, _>::err("fail");

        assert!(pending.peek().is_none());
        assert_eq!(pending.clone().now_or_never(), Some(Err("fail")));
        assert_eq!(pending.peek(), Some(&Err("fail")));
    }

    #[test]
    fn computes_only_once() {
        let calls = Rc::new(Cell::new(0));
        let pending = Pending::<_, ()>::new({
            let calls = Rc::clone(&calls);
            future::lazy(move |_| {
                calls.set(calls.get() + 1);
                Ok(calls.get())
            })
        });

        assert_eq!(block_on(pending.clone()), Ok(1));
        assert_eq!(block_on(pending), Ok(1));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn formats_state() {
        let pending = Pending::<u8, ()>::ok(1);
        assert_eq!(format!("{pending:?}"), "Pending(...)");

        _ = pending.clone().now_or_never();
        assert_eq!(format!("{pending:?}"), "Pending(settled)");
    }
}
