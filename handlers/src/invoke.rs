//! [`Handler`]s invocation.

use std::{
    fmt,
    future::Future,
    pin::Pin,
    task::{Context, Poll},
};

use futures::{
    future::{self, LocalBoxFuture},
    FutureExt as _,
};
use tracing as log;

#[cfg(feature = "config")]
use crate::Config;
use crate::{Error, Handler, HandlerResult, Pending};

/// Outcome of a successful [`Handler`]s invocation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome<T> {
    /// No [`Handler`]s were invoked.
    Empty,

    /// Value of the single invoked [`Handler`].
    Value(T),

    /// All the invoked [`Handler`]s completed successfully.
    Completed,
}

impl<T> Outcome<T> {
    /// Returns the value of the single invoked [`Handler`], if any.
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Empty | Self::Completed => None,
        }
    }
}

/// Invokes all the provided `handlers` with the same `data`.
///
/// Every [`Handler`] is invoked exactly once, in order, before the returned
/// [`Invocation`] is ever polled.
///
/// The returned [`Invocation`] resolves to:
/// - [`Outcome::Empty`] if no `handlers` are provided, or fails with
///   [`Error::NoHandlersRegistered`] if `throw_on_empty_handlers` is set;
/// - [`Outcome::Value`] of the single [`Handler`], whose [`Pending`]
///   computation is passed through as is (see [`Invocation::pending()`]);
/// - [`Outcome::Completed`] once all the [`Handler`]s settle successfully.
///
/// If any of multiple [`Handler`]s fails, the remaining ones are still
/// invoked and awaited, and then the error of the first failed [`Handler`]
/// (in the provided order) is returned.
pub fn call_handlers<Data, I, H>(
    data: &Data,
    throw_on_empty_handlers: bool,
    handlers: I,
) -> Invocation<H::Ok, H::Err>
where
    Data: ?Sized,
    I: IntoIterator<Item = H>,
    H: Handler<Data>,
    H::Ok: Clone + 'static,
    H::Err: Clone + 'static,
{
    let mut handlers = handlers.into_iter();

    let Some(first) = handlers.next() else {
        return if throw_on_empty_handlers {
            log::debug!("no `Handler`s registered");
            Invocation::ready(Err(Error::NoHandlersRegistered))
        } else {
            Invocation::ready(Ok(Outcome::Empty))
        };
    };
    let first = invoke(&first, data);

    let Some(second) = handlers.next() else {
        log::debug!(handlers = 1, "invoked `Handler`s");
        return Invocation {
            inner: Inner::Single(first),
        };
    };

    let mut pending = vec![first, invoke(&second, data)];
    pending.extend(handlers.map(|h| invoke(&h, data)));
    log::debug!(handlers = pending.len(), "invoked `Handler`s");

    Invocation {
        inner: Inner::All(
            future::join_all(pending)
                .map(|settled| {
                    settled
                        .into_iter()
                        .find_map(Result::err)
                        .map_or(Ok(()), Err)
                })
                .boxed_local(),
        ),
    }
}

/// Invokes the provided [`Handler`] normalizing its result into a [`Pending`]
/// computation.
fn invoke<Data, H>(handler: &H, data: &Data) -> Pending<H::Ok, H::Err>
where
    Data: ?Sized,
    H: Handler<Data>,
    H::Ok: Clone + 'static,
    H::Err: Clone + 'static,
{
    handler.handle(data).map_or_else(
        |e| {
            log::trace!("`Handler` failed synchronously");
            Pending::err(e)
        },
        HandlerResult::into_pending,
    )
}

/// [`Future`] of invoked [`Handler`]s completion.
///
/// Created with the [`call_handlers()`] function.
pub struct Invocation<T, E> {
    /// Underlying completion.
    inner: Inner<T, E>,
}

/// Kind of [`Invocation`] completion.
enum Inner<T, E> {
    /// Completion known at the moment of invocation.
    Ready(future::Ready<Result<Outcome<T>, Error<E>>>),

    /// Computation of the single invoked [`Handler`].
    Single(Pending<T, E>),

    /// Joined computations of multiple invoked [`Handler`]s.
    All(LocalBoxFuture<'static, Result<(), E>>),
}

impl<T, E> Invocation<T, E> {
    /// Creates a new [`Invocation`] already completed with the provided
    /// `result`.
    fn ready(result: Result<Outcome<T>, Error<E>>) -> Self {
        Self {
            inner: Inner::Ready(future::ready(result)),
        }
    }

    /// Returns the [`Pending`] computation of the single invoked [`Handler`].
    ///
    /// If that [`Handler`] returned a [`HandlerResult::Pending`], it's the
    /// very same computation.
    #[must_use]
    pub const fn pending(&self) -> Option<&Pending<T, E>> {
        match &self.inner {
            Inner::Single(p) => Some(p),
            Inner::Ready(_) | Inner::All(_) => None,
        }
    }
}

impl<T, E> fmt::Debug for Invocation<T, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match &self.inner {
            Inner::Ready(_) => "Ready",
            Inner::Single(_) => "Single",
            Inner::All(_) => "All",
        };
        write!(f, "Invocation({kind})")
    }
}

impl<T, E> Future for Invocation<T, E>
where
    T: Clone,
    E: Clone,
{
    type Output = Result<Outcome<T>, Error<E>>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.get_mut().inner {
            Inner::Ready(ready) => ready.poll_unpin(cx),
            Inner::Single(pending) => pending
                .poll_unpin(cx)
                .map(|res| res.map(Outcome::Value).map_err(Error::Handler)),
            Inner::All(all) => all.poll_unpin(cx).map(|res| {
                res.map(|()| Outcome::Completed).map_err(Error::Handler)
            }),
        }
    }
}

/// Invoker of [`Handler`]s with a preconfigured behavior.
#[derive(Clone, Copy, Debug, Default)]
pub struct Invoker {
    /// Indicator whether invoking no [`Handler`]s is an error.
    throw_on_empty_handlers: bool,
}

impl Invoker {
    /// Creates a new [`Invoker`].
    ///
    /// See [`call_handlers()`] for the `throw_on_empty_handlers` meaning.
    #[must_use]
    pub const fn new(throw_on_empty_handlers: bool) -> Self {
        Self {
            throw_on_empty_handlers,
        }
    }

    /// Invokes all the provided `handlers` with the same `data`.
    ///
    /// See [`call_handlers()`] for details.
    pub fn call<Data, I, H>(
        &self,
        data: &Data,
        handlers: I,
    ) -> Invocation<H::Ok, H::Err>
    where
        Data: ?Sized,
        I: IntoIterator<Item = H>,
        H: Handler<Data>,
        H::Ok: Clone + 'static,
        H::Err: Clone + 'static,
    {
        call_handlers(data, self.throw_on_empty_handlers, handlers)
    }
}

#[cfg(feature = "config")]
impl From<Config> for Invoker {
    fn from(config: Config) -> Self {
        let Config {
            throw_on_empty_handlers,
        } = config;
        Self::new(throw_on_empty_handlers)
    }
}
