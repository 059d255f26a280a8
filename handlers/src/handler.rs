//! [`Handler`] abstractions.

use std::{fmt, rc::Rc, sync::Arc};

use derive_more::{Debug, From};

use crate::Pending;

/// Handler invoked with a data value.
pub trait Handler<Data: ?Sized> {
    /// Type of successful [`Handler`] result.
    type Ok;

    /// Type of this [`Handler`] error.
    type Err;

    /// Handles the provided `data`.
    ///
    /// # Errors
    ///
    /// Errors if this [`Handler`] fails synchronously, before producing any
    /// [`HandlerResult`].
    fn handle(
        &self,
        data: &Data,
    ) -> Result<HandlerResult<Self::Ok, Self::Err>, Self::Err>;
}

/// Result produced by a [`Handler`].
#[derive(From)]
pub enum HandlerResult<T, E> {
    /// Plain value.
    Value(T),

    /// [`Pending`] computation.
    #[from]
    Pending(Pending<T, E>),
}

impl<T, E> HandlerResult<T, E>
where
    T: Clone + 'static,
    E: Clone + 'static,
{
    /// Converts this [`HandlerResult`] into a [`Pending`] computation.
    ///
    /// An already [`Pending`] computation is returned as is.
    #[must_use]
    pub fn into_pending(self) -> Pending<T, E> {
        match self {
            Self::Value(v) => Pending::ok(v),
            Self::Pending(p) => p,
        }
    }
}

impl<T, E> Debug for HandlerResult<T, E>
where
    T: Clone + Debug,
    E: Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(v) => f.debug_tuple("Value").field(v).finish(),
            Self::Pending(p) => f.debug_tuple("Pending").field(p).finish(),
        }
    }
}

impl<Data, H> Handler<Data> for &H
where
    Data: ?Sized,
    H: Handler<Data> + ?Sized,
{
    type Ok = H::Ok;
    type Err = H::Err;

    fn handle(
        &self,
        data: &Data,
    ) -> Result<HandlerResult<Self::Ok, Self::Err>, Self::Err> {
        (**self).handle(data)
    }
}

impl<Data, H> Handler<Data> for Box<H>
where
    Data: ?Sized,
    H: Handler<Data> + ?Sized,
{
    type Ok = H::Ok;
    type Err = H::Err;

    fn handle(
        &self,
        data: &Data,
    ) -> Result<HandlerResult<Self::Ok, Self::Err>, Self::Err> {
        (**self).handle(data)
    }
}

impl<Data, H> Handler<Data> for Rc<H>
where
    Data: ?Sized,
    H: Handler<Data> + ?Sized,
{
    type Ok = H::Ok;
    type Err = H::Err;

    fn handle(
        &self,
        data: &Data,
    ) -> Result<HandlerResult<Self::Ok, Self::Err>, Self::Err> {
        (**self).handle(data)
    }
}

impl<Data, H> Handler<Data> for Arc<H>
where
    Data: ?Sized,
    H: Handler<Data> + ?Sized,
{
    type Ok = H::Ok;
    type Err = H::Err;

    fn handle(
        &self,
        data: &Data,
    ) -> Result<HandlerResult<Self::Ok, Self::Err>, Self::Err> {
        (**self).handle(data)
    }
}

/// [`Handler`] backed by a closure.
///
/// Created with the [`handler_fn()`] function.
#[derive(Clone, Copy, Debug)]
pub struct FnHandler<F>(#[debug(skip)] F);

/// Creates a new [`Handler`] out of the provided closure.
pub fn handler_fn<Data, F, T, E>(f: F) -> FnHandler<F>
where
    Data: ?Sized,
    F: Fn(&Data) -> Result<HandlerResult<T, E>, E>,
{
    FnHandler(f)
}

impl<Data, F, T, E> Handler<Data> for FnHandler<F>
where
    Data: ?Sized,
    F: Fn(&Data) -> Result<HandlerResult<T, E>, E>,
{
    type Ok = T;
    type Err = E;

    fn handle(&self, data: &Data) -> Result<HandlerResult<T, E>, E> {
        (self.0)(data)
    }
}
