//! [`Error`]-related definitions.

use derive_more::{Display, Error as StdError};

#[cfg(doc)]
use crate::Handler;

/// Error of invoking [`Handler`]s.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, StdError)]
pub enum Error<E> {
    /// No [`Handler`]s registered, while being required.
    #[display("No handlers registered")]
    NoHandlersRegistered,

    /// [`Handler`] failed with its own error.
    #[display("Handler failed")]
    Handler(E),
}

impl<E> Error<E> {
    /// Returns the original error of the failed [`Handler`], if any.
    #[must_use]
    pub const fn handler_failure(&self) -> Option<&E> {
        match self {
            Self::NoHandlersRegistered => None,
            Self::Handler(e) => Some(e),
        }
    }

    /// Consumes this [`Error`] returning the original error of the failed
    /// [`Handler`], if any.
    #[must_use]
    pub fn into_handler_failure(self) -> Option<E> {
        match self {
            Self::NoHandlersRegistered => None,
            Self::Handler(e) => Some(e),
        }
    }
}

#[cfg(test)]
mod spec {
    use std::sync::Arc;

    use derive_more::{Display, Error};

    use super::Error as InvokeError;

    #[derive(Debug, Display, Error)]
    #[display("fail")]
    struct Fail;

    #[test]
    fn displays() {
        assert_eq!(
            InvokeError::<Fail>::NoHandlersRegistered.to_string(),
            "No handlers registered",
        );
        assert_eq!(
            InvokeError::Handler(Fail).to_string(),
            "Handler failed",
        );
    }

    #[test]
    fn keeps_original_failure() {
        let fail = Arc::new(Fail);
        let err = InvokeError::Handler(Arc::clone(&fail));

        assert!(Arc::ptr_eq(err.handler_failure().unwrap(), &fail));
        assert_eq!(err.source().unwrap().to_string(), "fail");
        assert!(Arc::ptr_eq(&err.into_handler_failure().unwrap(), &fail));

        assert!(InvokeError::<Fail>::NoHandlersRegistered
            .handler_failure()
            .is_none());
    }
}
