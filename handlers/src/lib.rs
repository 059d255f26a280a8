//! Invocation of registered handlers with a single data value.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

#[cfg(feature = "config")]
pub mod config;
pub mod error;
pub mod handler;
pub mod invoke;
pub mod pending;

#[cfg(feature = "config")]
pub use self::config::Config;
pub use self::{
    error::Error,
    handler::{handler_fn, FnHandler, Handler, HandlerResult},
    invoke::{call_handlers, Invocation, Invoker, Outcome},
    pending::Pending,
};
