//! # Dispatch Module
//!
//! Handler selection and invocation: the overload-resolution half of the
//! engine.
//!
//! ## Overview
//!
//! A controller type declares several handler methods for the same verb,
//! differing in which query parameters they require. At setup, a
//! [`RegistryBuilder`] turns those declarations into validated
//! [`HandlerAdapter`]s and ranks them by specificity. At request time the
//! [`AdapterRegistry`] picks the first adapter whose required parameters are
//! all present, and the adapter maps arguments and runs the handler against
//! a fresh controller instance.
//!
//! ## Selection Order
//!
//! Adapters are sorted descending by required-binding count with a stable
//! sort, so:
//!
//! - among overloads a request satisfies, the most specific wins;
//! - equally specific overloads resolve to the one declared first, on every
//!   run.
//!
//! ## Setup vs. Request Errors
//!
//! Declaration mistakes (non-scalar query types, impossible signatures) fail
//! `build()` once, at setup. Request-scoped failures (unparsable values,
//! wrong content type, malformed bodies) abort only their own invocation and
//! map to a 4xx status; unexpected handler failures map to 500.

mod adapter;
mod registry;
mod service;

pub use adapter::{HandlerAdapter, HandlerFn};
pub use registry::{AdapterRegistry, RegistryBuilder};
pub use service::ControllerService;
