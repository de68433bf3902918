//! # ctrldispatch
//!
//! **ctrldispatch** is a request-dispatch and parameter-binding engine that sits
//! between an HTTP entry point and plain controller objects: it picks exactly
//! one handler among overloaded candidates, marshals its arguments from the
//! request, invokes it, and translates the typed outcome into a wire response.
//!
//! ## Overview
//!
//! Controllers declare several handler methods per verb, distinguished by
//! which query parameters they require. Declarations are recorded once,
//! validated at setup, and ranked by specificity. The per-request path only
//! switches on pre-computed binding tags and never inspects types at runtime.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`coerce`]** - Scalar coercion and zero-value defaults
//! - **[`binding`]** - Parameter binding descriptors and the `HandlerSpec` declaration builder
//! - **[`mapper`]** - Per-binding-kind value mapping against the live request
//! - **[`dispatch`]** - Adapters, the specificity-ordered registry, and the verb-indexed service
//! - **[`request`]** - The engine's read-only view of one inbound request
//! - **[`outcome`]** - The typed handler result prior to serialization
//! - **[`response`]** - Outcome-to-wire translation through the host's writer
//! - **[`error`]** - Setup-time configuration errors and per-request binding errors
//! - **[`config`]** - Environment-driven service limits
//! - **[`args`]** - The mapped argument list handed to handler closures
//!
//! ### Request Handling Flow
//!
//! ```mermaid
//! sequenceDiagram
//!     participant Host as HTTP Host
//!     participant Service as ControllerService
//!     participant Registry as AdapterRegistry
//!     participant Adapter as HandlerAdapter
//!     participant Mapper as Value Mappers
//!     participant Handler as Controller Method
//!
//!     Host->>Service: handle(RequestView, ResponseWriter)
//!     Service->>Registry: select(request)
//!     Registry->>Adapter: is_acceptable(request)?
//!     alt No acceptable adapter
//!         Service-->>Host: 404, no body
//!     end
//!     Service->>Adapter: invoke(request, limits)
//!     Adapter->>Mapper: map each parameter in declared order
//!     alt Binding failure
//!         Adapter-->>Service: InvalidScalar / UnsupportedContentType / MalformedBody
//!         Service-->>Host: 400 (413 when oversize)
//!     end
//!     Adapter->>Handler: fresh controller + mapped args
//!     alt Handler failure
//!         Service-->>Host: 500
//!     end
//!     Handler-->>Service: Outcome (status + payload)
//!     Service-->>Host: status + serialized payload
//! ```
//!
//! ## Example
//!
//! ```
//! use ctrldispatch::{
//!     BindType, ControllerService, HandlerSpec, Outcome, RegistryBuilder, RequestView,
//! };
//! use http::Method;
//!
//! #[derive(Default)]
//! struct VendorController;
//!
//! impl VendorController {
//!     fn list(&self) -> anyhow::Result<Outcome> {
//!         Outcome::ok(&vec!["acme", "globex"])
//!     }
//!
//!     fn by_id(&self, id: i32) -> anyhow::Result<Outcome> {
//!         Outcome::ok(&format!("vendor {}", id))
//!     }
//! }
//!
//! let get = RegistryBuilder::<VendorController>::new(Method::GET)
//!     .handler(HandlerSpec::new(), |ctrl, _args| ctrl.list())
//!     .handler(
//!         HandlerSpec::new().required_query("id", BindType::I32),
//!         |ctrl, args| ctrl.by_id(args.i32(0)?),
//!     )
//!     .build()?;
//!
//! let service = ControllerService::new().register(get);
//!
//! // `?id=7` satisfies both handlers; the more specific one wins.
//! let req = RequestView::from_target(Method::GET, "/vendor?id=7", None, None);
//! let adapter = service.registry(&Method::GET).unwrap().select(&req).unwrap();
//! assert_eq!(adapter.required_count(), 1);
//! # Ok::<(), ctrldispatch::ConfigError>(())
//! ```
//!
//! ## Concurrency Model
//!
//! The engine is invoked synchronously, once per inbound request, by the
//! hosting server; it spawns no threads and holds no locks. Registries and
//! binding metadata are immutable after setup, so any number of requests may
//! read them concurrently. Each invocation constructs a fresh controller
//! instance; no state survives between calls.

pub mod args;
pub mod binding;
pub mod coerce;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod mapper;
pub mod outcome;
pub mod request;
pub mod response;

pub use args::{Arg, Args};
pub use binding::{CollectionShape, ContainerKind, HandlerSpec, ParameterBinding};
pub use coerce::{coerce, zero_value, BindType};
pub use config::ServiceLimits;
pub use dispatch::{AdapterRegistry, ControllerService, HandlerAdapter, RegistryBuilder};
pub use error::{BindingError, ConfigError, InvokeError};
pub use mapper::JSON_CONTENT_TYPE;
pub use outcome::Outcome;
pub use request::{parse_query_string, QueryMap, RequestView, ValueVec};
pub use response::{write_outcome, write_status, ResponseWriter};
