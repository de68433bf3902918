//! The engine's wrapper around one registered handler.

use crate::args::Args;
use crate::binding::{HandlerSpec, ParameterBinding};
use crate::config::ServiceLimits;
use crate::error::InvokeError;
use crate::mapper::map_parameters;
use crate::outcome::Outcome;
use crate::request::RequestView;
use tracing::{debug, warn};

/// Erased handler invoker: receives a fresh controller instance and the
/// mapped argument list, returns the typed outcome. A handler error is an
/// unexpected downstream failure, not a request error.
pub type HandlerFn<C> = Box<dyn Fn(C, Args) -> anyhow::Result<Outcome> + Send + Sync>;

/// One handler method with its binding metadata and acceptance test.
///
/// Built once during registry construction, immutable afterward. Arbitrarily
/// many requests may consult it concurrently; all per-request state lives in
/// the argument list created for each invocation.
pub struct HandlerAdapter<C> {
    spec: HandlerSpec,
    invoker: HandlerFn<C>,
    required: usize,
    index: usize,
}

impl<C: Default> HandlerAdapter<C> {
    pub(crate) fn new(index: usize, spec: HandlerSpec, invoker: HandlerFn<C>) -> Self {
        let required = spec.required_count();
        HandlerAdapter {
            spec,
            invoker,
            required,
            index,
        }
    }

    /// Number of required query bindings; this adapter's specificity rank.
    #[inline]
    #[must_use]
    pub fn required_count(&self) -> usize {
        self.required
    }

    /// Position in declaration order; the tie-break among equally specific
    /// adapters and the label used in logs.
    #[inline]
    #[must_use]
    pub fn declaration_index(&self) -> usize {
        self.index
    }

    #[inline]
    #[must_use]
    pub fn spec(&self) -> &HandlerSpec {
        &self.spec
    }

    /// Whether this adapter can serve the request: every required query
    /// binding's source name must be present as a key. Presence, not
    /// non-emptiness; an empty-string value still counts.
    #[must_use]
    pub fn is_acceptable(&self, req: &RequestView) -> bool {
        self.spec.bindings().iter().all(|binding| match binding {
            ParameterBinding::RequiredQuery { name, .. } => req.has_query_param(name),
            _ => true,
        })
    }

    /// Construct a fresh controller, map every parameter in declared order,
    /// and run the handler.
    ///
    /// Any mapper failure aborts the invocation before the handler runs and
    /// propagates with its originating cause. Handlers must not assume any
    /// state survives between calls; each invocation gets its own instance.
    pub fn invoke(
        &self,
        req: &mut RequestView,
        limits: &ServiceLimits,
    ) -> Result<Outcome, InvokeError> {
        let controller = C::default();

        let args = map_parameters(self.spec.bindings(), req, limits).map_err(|e| {
            warn!(
                handler_index = self.index,
                error = %e,
                "Parameter binding failed"
            );
            InvokeError::Binding(e)
        })?;

        debug!(
            handler_index = self.index,
            arg_count = args.len(),
            "Handler invocation start"
        );

        (self.invoker)(controller, args).map_err(InvokeError::Handler)
    }
}
