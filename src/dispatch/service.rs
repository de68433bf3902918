//! The verb-indexed front door for one controller type.

use super::registry::AdapterRegistry;
use crate::config::ServiceLimits;
use crate::error::InvokeError;
use crate::request::RequestView;
use crate::response::{write_outcome, write_status, ResponseWriter};
use http::Method;
use tracing::{error, info, warn};

/// Serves all requests for one controller type: one registry per verb,
/// mirroring the per-verb hooks of the original servlet base class.
///
/// Built before serving, immutable afterward. The full per-request flow
/// lives in [`ControllerService::handle`]: registry lookup → adapter
/// selection → invocation → outcome translation, with every failure class
/// translated to exactly one status code and no body.
pub struct ControllerService<C> {
    registries: Vec<AdapterRegistry<C>>,
    limits: ServiceLimits,
}

impl<C: Default> ControllerService<C> {
    #[must_use]
    pub fn new() -> Self {
        Self::with_limits(ServiceLimits::default())
    }

    /// A service with explicit limits (see [`ServiceLimits::from_env`]).
    #[must_use]
    pub fn with_limits(limits: ServiceLimits) -> Self {
        ControllerService {
            registries: Vec::new(),
            limits,
        }
    }

    /// Attach the registry for one verb. A verb registered twice keeps the
    /// later registry.
    #[must_use]
    pub fn register(mut self, registry: AdapterRegistry<C>) -> Self {
        self.registries.retain(|r| r.verb() != registry.verb());
        self.registries.push(registry);
        self
    }

    #[must_use]
    pub fn registry(&self, verb: &Method) -> Option<&AdapterRegistry<C>> {
        self.registries.iter().find(|r| r.verb() == verb)
    }

    /// Serve one request, writing the response through the host's writer.
    ///
    /// Status mapping:
    /// - no registry for the verb, or no acceptable adapter → 404
    /// - parameter binding failure → 400 (413 for an oversize body)
    /// - handler failure → 500, never retried
    /// - success → the outcome's status, with its payload serialized when
    ///   present
    pub fn handle(&self, req: &mut RequestView, res: &mut dyn ResponseWriter) {
        let verb = req.method().clone();

        let Some(registry) = self.registry(&verb) else {
            warn!(verb = %verb, "No handlers registered for verb");
            write_status(res, 404);
            return;
        };

        let Some(adapter) = registry.select(req) else {
            warn!(verb = %verb, "No acceptable handler for request");
            write_status(res, 404);
            return;
        };

        match adapter.invoke(req, &self.limits) {
            Ok(outcome) => {
                info!(
                    verb = %verb,
                    handler_index = adapter.declaration_index(),
                    status = outcome.status(),
                    "Handler completed"
                );
                write_outcome(res, outcome);
            }
            Err(InvokeError::Binding(e)) => {
                // Already logged at the binding site with its cause
                write_status(res, e.status());
            }
            Err(InvokeError::Handler(e)) => {
                error!(
                    verb = %verb,
                    handler_index = adapter.declaration_index(),
                    error = %e,
                    "Handler failed"
                );
                write_status(res, 500);
            }
        }
    }
}

impl<C: Default> Default for ControllerService<C> {
    fn default() -> Self {
        Self::new()
    }
}
