//! Registry construction and per-request adapter selection.

use super::adapter::{HandlerAdapter, HandlerFn};
use crate::args::Args;
use crate::binding::{HandlerSpec, ParameterBinding};
use crate::error::ConfigError;
use crate::outcome::Outcome;
use crate::request::RequestView;
use http::Method;
use tracing::{debug, info};

/// Accumulates handler declarations for one (controller type, verb) pair.
///
/// This is the Uninitialized half of the registry's two-state lifecycle:
/// declarations are recorded in order, and [`RegistryBuilder::build`]
/// performs the single transition to Ready: validating every declaration,
/// ranking by specificity, and producing the immutable
/// [`AdapterRegistry`]. There is no transition back.
pub struct RegistryBuilder<C> {
    verb: Method,
    handlers: Vec<(HandlerSpec, HandlerFn<C>)>,
}

impl<C: Default> RegistryBuilder<C> {
    #[must_use]
    pub fn new(verb: Method) -> Self {
        RegistryBuilder {
            verb,
            handlers: Vec::new(),
        }
    }

    /// Declare one handler: its parameter spec and the closure that runs it.
    ///
    /// The closure receives a freshly constructed controller and the mapped
    /// argument list; its `Result<Outcome, _>` signature is what enforces
    /// the outcome-returning contract the original checked reflectively.
    #[must_use]
    pub fn handler<F>(mut self, spec: HandlerSpec, f: F) -> Self
    where
        F: Fn(C, Args) -> anyhow::Result<Outcome> + Send + Sync + 'static,
    {
        self.handlers.push((spec, Box::new(f)));
        self
    }

    /// Validate every declaration and build the Ready registry.
    ///
    /// Fails on the first configuration violation; no registry exists in a
    /// half-built state.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::UnsupportedParameterType`]: a query binding
    ///   declared with a non-scalar type
    /// - [`ConfigError::InvalidHandlerSignature`]: a declaration the body
    ///   stream can never satisfy (more than one body parameter)
    pub fn build(self) -> Result<AdapterRegistry<C>, ConfigError> {
        let verb = self.verb;
        let mut adapters = Vec::with_capacity(self.handlers.len());

        for (index, (spec, invoker)) in self.handlers.into_iter().enumerate() {
            validate_spec(&verb, index, &spec)?;
            adapters.push(HandlerAdapter::new(index, spec, invoker));
        }

        // Most-specific-first; the stable sort preserves declaration order
        // among equally specific overloads.
        adapters.sort_by(|a, b| b.required_count().cmp(&a.required_count()));

        info!(
            verb = %verb,
            handler_count = adapters.len(),
            "Adapter registry built"
        );

        Ok(AdapterRegistry { verb, adapters })
    }
}

fn validate_spec(verb: &Method, index: usize, spec: &HandlerSpec) -> Result<(), ConfigError> {
    for binding in spec.bindings() {
        match binding {
            ParameterBinding::RequiredQuery { name, ty }
            | ParameterBinding::OptionalQuery { name, ty } => {
                if !ty.is_scalar() {
                    return Err(ConfigError::UnsupportedParameterType {
                        name: name.clone(),
                        ty: *ty,
                    });
                }
            }
            _ => {}
        }
    }

    if spec.body_count() > 1 {
        return Err(ConfigError::InvalidHandlerSignature {
            handler: format!("{} handler #{}", verb, index),
            reason: "declares more than one body parameter; the body is readable exactly once"
                .to_string(),
        });
    }

    Ok(())
}

/// The ordered, immutable adapter list for one (controller type, verb).
///
/// Built exactly once before any request is served; read concurrently by
/// all requests without coordination.
pub struct AdapterRegistry<C> {
    verb: Method,
    adapters: Vec<HandlerAdapter<C>>,
}

impl<C> std::fmt::Debug for AdapterRegistry<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdapterRegistry")
            .field("verb", &self.verb)
            .field("adapters", &self.adapters.len())
            .finish()
    }
}

impl<C: Default> AdapterRegistry<C> {
    #[inline]
    #[must_use]
    pub fn verb(&self) -> &Method {
        &self.verb
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }

    /// Select the first acceptable adapter for this request.
    ///
    /// The scan order guarantees that among overloads whose required sets
    /// are all satisfied, the one with the most required query parameters
    /// wins; equally specific overloads resolve to the earliest declared.
    #[must_use]
    pub fn select(&self, req: &RequestView) -> Option<&HandlerAdapter<C>> {
        let chosen = self.adapters.iter().find(|a| a.is_acceptable(req));
        match &chosen {
            Some(adapter) => debug!(
                verb = %self.verb,
                handler_index = adapter.declaration_index(),
                required_count = adapter.required_count(),
                "Adapter selected"
            ),
            None => debug!(
                verb = %self.verb,
                candidates = self.adapters.len(),
                "No acceptable adapter"
            ),
        }
        chosen
    }
}
