//! Parameter binding descriptors and the handler declaration builder.
//!
//! Every handler parameter is classified once, at declaration time, into one
//! of four binding kinds. The request path only ever switches on the
//! pre-computed tag; no type inspection happens per request.
//!
//! [`HandlerSpec`] is the declarative registration surface that replaces
//! annotation scanning: each call records one parameter in declaration
//! order, and body declarations capture a monomorphized deserializer so the
//! mapper can reconstruct the concrete type without reflection.

use crate::coerce::BindType;
use serde::de::DeserializeOwned;
use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// Container metadata for a generic collection body.
///
/// Carried on the descriptor so a declaration like "list of vendors" stays
/// visible to diagnostics even though the deserializer itself is already
/// monomorphized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectionShape {
    pub container: ContainerKind,
    /// Element type name, as reported by `std::any::type_name`
    pub element: &'static str,
}

/// The container kinds a collection body may declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContainerKind {
    List,
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContainerKind::List => write!(f, "list"),
        }
    }
}

/// Monomorphized body deserializer captured at declaration time.
///
/// Takes the raw body text, returns the deserialized value behind type
/// erasure. The concrete type is recovered by `Args::take_body`.
pub type BodyDeserializer =
    Arc<dyn Fn(&str) -> Result<Box<dyn Any + Send>, serde_json::Error> + Send + Sync>;

/// How one handler parameter's value is obtained.
#[derive(Clone)]
pub enum ParameterBinding {
    /// Bound from the named query parameter; its presence is part of the
    /// handler's acceptance test.
    RequiredQuery { name: String, ty: BindType },
    /// Bound from the named query parameter when present, its zero value
    /// otherwise.
    OptionalQuery { name: String, ty: BindType },
    /// Deserialized from the request body.
    Body {
        /// Target type name, for diagnostics
        target: &'static str,
        /// Present only for generic collection bodies
        shape: Option<CollectionShape>,
        deserialize: BodyDeserializer,
    },
    /// Never bound from the request; always resolves to the zero value.
    /// Kept as an explicit variant rather than a fall-through.
    Unbound { ty: BindType },
}

impl fmt::Debug for ParameterBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParameterBinding::RequiredQuery { name, ty } => {
                write!(f, "RequiredQuery {{ name: {:?}, ty: {} }}", name, ty)
            }
            ParameterBinding::OptionalQuery { name, ty } => {
                write!(f, "OptionalQuery {{ name: {:?}, ty: {} }}", name, ty)
            }
            ParameterBinding::Body { target, shape, .. } => {
                write!(f, "Body {{ target: {:?}, shape: {:?} }}", target, shape)
            }
            ParameterBinding::Unbound { ty } => write!(f, "Unbound {{ ty: {} }}", ty),
        }
    }
}

impl ParameterBinding {
    #[inline]
    #[must_use]
    pub fn is_required_query(&self) -> bool {
        matches!(self, ParameterBinding::RequiredQuery { .. })
    }

    #[inline]
    #[must_use]
    pub fn is_body(&self) -> bool {
        matches!(self, ParameterBinding::Body { .. })
    }
}

/// Ordered parameter declarations for one handler method.
///
/// Built fluently at registration:
///
/// ```
/// use ctrldispatch::{BindType, HandlerSpec};
///
/// let spec = HandlerSpec::new()
///     .required_query("id", BindType::I32)
///     .optional_query("verbose", BindType::Bool);
/// assert_eq!(spec.required_count(), 1);
/// ```
///
/// Validation (scalar-only query types, at most one body) happens when the
/// owning registry is built, not here; a spec by itself is inert data.
#[derive(Clone, Default)]
pub struct HandlerSpec {
    bindings: Vec<ParameterBinding>,
}

impl HandlerSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a required query parameter sourced from `name`.
    #[must_use]
    pub fn required_query(mut self, name: impl Into<String>, ty: BindType) -> Self {
        self.bindings.push(ParameterBinding::RequiredQuery {
            name: name.into(),
            ty,
        });
        self
    }

    /// Declare an optional query parameter sourced from `name`.
    #[must_use]
    pub fn optional_query(mut self, name: impl Into<String>, ty: BindType) -> Self {
        self.bindings.push(ParameterBinding::OptionalQuery {
            name: name.into(),
            ty,
        });
        self
    }

    /// Declare a body parameter deserialized into `T`.
    #[must_use]
    pub fn body<T>(mut self) -> Self
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.bindings.push(ParameterBinding::Body {
            target: std::any::type_name::<T>(),
            shape: None,
            deserialize: Arc::new(|text| {
                serde_json::from_str::<T>(text).map(|v| Box::new(v) as Box<dyn Any + Send>)
            }),
        });
        self
    }

    /// Declare a body parameter deserialized into a list of `T`.
    ///
    /// The collection shape is recorded explicitly so the declaration reads
    /// the same as the original "generic collection" annotation; the mapper
    /// produces a `Vec<T>`.
    #[must_use]
    pub fn body_list<T>(mut self) -> Self
    where
        T: DeserializeOwned + Send + 'static,
    {
        self.bindings.push(ParameterBinding::Body {
            target: std::any::type_name::<Vec<T>>(),
            shape: Some(CollectionShape {
                container: ContainerKind::List,
                element: std::any::type_name::<T>(),
            }),
            deserialize: Arc::new(|text| {
                serde_json::from_str::<Vec<T>>(text).map(|v| Box::new(v) as Box<dyn Any + Send>)
            }),
        });
        self
    }

    /// Declare a parameter that is never bound from the request.
    #[must_use]
    pub fn unbound(mut self, ty: BindType) -> Self {
        self.bindings.push(ParameterBinding::Unbound { ty });
        self
    }

    #[inline]
    #[must_use]
    pub fn bindings(&self) -> &[ParameterBinding] {
        &self.bindings
    }

    /// Number of required query bindings; the handler's specificity rank.
    #[must_use]
    pub fn required_count(&self) -> usize {
        self.bindings
            .iter()
            .filter(|b| b.is_required_query())
            .count()
    }

    pub(crate) fn body_count(&self) -> usize {
        self.bindings.iter().filter(|b| b.is_body()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Dto {
        #[allow(dead_code)]
        id: i32,
    }

    #[test]
    fn test_required_count() {
        let spec = HandlerSpec::new()
            .required_query("a", BindType::I32)
            .optional_query("b", BindType::Text)
            .required_query("c", BindType::Bool);
        assert_eq!(spec.required_count(), 2);
        assert_eq!(spec.bindings().len(), 3);
    }

    #[test]
    fn test_body_records_target() {
        let spec = HandlerSpec::new().body::<Dto>();
        match &spec.bindings()[0] {
            ParameterBinding::Body { target, shape, .. } => {
                assert!(target.contains("Dto"));
                assert!(shape.is_none());
            }
            other => panic!("unexpected binding {:?}", other),
        }
    }

    #[test]
    fn test_body_list_records_shape() {
        let spec = HandlerSpec::new().body_list::<Dto>();
        match &spec.bindings()[0] {
            ParameterBinding::Body { shape, .. } => {
                let shape = (*shape).expect("collection shape");
                assert_eq!(shape.container, ContainerKind::List);
                assert!(shape.element.contains("Dto"));
            }
            other => panic!("unexpected binding {:?}", other),
        }
    }

    #[test]
    fn test_body_count() {
        let spec = HandlerSpec::new().body::<Dto>().body_list::<Dto>();
        assert_eq!(spec.body_count(), 2);
    }
}
