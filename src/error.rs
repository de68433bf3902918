//! Error types, split by when they surface.
//!
//! [`ConfigError`] is a setup-time programmer mistake: registry construction
//! aborts and no Ready registry exists. [`BindingError`] and
//! [`InvokeError`] are scoped to a single request and translate to exactly
//! one status code each.

use crate::coerce::BindType;
use std::fmt;

/// Configuration error detected while building a registry.
///
/// Fatal: `RegistryBuilder::build()` returns the first violation and the
/// controller is never placed into service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A handler declaration the type system cannot reject; currently a
    /// spec declaring more than one body parameter, which the one-shot body
    /// stream can never satisfy.
    InvalidHandlerSignature {
        /// Label identifying the offending handler (verb + declaration index)
        handler: String,
        reason: String,
    },
    /// A query-bound parameter declared with a non-scalar type.
    UnsupportedParameterType {
        /// Source name of the query parameter
        name: String,
        /// The declared (rejected) type
        ty: BindType,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidHandlerSignature { handler, reason } => {
                write!(f, "invalid handler signature for {}: {}", handler, reason)
            }
            ConfigError::UnsupportedParameterType { name, ty } => {
                write!(
                    f,
                    "query parameter '{}' declared with non-scalar type {}; \
                     query bindings accept text, bool and numeric kinds only",
                    name, ty
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Per-request failure while mapping a handler parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindingError {
    /// A query value that could not be parsed into its declared type.
    InvalidScalar {
        /// Source name of the query parameter
        name: String,
        /// The raw value received
        value: String,
        /// The declared target type
        ty: BindType,
    },
    /// A body-bound parameter on a request whose declared content type is
    /// not the single supported media type.
    UnsupportedContentType {
        expected: &'static str,
        actual: Option<String>,
    },
    /// The body could not be read or deserialized into the target type.
    MalformedBody { detail: String },
    /// The body exceeded the configured size limit.
    PayloadTooLarge { limit: usize },
}

impl BindingError {
    /// The status code this failure translates to.
    #[must_use]
    pub fn status(&self) -> u16 {
        match self {
            BindingError::PayloadTooLarge { .. } => 413,
            _ => 400,
        }
    }
}

impl fmt::Display for BindingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BindingError::InvalidScalar { name, value, ty } => {
                write!(
                    f,
                    "query parameter '{}': value '{}' is not a valid {}",
                    name, value, ty
                )
            }
            BindingError::UnsupportedContentType { expected, actual } => match actual {
                Some(actual) => write!(
                    f,
                    "unsupported content type '{}', expected '{}'",
                    actual, expected
                ),
                None => write!(f, "missing content type, expected '{}'", expected),
            },
            BindingError::MalformedBody { detail } => {
                write!(f, "malformed request body: {}", detail)
            }
            BindingError::PayloadTooLarge { limit } => {
                write!(f, "request body exceeds the {} byte limit", limit)
            }
        }
    }
}

impl std::error::Error for BindingError {}

/// Failure of one adapter invocation.
///
/// Binding failures are the caller's fault (400 family); handler failures
/// are unexpected downstream errors (500) and are never retried.
#[derive(Debug)]
pub enum InvokeError {
    Binding(BindingError),
    Handler(anyhow::Error),
}

impl fmt::Display for InvokeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvokeError::Binding(e) => write!(f, "parameter binding failed: {}", e),
            InvokeError::Handler(e) => write!(f, "handler failed: {}", e),
        }
    }
}

impl std::error::Error for InvokeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InvokeError::Binding(e) => Some(e),
            InvokeError::Handler(e) => Some(&**e),
        }
    }
}

impl From<BindingError> for InvokeError {
    fn from(e: BindingError) -> Self {
        InvokeError::Binding(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binding_error_status() {
        let e = BindingError::MalformedBody {
            detail: "eof".to_string(),
        };
        assert_eq!(e.status(), 400);
        let e = BindingError::PayloadTooLarge { limit: 1024 };
        assert_eq!(e.status(), 413);
    }

    #[test]
    fn test_display_mentions_parameter() {
        let e = BindingError::InvalidScalar {
            name: "id".to_string(),
            value: "abc".to_string(),
            ty: BindType::I32,
        };
        let msg = e.to_string();
        assert!(msg.contains("id"));
        assert!(msg.contains("abc"));
    }
}
