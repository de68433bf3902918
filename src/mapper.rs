//! Value mapping: one strategy per binding kind.
//!
//! Given a pre-computed [`ParameterBinding`] and the live request, each
//! mapper produces the actual argument value or fails with a typed
//! [`BindingError`]. Mapping is all-or-nothing per request; the first
//! failure aborts the invocation.

use crate::args::{Arg, Args};
use crate::binding::ParameterBinding;
use crate::coerce::{coerce, zero_value};
use crate::config::ServiceLimits;
use crate::error::BindingError;
use crate::request::RequestView;
use std::io::Read;
use tracing::debug;

/// The single supported body media type. Anything else is rejected before
/// deserialization is attempted.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Map every parameter of a handler in declared order.
pub fn map_parameters(
    bindings: &[ParameterBinding],
    req: &mut RequestView,
    limits: &ServiceLimits,
) -> Result<Args, BindingError> {
    let mut values = Vec::with_capacity(bindings.len());
    for binding in bindings {
        values.push(map_parameter(binding, req, limits)?);
    }
    Ok(Args::new(values))
}

/// Map one parameter according to its binding kind.
pub fn map_parameter(
    binding: &ParameterBinding,
    req: &mut RequestView,
    limits: &ServiceLimits,
) -> Result<Arg, BindingError> {
    match binding {
        ParameterBinding::RequiredQuery { name, ty } => {
            // Presence is guaranteed by the adapter's acceptance test; the
            // empty string covers a key declared with no value.
            let value = req.first_query_value(name).unwrap_or("");
            coerce(*ty, value).map_err(|e| BindingError::InvalidScalar {
                name: name.clone(),
                value: e.value,
                ty: e.ty,
            })
        }
        ParameterBinding::OptionalQuery { name, ty } => match req.first_query_value(name) {
            None => Ok(zero_value(*ty)),
            Some(value) => coerce(*ty, value).map_err(|e| BindingError::InvalidScalar {
                name: name.clone(),
                value: e.value,
                ty: e.ty,
            }),
        },
        ParameterBinding::Body {
            target,
            deserialize,
            ..
        } => {
            match req.content_type() {
                Some(actual) if actual == JSON_CONTENT_TYPE => {}
                actual => {
                    return Err(BindingError::UnsupportedContentType {
                        expected: JSON_CONTENT_TYPE,
                        actual: actual.map(String::from),
                    })
                }
            }

            let reader = req.take_body().ok_or_else(|| BindingError::MalformedBody {
                detail: "request body is empty".to_string(),
            })?;
            let text = read_body(reader, limits.max_body_bytes)?;

            debug!(
                target_type = %target,
                body_bytes = text.len(),
                "Request body read"
            );

            let erased =
                (deserialize.as_ref())(&text).map_err(|e| BindingError::MalformedBody {
                    detail: e.to_string(),
                })?;
            Ok(Arg::Body(erased))
        }
        ParameterBinding::Unbound { ty } => Ok(zero_value(*ty)),
    }
}

/// Read the body stream to a string, capped at `limit` bytes.
fn read_body(reader: Box<dyn Read + Send>, limit: usize) -> Result<String, BindingError> {
    let mut text = String::new();
    // Read one byte past the cap so an exactly-at-limit body is accepted.
    let mut capped = reader.take((limit as u64).saturating_add(1));
    capped
        .read_to_string(&mut text)
        .map_err(|e| BindingError::MalformedBody {
            detail: format!("failed to read request body: {}", e),
        })?;
    if text.len() > limit {
        return Err(BindingError::PayloadTooLarge { limit });
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::binding::HandlerSpec;
    use crate::coerce::BindType;
    use http::Method;
    use std::io::Cursor;

    fn json_request(target: &str, body: &str) -> RequestView {
        RequestView::from_target(
            Method::POST,
            target,
            Some(JSON_CONTENT_TYPE.to_string()),
            Some(Box::new(Cursor::new(body.as_bytes().to_vec()))),
        )
    }

    #[test]
    fn test_required_query_first_value_only() {
        let spec = HandlerSpec::new().required_query("id", BindType::I32);
        let mut req = RequestView::from_target(Method::GET, "/v?id=1&id=2", None, None);
        let args = map_parameters(spec.bindings(), &mut req, &ServiceLimits::default()).unwrap();
        assert_eq!(args.i32(0).unwrap(), 1);
    }

    #[test]
    fn test_optional_query_zero_value_when_absent() {
        let spec = HandlerSpec::new()
            .optional_query("count", BindType::I32)
            .optional_query("name", BindType::Text);
        let mut req = RequestView::from_target(Method::GET, "/v", None, None);
        let args = map_parameters(spec.bindings(), &mut req, &ServiceLimits::default()).unwrap();
        assert_eq!(args.i32(0).unwrap(), 0);
        assert_eq!(args.text(1).unwrap(), "");
    }

    #[test]
    fn test_unbound_always_zero() {
        let spec = HandlerSpec::new().unbound(BindType::I64);
        let mut req = RequestView::from_target(Method::GET, "/v?anything=1", None, None);
        let args = map_parameters(spec.bindings(), &mut req, &ServiceLimits::default()).unwrap();
        assert_eq!(args.i64(0).unwrap(), 0);
    }

    #[test]
    fn test_invalid_scalar_names_parameter() {
        let spec = HandlerSpec::new().required_query("id", BindType::I32);
        let mut req = RequestView::from_target(Method::GET, "/v?id=abc", None, None);
        let err = map_parameters(spec.bindings(), &mut req, &ServiceLimits::default()).unwrap_err();
        match err {
            BindingError::InvalidScalar { name, value, .. } => {
                assert_eq!(name, "id");
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected error {:?}", other),
        }
    }

    #[test]
    fn test_content_type_gate() {
        #[derive(serde::Deserialize)]
        struct Dto {}
        let spec = HandlerSpec::new().body::<Dto>();
        let mut req = RequestView::from_target(
            Method::POST,
            "/v",
            Some("text/plain".to_string()),
            Some(Box::new(Cursor::new(b"{}".to_vec()))),
        );
        let err = map_parameters(spec.bindings(), &mut req, &ServiceLimits::default()).unwrap_err();
        assert!(matches!(err, BindingError::UnsupportedContentType { .. }));
    }

    #[test]
    fn test_missing_content_type_rejected() {
        #[derive(serde::Deserialize)]
        struct Dto {}
        let spec = HandlerSpec::new().body::<Dto>();
        let mut req = RequestView::from_target(
            Method::POST,
            "/v",
            None,
            Some(Box::new(Cursor::new(b"{}".to_vec()))),
        );
        let err = map_parameters(spec.bindings(), &mut req, &ServiceLimits::default()).unwrap_err();
        assert!(matches!(
            err,
            BindingError::UnsupportedContentType { actual: None, .. }
        ));
    }

    #[test]
    fn test_malformed_body() {
        #[derive(serde::Deserialize)]
        struct Dto {
            #[allow(dead_code)]
            id: i32,
        }
        let spec = HandlerSpec::new().body::<Dto>();
        let mut req = json_request("/v", "{ not json");
        let err = map_parameters(spec.bindings(), &mut req, &ServiceLimits::default()).unwrap_err();
        assert!(matches!(err, BindingError::MalformedBody { .. }));
    }

    #[test]
    fn test_body_deserializes() {
        #[derive(serde::Deserialize)]
        struct Dto {
            id: i32,
        }
        let spec = HandlerSpec::new().body::<Dto>();
        let mut req = json_request("/v", r#"{"id":7}"#);
        let mut args = map_parameters(spec.bindings(), &mut req, &ServiceLimits::default()).unwrap();
        let dto: Dto = args.take_body(0).unwrap();
        assert_eq!(dto.id, 7);
    }

    #[test]
    fn test_body_list_reconstructs_collection() {
        #[derive(serde::Deserialize, PartialEq, Debug)]
        struct Dto {
            id: i32,
        }
        let spec = HandlerSpec::new().body_list::<Dto>();
        let mut req = json_request("/v", r#"[{"id":1},{"id":2}]"#);
        let mut args = map_parameters(spec.bindings(), &mut req, &ServiceLimits::default()).unwrap();
        let list: Vec<Dto> = args.take_body(0).unwrap();
        assert_eq!(list, vec![Dto { id: 1 }, Dto { id: 2 }]);
    }

    #[test]
    fn test_payload_too_large() {
        #[derive(serde::Deserialize)]
        struct Dto {}
        let spec = HandlerSpec::new().body::<Dto>();
        let limits = ServiceLimits { max_body_bytes: 8 };
        let mut req = json_request("/v", r#"{"field":"0123456789"}"#);
        let err = map_parameters(spec.bindings(), &mut req, &limits).unwrap_err();
        assert!(matches!(err, BindingError::PayloadTooLarge { limit: 8 }));
    }

    #[test]
    fn test_body_at_limit_accepted() {
        #[derive(serde::Deserialize)]
        struct Dto {}
        let body = "{}";
        let limits = ServiceLimits {
            max_body_bytes: body.len(),
        };
        let spec = HandlerSpec::new().body::<Dto>();
        let mut req = json_request("/v", body);
        assert!(map_parameters(spec.bindings(), &mut req, &limits).is_ok());
    }
}
