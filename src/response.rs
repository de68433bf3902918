//! Outcome-to-wire translation.
//!
//! A purely mechanical mapping: a non-null payload is serialized and paired
//! with the declared status; a null payload emits the status alone. The
//! hosting layer supplies the [`ResponseWriter`] over its native response
//! type.

use crate::outcome::Outcome;
use serde_json::Value;
use tracing::error;

/// The write surface the hosting HTTP layer exposes to the engine.
pub trait ResponseWriter {
    /// Set the status line.
    fn status(&mut self, code: u16, reason: &'static str);
    /// Add a response header.
    fn header(&mut self, name: &str, value: &str);
    /// Write the response body bytes.
    fn body(&mut self, bytes: Vec<u8>);
}

pub(crate) fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        413 => "Payload Too Large",
        500 => "Internal Server Error",
        _ => "OK",
    }
}

/// Write a status code with no body.
pub fn write_status(res: &mut dyn ResponseWriter, status: u16) {
    res.status(status, status_reason(status));
}

/// Translate a handler outcome into the wire response.
pub fn write_outcome(res: &mut dyn ResponseWriter, outcome: Outcome) {
    let (status, payload) = outcome.into_parts();
    match payload {
        Some(value) => write_json(res, status, &value),
        None => write_status(res, status),
    }
}

fn write_json(res: &mut dyn ResponseWriter, status: u16, value: &Value) {
    match serde_json::to_vec(value) {
        Ok(bytes) => {
            res.status(status, status_reason(status));
            res.header("Content-Type", "application/json");
            res.body(bytes);
        }
        Err(e) => {
            error!(error = %e, "Failed to serialize response payload");
            write_status(res, 500);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Default)]
    struct Recorded {
        status: Option<(u16, &'static str)>,
        headers: Vec<(String, String)>,
        body: Option<Vec<u8>>,
    }

    impl ResponseWriter for Recorded {
        fn status(&mut self, code: u16, reason: &'static str) {
            self.status = Some((code, reason));
        }
        fn header(&mut self, name: &str, value: &str) {
            self.headers.push((name.to_string(), value.to_string()));
        }
        fn body(&mut self, bytes: Vec<u8>) {
            self.body = Some(bytes);
        }
    }

    #[test]
    fn test_status_reason() {
        assert_eq!(status_reason(200), "OK");
        assert_eq!(status_reason(404), "Not Found");
        assert_eq!(status_reason(413), "Payload Too Large");
    }

    #[test]
    fn test_payload_written_as_json() {
        let mut res = Recorded::default();
        write_outcome(&mut res, Outcome::with_payload(200, json!({ "id": 7 })));
        assert_eq!(res.status, Some((200, "OK")));
        assert_eq!(
            res.headers,
            vec![("Content-Type".to_string(), "application/json".to_string())]
        );
        let body: Value = serde_json::from_slice(&res.body.unwrap()).unwrap();
        assert_eq!(body, json!({ "id": 7 }));
    }

    #[test]
    fn test_null_payload_writes_status_alone() {
        let mut res = Recorded::default();
        write_outcome(&mut res, Outcome::with_status(404));
        assert_eq!(res.status, Some((404, "Not Found")));
        assert!(res.headers.is_empty());
        assert!(res.body.is_none());
    }
}
