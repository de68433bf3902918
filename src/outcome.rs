//! The typed result a handler returns, prior to wire serialization.

use serde::Serialize;
use serde_json::Value;

/// A handler's typed result: a status code plus an optional JSON payload.
///
/// Produced per invocation and consumed immediately by response translation;
/// never retained. The constructor helpers mirror the status vocabulary
/// handlers actually use; anything else goes through [`Outcome::with_status`]
/// or [`Outcome::with_payload`].
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    status: u16,
    payload: Option<Value>,
}

impl Outcome {
    /// An outcome carrying a status code alone, no body.
    #[must_use]
    pub fn with_status(status: u16) -> Self {
        Outcome {
            status,
            payload: None,
        }
    }

    /// An outcome carrying a status code and an already-serialized payload.
    #[must_use]
    pub fn with_payload(status: u16, payload: Value) -> Self {
        Outcome {
            status,
            payload: Some(payload),
        }
    }

    /// 200 with a serialized payload.
    pub fn ok<T: Serialize>(payload: &T) -> anyhow::Result<Self> {
        Ok(Self::with_payload(200, serde_json::to_value(payload)?))
    }

    /// 200 with no body.
    #[must_use]
    pub fn ok_empty() -> Self {
        Self::with_status(200)
    }

    /// 201 with a serialized payload.
    pub fn created<T: Serialize>(payload: &T) -> anyhow::Result<Self> {
        Ok(Self::with_payload(201, serde_json::to_value(payload)?))
    }

    /// 400 with no body.
    #[must_use]
    pub fn bad_request() -> Self {
        Self::with_status(400)
    }

    /// 404 with no body.
    #[must_use]
    pub fn not_found() -> Self {
        Self::with_status(404)
    }

    /// 500 with no body.
    #[must_use]
    pub fn internal_error() -> Self {
        Self::with_status(500)
    }

    #[inline]
    #[must_use]
    pub fn status(&self) -> u16 {
        self.status
    }

    #[inline]
    #[must_use]
    pub fn payload(&self) -> Option<&Value> {
        self.payload.as_ref()
    }

    pub(crate) fn into_parts(self) -> (u16, Option<Value>) {
        (self.status, self.payload)
    }
}
