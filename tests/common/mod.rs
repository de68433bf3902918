#![allow(dead_code)]

use ctrldispatch::ResponseWriter;

pub mod tracing_util {
    use std::sync::Once;

    static INIT: Once = Once::new();

    /// Install a test-writer subscriber once per test binary. Honors
    /// `RUST_LOG` so a failing run can be re-executed with engine logs.
    pub fn init() {
        INIT.call_once(|| {
            let _ = tracing_subscriber::fmt()
                .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
                .with_test_writer()
                .try_init();
        });
    }
}

/// A `ResponseWriter` that records what the engine wrote.
#[derive(Debug, Default)]
pub struct RecordedResponse {
    pub status: Option<u16>,
    pub reason: Option<&'static str>,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl RecordedResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn json_body(&self) -> serde_json::Value {
        let body = self.body.as_ref().expect("response has no body");
        serde_json::from_slice(body).expect("response body is not JSON")
    }
}

impl ResponseWriter for RecordedResponse {
    fn status(&mut self, code: u16, reason: &'static str) {
        self.status = Some(code);
        self.reason = Some(reason);
    }

    fn header(&mut self, name: &str, value: &str) {
        self.headers.push((name.to_string(), value.to_string()));
    }

    fn body(&mut self, bytes: Vec<u8>) {
        self.body = Some(bytes);
    }
}
