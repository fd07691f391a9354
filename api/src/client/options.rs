use std::collections::BTreeMap;

use bytes::Bytes;

use crate::method::RestMethod;

/// Per-call request settings.
///
/// Headers given here win over the client's defaults for this call only.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: RestMethod,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Bytes>,
}

impl RequestOptions {
    pub fn new(method: RestMethod) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Sets a raw body, sent as-is for methods that
    /// [carry one](RestMethod::carries_body).
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }
}
