//! Request descriptor and its builder.

use std::collections::HashMap;
use std::time::Duration;

use reqwest::Method;
use tokio_util::sync::CancellationToken;

/// Everything the pipeline needs to issue one outbound call.
///
/// Built via [`RequestDescriptor::builder`]; the method defaults to GET and
/// `show_error` defaults to `true`.
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    /// Path relative to the pipeline's base url.
    pub path: String,
    pub query: HashMap<String, String>,
    /// Opaque JSON body; coerced into multipart form parts when `form_data`.
    pub body: Option<serde_json::Value>,
    /// Transmit the body as `multipart/form-data` instead of JSON.
    pub form_data: bool,
    /// Per-request headers, merged over the pipeline's default headers.
    pub headers: HashMap<String, String>,
    /// Per-request timeout override.
    pub timeout: Option<Duration>,
    /// Caller-supplied cancellation handle; falls back to the pipeline-wide
    /// token when absent.
    pub cancel: Option<CancellationToken>,
    /// Whether server-error notifications are surfaced for this call.
    pub show_error: bool,
}

impl RequestDescriptor {
    pub fn builder(path: impl Into<String>) -> RequestDescriptorBuilder {
        RequestDescriptorBuilder::new(path)
    }

    /// Shorthand for a plain GET with no query or body.
    pub fn get(path: impl Into<String>) -> Self {
        Self::builder(path).build()
    }
}

/// Builder for [`RequestDescriptor`].
#[derive(Debug, Clone)]
pub struct RequestDescriptorBuilder {
    method: Method,
    path: String,
    query: HashMap<String, String>,
    body: Option<serde_json::Value>,
    form_data: bool,
    headers: HashMap<String, String>,
    timeout: Option<Duration>,
    cancel: Option<CancellationToken>,
    show_error: bool,
}

impl RequestDescriptorBuilder {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query: HashMap::new(),
            body: None,
            form_data: false,
            headers: HashMap::new(),
            timeout: None,
            cancel: None,
            show_error: true,
        }
    }

    pub fn method(mut self, method: Method) -> Self {
        self.method = method;
        self
    }

    pub fn query<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    pub fn queries(mut self, params: HashMap<String, String>) -> Self {
        self.query.extend(params);
        self
    }

    pub fn body(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn form_data(mut self, form_data: bool) -> Self {
        self.form_data = form_data;
        self
    }

    pub fn header<K: Into<String>, V: Into<String>>(mut self, key: K, value: V) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn show_error(mut self, show_error: bool) -> Self {
        self.show_error = show_error;
        self
    }

    pub fn build(self) -> RequestDescriptor {
        RequestDescriptor {
            method: self.method,
            path: self.path,
            query: self.query,
            body: self.body,
            form_data: self.form_data,
            headers: self.headers,
            timeout: self.timeout,
            cancel: self.cancel,
            show_error: self.show_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults_to_get_with_errors_shown() {
        let desc = RequestDescriptor::builder("/user/profile").build();
        assert_eq!(desc.method, Method::GET);
        assert!(desc.show_error);
        assert!(!desc.form_data);
        assert!(desc.body.is_none());
        assert!(desc.cancel.is_none());
    }

    #[test]
    fn builder_accumulates_query_and_headers() {
        let desc = RequestDescriptor::builder("/search")
            .method(Method::POST)
            .query("page", "2")
            .query("size", "20")
            .header("x-trace", "abc")
            .build();
        assert_eq!(desc.query.len(), 2);
        assert_eq!(desc.headers.get("x-trace").map(String::as_str), Some("abc"));
        assert_eq!(desc.method, Method::POST);
    }
}
