//! HTTP Headers Utility
//!
//! Common utilities for building the outgoing header set from the pipeline's
//! defaults, the per-request headers, and the authorization state.

use crate::error::PipelineError;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, USER_AGENT};
use std::collections::HashMap;

/// Build a `HeaderMap` from string pairs, rejecting invalid names/values.
pub fn build_headers(pairs: &HashMap<String, String>) -> Result<HeaderMap, PipelineError> {
    let mut headers = HeaderMap::new();
    for (key, value) in pairs {
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
            PipelineError::Configuration(format!("invalid header name '{key}': {e}"))
        })?;
        let value = HeaderValue::from_str(value).map_err(|e| {
            PipelineError::Configuration(format!("invalid header value for '{key}': {e}"))
        })?;
        headers.insert(name, value);
    }
    Ok(headers)
}

/// Merge extra headers into base headers.
///
/// Extra headers override base headers of the same name; invalid pairs are
/// skipped rather than failing the whole merge.
pub fn merge_headers(mut base: HeaderMap, extra: &HashMap<String, String>) -> HeaderMap {
    for (k, v) in extra {
        if let (Ok(name), Ok(val)) = (
            HeaderName::from_bytes(k.as_bytes()),
            HeaderValue::from_str(v),
        ) {
            base.insert(name, val);
        }
    }
    base
}

/// Apply the JSON content type and user agent defaults where absent.
pub fn apply_transport_defaults(headers: &mut HeaderMap, user_agent: Option<&str>) {
    if !headers.contains_key(CONTENT_TYPE) {
        headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static(crate::defaults::http::CONTENT_TYPE_JSON),
        );
    }
    if let Some(ua) = user_agent {
        if !headers.contains_key(USER_AGENT) {
            if let Ok(value) = HeaderValue::from_str(ua) {
                headers.insert(USER_AGENT, value);
            }
        }
    }
}
