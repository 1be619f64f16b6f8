//! Interceptor hooks.
//!
//! The pipeline holds at most one [`Interceptor`] (last write wins through
//! [`crate::pipeline::Pipeline::set_interceptor`]); each of its three hooks
//! defaults to a no-op, so implementors override only what they need.

use crate::error::FailureKind;
use crate::types::{RequestDescriptor, ResponseEnvelope};

/// Per-request context handed to every hook.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique id for correlating hook invocations and log lines.
    pub request_id: String,
    pub method: reqwest::Method,
    pub url: String,
}

impl RequestContext {
    pub fn new(method: reqwest::Method, url: impl Into<String>) -> Self {
        Self {
            request_id: uuid::Uuid::new_v4().to_string(),
            method,
            url: url.into(),
        }
    }
}

/// Outcome of the pre-request hook.
#[derive(Debug, Clone)]
pub enum Preflight {
    /// Proceed with the transport call.
    Continue,
    /// Complete the call locally with this envelope; no transport call is
    /// issued (e.g. serving a cached response).
    Complete(ResponseEnvelope),
    /// Abort the call; no transport call is issued.
    Abort { message: String },
}

/// Request/response/error hook set applied around every transport call.
///
/// `on_response` and `on_failure` return `None` to mean "no override"; this
/// is distinct from an empty string, which `on_response` treats as no
/// rejection.
pub trait Interceptor: Send + Sync {
    /// Runs before the transport call is issued.
    fn on_request(&self, _ctx: &RequestContext, _descriptor: &RequestDescriptor) -> Preflight {
        Preflight::Continue
    }

    /// Runs on a parsed envelope. A non-empty message converts the call into
    /// a rejected failure carrying that message.
    fn on_response(&self, _ctx: &RequestContext, _envelope: &ResponseEnvelope) -> Option<String> {
        None
    }

    /// Runs on a transport failure. A returned message replaces the default
    /// mapping for the failure kind.
    fn on_failure(&self, _ctx: &RequestContext, _kind: &FailureKind) -> Option<String> {
        None
    }
}
