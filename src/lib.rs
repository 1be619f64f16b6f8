//! restrelay
//!
//! Envelope-normalizing REST request pipeline. Every call funnels through a
//! single [`Pipeline::request`] entry point that applies interceptor hooks,
//! injects the stored authorization token, and normalizes responses into a
//! [`ResponseEnvelope`] or a classified [`PipelineError`].
#![deny(unsafe_code)]

pub mod auth;
pub mod config;
pub mod defaults;
pub mod error;
pub mod headers;
pub mod hooks;
pub mod observe;
pub mod pipeline;
pub mod types;

pub use auth::AuthorizationState;
pub use config::{HttpConfig, HttpConfigBuilder};
pub use error::{FailureKind, PipelineError};
pub use hooks::{Interceptor, Preflight, RequestContext};
pub use observe::{NetworkProbe, Notifier, SessionListener};
pub use pipeline::{Pipeline, PipelineBuilder};
pub use types::{RequestDescriptor, ResponseEnvelope};
