//! Request pipeline.
//!
//! Every outbound call funnels through [`Pipeline::request`], which applies
//! the registered hooks in a fixed order: pre-request preflight, token
//! injection, transport call, failure classification, envelope parsing,
//! post-response veto, and the 403/500 side effects.

use std::sync::{Arc, RwLock};

use reqwest::header::{HeaderValue, CONTENT_TYPE};
use tokio_util::sync::CancellationToken;

use crate::auth::AuthorizationState;
use crate::config::HttpConfig;
use crate::defaults::envelope as codes;
use crate::defaults::http::TOKEN_HEADER;
use crate::error::{classify_transport_error, status_message, FailureKind, PipelineError};
use crate::headers;
use crate::hooks::{Interceptor, Preflight, RequestContext};
use crate::observe::{
    AlwaysReachable, NetworkProbe, Notifier, NullNotifier, NullSessionListener, SessionListener,
};
use crate::types::{RequestDescriptor, ResponseEnvelope};

mod multipart;
mod verbs;


pub use multipart::form_from_json;

/// Title used for user-visible error notifications.
const ERROR_TITLE: &str = "Error";

/// Interceptor-based request pipeline over a shared `reqwest` client.
///
/// Constructed once at process start via [`PipelineBuilder`] and passed by
/// reference (or `Arc`) to every call site; `request` takes `&self` and is
/// reentrant, so concurrent calls need no coordination.
pub struct Pipeline {
    client: reqwest::Client,
    config: HttpConfig,
    auth: AuthorizationState,
    interceptor: RwLock<Option<Arc<dyn Interceptor>>>,
    notifier: Arc<dyn Notifier>,
    session: Arc<dyn SessionListener>,
    probe: Arc<dyn NetworkProbe>,
    cancel_all: CancellationToken,
}

/// Builder for [`Pipeline`].
pub struct PipelineBuilder {
    config: HttpConfig,
    interceptor: Option<Arc<dyn Interceptor>>,
    notifier: Arc<dyn Notifier>,
    session: Arc<dyn SessionListener>,
    probe: Arc<dyn NetworkProbe>,
}

impl PipelineBuilder {
    pub fn new(config: HttpConfig) -> Self {
        Self {
            config,
            interceptor: None,
            notifier: Arc::new(NullNotifier),
            session: Arc::new(NullSessionListener),
            probe: Arc::new(AlwaysReachable),
        }
    }

    pub fn interceptor(mut self, interceptor: Arc<dyn Interceptor>) -> Self {
        self.interceptor = Some(interceptor);
        self
    }

    pub fn notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn session_listener(mut self, session: Arc<dyn SessionListener>) -> Self {
        self.session = session;
        self
    }

    pub fn network_probe(mut self, probe: Arc<dyn NetworkProbe>) -> Self {
        self.probe = probe;
        self
    }

    pub fn build(self) -> Result<Pipeline, PipelineError> {
        let mut client = reqwest::Client::builder();
        if let Some(timeout) = self.config.timeout {
            client = client.timeout(timeout);
        }
        if let Some(connect_timeout) = self.config.connect_timeout {
            client = client.connect_timeout(connect_timeout);
        }
        let client = client
            .build()
            .map_err(|e| PipelineError::Configuration(format!("http client: {e}")))?;

        Ok(Pipeline {
            client,
            config: self.config,
            auth: AuthorizationState::new(),
            interceptor: RwLock::new(self.interceptor),
            notifier: self.notifier,
            session: self.session,
            probe: self.probe,
            cancel_all: CancellationToken::new(),
        })
    }
}

impl Pipeline {
    pub fn builder(config: HttpConfig) -> PipelineBuilder {
        PipelineBuilder::new(config)
    }

    /// The authorization state, for direct inspection.
    pub fn auth(&self) -> &AuthorizationState {
        &self.auth
    }

    /// Store the bearer token injected into subsequent requests.
    pub fn set_authorization(&self, token: &str, add_bearer: bool) {
        self.auth.set_token(token, add_bearer);
    }

    pub fn clear_authorization(&self) {
        self.auth.clear();
    }

    /// Register the interceptor; replaces any previously registered one.
    pub fn set_interceptor(&self, interceptor: Arc<dyn Interceptor>) {
        let mut guard = self.interceptor.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(interceptor);
    }

    /// Cancel every in-flight request bound to the pipeline-wide token.
    ///
    /// Requests issued with a caller-supplied token are unaffected.
    pub fn cancel_all(&self) {
        self.cancel_all.cancel();
    }

    fn interceptor(&self) -> Option<Arc<dyn Interceptor>> {
        self.interceptor
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Issue one request through the full hook pipeline.
    ///
    /// Transport-tier problems come back as [`PipelineError::Transport`];
    /// a returned envelope can still carry any business code, 403 and 500
    /// included, which the caller inspects.
    pub async fn request(
        &self,
        descriptor: RequestDescriptor,
    ) -> Result<ResponseEnvelope, PipelineError> {
        let url = self.config.url_for(&descriptor.path);
        let ctx = RequestContext::new(descriptor.method.clone(), url.clone());

        // Preflight: a Complete/Abort outcome means no transport call.
        if let Some(hook) = self.interceptor() {
            match hook.on_request(&ctx, &descriptor) {
                Preflight::Continue => {}
                Preflight::Complete(envelope) => {
                    tracing::debug!(
                        request_id = %ctx.request_id,
                        "request completed by preflight hook"
                    );
                    return Ok(envelope);
                }
                Preflight::Abort { message } => {
                    tracing::debug!(
                        request_id = %ctx.request_id,
                        "request aborted by preflight hook: {message}"
                    );
                    return Err(PipelineError::Rejected(message));
                }
            }
        }

        // Assemble headers: config defaults, then per-request overrides,
        // then token injection unless the caller set that key explicitly.
        let mut header_map = headers::build_headers(&self.config.headers)?;
        header_map = headers::merge_headers(header_map, &descriptor.headers);
        if !header_map.contains_key(TOKEN_HEADER) {
            if let Some(token) = self.auth.header_value() {
                let value = HeaderValue::from_str(&token).map_err(|e| {
                    PipelineError::Configuration(format!("invalid token value: {e}"))
                })?;
                header_map.insert(TOKEN_HEADER, value);
            }
        }
        headers::apply_transport_defaults(&mut header_map, self.config.user_agent.as_deref());
        if descriptor.form_data {
            // Multipart owns its boundary-based Content-Type.
            header_map.remove(CONTENT_TYPE);
        }

        let mut rb = self
            .client
            .request(descriptor.method.clone(), &url)
            .headers(header_map);

        if !descriptor.query.is_empty() {
            let pairs: Vec<(&String, &String)> = descriptor.query.iter().collect();
            rb = rb.query(&pairs);
        }
        if let Some(body) = &descriptor.body {
            if descriptor.form_data {
                rb = rb.multipart(form_from_json(body)?);
            } else {
                rb = rb.json(body);
            }
        }
        if let Some(timeout) = descriptor.timeout {
            rb = rb.timeout(timeout);
        }

        let cancel = descriptor
            .cancel
            .clone()
            .unwrap_or_else(|| self.cancel_all.clone());
        if cancel.is_cancelled() {
            return Err(self.fail(&ctx, FailureKind::Cancelled).await);
        }

        let send_result = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!(request_id = %ctx.request_id, "request cancelled");
                return Err(self.fail(&ctx, FailureKind::Cancelled).await);
            }
            result = rb.send() => result,
        };

        let response = match send_result {
            Ok(response) => response,
            Err(error) => {
                let kind = classify_transport_error(&error);
                tracing::warn!(
                    request_id = %ctx.request_id,
                    url = %url,
                    kind = ?kind,
                    "transport failure: {error}"
                );
                return Err(self.fail(&ctx, kind).await);
            }
        };

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(
                request_id = %ctx.request_id,
                url = %url,
                status = status.as_u16(),
                "bad response status"
            );
            return Err(self.fail(&ctx, FailureKind::BadStatus(status.as_u16())).await);
        }

        // The token must also cover the body download; headers arriving
        // first does not make the request complete.
        let text = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!(request_id = %ctx.request_id, "request cancelled during body read");
                return Err(self.fail(&ctx, FailureKind::Cancelled).await);
            }
            result = response.text() => match result {
                Ok(text) => text,
                Err(error) => {
                    let kind = classify_transport_error(&error);
                    return Err(self.fail(&ctx, kind).await);
                }
            },
        };

        // 2xx with an empty body never happens on a healthy backend; treat
        // it as a server error so callers see a uniform envelope.
        if text.trim().is_empty() {
            let envelope = ResponseEnvelope::server_error();
            if descriptor.show_error {
                self.notifier.notify(ERROR_TITLE, codes::SERVER_ERROR_MESSAGE);
            }
            return Ok(envelope);
        }

        let envelope: ResponseEnvelope = match serde_json::from_str(&text) {
            Ok(envelope) => envelope,
            Err(error) => {
                tracing::warn!(
                    request_id = %ctx.request_id,
                    "envelope parse failure: {error}"
                );
                return Err(self.fail(&ctx, FailureKind::Decode).await);
            }
        };

        // Post-response veto: a non-empty message fails the call.
        if let Some(hook) = self.interceptor() {
            if let Some(message) = hook.on_response(&ctx, &envelope) {
                if !message.is_empty() {
                    tracing::debug!(
                        request_id = %ctx.request_id,
                        "response rejected by hook: {message}"
                    );
                    return Err(PipelineError::Rejected(message));
                }
            }
        }

        if envelope.is_unauthorized() {
            tracing::warn!(request_id = %ctx.request_id, "session expired, evicting token");
            self.auth.clear();
            self.session.on_session_expired();
        } else if envelope.code == codes::SERVER_ERROR && descriptor.show_error {
            self.notifier.notify(ERROR_TITLE, codes::SERVER_ERROR_MESSAGE);
        }

        Ok(envelope)
    }

    /// Resolve a failure kind into a transport error, honoring the
    /// interceptor's message override.
    async fn fail(&self, ctx: &RequestContext, kind: FailureKind) -> PipelineError {
        let message = self.failure_message(ctx, &kind).await;
        PipelineError::transport(kind, message)
    }

    async fn failure_message(&self, ctx: &RequestContext, kind: &FailureKind) -> String {
        if let Some(hook) = self.interceptor() {
            if let Some(message) = hook.on_failure(ctx, kind) {
                return message;
            }
        }
        if let Some(message) = kind.default_message() {
            return message.to_string();
        }
        match kind {
            FailureKind::BadStatus(status) => status_message(*status),
            // Unknown: the probe decides between a dead backend and no
            // network at all.
            _ => {
                if self.probe.is_reachable().await {
                    "Connection to server failed".to_string()
                } else {
                    "No network, please check your connection".to_string()
                }
            }
        }
    }
}
