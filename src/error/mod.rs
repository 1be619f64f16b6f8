//! Error Handling Module
//!
//! Failure taxonomy for the request pipeline. The two-tier contract is
//! explicit here: [`PipelineError::Transport`] covers anything that fails
//! before a structured envelope can be parsed (the caller never sees a
//! language-level exception from the transport layer), while business-level
//! failures travel inside a returned [`crate::types::ResponseEnvelope`] and
//! are not errors at this layer at all.

use thiserror::Error;

/// Classification of a transport-tier failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    /// Connection to the server could not be established in time.
    ConnectTimeout,
    /// The request body could not be written in time.
    SendTimeout,
    /// The server did not respond in time.
    ReceiveTimeout,
    /// TCP/TLS connection failed outright.
    ConnectionFailed,
    /// TLS certificate validation failed.
    BadCertificate,
    /// The request was cancelled via its cancellation token.
    Cancelled,
    /// The server answered with a non-2xx HTTP status.
    BadStatus(u16),
    /// The response body was not a valid envelope.
    Decode,
    /// Anything the transport layer could not classify further.
    Unknown,
}

impl FailureKind {
    /// Default human-readable message for this failure kind.
    ///
    /// `Unknown` deliberately has no fixed message here; the pipeline
    /// resolves it through the network-reachability probe.
    pub fn default_message(&self) -> Option<&'static str> {
        match self {
            Self::ConnectTimeout => Some("Server connection timeout"),
            Self::SendTimeout => Some("Request send timeout"),
            Self::ReceiveTimeout => Some("Server response timeout"),
            Self::ConnectionFailed => Some("Connection to server failed"),
            Self::BadCertificate => Some("Invalid server certificate"),
            Self::Cancelled => Some("Request cancelled"),
            Self::Decode => Some("Invalid response from server"),
            Self::BadStatus(_) | Self::Unknown => None,
        }
    }
}

/// Human-readable message for a non-2xx HTTP status.
pub fn status_message(status: u16) -> String {
    match status {
        400 => "Bad request".to_string(),
        401 => "Not authorized".to_string(),
        403 => "Access forbidden".to_string(),
        404 => "Resource not found".to_string(),
        405 => "Method not allowed".to_string(),
        408 => "Request timed out".to_string(),
        500 => "Internal server error".to_string(),
        502 => "Bad gateway".to_string(),
        503 => "Service unavailable".to_string(),
        504 => "Gateway timeout".to_string(),
        other => format!("HTTP error {other}"),
    }
}

/// Errors returned by [`crate::pipeline::Pipeline::request`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Transport-tier failure: no envelope was produced.
    #[error("{message}")]
    Transport { kind: FailureKind, message: String },

    /// The post-response hook vetoed an otherwise successful call.
    #[error("{0}")]
    Rejected(String),

    /// Invalid pipeline or request configuration (bad url, header name, ...).
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl PipelineError {
    pub fn transport(kind: FailureKind, message: impl Into<String>) -> Self {
        Self::Transport {
            kind,
            message: message.into(),
        }
    }

    /// The failure kind, when this is a transport-tier error.
    pub fn failure_kind(&self) -> Option<&FailureKind> {
        match self {
            Self::Transport { kind, .. } => Some(kind),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.failure_kind(), Some(FailureKind::Cancelled))
    }
}

/// Classify a `reqwest` transport error into a [`FailureKind`].
///
/// `reqwest` does not expose a certificate-failure predicate, so the error
/// source chain is scanned for the rustls/native-tls certificate wording.
pub fn classify_transport_error(error: &reqwest::Error) -> FailureKind {
    if error.is_timeout() {
        if error.is_connect() {
            return FailureKind::ConnectTimeout;
        }
        if error.is_body() {
            return FailureKind::SendTimeout;
        }
        return FailureKind::ReceiveTimeout;
    }
    if is_certificate_error(error) {
        return FailureKind::BadCertificate;
    }
    if error.is_connect() {
        return FailureKind::ConnectionFailed;
    }
    // Non-timeout request-phase errors (redirect policy, malformed urls,
    // mid-body stream failures) carry no timeout meaning; the reachability
    // probe resolves their message.
    FailureKind::Unknown
}

fn is_certificate_error(error: &reqwest::Error) -> bool {
    let mut source = std::error::Error::source(error);
    while let Some(err) = source {
        let text = err.to_string().to_lowercase();
        if text.contains("certificate") || text.contains("unknownissuer") {
            return true;
        }
        source = err.source();
    }
    false
}
