//! Crate-wide default values.
//!
//! Centralizes timeouts, header keys, and envelope code constants so call
//! sites never hard-code them.

/// HTTP transport defaults.
pub mod http {
    use std::time::Duration;

    /// Default total request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
    /// Default connect timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
    /// Default User-Agent sent on every request.
    pub const USER_AGENT: &str = concat!("restrelay/", env!("CARGO_PKG_VERSION"));
    /// Header key the authorization token is injected under.
    ///
    /// The upstream API uses a bare `token` header, not `Authorization`.
    pub const TOKEN_HEADER: &str = "token";
    /// Default Content-Type for JSON bodies.
    pub const CONTENT_TYPE_JSON: &str = "application/json";
}

/// Envelope code sentinels shared by the pipeline and its callers.
pub mod envelope {
    /// The sole success code; everything else is a business or server error.
    pub const SUCCESS: i64 = 200;
    /// Session expired / not authorized; triggers token eviction.
    pub const UNAUTHORIZED: i64 = 403;
    /// Server-side failure; surfaces a notification when enabled.
    pub const SERVER_ERROR: i64 = 500;
    /// Message used when a 2xx response arrives with an empty body.
    pub const SERVER_ERROR_MESSAGE: &str = "Server error";
}
