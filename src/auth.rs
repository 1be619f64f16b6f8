//! Authorization state.
//!
//! A single optional bearer token with process lifetime. No expiry tracking;
//! the token lives until [`AuthorizationState::clear`] or a 403 envelope
//! evicts it.

use secrecy::{ExposeSecret, SecretString};
use std::sync::RwLock;

/// Process-lifetime token store, shared by reference across all call sites.
///
/// The stored value is the final header value: `set_token` with
/// `add_bearer = true` stores `Bearer <token>` so injection is a plain copy.
#[derive(Debug, Default)]
pub struct AuthorizationState {
    token: RwLock<Option<SecretString>>,
}

impl AuthorizationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a token, optionally prefixed with `Bearer `.
    pub fn set_token(&self, token: &str, add_bearer: bool) {
        let value = if add_bearer {
            format!("Bearer {token}")
        } else {
            token.to_string()
        };
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = Some(SecretString::from(value));
    }

    /// Evict the stored token.
    pub fn clear(&self) {
        let mut guard = self.token.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }

    pub fn is_authorized(&self) -> bool {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    /// The value to inject under the `token` header, if any.
    pub fn header_value(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .as_ref()
            .map(|t| t.expose_secret().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_token_with_bearer_prefix() {
        let auth = AuthorizationState::new();
        auth.set_token("abc123", true);
        assert_eq!(auth.header_value().as_deref(), Some("Bearer abc123"));
        assert!(auth.is_authorized());
    }

    #[test]
    fn set_token_without_prefix_stores_raw_value() {
        let auth = AuthorizationState::new();
        auth.set_token("abc123", false);
        assert_eq!(auth.header_value().as_deref(), Some("abc123"));
    }

    #[test]
    fn clear_evicts_token() {
        let auth = AuthorizationState::new();
        auth.set_token("abc123", true);
        auth.clear();
        assert!(!auth.is_authorized());
        assert_eq!(auth.header_value(), None);
    }

    #[test]
    fn last_write_wins() {
        let auth = AuthorizationState::new();
        auth.set_token("first", true);
        auth.set_token("second", false);
        assert_eq!(auth.header_value().as_deref(), Some("second"));
    }
}
