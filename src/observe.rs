//! External collaborators the pipeline reports into.
//!
//! All three seams default to inert implementations so a bare pipeline works
//! without wiring; applications inject real implementations (toast/snackbar
//! surfaces, session managers, connectivity monitors).

use async_trait::async_trait;

/// User-visible transient notification channel.
///
/// Invoked when an unrecoverable server error must be surfaced; decoupled
/// from the pipeline's return value.
pub trait Notifier: Send + Sync {
    fn notify(&self, title: &str, message: &str);
}

/// Listener for authorization expiry (envelope code 403).
///
/// Fired after the cached token has been evicted; redirecting the user (e.g.
/// to a login screen) is the listener's job, not the pipeline's.
pub trait SessionListener: Send + Sync {
    fn on_session_expired(&self);
}

/// Network-reachability probe.
///
/// Used only to disambiguate an unclassifiable transport failure into
/// "connection failed" vs "no network".
#[async_trait]
pub trait NetworkProbe: Send + Sync {
    async fn is_reachable(&self) -> bool;
}

/// Drops all notifications.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, title: &str, message: &str) {
        tracing::debug!("notification suppressed: {title}: {message}");
    }
}

/// Ignores session expiry.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSessionListener;

impl SessionListener for NullSessionListener {
    fn on_session_expired(&self) {}
}

/// Assumes the network is reachable.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlwaysReachable;

#[async_trait]
impl NetworkProbe for AlwaysReachable {
    async fn is_reachable(&self) -> bool {
        true
    }
}
