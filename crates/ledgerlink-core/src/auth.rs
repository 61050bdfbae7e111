//! Auth-proxy session state shared by both backend clients.
//!
//! Every call starts out authenticating with a client-id/client-secret
//! header pair. The first time the auth proxy answers with a
//! session-establishing `Set-Cookie` header, the cookie value is captured
//! and every subsequent call presents the cookie instead. The upgrade is
//! one-directional: once a session is held it is preferred for the lifetime
//! of the adapter instance, with no expiry detection or fallback to the
//! credential headers.

use std::sync::RwLock;

use reqwest::header::{HeaderMap, SET_COOKIE};
use tracing::debug;

/// Request header carrying the client identifier.
pub const CLIENT_ID_HEADER: &str = "client-id";
/// Request header carrying the client secret.
pub const CLIENT_SECRET_HEADER: &str = "client-secret";
/// Name of the session cookie issued by the auth proxy.
pub const SESSION_COOKIE: &str = "session";

/// Credential material for authenticated backend calls.
///
/// Owned by the provider instance and shared by reference with both backend
/// clients. The cookie field is the only mutable state shared between
/// in-flight calls; it is guarded by a lock that is only ever held for a
/// synchronous read or write, never across an await point.
pub struct AuthSession {
    client_id: String,
    client_secret: String,
    cookie: RwLock<Option<String>>,
}

impl AuthSession {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            cookie: RwLock::new(None),
        }
    }

    /// The header set for the next authenticated call: the session cookie if
    /// one has been captured, the credential pair otherwise.
    ///
    /// Returned as plain name/value tuples so the HTTP and WebSocket clients
    /// can each build their own header representation.
    pub fn headers(&self) -> Vec<(&'static str, String)> {
        let cookie = self.cookie.read().expect("auth session lock poisoned");
        match cookie.as_deref() {
            Some(value) => vec![("cookie", format!("{SESSION_COOKIE}={value}"))],
            None => vec![
                (CLIENT_ID_HEADER, self.client_id.clone()),
                (CLIENT_SECRET_HEADER, self.client_secret.clone()),
            ],
        }
    }

    /// Scan response headers for a session-establishing cookie and store its
    /// value, replacing any prior session.
    pub fn absorb(&self, headers: &HeaderMap) {
        for raw in headers.get_all(SET_COOKIE) {
            let Ok(raw) = raw.to_str() else { continue };
            if let Some(value) = extract_session_cookie(raw) {
                let mut cookie = self.cookie.write().expect("auth session lock poisoned");
                if cookie.is_none() {
                    debug!("session cookie acquired; credential headers retired");
                }
                *cookie = Some(value.to_owned());
            }
        }
    }

    /// Whether a session cookie has been captured.
    pub fn has_session(&self) -> bool {
        self.cookie
            .read()
            .expect("auth session lock poisoned")
            .is_some()
    }
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("has_session", &self.has_session())
            .finish()
    }
}

/// Capture the session cookie value from one `Set-Cookie` header line:
/// everything between `session=` and the next attribute delimiter.
fn extract_session_cookie(header: &str) -> Option<&str> {
    let rest = header.trim_start().strip_prefix(SESSION_COOKIE)?;
    let rest = rest.strip_prefix('=')?;
    let end = rest.find(';').unwrap_or(rest.len());
    let value = rest[..end].trim();
    (!value.is_empty()).then_some(value)
}
