//! Session Store
//!
//! Token-backed authentication state with field-level reactivity,
//! constructed once at startup and provided app-wide via context.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use leptos::prelude::*;
use reactive_stores::Store;
use serde_json::Value;

const TOKEN_KEY: &str = "token";

/// Authentication state derived from the access token.
///
/// Invariant: `authenticated` is true exactly when a decodable token is
/// held. An expired but well-formed token still counts; the backend
/// rejects it per-request.
#[derive(Clone, Debug, Default, Store)]
pub struct SessionState {
    pub token: Option<String>,
    /// Email claim decoded from the token.
    pub identity: Option<String>,
    pub authenticated: bool,
}

/// Type alias for the store.
pub type SessionStore = Store<SessionState>;

/// Get the session store from context.
pub fn use_session() -> SessionStore {
    expect_context::<SessionStore>()
}

// ========================
// Session Transitions
// ========================

/// Initial state: adopt a persisted token if it still decodes. A token
/// that fails to decode is corruption, not a retryable error; it is
/// discarded on the spot.
pub fn restore_session() -> SessionState {
    let Some(token) = read_token() else {
        return SessionState::default();
    };
    match decode_email_claim(&token) {
        Ok(email) => SessionState {
            token: Some(token),
            identity: Some(email),
            authenticated: true,
        },
        Err(_) => {
            clear_token();
            SessionState::default()
        }
    }
}

/// Adopt a freshly issued token: derive the identity, persist the token,
/// flip to authenticated.
pub fn session_set_credentials(store: &SessionStore, token: String) -> Result<(), String> {
    let email = decode_email_claim(&token)?;
    write_token(&token);
    store.token().set(Some(token));
    store.identity().set(Some(email));
    store.authenticated().set(true);
    Ok(())
}

/// Drop identity, token and the persisted copy.
pub fn session_logout(store: &SessionStore) {
    clear_token();
    store.token().set(None);
    store.identity().set(None);
    store.authenticated().set(false);
}

/// Extract the `email` claim from a JWT payload without verifying the
/// signature. Verification belongs to the backend; the frontend only
/// derives the display identity.
pub fn decode_email_claim(token: &str) -> Result<String, String> {
    let payload = token
        .split('.')
        .nth(1)
        .ok_or("token has no payload segment")?;
    let bytes = URL_SAFE_NO_PAD
        .decode(payload.trim_end_matches('='))
        .map_err(|e| format!("invalid token payload: {e}"))?;
    let claims: Value =
        serde_json::from_slice(&bytes).map_err(|e| format!("invalid token claims: {e}"))?;
    claims
        .get("email")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| "token has no email claim".to_string())
}

// ========================
// Persisted Client State
// ========================

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn read_token() -> Option<String> {
    local_storage()?.get_item(TOKEN_KEY).ok().flatten()
}

fn write_token(token: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(TOKEN_KEY, token);
    }
}

fn clear_token() {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(TOKEN_KEY);
    }
}

fn avatar_key(email: &str) -> String {
    format!("avatar_{email}")
}

/// Avatar images are keyed by email and deliberately survive logout.
pub fn load_avatar(email: &str) -> Option<String> {
    local_storage()?.get_item(&avatar_key(email)).ok().flatten()
}

pub fn save_avatar(email: &str, data_url: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(&avatar_key(email), data_url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with_payload(payload: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.as_bytes());
        format!("{header}.{body}.signature")
    }

    #[test]
    fn decodes_the_email_claim() {
        let token = token_with_payload(r#"{"email":"admin@example.com","iat":1}"#);
        assert_eq!(
            decode_email_claim(&token).unwrap(),
            "admin@example.com"
        );
    }

    #[test]
    fn tolerates_padded_payload_segments() {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256"}"#);
        let mut body = URL_SAFE_NO_PAD.encode(br#"{"email":"a@b.co"}"#);
        while body.len() % 4 != 0 {
            body.push('=');
        }
        let token = format!("{header}.{body}.sig");
        assert_eq!(decode_email_claim(&token).unwrap(), "a@b.co");
    }

    #[test]
    fn rejects_tokens_without_a_payload_segment() {
        assert!(decode_email_claim("garbage").is_err());
    }

    #[test]
    fn rejects_undecodable_payloads() {
        assert!(decode_email_claim("head.!!!not-base64!!!.sig").is_err());
    }

    #[test]
    fn rejects_payloads_without_an_email_claim() {
        let token = token_with_payload(r#"{"sub":42}"#);
        assert!(decode_email_claim(&token).is_err());
    }
}
