//! HMAC-SHA256 signed session cookies and the identity extractor
//!
//! Cookie format: `base64url(user_id).base64url(hmac_signature)`. The
//! HMAC covers only the user id; there is no server-side session table,
//! so a valid signature is the whole proof of identity.
//!
//! Handlers never look at cookies themselves. They take the
//! [`CurrentUser`] extractor, which yields `Some(user_id)` for a request
//! carrying a validly signed cookie for a user that still exists, and
//! `None` for everything else (missing cookie, bad signature, unknown
//! user). A tampered cookie is indistinguishable from no cookie at all.

use axum::http::{header, request::Parts};
use axum::extract::FromRequestParts;
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::convert::Infallible;

use crate::store::AppState;

type HmacSha256 = Hmac<Sha256>;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "session";

/// Signs a user id, returning the raw cookie value.
pub fn sign_user_id(secret: &[u8], user_id: &str) -> String {
    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC key length is always valid");
    mac.update(user_id.as_bytes());
    let signature = mac.finalize().into_bytes();

    let id_encoded = URL_SAFE_NO_PAD.encode(user_id.as_bytes());
    let sig_encoded = URL_SAFE_NO_PAD.encode(signature);

    format!("{}.{}", id_encoded, sig_encoded)
}

/// Verifies a signed cookie value and extracts the user id.
///
/// Returns `None` if the signature is invalid or the format is wrong.
pub fn verify_cookie(secret: &[u8], cookie_value: &str) -> Option<String> {
    let (id_part, sig_part) = cookie_value.split_once('.')?;

    let id_bytes = URL_SAFE_NO_PAD.decode(id_part).ok()?;
    let user_id = String::from_utf8(id_bytes).ok()?;

    let expected_sig = URL_SAFE_NO_PAD.decode(sig_part).ok()?;

    let mut mac = HmacSha256::new_from_slice(secret).expect("HMAC key length is always valid");
    mac.update(user_id.as_bytes());
    mac.verify_slice(&expected_sig).ok()?;

    Some(user_id)
}

/// Builds the `Set-Cookie` header value that logs a user in.
pub fn issue_cookie(secret: &[u8], user_id: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        SESSION_COOKIE,
        sign_user_id(secret, user_id)
    )
}

/// Builds the `Set-Cookie` header value that logs a user out.
pub fn clear_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; Max-Age=0", SESSION_COOKIE)
}

/// Pulls the session cookie value out of a `Cookie` request header.
fn session_cookie_value(cookie_header: &str) -> Option<&str> {
    cookie_header
        .split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(SESSION_COOKIE)?.strip_prefix('='))
}

/// The resolved caller identity: `Some(user_id)` or `None`.
pub struct CurrentUser(pub Option<String>);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get(header::COOKIE)
            .and_then(|value| value.to_str().ok())
            .and_then(session_cookie_value)
            .and_then(|cookie| verify_cookie(state.session_key.as_bytes(), cookie))
            // A signed id for an account that no longer exists resolves
            // to anonymous rather than a phantom identity.
            .filter(|uid| state.users.read().unwrap().get(uid).is_some());

        Ok(CurrentUser(user_id))
    }
}
