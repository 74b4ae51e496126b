//! Bearer-token payload extraction.
//!
//! Decodes the JWT payload segment without verifying the signature; the
//! identity provider in front of this service owns verification. A token
//! that does not decode simply yields no identity, letting the resolver
//! fall through to its other path.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde::Deserialize;

use sharehub_core::identity::Identity;

/// Display name used when a token carries a subject but no name or email.
const UNKNOWN_USER: &str = "Unknown User";

/// The claims this service reads from an access token.
#[derive(Debug, Deserialize)]
pub struct TokenPayload {
    /// Subject: the user's id at the identity provider.
    pub sub: Option<String>,
    /// Display name, when the provider includes one.
    pub name: Option<String>,
    /// Fallback display identifier.
    pub email: Option<String>,
}

/// Decode the payload segment of a JWT. `None` on any malformation.
pub fn decode_payload(token: &str) -> Option<TokenPayload> {
    let payload = token.split('.').nth(1)?;
    let bytes = URL_SAFE_NO_PAD.decode(payload).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Extract a caller identity from a bearer token, if the payload carries a
/// usable subject.
pub fn identity_from_token(token: &str) -> Option<Identity> {
    let payload = decode_payload(token)?;
    let user_id = payload.sub.filter(|s| !s.is_empty())?;
    let user_name = payload
        .name
        .or(payload.email)
        .unwrap_or_else(|| UNKNOWN_USER.to_string());
    Some(Identity { user_id, user_name })
}
