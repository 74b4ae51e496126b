//! Caller identity resolution.
//!
//! The identity provider is an external collaborator: tokens arrive already
//! issued, and signature verification is its responsibility, not ours. This
//! module only extracts `(userId, userName)` from the bearer payload, with a
//! config-gated fallback to self-asserted identity for legacy clients.

pub mod resolver;
pub mod token;

pub use resolver::{FallbackIdentity, IdentityError, IdentityResolver};

use axum::http::{header, HeaderMap};

/// Pull the raw `Authorization` header value, if present.
pub fn authorization_header(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
}
