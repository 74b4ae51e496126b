//! The identity resolution capability injected into handlers.

use sharehub_core::identity::Identity;

use crate::auth::token::identity_from_token;

/// Self-asserted identity fields a request body may carry.
#[derive(Debug, Clone, Default)]
pub struct FallbackIdentity {
    pub user_id: Option<String>,
    pub user_name: Option<String>,
}

/// No usable caller identity could be resolved.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    #[error("User ID is required (must be authenticated)")]
    Missing,
}

/// Resolves `(userId, userName)` from an inbound request.
///
/// Primary path: the bearer token's payload. Fallback path: identity fields
/// from the request body, honored only when `allow_fallback` is set. The
/// permissive fallback is a compatibility shim for legacy unauthenticated
/// clients, off by default, and deliberately not a verified trust boundary
/// either way.
#[derive(Debug, Clone, Copy)]
pub struct IdentityResolver {
    allow_fallback: bool,
}

impl IdentityResolver {
    pub fn new(allow_fallback: bool) -> Self {
        Self { allow_fallback }
    }

    /// Resolve the caller, or report that no usable identity exists.
    pub fn resolve(
        &self,
        authorization: Option<&str>,
        fallback: Option<&FallbackIdentity>,
    ) -> Result<Identity, IdentityError> {
        if let Some(token) = authorization.and_then(|h| h.strip_prefix("Bearer ")) {
            if let Some(identity) = identity_from_token(token) {
                return Ok(identity);
            }
        }

        if self.allow_fallback {
            if let Some(asserted) = fallback {
                if let Some(user_id) = asserted.user_id.as_deref().filter(|id| !id.is_empty()) {
                    let user_name = asserted
                        .user_name
                        .clone()
                        .filter(|n| !n.is_empty())
                        .unwrap_or_else(|| "Unknown User".to_string());
                    return Ok(Identity::new(user_id, user_name));
                }
            }
        }

        Err(IdentityError::Missing)
    }
}

#[cfg(test)]
mod tests {
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    use super::*;

    fn bearer(sub: &str, name: &str) -> String {
        let token = encode(
            &Header::default(),
            &json!({ "sub": sub, "name": name, "exp": 4_102_444_800i64 }),
            &EncodingKey::from_secret(b"test"),
        )
        .unwrap();
        format!("Bearer {token}")
    }

    #[test]
    fn token_path_wins_over_fallback() {
        let resolver = IdentityResolver::new(true);
        let header = bearer("U1", "Jane");
        let fallback = FallbackIdentity {
            user_id: Some("U9".into()),
            user_name: Some("Impostor".into()),
        };

        let identity = resolver.resolve(Some(&header), Some(&fallback)).unwrap();
        assert_eq!(identity.user_id, "U1");
        assert_eq!(identity.user_name, "Jane");
    }

    #[test]
    fn fallback_requires_the_flag() {
        let fallback = FallbackIdentity {
            user_id: Some("U9".into()),
            user_name: Some("Mike".into()),
        };

        let gated = IdentityResolver::new(false);
        assert!(gated.resolve(None, Some(&fallback)).is_err());

        let open = IdentityResolver::new(true);
        let identity = open.resolve(None, Some(&fallback)).unwrap();
        assert_eq!(identity.user_id, "U9");
        assert_eq!(identity.user_name, "Mike");
    }

    #[test]
    fn undecodable_token_falls_through_to_fallback() {
        let resolver = IdentityResolver::new(true);
        let fallback = FallbackIdentity {
            user_id: Some("U9".into()),
            user_name: None,
        };

        let identity = resolver
            .resolve(Some("Bearer garbage"), Some(&fallback))
            .unwrap();
        assert_eq!(identity.user_id, "U9");
        assert_eq!(identity.user_name, "Unknown User");
    }

    #[test]
    fn nothing_usable_is_an_error() {
        let resolver = IdentityResolver::new(true);
        assert!(resolver.resolve(None, None).is_err());
        assert!(resolver
            .resolve(Some("Basic dXNlcg=="), None)
            .is_err());
        assert!(resolver
            .resolve(None, Some(&FallbackIdentity::default()))
            .is_err());
    }
}
