/// A resolved caller identity.
///
/// Produced by the API layer's identity resolver (bearer-token payload, or
/// the gated self-asserted fallback) and consumed by the claim transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub user_name: String,
}

impl Identity {
    pub fn new(user_id: impl Into<String>, user_name: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            user_name: user_name.into(),
        }
    }
}
