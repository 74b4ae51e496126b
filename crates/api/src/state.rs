use std::sync::Arc;

use sharehub_core::claims::ClaimService;
use sharehub_core::store::MarketStore;

use crate::auth::IdentityResolver;
use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is `Copy`). The
/// store is injected at construction; handlers never build their own client.
#[derive(Clone)]
pub struct AppState {
    /// The listings/claims store.
    pub store: Arc<dyn MarketStore>,
    /// The claim transaction executor, sharing the same store.
    pub claims: ClaimService,
    /// Caller identity resolution (bearer payload + gated fallback).
    pub resolver: IdentityResolver,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn MarketStore>, config: ServerConfig) -> Self {
        Self {
            claims: ClaimService::new(store.clone()),
            resolver: IdentityResolver::new(config.identity_fallback),
            store,
            config: Arc::new(config),
        }
    }
}
