//! Shared application state for the API server.
//!
//! [`AppState`] owns the one registry the process serves. It is wrapped
//! in [`Arc`](std::sync::Arc) and injected into handlers through Axum's
//! `State` extractor, so there is no module-level mutable state.

use roster_core::UserRegistry;
use tokio::sync::RwLock;

/// Shared state for the Axum application.
#[derive(Debug, Default)]
pub struct AppState {
    /// The user registry. Mutations take the write lock.
    pub registry: RwLock<UserRegistry>,
}

impl AppState {
    /// Create application state serving `registry`.
    pub fn new(registry: UserRegistry) -> Self {
        Self {
            registry: RwLock::new(registry),
        }
    }
}
