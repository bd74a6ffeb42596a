//! HTTP API for the Roster users service.
//!
//! This crate provides an Axum HTTP server that exposes:
//!
//! - **User endpoints** under a configurable mount prefix (default
//!   `/api/users`) for listing, searching, creating, updating, and
//!   deleting user records
//! - **Liveness string** (`GET /`) at the service root
//!
//! # Architecture
//!
//! Handlers operate on a [`UserRegistry`] held in [`AppState`] behind a
//! single [`tokio::sync::RwLock`]. Reads share the lock; create, update,
//! and delete hold it exclusively for their whole check-then-mutate
//! sequence. Registry and body-decoding failures become `{"error": ...}`
//! JSON responses through [`ApiError`].
//!
//! [`UserRegistry`]: roster_core::UserRegistry
//! [`ApiError`]: error::ApiError

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod state;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{start_server, ServerError};
pub use state::AppState;
