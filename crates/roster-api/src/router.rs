//! Axum router construction.
//!
//! Assembles the liveness route and the user routes into a single
//! [`Router`] with CORS enabled for the browser client.

use std::sync::Arc;

use axum::routing::{get, put};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /` -- plain-text liveness string
/// - `GET {prefix}` and `{prefix}/` -- list users
/// - `POST {prefix}` and `{prefix}/` -- create user
/// - `GET {prefix}/search` -- search users
/// - `PUT {prefix}/{id}` -- update user
/// - `DELETE {prefix}/{id}` -- delete user
///
/// `mount_prefix` must start with `/` and have no trailing slash (see
/// `roster_core::config::ServerConfig::validate`). Both the bare prefix
/// and the prefix with a trailing slash serve the collection routes.
///
/// CORS allows any origin, method, and header.
pub fn build_router(state: Arc<AppState>, mount_prefix: &str) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let collection = get(handlers::list_users).post(handlers::create_user);

    Router::new()
        // Liveness
        .route("/", get(handlers::index))
        // Users
        .route(mount_prefix, collection.clone())
        .route(&format!("{mount_prefix}/"), collection)
        .route(&format!("{mount_prefix}/search"), get(handlers::search_users))
        .route(
            &format!("{mount_prefix}/{{id}}"),
            put(handlers::update_user).delete(handlers::delete_user),
        )
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
