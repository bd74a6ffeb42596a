//! REST endpoint handlers.
//!
//! User handlers take the registry lock from the shared [`AppState`] for
//! the duration of one registry call. Paths below are relative to the
//! mount prefix, except the liveness route.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` (service root) | Plain-text liveness string |
//! | `GET` | `/` | List all users |
//! | `GET` | `/search?q=term` | Case-insensitive name/email search |
//! | `POST` | `/` | Create a user |
//! | `PUT` | `/{id}` | Partially update a user |
//! | `DELETE` | `/{id}` | Delete a user |

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use roster_core::RegistryError;
use roster_types::{NewUser, User, UserId, UserPatch};
use serde_json::Value;
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

/// Body of `GET /` at the service root.
pub const LIVENESS_MESSAGE: &str = "User API is running!";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Query parameters for the search endpoint.
///
/// Kept as raw pairs so that a repeated or unexpected key never rejects
/// the request.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(transparent)]
pub struct SearchQuery(Vec<(String, String)>);

impl SearchQuery {
    /// The first `q` value. Missing and empty both mean "everything".
    pub fn term(&self) -> &str {
        self.0
            .iter()
            .find(|(key, _)| key == "q")
            .map_or("", |(_, value)| value.as_str())
    }
}

/// Confirmation returned by the delete endpoint.
#[derive(Debug, serde::Serialize)]
pub struct DeleteResponse {
    /// Human-readable message.
    pub message: String,
}

// ---------------------------------------------------------------------------
// GET / -- liveness
// ---------------------------------------------------------------------------

/// Plain-text liveness check for the service root.
pub async fn index() -> &'static str {
    LIVENESS_MESSAGE
}

// ---------------------------------------------------------------------------
// GET {prefix} -- list users
// ---------------------------------------------------------------------------

/// Return every user in insertion order.
pub async fn list_users(State(state): State<Arc<AppState>>) -> Json<Vec<User>> {
    let registry = state.registry.read().await;
    Json(registry.list().to_vec())
}

// ---------------------------------------------------------------------------
// GET {prefix}/search -- search users
// ---------------------------------------------------------------------------

/// Return users whose name or email contains `q`, ignoring case.
///
/// A missing or empty `q` returns every user. No match is an empty array.
/// When `q` repeats, the first value wins.
pub async fn search_users(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Json<Vec<User>> {
    let registry = state.registry.read().await;
    Json(registry.search(query.term()))
}

// ---------------------------------------------------------------------------
// POST {prefix} -- create user
// ---------------------------------------------------------------------------

/// Create a user from `{name, email, age}` and return it with `201`.
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let value = json_body(body).ok_or_else(RegistryError::missing_body)?;
    let input = NewUser::from_json(&value)?;

    let user = state.registry.write().await.create(input)?;

    Ok((StatusCode::CREATED, Json(user)))
}

// ---------------------------------------------------------------------------
// PUT {prefix}/{id} -- update user
// ---------------------------------------------------------------------------

/// Apply `{name?, email?, age?}` to an existing user.
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let id = parse_user_id(raw_id)?;
    let patch = json_body(body)
        .map(|value| UserPatch::from_json(&value))
        .transpose()?;

    let user = state.registry.write().await.update(id, patch)?;

    Ok(Json(user))
}

// ---------------------------------------------------------------------------
// DELETE {prefix}/{id} -- delete user
// ---------------------------------------------------------------------------

/// Delete a user and return a confirmation message.
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(raw_id): Path<String>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let id = parse_user_id(raw_id)?;

    let removed = state.registry.write().await.delete(id)?;

    Ok(Json(DeleteResponse {
        message: format!("User {} deleted (in memory)", removed.id),
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Unwrap a JSON body, treating a rejected body and a literal `null` as
/// absent.
fn json_body(body: Result<Json<Value>, JsonRejection>) -> Option<Value> {
    match body {
        Ok(Json(Value::Null)) => None,
        Ok(Json(value)) => Some(value),
        Err(rejection) => {
            debug!(%rejection, "unusable request body");
            None
        }
    }
}

fn parse_user_id(raw: String) -> Result<UserId, ApiError> {
    match raw.parse::<UserId>() {
        Ok(id) => Ok(id),
        Err(error) => {
            debug!(%error, raw = %raw, "unparseable user id");
            Err(ApiError::InvalidUserId(raw))
        }
    }
}
