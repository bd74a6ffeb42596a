//! Error types for registry operations.
//!
//! Every variant is raised before the registry is touched, so a failed
//! operation never leaves a partial mutation behind.

use roster_types::UserId;

/// Message returned when a request carries no usable JSON body.
pub const MISSING_BODY_MESSAGE: &str =
    "Missing request body or incorrect Content-Type (must be application/json)";

/// Message returned when a create body lacks a required field.
pub const MISSING_FIELDS_MESSAGE: &str = "Missing or empty data (name, email, age)";

/// Errors that can occur in a registry operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Input was absent or lacked a required field.
    #[error("{0}")]
    Validation(String),

    /// A unique field collided with an existing record.
    #[error("{0}")]
    Conflict(String),

    /// No record carries the requested id.
    #[error("User not found")]
    NotFound(UserId),

    /// The id counter cannot advance any further.
    #[error("user id space exhausted")]
    IdSpaceExhausted,
}

impl RegistryError {
    /// Validation failure for a missing or unusable body.
    pub fn missing_body() -> Self {
        Self::Validation(MISSING_BODY_MESSAGE.to_owned())
    }

    /// Validation failure for absent or null create fields.
    pub fn missing_fields() -> Self {
        Self::Validation(MISSING_FIELDS_MESSAGE.to_owned())
    }

    /// Conflict on an email that is already registered.
    pub fn duplicate_email(email: &str) -> Self {
        Self::Conflict(format!("Email {email} already exists."))
    }
}
