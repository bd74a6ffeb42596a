//! Create and partial-update payloads.
//!
//! Request bodies are decoded field by field from a JSON object rather than
//! through a derived `Deserialize`, so that each field keeps the difference
//! between "key absent", "key present with `null`", and "key present with a
//! value". A wrong-typed value is reported against the offending key.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use ts_rs::TS;

/// Errors raised while decoding a request body into an input payload.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    /// The body was valid JSON but not an object.
    #[error("Request body must be a JSON object")]
    NotAnObject,

    /// A known field held a value of the wrong JSON type.
    #[error("Invalid value for field '{0}'")]
    InvalidField(&'static str),
}

/// A single field of a partial update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PatchField<T> {
    /// The key was not in the body.
    #[default]
    Absent,
    /// The key was present with an explicit `null`.
    Null,
    /// The key carried a value.
    Value(T),
}

impl<T> PatchField<T> {
    /// Collapse to the value, treating absent and `null` alike.
    pub fn into_option(self) -> Option<T> {
        match self {
            Self::Value(v) => Some(v),
            Self::Absent | Self::Null => None,
        }
    }
}

/// Body of a create request.
///
/// Every field is optional at this stage; presence is checked by the
/// registry so that a missing field and a `null` field fail the same way.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct NewUser {
    /// Display name.
    pub name: Option<String>,
    /// Contact email.
    pub email: Option<String>,
    /// Age in years.
    #[ts(type = "number | null")]
    pub age: Option<i64>,
}

impl NewUser {
    /// Decode a create body from a JSON value.
    ///
    /// Unknown keys are ignored.
    pub fn from_json(value: &Value) -> Result<Self, InputError> {
        let object = value.as_object().ok_or(InputError::NotAnObject)?;
        Ok(Self {
            name: read_field(object, "name")?.into_option(),
            email: read_field(object, "email")?.into_option(),
            age: read_field(object, "age")?.into_option(),
        })
    }
}

/// Body of a partial update request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    /// Replacement display name.
    pub name: PatchField<String>,
    /// Replacement email. Uniqueness is not re-checked.
    pub email: PatchField<String>,
    /// Replacement age.
    pub age: PatchField<i64>,
}

impl UserPatch {
    /// Decode an update body from a JSON value.
    ///
    /// An empty object is a valid patch that changes nothing.
    pub fn from_json(value: &Value) -> Result<Self, InputError> {
        let object = value.as_object().ok_or(InputError::NotAnObject)?;
        Ok(Self {
            name: read_field(object, "name")?,
            email: read_field(object, "email")?,
            age: read_field(object, "age")?,
        })
    }

    /// Whether no field would change a record.
    pub const fn is_noop(&self) -> bool {
        !matches!(self.name, PatchField::Value(_))
            && !matches!(self.email, PatchField::Value(_))
            && !matches!(self.age, PatchField::Value(_))
    }
}

fn read_field<T: DeserializeOwned>(
    object: &Map<String, Value>,
    key: &'static str,
) -> Result<PatchField<T>, InputError> {
    match object.get(key) {
        None => Ok(PatchField::Absent),
        Some(Value::Null) => Ok(PatchField::Null),
        Some(raw) => serde_json::from_value(raw.clone())
            .ok()
            .map(PatchField::Value)
            .ok_or(InputError::InvalidField(key)),
    }
}
