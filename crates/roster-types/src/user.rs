//! The stored user record.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::UserId;

/// One user entity as held by the registry and returned over HTTP.
///
/// Serializes to exactly `{id, name, email, age}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct User {
    /// Registry-assigned identifier.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Contact email, unique at creation time.
    pub email: String,
    /// Age in years.
    #[ts(type = "number")]
    pub age: i64,
}

impl User {
    /// Whether `needle` (already lowercased) occurs in the name or email,
    /// ignoring case.
    pub fn matches_lowercase(&self, needle: &str) -> bool {
        self.name.to_lowercase().contains(needle) || self.email.to_lowercase().contains(needle)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> User {
        User {
            id: UserId::new(1),
            name: String::from("Ana"),
            email: String::from("Ana@X.com"),
            age: 30,
        }
    }

    #[test]
    fn wire_shape_has_four_keys() {
        let value = serde_json::to_value(ana()).unwrap_or_default();
        assert_eq!(
            value,
            serde_json::json!({"id": 1, "name": "Ana", "email": "Ana@X.com", "age": 30})
        );
    }

    #[test]
    fn matches_name_or_email_case_insensitively() {
        let user = ana();
        assert!(user.matches_lowercase("an"));
        assert!(user.matches_lowercase("x.com"));
        assert!(!user.matches_lowercase("bob"));
    }
}
