//! Shared type definitions for the Roster users service.
//!
//! This crate is the single source of truth for the records and request
//! payloads that cross the HTTP boundary. [`User`] and [`NewUser`] flow
//! downstream to `TypeScript` via `ts-rs` for the browser client.
//!
//! # Modules
//!
//! - [`ids`] -- Integer identifier wrapper for user records
//! - [`user`] -- The stored [`User`] record
//! - [`input`] -- Create and partial-update payloads decoded from JSON

pub mod ids;
pub mod input;
pub mod user;

// Re-export all public types at crate root for convenience.
pub use ids::UserId;
pub use input::{InputError, NewUser, PatchField, UserPatch};
pub use user::User;

#[cfg(test)]
mod tests {
    //! Binding generation for the browser client.

    #[test]
    fn export_bindings() {
        use ts_rs::TS;

        let _ = crate::ids::UserId::export_all();
        let _ = crate::user::User::export_all();
        let _ = crate::input::NewUser::export_all();
    }
}
