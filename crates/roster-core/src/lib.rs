//! User registry, seed data, and configuration for the Roster service.
//!
//! This crate owns the in-memory collection of user records and the id
//! counter that feeds it. It knows nothing about HTTP; the `roster-api`
//! crate wraps a [`UserRegistry`] in shared state and maps its errors to
//! responses.
//!
//! # Modules
//!
//! - [`config`] -- Configuration loading from `roster-config.yaml` into
//!   strongly-typed structs, with environment overrides.
//! - [`error`] -- [`RegistryError`], the failure taxonomy of the five
//!   registry operations.
//! - [`registry`] -- [`UserRegistry`] with list, search, create, update,
//!   and delete.
//! - [`seed`] -- Built-in demo records used when no seed is configured.
//!
//! [`UserRegistry`]: registry::UserRegistry
//! [`RegistryError`]: error::RegistryError

pub mod config;
pub mod error;
pub mod registry;
pub mod seed;

pub use error::RegistryError;
pub use registry::UserRegistry;
