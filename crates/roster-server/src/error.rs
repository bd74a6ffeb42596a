//! Error types for the server binary.
//!
//! [`LaunchError`] is the top-level error type that wraps every failure
//! mode between process start and server shutdown.

/// Top-level error for the server binary.
///
/// Each variant wraps a specific subsystem error, providing a single
/// error type that `main` can propagate with `?`.
#[derive(Debug, thiserror::Error)]
pub enum LaunchError {
    /// Configuration loading or seeding failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: roster_core::config::ConfigError,
    },

    /// The HTTP server failed to bind or serve.
    #[error("server error: {source}")]
    Server {
        /// The underlying server error.
        #[from]
        source: roster_api::ServerError,
    },
}
