//! Configuration loading and typed config structures for the Roster service.
//!
//! The configuration lives in `roster-config.yaml` next to the running
//! binary's working directory. This module defines strongly-typed structs
//! that mirror the YAML structure, and provides a loader that reads and
//! validates the file. Every field has a default, so an empty file (or no
//! file at all) yields a working service on `127.0.0.1:5000` with the demo
//! seed mounted under `/api/users`.

use std::path::Path;

use roster_types::{User, UserId};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

use crate::registry::{SeedError, UserRegistry};
use crate::seed::demo_users;

/// Path prefix the user routes are mounted under by default.
pub const DEFAULT_MOUNT_PREFIX: &str = "/api/users";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// An environment override held an unusable value.
    #[error("invalid value for {name}: {message}")]
    Env {
        /// The environment variable name.
        name: &'static str,
        /// Why the value was rejected.
        message: String,
    },

    /// The mount prefix cannot be used as a route prefix.
    #[error("invalid mount prefix {0:?}: must start with '/', must not end with '/', and must not contain braces")]
    MountPrefix(String),

    /// The seed would break registry invariants.
    #[error("invalid seed: {source}")]
    Seed {
        /// The underlying seed error.
        #[from]
        source: SeedError,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level service configuration.
///
/// Mirrors the structure of `roster-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RosterConfig {
    /// Listener and routing settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Initial registry contents.
    #[serde(default)]
    pub seed: SeedConfig,
}

impl RosterConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// Environment variables override YAML values for the listener:
    /// - `ROSTER_HOST` overrides `server.host`
    /// - `ROSTER_PORT` overrides `server.port`
    /// - `ROSTER_MOUNT_PREFIX` overrides `server.mount_prefix`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if the content is not valid YAML, or a
    /// validation error for bad overrides or mount prefix.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)?.with_env_overrides()
    }

    /// Built-in defaults with the same environment overrides as
    /// [`from_file`](Self::from_file). Used when no config file exists.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad overrides or mount prefix.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// Parse configuration from a YAML string.
    ///
    /// An empty string yields the defaults. The environment is not
    /// consulted.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML or a
    /// seed record has a missing or `null` field, or
    /// [`ConfigError::MountPrefix`] for an unusable prefix.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = if yaml.trim().is_empty() {
            Self::default()
        } else {
            serde_yml::from_str(yaml)?
        };
        config.server.validate()?;
        Ok(config)
    }

    fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        self.server.apply_env_overrides()?;
        self.server.validate()?;
        Ok(self)
    }

    /// Build the registry described by the `seed` section.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Seed`] if seed ids or emails repeat or the
    /// configured counter collides with a seed id.
    pub fn build_registry(&self) -> Result<UserRegistry, ConfigError> {
        let registry = UserRegistry::with_seed(self.seed.users.clone(), self.seed.next_id)?;
        Ok(registry)
    }
}

/// Listener and routing configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServerConfig {
    /// The host address to bind to.
    #[serde(default = "default_host")]
    pub host: String,

    /// The TCP port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path segment the user routes are exposed under.
    #[serde(default = "default_mount_prefix")]
    pub mount_prefix: String,
}

impl ServerConfig {
    /// `host:port` string suitable for socket address parsing.
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Override listener settings with environment variables when set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Env`] if `ROSTER_PORT` is not a valid port.
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        if let Ok(val) = std::env::var("ROSTER_HOST") {
            self.host = val;
        }
        if let Ok(val) = std::env::var("ROSTER_PORT") {
            self.port = val.parse().map_err(|e| ConfigError::Env {
                name: "ROSTER_PORT",
                message: format!("{e}"),
            })?;
        }
        if let Ok(val) = std::env::var("ROSTER_MOUNT_PREFIX") {
            self.mount_prefix = val;
        }
        Ok(())
    }

    /// Check that the mount prefix can be used to build routes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MountPrefix`] if the prefix does not start
    /// with `/`, ends with `/` (including the bare root), or contains
    /// route-parameter braces.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let prefix = self.mount_prefix.as_str();
        let usable = prefix.starts_with('/')
            && !prefix.ends_with('/')
            && !prefix.contains(['{', '}']);
        if usable {
            Ok(())
        } else {
            Err(ConfigError::MountPrefix(self.mount_prefix.clone()))
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            mount_prefix: default_mount_prefix(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default log filter (trace, debug, info, warn, error) when `RUST_LOG`
    /// is unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

/// Initial registry contents.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SeedConfig {
    /// Records present at startup. Defaults to the built-in demo set.
    #[serde(default = "demo_users", deserialize_with = "deserialize_seed_users")]
    pub users: Vec<User>,

    /// First id to hand out. Defaults to one past the largest seed id.
    #[serde(default)]
    pub next_id: Option<UserId>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            users: demo_users(),
            next_id: None,
        }
    }
}

/// A seed record as written in YAML.
///
/// `serde_yml` reads a bare `null` into a `String` field as the text
/// `"null"`, so every field goes through `Option` to keep nulls visible.
#[derive(Deserialize)]
struct SeedUser {
    id: Option<UserId>,
    name: Option<String>,
    email: Option<String>,
    age: Option<i64>,
}

impl SeedUser {
    /// Convert to a record, or name the first missing or `null` field.
    fn into_user(self) -> Result<User, &'static str> {
        Ok(User {
            id: self.id.ok_or("id")?,
            name: self.name.ok_or("name")?,
            email: self.email.ok_or("email")?,
            age: self.age.ok_or("age")?,
        })
    }
}

fn deserialize_seed_users<'de, D>(deserializer: D) -> Result<Vec<User>, D::Error>
where
    D: Deserializer<'de>,
{
    Vec::<SeedUser>::deserialize(deserializer)?
        .into_iter()
        .enumerate()
        .map(|(index, seed)| {
            seed.into_user().map_err(|field| {
                D::Error::custom(format!(
                    "seed user at index {index}: field '{field}' is missing or null"
                ))
            })
        })
        .collect()
}

fn default_host() -> String {
    String::from("127.0.0.1")
}

const fn default_port() -> u16 {
    5000
}

fn default_mount_prefix() -> String {
    String::from(DEFAULT_MOUNT_PREFIX)
}

fn default_log_level() -> String {
    String::from("info")
}
