//! Configuration management for redmine-client.
//!
//! This module handles loading connection profiles from a TOML settings
//! file, resolving API secrets from the OS keyring and the error type shared
//! by every configuration check (including auth policy validation).

mod credentials;
mod profile;
mod settings;

use thiserror::Error;

pub use credentials::{delete_token, get_token, has_token, store_token};
pub use profile::{AuthSettings, Profile};
pub use settings::Settings;

/// Errors raised while building or validating client configuration.
///
/// All of these are detected before any request leaves the process.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform configuration directory could not be determined.
    #[error("could not determine the configuration directory")]
    NoConfigDir,

    /// Creating the configuration directory failed.
    #[error("could not create configuration directory: {0}")]
    CreateDirError(#[source] std::io::Error),

    /// The settings file could not be read.
    #[error("could not read configuration file: {0}")]
    ReadError(#[source] std::io::Error),

    /// The settings file could not be written.
    #[error("could not write configuration file: {0}")]
    WriteError(#[source] std::io::Error),

    /// The settings file is not valid TOML for [`Settings`].
    #[error("could not parse configuration file: {0}")]
    ParseError(#[from] toml::de::Error),

    /// The settings could not be serialized back to TOML.
    #[error("could not serialize configuration: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// A profile or setting has an invalid value.
    #[error("invalid configuration: {0}")]
    ValidationError(String),

    /// An auth policy is missing a credential its scheme requires.
    #[error("invalid auth configuration for {scheme}: {reason}")]
    InvalidAuth {
        scheme: &'static str,
        reason: &'static str,
    },

    /// The endpoint is not a syntactically valid absolute URL.
    #[error("invalid endpoint URL '{endpoint}': {source}")]
    InvalidEndpoint {
        endpoint: String,
        #[source]
        source: url::ParseError,
    },

    /// The requested profile does not exist in the settings file.
    #[error("profile '{0}' not found")]
    ProfileNotFound(String),

    /// A required environment variable is not set.
    #[error("environment variable {0} is not set")]
    MissingEnv(&'static str),

    /// The HTTP client could not be created (e.g. no TLS backend).
    #[error("could not create HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// Keyring error when storing/retrieving tokens.
    #[error("keyring error: {0}")]
    Keyring(String),
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
