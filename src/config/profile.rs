//! Redmine connection profile configuration.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{credentials, ConfigError, Result};
use crate::api::AuthPolicy;

/// A Redmine profile configuration.
///
/// Profiles store connection details for a Redmine instance. Secrets may be
/// written inline or left out, in which case they are read from the OS
/// keyring under the profile name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Profile {
    /// The name of this profile.
    ///
    /// Must be non-empty and unique across all profiles.
    pub name: String,

    /// The Redmine endpoint, optionally with a path prefix
    /// (e.g., "https://example.com/redmine").
    pub url: String,

    /// How requests made with this profile authenticate.
    #[serde(default)]
    pub auth: AuthSettings,

    /// Page size sent as `limit`; the server default applies when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,

    /// Item offset sent as `offset` on non-paginated requests.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
}

/// The authentication section of a profile.
///
/// Stored as a TOML table tagged by `type`:
///
/// ```toml
/// [profiles.auth]
/// type = "basic_with_token"
/// user = "admin"
/// ```
#[derive(Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthSettings {
    /// HTTP Basic auth with a password.
    Basic {
        user: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        password: Option<String>,
    },
    /// API key sent as the `key` query parameter.
    ApiToken {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        token: Option<String>,
    },
    /// HTTP Basic auth with the API key as password.
    BasicWithToken {
        user: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        token: Option<String>,
    },
    /// Anonymous access.
    #[default]
    None,
}

impl fmt::Debug for AuthSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthSettings::Basic { user, .. } => {
                f.debug_struct("Basic").field("user", user).finish_non_exhaustive()
            }
            AuthSettings::ApiToken { .. } => f.debug_struct("ApiToken").finish_non_exhaustive(),
            AuthSettings::BasicWithToken { user, .. } => f
                .debug_struct("BasicWithToken")
                .field("user", user)
                .finish_non_exhaustive(),
            AuthSettings::None => f.write_str("None"),
        }
    }
}

impl Profile {
    /// Create a new profile without authentication or pagination overrides.
    pub fn new(name: String, url: String) -> Self {
        Self {
            name,
            url,
            auth: AuthSettings::None,
            limit: None,
            offset: None,
        }
    }

    /// Validate this profile.
    ///
    /// Checks that:
    /// - The name is non-empty and has no whitespace
    /// - The URL is non-empty, uses http(s) and parses
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` with details if validation fails.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(ConfigError::ValidationError(
                "profile name cannot be empty".to_string(),
            ));
        }

        if self.name.contains(char::is_whitespace) {
            return Err(ConfigError::ValidationError(format!(
                "profile name '{}' cannot contain whitespace",
                self.name
            )));
        }

        if self.url.is_empty() {
            return Err(ConfigError::ValidationError(format!(
                "profile '{}': URL cannot be empty",
                self.name
            )));
        }

        if !self.url.starts_with("https://") && !self.url.starts_with("http://") {
            return Err(ConfigError::ValidationError(format!(
                "profile '{}': URL must start with http:// or https://",
                self.name
            )));
        }

        url::Url::parse(&self.url).map_err(|source| ConfigError::InvalidEndpoint {
            endpoint: self.url.clone(),
            source,
        })?;

        Ok(())
    }

    /// Build the validated auth policy for this profile.
    ///
    /// Missing secrets are fetched from the OS keyring.
    ///
    /// # Errors
    ///
    /// Returns an error if a secret cannot be resolved or the resulting
    /// policy is incomplete.
    pub fn auth_policy(&self) -> Result<AuthPolicy> {
        let policy = match &self.auth {
            AuthSettings::Basic { user, password } => {
                AuthPolicy::basic_auth(user.clone(), self.secret(password)?)
            }
            AuthSettings::ApiToken { token } => AuthPolicy::api_token(self.secret(token)?),
            AuthSettings::BasicWithToken { user, token } => {
                AuthPolicy::basic_auth_with_token(user.clone(), self.secret(token)?)
            }
            AuthSettings::None => AuthPolicy::none(),
        };
        policy.validate()?;
        Ok(policy)
    }

    fn secret(&self, inline: &Option<String>) -> Result<String> {
        match inline {
            Some(secret) => Ok(secret.clone()),
            None => credentials::get_token(&self.name),
        }
    }
}
