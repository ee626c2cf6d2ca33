//! Authentication handling for the Redmine API.
//!
//! Redmine accepts three ways of authenticating a request: HTTP Basic auth
//! with login and password, the API key as `key` query parameter, and HTTP
//! Basic auth with the API key standing in for the password. Anonymous
//! access is the fourth option.

use std::fmt;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use reqwest::header::{HeaderValue, AUTHORIZATION};

use super::error::ApiError;
use super::request::RequestSpec;
use crate::config::{ConfigError, Result};

/// The query parameter Redmine reads the API key from.
pub const API_KEY_PARAM: &str = "key";

/// Authentication scheme and credentials for a client.
#[derive(Clone, PartialEq, Eq)]
pub enum AuthPolicy {
    /// HTTP Basic auth with login and password.
    BasicAuth { user: String, password: String },
    /// The API key appended as `key=<token>` to every URL.
    ApiToken { token: String },
    /// HTTP Basic auth with the API key as password.
    BasicAuthWithToken { user: String, token: String },
    /// No credentials at all.
    NoAuth,
}

impl AuthPolicy {
    /// Basic auth with login and password.
    pub fn basic_auth(user: impl Into<String>, password: impl Into<String>) -> Self {
        AuthPolicy::BasicAuth {
            user: user.into(),
            password: password.into(),
        }
    }

    /// API key sent as query parameter.
    pub fn api_token(token: impl Into<String>) -> Self {
        AuthPolicy::ApiToken {
            token: token.into(),
        }
    }

    /// Basic auth using the API key as password.
    pub fn basic_auth_with_token(user: impl Into<String>, token: impl Into<String>) -> Self {
        AuthPolicy::BasicAuthWithToken {
            user: user.into(),
            token: token.into(),
        }
    }

    /// Anonymous access.
    pub fn none() -> Self {
        AuthPolicy::NoAuth
    }

    /// A short human-readable name of the scheme.
    pub fn scheme(&self) -> &'static str {
        match self {
            AuthPolicy::BasicAuth { .. } => "basic auth",
            AuthPolicy::ApiToken { .. } => "API token",
            AuthPolicy::BasicAuthWithToken { .. } => "basic auth with API token",
            AuthPolicy::NoAuth => "no auth",
        }
    }

    /// Check that every credential the scheme needs is present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidAuth` naming the missing field.
    pub fn validate(&self) -> Result<()> {
        let reason = match self {
            AuthPolicy::BasicAuth { user, .. } if user.is_empty() => "user must not be empty",
            AuthPolicy::ApiToken { token } if token.is_empty() => "API token must not be empty",
            AuthPolicy::BasicAuthWithToken { user, .. } if user.is_empty() => {
                "user must not be empty"
            }
            AuthPolicy::BasicAuthWithToken { token, .. } if token.is_empty() => {
                "API token must not be empty"
            }
            _ => return Ok(()),
        };

        Err(ConfigError::InvalidAuth {
            scheme: self.scheme(),
            reason,
        })
    }

    /// Decorate an outgoing request with this policy's credentials.
    ///
    /// Basic variants set the `Authorization` header and leave the URL
    /// alone; the token variant only touches the query string.
    pub fn apply(&self, request: &mut RequestSpec) -> std::result::Result<(), ApiError> {
        match self {
            AuthPolicy::BasicAuth { user, password } => set_basic_auth(request, user, password)?,
            AuthPolicy::ApiToken { token } => {
                if !token.is_empty() {
                    request.append_query_param(API_KEY_PARAM, token);
                }
            }
            AuthPolicy::BasicAuthWithToken { user, token } => {
                set_basic_auth(request, user, token)?
            }
            AuthPolicy::NoAuth => {}
        }
        Ok(())
    }
}

impl fmt::Debug for AuthPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthPolicy::BasicAuth { user, .. } => f
                .debug_struct("BasicAuth")
                .field("user", user)
                .finish_non_exhaustive(),
            AuthPolicy::ApiToken { .. } => f.debug_struct("ApiToken").finish_non_exhaustive(),
            AuthPolicy::BasicAuthWithToken { user, .. } => f
                .debug_struct("BasicAuthWithToken")
                .field("user", user)
                .finish_non_exhaustive(),
            AuthPolicy::NoAuth => f.write_str("NoAuth"),
        }
    }
}

fn set_basic_auth(
    request: &mut RequestSpec,
    user: &str,
    password: &str,
) -> std::result::Result<(), ApiError> {
    let mut value = HeaderValue::from_str(&build_auth_header(user, password)).map_err(|_| {
        ConfigError::ValidationError("credentials cannot be sent as a header".to_string())
    })?;
    value.set_sensitive(true);
    request.headers.insert(AUTHORIZATION, value);
    Ok(())
}

/// Build the Basic Auth header value.
///
/// Encodes "user:password" in Base64 and prepends "Basic ".
fn build_auth_header(user: &str, password: &str) -> String {
    let credentials = format!("{}:{}", user, password);
    let encoded = BASE64.encode(credentials.as_bytes());
    format!("Basic {}", encoded)
}
