//! Secure storage of API secrets in the OS keyring.
//!
//! Profiles may leave their token or password out of the settings file; the
//! secret is then looked up here, keyed by profile name.

use super::{ConfigError, Result};

/// The keyring service name for redmine-client secrets.
const KEYRING_SERVICE: &str = "redmine-client";

fn entry(profile_name: &str) -> Result<keyring::Entry> {
    keyring::Entry::new(KEYRING_SERVICE, profile_name)
        .map_err(|e| ConfigError::Keyring(format!("failed to access keyring: {}", e)))
}

/// Store an API token (or password) in the OS keyring.
///
/// # Errors
///
/// Returns an error if the secret cannot be stored in the keyring.
pub fn store_token(profile_name: &str, token: &str) -> Result<()> {
    entry(profile_name)?
        .set_password(token)
        .map_err(|e| ConfigError::Keyring(format!("failed to store token: {}", e)))
}

/// Retrieve the secret stored for a profile.
///
/// # Errors
///
/// Returns an error if the secret cannot be retrieved from the keyring.
pub fn get_token(profile_name: &str) -> Result<String> {
    entry(profile_name)?
        .get_password()
        .map_err(|e| ConfigError::Keyring(format!("failed to retrieve token: {}", e)))
}

/// Delete the secret stored for a profile.
///
/// # Errors
///
/// Returns an error if the secret cannot be deleted from the keyring.
pub fn delete_token(profile_name: &str) -> Result<()> {
    entry(profile_name)?
        .delete_password()
        .map_err(|e| ConfigError::Keyring(format!("failed to delete token: {}", e)))
}

/// Check if a secret exists in the OS keyring for a profile.
pub fn has_token(profile_name: &str) -> bool {
    get_token(profile_name).is_ok()
}
