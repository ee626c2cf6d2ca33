//! Users and account status.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{info, instrument};

use super::is_zero;
use crate::api::{KeyValue, Payload, RedmineClient, Resource, Result};

/// Account status of a user, sent as its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum UserStatus {
    Active,
    Registered,
    Locked,
}

impl From<UserStatus> for u8 {
    fn from(status: UserStatus) -> Self {
        match status {
            UserStatus::Active => 1,
            UserStatus::Registered => 2,
            UserStatus::Locked => 3,
        }
    }
}

impl TryFrom<u8> for UserStatus {
    type Error = String;

    fn try_from(code: u8) -> std::result::Result<Self, Self::Error> {
        match code {
            1 => Ok(UserStatus::Active),
            2 => Ok(UserStatus::Registered),
            3 => Ok(UserStatus::Locked),
            other => Err(format!("unknown user status {}", other)),
        }
    }
}

/// A Redmine user account.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: u64,
    pub login: String,
    #[serde(default)]
    pub firstname: String,
    #[serde(default)]
    pub lastname: String,
    #[serde(default)]
    pub mail: String,
    #[serde(default)]
    pub admin: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<UserStatus>,
    #[serde(default, skip_serializing)]
    pub created_on: Option<String>,
    #[serde(default, skip_serializing)]
    pub last_login_on: Option<String>,
    /// Initial password on create. Never returned by the server.
    #[serde(default, skip_deserializing, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("login", &self.login)
            .field("firstname", &self.firstname)
            .field("lastname", &self.lastname)
            .field("mail", &self.mail)
            .field("admin", &self.admin)
            .field("status", &self.status)
            .field("created_on", &self.created_on)
            .field("last_login_on", &self.last_login_on)
            .finish_non_exhaustive()
    }
}

impl Resource for User {
    const KIND: &'static str = "user";
    const SINGULAR: &'static str = "user";
    const PLURAL: &'static str = "users";
}

impl Payload for User {}

impl RedmineClient {
    /// All active users. Requires admin privileges.
    pub fn users(&self) -> Result<Vec<User>> {
        self.list("users", &[])
    }

    /// All users with the given account status.
    pub fn users_with_status(&self, status: UserStatus) -> Result<Vec<User>> {
        let params = [KeyValue::new("status", u8::from(status).to_string())];
        self.list("users", &params)
    }

    pub fn user(&self, id: u64) -> Result<User> {
        self.get(&format!("users/{}", id), id, &[])
    }

    /// The user the client authenticates as.
    pub fn current_user(&self) -> Result<User> {
        self.get_by_path("users/current", "current user")
    }

    #[instrument(skip(self, user), fields(login = %user.login))]
    pub fn create_user(&self, user: &User) -> Result<User> {
        self.create("users", user)
    }

    pub fn update_user(&self, user: &User) -> Result<()> {
        self.update::<User, _>(&format!("users/{}", user.id), user.id, user)
    }

    pub fn delete_user(&self, id: u64) -> Result<()> {
        self.delete::<User>(&format!("users/{}", id), id)
    }

    /// Lock, unlock or activate an account.
    #[instrument(skip(self))]
    pub fn set_user_status(&self, id: u64, status: UserStatus) -> Result<()> {
        let payload = json!({ "status": u8::from(status) });
        self.update::<User, _>(&format!("users/{}", id), id, &payload)?;
        info!("User status changed");
        Ok(())
    }

    /// The number of active users, read from a single one-item page.
    pub fn user_count(&self) -> Result<u64> {
        let page = self.page::<User>("users", &[KeyValue::new("limit", "1")])?;
        Ok(page.total_count)
    }
}
