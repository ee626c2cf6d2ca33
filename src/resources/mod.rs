//! Typed Redmine resources and their operations.
//!
//! Each submodule defines the entity types of one resource and adds its
//! operations to [`RedmineClient`](crate::RedmineClient) through an inherent
//! `impl` block.

mod issue_categories;
mod issue_priorities;
mod issues;
mod memberships;
mod projects;
mod users;
mod versions;

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use issue_categories::IssueCategory;
pub use issue_priorities::IssuePriority;
pub use issues::{Issue, IssueFilter, Journal, JournalDetail, Upload};
pub use memberships::{Membership, MembershipRole, NewMembership};
pub use projects::Project;
pub use users::{User, UserStatus};
pub use versions::Version;

/// A reference to another entity by id and display name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdName {
    pub id: u64,
    #[serde(default)]
    pub name: String,
}

impl IdName {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A reference to another entity by id only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Id {
    pub id: u64,
}

/// A custom field value attached to an issue or version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomField {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub multiple: bool,
    /// A string, or an array of strings for multi-value fields.
    #[serde(default)]
    pub value: Value,
}

/// Server-assigned ids are zero until the entity is created.
pub(crate) fn is_zero(id: &u64) -> bool {
    *id == 0
}
