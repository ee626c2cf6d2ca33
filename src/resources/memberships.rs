//! Project memberships of users and groups.

use serde::{Deserialize, Serialize};
use serde_json::json;

use super::IdName;
use crate::api::{Payload, RedmineClient, Resource, Result};

/// A user's or group's membership in a project.
///
/// Exactly one of `user` and `group` is set by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub id: u64,
    #[serde(default)]
    pub project: Option<IdName>,
    #[serde(default)]
    pub user: Option<IdName>,
    #[serde(default)]
    pub group: Option<IdName>,
    #[serde(default)]
    pub roles: Vec<MembershipRole>,
}

/// A role granted by a membership.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipRole {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    /// Set when the role comes from a group membership.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub inherited: bool,
}

/// The body of a membership creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewMembership {
    /// A user or group id.
    pub user_id: u64,
    pub role_ids: Vec<u64>,
}

impl Resource for Membership {
    const KIND: &'static str = "membership";
    const SINGULAR: &'static str = "membership";
    const PLURAL: &'static str = "memberships";
}

impl Payload for NewMembership {}

impl RedmineClient {
    pub fn memberships(&self, project_id: u64) -> Result<Vec<Membership>> {
        self.list(&format!("projects/{}/memberships", project_id), &[])
    }

    pub fn membership(&self, id: u64) -> Result<Membership> {
        self.get(&format!("memberships/{}", id), id, &[])
    }

    /// Add a user or group to a project.
    pub fn create_membership(
        &self,
        project_id: u64,
        membership: &NewMembership,
    ) -> Result<Membership> {
        self.create(&format!("projects/{}/memberships", project_id), membership)
    }

    /// Replace the roles of a membership. Only roles that are not inherited
    /// can be changed.
    pub fn update_membership(&self, id: u64, role_ids: &[u64]) -> Result<()> {
        let payload = json!({ "role_ids": role_ids });
        self.update::<Membership, _>(&format!("memberships/{}", id), id, &payload)
    }

    pub fn delete_membership(&self, id: u64) -> Result<()> {
        self.delete::<Membership>(&format!("memberships/{}", id), id)
    }
}
