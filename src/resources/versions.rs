//! Project versions (milestones).

use serde::{Deserialize, Serialize};

use super::{is_zero, CustomField, IdName};
use crate::api::{Payload, RedmineClient, Resource, Result};

/// A version of a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Version {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: u64,
    #[serde(default, skip_serializing)]
    pub project: Option<IdName>,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// `open`, `locked` or `closed`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub status: String,
    /// `none`, `descendants`, `hierarchy`, `tree` or `system`.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub sharing: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing)]
    pub created_on: Option<String>,
    #[serde(default, skip_serializing)]
    pub updated_on: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<CustomField>,
}

impl Resource for Version {
    const KIND: &'static str = "version";
    const SINGULAR: &'static str = "version";
    const PLURAL: &'static str = "versions";
}

impl Payload for Version {}

impl RedmineClient {
    /// The versions of a project, including shared ones.
    pub fn versions(&self, project_id: u64) -> Result<Vec<Version>> {
        self.list(&format!("projects/{}/versions", project_id), &[])
    }

    pub fn version(&self, id: u64) -> Result<Version> {
        self.get(&format!("versions/{}", id), id, &[])
    }

    pub fn create_version(&self, project_id: u64, version: &Version) -> Result<Version> {
        self.create(&format!("projects/{}/versions", project_id), version)
    }

    pub fn update_version(&self, version: &Version) -> Result<()> {
        self.update::<Version, _>(&format!("versions/{}", version.id), version.id, version)
    }

    pub fn delete_version(&self, id: u64) -> Result<()> {
        self.delete::<Version>(&format!("versions/{}", id), id)
    }
}
