//! Projects.

use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::{is_zero, IdName};
use crate::api::{Payload, RedmineClient, Resource, Result};

/// A Redmine project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    /// Server-assigned id; zero for a project not yet created.
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: u64,
    pub name: String,
    /// Unique URL identifier: lowercase letters, digits, `-` and `_`, not
    /// only digits. Cannot be changed after creation.
    pub identifier: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub homepage: String,
    #[serde(default)]
    pub is_public: bool,
    #[serde(default)]
    pub inherit_members: bool,
    #[serde(default, skip_serializing)]
    pub parent: Option<IdName>,
    /// Parent to set on create or update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u32>,
    #[serde(default, skip_serializing)]
    pub created_on: Option<String>,
    #[serde(default, skip_serializing)]
    pub updated_on: Option<String>,
}

impl Project {
    pub fn new(name: impl Into<String>, identifier: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            identifier: identifier.into(),
            ..Default::default()
        }
    }
}

impl Resource for Project {
    const KIND: &'static str = "project";
    const SINGULAR: &'static str = "project";
    const PLURAL: &'static str = "projects";
}

impl Payload for Project {}

impl RedmineClient {
    /// All projects visible to the authenticated user.
    pub fn projects(&self) -> Result<Vec<Project>> {
        self.list("projects", &[])
    }

    pub fn project(&self, id: u64) -> Result<Project> {
        self.get(&format!("projects/{}", id), id, &[])
    }

    /// Create a project and return it as stored by the server.
    #[instrument(skip(self, project), fields(identifier = %project.identifier))]
    pub fn create_project(&self, project: &Project) -> Result<Project> {
        self.create("projects", project)
    }

    pub fn update_project(&self, project: &Project) -> Result<()> {
        self.update::<Project, _>(&format!("projects/{}", project.id), project.id, project)
    }

    pub fn delete_project(&self, id: u64) -> Result<()> {
        self.delete::<Project>(&format!("projects/{}", id), id)
    }
}
