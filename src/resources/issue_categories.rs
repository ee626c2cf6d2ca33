//! Issue categories of a project.

use serde::{Deserialize, Serialize};

use super::{is_zero, IdName};
use crate::api::{Payload, RedmineClient, Resource, Result};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueCategory {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: u64,
    #[serde(default, skip_serializing)]
    pub project: Option<IdName>,
    pub name: String,
    #[serde(default, skip_serializing)]
    pub assigned_to: Option<IdName>,
    /// Default assignee of new issues in this category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<u64>,
}

impl IssueCategory {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

impl Resource for IssueCategory {
    const KIND: &'static str = "issue category";
    const SINGULAR: &'static str = "issue_category";
    const PLURAL: &'static str = "issue_categories";
}

impl Payload for IssueCategory {}

impl RedmineClient {
    pub fn issue_categories(&self, project_id: u64) -> Result<Vec<IssueCategory>> {
        self.list(&format!("projects/{}/issue_categories", project_id), &[])
    }

    pub fn issue_category(&self, id: u64) -> Result<IssueCategory> {
        self.get(&format!("issue_categories/{}", id), id, &[])
    }

    pub fn create_issue_category(
        &self,
        project_id: u64,
        category: &IssueCategory,
    ) -> Result<IssueCategory> {
        self.create(&format!("projects/{}/issue_categories", project_id), category)
    }

    pub fn update_issue_category(&self, category: &IssueCategory) -> Result<()> {
        self.update::<IssueCategory, _>(
            &format!("issue_categories/{}", category.id),
            category.id,
            category,
        )
    }

    pub fn delete_issue_category(&self, id: u64) -> Result<()> {
        self.delete::<IssueCategory>(&format!("issue_categories/{}", id), id)
    }
}
