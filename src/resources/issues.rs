//! Issues, their journals and list filters.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::instrument;

use super::{is_zero, CustomField, Id, IdName};
use crate::api::{KeyValue, Payload, RedmineClient, Resource, Result};

/// The write-side key holding the parent issue id.
const PARENT_ISSUE_ID: &str = "parent_issue_id";

/// A Redmine issue.
///
/// Nested references (`project`, `tracker`, ...) are what the server
/// returns; the matching `*_id` fields are what it reads on create and
/// update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    #[serde(default, skip_serializing_if = "is_zero")]
    pub id: u64,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,
    #[serde(default, skip_serializing)]
    pub project: Option<IdName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tracker_id: Option<u64>,
    #[serde(default, skip_serializing)]
    pub tracker: Option<IdName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_id: Option<u64>,
    #[serde(default, skip_serializing)]
    pub status: Option<IdName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_id: Option<u64>,
    #[serde(default, skip_serializing)]
    pub priority: Option<IdName>,
    #[serde(default, skip_serializing)]
    pub author: Option<IdName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to_id: Option<u64>,
    #[serde(default, skip_serializing)]
    pub assigned_to: Option<IdName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<u64>,
    #[serde(default, skip_serializing)]
    pub category: Option<IdName>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixed_version_id: Option<u64>,
    #[serde(default, skip_serializing)]
    pub fixed_version: Option<IdName>,

    /// Parent to set on write. Only sent while `parent` is also set; the
    /// server reports the current parent in `parent` instead.
    #[serde(skip)]
    pub parent_issue_id: Option<u64>,
    #[serde(default, skip_serializing)]
    pub parent: Option<Id>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub done_ratio: Option<u32>,
    #[serde(default, skip_serializing)]
    pub created_on: Option<String>,
    #[serde(default, skip_serializing)]
    pub updated_on: Option<String>,
    #[serde(default, skip_serializing)]
    pub closed_on: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_fields: Vec<CustomField>,
    /// Attachments to add, referenced by upload token.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uploads: Vec<Upload>,
    #[serde(default, skip_serializing)]
    pub journals: Vec<Journal>,
    /// Journal note to add with an update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Issue {
    /// `"<tracker> #<id>: <subject>"`, e.g. `"Bug #1: Something should be done"`.
    pub fn title(&self) -> String {
        let tracker = self.tracker.as_ref().map_or("", |t| t.name.as_str());
        format!("{} #{}: {}", tracker, self.id, self.subject)
    }
}

impl Resource for Issue {
    const KIND: &'static str = "issue";
    const SINGULAR: &'static str = "issue";
    const PLURAL: &'static str = "issues";
}

/// Writes `parent_issue_id` the way Redmine expects it.
///
/// Without `parent` the key is sent as `""`, which clears the relation.
/// With `parent` and a positive `parent_issue_id` the id is sent as a string.
/// Otherwise the key is left out and the relation is unchanged.
impl Payload for Issue {
    fn to_payload(&self) -> serde_json::Result<Value> {
        let mut value = serde_json::to_value(self)?;
        if let Value::Object(map) = &mut value {
            match (&self.parent, self.parent_issue_id) {
                (None, _) => {
                    map.insert(PARENT_ISSUE_ID.to_string(), Value::String(String::new()));
                }
                (Some(_), Some(id)) if id > 0 => {
                    map.insert(PARENT_ISSUE_ID.to_string(), Value::String(id.to_string()));
                }
                (Some(_), _) => {}
            }
        }
        Ok(value)
    }
}

/// A file attached through a previously obtained upload token.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Upload {
    pub token: String,
    #[serde(default)]
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One entry of an issue's history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Journal {
    pub id: u64,
    #[serde(default)]
    pub user: Option<IdName>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub created_on: Option<String>,
    #[serde(default)]
    pub details: Vec<JournalDetail>,
}

/// A single attribute change recorded in a [`Journal`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalDetail {
    pub property: String,
    pub name: String,
    #[serde(default)]
    pub old_value: Option<String>,
    #[serde(default)]
    pub new_value: Option<String>,
}

/// Criteria for [`RedmineClient::issues_by_filter`].
///
/// Values are passed through verbatim, so Redmine operators such as
/// `status_id=*` or `updated_on=>=2021-01-01` work.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueFilter {
    pub project_id: Option<String>,
    pub subproject_id: Option<String>,
    pub tracker_id: Option<String>,
    pub status_id: Option<String>,
    pub assigned_to_id: Option<String>,
    pub updated_on: Option<String>,
    /// Any other query parameters, e.g. custom field filters `cf_1`.
    pub extra_filters: BTreeMap<String, String>,
}

impl IssueFilter {
    /// The filter as query parameters: the named criteria first, then the
    /// extra filters in key order. Unset and empty criteria are skipped.
    pub fn to_key_values(&self) -> Vec<KeyValue> {
        let named = [
            ("project_id", &self.project_id),
            ("subproject_id", &self.subproject_id),
            ("tracker_id", &self.tracker_id),
            ("status_id", &self.status_id),
            ("assigned_to_id", &self.assigned_to_id),
            ("updated_on", &self.updated_on),
        ];

        named
            .into_iter()
            .filter_map(|(key, value)| {
                value
                    .as_deref()
                    .filter(|v| !v.is_empty())
                    .map(|v| KeyValue::new(key, v))
            })
            .chain(KeyValue::from_map(&self.extra_filters))
            .collect()
    }
}

impl RedmineClient {
    pub fn issues(&self) -> Result<Vec<Issue>> {
        self.list("issues", &[])
    }

    /// All issues of one project.
    pub fn issues_of(&self, project_id: u64) -> Result<Vec<Issue>> {
        let params = [KeyValue::new("project_id", project_id.to_string())];
        self.list_with_context("issues", &params, || {
            format!("error while reading issues for project {}", project_id)
        })
    }

    /// The issues matched by a saved query.
    pub fn issues_by_query(&self, query_id: u64) -> Result<Vec<Issue>> {
        let params = [KeyValue::new("query_id", query_id.to_string())];
        self.list_with_context("issues", &params, || {
            format!("error while reading issues for query id {}", query_id)
        })
    }

    #[instrument(skip(self))]
    pub fn issues_by_filter(&self, filter: &IssueFilter) -> Result<Vec<Issue>> {
        self.list_with_context("issues", &filter.to_key_values(), || {
            format!("error while reading issues by filter {:?}", filter)
        })
    }

    pub fn issue(&self, id: u64) -> Result<Issue> {
        self.get(&format!("issues/{}", id), id, &[])
    }

    /// Fetch an issue with extra query arguments, e.g. `include=journals`.
    pub fn issue_with_args(&self, id: u64, args: &BTreeMap<String, String>) -> Result<Issue> {
        self.get(&format!("issues/{}", id), id, &KeyValue::from_map(args))
    }

    pub fn create_issue(&self, issue: &Issue) -> Result<Issue> {
        self.create("issues", issue)
    }

    pub fn update_issue(&self, issue: &Issue) -> Result<()> {
        self.update::<Issue, _>(&format!("issues/{}", issue.id), issue.id, issue)
    }

    pub fn delete_issue(&self, id: u64) -> Result<()> {
        self.delete::<Issue>(&format!("issues/{}", id), id)
    }
}
