//! The issue priority enumeration.

use serde::Deserialize;

use crate::api::{RedmineClient, Resource, Result};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IssuePriority {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub is_default: bool,
    /// Missing on servers older than Redmine 4.x, which only list active ones.
    #[serde(default = "active_by_default")]
    pub active: bool,
}

fn active_by_default() -> bool {
    true
}

impl Resource for IssuePriority {
    const KIND: &'static str = "issue priority";
    const SINGULAR: &'static str = "issue_priority";
    const PLURAL: &'static str = "issue_priorities";
}

impl RedmineClient {
    /// All issue priorities. The enumeration is not paginated.
    pub fn issue_priorities(&self) -> Result<Vec<IssuePriority>> {
        self.list_unpaged("enumerations/issue_priorities", &[])
    }
}
