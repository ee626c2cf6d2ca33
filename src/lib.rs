//! redmine-client - a blocking client for the Redmine REST API.
//!
//! ```no_run
//! use redmine_client::RedmineClient;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = RedmineClient::builder()
//!     .endpoint("https://redmine.example.com")
//!     .auth_api_token("0123456789abcdef")
//!     .limit(100)
//!     .build()?;
//!
//! for issue in client.issues_of(1)? {
//!     println!("{}", issue.title());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! Connection profiles can also be read from a TOML file, see
//! [`config::Settings`] and [`ClientBuilder::from_settings`].

pub mod api;
pub mod config;
pub mod logging;
pub mod resources;

pub use api::{ApiError, AuthPolicy, ClientBuilder, ClientConfig, RedmineClient};
pub use config::ConfigError;
pub use resources::{
    Issue, IssueCategory, IssueFilter, IssuePriority, Membership, NewMembership, Project, User,
    UserStatus, Version,
};
