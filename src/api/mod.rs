//! Redmine REST API core.
//!
//! Requests are composed by [`RequestBuilder`], decorated by an
//! [`AuthPolicy`], executed by a [`Transport`] and decoded by the
//! [`response`] module. List endpoints go through [`fetch_all`].

mod auth;
mod client;
mod envelope;
mod error;
mod pagination;
mod request;
pub mod response;
mod transport;

pub use auth::{AuthPolicy, API_KEY_PARAM};
pub use client::{
    ClientBuilder, ClientConfig, RedmineClient, ENV_API_KEY, ENV_PASSWORD, ENV_URL, ENV_USER,
};
pub use envelope::{wrap, Envelope, ListEnvelope, PageEnvelope, Payload, Resource};
pub use error::{ApiError, Result};
pub use pagination::fetch_all;
pub use request::{KeyValue, RequestBuilder, RequestSpec};
pub use response::HttpResponse;
pub use transport::{HttpTransport, Transport, DEFAULT_TIMEOUT_SECS};
