//! Shared fixture for integration tests against a mock Redmine server.

#![allow(dead_code)]

use redmine_client::{ClientBuilder, RedmineClient};
use serde_json::Value;
use tokio::runtime::Runtime;
use wiremock::{Mock, MockServer, Request};

pub const API_KEY: &str = "3fee4c85d2af5fde4873d909b53d79b5a20ee809";

/// A wiremock server driven from synchronous tests.
///
/// The blocking client must not run inside an async context, so the runtime
/// is only used to start the server, mount mocks and read what it received.
pub struct TestServer {
    server: MockServer,
    runtime: Runtime,
}

impl TestServer {
    pub fn start() -> Self {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let server = runtime.block_on(MockServer::start());
        Self { server, runtime }
    }

    pub fn uri(&self) -> String {
        self.server.uri()
    }

    pub fn mount(&self, mock: Mock) {
        self.runtime.block_on(mock.mount(&self.server));
    }

    pub fn received(&self) -> Vec<Request> {
        self.runtime
            .block_on(self.server.received_requests())
            .unwrap_or_default()
    }

    /// A client authenticating with [`API_KEY`] as `key` parameter.
    pub fn client(&self) -> RedmineClient {
        self.builder().auth_api_token(API_KEY).build().unwrap()
    }

    pub fn builder(&self) -> ClientBuilder {
        ClientBuilder::new().endpoint(self.uri())
    }
}

/// The first value of query parameter `key`.
pub fn query(request: &Request, key: &str) -> Option<String> {
    request
        .url
        .query_pairs()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}

pub fn body_json(request: &Request) -> Value {
    serde_json::from_slice(&request.body).unwrap()
}
