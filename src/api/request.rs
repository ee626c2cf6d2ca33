//! Construction of authenticated Redmine requests.
//!
//! A [`RequestSpec`] is plain data: method, fully composed URL, headers and
//! an optional JSON body. [`RequestBuilder`] produces one from the client
//! configuration; a [`Transport`](super::Transport) executes it.

use std::collections::BTreeMap;

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::Method;
use url::Url;

use super::client::ClientConfig;
use super::error::{ApiError, Result, ResultExt};
use crate::config::ConfigError;

/// The suffix of every Redmine REST resource path.
const JSON_SUFFIX: &str = ".json";

/// One query parameter to merge into a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Convert a map of extra arguments into key/value pairs, in key order.
    pub fn from_map(args: &BTreeMap<String, String>) -> Vec<KeyValue> {
        args.iter().map(|(k, v)| KeyValue::new(k, v)).collect()
    }
}

/// A fully formed outgoing request.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

impl RequestSpec {
    /// A request without headers or body.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: None,
        }
    }

    /// Set `key` to `value`, replacing any existing occurrences in place.
    ///
    /// Other parameters keep their relative order; a new key is appended.
    /// Empty keys are ignored.
    pub fn set_query_param(&mut self, key: &str, value: &str) {
        if key.is_empty() {
            return;
        }

        let mut pairs: Vec<(String, String)> = self.url.query_pairs().into_owned().collect();
        let mut replaced = false;
        pairs.retain_mut(|(k, v)| {
            if k != key {
                return true;
            }
            if replaced {
                return false;
            }
            *v = value.to_string();
            replaced = true;
            true
        });
        if !replaced {
            pairs.push((key.to_string(), value.to_string()));
        }

        self.url.query_pairs_mut().clear().extend_pairs(pairs);
    }

    /// Append `key=value`, keeping any existing parameter with the same key.
    pub fn append_query_param(&mut self, key: &str, value: &str) {
        if key.is_empty() {
            return;
        }
        self.url.query_pairs_mut().append_pair(key, value);
    }

    /// The first value of query parameter `key`, if present.
    pub fn query_param(&self, key: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }
}

/// Builds [`RequestSpec`]s from a [`ClientConfig`].
#[derive(Debug, Clone, Copy)]
pub struct RequestBuilder<'a> {
    config: &'a ClientConfig,
}

impl<'a> RequestBuilder<'a> {
    pub fn new(config: &'a ClientConfig) -> Self {
        Self { config }
    }

    /// Compose an authenticated request for `resource_path`.
    ///
    /// `resource_path` is relative to the endpoint, without the `.json`
    /// suffix (e.g. `"projects/1/versions"`). Parameters are merged in the
    /// order: `limit`, `offset`, `params`, then the auth policy.
    ///
    /// # Errors
    ///
    /// Fails with a wrapped `ConfigError::InvalidEndpoint` if the configured
    /// endpoint does not parse.
    pub fn build(
        &self,
        method: Method,
        resource_path: &str,
        params: &[KeyValue],
        body: Option<String>,
    ) -> Result<RequestSpec> {
        let context = || format!("error while creating {} request for {}", method, resource_path);

        let url = json_resource_url(self.config.endpoint(), resource_path).with_context(context)?;
        let mut request = RequestSpec::new(method.clone(), url);

        if let Some(limit) = self.config.limit() {
            request.set_query_param("limit", &limit.to_string());
        }
        if let Some(offset) = self.config.offset() {
            request.set_query_param("offset", &offset.to_string());
        }
        for kv in params {
            request.set_query_param(&kv.key, &kv.value);
        }

        if body.is_some() {
            request
                .headers
                .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        request.body = body;

        self.config
            .auth()
            .apply(&mut request)
            .with_context(context)?;

        Ok(request)
    }
}

/// Append `<resource_path>.json` to the endpoint's path.
fn json_resource_url(endpoint: &str, resource_path: &str) -> Result<Url> {
    let mut url = Url::parse(endpoint).map_err(|source| {
        ApiError::Config(ConfigError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            source,
        })
    })?;

    let path = format!(
        "{}/{}{}",
        url.path().trim_end_matches('/'),
        resource_path.trim_matches('/'),
        JSON_SUFFIX
    );
    url.set_path(&path);
    Ok(url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::AuthPolicy;
    use reqwest::header::AUTHORIZATION;

    fn config(endpoint: &str, auth: AuthPolicy) -> ClientConfig {
        ClientConfig::new(endpoint, auth).unwrap()
    }

    #[test]
    fn test_json_resource_url_simple() {
        let url = json_resource_url("http://1.2.3.4", "projects/42").unwrap();
        assert_eq!(url.as_str(), "http://1.2.3.4/projects/42.json");
    }

    #[test]
    fn test_json_resource_url_keeps_path_prefix() {
        let url =
            json_resource_url("https://domain.ex-ample.com:3000/redmine", "projects").unwrap();
        assert_eq!(url.as_str(), "https://domain.ex-ample.com:3000/redmine/projects.json");

        let url = json_resource_url("https://example.com/redmine/", "/issues/1").unwrap();
        assert_eq!(url.as_str(), "https://example.com/redmine/issues/1.json");
    }

    #[test]
    fn test_build_without_pagination_settings() {
        let cfg = config("http://localhost:3000", AuthPolicy::none());
        let req = RequestBuilder::new(&cfg)
            .build(Method::GET, "issues", &[], None)
            .unwrap();

        assert_eq!(req.method, Method::GET);
        assert_eq!(req.url.as_str(), "http://localhost:3000/issues.json");
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn test_build_merges_params_in_order() {
        let cfg = config("http://localhost:3000", AuthPolicy::api_token("tok"))
            .with_limit(Some(25))
            .with_offset(Some(5));
        let req = RequestBuilder::new(&cfg)
            .build(
                Method::GET,
                "issues",
                &[KeyValue::new("project_id", "1")],
                None,
            )
            .unwrap();

        assert_eq!(
            req.url.as_str(),
            "http://localhost:3000/issues.json?limit=25&offset=5&project_id=1&key=tok"
        );
    }

    #[test]
    fn test_build_percent_encodes_values() {
        let cfg = config("http://localhost:3000", AuthPolicy::api_token("a&b=c"));
        let req = RequestBuilder::new(&cfg)
            .build(
                Method::GET,
                "issues",
                &[KeyValue::new("subject", "crash & burn #1")],
                None,
            )
            .unwrap();

        assert_eq!(req.query_param("subject").as_deref(), Some("crash & burn #1"));
        assert_eq!(req.query_param("key").as_deref(), Some("a&b=c"));
        assert!(req.url.fragment().is_none());
    }

    #[test]
    fn test_build_with_body_sets_content_type() {
        let cfg = config("http://localhost:3000", AuthPolicy::basic_auth("u", "p"));
        let req = RequestBuilder::new(&cfg)
            .build(Method::POST, "issues", &[], Some("{}".to_string()))
            .unwrap();

        assert_eq!(req.headers.get(CONTENT_TYPE).unwrap(), "application/json");
        assert!(req.headers.get(AUTHORIZATION).is_some());
        assert_eq!(req.body.as_deref(), Some("{}"));
    }

    #[test]
    fn test_build_with_invalid_endpoint_is_wrapped_config_error() {
        let cfg = config("not a url", AuthPolicy::none());
        let err = RequestBuilder::new(&cfg)
            .build(Method::GET, "issues", &[], None)
            .unwrap_err();

        assert!(err
            .to_string()
            .starts_with("error while creating GET request for issues: invalid endpoint URL"));
        assert!(matches!(
            err.root(),
            ApiError::Config(ConfigError::InvalidEndpoint { .. })
        ));
    }

    #[test]
    fn test_set_query_param_replaces_in_place() {
        let mut req = RequestSpec::new(
            Method::GET,
            Url::parse("http://localhost/issues.json?offset=0&project_id=1&key=t").unwrap(),
        );
        req.set_query_param("offset", "25");

        assert_eq!(
            req.url.as_str(),
            "http://localhost/issues.json?offset=25&project_id=1&key=t"
        );
    }

    #[test]
    fn test_set_query_param_appends_new_key_and_ignores_empty_key() {
        let mut req = RequestSpec::new(Method::GET, Url::parse("http://localhost/a.json").unwrap());
        req.set_query_param("offset", "0");
        req.set_query_param("", "ignored");

        assert_eq!(req.url.as_str(), "http://localhost/a.json?offset=0");
    }

    #[test]
    fn test_key_values_from_map_are_sorted() {
        let mut args = BTreeMap::new();
        args.insert("include".to_string(), "journals".to_string());
        args.insert("b".to_string(), "2".to_string());

        let kvs = KeyValue::from_map(&args);
        assert_eq!(
            kvs,
            vec![KeyValue::new("b", "2"), KeyValue::new("include", "journals")]
        );
    }
}
