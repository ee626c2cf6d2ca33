//! Redmine API client implementation.
//!
//! [`RedmineClient`] wires request construction, the transport, response
//! decoding and pagination together. The per-resource operations live in
//! [`crate::resources`] and are built on the generic helpers here.

use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use tracing::{debug, info, instrument, warn};

use super::auth::AuthPolicy;
use super::envelope::{wrap, Envelope, ListEnvelope, PageEnvelope, Payload, Resource};
use super::error::{ApiError, Result, ResultExt};
use super::pagination::fetch_all;
use super::request::{KeyValue, RequestBuilder, RequestSpec};
use super::response::{check_status, decode, Missing, GET_OK, POST_CREATED, PUT_OR_DELETE_OK};
use super::transport::{HttpTransport, Transport, DEFAULT_TIMEOUT_SECS};
use crate::config::{self, ConfigError, Profile, Settings};

/// Environment variable holding the Redmine base URL.
pub const ENV_URL: &str = "REDMINE_URL";
/// Environment variable holding the API key.
pub const ENV_API_KEY: &str = "REDMINE_API_KEY";
/// Environment variable holding the login for basic auth.
pub const ENV_USER: &str = "REDMINE_USER";
/// Environment variable holding the password for basic auth.
pub const ENV_PASSWORD: &str = "REDMINE_PASSWORD";

/// Immutable connection settings shared by every request of a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    endpoint: String,
    auth: AuthPolicy,
    limit: Option<u32>,
    offset: Option<u32>,
}

impl ClientConfig {
    /// Create a configuration without pagination overrides.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidAuth` if the policy lacks a required
    /// credential. The endpoint is only parsed when a request is built.
    pub fn new(endpoint: impl Into<String>, auth: AuthPolicy) -> config::Result<Self> {
        auth.validate()?;
        Ok(Self {
            endpoint: endpoint.into(),
            auth,
            limit: None,
            offset: None,
        })
    }

    /// Set the page size sent as `limit`; `None` leaves the server default.
    pub fn with_limit(mut self, limit: Option<u32>) -> Self {
        self.limit = limit;
        self
    }

    /// Set the `offset` sent on non-paginated requests.
    pub fn with_offset(mut self, offset: Option<u32>) -> Self {
        self.offset = offset;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn auth(&self) -> &AuthPolicy {
        &self.auth
    }

    pub fn limit(&self) -> Option<u32> {
        self.limit
    }

    pub fn offset(&self) -> Option<u32> {
        self.offset
    }
}

/// Step-by-step construction of a [`RedmineClient`].
///
/// ```no_run
/// use redmine_client::ClientBuilder;
///
/// let client = ClientBuilder::new()
///     .endpoint("https://redmine.example.com")
///     .auth_api_token("0123456789abcdef")
///     .limit(50)
///     .build()
///     .expect("valid configuration");
/// ```
#[derive(Clone)]
pub struct ClientBuilder {
    endpoint: Option<String>,
    auth: AuthPolicy,
    limit: Option<u32>,
    offset: Option<u32>,
    timeout: Duration,
    transport: Option<Arc<dyn Transport>>,
}

impl Default for ClientBuilder {
    fn default() -> Self {
        Self {
            endpoint: None,
            auth: AuthPolicy::NoAuth,
            limit: None,
            offset: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            transport: None,
        }
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("endpoint", &self.endpoint)
            .field("auth", &self.auth)
            .field("limit", &self.limit)
            .field("offset", &self.offset)
            .field("timeout", &self.timeout)
            .field("custom_transport", &self.transport.is_some())
            .finish()
    }
}

impl ClientBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a configured profile.
    ///
    /// # Errors
    ///
    /// Returns an error if the profile is invalid or a secret cannot be
    /// resolved from the keyring.
    pub fn from_profile(profile: &Profile) -> config::Result<Self> {
        profile.validate()?;
        let mut builder = Self::new()
            .endpoint(profile.url.clone())
            .auth(profile.auth_policy()?);
        builder.limit = profile.limit;
        builder.offset = profile.offset;
        Ok(builder)
    }

    /// Start from the active profile of `settings`, using its timeout.
    pub fn from_settings(settings: &Settings) -> config::Result<Self> {
        let profile = settings.active_profile()?;
        debug!(profile = %profile.name, "Using profile");
        Ok(Self::from_profile(profile)?.timeout(settings.timeout()))
    }

    /// Start from `REDMINE_*` environment variables.
    ///
    /// `REDMINE_URL` is required. The auth policy is chosen from what is set:
    /// user and API key select basic auth with the token, the API key alone
    /// selects the `key` parameter, and user with optional password selects
    /// basic auth. Nothing set means anonymous access.
    pub fn from_env() -> config::Result<Self> {
        let endpoint = env_var(ENV_URL).ok_or(ConfigError::MissingEnv(ENV_URL))?;
        let auth = match (env_var(ENV_USER), env_var(ENV_API_KEY)) {
            (Some(user), Some(token)) => AuthPolicy::basic_auth_with_token(user, token),
            (None, Some(token)) => AuthPolicy::api_token(token),
            (Some(user), None) => {
                AuthPolicy::basic_auth(user, env_var(ENV_PASSWORD).unwrap_or_default())
            }
            (None, None) => AuthPolicy::NoAuth,
        };
        Ok(Self::new().endpoint(endpoint).auth(auth))
    }

    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn auth(mut self, auth: AuthPolicy) -> Self {
        self.auth = auth;
        self
    }

    pub fn auth_basic(self, user: impl Into<String>, password: impl Into<String>) -> Self {
        self.auth(AuthPolicy::basic_auth(user, password))
    }

    pub fn auth_api_token(self, token: impl Into<String>) -> Self {
        self.auth(AuthPolicy::api_token(token))
    }

    pub fn auth_basic_with_token(self, user: impl Into<String>, token: impl Into<String>) -> Self {
        self.auth(AuthPolicy::basic_auth_with_token(user, token))
    }

    pub fn auth_none(self) -> Self {
        self.auth(AuthPolicy::NoAuth)
    }

    /// Page size for list requests.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Request timeout of the default HTTP transport.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a custom transport instead of the default HTTP one.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Validate the configuration and create the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is missing or unparsable, or the
    /// auth policy is incomplete. No transport is created in that case.
    pub fn build(self) -> config::Result<RedmineClient> {
        let endpoint = self
            .endpoint
            .filter(|e| !e.trim().is_empty())
            .ok_or_else(|| ConfigError::ValidationError("endpoint must be set".to_string()))?;

        let config = ClientConfig::new(endpoint, self.auth)?
            .with_limit(self.limit)
            .with_offset(self.offset);

        let url = url::Url::parse(config.endpoint()).map_err(|source| {
            ConfigError::InvalidEndpoint {
                endpoint: config.endpoint().to_string(),
                source,
            }
        })?;
        if is_insecure(&url) {
            warn!(
                "Endpoint does not use HTTPS: {}. Credentials are sent in clear text.",
                config.endpoint()
            );
        }

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(HttpTransport::new(self.timeout)?),
        };

        info!(endpoint = %config.endpoint(), auth = config.auth().scheme(), "Redmine client created");
        Ok(RedmineClient { config, transport })
    }
}

/// Blocking client for the Redmine REST API.
///
/// Each operation makes one request, except list operations, which walk
/// every page of the result.
#[derive(Clone)]
pub struct RedmineClient {
    config: ClientConfig,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for RedmineClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RedmineClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl RedmineClient {
    /// Create a client authenticating with an API key in the `key` parameter.
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> config::Result<Self> {
        ClientBuilder::new()
            .endpoint(endpoint)
            .auth_api_token(api_key)
            .build()
    }

    pub fn builder() -> ClientBuilder {
        ClientBuilder::new()
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn request(
        &self,
        method: Method,
        path: &str,
        params: &[KeyValue],
        body: Option<String>,
    ) -> Result<RequestSpec> {
        RequestBuilder::new(&self.config).build(method, path, params, body)
    }

    /// Fetch one entity from `path`.
    #[instrument(skip(self, params), fields(kind = T::KIND))]
    pub(crate) fn get<T: Resource>(&self, path: &str, id: u64, params: &[KeyValue]) -> Result<T> {
        let request = self.request(Method::GET, path, params, None)?;
        let response = self
            .transport
            .execute(&request)
            .with_context(|| format!("could not read {} {}", T::KIND, id))?;

        let missing = Missing {
            kind: T::KIND,
            id,
            action: None,
        };
        let Envelope(entity) = decode::<Envelope<T>>(response, GET_OK, Some(missing))
            .with_context(|| format!("error while reading {} {}", T::KIND, id))?;
        Ok(entity)
    }

    /// Fetch an entity that is addressed by path rather than id, such as
    /// `users/current`. `what` names it in error messages.
    #[instrument(skip(self), fields(kind = T::KIND))]
    pub(crate) fn get_by_path<T: Resource>(&self, path: &str, what: &str) -> Result<T> {
        let request = self.request(Method::GET, path, &[], None)?;
        let response = self
            .transport
            .execute(&request)
            .with_context(|| format!("could not read {}", what))?;
        let Envelope(entity) = decode::<Envelope<T>>(response, GET_OK, None)
            .with_context(|| format!("error while reading {}", what))?;
        Ok(entity)
    }

    /// Fetch every page of the list at `path`.
    pub(crate) fn list<T: Resource>(&self, path: &str, params: &[KeyValue]) -> Result<Vec<T>> {
        self.list_with_context(path, params, || {
            format!("error while reading {}", T::PLURAL.replace('_', " "))
        })
    }

    /// Like [`list`](Self::list), with a caller-specific error context.
    #[instrument(skip(self, params, context), fields(kind = T::KIND))]
    pub(crate) fn list_with_context<T, F>(
        &self,
        path: &str,
        params: &[KeyValue],
        context: F,
    ) -> Result<Vec<T>>
    where
        T: Resource,
        F: FnOnce() -> String,
    {
        let request = self.request(Method::GET, path, params, None)?;
        let items = fetch_all::<T>(self.transport.as_ref(), request).with_context(context)?;
        debug!(count = items.len(), "Fetched list");
        Ok(items)
    }

    /// Fetch a single page of the list at `path`, without walking further.
    pub(crate) fn page<T: Resource>(
        &self,
        path: &str,
        params: &[KeyValue],
    ) -> Result<PageEnvelope<T>> {
        let context = || format!("error while reading {}", T::PLURAL.replace('_', " "));
        let request = self.request(Method::GET, path, params, None)?;
        let response = self.transport.execute(&request).with_context(context)?;
        decode(response, GET_OK, None).with_context(context)
    }

    /// Fetch an unpaginated list such as an enumeration.
    #[instrument(skip(self, params), fields(kind = T::KIND))]
    pub(crate) fn list_unpaged<T: Resource>(
        &self,
        path: &str,
        params: &[KeyValue],
    ) -> Result<Vec<T>> {
        let context = || format!("error while reading {}", T::PLURAL.replace('_', " "));
        let request = self.request(Method::GET, path, params, None)?;
        let response = self.transport.execute(&request).with_context(context)?;
        let list: ListEnvelope<T> = decode(response, GET_OK, None).with_context(context)?;
        Ok(list.items)
    }

    /// POST `payload` to `path` and return the created entity.
    #[instrument(skip(self, payload), fields(kind = T::KIND))]
    pub(crate) fn create<T, P>(&self, path: &str, payload: &P) -> Result<T>
    where
        T: Resource,
        P: Payload + ?Sized,
    {
        let body = wrap(T::SINGULAR, payload)
            .map_err(ApiError::Encode)
            .with_context(|| format!("could not create {}", T::KIND))?;
        let request = self.request(Method::POST, path, &[], Some(body))?;
        let response = self
            .transport
            .execute(&request)
            .with_context(|| format!("could not create {}", T::KIND))?;

        let Envelope(created) = decode::<Envelope<T>>(response, POST_CREATED, None)
            .with_context(|| format!("error while creating {}", T::KIND))?;
        info!("Created {}", T::KIND);
        Ok(created)
    }

    /// PUT `payload` to `path`. Success carries no entity.
    #[instrument(skip(self, payload), fields(kind = T::KIND))]
    pub(crate) fn update<T, P>(&self, path: &str, id: u64, payload: &P) -> Result<()>
    where
        T: Resource,
        P: Payload + ?Sized,
    {
        let body = wrap(T::SINGULAR, payload)
            .map_err(ApiError::Encode)
            .with_context(|| format!("could not update {} {}", T::KIND, id))?;
        let request = self.request(Method::PUT, path, &[], Some(body))?;
        self.send_write::<T>(request, id, "update", "updating")
    }

    /// DELETE the entity at `path`.
    #[instrument(skip(self), fields(kind = T::KIND))]
    pub(crate) fn delete<T: Resource>(&self, path: &str, id: u64) -> Result<()> {
        let request = self.request(Method::DELETE, path, &[], Some(String::new()))?;
        self.send_write::<T>(request, id, "delete", "deleting")
    }

    fn send_write<T: Resource>(
        &self,
        request: RequestSpec,
        id: u64,
        verb: &str,
        progressive: &str,
    ) -> Result<()> {
        let response = self
            .transport
            .execute(&request)
            .with_context(|| format!("could not {} {} {}", verb, T::KIND, id))?;

        let missing = Missing {
            kind: T::KIND,
            id,
            action: Some(verb),
        };
        check_status(&response, PUT_OR_DELETE_OK, Some(missing))
            .with_context(|| format!("error while {} {} {}", progressive, T::KIND, id))?;
        debug!(id, "{} {} succeeded", verb, T::KIND);
        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.is_empty())
}

/// Plain HTTP to anything but the loopback host.
fn is_insecure(url: &url::Url) -> bool {
    url.scheme() != "https" && !matches!(url.host_str(), Some("localhost" | "127.0.0.1" | "[::1]"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::transport::testing::ScriptedTransport;
    use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
    use reqwest::StatusCode;
    use serde::{Deserialize, Serialize};
    use serial_test::serial;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Widget {
        #[serde(default)]
        id: u64,
        name: String,
    }

    impl Resource for Widget {
        const KIND: &'static str = "widget";
        const SINGULAR: &'static str = "widget";
        const PLURAL: &'static str = "widgets";
    }

    impl Payload for Widget {}

    fn client(transport: Arc<ScriptedTransport>) -> RedmineClient {
        ClientBuilder::new()
            .endpoint("http://localhost:3000")
            .auth_api_token("tok")
            .transport(transport)
            .build()
            .unwrap()
    }

    fn clear_env() {
        for name in [ENV_URL, ENV_API_KEY, ENV_USER, ENV_PASSWORD] {
            env::remove_var(name);
        }
    }

    #[test]
    fn test_build_rejects_empty_basic_user_without_requests() {
        let transport = Arc::new(ScriptedTransport::new());
        let result = ClientBuilder::new()
            .endpoint("http://localhost:3000")
            .auth_basic("", "secret")
            .transport(transport.clone())
            .build();

        assert!(matches!(result, Err(ConfigError::InvalidAuth { .. })));
        assert_eq!(transport.request_count(), 0);
    }

    #[test]
    fn test_build_requires_endpoint() {
        let err = ClientBuilder::new().build().unwrap_err();
        assert!(err.to_string().contains("endpoint must be set"));
    }

    #[test]
    fn test_build_rejects_unparsable_endpoint() {
        let err = ClientBuilder::new().endpoint("::nope").build().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEndpoint { .. }));
    }

    #[test]
    fn test_insecure_endpoint_detection() {
        let insecure = |endpoint: &str| is_insecure(&url::Url::parse(endpoint).unwrap());

        assert!(!insecure("https://redmine.example.com"));
        assert!(!insecure("http://localhost:3000"));
        assert!(!insecure("http://127.0.0.1/redmine"));
        assert!(insecure("http://redmine.example.com"));
        assert!(insecure("http://localhost.evil.com"));
        assert!(insecure("http://evil.com/localhost"));
    }

    #[test]
    fn test_new_selects_api_token() {
        let client = RedmineClient::new("https://redmine.example.com", "abc").unwrap();
        assert_eq!(client.config().auth(), &AuthPolicy::api_token("abc"));
        assert_eq!(client.config().limit(), None);
    }

    #[test]
    fn test_config_new_validates_auth() {
        assert!(ClientConfig::new("http://x", AuthPolicy::api_token("")).is_err());
        assert!(ClientConfig::new("not a url", AuthPolicy::none()).is_ok());
    }

    #[test]
    fn test_debug_hides_token() {
        let client = RedmineClient::new("https://redmine.example.com", "s3cr3t").unwrap();
        assert!(!format!("{:?}", client).contains("s3cr3t"));
    }

    #[test]
    fn test_get_decodes_envelope() {
        let transport = Arc::new(
            ScriptedTransport::new().respond(StatusCode::OK, r#"{"widget":{"id":4,"name":"gear"}}"#),
        );
        let widget: Widget = client(transport.clone()).get("widgets/4", 4, &[]).unwrap();

        assert_eq!(widget.name, "gear");
        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::GET);
        assert_eq!(
            request.url.as_str(),
            "http://localhost:3000/widgets/4.json?key=tok"
        );
    }

    #[test]
    fn test_get_not_found() {
        let transport = Arc::new(ScriptedTransport::new().respond(StatusCode::NOT_FOUND, ""));
        let err = client(transport).get::<Widget>("widgets/4", 4, &[]).unwrap_err();

        assert_eq!(err.to_string(), "widget (id: 4) was not found");
    }

    #[test]
    fn test_get_status_error_is_wrapped() {
        let transport = Arc::new(ScriptedTransport::new().respond(StatusCode::UNAUTHORIZED, ""));
        let err = client(transport).get::<Widget>("widgets/4", 4, &[]).unwrap_err();

        assert_eq!(
            err.to_string(),
            "error while reading widget 4: HTTP 401 Unauthorized"
        );
    }

    #[test]
    fn test_list_error_names_plural() {
        let transport = Arc::new(ScriptedTransport::new().respond(StatusCode::NOT_FOUND, ""));
        let err = client(transport).list::<Widget>("widgets", &[]).unwrap_err();

        assert_eq!(err.to_string(), "error while reading widgets: HTTP 404 Not Found");
    }

    #[test]
    fn test_create_posts_wrapped_body() {
        let transport = Arc::new(
            ScriptedTransport::new()
                .respond(StatusCode::CREATED, r#"{"widget":{"id":9,"name":"bolt"}}"#),
        );
        let input = Widget {
            id: 0,
            name: "bolt".to_string(),
        };
        let created: Widget = client(transport.clone()).create("widgets", &input).unwrap();

        assert_eq!(created.id, 9);
        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::POST);
        assert_eq!(request.headers.get(CONTENT_TYPE).unwrap(), "application/json");
        let body: serde_json::Value = serde_json::from_str(request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["widget"]["name"], "bolt");
    }

    #[test]
    fn test_create_rejected() {
        let transport = Arc::new(ScriptedTransport::new().respond(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"errors":["Name cannot be blank"]}"#,
        ));
        let input = Widget {
            id: 0,
            name: String::new(),
        };
        let err = client(transport).create::<Widget, _>("widgets", &input).unwrap_err();

        assert_eq!(
            err.to_string(),
            "error while creating widget: Name cannot be blank"
        );
    }

    #[test]
    fn test_update_accepts_no_content() {
        let transport = Arc::new(ScriptedTransport::new().respond(StatusCode::NO_CONTENT, ""));
        let input = Widget {
            id: 3,
            name: "nut".to_string(),
        };
        client(transport.clone())
            .update::<Widget, _>("widgets/3", 3, &input)
            .unwrap();

        assert_eq!(transport.requests()[0].method, Method::PUT);
    }

    #[test]
    fn test_update_not_found() {
        let transport = Arc::new(ScriptedTransport::new().respond(StatusCode::NOT_FOUND, ""));
        let input = Widget {
            id: 3,
            name: "nut".to_string(),
        };
        let err = client(transport)
            .update::<Widget, _>("widgets/3", 3, &input)
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "could not update widget (id: 3) because it was not found"
        );
    }

    #[test]
    fn test_delete_sends_empty_json_body() {
        let transport = Arc::new(ScriptedTransport::new().respond(StatusCode::OK, ""));
        client(transport.clone()).delete::<Widget>("widgets/3", 3).unwrap();

        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::DELETE);
        assert_eq!(request.body.as_deref(), Some(""));
        assert_eq!(request.headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn test_delete_server_error_is_wrapped() {
        let transport = Arc::new(ScriptedTransport::new().respond(StatusCode::INTERNAL_SERVER_ERROR, ""));
        let err = client(transport).delete::<Widget>("widgets/3", 3).unwrap_err();

        assert_eq!(
            err.to_string(),
            "error while deleting widget 3: HTTP 500 Internal Server Error"
        );
    }

    #[test]
    fn test_basic_auth_client_sends_header_only() {
        let transport = Arc::new(
            ScriptedTransport::new().respond(StatusCode::OK, r#"{"widget":{"id":1,"name":"a"}}"#),
        );
        let client = ClientBuilder::new()
            .endpoint("http://localhost:3000")
            .auth_basic("admin", "pw")
            .transport(transport.clone())
            .build()
            .unwrap();
        let _: Widget = client.get("widgets/1", 1, &[]).unwrap();

        let request = &transport.requests()[0];
        assert!(request.headers.get(AUTHORIZATION).is_some());
        assert!(request.query_param("key").is_none());
    }

    #[test]
    fn test_from_profile_carries_pagination() {
        let mut profile = Profile::new("work".to_string(), "https://redmine.example.com".to_string());
        profile.auth = config::AuthSettings::ApiToken {
            token: Some("abc".to_string()),
        };
        profile.limit = Some(10);

        let client = ClientBuilder::from_profile(&profile).unwrap().build().unwrap();
        assert_eq!(client.config().limit(), Some(10));
        assert_eq!(client.config().offset(), None);
        assert_eq!(client.config().auth(), &AuthPolicy::api_token("abc"));
    }

    #[test]
    #[serial]
    fn test_from_env_requires_url() {
        clear_env();
        let err = ClientBuilder::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnv(ENV_URL)));
    }

    #[test]
    #[serial]
    fn test_from_env_selects_policy() {
        clear_env();
        env::set_var(ENV_URL, "https://redmine.example.com");
        env::set_var(ENV_API_KEY, "abc");
        let client = ClientBuilder::from_env().unwrap().build().unwrap();
        assert_eq!(client.config().auth(), &AuthPolicy::api_token("abc"));

        env::set_var(ENV_USER, "admin");
        let client = ClientBuilder::from_env().unwrap().build().unwrap();
        assert_eq!(
            client.config().auth(),
            &AuthPolicy::basic_auth_with_token("admin", "abc")
        );

        env::remove_var(ENV_API_KEY);
        env::set_var(ENV_PASSWORD, "pw");
        let client = ClientBuilder::from_env().unwrap().build().unwrap();
        assert_eq!(client.config().auth(), &AuthPolicy::basic_auth("admin", "pw"));
        clear_env();
    }
}
