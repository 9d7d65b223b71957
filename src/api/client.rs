use crate::api::ApiError;
use crate::config::Config;
use crate::storage::{LocalStore, TOKEN_KEY};
use reqwest::multipart::Form;
use reqwest::{RequestBuilder, Response};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// HTTP client for the backend REST API.
///
/// The bearer token is read from the local store on every request, so a
/// login or logout takes effect immediately for every holder of a clone.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base: String,
    origin: String,
    store: Arc<LocalStore>,
    request_timeout: Duration,
    auth_timeout: Duration,
}

impl ApiClient {
    pub fn new(config: &Config, store: Arc<LocalStore>) -> Self {
        Self::with_client(reqwest::Client::new(), config, store)
    }

    pub fn with_client(http: reqwest::Client, config: &Config, store: Arc<LocalStore>) -> Self {
        Self {
            http,
            base: config.api_base(),
            origin: config.api_origin.clone(),
            store,
            request_timeout: config.request_timeout(),
            auth_timeout: config.auth_timeout(),
        }
    }

    /// Origin used to resolve relative media paths.
    pub fn origin(&self) -> &str {
        &self.origin
    }

    pub fn store(&self) -> &Arc<LocalStore> {
        &self.store
    }

    pub fn token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY).filter(|t| !t.is_empty())
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    fn with_token(&self, request: RequestBuilder) -> RequestBuilder {
        match self.token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    /// Authenticated GET.
    pub async fn get(&self, path: &str) -> Result<Value, ApiError> {
        let request = self
            .with_token(self.http.get(self.url(path)))
            .timeout(self.request_timeout);
        self.send(request, "GET", path).await
    }

    /// GET without credentials, as the public site fetches its grids.
    pub async fn get_public_with_timeout(&self, path: &str, timeout: Duration) -> Result<Value, ApiError> {
        let request = self.http.get(self.url(path)).timeout(timeout);
        self.send(request, "GET", path).await
    }

    /// Authenticated DELETE.
    pub async fn delete(&self, path: &str) -> Result<Value, ApiError> {
        let request = self
            .with_token(self.http.delete(self.url(path)))
            .timeout(self.request_timeout);
        self.send(request, "DELETE", path).await
    }

    /// Authenticated multipart POST.
    pub async fn post_multipart(&self, path: &str, form: Form) -> Result<Value, ApiError> {
        let request = self
            .with_token(self.http.post(self.url(path)))
            .multipart(form)
            .timeout(self.request_timeout);
        self.send(request, "POST", path).await
    }

    /// JSON POST without credentials (login, forgot and reset password).
    pub async fn post_public<T: Serialize + ?Sized>(&self, path: &str, body: &T) -> Result<Value, ApiError> {
        self.post_public_with_timeout(path, body, self.auth_timeout).await
    }

    pub async fn post_public_with_timeout<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
        timeout: Duration,
    ) -> Result<Value, ApiError> {
        let request = self.http.post(self.url(path)).json(body).timeout(timeout);
        self.send(request, "POST", path).await
    }

    async fn send(&self, request: RequestBuilder, verb: &str, path: &str) -> Result<Value, ApiError> {
        debug!("{} {}", verb, self.url(path));
        let response = request.send().await.map_err(|e| {
            warn!("{} {} failed: {}", verb, path, e);
            ApiError::from(e)
        })?;
        read_response(response).await
    }
}

/// Turn a response into its JSON body or an [`ApiError::Server`].
///
/// An empty body is `Null`; a non-JSON body is kept as a string.
async fn read_response(response: Response) -> Result<Value, ApiError> {
    let status = response.status();
    let text = response.text().await?;

    let body = if text.trim().is_empty() {
        Value::Null
    } else {
        serde_json::from_str(&text).unwrap_or(Value::String(text))
    };

    if status.is_success() {
        return Ok(body);
    }

    let message = server_message(&body);
    warn!(
        "API error ({}): {}",
        status,
        message.as_deref().unwrap_or("<no message>")
    );
    Err(ApiError::Server {
        status: status.as_u16(),
        message,
    })
}

/// The `message` field of an error body, or the body itself when it is plain text.
pub fn server_message(body: &Value) -> Option<String> {
    match body {
        Value::Object(map) => map
            .get("message")
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string),
        Value::String(text) if !text.trim().is_empty() => Some(text.trim().to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::{
        matchers::{header, method, path},
        Mock, MockServer, Request, ResponseTemplate,
    };

    fn create_client(uri: &str, store: Arc<LocalStore>) -> ApiClient {
        let config = Config {
            api_origin: uri.to_string(),
            ..Config::default()
        };
        ApiClient::new(&config, store)
    }

    // ==================== URL Tests ====================

    #[test]
    fn test_url_joins_base_and_path() {
        let client = create_client("http://localhost:5000", Arc::new(LocalStore::in_memory()));
        assert_eq!(client.url("/services"), "http://localhost:5000/api/services");
        assert_eq!(client.url("media/42"), "http://localhost:5000/api/media/42");
    }

    // ==================== server_message Tests ====================

    #[test]
    fn test_server_message_from_json() {
        assert_eq!(
            server_message(&json!({"message": "Invalid credentials"})).as_deref(),
            Some("Invalid credentials")
        );
    }

    #[test]
    fn test_server_message_from_text() {
        assert_eq!(
            server_message(&Value::String("Bad Gateway".into())).as_deref(),
            Some("Bad Gateway")
        );
    }

    #[test]
    fn test_server_message_absent() {
        assert!(server_message(&json!({"error": true})).is_none());
        assert!(server_message(&json!({"message": "  "})).is_none());
        assert!(server_message(&Value::Null).is_none());
    }

    // ==================== Request Tests ====================

    #[tokio::test]
    async fn test_bearer_token_attached_when_present() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/quotes"))
            .and(header("Authorization", "Bearer secret-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let store = Arc::new(LocalStore::in_memory());
        store.set(TOKEN_KEY, "secret-token").expect("set token");
        let client = create_client(&mock_server.uri(), store);

        let body = client.get("/quotes").await.expect("should succeed");
        assert_eq!(body, json!([]));
    }

    #[tokio::test]
    async fn test_no_authorization_header_without_token() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/services"))
            .respond_with(|req: &Request| {
                if req.headers.contains_key("authorization") {
                    ResponseTemplate::new(400)
                } else {
                    ResponseTemplate::new(200).set_body_json(json!([]))
                }
            })
            .mount(&mock_server)
            .await;

        let client = create_client(&mock_server.uri(), Arc::new(LocalStore::in_memory()));
        assert!(client.get("/services").await.is_ok());
    }

    #[tokio::test]
    async fn test_public_get_never_sends_token() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/media"))
            .respond_with(|req: &Request| {
                if req.headers.contains_key("authorization") {
                    ResponseTemplate::new(400)
                } else {
                    ResponseTemplate::new(200).set_body_json(json!({"media": []}))
                }
            })
            .expect(1)
            .mount(&mock_server)
            .await;

        let store = Arc::new(LocalStore::in_memory());
        store.set(TOKEN_KEY, "secret-token").expect("set token");
        let client = create_client(&mock_server.uri(), store);

        let body = client
            .get_public_with_timeout("/media", Duration::from_secs(15))
            .await
            .expect("should succeed");
        assert_eq!(body, json!({"media": []}));
    }

    #[tokio::test]
    async fn test_public_get_times_out() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
            .mount(&mock_server)
            .await;

        let client = create_client(&mock_server.uri(), Arc::new(LocalStore::in_memory()));
        let err = client
            .get_public_with_timeout("/services", Duration::from_millis(50))
            .await
            .unwrap_err();
        assert!(err.is_transport());
    }

    #[tokio::test]
    async fn test_server_error_carries_message() {
        let mock_server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/media/7"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Media not found"})))
            .mount(&mock_server)
            .await;

        let client = create_client(&mock_server.uri(), Arc::new(LocalStore::in_memory()));
        match client.delete("/media/7").await {
            Err(ApiError::Server { status, message }) => {
                assert_eq!(status, 404);
                assert_eq!(message.as_deref(), Some("Media not found"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_empty_success_body_is_null() {
        let mock_server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&mock_server)
            .await;

        let client = create_client(&mock_server.uri(), Arc::new(LocalStore::in_memory()));
        assert_eq!(client.delete("/services/1").await.expect("ok"), Value::Null);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_transport_error() {
        // Nothing listens on port 9 (discard) in the test environment.
        let client = create_client("http://127.0.0.1:9", Arc::new(LocalStore::in_memory()));
        let err = client.get("/services").await.unwrap_err();
        assert!(err.is_transport());
    }
}
