use crate::api::{server_message, ApiClient, ApiError};
use crate::record::{record_from_create, records_from_list, Record};
use reqwest::multipart::Form;
use serde_json::Value;
use std::time::Duration;
use tracing::info;

/// Notification texts for one resource's CRUD actions.
#[derive(Debug, Clone, Copy)]
pub struct Messages {
    pub load_failed: &'static str,
    pub created: &'static str,
    pub create_failed: &'static str,
    pub deleted: &'static str,
    pub delete_failed: &'static str,
}

/// A REST collection under the API base.
pub trait Resource: Send + Sync + 'static {
    /// Collection path, e.g. `/services`
    const PATH: &'static str;
    /// Key wrapping the array in list responses
    const LIST_ENVELOPE: &'static str;
    /// Key wrapping the record in create responses
    const ITEM_ENVELOPE: &'static str;
    /// Short name for logs
    const LABEL: &'static str;
    const MESSAGES: Messages;
}

pub struct Services;

impl Resource for Services {
    const PATH: &'static str = "/services";
    const LIST_ENVELOPE: &'static str = "services";
    const ITEM_ENVELOPE: &'static str = "service";
    const LABEL: &'static str = "service";
    const MESSAGES: Messages = Messages {
        load_failed: "Could not load services",
        created: "Service added",
        create_failed: "Failed to add service",
        deleted: "Service deleted",
        delete_failed: "Delete failed",
    };
}

pub struct Media;

impl Resource for Media {
    const PATH: &'static str = "/media";
    const LIST_ENVELOPE: &'static str = "media";
    const ITEM_ENVELOPE: &'static str = "media";
    const LABEL: &'static str = "media";
    const MESSAGES: Messages = Messages {
        load_failed: "Could not load media",
        created: "Media uploaded",
        create_failed: "Failed to upload media",
        deleted: "Media deleted",
        delete_failed: "Delete failed",
    };
}

pub struct Quotes;

impl Resource for Quotes {
    const PATH: &'static str = "/quotes";
    const LIST_ENVELOPE: &'static str = "quotes";
    const ITEM_ENVELOPE: &'static str = "quote";
    const LABEL: &'static str = "quote";
    const MESSAGES: Messages = Messages {
        load_failed: "Could not load quotes",
        created: "Request sent — we'll contact you soon",
        create_failed: "Failed to send request",
        deleted: "Quote deleted",
        delete_failed: "Delete failed",
    };
}

/// Fetch the whole collection.
pub async fn list<R: Resource>(client: &ApiClient) -> Result<Vec<Record>, ApiError> {
    let body = client.get(R::PATH).await?;
    Ok(collect::<R>(body))
}

/// Fetch the collection for the public site: no bearer token, `timeout` per call.
pub async fn list_public<R: Resource>(client: &ApiClient, timeout: Duration) -> Result<Vec<Record>, ApiError> {
    let body = client.get_public_with_timeout(R::PATH, timeout).await?;
    Ok(collect::<R>(body))
}

fn collect<R: Resource>(body: Value) -> Vec<Record> {
    let records = records_from_list(body, R::LIST_ENVELOPE);
    info!("Loaded {} {} record(s)", records.len(), R::LABEL);
    records
}

/// Outcome of a create call.
#[derive(Debug, Clone, Default)]
pub struct Created {
    /// The new record, when the response carries one
    pub record: Option<Record>,
    /// Server confirmation text, if any
    pub message: Option<String>,
}

/// Create a record from multipart form data.
pub async fn create<R: Resource>(client: &ApiClient, form: Form) -> Result<Created, ApiError> {
    if client.token().is_none() {
        return Err(ApiError::Unauthenticated);
    }
    let body = client.post_multipart(R::PATH, form).await?;
    let message = server_message(&body);
    let record = record_from_create(body, R::ITEM_ENVELOPE);
    info!(
        "Created {} {}",
        R::LABEL,
        record.as_ref().and_then(Record::id).unwrap_or_else(|| "<no id>".to_string())
    );
    Ok(Created { record, message })
}

pub async fn delete<R: Resource>(client: &ApiClient, id: &str) -> Result<(), ApiError> {
    if client.token().is_none() {
        return Err(ApiError::Unauthenticated);
    }
    client.delete(&format!("{}/{}", R::PATH, id)).await?;
    info!("Deleted {} {}", R::LABEL, id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::storage::{LocalStore, TOKEN_KEY};
    use serde_json::json;
    use std::sync::Arc;
    use wiremock::{
        matchers::{header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn create_client(uri: &str, token: Option<&str>) -> ApiClient {
        let store = Arc::new(LocalStore::in_memory());
        if let Some(token) = token {
            store.set(TOKEN_KEY, token).expect("set token");
        }
        let config = Config {
            api_origin: uri.to_string(),
            ..Config::default()
        };
        ApiClient::new(&config, store)
    }

    #[tokio::test]
    async fn test_list_media_envelope() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/media"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "media": [{"_id": "m1", "mediaType": "video"}, {"_id": "m2"}]
            })))
            .mount(&mock_server)
            .await;

        let client = create_client(&mock_server.uri(), None);
        let items = list::<Media>(&client).await.expect("should list");
        assert_eq!(items.len(), 2);
        assert!(items[0].is_video());
    }

    #[tokio::test]
    async fn test_list_public_accepts_bare_array() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/services"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {"_id": "s1", "title_en": "Customs"},
                {"_id": "s2", "title_ar": "تخليص"}
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_client(&mock_server.uri(), None);
        let items = list_public::<Services>(&client, Duration::from_secs(10))
            .await
            .expect("should list");
        let ids: Vec<_> = items.iter().filter_map(Record::id).collect();
        assert_eq!(ids, vec!["s1", "s2"]);
    }

    #[tokio::test]
    async fn test_delete_uses_record_id_path() {
        let mock_server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/quotes/q-17"))
            .and(header("Authorization", "Bearer t"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "ok"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_client(&mock_server.uri(), Some("t"));
        delete::<Quotes>(&client, "q-17").await.expect("should delete");
    }

    #[tokio::test]
    async fn test_mutations_require_token() {
        let mock_server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let client = create_client(&mock_server.uri(), None);
        let err = delete::<Services>(&client, "1").await.unwrap_err();
        assert!(matches!(err, ApiError::Unauthenticated));
    }

    #[tokio::test]
    async fn test_create_returns_wrapped_record() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/services"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "message": "created",
                "service": {"_id": "s9", "title_en": "Customs"}
            })))
            .mount(&mock_server)
            .await;

        let client = create_client(&mock_server.uri(), Some("t"));
        let form = Form::new().text("title_en", "Customs");
        let created = create::<Services>(&client, form).await.expect("should create");
        assert_eq!(created.message.as_deref(), Some("created"));
        assert_eq!(created.record.and_then(|r| r.id()).as_deref(), Some("s9"));
    }
}
