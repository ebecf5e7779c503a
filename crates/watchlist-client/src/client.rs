use serde_json::Value;
use std::sync::Arc;
use tracing::debug;
use watchlist_config::Config;
use watchlist_models::{CannedQuery, MediaEntry, SearchQuery};

use crate::endpoints;
use crate::error::{ApiError, TransportError};
use crate::response::ApiResponse;
use crate::transport::{ReqwestTransport, Transport};

/// One method per backend endpoint. Cheap to clone; clones share the transport.
#[derive(Clone)]
pub struct ApiClient {
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        Ok(Self::new(Arc::new(ReqwestTransport::from_config(config)?)))
    }

    /// GET and return whatever came back. Only transport failures are errors.
    pub async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<ApiResponse, ApiError> {
        let raw = self.transport.get(path, query).await?;
        Ok(ApiResponse::from(raw))
    }

    /// GET and fold non-2xx statuses into [`ApiError::Http`].
    /// A 2xx with an empty or unparsable body yields `Ok(None)`.
    pub async fn fetch_json(&self, path: &str, query: &[(&str, String)]) -> Result<Option<Value>, ApiError> {
        let response = self.get(path, query).await?;
        if !response.is_success() {
            debug!(path, status = response.status, "Request rejected by server");
            return Err(ApiError::Http {
                status: response.status,
                message: response.server_message(),
            });
        }
        Ok(response.body)
    }

    pub async fn health(&self) -> Result<ApiResponse, ApiError> {
        self.get(endpoints::HEALTH, &[]).await
    }

    pub async fn db_ping(&self) -> Result<ApiResponse, ApiError> {
        self.get(endpoints::DB_PING, &[]).await
    }

    pub async fn canned(&self, query: CannedQuery) -> Result<Option<Value>, ApiError> {
        self.fetch_json(query.endpoint(), &[]).await
    }

    pub async fn search(&self, query: &SearchQuery) -> Result<Option<Value>, ApiError> {
        self.fetch_json(endpoints::SEARCH, &query.params()).await
    }

    /// POST a new entry. The caller decides what counts as success, since the
    /// backend may signal it through the status code or the body.
    pub async fn create_media_entry(&self, entry: &MediaEntry) -> Result<ApiResponse, ApiError> {
        let body = serde_json::to_value(entry)?;
        let raw = self.transport.post_json(endpoints::MEDIA_ENTRIES, &body).await?;
        Ok(ApiResponse::from(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::RawResponse;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;
    use watchlist_models::{SearchCategory, SortKey};

    #[derive(Default)]
    struct RecordingTransport {
        response: Option<RawResponse>,
        requests: Mutex<Vec<(String, Vec<(String, String)>, Option<Value>)>>,
    }

    impl RecordingTransport {
        fn replying(status: u16, body: &str) -> Self {
            Self {
                response: Some(RawResponse {
                    status,
                    body: body.to_string(),
                }),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn reply(&self) -> Result<RawResponse, TransportError> {
            self.response
                .clone()
                .ok_or_else(|| TransportError::Connection("connection refused".to_string()))
        }
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<RawResponse, TransportError> {
            let params = query.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
            self.requests.lock().unwrap().push((path.to_string(), params, None));
            self.reply()
        }

        async fn post_json(&self, path: &str, body: &Value) -> Result<RawResponse, TransportError> {
            self.requests.lock().unwrap().push((path.to_string(), Vec::new(), Some(body.clone())));
            self.reply()
        }
    }

    #[tokio::test]
    async fn test_search_sends_all_params() {
        let transport = Arc::new(RecordingTransport::replying(200, r#"[{"medianame":"The Matrix","rating":5}]"#));
        let client = ApiClient::new(transport.clone());
        let query = SearchQuery::new("matrix", SearchCategory::Media, SortKey::RatingDesc).unwrap();

        let data = client.search(&query).await.unwrap();
        assert_eq!(data, Some(json!([{"medianame": "The Matrix", "rating": 5}])));

        let requests = transport.requests.lock().unwrap();
        assert_eq!(requests[0].0, "/api/search");
        assert_eq!(
            requests[0].1,
            vec![
                ("q".to_string(), "matrix".to_string()),
                ("category".to_string(), "media".to_string()),
                ("sort".to_string(), "rating_desc".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_fetch_json_folds_http_errors() {
        let client = ApiClient::new(Arc::new(RecordingTransport::replying(500, r#"{"error":"Query failed"}"#)));
        match client.canned(CannedQuery::TopRatedMedia).await {
            Err(ApiError::Http { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message.as_deref(), Some("Query failed"));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_json_tolerates_empty_body() {
        let client = ApiClient::new(Arc::new(RecordingTransport::replying(200, "")));
        let data = client.canned(CannedQuery::LowRatedRecent).await.unwrap();
        assert_eq!(data, None);
    }

    #[tokio::test]
    async fn test_network_failure() {
        let client = ApiClient::new(Arc::new(RecordingTransport::default()));
        let err = client.health().await.unwrap_err();
        assert!(err.is_network());
    }

    #[tokio::test]
    async fn test_create_media_entry_posts_json() {
        let transport = Arc::new(RecordingTransport::replying(201, r#"{"status":"ok"}"#));
        let client = ApiClient::new(transport.clone());
        let entry = MediaEntry {
            firstname: "John".to_string(),
            lastname: "Doe".to_string(),
            profilename: "jdoe".to_string(),
            mediatype: "Movie".to_string(),
            medianame: "Inception".to_string(),
            description: String::new(),
            releaseyear: Some(2010),
            genre: "Sci-Fi".to_string(),
            rating: Some(5),
            ratingtext: String::new(),
            status: "Completed".to_string(),
            platform: "Netflix".to_string(),
        };

        let response = client.create_media_entry(&entry).await.unwrap();
        assert_eq!(response.status_field(), Some("ok"));

        let requests = transport.requests.lock().unwrap();
        assert_eq!(requests[0].0, "/api/media-entries");
        let body = requests[0].2.as_ref().unwrap();
        assert_eq!(body["releaseyear"], 2010);
        assert_eq!(body["medianame"], "Inception");
    }
}
