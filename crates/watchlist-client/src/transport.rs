use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;
use watchlist_config::Config;

use crate::error::TransportError;

/// Status and undecoded body of an HTTP response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// The HTTP boundary. Paths are absolute (`/api/...`) and resolved against
/// whatever origin the implementation is bound to.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<RawResponse, TransportError>;

    async fn post_json(&self, path: &str, body: &Value) -> Result<RawResponse, TransportError>;
}

/// [`Transport`] over a shared reqwest client
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, TransportError> {
        let mut builder = Client::builder().user_agent(config.server.user_agent.clone());
        if let Some(seconds) = config.server.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(seconds));
        }
        Ok(Self::new(builder.build()?, config.base_url()))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn finish(response: reqwest::Response) -> RawResponse {
        let status = response.status().as_u16();
        // A body that cannot be read is treated like an empty one
        let body = response.text().await.unwrap_or_default();
        RawResponse { status, body }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<RawResponse, TransportError> {
        let url = self.url(path);
        debug!(method = "GET", url = %url, params = ?query, "Sending request");

        let response = self
            .client
            .get(&url)
            .query(query)
            .header("Accept", "application/json")
            .send()
            .await?;

        let raw = Self::finish(response).await;
        debug!(method = "GET", url = %url, status = raw.status, bytes = raw.body.len(), "Received response");
        Ok(raw)
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<RawResponse, TransportError> {
        let url = self.url(path);
        debug!(method = "POST", url = %url, "Sending request");

        let response = self
            .client
            .post(&url)
            .json(body)
            .header("Accept", "application/json")
            .send()
            .await?;

        let raw = Self::finish(response).await;
        debug!(method = "POST", url = %url, status = raw.status, "Received response");
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let transport = ReqwestTransport::new(Client::new(), "http://localhost:5000/");
        assert_eq!(transport.base_url(), "http://localhost:5000");
        assert_eq!(transport.url("/api/health"), "http://localhost:5000/api/health");
    }

    #[test]
    fn test_from_config_uses_server_section() {
        let mut config = Config::default();
        config.server.base_url = "https://watch.example.com/".to_string();
        config.server.timeout_seconds = Some(5);

        let transport = ReqwestTransport::from_config(&config).unwrap();
        assert_eq!(transport.base_url(), "https://watch.example.com");
    }
}
