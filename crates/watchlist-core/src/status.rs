use serde::Serialize;
use watchlist_client::{ApiClient, ApiError, ApiResponse};

pub const UNKNOWN: &str = "unknown";
pub const UNREACHABLE: &str = "unreachable";

/// Liveness of the API layer and of its database
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BackendStatus {
    pub api: String,
    pub database: String,
}

impl BackendStatus {
    pub fn is_healthy(&self) -> bool {
        self.api == "ok" && self.database == "ok"
    }
}

/// The `status` the service reported. Any answer with a JSON body counts as
/// reachable, whatever the HTTP status.
pub fn service_status(result: Result<ApiResponse, ApiError>) -> String {
    match result {
        Ok(response) if response.body.is_some() => response
            .status_field()
            .filter(|status| !status.is_empty())
            .unwrap_or(UNKNOWN)
            .to_string(),
        _ => UNREACHABLE.to_string(),
    }
}

/// Ping both endpoints concurrently
pub async fn check_backend(client: &ApiClient) -> BackendStatus {
    let (api, database) = futures::join!(client.health(), client.db_ping());
    let status = BackendStatus {
        api: service_status(api),
        database: service_status(database),
    };
    tracing::debug!(api = %status.api, database = %status.database, "Backend status");
    status
}
