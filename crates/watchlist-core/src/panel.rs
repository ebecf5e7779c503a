//! Result panels and the query dispatcher that feeds them.

use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::{Mutex, MutexGuard};
use tracing::{debug, info};
use watchlist_client::{ApiClient, ApiError};
use watchlist_models::CannedQuery;

use crate::render::{render, ResultView, TabularData};

/// Display state of one result panel
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryResult {
    pub title: String,
    pub loading: bool,
    pub data: TabularData,
    pub error: Option<String>,
    /// When the last response (or failure) landed
    pub updated_at: Option<DateTime<Utc>>,
}

impl QueryResult {
    pub fn pending(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            loading: true,
            ..Self::default()
        }
    }

    /// Fold a finished request into a fresh state
    pub fn settled(title: impl Into<String>, outcome: Result<Option<Value>, ApiError>) -> Self {
        let (data, error) = match outcome {
            Ok(value) => (TabularData::from_json(value), None),
            Err(e) => (TabularData::Null, Some(e.user_message())),
        };
        Self {
            title: title.into(),
            loading: false,
            data,
            error,
            updated_at: Some(Utc::now()),
        }
    }

    pub fn view(&self) -> ResultView {
        render(&self.title, &self.data, self.loading, self.error.as_deref())
    }

    /// Whether a dismissible panel has anything to show
    pub fn is_open(&self) -> bool {
        !self.data.is_null() || self.error.is_some()
    }

    /// Header of a dismissible panel: "Error", or the row count
    pub fn panel_label(&self) -> String {
        if self.error.is_some() {
            "Error".to_string()
        } else {
            format!("Results: {}", self.data.row_count().unwrap_or(0))
        }
    }
}

/// What to do with a response that arrives after a newer request was
/// dispatched on the same panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StalePolicy {
    /// Every response overwrites the panel; whichever lands last is shown
    #[default]
    LastWriteWins,
    /// Only the most recently dispatched request may update the panel
    DiscardStale,
}

impl StalePolicy {
    pub fn from_discard_flag(discard_stale: bool) -> Self {
        if discard_stale {
            StalePolicy::DiscardStale
        } else {
            StalePolicy::LastWriteWins
        }
    }
}

/// Handle for a dispatched request. Tokens increase per panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingRequest {
    token: u64,
    title: String,
}

impl PendingRequest {
    pub fn token(&self) -> u64 {
        self.token
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

#[derive(Debug, Default)]
struct PanelState {
    result: QueryResult,
    latest_token: u64,
}

/// A result panel: state transitions only, no I/O.
///
/// The lock is held for synchronous transitions only, never across a request.
#[derive(Debug, Default)]
pub struct QueryPanel {
    state: Mutex<PanelState>,
    policy: StalePolicy,
}

impl QueryPanel {
    pub fn new(policy: StalePolicy) -> Self {
        Self {
            state: Mutex::new(PanelState::default()),
            policy,
        }
    }

    fn lock(&self) -> MutexGuard<'_, PanelState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Reset to loading and issue the next token
    pub fn begin(&self, title: impl Into<String>) -> PendingRequest {
        let title = title.into();
        let mut state = self.lock();
        state.latest_token += 1;
        state.result = QueryResult::pending(title.clone());
        PendingRequest {
            token: state.latest_token,
            title,
        }
    }

    /// Land a finished request. Returns false when the policy discarded it.
    pub fn complete(&self, request: PendingRequest, outcome: Result<Option<Value>, ApiError>) -> bool {
        let mut state = self.lock();
        if self.policy == StalePolicy::DiscardStale && request.token < state.latest_token {
            debug!(
                token = request.token,
                latest = state.latest_token,
                title = %request.title,
                "Discarding stale response"
            );
            return false;
        }
        state.result = QueryResult::settled(request.title, outcome);
        true
    }

    /// Clear data and error. Leaves `loading` alone and does not affect a
    /// request in flight; its response still lands when it arrives.
    pub fn dismiss(&self) {
        let mut state = self.lock();
        state.result.data = TabularData::Null;
        state.result.error = None;
    }

    pub fn snapshot(&self) -> QueryResult {
        self.lock().result.clone()
    }
}

/// Runs GET queries against one panel
pub struct QueryDispatcher {
    client: ApiClient,
    panel: QueryPanel,
}

impl QueryDispatcher {
    pub fn new(client: ApiClient, policy: StalePolicy) -> Self {
        Self {
            client,
            panel: QueryPanel::new(policy),
        }
    }

    pub fn panel(&self) -> &QueryPanel {
        &self.panel
    }

    /// Dispatch one GET to `endpoint` and land the outcome on the panel.
    /// Returns the panel state after this request settled, which may belong
    /// to another request if responses raced.
    pub async fn run_query(&self, endpoint: &str, title: &str) -> QueryResult {
        let request = self.panel.begin(title);
        info!(endpoint, title, token = request.token(), "Running query");

        let outcome = self.client.fetch_json(endpoint, &[]).await;
        if let Err(e) = &outcome {
            debug!(endpoint, error = %e, "Query failed");
        }

        self.panel.complete(request, outcome);
        self.panel.snapshot()
    }

    pub async fn run_canned(&self, query: CannedQuery) -> QueryResult {
        self.run_query(query.endpoint(), query.title()).await
    }
}
