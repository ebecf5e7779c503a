//! In-memory transport for exercising dispatch paths without a server.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use watchlist_client::{RawResponse, Transport, TransportError};

#[derive(Debug, Clone)]
pub struct Reply {
    status: u16,
    body: String,
    delay: Option<Duration>,
}

impl Reply {
    pub fn json(status: u16, body: Value) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn text(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            delay: None,
        }
    }

    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// Routes by path. Unrouted paths fail like an unreachable server.
#[derive(Default)]
pub struct FakeTransport {
    routes: HashMap<String, Reply>,
    gets: Mutex<Vec<(String, Vec<(String, String)>)>>,
    posts: Mutex<Vec<(String, Value)>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn route(mut self, path: &str, reply: Reply) -> Self {
        self.routes.insert(path.to_string(), reply);
        self
    }

    pub fn gets(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.gets.lock().unwrap().clone()
    }

    pub fn posts(&self) -> Vec<(String, Value)> {
        self.posts.lock().unwrap().clone()
    }

    async fn answer(&self, path: &str) -> Result<RawResponse, TransportError> {
        let reply = self
            .routes
            .get(path)
            .cloned()
            .ok_or_else(|| TransportError::Connection(format!("no route to {}", path)))?;
        if let Some(delay) = reply.delay {
            tokio::time::sleep(delay).await;
        }
        Ok(RawResponse {
            status: reply.status,
            body: reply.body,
        })
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn get(&self, path: &str, query: &[(&str, String)]) -> Result<RawResponse, TransportError> {
        let params = query.iter().map(|(k, v)| (k.to_string(), v.clone())).collect();
        self.gets.lock().unwrap().push((path.to_string(), params));
        self.answer(path).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<RawResponse, TransportError> {
        self.posts.lock().unwrap().push((path.to_string(), body.clone()));
        self.answer(path).await
    }
}
