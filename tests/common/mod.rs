#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{Value, json};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::time::Instant;
use wikibase_rest::{Connection, ConnectionConfig, HttpRequest, HttpResponse, RetrySettings, Transport};

pub const ENDPOINT: &str = "https://test.wikidata.org/w/rest.php/wikibase/v0";

/// Replays scripted responses in order and records every request it sees.
/// Once the script runs out every call fails.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<anyhow::Result<HttpResponse>>>,
    requests: Mutex<Vec<(Instant, HttpRequest)>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_raw(&self, status: u16, body: &str) {
        self.responses.lock().unwrap().push_back(Ok(HttpResponse {
            status,
            body: body.to_string(),
        }));
    }

    pub fn push_json(&self, status: u16, body: Value) {
        self.push_raw(status, &body.to_string());
    }

    pub fn push_error(&self, message: &str) {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(anyhow::anyhow!(message.to_string())));
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|(_, r)| r.clone())
            .collect()
    }

    pub fn request_times(&self) -> Vec<Instant> {
        self.requests.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: HttpRequest) -> anyhow::Result<HttpResponse> {
        self.requests
            .lock()
            .unwrap()
            .push((Instant::now(), request));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(anyhow::anyhow!("connection refused")))
    }
}

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A connection over `transport` that gives up after the first failure.
pub fn connection(transport: Arc<MockTransport>) -> Arc<Connection> {
    init_tracing();
    let config = ConnectionConfig {
        endpoint: ENDPOINT.to_string(),
        access_token: Some("test-token".to_string()),
        retry: RetrySettings {
            max_retries: 1,
            ..Default::default()
        },
        ..Default::default()
    };
    Connection::from_config_with_transport(&config, transport).unwrap()
}

pub fn body_of(request: &HttpRequest) -> Value {
    serde_json::from_str(request.body.as_deref().unwrap_or("null")).unwrap()
}

pub fn item_q42() -> Value {
    json!({
        "id": "Q42",
        "type": "item",
        "labels": {"en": "Douglas Adams"},
        "descriptions": {"en": "English writer and humourist"},
        "aliases": {"en": ["Douglas Noël Adams"]},
        "statements": {
            "P31": [{
                "id": "Q42$F078E5B3-F9A8-480E-B7AC-D97778CBBEF9",
                "rank": "normal",
                "property": {"id": "P31", "data_type": "wikibase-item"},
                "value": {"type": "value", "content": "Q5"},
                "qualifiers": [],
                "references": [{
                    "hash": "fa278ebfc458360e5aed63d5058cca83c46134f1",
                    "parts": [{
                        "property": {"id": "P214", "data_type": "external-id"},
                        "value": {"type": "value", "content": "113230702"},
                    }],
                }],
            }],
        },
        "sitelinks": {
            "enwiki": {
                "title": "Douglas Adams",
                "badges": [],
                "url": "https://en.wikipedia.org/wiki/Douglas_Adams",
            },
        },
    })
}
