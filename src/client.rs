use anyhow::Context;
use async_trait::async_trait;
use reqwest::Method;
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde_json::Value;
use std::sync::Arc;
use tracing::{Level, event, instrument};

use crate::error::{Error, Result};
use crate::retry::RetryPolicy;

pub const JSON_CONTENT_TYPE: &str = "application/json";
pub const JSON_PATCH_CONTENT_TYPE: &str = "application/json-patch+json";

/// A fully built request, as handed to a [`Transport`].
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: HeaderMap,
    pub body: Option<String>,
}

/// Status and raw body of a response.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

/// The raw HTTP exchange. Status handling and retries live in [`Client`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> anyhow::Result<HttpResponse>;
}

/// [`Transport`] backed by a `reqwest::Client`.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Creates a transport with a default `reqwest::Client`.
    pub fn new() -> Self {
        ReqwestTransport {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> anyhow::Result<HttpResponse> {
        let mut builder = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers);
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .context("failed to read response body")?;
        Ok(HttpResponse { status, body })
    }
}

/// Sends requests to one REST endpoint with retries.
#[derive(Clone)]
pub struct Client {
    transport: Arc<dyn Transport>,
    endpoint: String,
    base_headers: HeaderMap,
    retry: RetryPolicy,
}

impl Client {
    /// Creates a client over HTTP. `access_token` becomes a bearer header.
    pub fn new(endpoint: &str, access_token: Option<&str>) -> Result<Self> {
        Self::with_transport(endpoint, access_token, Arc::new(ReqwestTransport::new()))
    }

    /// Creates a client that sends through `transport`.
    pub fn with_transport(
        endpoint: &str,
        access_token: Option<&str>,
        transport: Arc<dyn Transport>,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static(JSON_CONTENT_TYPE),
        );
        if let Some(token) = access_token {
            let mut value = HeaderValue::from_str(&format!("Bearer {token}"))?;
            value.set_sensitive(true);
            headers.insert(header::AUTHORIZATION, value);
        }
        Ok(Client {
            transport,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            base_headers: headers,
            retry: RetryPolicy::default(),
        })
    }

    /// Replaces the default retry policy.
    #[must_use]
    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Base URL without a trailing slash.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Headers sent with every request.
    pub fn base_headers(&self) -> &HeaderMap {
        &self.base_headers
    }

    /// The active retry policy.
    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Sends a request and returns the parsed JSON body.
    ///
    /// A 409 response is handed back as data rather than an error.
    #[instrument(level = "debug", skip(self, params, payload), fields(payload = ?payload))]
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
        payload: Option<&Value>,
    ) -> Result<Value> {
        let request = self.build_request(method, path, params, payload);
        let attempts = self.retry.attempts();

        let mut attempt = 0;
        loop {
            match self.attempt(request.clone()).await {
                Ok(body) => return Ok(body),
                Err(err) if attempt + 1 < attempts => {
                    let delay = self.retry.delay_for(attempt);
                    event!(
                        Level::WARN,
                        error = %err,
                        "retrying {}/{} in {:?}",
                        attempt + 2,
                        attempts,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => {
                    event!(Level::ERROR, error = %err, attempts, "all retries exhausted");
                    return Err(Error::RetriesExhausted {
                        attempts,
                        source: err.into(),
                    });
                }
            }
        }
    }

    fn build_request(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
        payload: Option<&Value>,
    ) -> HttpRequest {
        let mut headers = self.base_headers.clone();
        if method == Method::PATCH {
            headers.insert(
                header::CONTENT_TYPE,
                HeaderValue::from_static(JSON_PATCH_CONTENT_TYPE),
            );
        }
        HttpRequest {
            method,
            url: format!("{}{}", self.endpoint, path),
            query: params
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            headers,
            body: payload.map(Value::to_string),
        }
    }

    async fn attempt(&self, request: HttpRequest) -> anyhow::Result<Value> {
        let response = self.transport.send(request).await?;
        event!(Level::TRACE, status = response.status, response = %response.body);

        if response.status == 409 {
            event!(Level::WARN, body = %response.body, "conflict; returning server response");
        } else if response.status > 299 {
            return Err(anyhow::anyhow!(
                "Request failed with status {}: {}",
                response.status,
                response.body
            ));
        }
        serde_json::from_str::<Value>(&response.body).context("response body is not valid JSON")
    }
}
