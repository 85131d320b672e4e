//! # HTTP Request Sender
//!
//! `reqwest` implementation of the [`RequestSender`] capability. Relative
//! URLs resolve against the storefront origin.

use crate::config::SdkConfig;
use async_trait::async_trait;
use checkout_core::{
    CheckoutError, CheckoutResult, HttpRequestOptions, Method, RequestSender, Response,
};
use reqwest::Client;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;
use tracing::{debug, error, instrument};

/// Storefront API client
#[derive(Debug, Clone)]
pub struct HttpRequestSender {
    client: Client,
    base_url: String,
    default_timeout: Option<Duration>,
}

impl HttpRequestSender {
    /// Create a sender rooted at `base_url`
    pub fn new(base_url: impl Into<String>) -> CheckoutResult<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| CheckoutError::Configuration(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            default_timeout: None,
        })
    }

    /// Create from SDK configuration
    pub fn from_config(config: &SdkConfig) -> CheckoutResult<Self> {
        Ok(Self::new(&config.storefront_url)?.with_default_timeout(config.request_timeout()))
    }

    /// Builder: timeout applied when a request does not set its own
    pub fn with_default_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.default_timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Resolve `url` against the storefront origin
    pub fn resolve(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("{}/{}", self.base_url, url.trim_start_matches('/'))
        }
    }

    fn reqwest_method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        }
    }

    fn transport_error(err: reqwest::Error) -> CheckoutError {
        if err.is_timeout() {
            CheckoutError::Timeout(err.to_string())
        } else {
            CheckoutError::Network(err.to_string())
        }
    }

    /// Best human-readable message in a storefront error body
    fn error_message(body: &Value, raw: &str) -> String {
        ["title", "detail", "message"]
            .iter()
            .find_map(|key| body.get(*key).and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_else(|| raw.to_string())
    }
}

#[async_trait(?Send)]
impl RequestSender for HttpRequestSender {
    #[instrument(skip(self, options), fields(method = %method))]
    async fn send(
        &self,
        method: Method,
        url: &str,
        options: HttpRequestOptions,
    ) -> CheckoutResult<Response<Value>> {
        let url = self.resolve(url);
        debug!("{} {} params={:?}", method, url, options.params);

        let mut request = self
            .client
            .request(Self::reqwest_method(method), &url)
            .header("Accept", "application/json");

        if !options.params.is_empty() {
            request = request.query(&options.params);
        }
        if let Some(body) = &options.body {
            request = request.json(body);
        }
        if let Some(timeout) = options.timeout.or(self.default_timeout) {
            request = request.timeout(timeout);
        }

        let response = request.send().await.map_err(Self::transport_error)?;

        let status = response.status();
        let headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.to_string(), value.to_string()))
            })
            .collect();
        let text = response.text().await.map_err(Self::transport_error)?;

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(body) => body,
                Err(_) if !status.is_success() => Value::String(text.clone()),
                Err(e) => {
                    error!("Storefront returned invalid JSON from {}: {}", url, e);
                    return Err(CheckoutError::Serialization(format!(
                        "Invalid JSON from {}: {}",
                        url, e
                    )));
                }
            }
        };

        if !status.is_success() {
            error!("Storefront API error: {} - {}", status, text);
            return Err(CheckoutError::RequestFailed {
                status: status.as_u16(),
                message: Self::error_message(&body, &text),
            });
        }

        Ok(Response {
            body,
            status: status.as_u16(),
            headers,
        })
    }
}
