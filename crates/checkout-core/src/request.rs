//! # Request Sender
//!
//! The HTTP capability the SDK issues storefront requests through. The SDK
//! never talks to a transport directly; an implementation is injected
//! (`checkout-sdk` ships one backed by `reqwest`).

use crate::error::{CheckoutError, CheckoutResult};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Options for a single request at the transport level
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HttpRequestOptions {
    /// Query string parameters
    pub params: BTreeMap<String, String>,
    /// JSON body
    pub body: Option<Value>,
    /// Abort the request after this long
    pub timeout: Option<Duration>,
}

impl HttpRequestOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: add a query parameter
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Builder: set the JSON body
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Builder: set an optional timeout
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Caller-facing options for a resource request
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions<P = ()> {
    pub params: P,
    pub timeout: Option<Duration>,
}

impl<P: Default> RequestOptions<P> {
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            params: P::default(),
            timeout: Some(timeout),
        }
    }
}

/// Query parameters accepted by checkout endpoints
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CheckoutParams {
    /// Extra resources to embed, e.g. `cart.lineItems.physicalItems.options`
    pub include: Vec<String>,
}

/// A response from the storefront API
#[derive(Debug, Clone, PartialEq)]
pub struct Response<T> {
    pub body: T,
    pub status: u16,
    pub headers: BTreeMap<String, String>,
}

impl<T> Response<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Response<U> {
        Response {
            body: f(self.body),
            status: self.status,
            headers: self.headers,
        }
    }
}

impl Response<Value> {
    /// Deserialize the JSON body into `T`
    pub fn json<T: DeserializeOwned>(self) -> CheckoutResult<Response<T>> {
        let body = serde_json::from_value(self.body).map_err(|e| {
            CheckoutError::Serialization(format!("Failed to parse response body: {}", e))
        })?;

        Ok(Response {
            body,
            status: self.status,
            headers: self.headers,
        })
    }
}

/// Capability for issuing HTTP requests.
#[async_trait(?Send)]
pub trait RequestSender {
    /// Send a request; relative URLs resolve against the storefront host.
    async fn send(
        &self,
        method: Method,
        url: &str,
        options: HttpRequestOptions,
    ) -> CheckoutResult<Response<Value>>;

    async fn get(&self, url: &str, options: HttpRequestOptions) -> CheckoutResult<Response<Value>> {
        self.send(Method::Get, url, options).await
    }

    async fn post(&self, url: &str, options: HttpRequestOptions) -> CheckoutResult<Response<Value>> {
        self.send(Method::Post, url, options).await
    }

    async fn put(&self, url: &str, options: HttpRequestOptions) -> CheckoutResult<Response<Value>> {
        self.send(Method::Put, url, options).await
    }

    async fn delete(
        &self,
        url: &str,
        options: HttpRequestOptions,
    ) -> CheckoutResult<Response<Value>> {
        self.send(Method::Delete, url, options).await
    }
}
