//! The transport capability the dispatcher sends requests through.
//!
//! The library never opens sockets itself. Connection management, TLS,
//! redirects and timeouts all belong to the [`Transport`]. A
//! [`reqwest::Client`] is the default; tests and embedders can plug in
//! anything else.

use crate::error::BoxError;
use crate::request::TransportRequest;
use async_trait::async_trait;
use bytes::Bytes;
use http::HeaderMap;
use std::sync::Arc;

/// A response as received from the transport.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// Final URL of the response, after any redirects
    pub url: String,
    /// HTTP status code; `None` if the transport did not get an HTTP response
    pub status: Option<u16>,
    /// Response headers
    pub headers: HeaderMap,
    /// Full response body
    pub body: Bytes,
}

impl TransportResponse {
    /// An HTTP response with `status` and `body`.
    pub fn new(url: impl Into<String>, status: u16, body: impl Into<Bytes>) -> Self {
        TransportResponse {
            url: url.into(),
            status: Some(status),
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }
}

/// Sends one request and returns one response.
///
/// Implementations must be safe to share between concurrent calls and must
/// not retry on their own behalf.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform the round trip.
    ///
    /// Returns `Err` only when no response was received at all.
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, BoxError>;
}

#[async_trait]
impl Transport for reqwest::Client {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, BoxError> {
        let (parts, body) = request.into_parts();
        let reqwest_request = self
            .request(parts.method, parts.uri.to_string())
            .headers(parts.headers)
            .body(body)
            .build()?;

        let response = self.execute(reqwest_request).await?;
        let url = response.url().to_string();
        let status = Some(response.status().as_u16());
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(TransportResponse {
            url,
            status,
            headers,
            body,
        })
    }
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for Arc<T> {
    async fn send(&self, request: TransportRequest) -> Result<TransportResponse, BoxError> {
        (**self).send(request).await
    }
}
