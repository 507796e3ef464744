//! The client facade.
//!
//! # Examples
//!
//! ## Awaiting a result
//!
//! ```ignore
//! use declarative_connect::{ConnectClient, Endpoint};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ConnectClient::new("https://api.example.com/v1");
//!     let todos: Vec<serde_json::Value> = client
//!         .dispatch(Endpoint::get("/todos").with_query("done", false))
//!         .await?;
//!     println!("{} open todos", todos.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Consuming a stream
//!
//! ```ignore
//! use declarative_connect::{ConnectClient, Endpoint};
//! use futures::StreamExt;
//!
//! let client = ConnectClient::new("https://api.example.com/v1");
//! let titles = client
//!     .dispatch_stream(Endpoint::<Vec<serde_json::Value>>::get("/todos"))
//!     .map(|result| result.map(|todos| todos.len()));
//! ```

use super::config::ClientConfig;
use super::dispatcher::Dispatcher;
use super::logger::Logger;
use super::stream::DispatchStream;
use super::transport::Transport;
use crate::error::Result;
use crate::request::ConnectRequest;
use std::sync::Arc;
use std::time::Duration;

/// Dispatches [`ConnectRequest`] descriptors against one base URL.
///
/// Cloning is cheap; clones share the transport. Concurrent calls are
/// independent of each other.
pub struct ConnectClient<T = reqwest::Client> {
    base_url: Arc<str>,
    dispatcher: Dispatcher<T>,
    config: Arc<ClientConfig>,
}

impl<T> Clone for ConnectClient<T> {
    fn clone(&self) -> Self {
        ConnectClient {
            base_url: self.base_url.clone(),
            dispatcher: self.dispatcher.clone(),
            config: self.config.clone(),
        }
    }
}

impl ConnectClient<reqwest::Client> {
    /// Create a client with default configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_config(base_url, ClientConfig::default())
    }

    /// Create a client backed by a reqwest client built from `config`
    pub fn with_config(base_url: impl Into<String>, config: ClientConfig) -> Self {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .user_agent(config.user_agent.clone());

        if !config.proxy_url.is_empty() {
            match reqwest::Proxy::all(&config.proxy_url) {
                Ok(proxy) => builder = builder.proxy(proxy),
                Err(e) => tracing::warn!("Ignoring invalid proxy {}: {}", config.proxy_url, e),
            }
        }

        let client = builder.build().unwrap_or_else(|e| {
            tracing::warn!("Falling back to default HTTP client: {}", e);
            reqwest::Client::default()
        });

        Self::with_transport(base_url, client, config)
    }
}

impl<T: Transport + 'static> ConnectClient<T> {
    /// Create a client over a custom transport
    pub fn with_transport(base_url: impl Into<String>, transport: T, config: ClientConfig) -> Self {
        let base_url: String = base_url.into();
        ConnectClient {
            base_url: Arc::from(base_url),
            dispatcher: Dispatcher::new(transport, Logger::new(config.log_level)),
            config: Arc::new(config),
        }
    }

    /// Dispatch `request` and wait for the decoded result.
    ///
    /// A descriptor that cannot be materialized fails with
    /// [`NetworkError::InvalidRequest`](crate::NetworkError::InvalidRequest)
    /// before the transport is touched.
    pub async fn dispatch<R: ConnectRequest>(&self, request: R) -> Result<R::Output> {
        let transport_request = request
            .as_transport_request(&self.base_url)
            .inspect_err(|e| self.dispatcher.logger().log_rejected(&request.path(), e))?;
        self.dispatcher.logger().log_request(&transport_request);

        let decoder = request.decoder();
        self.dispatcher
            .dispatch(transport_request, decoder.as_ref())
            .await
    }

    /// Dispatch `request` as a single-result stream.
    ///
    /// Behaves exactly like [`dispatch`](Self::dispatch) once polled.
    pub fn dispatch_stream<R>(&self, request: R) -> DispatchStream<R::Output>
    where
        R: ConnectRequest + 'static,
    {
        let client = self.clone();
        DispatchStream::new(async move { client.dispatch(request).await })
    }

    /// Base URL every descriptor path is appended to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Client configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The transport requests are sent through
    pub fn transport(&self) -> &T {
        self.dispatcher.transport()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::LogLevel;

    #[test]
    fn test_client_creation() {
        let client = ConnectClient::new("https://api.example.com");
        assert_eq!(client.base_url(), "https://api.example.com");
        assert_eq!(client.config().log_level, LogLevel::Debug);
    }

    #[test]
    fn test_client_with_config() {
        let config = ClientConfig {
            log_level: LogLevel::Off,
            proxy_url: "http://127.0.0.1:3128".into(),
            ..Default::default()
        };
        let client = ConnectClient::with_config("http://localhost", config.clone());
        assert_eq!(client.config(), &config);
        assert_eq!(client.clone().base_url(), "http://localhost");
    }
}
