//! Client configuration.

/// How much the client logs about each call.
///
/// Messages are emitted through `tracing`, so a subscriber must be installed
/// and its filter must let them through as well.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum LogLevel {
    /// Nothing
    Off,
    /// Method, URL, headers and body preview of requests; status and URL of responses
    Info,
    /// Everything in `Info`, plus a curl reconstruction of each request and the
    /// JSON body of each response
    #[default]
    Debug,
}

/// Configuration for [`ConnectClient`](crate::ConnectClient).
///
/// # Examples
///
/// ```
/// use declarative_connect::{ClientConfig, LogLevel};
///
/// let config = ClientConfig {
///     log_level: LogLevel::Info,
///     request_timeout_ms: 5_000,
///     ..Default::default()
/// };
/// assert!(config.proxy_url.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Logging verbosity
    pub log_level: LogLevel,
    /// Whole-request timeout applied by the default reqwest transport
    pub request_timeout_ms: u64,
    /// Proxy for all traffic; empty means none
    pub proxy_url: String,
    /// `User-Agent` sent by the default reqwest transport
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            log_level: LogLevel::Debug,
            request_timeout_ms: 30_000,
            proxy_url: String::new(),
            user_agent: concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.request_timeout_ms, 30_000);
        assert!(config.user_agent.starts_with("declarative_connect/"));
    }

    #[test]
    fn test_level_ordering() {
        assert!(LogLevel::Off < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Debug);
    }
}
