//! Error types for declarative requests.
//!
//! Every failure a dispatch can produce is one [`NetworkError`] variant. The set
//! is closed: callers can match exhaustively instead of inspecting strings.
//!
//! # Categories
//!
//! | Category | Variants | Raised |
//! |----------|----------|--------|
//! | Malformed request | `InvalidRequest` | before any network activity |
//! | HTTP status | `BadRequest` .. `Error5xx` | after a non-2xx response |
//! | Decoding | `Decoding` | 2xx response whose body did not decode |
//! | Transport | `TransportFailed` | connectivity, TLS, timeouts |
//! | Unknown | `Unknown` | anything else, e.g. a non-HTTP response |
//!
//! HTTP status variants keep the raw response body, when there was one, so the
//! caller can inspect the server's error payload.

use bytes::Bytes;

/// Boxed error produced by a [`Transport`](crate::client::Transport).
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type for declarative requests
pub type Result<T> = std::result::Result<T, NetworkError>;

/// Errors that can occur while dispatching a request.
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// The descriptor could not be turned into a wire request.
    #[error("invalid request: {reason}")]
    InvalidRequest {
        /// Why materialization failed
        reason: String,
    },

    /// HTTP 400
    #[error("bad request")]
    BadRequest(Option<Bytes>),

    /// HTTP 401
    #[error("unauthorized")]
    Unauthorized(Option<Bytes>),

    /// HTTP 403
    #[error("forbidden")]
    Forbidden(Option<Bytes>),

    /// HTTP 404
    #[error("not found")]
    NotFound(Option<Bytes>),

    /// HTTP 402 or 405..=499
    #[error("client error: HTTP {code}")]
    Error4xx {
        /// Status code
        code: u16,
        /// Raw response body
        data: Option<Bytes>,
    },

    /// HTTP 500
    #[error("internal server error")]
    ServerError(Option<Bytes>),

    /// HTTP 503
    #[error("service unavailable: HTTP {code}")]
    ServiceError {
        /// Status code
        code: u16,
        /// Raw response body
        data: Option<Bytes>,
    },

    /// HTTP 501, 502 or 504..=599
    #[error("server error: HTTP {code}")]
    Error5xx {
        /// Status code
        code: u16,
        /// Raw response body
        data: Option<Bytes>,
    },

    /// A successful response body did not decode into the expected type.
    #[error("decoding error: {0}")]
    Decoding(String),

    /// The transport itself failed before a response arrived.
    #[error("transport failed: {0}")]
    TransportFailed(#[source] BoxError),

    /// Anything not otherwise classified.
    #[error("unknown error")]
    Unknown(Option<Bytes>),
}

impl NetworkError {
    /// Map a non-success HTTP status code to its error variant.
    ///
    /// | Status | Variant |
    /// |--------|---------|
    /// | 400 | `BadRequest` |
    /// | 401 | `Unauthorized` |
    /// | 403 | `Forbidden` |
    /// | 404 | `NotFound` |
    /// | 402, 405-499 | `Error4xx` |
    /// | 500 | `ServerError` |
    /// | 503 | `ServiceError` |
    /// | 501, 502, 504-599 | `Error5xx` |
    /// | anything else | `Unknown` |
    ///
    /// # Examples
    ///
    /// ```
    /// use declarative_connect::NetworkError;
    ///
    /// assert!(matches!(NetworkError::from_status(404, None), NetworkError::NotFound(None)));
    /// assert!(matches!(
    ///     NetworkError::from_status(418, None),
    ///     NetworkError::Error4xx { code: 418, .. }
    /// ));
    /// ```
    pub fn from_status(code: u16, data: Option<Bytes>) -> Self {
        match code {
            400 => NetworkError::BadRequest(data),
            401 => NetworkError::Unauthorized(data),
            403 => NetworkError::Forbidden(data),
            404 => NetworkError::NotFound(data),
            402 | 405..=499 => NetworkError::Error4xx { code, data },
            500 => NetworkError::ServerError(data),
            503 => NetworkError::ServiceError { code, data },
            501 | 502 | 504..=599 => NetworkError::Error5xx { code, data },
            _ => NetworkError::Unknown(data),
        }
    }

    /// The HTTP status code this error was derived from, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            NetworkError::BadRequest(_) => Some(400),
            NetworkError::Unauthorized(_) => Some(401),
            NetworkError::Forbidden(_) => Some(403),
            NetworkError::NotFound(_) => Some(404),
            NetworkError::ServerError(_) => Some(500),
            NetworkError::Error4xx { code, .. }
            | NetworkError::ServiceError { code, .. }
            | NetworkError::Error5xx { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Raw response bytes attached to the error, if any.
    pub fn data(&self) -> Option<&Bytes> {
        match self {
            NetworkError::BadRequest(data)
            | NetworkError::Unauthorized(data)
            | NetworkError::Forbidden(data)
            | NetworkError::NotFound(data)
            | NetworkError::ServerError(data)
            | NetworkError::Unknown(data) => data.as_ref(),
            NetworkError::Error4xx { data, .. }
            | NetworkError::ServiceError { data, .. }
            | NetworkError::Error5xx { data, .. } => data.as_ref(),
            _ => None,
        }
    }

    /// Check if this error came from a 4xx response
    pub fn is_client_error(&self) -> bool {
        matches!(self.status_code(), Some(400..=499))
    }

    /// Check if this error came from a 5xx response
    pub fn is_server_error(&self) -> bool {
        matches!(self.status_code(), Some(500..=599))
    }

    /// Check if the server refused the credentials (401 or 403)
    pub fn is_access_denied(&self) -> bool {
        self.status_code()
            .is_some_and(crate::client::is_access_denied_status)
    }
}
