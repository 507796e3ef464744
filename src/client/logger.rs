//! Request/response diagnostics.
//!
//! The logger only reads what it is given and never fails: anything it cannot
//! render is skipped or replaced with a short note.

use super::config::LogLevel;
use super::transport::TransportResponse;
use crate::error::NetworkError;
use crate::protocol::constants::headers;
use crate::request::TransportRequest;
use http::Method;

/// Verbosity-gated logger for dispatched calls.
#[derive(Debug, Clone, Copy)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    /// Create a logger with the given verbosity
    pub fn new(level: LogLevel) -> Self {
        Logger { level }
    }

    /// Current verbosity
    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Log an outgoing request.
    pub fn log_request(&self, request: &TransportRequest) {
        if self.level == LogLevel::Off {
            return;
        }

        tracing::info!("{} '{}'", request.method(), request.uri());
        for (name, value) in request.headers() {
            tracing::info!("{} : {}", name, String::from_utf8_lossy(value.as_bytes()));
        }
        if let Some(body) = body_text(request.body()) {
            tracing::info!("HttpBody : {}", body);
        }

        if self.level == LogLevel::Debug {
            tracing::debug!("{}", curl_command(request));
        }
    }

    /// Log a received response.
    pub fn log_response(&self, response: &TransportResponse) {
        if self.level == LogLevel::Off {
            return;
        }

        match response.status {
            Some(status) => tracing::info!("{} '{}'", status, response.url),
            None => tracing::info!("non-HTTP response from '{}'", response.url),
        }

        if self.level == LogLevel::Debug {
            type JsonObject = serde_json::Map<String, serde_json::Value>;
            match serde_json::from_slice::<JsonObject>(&response.body) {
                Ok(json) => tracing::debug!("{:?}", json),
                Err(e) => tracing::debug!("response body is not a JSON object: {}", e),
            }
        }
    }

    /// Log a descriptor that could not be turned into a request.
    pub(crate) fn log_rejected(&self, path: &str, error: &NetworkError) {
        if self.level == LogLevel::Off {
            return;
        }
        tracing::warn!("Not dispatching {}: {}", path, error);
    }

    /// Log why a successful response failed to decode.
    pub(crate) fn log_decode_failure(&self, type_name: &str, description: &str) {
        if self.level == LogLevel::Debug {
            tracing::debug!("failed to decode {}: {}", type_name, description);
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(LogLevel::default())
    }
}

/// Reconstruct `request` as a shell `curl` command.
///
/// `-X` is omitted for `GET` and `HEAD`, `Cookie` headers are left out, and
/// the body is included only when it is non-empty UTF-8.
///
/// # Examples
///
/// ```
/// use declarative_connect::client::curl_command;
///
/// let request = http::Request::builder()
///     .method("POST")
///     .uri("https://api.example.com/notes")
///     .header("x-trace", "7")
///     .header("cookie", "session=1")
///     .body(bytes::Bytes::from_static(b"it's done"))
///     .unwrap();
///
/// assert_eq!(
///     curl_command(&request),
///     "curl \"https://api.example.com/notes\" \\\n\t-X POST \\\n\t-H 'x-trace: 7' \\\n\t-d 'it'\\''s done'"
/// );
/// ```
pub fn curl_command(request: &TransportRequest) -> String {
    let mut command = vec![format!("curl \"{}\"", request.uri())];

    if request.method() != Method::GET && request.method() != Method::HEAD {
        command.push(format!("-X {}", request.method()));
    }

    for (name, value) in request.headers() {
        if *name == headers::COOKIE {
            continue;
        }
        let header = format!("{}: {}", name, String::from_utf8_lossy(value.as_bytes()));
        command.push(format!("-H {}", shell_quote(&header)));
    }

    if let Some(body) = body_text(request.body()) {
        command.push(format!("-d {}", shell_quote(body)));
    }

    command.join(" \\\n\t")
}

fn body_text(body: &[u8]) -> Option<&str> {
    if body.is_empty() {
        return None;
    }
    std::str::from_utf8(body).ok()
}

fn shell_quote(raw: &str) -> String {
    format!("'{}'", raw.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::capture_logs;
    use bytes::Bytes;

    fn request(method: &str, body: &'static [u8]) -> TransportRequest {
        http::Request::builder()
            .method(method)
            .uri("http://localhost/x")
            .header("content-type", "application/json")
            .body(Bytes::from_static(body))
            .unwrap()
    }

    #[test]
    fn test_get_omits_method_flag() {
        assert_eq!(
            curl_command(&request("GET", b"")),
            "curl \"http://localhost/x\" \\\n\t-H 'content-type: application/json'"
        );
        assert!(!curl_command(&request("HEAD", b"")).contains("-X"));
    }

    #[test]
    fn test_body_included() {
        let command = curl_command(&request("PUT", br#"{"a":1}"#));
        assert!(command.contains("-X PUT"));
        assert!(command.ends_with(r#"-d '{"a":1}'"#));
    }

    #[test]
    fn test_binary_body_left_out() {
        let command = curl_command(&request("POST", &[0xff, 0xfe, 0x00]));
        assert!(!command.contains("-d"));
    }

    #[test]
    fn test_cookie_excluded_case_insensitively() {
        let request = http::Request::builder()
            .uri("http://localhost/")
            .header("Cookie", "a=b")
            .body(Bytes::new())
            .unwrap();
        assert_eq!(curl_command(&request), "curl \"http://localhost/\"");
    }

    #[test]
    fn test_logging_does_not_touch_values() {
        let logger = Logger::new(LogLevel::Debug);
        let req = request("POST", b"\xff not utf8");
        let response = TransportResponse::new("http://localhost/x", 200, &b"[1, 2]"[..]);

        let logs = capture_logs(|| {
            logger.log_request(&req);
            logger.log_response(&response);
        });

        assert_eq!(req.body().as_ref(), b"\xff not utf8");
        assert_eq!(response.body.as_ref(), b"[1, 2]");
        assert!(!logs.contains("HttpBody"));
        assert!(logs.contains("response body is not a JSON object"));
    }

    #[test]
    fn test_off_is_silent() {
        let logger = Logger::new(LogLevel::Off);
        let logs = capture_logs(|| {
            logger.log_request(&request("POST", br#"{"a":1}"#));
            logger.log_response(&TransportResponse::new("http://localhost/x", 500, "{}"));
            logger.log_rejected("/x", &NetworkError::InvalidRequest { reason: "bad".into() });
            logger.log_decode_failure("Todo", "missing field");
        });
        assert_eq!(logs, "");
    }

    #[test]
    fn test_info_skips_debug_items() {
        let logger = Logger::new(LogLevel::Info);
        let logs = capture_logs(|| {
            logger.log_request(&request("POST", br#"{"a":1}"#));
            logger.log_response(&TransportResponse::new("http://localhost/x", 201, r#"{"a":1}"#));
            logger.log_decode_failure("Todo", "missing field");
        });

        assert!(logs.contains("INFO"));
        assert!(logs.contains("POST 'http://localhost/x'"));
        assert!(logs.contains("content-type : application/json"));
        assert!(logs.contains(r#"HttpBody : {"a":1}"#));
        assert!(logs.contains("201 'http://localhost/x'"));
        assert!(!logs.contains("DEBUG"));
        assert!(!logs.contains("curl"));
        assert!(!logs.contains("Number(1)"));
        assert!(!logs.contains("failed to decode"));
    }

    #[test]
    fn test_debug_adds_curl_and_json_dump() {
        let logger = Logger::new(LogLevel::Debug);
        let logs = capture_logs(|| {
            logger.log_request(&request("PUT", br#"{"a":1}"#));
            logger.log_response(&TransportResponse::new("http://localhost/x", 200, r#"{"a":1}"#));
            logger.log_decode_failure("Todo", "missing field `title`");
        });

        assert!(logs.contains("PUT 'http://localhost/x'"));
        assert!(logs.contains("DEBUG"));
        assert!(logs.contains("curl \"http://localhost/x\""));
        assert!(logs.contains("-X PUT"));
        assert!(logs.contains(r#"{"a": Number(1)}"#));
        assert!(logs.contains("failed to decode Todo: missing field `title`"));
    }
}
