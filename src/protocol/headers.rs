//! Header assembly for outgoing requests.
//!
//! # Content-Type
//!
//! Every request carries `Content-Type: {mime}; boundary={token}`. The
//! `boundary` parameter is appended for all content types, not just
//! multipart. Servers ignore unknown parameters on JSON and form bodies, and
//! existing callers may depend on the exact header, so this quirk is kept.
//!
//! # Merging
//!
//! Caller headers are layered over the defaults. Header names compare
//! case-insensitively and the caller's value wins.
//!
//! # Examples
//!
//! ```
//! use declarative_connect::ContentType;
//! use declarative_connect::protocol::{format_content_type, parse_boundary};
//!
//! let value = format_content_type(ContentType::Multipart, "B1");
//! assert_eq!(value, "multipart/form-data; boundary=B1");
//! assert_eq!(parse_boundary(&value), Some("B1"));
//! ```

use super::constants::headers;
use crate::error::{NetworkError, Result};
use crate::types::{ContentType, Headers};
use http::{HeaderMap, HeaderName, HeaderValue};

/// Format the default `Content-Type` value for a request.
pub fn format_content_type(content_type: ContentType, boundary: &str) -> String {
    format!("{}; boundary={}", content_type.mime(), boundary)
}

/// Extract the `boundary` parameter from a `Content-Type` value.
pub fn parse_boundary(value: &str) -> Option<&str> {
    value.split(';').skip(1).find_map(|param| {
        let (name, value) = param.split_once('=')?;
        if name.trim().eq_ignore_ascii_case("boundary") {
            Some(value.trim().trim_matches('"'))
        } else {
            None
        }
    })
}

/// Build the header map for a request.
///
/// Starts from the default `Content-Type` and overlays `caller` headers.
///
/// # Errors
///
/// Returns [`NetworkError::InvalidRequest`] if a caller header name or value is
/// not valid HTTP.
pub fn build_headers(
    content_type: ContentType,
    boundary: &str,
    caller: Option<&Headers>,
) -> Result<HeaderMap> {
    let mut map = HeaderMap::new();
    map.insert(
        headers::CONTENT_TYPE,
        header_value(&format_content_type(content_type, boundary))?,
    );

    if let Some(caller) = caller {
        for (name, value) in caller {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| {
                NetworkError::InvalidRequest {
                    reason: format!("invalid header name: {:?}", name),
                }
            })?;
            map.insert(name, header_value(value)?);
        }
    }

    Ok(map)
}

// UTF-8 bytes above 0x7f pass through as obs-text; control characters do not.
fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_bytes(value.as_bytes()).map_err(|_| NetworkError::InvalidRequest {
        reason: format!("invalid header value: {:?}", value),
    })
}
