//! Wire encoding for request descriptors.
//!
//! Everything in this module is pure: no I/O, no shared state.
//!
//! | Module | Responsibility |
//! |--------|----------------|
//! | [`params`] | [`Params`] and URL-encoded / JSON rendering |
//! | [`multipart`] | `multipart/form-data` bodies and boundary tokens |
//! | [`headers`] | default `Content-Type` and header merging |
//! | [`constants`] | header names and the percent-encoding set |

pub mod constants;
pub mod headers;
pub mod multipart;
pub mod params;

pub use headers::{build_headers, format_content_type, parse_boundary};
pub use params::{ParamValue, Params};

use crate::types::{ContentType, MultipartData};
use bytes::Bytes;

/// Encode body parameters according to `content_type`.
///
/// Returns an empty body when there is nothing to send or when JSON
/// serialization fails. Attachments are only written for
/// [`ContentType::Multipart`], and a multipart body is produced whenever
/// either parameters or attachments are present.
pub fn encode_body(
    content_type: ContentType,
    params: Option<&Params>,
    parts: &[MultipartData],
    boundary: &str,
) -> Bytes {
    match content_type {
        ContentType::Json => params.and_then(Params::to_json).unwrap_or_default(),
        ContentType::UrlEncoded => params
            .map(|params| Bytes::from(params.to_percent_encoded()))
            .unwrap_or_default(),
        ContentType::Multipart => {
            if params.is_none() && parts.is_empty() {
                return Bytes::new();
            }
            let empty = Params::new();
            multipart::encode(params.unwrap_or(&empty), parts, boundary)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attachment() -> MultipartData {
        MultipartData::new("f", &b"data"[..], "f.bin", "application/octet-stream")
    }

    #[test]
    fn test_no_params_no_body() {
        assert!(encode_body(ContentType::Json, None, &[], "b").is_empty());
        assert!(encode_body(ContentType::UrlEncoded, None, &[], "b").is_empty());
        assert!(encode_body(ContentType::Multipart, None, &[], "b").is_empty());
    }

    #[test]
    fn test_attachments_ignored_outside_multipart() {
        let params = Params::new().with("a", 1);
        let body = encode_body(ContentType::UrlEncoded, Some(&params), &[attachment()], "b");
        assert_eq!(body.as_ref(), b"a=1");

        let body = encode_body(ContentType::Json, Some(&params), &[attachment()], "b");
        assert_eq!(body.as_ref(), br#"{"a":1}"#);
    }

    #[test]
    fn test_multipart_with_attachments_only() {
        let body = encode_body(ContentType::Multipart, None, &[attachment()], "b");
        assert!(body.starts_with(
            b"--b\r\nContent-Disposition: form-data; name=\"f\"; filename=\"f.bin\""
        ));
    }
}
