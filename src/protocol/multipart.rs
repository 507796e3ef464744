//! `multipart/form-data` body assembly.
//!
//! # Layout
//!
//! ```text
//! --{boundary}\r\n
//! Content-Disposition: form-data; name="{key}"\r\n
//! \r\n
//! {value}\r\n
//! --{boundary}\r\n
//! Content-Disposition: form-data; name="{name}"; filename="{file_name}"\r\n
//! Content-Type: {mime_type}\r\n
//! \r\n
//! {raw bytes}\r\n
//! --{boundary}--\r\n
//! ```
//!
//! Parameter parts come first, in key order, then attachments in the order
//! given. Attachment bytes are copied verbatim.

use super::constants::CRLF;
use super::params::Params;
use crate::types::MultipartData;
use bytes::{BufMut, Bytes, BytesMut};

/// Generate a fresh boundary token.
///
/// Tokens are uppercase hyphenated v4 UUIDs, unique per call.
pub fn generate_boundary() -> String {
    uuid::Uuid::new_v4().hyphenated().to_string().to_uppercase()
}

/// Encode parameters and attachments into a multipart body.
///
/// # Examples
///
/// ```
/// use declarative_connect::{MultipartData, Params};
/// use declarative_connect::protocol::multipart;
///
/// let params = Params::new().with("a", "1");
/// let files = vec![MultipartData::new("file", &b"PNG"[..], "x.png", "image/png")];
/// let body = multipart::encode(&params, &files, "XYZ");
/// assert!(body.starts_with(b"--XYZ\r\n"));
/// assert!(body.ends_with(b"--XYZ--\r\n"));
/// ```
pub fn encode(params: &Params, parts: &[MultipartData], boundary: &str) -> Bytes {
    let attachment_len: usize = parts.iter().map(|part| part.file_data().len()).sum();
    let mut body = BytesMut::with_capacity(256 * (params.len() + parts.len() + 1) + attachment_len);

    for (key, value) in params {
        put_boundary(&mut body, boundary);
        body.put_slice(
            format!("Content-Disposition: form-data; name=\"{}\"{CRLF}{CRLF}", key).as_bytes(),
        );
        body.put_slice(value.to_string().as_bytes());
        body.put_slice(CRLF.as_bytes());
    }

    for part in parts {
        put_boundary(&mut body, boundary);
        body.put_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"{CRLF}",
                part.name(),
                part.file_name()
            )
            .as_bytes(),
        );
        body.put_slice(format!("Content-Type: {}{CRLF}{CRLF}", part.mime_type()).as_bytes());
        body.put_slice(part.file_data());
        body.put_slice(CRLF.as_bytes());
    }

    body.put_slice(format!("--{}--{CRLF}", boundary).as_bytes());
    body.freeze()
}

fn put_boundary(body: &mut BytesMut, boundary: &str) {
    body.put_slice(format!("--{}{CRLF}", boundary).as_bytes());
}
