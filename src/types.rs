//! Core value types shared by descriptors, the encoder and the dispatcher.

use bytes::Bytes;
use std::collections::BTreeMap;
use std::fmt;

/// Caller-supplied header fields, keyed by header name.
pub type Headers = BTreeMap<String, String>;

/// HTTP method of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HttpMethod {
    /// `GET`
    #[default]
    Get,
    /// `POST`
    Post,
    /// `PUT`
    Put,
    /// `DELETE`
    Delete,
}

impl HttpMethod {
    /// The method as it appears on the request line.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for http::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => http::Method::GET,
            HttpMethod::Post => http::Method::POST,
            HttpMethod::Put => http::Method::PUT,
            HttpMethod::Delete => http::Method::DELETE,
        }
    }
}

/// How body parameters are serialized.
///
/// Exactly one content type governs a request. Attachments are only written
/// when the content type is [`ContentType::Multipart`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ContentType {
    /// `application/json`
    #[default]
    Json,
    /// `application/x-www-form-urlencoded`
    UrlEncoded,
    /// `multipart/form-data`
    Multipart,
}

impl ContentType {
    /// MIME type without parameters.
    pub fn mime(&self) -> &'static str {
        match self {
            ContentType::Json => "application/json",
            ContentType::UrlEncoded => "application/x-www-form-urlencoded",
            ContentType::Multipart => "multipart/form-data",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

/// A file attached to a multipart request.
///
/// # Examples
///
/// ```
/// use declarative_connect::MultipartData;
///
/// let avatar = MultipartData::new("avatar", vec![0x89, b'P', b'N', b'G'], "me.png", "image/png");
/// assert_eq!(avatar.file_name(), "me.png");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultipartData {
    name: String,
    file_data: Bytes,
    file_name: String,
    mime_type: String,
}

impl MultipartData {
    /// Create an attachment for form field `name`.
    pub fn new(
        name: impl Into<String>,
        file_data: impl Into<Bytes>,
        file_name: impl Into<String>,
        mime_type: impl Into<String>,
    ) -> Self {
        MultipartData {
            name: name.into(),
            file_data: file_data.into(),
            file_name: file_name.into(),
            mime_type: mime_type.into(),
        }
    }

    /// Form field name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw payload, written without any escaping
    pub fn file_data(&self) -> &Bytes {
        &self.file_data
    }

    /// File name reported in `Content-Disposition`
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Value of the part's `Content-Type` header
    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }
}
