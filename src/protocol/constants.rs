//! Protocol constants: well-known header names and the percent-encoding set.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};

/// Header field names callers commonly set on descriptors.
pub mod headers {
    use http::HeaderName;

    /// `Authorization`
    pub const AUTHORIZATION: HeaderName = http::header::AUTHORIZATION;

    /// `Content-Type`
    pub const CONTENT_TYPE: HeaderName = http::header::CONTENT_TYPE;

    /// `Accept`
    pub const ACCEPT: HeaderName = http::header::ACCEPT;

    /// `X-AUTH-TOKEN`
    pub const X_AUTH_TOKEN: HeaderName = HeaderName::from_static("x-auth-token");

    /// `Accept-Encoding`
    pub const ACCEPT_ENCODING: HeaderName = http::header::ACCEPT_ENCODING;

    /// `Cookie`, never echoed into curl reconstructions
    pub const COOKIE: HeaderName = http::header::COOKIE;
}

/// Characters left as-is in URL-encoded parameter keys and values.
///
/// Everything outside ASCII alphanumerics and `-._~/?` is escaped, which
/// includes the delimiters `:#[]@!$&'()*+,;=` so structural brackets in
/// nested keys never collide with content.
pub const PARAM_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~')
    .remove(b'/')
    .remove(b'?');

/// Line terminator used by multipart bodies
pub const CRLF: &str = "\r\n";
