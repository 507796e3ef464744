//! Declarative request descriptors.
//!
//! A descriptor says *what* to call: path, method, content type, parameters,
//! headers, attachments and how to decode the answer. Everything except the
//! path has a default, so a descriptor only spells out what differs.
//!
//! There are two ways to write one:
//!
//! - implement [`ConnectRequest`] on your own type, one type per endpoint
//! - use the [`Endpoint`] builder for ad-hoc calls
//!
//! # Examples
//!
//! ## Implementing the trait
//!
//! ```
//! use declarative_connect::{ConnectRequest, HttpMethod, Params};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct User { id: u64, name: String }
//!
//! struct GetUser { id: u64 }
//!
//! impl ConnectRequest for GetUser {
//!     type Output = User;
//!
//!     fn path(&self) -> String {
//!         format!("/users/{}", self.id)
//!     }
//!
//!     fn query_params(&self) -> Option<Params> {
//!         Some(Params::new().with("expand", "profile"))
//!     }
//! }
//!
//! let request = GetUser { id: 7 }.as_transport_request("https://api.example.com/v1").unwrap();
//! assert_eq!(request.uri(), "https://api.example.com/v1/users/7?expand=profile");
//! assert_eq!(request.method(), "GET");
//! ```
//!
//! ## Using the builder
//!
//! ```
//! use declarative_connect::{ConnectRequest, ContentType, Endpoint};
//!
//! let login = Endpoint::<serde_json::Value>::post("/session")
//!     .with_content_type(ContentType::UrlEncoded)
//!     .with_body("user", "bo")
//!     .with_body("password", "hunter2");
//!
//! let request = login.as_transport_request("https://api.example.com").unwrap();
//! assert_eq!(request.body().as_ref(), b"password=hunter2&user=bo");
//! ```

use crate::client::{JsonDecoder, ResponseDecoder};
use crate::error::{NetworkError, Result};
use crate::protocol::{self, multipart, ParamValue, Params};
use crate::types::{ContentType, Headers, HttpMethod, MultipartData};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::marker::PhantomData;
use std::sync::Arc;
use url::Url;

/// A materialized wire-level request.
pub type TransportRequest = http::Request<Bytes>;

/// Describes one HTTP call.
///
/// Only [`path`](ConnectRequest::path) is required. The auth token is carried
/// but never attached automatically: put it in [`headers`](ConnectRequest::headers)
/// under the header your API expects.
pub trait ConnectRequest: Send + Sync {
    /// Type the response body decodes into.
    type Output: DeserializeOwned + Send + 'static;

    /// Path appended to the client's base URL
    fn path(&self) -> String;

    /// HTTP method, `GET` by default
    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    /// Body encoding, JSON by default
    fn content_type(&self) -> ContentType {
        ContentType::Json
    }

    /// Query string parameters
    fn query_params(&self) -> Option<Params> {
        None
    }

    /// Body parameters, encoded per [`content_type`](ConnectRequest::content_type)
    fn body(&self) -> Option<Params> {
        None
    }

    /// Extra headers; these override the defaults
    fn headers(&self) -> Option<Headers> {
        None
    }

    /// File attachments, only sent for [`ContentType::Multipart`]
    fn multipart_data(&self) -> Option<Vec<MultipartData>> {
        None
    }

    /// Auth token value
    fn auth_token(&self) -> Option<String> {
        None
    }

    /// Decoder for the response body, [`JsonDecoder`] by default
    fn decoder(&self) -> Arc<dyn ResponseDecoder<Self::Output>> {
        Arc::new(JsonDecoder)
    }

    /// Build the wire request against `base_url`.
    ///
    /// # Errors
    ///
    /// [`NetworkError::InvalidRequest`] when the base URL does not parse, the
    /// composed URL is invalid, or a header is not valid HTTP.
    fn as_transport_request(&self, base_url: &str) -> Result<TransportRequest> {
        materialize(self, base_url)
    }
}

/// Compose the final URL, headers and body for `request`.
fn materialize<R>(request: &R, base_url: &str) -> Result<TransportRequest>
where
    R: ConnectRequest + ?Sized,
{
    let url = compose_url(base_url, &request.path(), request.query_params().as_ref())?;

    let boundary = multipart::generate_boundary();
    let headers = protocol::build_headers(
        request.content_type(),
        &boundary,
        request.headers().as_ref(),
    )?;

    let attachments = request.multipart_data().unwrap_or_default();
    let body = protocol::encode_body(
        request.content_type(),
        request.body().as_ref(),
        &attachments,
        &boundary,
    );

    let uri = url
        .as_str()
        .parse::<http::Uri>()
        .map_err(|e| NetworkError::InvalidRequest {
            reason: format!("invalid URL {}: {}", url, e),
        })?;

    let mut transport_request = http::Request::new(body);
    *transport_request.method_mut() = request.method().into();
    *transport_request.uri_mut() = uri;
    *transport_request.headers_mut() = headers;
    Ok(transport_request)
}

fn compose_url(base_url: &str, path: &str, query: Option<&Params>) -> Result<Url> {
    let mut url = Url::parse(base_url).map_err(|e| NetworkError::InvalidRequest {
        reason: format!("cannot parse base URL {:?}: {}", base_url, e),
    })?;

    if url.cannot_be_a_base() {
        return Err(NetworkError::InvalidRequest {
            reason: format!("base URL {:?} cannot carry a path", base_url),
        });
    }

    // a bare "/" is the empty path, so "https://host" + "/x" is "/x", not "//x"
    let base_path = match url.path() {
        "/" => "",
        other => other,
    };
    let full_path = format!("{}{}", base_path, path);
    url.set_path(&full_path);

    if let Some(query) = query.filter(|query| !query.is_empty()) {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in query {
            pairs.append_pair(key, &value.to_string());
        }
    }

    Ok(url)
}

/// Builder-style descriptor for ad-hoc requests.
///
/// `T` is the type the response decodes into.
pub struct Endpoint<T> {
    path: String,
    method: HttpMethod,
    content_type: ContentType,
    query: Option<Params>,
    body: Option<Params>,
    headers: Option<Headers>,
    multipart: Option<Vec<MultipartData>>,
    auth_token: Option<String>,
    decoder: Option<Arc<dyn ResponseDecoder<T>>>,
    _output: PhantomData<fn() -> T>,
}

impl<T> Endpoint<T> {
    /// A `GET` request for `path`
    pub fn new(path: impl Into<String>) -> Self {
        Endpoint {
            path: path.into(),
            method: HttpMethod::Get,
            content_type: ContentType::Json,
            query: None,
            body: None,
            headers: None,
            multipart: None,
            auth_token: None,
            decoder: None,
            _output: PhantomData,
        }
    }

    /// `GET path`
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(path)
    }

    /// `POST path`
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(path).with_method(HttpMethod::Post)
    }

    /// `PUT path`
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(path).with_method(HttpMethod::Put)
    }

    /// `DELETE path`
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(path).with_method(HttpMethod::Delete)
    }

    /// Set the HTTP method
    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Set the body encoding
    pub fn with_content_type(mut self, content_type: ContentType) -> Self {
        self.content_type = content_type;
        self
    }

    /// Add one query parameter
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.query.get_or_insert_with(Params::new).insert(key, value);
        self
    }

    /// Replace all query parameters
    pub fn with_query_params(mut self, params: Params) -> Self {
        self.query = Some(params);
        self
    }

    /// Add one body parameter
    pub fn with_body(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.body.get_or_insert_with(Params::new).insert(key, value);
        self
    }

    /// Replace all body parameters
    pub fn with_body_params(mut self, params: Params) -> Self {
        self.body = Some(params);
        self
    }

    /// Use the fields of a serializable struct as body parameters.
    pub fn with_serialized_body<S: Serialize + ?Sized>(self, body: &S) -> Self {
        self.with_body_params(Params::from_serializable(body))
    }

    /// Add one header, replacing any earlier value under the same name
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers
            .get_or_insert_with(Headers::new)
            .insert(name.into(), value.into());
        self
    }

    /// Append a multipart attachment
    pub fn with_attachment(mut self, attachment: MultipartData) -> Self {
        self.multipart.get_or_insert_with(Vec::new).push(attachment);
        self
    }

    /// Set the auth token. It is not sent unless also placed in a header.
    pub fn with_auth_token(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }

    /// Decode the response with `decoder` instead of [`JsonDecoder`]
    pub fn with_decoder(mut self, decoder: impl ResponseDecoder<T> + 'static) -> Self {
        self.decoder = Some(Arc::new(decoder));
        self
    }
}

impl<T> ConnectRequest for Endpoint<T>
where
    T: DeserializeOwned + Send + 'static,
{
    type Output = T;

    fn path(&self) -> String {
        self.path.clone()
    }

    fn method(&self) -> HttpMethod {
        self.method
    }

    fn content_type(&self) -> ContentType {
        self.content_type
    }

    fn query_params(&self) -> Option<Params> {
        self.query.clone()
    }

    fn body(&self) -> Option<Params> {
        self.body.clone()
    }

    fn headers(&self) -> Option<Headers> {
        self.headers.clone()
    }

    fn multipart_data(&self) -> Option<Vec<MultipartData>> {
        self.multipart.clone()
    }

    fn auth_token(&self) -> Option<String> {
        self.auth_token.clone()
    }

    fn decoder(&self) -> Arc<dyn ResponseDecoder<T>> {
        match &self.decoder {
            Some(decoder) => decoder.clone(),
            None => Arc::new(JsonDecoder),
        }
    }
}
