#![doc = include_str!("../README.md")]
#![warn(missing_docs)]

//! # Declarative Connect
//!
//! Describe an HTTP call as a value, then dispatch it.
//!
//! A descriptor ([`ConnectRequest`]) names a path and, optionally, a method,
//! content type, query and body parameters, headers, multipart attachments
//! and a response decoder. The [`ConnectClient`] turns it into a wire request
//! against its base URL, sends it through a [`Transport`](client::Transport),
//! checks the status and decodes the body, mapping every failure into one
//! [`NetworkError`] variant.
//!
//! ## Request flow
//!
//! ```text
//! descriptor ──as_transport_request(base_url)──▶ http::Request<Bytes>
//!                                                   │ Logger (request)
//!                                                   ▼
//!                                              Transport::send
//!                                                   │ Logger (response)
//!                                                   ▼
//!                        status check ──▶ decode ──▶ Result<Output, NetworkError>
//! ```
//!
//! ## Body encodings
//!
//! | [`ContentType`] | Body |
//! |-----------------|------|
//! | `Json` | JSON object of the body parameters |
//! | `UrlEncoded` | `a=1&user[name]=bo&ids[]=1&ids[]=2` |
//! | `Multipart` | `multipart/form-data` parts for parameters, then attachments |
//!
//! ## Client Usage
//!
//! ```ignore
//! use declarative_connect::{ConnectClient, ConnectRequest, HttpMethod, Params};
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Token { access_token: String }
//!
//! struct Login<'a> { user: &'a str, password: &'a str }
//!
//! impl ConnectRequest for Login<'static> {
//!     type Output = Token;
//!
//!     fn path(&self) -> String { "/session".into() }
//!     fn method(&self) -> HttpMethod { HttpMethod::Post }
//!     fn body(&self) -> Option<Params> {
//!         Some(Params::new().with("user", self.user).with("password", self.password))
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = ConnectClient::new("https://api.example.com");
//!     let token = client.dispatch(Login { user: "bo", password: "hunter2" }).await?;
//!     println!("{}", token.access_token);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - **[types]** - methods, content types, headers, attachments
//! - **[error]** - error taxonomy and result alias
//! - **[request]** - descriptors and materialization
//! - **[protocol]** - parameter, multipart and header encoding
//! - **[client]** - client facade, dispatcher, transport, logging

pub mod client;
pub mod error;
pub mod protocol;
pub mod request;
pub mod types;

pub use client::{ClientConfig, ConnectClient, DispatchStream, LogLevel};
pub use error::{NetworkError, Result};
pub use protocol::{ParamValue, Params};
pub use request::{ConnectRequest, Endpoint, TransportRequest};
pub use types::{ContentType, Headers, HttpMethod, MultipartData};
