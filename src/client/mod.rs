//! Dispatching descriptors over HTTP.
//!
//! # Module Organization
//!
//! ```text
//! client/
//! ├── fetch      - ConnectClient facade (dispatch / dispatch_stream)
//! ├── dispatcher - status validation, decoding, error mapping
//! ├── transport  - Transport capability and the reqwest implementation
//! ├── decoder    - ResponseDecoder and JsonDecoder
//! ├── logger     - verbosity-gated diagnostics and curl reconstruction
//! ├── stream     - single-result DispatchStream
//! ├── config     - ClientConfig and LogLevel
//! └── utils      - status code helpers
//! ```
//!
//! # Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`ConnectClient`] | Owns the base URL and dispatcher |
//! | [`Dispatcher`] | Sends one request, maps the outcome |
//! | [`Transport`] | Pluggable network capability |
//! | [`ResponseDecoder`] | Body-to-value conversion |
//! | [`DispatchStream`] | Stream view of one dispatch |
//!
//! # Examples
//!
//! ```
//! use declarative_connect::client::{ClientConfig, ConnectClient, LogLevel};
//!
//! let client = ConnectClient::with_config(
//!     "https://api.example.com",
//!     ClientConfig { log_level: LogLevel::Info, ..Default::default() },
//! );
//! assert_eq!(client.base_url(), "https://api.example.com");
//! ```

mod config;
mod decoder;
mod dispatcher;
mod fetch;
mod logger;
mod stream;
mod transport;
mod utils;

pub use config::{ClientConfig, LogLevel};
pub use decoder::{JsonDecoder, ResponseDecoder};
pub use dispatcher::Dispatcher;
pub use fetch::ConnectClient;
pub use logger::{curl_command, Logger};
pub use stream::DispatchStream;
pub use transport::{Transport, TransportResponse};
pub use utils::*;
