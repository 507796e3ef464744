//! Sends materialized requests and turns responses into typed results.
//!
//! Each call goes `Idle -> Sent -> Succeeded | Failed`, with exactly one
//! network round trip:
//!
//! 1. Transport error → [`NetworkError::TransportFailed`]
//! 2. No HTTP status → [`NetworkError::Unknown`]
//! 3. Non-2xx status → [`NetworkError::from_status`]
//! 4. 2xx → decode; failure → [`NetworkError::Decoding`]
//!
//! The response is logged before it is classified.

use super::decoder::{self, ResponseDecoder};
use super::logger::Logger;
use super::transport::{Transport, TransportResponse};
use super::utils::is_success_status;
use crate::error::{NetworkError, Result};
use crate::request::TransportRequest;
use std::sync::Arc;

/// Wraps a [`Transport`] with status validation, decoding and error mapping.
pub struct Dispatcher<T> {
    transport: Arc<T>,
    logger: Logger,
}

impl<T> Clone for Dispatcher<T> {
    fn clone(&self) -> Self {
        Dispatcher {
            transport: self.transport.clone(),
            logger: self.logger,
        }
    }
}

impl<T: Transport> Dispatcher<T> {
    /// Create a dispatcher over `transport`
    pub fn new(transport: T, logger: Logger) -> Self {
        Self::from_shared(Arc::new(transport), logger)
    }

    /// Create a dispatcher over an already shared transport
    pub fn from_shared(transport: Arc<T>, logger: Logger) -> Self {
        Dispatcher { transport, logger }
    }

    /// The underlying transport
    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// The logger used for responses
    pub fn logger(&self) -> &Logger {
        &self.logger
    }

    /// Send `request` and decode the response with `decoder`.
    pub async fn dispatch<R>(
        &self,
        request: TransportRequest,
        decoder: &dyn ResponseDecoder<R>,
    ) -> Result<R> {
        let response = self
            .transport
            .send(request)
            .await
            .map_err(NetworkError::TransportFailed)?;

        self.logger.log_response(&response);
        self.handle_response(response, decoder)
    }

    fn handle_response<R>(
        &self,
        response: TransportResponse,
        decoder: &dyn ResponseDecoder<R>,
    ) -> Result<R> {
        let status = match response.status {
            Some(status) => status,
            None => return Err(NetworkError::Unknown(Some(response.body))),
        };

        if !is_success_status(status) {
            return Err(NetworkError::from_status(status, Some(response.body)));
        }

        decoder.decode(&response.body).map_err(|e| {
            let description = decoder::describe(&e);
            self.logger
                .log_decode_failure(std::any::type_name::<R>(), &description);
            NetworkError::Decoding(description)
        })
    }
}
