//! Stream adapter for dispatches.
//!
//! [`DispatchStream`] runs the same core path as
//! [`ConnectClient::dispatch`](crate::ConnectClient::dispatch) and exposes it as
//! a [`Stream`] for code that composes with `StreamExt` combinators.
//!
//! # Semantics
//!
//! - **Cold**: nothing is sent until the stream is first polled
//! - **Single-shot**: yields exactly one `Ok` or one `Err`, then ends
//! - Dropping the stream before completion drops the in-flight future
//!
//! # Examples
//!
//! ```ignore
//! use declarative_connect::{ConnectClient, Endpoint};
//! use futures::StreamExt;
//!
//! let client = ConnectClient::new("https://api.example.com");
//! let mut stream = client.dispatch_stream(Endpoint::<serde_json::Value>::get("/status"));
//!
//! while let Some(result) = stream.next().await {
//!     match result {
//!         Ok(status) => println!("{status}"),
//!         Err(e) => eprintln!("{e}"),
//!     }
//! }
//! ```

use crate::error::{NetworkError, Result};
use futures::{Stream, StreamExt};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// A single-result stream over one dispatch.
pub struct DispatchStream<T> {
    inner: Pin<Box<dyn Stream<Item = Result<T>> + Send>>,
}

impl<T: Send + 'static> DispatchStream<T> {
    /// Wrap a dispatch future; it is not polled until the stream is.
    pub(crate) fn new<F>(dispatch: F) -> Self
    where
        F: Future<Output = Result<T>> + Send + 'static,
    {
        DispatchStream {
            inner: Box::pin(futures::stream::once(dispatch)),
        }
    }

    /// Wait for the terminal event.
    ///
    /// A stream that was already drained reports [`NetworkError::Unknown`].
    pub async fn into_result(mut self) -> Result<T> {
        match self.next().await {
            Some(result) => result,
            None => Err(NetworkError::Unknown(None)),
        }
    }
}

impl<T> Stream for DispatchStream<T> {
    type Item = Result<T>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        self.inner.as_mut().poll_next(cx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_yields_once_then_ends() {
        let mut stream = DispatchStream::new(async { Ok(7u8) });
        assert_eq!(stream.next().await.unwrap().unwrap(), 7);
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn test_is_cold() {
        let started = Arc::new(AtomicBool::new(false));
        let flag = started.clone();
        let stream = DispatchStream::new(async move {
            flag.store(true, Ordering::SeqCst);
            Ok(())
        });

        tokio::task::yield_now().await;
        assert!(!started.load(Ordering::SeqCst));

        stream.into_result().await.unwrap();
        assert!(started.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_error_is_terminal() {
        let mut stream = DispatchStream::<()>::new(async { Err(NetworkError::NotFound(None)) });
        assert!(matches!(stream.next().await, Some(Err(NetworkError::NotFound(None)))));
        assert!(stream.next().await.is_none());
    }
}
