use crate::domain::errors::{DomainError, DomainResult, TransportError};
use std::future::Future;
use tokio_util::sync::CancellationToken;

/// Per-request context carried into every repository operation.
///
/// Cancelling the token aborts the in-flight call; the operation then returns
/// [`DomainError::Cancelled`].
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    cancellation: CancellationToken,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancellation(cancellation: CancellationToken) -> Self {
        Self { cancellation }
    }

    /// Context cancelled together with this one, but cancellable on its own
    pub fn child(&self) -> Self {
        Self {
            cancellation: self.cancellation.child_token(),
        }
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancellation
    }

    pub fn cancel(&self) {
        self.cancellation.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancellation.is_cancelled()
    }

    /// Drive a transport call, dropping it as soon as the context is cancelled
    pub async fn run<T, F>(&self, call: F) -> DomainResult<T>
    where
        F: Future<Output = Result<T, TransportError>>,
    {
        tokio::select! {
            biased;
            _ = self.cancellation.cancelled() => Err(DomainError::Cancelled),
            result = call => result.map_err(DomainError::from),
        }
    }
}
