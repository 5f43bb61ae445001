use crate::domain::model::{FetchConfig, FetchFailure};
use crate::domain::ports::DataSource;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// The settled half of a fetch: success value or failure reason. Settlement
/// is terminal; there is no retry inside the adapter layer.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchOutcome {
    Success(Value),
    Failure(FetchFailure),
}

impl FetchOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, FetchOutcome::Success(_))
    }

    pub fn into_result(self) -> std::result::Result<Value, FetchFailure> {
        match self {
            FetchOutcome::Success(value) => Ok(value),
            FetchOutcome::Failure(failure) => Err(failure),
        }
    }
}

/// A lazy, single-shot container for an eventually-settled fetch result.
///
/// Lazy because the inner future does no work until polled; single-shot
/// because `settle` consumes the producer. Dropping a pending producer
/// abandons it: the result is never propagated to this consumer, though the
/// in-flight transport work is not guaranteed to stop.
///
/// Timeouts are deliberately not a producer feature; wrap `settle` in
/// `tokio::time::timeout` at the call site when a deadline is wanted.
pub struct Producer {
    future: Pin<Box<dyn Future<Output = FetchOutcome> + Send + 'static>>,
}

impl Producer {
    pub fn new<F>(future: F) -> Self
    where
        F: Future<Output = FetchOutcome> + Send + 'static,
    {
        Self {
            future: Box::pin(future),
        }
    }

    /// An already-settled producer.
    pub fn ready(outcome: FetchOutcome) -> Self {
        Self::new(std::future::ready(outcome))
    }

    /// Drive the fetch to settlement. Pending until the transport resolves,
    /// then terminal.
    pub async fn settle(self) -> FetchOutcome {
        self.future.await
    }

    /// Abandon interest in the result. Equivalent to dropping the producer.
    pub fn abandon(self) {}
}

impl std::fmt::Debug for Producer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Producer").finish_non_exhaustive()
    }
}

/// Shared handle to the one data-source instance a composition pass uses.
/// Constructed once, passed down explicitly; there is no hidden global.
#[derive(Clone)]
pub struct SourceHandle {
    inner: Arc<dyn DataSource>,
}

impl SourceHandle {
    pub fn new(source: impl DataSource + 'static) -> Self {
        Self {
            inner: Arc::new(source),
        }
    }

    pub fn from_arc(source: Arc<dyn DataSource>) -> Self {
        Self { inner: source }
    }

    /// Mint a lazy producer for `locator`. Nothing is sent until the producer
    /// is settled.
    pub fn fetch(&self, locator: &str, config: FetchConfig) -> Producer {
        let source = Arc::clone(&self.inner);
        let locator = locator.to_string();
        Producer::new(async move {
            match source.retrieve(&locator, &config).await {
                Ok(value) => FetchOutcome::Success(value),
                Err(failure) => FetchOutcome::Failure(failure),
            }
        })
    }
}

impl std::fmt::Debug for SourceHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceHandle").finish_non_exhaustive()
    }
}
