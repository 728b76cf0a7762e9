//! Request batches.
//!
//! Descriptors are queued, then executed together. In concurrent mode every
//! request runs on its own task and the batch resolves once all of them have
//! completed; in sequential mode they run one after another. Both modes
//! return the same map of URL to envelope.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::join_all;
use thiserror::Error;

use crate::domain::transport::{BatchResults, Envelope, RequestDescriptor};
use crate::ports::HttpTransport;

/// How a batch issues its requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BatchMode {
    /// One task per request, awaited together.
    #[default]
    Concurrent,
    /// One request at a time.
    Sequential,
}

impl BatchMode {
    pub fn from_concurrent_flag(concurrent: bool) -> Self {
        if concurrent {
            BatchMode::Concurrent
        } else {
            BatchMode::Sequential
        }
    }
}

/// Caller errors when executing a batch.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("Cannot execute an empty batch")]
    EmptyBatch,
}

/// A queue of outbound requests executed as one unit.
pub struct RequestBatch {
    transport: Arc<dyn HttpTransport>,
    mode: BatchMode,
    queue: Vec<RequestDescriptor>,
}

impl RequestBatch {
    pub fn new(transport: Arc<dyn HttpTransport>, mode: BatchMode) -> Self {
        Self {
            transport,
            mode,
            queue: Vec::new(),
        }
    }

    pub fn enqueue(&mut self, request: RequestDescriptor) -> &mut Self {
        self.queue.push(request);
        self
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn mode(&self) -> BatchMode {
        self.mode
    }

    /// Execute every queued request and drain the queue.
    ///
    /// Individual failures are captured in their envelopes and never affect
    /// sibling requests. Requests sharing a URL share one map entry; the
    /// last one queued wins.
    ///
    /// # Errors
    ///
    /// `BatchError::EmptyBatch` when nothing is queued.
    pub async fn execute(&mut self) -> Result<BatchResults, BatchError> {
        if self.queue.is_empty() {
            return Err(BatchError::EmptyBatch);
        }

        let queue = std::mem::take(&mut self.queue);
        tracing::debug!(target: "transport", requests = queue.len(), mode = ?self.mode, "Executing batch");

        let results = match self.mode {
            BatchMode::Concurrent => self.run_concurrent(queue).await,
            BatchMode::Sequential => self.run_sequential(queue).await,
        };
        Ok(results)
    }

    async fn run_concurrent(&self, queue: Vec<RequestDescriptor>) -> BatchResults {
        let (urls, handles): (Vec<_>, Vec<_>) = queue
            .into_iter()
            .map(|request| {
                let transport = Arc::clone(&self.transport);
                let url = request.url.clone();
                (url, tokio::spawn(async move { transport.execute(request).await }))
            })
            .unzip();

        let outcomes = join_all(handles).await;

        let mut results = HashMap::with_capacity(urls.len());
        for (url, outcome) in urls.into_iter().zip(outcomes) {
            let envelope = outcome.unwrap_or_else(|e| {
                tracing::error!(target: "transport", url = %url, error = %e, "Batch task failed");
                Envelope::failure(0, format!("Request task failed: {}", e))
            });
            results.insert(url, envelope);
        }
        results
    }

    async fn run_sequential(&self, queue: Vec<RequestDescriptor>) -> BatchResults {
        let mut results = HashMap::with_capacity(queue.len());
        for request in queue {
            let url = request.url.clone();
            let envelope = self.transport.execute(request).await;
            results.insert(url, envelope);
        }
        results
    }
}
