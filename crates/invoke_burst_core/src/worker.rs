use std::sync::Arc;

use crate::barrier::BarrierGuard;
use crate::channel::ResultSink;
use crate::error::RunError;
use crate::invoker::FunctionInvoker;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerOutcome {
    /// The payload was handed to the aggregator.
    Recorded,
    /// The invocation returned an error; nothing was sent.
    Failed,
}

/// Performs exactly one invocation and forwards its payload.
pub struct Worker {
    id: usize,
    invoker: Arc<dyn FunctionInvoker>,
    function: Arc<str>,
    sink: ResultSink,
}

impl Worker {
    pub fn new(
        id: usize,
        invoker: Arc<dyn FunctionInvoker>,
        function: Arc<str>,
        sink: ResultSink,
    ) -> Self {
        Self {
            id,
            invoker,
            function,
            sink,
        }
    }

    /// Run the invocation, releasing `guard` when done.
    ///
    /// A failed invocation is logged and reported as [`WorkerOutcome::Failed`].
    /// A send that finds the channel closed is an ordering violation and is
    /// returned as [`RunError::ChannelClosed`].
    pub async fn run(self, guard: BarrierGuard) -> Result<WorkerOutcome, RunError> {
        let outcome = self.invoke_once().await;
        // Sink goes first so the channel can close as soon as the barrier opens.
        drop(self);
        drop(guard);
        outcome
    }

    async fn invoke_once(&self) -> Result<WorkerOutcome, RunError> {
        match self.invoker.invoke(&self.function).await {
            Ok(payload) => {
                let bytes = payload.len();
                self.sink
                    .send(payload)
                    .map_err(|_| RunError::ChannelClosed { worker_id: self.id })?;
                tracing::debug!(worker_id = self.id, bytes, "invocation recorded");
                Ok(WorkerOutcome::Recorded)
            }
            Err(error) => {
                tracing::warn!(
                    worker_id = self.id,
                    function = %self.function,
                    error = %error,
                    "invocation failed"
                );
                Ok(WorkerOutcome::Failed)
            }
        }
    }
}
