//! Run coordination: fan out one worker per invocation, fan results into a
//! single aggregator, and shut the channel down once every worker is done.

use std::future::Future;
use std::sync::Arc;

use crate::aggregator::Aggregator;
use crate::barrier::JoinBarrier;
use crate::channel::ResultChannel;
use crate::config::RunConfig;
use crate::error::RunError;
use crate::invoker::FunctionInvoker;
use crate::worker::{Worker, WorkerOutcome};

/// Counts reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub requested: usize,
    pub recorded: usize,
    pub failed: usize,
}

/// Build the invoker with `connect`, then run the invocations.
///
/// A `connect` failure aborts the run before any task is spawned or any
/// output is created.
pub async fn execute<'a, F, Fut>(config: &'a RunConfig, connect: F) -> Result<RunSummary, RunError>
where
    F: FnOnce(&'a RunConfig) -> Fut,
    Fut: Future<Output = Result<Arc<dyn FunctionInvoker>, String>>,
{
    let invoker = connect(config).await.map_err(RunError::SessionInit)?;
    execute_with_invoker(config, invoker).await
}

/// Run `config.call_count` concurrent invocations and stream their payloads
/// to `config.result_file`.
///
/// Ordering:
/// 1. spawn the workers, each holding a guard on the worker barrier;
/// 2. spawn the aggregator, holding the writer barrier guard;
/// 3. wait for the worker barrier;
/// 4. close the channel, the only close in a run;
/// 5. wait for the writer barrier.
pub async fn execute_with_invoker(
    config: &RunConfig,
    invoker: Arc<dyn FunctionInvoker>,
) -> Result<RunSummary, RunError> {
    let call_count = config.call_count;
    let function: Arc<str> = Arc::from(config.function.as_str());

    let (channel, source) = ResultChannel::unbounded();
    let call_workers = JoinBarrier::new(call_count);
    let writer = JoinBarrier::new(1);

    tracing::info!(
        function = %function,
        call_count,
        output = %config.result_file.display(),
        "starting invocation run"
    );

    let mut workers = Vec::with_capacity(call_count);
    for worker_id in 0..call_count {
        let worker = Worker::new(
            worker_id,
            Arc::clone(&invoker),
            Arc::clone(&function),
            channel.sink(),
        );
        workers.push(tokio::spawn(worker.run(call_workers.guard())));
    }

    let aggregator =
        tokio::spawn(Aggregator::new(config.result_file.clone()).drain(source, writer.guard()));

    call_workers.wait().await;
    channel.close();
    writer.wait().await;

    let mut summary = RunSummary {
        requested: call_count,
        ..RunSummary::default()
    };
    let mut worker_error = None;
    for (worker_id, handle) in workers.into_iter().enumerate() {
        match handle.await {
            Ok(Ok(WorkerOutcome::Recorded)) => {}
            Ok(Ok(WorkerOutcome::Failed)) => summary.failed += 1,
            Ok(Err(error)) => {
                tracing::error!(worker_id, error = %error, "invocation worker aborted");
                if worker_error.is_none() {
                    worker_error = Some(error);
                }
            }
            Err(error) => {
                tracing::error!(worker_id, error = %error, "invocation worker panicked");
                summary.failed += 1;
            }
        }
    }

    let report = match aggregator.await {
        Ok(result) => result,
        Err(error) => {
            return Err(RunError::TaskPanicked {
                task: "aggregator",
                message: error.to_string(),
            })
        }
    };
    if let Some(error) = worker_error {
        return Err(error);
    }
    let report = report?;
    summary.recorded = report.written;

    if summary.failed > 0 {
        tracing::warn!(
            requested = summary.requested,
            recorded = summary.recorded,
            failed = summary.failed,
            "invocation run finished with failed calls"
        );
    } else {
        tracing::info!(
            requested = summary.requested,
            recorded = summary.recorded,
            "invocation run finished"
        );
    }
    Ok(summary)
}
