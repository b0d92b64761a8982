//! Single consumer of the result channel.
//!
//! The aggregator is the only task that touches the output file. It keeps
//! receiving until the channel reports exhaustion even after an output
//! error, so workers never observe a closed channel, and it always releases
//! its barrier guard.

use std::io;
use std::path::PathBuf;

use tokio::fs::File;
use tokio::io::{AsyncWrite, BufWriter};

use crate::barrier::BarrierGuard;
use crate::channel::ResultSource;
use crate::error::RunError;
use crate::output::JsonArrayWriter;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateReport {
    /// Payloads taken off the channel.
    pub received: usize,
    /// Payloads written to the output.
    pub written: usize,
}

pub struct Aggregator {
    output_path: PathBuf,
}

impl Aggregator {
    pub fn new(output_path: impl Into<PathBuf>) -> Self {
        Self {
            output_path: output_path.into(),
        }
    }

    /// Drain `source` into the output file, creating or truncating it.
    pub async fn drain(
        self,
        mut source: ResultSource,
        guard: BarrierGuard,
    ) -> Result<AggregateReport, RunError> {
        let _guard = guard;

        let file = match File::create(&self.output_path).await {
            Ok(file) => file,
            Err(error) => {
                tracing::error!(
                    output = %self.output_path.display(),
                    error = %error,
                    "failed to open output file"
                );
                let discarded = discard_remaining(&mut source).await;
                tracing::debug!(discarded, "dropped results after output failure");
                return Err(RunError::OutputOpen {
                    path: self.output_path,
                    source: error,
                });
            }
        };

        let mut report = AggregateReport::default();
        if let Err(error) = write_results(&mut source, BufWriter::new(file), &mut report).await {
            tracing::error!(
                output = %self.output_path.display(),
                error = %error,
                written = report.written,
                "failed to write output file"
            );
            let discarded = discard_remaining(&mut source).await;
            tracing::debug!(discarded, "dropped results after output failure");
            return Err(RunError::OutputWrite {
                path: self.output_path,
                source: error,
            });
        }

        tracing::debug!(
            output = %self.output_path.display(),
            received = report.received,
            written = report.written,
            "output file complete"
        );
        Ok(report)
    }
}

/// Stream every payload from `source` into `writer` as one JSON array.
pub async fn write_results<W: AsyncWrite + Unpin>(
    source: &mut ResultSource,
    writer: W,
    report: &mut AggregateReport,
) -> io::Result<()> {
    let mut array = JsonArrayWriter::begin(writer).await?;
    while let Some(payload) = source.recv().await {
        report.received += 1;
        array.push(&payload).await?;
        report.written = array.entries();
    }
    array.finish().await?;
    Ok(())
}

async fn discard_remaining(source: &mut ResultSource) -> usize {
    let mut discarded = 0;
    while source.recv().await.is_some() {
        discarded += 1;
    }
    discarded
}
