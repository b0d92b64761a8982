use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failure to turn the configuration source into a [`crate::config::RunConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors that end an invocation run.
///
/// Individual invocation failures are not represented here; they are counted
/// in [`crate::coordinator::RunSummary::failed`] and the run carries on.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to initialize invocation session: {0}")]
    SessionInit(String),

    #[error("failed to open output {}: {source}", .path.display())]
    OutputOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write output {}: {source}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("result channel closed before worker {worker_id} delivered its payload")]
    ChannelClosed { worker_id: usize },

    #[error("{task} task panicked: {message}")]
    TaskPanicked { task: &'static str, message: String },
}
