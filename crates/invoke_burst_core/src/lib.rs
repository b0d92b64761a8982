//! Concurrent invocation runs against a remote request/response function.
//!
//! A run fans out one worker per requested call, hands every successful
//! payload to a single aggregator through an unbounded channel, and streams
//! the payloads into one JSON array file. This crate owns the coordination
//! and output behavior; it excludes the AWS SDK, which lives in
//! `invoke_burst_lambda` behind [`FunctionInvoker`].

pub mod aggregator;
pub mod barrier;
pub mod channel;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod invoker;
pub mod output;
pub mod worker;

pub use config::{load, RunConfig, DEFAULT_CONFIG_PATH};
pub use coordinator::{execute, execute_with_invoker, RunSummary};
pub use error::{ConfigError, RunError};
pub use invoker::{FunctionInvoker, InvokeError};
