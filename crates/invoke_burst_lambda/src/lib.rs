//! AWS-facing half of invocation runs.
//!
//! This crate owns the Lambda SDK integration and process wiring; the run
//! coordination itself lives in `invoke_burst_core`.

pub mod adapters;
pub mod logging;
