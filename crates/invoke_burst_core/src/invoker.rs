use async_trait::async_trait;
use thiserror::Error;

/// One synchronous request/response call against a named remote function.
///
/// Implementations are shared read-only by every worker of a run.
#[async_trait]
pub trait FunctionInvoker: Send + Sync {
    async fn invoke(&self, function_name: &str) -> Result<Vec<u8>, InvokeError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct InvokeError {
    message: String,
}

impl InvokeError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
