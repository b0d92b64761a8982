//! Handoff channel between invocation workers and the result aggregator.
//!
//! Many [`ResultSink`]s feed one [`ResultSource`]. The coordinator keeps the
//! [`ResultChannel`] handle and closes it by value once every worker has
//! finished; the source reports exhaustion after that close and after the
//! last outstanding sink is dropped.

use thiserror::Error;
use tokio::sync::mpsc;

/// Raw response payload of one successful invocation.
pub type InvocationResult = Vec<u8>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("result channel is closed")]
pub struct ChannelClosed;

#[derive(Debug)]
pub struct ResultChannel {
    sender: mpsc::UnboundedSender<InvocationResult>,
}

impl ResultChannel {
    pub fn unbounded() -> (Self, ResultSource) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, ResultSource { receiver })
    }

    pub fn sink(&self) -> ResultSink {
        ResultSink {
            sender: self.sender.clone(),
        }
    }

    /// Give up the coordinator's side of the channel. Taking `self` makes a
    /// second close impossible.
    pub fn close(self) {
        drop(self.sender);
    }
}

#[derive(Debug, Clone)]
pub struct ResultSink {
    sender: mpsc::UnboundedSender<InvocationResult>,
}

impl ResultSink {
    pub fn send(&self, payload: InvocationResult) -> Result<(), ChannelClosed> {
        self.sender.send(payload).map_err(|_| ChannelClosed)
    }
}

#[derive(Debug)]
pub struct ResultSource {
    receiver: mpsc::UnboundedReceiver<InvocationResult>,
}

impl ResultSource {
    /// Next payload, or `None` once the channel is closed and drained.
    pub async fn recv(&mut self) -> Option<InvocationResult> {
        self.receiver.recv().await
    }
}
