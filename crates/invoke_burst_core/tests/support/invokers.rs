use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use invoke_burst_core::{FunctionInvoker, InvokeError};
use tokio::sync::Barrier;

/// Answers every call with `{"call": <n>}`, numbering calls in arrival order.
#[derive(Default)]
pub struct NumberingInvoker {
    calls: AtomicUsize,
}

impl NumberingInvoker {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FunctionInvoker for NumberingInvoker {
    async fn invoke(&self, _function_name: &str) -> Result<Vec<u8>, InvokeError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        Ok(format!("{{\"call\":{call}}}").into_bytes())
    }
}

/// Fails every call whose arrival number is a multiple of `every`.
pub struct FlakyInvoker {
    every: usize,
    calls: AtomicUsize,
}

impl FlakyInvoker {
    pub fn failing_every(every: usize) -> Self {
        Self {
            every,
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl FunctionInvoker for FlakyInvoker {
    async fn invoke(&self, _function_name: &str) -> Result<Vec<u8>, InvokeError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call % self.every == 0 {
            return Err(InvokeError::new(format!("call {call} throttled")));
        }
        Ok(format!("{{\"call\":{call}}}").into_bytes())
    }
}

/// Holds every call until `expected` calls are in flight at once.
pub struct RendezvousInvoker {
    barrier: Barrier,
}

impl RendezvousInvoker {
    pub fn new(expected: usize) -> Self {
        Self {
            barrier: Barrier::new(expected),
        }
    }
}

#[async_trait]
impl FunctionInvoker for RendezvousInvoker {
    async fn invoke(&self, _function_name: &str) -> Result<Vec<u8>, InvokeError> {
        self.barrier.wait().await;
        Ok(b"\"met\"".to_vec())
    }
}

/// Returns a large string payload made of one repeated letter per call.
#[derive(Default)]
pub struct BulkyInvoker {
    calls: AtomicUsize,
}

pub const BULKY_PAYLOAD_LEN: usize = 64 * 1024;

#[async_trait]
impl FunctionInvoker for BulkyInvoker {
    async fn invoke(&self, _function_name: &str) -> Result<Vec<u8>, InvokeError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        let letter = b'a' + (call % 26) as u8;
        let mut payload = Vec::with_capacity(BULKY_PAYLOAD_LEN + 2);
        payload.push(b'"');
        payload.extend(std::iter::repeat(letter).take(BULKY_PAYLOAD_LEN));
        payload.push(b'"');
        Ok(payload)
    }
}

/// Panics instead of answering.
pub struct PanickingInvoker;

#[async_trait]
impl FunctionInvoker for PanickingInvoker {
    async fn invoke(&self, _function_name: &str) -> Result<Vec<u8>, InvokeError> {
        panic!("invoker crashed");
    }
}
