//! Counting join barrier.
//!
//! A [`JoinBarrier`] starts at the size of a task cohort. Each task holds a
//! [`BarrierGuard`] and releases one count when the guard is dropped, so a
//! task signals completion on every exit path, panics included. Waiters
//! resolve once the count reaches zero.

use std::sync::Arc;

use tokio::sync::watch;

#[derive(Debug, Clone)]
pub struct JoinBarrier {
    remaining: Arc<watch::Sender<usize>>,
}

impl JoinBarrier {
    pub fn new(count: usize) -> Self {
        let (remaining, _) = watch::channel(count);
        Self {
            remaining: Arc::new(remaining),
        }
    }

    /// Hand out one completion signal. The count is not incremented; the
    /// barrier must be created with one count per guard.
    pub fn guard(&self) -> BarrierGuard {
        BarrierGuard {
            barrier: self.clone(),
        }
    }

    pub fn remaining(&self) -> usize {
        *self.remaining.borrow()
    }

    /// Resolve once every count has been released.
    pub async fn wait(&self) {
        let mut receiver = self.remaining.subscribe();
        // The sender is owned by `self`, so the wait can only end at zero.
        let _ = receiver.wait_for(|remaining| *remaining == 0).await;
    }

    fn release(&self) {
        self.remaining.send_modify(|remaining| {
            if *remaining == 0 {
                tracing::error!("join barrier released more times than its count");
                return;
            }
            *remaining -= 1;
        });
    }
}

/// One completion signal for a [`JoinBarrier`], released on drop.
#[must_use = "dropping the guard releases the barrier immediately"]
#[derive(Debug)]
pub struct BarrierGuard {
    barrier: JoinBarrier,
}

impl Drop for BarrierGuard {
    fn drop(&mut self) {
        self.barrier.release();
    }
}
