//! Background polling for open detail views
//!
//! While an order or emergency-request detail view is open and the tracked
//! state is non-terminal, the loop silently refreshes it on a fixed
//! period. Polls run strictly one at a time: the driving task awaits each
//! refresh, and missed ticks are skipped rather than queued. The loop
//! stops on its own once the state is terminal, and the returned handle
//! stops it when the view closes (dropping the handle also stops it).

use crate::core::emergency::EmergencyRequestAggregate;
use crate::core::order::OrderAggregate;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};

/// State that can be silently refreshed by the polling loop
#[async_trait]
pub trait Pollable: Send {
    /// Performs one silent refresh; returns true when the tracked state is
    /// terminal and polling should stop
    async fn poll(&mut self) -> bool;
}

/// Polls a shared order aggregate
///
/// Uses `try_lock` so a refresh already in flight elsewhere (for example a
/// user-initiated one) makes this tick a no-op instead of queueing a
/// second fetch.
#[async_trait]
impl Pollable for Arc<Mutex<OrderAggregate>> {
    async fn poll(&mut self) -> bool {
        let Ok(mut aggregate) = self.try_lock() else {
            return false;
        };
        // silent refresh never errors
        let _ = aggregate.refresh(true).await;
        aggregate.is_terminal()
    }
}

/// Polls a shared emergency-request aggregate
#[async_trait]
impl Pollable for Arc<Mutex<EmergencyRequestAggregate>> {
    async fn poll(&mut self) -> bool {
        let Ok(mut aggregate) = self.try_lock() else {
            return false;
        };
        let _ = aggregate.refresh(true).await;
        aggregate.is_terminal()
    }
}

/// Handle to a running sync loop, tied to the lifetime of a detail view
///
/// Dropping the handle stops the loop.
pub struct SyncHandle {
    stop: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl SyncHandle {
    /// Requests a clean stop; the loop exits before its next poll
    pub fn stop(&self) {
        let _ = self.stop.send(true);
    }

    /// True once the loop has exited (stopped or reached a terminal state)
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Stops the loop and waits for it to exit
    pub async fn shutdown(mut self) {
        let _ = self.stop.send(true);
        let _ = (&mut self.task).await;
    }
}

impl Drop for SyncHandle {
    fn drop(&mut self) {
        let _ = self.stop.send(true);
    }
}

/// Fixed-period polling driver shared by order and emergency detail views
pub struct RequestSyncLoop;

impl RequestSyncLoop {
    /// Spawns a polling task with the given period
    ///
    /// The first poll happens one full period after spawning; the caller
    /// is expected to have loaded the initial snapshot itself.
    pub fn spawn<P>(mut pollable: P, period: Duration) -> SyncHandle
    where
        P: Pollable + 'static,
    {
        let (stop, mut stop_rx) = watch::channel(false);

        let task = tokio::spawn(async move {
            let mut ticker = interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // interval fires immediately; consume that tick so the first
            // poll lands one period in
            ticker.tick().await;

            loop {
                tokio::select! {
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            tracing::debug!("Sync loop stopped by handle");
                            break;
                        }
                    }
                    _ = ticker.tick() => {
                        if pollable.poll().await {
                            tracing::debug!("Tracked state is terminal; sync loop stopping");
                            break;
                        }
                    }
                }
            }
        });

        SyncHandle { stop, task }
    }

    /// Spawns a polling loop for an order detail view
    pub fn for_order(
        aggregate: Arc<Mutex<OrderAggregate>>,
        period: Duration,
    ) -> SyncHandle {
        Self::spawn(aggregate, period)
    }

    /// Spawns a polling loop for an emergency-request detail view
    pub fn for_emergency(
        aggregate: Arc<Mutex<EmergencyRequestAggregate>>,
        period: Duration,
    ) -> SyncHandle {
        Self::spawn(aggregate, period)
    }
}
