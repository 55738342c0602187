//! Timeout guarding for in-flight calls
//!
//! Each guarded call registers its own timer entry, keyed by service and a
//! call id, so concurrent calls to one service never share a slot.

use super::limiter::RateLimiter;
use crate::utils::error::{GatewayError, Result};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::oneshot;
use tracing::debug;

/// Registry of armed timers, by service and call id
///
/// Dropping a sender disarms the timer of the matching call.
#[derive(Debug, Default)]
pub(crate) struct TimeoutRegistry {
    next_id: AtomicU64,
    pending: Mutex<HashMap<String, HashMap<u64, oneshot::Sender<()>>>>,
}

impl TimeoutRegistry {
    fn register(self: &Arc<Self>, service: &str) -> (PendingTimeout, oneshot::Receiver<()>) {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let (disarm_tx, disarm_rx) = oneshot::channel();

        self.pending
            .lock()
            .entry(service.to_string())
            .or_default()
            .insert(id, disarm_tx);

        let guard = PendingTimeout {
            registry: Arc::clone(self),
            service: service.to_string(),
            id,
        };
        (guard, disarm_rx)
    }

    /// Disarm every timer of a service, returns how many were armed
    pub(super) fn disarm(&self, service: &str) -> usize {
        self.pending
            .lock()
            .remove(service)
            .map(|calls| calls.len())
            .unwrap_or(0)
    }

    pub(super) fn disarm_all(&self) {
        self.pending.lock().clear();
    }

    pub(super) fn pending(&self, service: &str) -> usize {
        self.pending
            .lock()
            .get(service)
            .map(|calls| calls.len())
            .unwrap_or(0)
    }
}

/// Removes its registry entry when the guarded call settles
struct PendingTimeout {
    registry: Arc<TimeoutRegistry>,
    service: String,
    id: u64,
}

impl Drop for PendingTimeout {
    fn drop(&mut self) {
        let mut pending = self.registry.pending.lock();
        if let Some(calls) = pending.get_mut(&self.service) {
            calls.remove(&self.id);
            if calls.is_empty() {
                pending.remove(&self.service);
            }
        }
    }
}

impl RateLimiter {
    /// Race `operation` against the service's timeout
    ///
    /// If the timer fires first the operation is dropped and a
    /// [`GatewayError::Timeout`] is returned; the remote side may still have
    /// applied the request. If the service is cleared while the call is in
    /// flight its timer is disarmed and the call waits for the operation.
    pub async fn guard_with_timeout<F, T>(&self, service: &str, operation: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        let timeout = self
            .limit(service)
            .ok_or_else(|| GatewayError::configuration(service))?
            .timeout();

        let (_pending, mut disarmed) = self.timeouts.register(service);

        tokio::pin!(operation);
        let timer = tokio::time::sleep(timeout);
        tokio::pin!(timer);

        tokio::select! {
            result = &mut operation => result,
            _ = &mut timer => {
                debug!("{} call exceeded {:?}", service, timeout);
                Err(GatewayError::timeout(service, timeout))
            }
            _ = &mut disarmed => {
                debug!("Timeout for {} disarmed while in flight", service);
                operation.await
            }
        }
    }

    /// Number of guarded calls currently in flight for a service
    pub fn pending_timeouts(&self, service: &str) -> usize {
        self.timeouts.pending(service)
    }
}
