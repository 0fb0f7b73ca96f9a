//! Timers that clear transient loading indicators.

use std::collections::HashMap;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

#[derive(Debug)]
struct PendingTimer {
    generation: u64,
    handle: JoinHandle<()>,
}

/// Outstanding loading timers keyed by node id.
///
/// Each schedule gets a fresh generation number. A firing timer may only
/// clear the flag if its generation is still the registered one, so a stale
/// timer can never clear a node that has been re-expanded since.
#[derive(Debug, Default)]
pub(super) struct LoadingTimers {
    pending: HashMap<String, PendingTimer>,
    next_generation: u64,
    shutdown: CancellationToken,
}

impl LoadingTimers {
    /// Reserves the generation number for the next timer.
    pub fn next_generation(&mut self) -> u64 {
        self.next_generation += 1;
        self.next_generation
    }

    /// Token cancelled when every timer is torn down.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.child_token()
    }

    /// Registers a timer, aborting any previous timer for the same node.
    pub fn insert(&mut self, id: &str, generation: u64, handle: JoinHandle<()>) {
        if let Some(previous) = self
            .pending
            .insert(id.to_string(), PendingTimer { generation, handle })
        {
            previous.handle.abort();
            log::debug!("[loading] replaced timer for {}", id);
        }
    }

    /// Aborts the node's timer. Returns `true` if one was pending.
    pub fn cancel(&mut self, id: &str) -> bool {
        match self.pending.remove(id) {
            Some(timer) => {
                timer.handle.abort();
                log::debug!("[loading] cancelled timer for {}", id);
                true
            }
            None => false,
        }
    }

    /// Aborts every pending timer.
    pub fn cancel_all(&mut self) {
        for (_, timer) in self.pending.drain() {
            timer.handle.abort();
        }
    }

    /// Claims a fired timer. Returns `false` if it was superseded.
    pub fn complete(&mut self, id: &str, generation: u64) -> bool {
        match self.pending.get(id) {
            Some(timer) if timer.generation == generation => {
                self.pending.remove(id);
                true
            }
            _ => false,
        }
    }

    /// Number of pending timers.
    pub fn len(&self) -> usize {
        self.pending.len()
    }
}

impl Drop for LoadingTimers {
    fn drop(&mut self) {
        self.cancel_all();
        self.shutdown.cancel();
    }
}
