use tokio::sync::oneshot;

use crate::{CatalogEntry, ResolutionResult};

/// Cache occupancy snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CoordinatorStats {
    /// Entries with a settled result
    pub cached: usize,
    /// Entries with a resolution in flight
    pub in_flight: usize,
}

/// Actor message type
pub enum CoordinatorMessage {
    /// Return the cached result, join an in-flight resolution, or start one
    GetOrResolve {
        entry: CatalogEntry,
        reply: oneshot::Sender<ResolutionResult>,
    },

    /// Current slot for an id without starting anything
    Peek {
        id: i64,
        reply: oneshot::Sender<Option<ResolutionResult>>,
    },

    /// Forget one id; pending waiters are dropped
    Invalidate {
        id: i64,
        reply: oneshot::Sender<()>,
    },

    /// Forget everything
    Reset { reply: oneshot::Sender<()> },

    Stats {
        reply: oneshot::Sender<CoordinatorStats>,
    },
}

/// Result of a spawned resolution, routed back to the actor
pub(super) struct Completion {
    pub id: i64,
    pub ticket: u64,
    pub result: ResolutionResult,
}
