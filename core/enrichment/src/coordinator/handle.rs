use tokio::sync::{mpsc, oneshot};

use super::messages::{CoordinatorMessage, CoordinatorStats};
use crate::{CatalogEntry, CoordinatorError, ResolutionResult};

/// Public interface to the fetch coordinator actor.
///
/// Cheap to clone; every clone talks to the same cache.
#[derive(Clone)]
pub struct CoordinatorHandle {
    sender: mpsc::Sender<CoordinatorMessage>,
}

impl CoordinatorHandle {
    pub fn new(sender: mpsc::Sender<CoordinatorMessage>) -> Self {
        Self { sender }
    }

    /// Resolve media for `entry`, at most once per id.
    ///
    /// Concurrent callers for the same id share one resolver invocation.
    /// Returns [`CoordinatorError::Discarded`] when the id is invalidated
    /// (or the coordinator reset) while the resolution is in flight.
    pub async fn get_or_resolve(
        &self,
        entry: &CatalogEntry,
    ) -> Result<ResolutionResult, CoordinatorError> {
        let (reply, rx) = oneshot::channel();
        self.send(CoordinatorMessage::GetOrResolve {
            entry: entry.clone(),
            reply,
        })
        .await?;
        rx.await.map_err(|_| CoordinatorError::Discarded(entry.id))
    }

    /// Current result for `id`: `None` if never requested, PENDING while in flight.
    pub async fn peek(&self, id: i64) -> Result<Option<ResolutionResult>, CoordinatorError> {
        let (reply, rx) = oneshot::channel();
        self.send(CoordinatorMessage::Peek { id, reply }).await?;
        rx.await.map_err(|_| CoordinatorError::Closed)
    }

    /// Drop the cached or in-flight result for `id`.
    pub async fn invalidate(&self, id: i64) -> Result<(), CoordinatorError> {
        let (reply, rx) = oneshot::channel();
        self.send(CoordinatorMessage::Invalidate { id, reply }).await?;
        rx.await.map_err(|_| CoordinatorError::Closed)
    }

    /// Drop every cached and in-flight result.
    pub async fn reset(&self) -> Result<(), CoordinatorError> {
        let (reply, rx) = oneshot::channel();
        self.send(CoordinatorMessage::Reset { reply }).await?;
        rx.await.map_err(|_| CoordinatorError::Closed)
    }

    pub async fn stats(&self) -> Result<CoordinatorStats, CoordinatorError> {
        let (reply, rx) = oneshot::channel();
        self.send(CoordinatorMessage::Stats { reply }).await?;
        rx.await.map_err(|_| CoordinatorError::Closed)
    }

    async fn send(&self, msg: CoordinatorMessage) -> Result<(), CoordinatorError> {
        self.sender
            .send(msg)
            .await
            .map_err(|_| CoordinatorError::Closed)
    }
}
