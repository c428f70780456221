use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tokio::task::AbortHandle;

use super::messages::{Completion, CoordinatorMessage, CoordinatorStats};
use crate::resolver::{ResolveProfile, TrailerResolver};
use crate::{CatalogEntry, ResolutionResult};

/// Per-id cache slot
enum Slot {
    /// A resolution is running; `ticket` identifies it
    Pending {
        ticket: u64,
        task: AbortHandle,
        waiters: Vec<oneshot::Sender<ResolutionResult>>,
    },
    Settled(ResolutionResult),
}

impl Slot {
    /// Stop the resolution task, if one is still running.
    fn abort(&self) {
        if let Slot::Pending { task, .. } = self {
            task.abort();
        }
    }
}

/// Fetch coordinator actor
///
/// Resolutions run in their own tokio tasks and report back on a private
/// completion channel, so the main loop never blocks on the network.
/// Dropping a pending slot aborts its task, so at most one resolution per
/// id is ever running. A completion whose ticket no longer matches the
/// slot is discarded.
pub struct FetchCoordinatorActor {
    resolver: Arc<TrailerResolver>,
    profile: Arc<ResolveProfile>,
    slots: HashMap<i64, Slot>,
    next_ticket: u64,
    receiver: mpsc::Receiver<CoordinatorMessage>,
    completion_tx: mpsc::UnboundedSender<Completion>,
    completion_rx: mpsc::UnboundedReceiver<Completion>,
}

impl FetchCoordinatorActor {
    pub fn new(
        resolver: Arc<TrailerResolver>,
        profile: ResolveProfile,
        receiver: mpsc::Receiver<CoordinatorMessage>,
    ) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            resolver,
            profile: Arc::new(profile),
            slots: HashMap::new(),
            next_ticket: 0,
            receiver,
            completion_tx,
            completion_rx,
        }
    }

    /// Run the actor main loop
    pub async fn run(mut self) {
        tracing::debug!("Fetch coordinator started ({})", self.profile.name);

        loop {
            tokio::select! {
                msg = self.receiver.recv() => match msg {
                    Some(msg) => self.handle_message(msg),
                    None => break,
                },
                Some(completion) = self.completion_rx.recv() => {
                    self.handle_completion(completion);
                }
            }
        }

        self.abort_all();
        tracing::debug!("Fetch coordinator stopped ({})", self.profile.name);
    }

    fn handle_message(&mut self, msg: CoordinatorMessage) {
        match msg {
            CoordinatorMessage::GetOrResolve { entry, reply } => {
                self.get_or_resolve(entry, reply);
            }

            CoordinatorMessage::Peek { id, reply } => {
                let current = self.slots.get(&id).map(|slot| match slot {
                    Slot::Pending { .. } => ResolutionResult::pending(),
                    Slot::Settled(result) => result.clone(),
                });
                let _ = reply.send(current);
            }

            CoordinatorMessage::Invalidate { id, reply } => {
                if let Some(slot) = self.slots.remove(&id) {
                    slot.abort();
                    tracing::debug!("Invalidated {} for entry {}", self.profile.name, id);
                }
                let _ = reply.send(());
            }

            CoordinatorMessage::Reset { reply } => {
                tracing::debug!(
                    "Resetting {} coordinator ({} entries)",
                    self.profile.name,
                    self.slots.len()
                );
                self.abort_all();
                self.slots.clear();
                let _ = reply.send(());
            }

            CoordinatorMessage::Stats { reply } => {
                let _ = reply.send(self.stats());
            }
        }
    }

    fn get_or_resolve(&mut self, entry: CatalogEntry, reply: oneshot::Sender<ResolutionResult>) {
        match self.slots.get_mut(&entry.id) {
            Some(Slot::Settled(result)) => {
                let _ = reply.send(result.clone());
            }
            Some(Slot::Pending { waiters, .. }) => {
                waiters.push(reply);
            }
            None => {
                let ticket = self.next_ticket;
                self.next_ticket += 1;
                let id = entry.id;
                let task = self.spawn_resolution(entry, ticket);
                self.slots.insert(
                    id,
                    Slot::Pending {
                        ticket,
                        task,
                        waiters: vec![reply],
                    },
                );
            }
        }
    }

    /// Resolve in an independent task; the result comes back as a [`Completion`].
    fn spawn_resolution(&self, entry: CatalogEntry, ticket: u64) -> AbortHandle {
        let resolver = Arc::clone(&self.resolver);
        let profile = Arc::clone(&self.profile);
        let completion_tx = self.completion_tx.clone();

        tokio::spawn(async move {
            let result = resolver.resolve(&entry, &profile).await;
            let _ = completion_tx.send(Completion {
                id: entry.id,
                ticket,
                result,
            });
        })
        .abort_handle()
    }

    fn handle_completion(&mut self, completion: Completion) {
        let Completion { id, ticket, result } = completion;

        let is_current = matches!(
            self.slots.get(&id),
            Some(Slot::Pending { ticket: current, .. }) if *current == ticket
        );
        if !is_current {
            tracing::debug!("Discarding stale {} result for entry {}", self.profile.name, id);
            return;
        }

        if let Some(Slot::Pending { waiters, .. }) =
            self.slots.insert(id, Slot::Settled(result.clone()))
        {
            for waiter in waiters {
                let _ = waiter.send(result.clone());
            }
        }
    }

    fn abort_all(&self) {
        for slot in self.slots.values() {
            slot.abort();
        }
    }

    fn stats(&self) -> CoordinatorStats {
        self.slots
            .values()
            .fold(CoordinatorStats::default(), |mut stats, slot| {
                match slot {
                    Slot::Pending { .. } => stats.in_flight += 1,
                    Slot::Settled(_) => stats.cached += 1,
                }
                stats
            })
    }
}
