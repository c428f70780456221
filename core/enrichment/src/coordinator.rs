//! Per-entry fetch coordination.
//!
//! One coordinator serves one resolve profile (trailer, clips or songs).
//! It caches settled results by entry id and coalesces concurrent requests
//! for the same id into a single resolver invocation.

mod handle;
mod messages;
mod runner;

pub use handle::CoordinatorHandle;
pub use messages::{CoordinatorMessage, CoordinatorStats};
use runner::FetchCoordinatorActor;

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::resolver::{ResolveProfile, TrailerResolver};

/// Message buffer between handles and the actor
const CHANNEL_CAPACITY: usize = 100;

/// Create a fetch coordinator and spawn its actor.
///
/// The actor stops once every [`CoordinatorHandle`] has been dropped.
/// Must be called from within a tokio runtime.
pub fn create_fetch_coordinator(
    resolver: Arc<TrailerResolver>,
    profile: ResolveProfile,
) -> CoordinatorHandle {
    let (sender, receiver) = mpsc::channel(CHANNEL_CAPACITY);

    let actor = FetchCoordinatorActor::new(resolver, profile, receiver);
    tokio::spawn(actor.run());

    CoordinatorHandle::new(sender)
}
