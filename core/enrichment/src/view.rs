//! One screen's worth of enrichment state: a selection plus the coordinator
//! that resolves media for the entries on that screen.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;

use crate::coordinator::CoordinatorHandle;
use crate::selection::{CollapsePolicy, SelectionState, Transition};
use crate::{CatalogEntry, CoordinatorError, ResolutionResult, VideoCandidate};

/// Result of [`MediaView::toggle_expand`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewUpdate {
    Collapsed,
    /// The entry is expanded and its media is settled
    Expanded(ResolutionResult),
    /// The view moved on (collapse, other entry, teardown) before the
    /// media arrived; nothing was applied
    Superseded,
}

pub struct MediaView {
    selection: Mutex<SelectionState>,
    /// Settled result shown for the expanded entry
    shown: Mutex<Option<(i64, ResolutionResult)>>,
    coordinator: CoordinatorHandle,
    generation: AtomicU64,
}

impl MediaView {
    pub fn new(coordinator: CoordinatorHandle, policy: CollapsePolicy) -> Self {
        Self {
            selection: Mutex::new(SelectionState::new(policy)),
            shown: Mutex::new(None),
            coordinator,
            generation: AtomicU64::new(0),
        }
    }

    /// Expand or collapse `entry`; on expand, wait for its media.
    pub async fn toggle_expand(&self, entry: &CatalogEntry) -> Result<ViewUpdate, CoordinatorError> {
        let generation = self.generation.load(Ordering::SeqCst);

        let transition = self.selection.lock().toggle_expand(entry.id);
        if let Transition::Collapsed(_) = transition {
            *self.shown.lock() = None;
            return Ok(ViewUpdate::Collapsed);
        }

        let result = match self.coordinator.get_or_resolve(entry).await {
            Ok(result) => result,
            Err(CoordinatorError::Discarded(id)) => {
                tracing::debug!("Media for entry {} discarded while expanding", id);
                return Ok(ViewUpdate::Superseded);
            }
            Err(e) => return Err(e),
        };

        // The selection lock is held while checking so a concurrent toggle
        // cannot slip in between the check and the write.
        let selection = self.selection.lock();
        if self.generation.load(Ordering::SeqCst) != generation || !selection.is_expanded(entry.id)
        {
            tracing::debug!("Dropping late media for entry {}", entry.id);
            return Ok(ViewUpdate::Superseded);
        }
        *self.shown.lock() = Some((entry.id, result.clone()));
        Ok(ViewUpdate::Expanded(result))
    }

    pub fn select_video(&self, url: impl Into<String>) {
        self.selection.lock().select_video(url);
    }

    /// Snapshot of the selection state
    pub fn selection(&self) -> SelectionState {
        self.selection.lock().clone()
    }

    /// Settled result of the expanded entry, if any
    pub fn visible_result(&self) -> Option<ResolutionResult> {
        let expanded = self.selection.lock().expanded_entity_id()?;
        self.shown
            .lock()
            .as_ref()
            .filter(|(id, _)| *id == expanded)
            .map(|(_, result)| result.clone())
    }

    /// Candidates listed under the expanded entry; empty while collapsed or pending.
    pub fn visible_candidates(&self) -> Vec<VideoCandidate> {
        self.visible_result()
            .map(|result| result.candidates)
            .unwrap_or_default()
    }

    /// Drop the cached media of one entry so the next expand resolves again.
    pub async fn refresh(&self, id: i64) -> Result<(), CoordinatorError> {
        self.coordinator.invalidate(id).await
    }

    /// Reset everything; in-flight media that arrives later is ignored.
    pub async fn teardown(&self) -> Result<(), CoordinatorError> {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.selection.lock().reset();
        *self.shown.lock() = None;
        self.coordinator.reset().await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::coordinator::create_fetch_coordinator;
    use crate::mocks::{yt_candidate, MockBehavior, MockVideoProvider};
    use crate::resolver::{ResolveProfile, TrailerResolver};
    use crate::{ResolutionState, TrailerProvider};

    fn view(primary: &MockVideoProvider, profile: ResolveProfile) -> Arc<MediaView> {
        let resolver = TrailerResolver::new(vec![primary.as_tier()]);
        let coordinator = create_fetch_coordinator(Arc::new(resolver), profile);
        Arc::new(MediaView::new(coordinator, CollapsePolicy::KeepPlaying))
    }

    #[tokio::test]
    async fn test_expand_shows_candidates_and_collapse_hides_them() {
        let clips = vec![yt_candidate("a"), yt_candidate("b")];
        let primary = MockVideoProvider::new("youtube", MockBehavior::results(clips.clone()));
        let view = view(&primary, ResolveProfile::clips(10));
        let entry = CatalogEntry::new(1, "Frieren");

        let update = view.toggle_expand(&entry).await.unwrap();
        assert!(matches!(update, ViewUpdate::Expanded(ref r) if r.state == ResolutionState::Resolved));
        assert_eq!(view.visible_candidates(), clips);

        assert_eq!(view.toggle_expand(&entry).await.unwrap(), ViewUpdate::Collapsed);
        assert!(view.visible_candidates().is_empty());
        assert_eq!(view.selection().expanded_entity_id(), None);
    }

    #[tokio::test]
    async fn test_reexpand_is_served_from_cache() {
        let primary = MockVideoProvider::new("youtube", MockBehavior::results(vec![yt_candidate("a")]));
        let view = view(&primary, ResolveProfile::trailer());
        let entry = CatalogEntry::new(2, "x");

        view.toggle_expand(&entry).await.unwrap();
        view.toggle_expand(&entry).await.unwrap();
        view.toggle_expand(&entry).await.unwrap();

        assert_eq!(primary.call_count(), 1);
        assert_eq!(view.visible_candidates(), vec![yt_candidate("a")]);
    }

    #[tokio::test]
    async fn test_declared_trailer_needs_no_provider() {
        let primary = MockVideoProvider::new("youtube", MockBehavior::Network);
        let view = view(&primary, ResolveProfile::trailer());
        let entry = CatalogEntry::new(3, "x").with_trailer(TrailerProvider::Youtube, "qgQ");

        view.toggle_expand(&entry).await.unwrap();

        assert_eq!(view.visible_candidates()[0].url, "https://www.youtube.com/watch?v=qgQ");
        assert_eq!(primary.call_count(), 0);
    }

    #[tokio::test]
    async fn test_select_video_is_independent_of_expansion() {
        let primary = MockVideoProvider::new("youtube", MockBehavior::results(vec![yt_candidate("a")]));
        let view = view(&primary, ResolveProfile::trailer());

        view.select_video("https://www.youtube.com/watch?v=a");
        view.toggle_expand(&CatalogEntry::new(4, "x")).await.unwrap();

        let selection = view.selection();
        assert_eq!(selection.expanded_entity_id(), Some(4));
        assert_eq!(selection.active_video_url(), Some("https://www.youtube.com/watch?v=a"));
    }

    #[tokio::test]
    async fn test_late_result_after_teardown_is_ignored() {
        let primary = MockVideoProvider::new("youtube", MockBehavior::results(vec![yt_candidate("a")]))
            .with_delay(Duration::from_millis(50));
        let view = view(&primary, ResolveProfile::trailer());

        let pending = {
            let view = Arc::clone(&view);
            tokio::spawn(async move { view.toggle_expand(&CatalogEntry::new(5, "x")).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        view.teardown().await.unwrap();

        assert_eq!(pending.await.unwrap().unwrap(), ViewUpdate::Superseded);
        assert_eq!(view.selection().expanded_entity_id(), None);
        assert!(view.visible_candidates().is_empty());
    }

    #[tokio::test]
    async fn test_late_result_after_switching_entry_is_ignored() {
        let primary = MockVideoProvider::new("youtube", MockBehavior::results(vec![yt_candidate("a")]))
            .with_delay(Duration::from_millis(50));
        let view = view(&primary, ResolveProfile::trailer());

        let first = {
            let view = Arc::clone(&view);
            tokio::spawn(async move { view.toggle_expand(&CatalogEntry::new(6, "first")).await })
        };
        tokio::time::sleep(Duration::from_millis(10)).await;
        let second = view.toggle_expand(&CatalogEntry::new(7, "second")).await.unwrap();

        assert_eq!(first.await.unwrap().unwrap(), ViewUpdate::Superseded);
        assert!(matches!(second, ViewUpdate::Expanded(_)));
        assert_eq!(view.selection().expanded_entity_id(), Some(7));
        assert_eq!(view.visible_candidates(), vec![yt_candidate("a")]);
    }
}
