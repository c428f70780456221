//! Expand/collapse and playback state for one media view.

use serde::{Deserialize, Serialize};

/// What collapsing an entry does to the active video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollapsePolicy {
    /// Playback continues after the list collapses
    #[default]
    KeepPlaying,
    StopPlayback,
}

/// Outcome of [`SelectionState::toggle_expand`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// The entry is now expanded; its media should be resolved if not yet known
    Expanded(i64),
    Collapsed(i64),
}

/// At most one entry is expanded at a time. Playback is orthogonal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    expanded_entity_id: Option<i64>,
    active_video_url: Option<String>,
    policy: CollapsePolicy,
}

impl SelectionState {
    pub fn new(policy: CollapsePolicy) -> Self {
        Self {
            policy,
            ..Self::default()
        }
    }

    pub fn expanded_entity_id(&self) -> Option<i64> {
        self.expanded_entity_id
    }

    pub fn active_video_url(&self) -> Option<&str> {
        self.active_video_url.as_deref()
    }

    pub fn policy(&self) -> CollapsePolicy {
        self.policy
    }

    pub fn is_expanded(&self, id: i64) -> bool {
        self.expanded_entity_id == Some(id)
    }

    /// Collapse `id` if it is the expanded entry, otherwise expand it
    /// (implicitly collapsing any other).
    pub fn toggle_expand(&mut self, id: i64) -> Transition {
        if self.is_expanded(id) {
            self.expanded_entity_id = None;
            if self.policy == CollapsePolicy::StopPlayback {
                self.active_video_url = None;
            }
            Transition::Collapsed(id)
        } else {
            self.expanded_entity_id = Some(id);
            Transition::Expanded(id)
        }
    }

    /// Start playing `url`. The expanded entry is left alone.
    pub fn select_video(&mut self, url: impl Into<String>) {
        self.active_video_url = Some(url.into());
    }

    /// Back to COLLAPSED with no playback; the policy is kept.
    pub fn reset(&mut self) {
        self.expanded_entity_id = None;
        self.active_video_url = None;
    }
}
