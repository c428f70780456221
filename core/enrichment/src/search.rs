//! Incremental title search with one result slot per viewport class.
//!
//! Every catalog request takes a sequence token for its slot. A response is
//! applied only while its token is still the latest issued for that slot,
//! so a slow early response can never overwrite a newer one.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::{CatalogEntry, CatalogSource};

/// Queries shorter than this (in characters) clear the results
pub const DEFAULT_MIN_QUERY_LEN: usize = 3;

/// Catalog page size for incremental search
pub const DEFAULT_SEARCH_PAGE_SIZE: u32 = 5;

/// Widths below this (in px) are NARROW
pub const DEFAULT_NARROW_BREAKPOINT: u32 = 768;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ViewportClass {
    Narrow,
    Wide,
}

impl ViewportClass {
    pub const ALL: [ViewportClass; 2] = [ViewportClass::Narrow, ViewportClass::Wide];

    pub fn from_width(width: u32, breakpoint: u32) -> Self {
        if width < breakpoint {
            ViewportClass::Narrow
        } else {
            ViewportClass::Wide
        }
    }
}

/// Query text and results shown in one viewport slot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchSession {
    pub query_text: String,
    pub results: Vec<CatalogEntry>,
}

/// What [`SearchController::on_query_change`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Query too short; both slots were cleared
    Cleared,
    /// Results applied to the slot
    Updated(usize),
    /// A newer query (or a clear) superseded this one
    Stale,
    /// Catalog error; previous results kept
    Failed,
}

#[derive(Default)]
struct Slot {
    session: SearchSession,
    /// Latest token issued for this slot
    latest: u64,
}

pub struct SearchController {
    catalog: Arc<dyn CatalogSource>,
    slots: Mutex<HashMap<ViewportClass, Slot>>,
    min_query_len: usize,
    page_size: u32,
}

impl SearchController {
    pub fn new(catalog: Arc<dyn CatalogSource>) -> Self {
        Self {
            catalog,
            slots: Mutex::new(HashMap::new()),
            min_query_len: DEFAULT_MIN_QUERY_LEN,
            page_size: DEFAULT_SEARCH_PAGE_SIZE,
        }
    }

    pub fn with_min_query_len(mut self, min_query_len: usize) -> Self {
        self.min_query_len = min_query_len;
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Handle an edit of the search box shown in `viewport`.
    pub async fn on_query_change(&self, text: &str, viewport: ViewportClass) -> SearchOutcome {
        if text.chars().count() < self.min_query_len {
            let mut slots = self.slots.lock();
            for class in ViewportClass::ALL {
                let slot = slots.entry(class).or_default();
                slot.latest += 1;
                slot.session.results.clear();
            }
            slots.entry(viewport).or_default().session.query_text = text.to_string();
            return SearchOutcome::Cleared;
        }

        let token = {
            let mut slots = self.slots.lock();
            let slot = slots.entry(viewport).or_default();
            slot.latest += 1;
            slot.session.query_text = text.to_string();
            slot.latest
        };

        let response = self.catalog.search_by_title(text, self.page_size).await;

        let mut slots = self.slots.lock();
        let slot = slots.entry(viewport).or_default();
        if slot.latest != token {
            tracing::debug!("Discarding stale search results for '{}'", text);
            return SearchOutcome::Stale;
        }

        match response {
            Ok(entries) => {
                let count = entries.len();
                slot.session.results = entries;
                SearchOutcome::Updated(count)
            }
            Err(e) => {
                tracing::warn!("{} search failed for '{}': {}", self.catalog.name(), text, e);
                SearchOutcome::Failed
            }
        }
    }

    /// A result was chosen: clear that slot's query and results.
    pub fn pick(&self, viewport: ViewportClass) {
        let mut slots = self.slots.lock();
        let slot = slots.entry(viewport).or_default();
        slot.latest += 1;
        slot.session = SearchSession::default();
    }

    pub fn session(&self, viewport: ViewportClass) -> SearchSession {
        self.slots
            .lock()
            .get(&viewport)
            .map(|slot| slot.session.clone())
            .unwrap_or_default()
    }
}
