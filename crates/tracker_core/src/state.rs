use std::collections::BTreeSet;

use crate::keywords::{dedupe_keywords, keyword_tokens};
use crate::view_model::{AppViewModel, ResourceRowView, SearchOptionView};

pub type SearchId = i64;

/// Identifies one resource request; later requests carry larger values.
pub type Generation = u64;

/// A saved search as listed by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedSearch {
    pub id: SearchId,
    pub name: String,
    pub keywords: Option<String>,
}

/// A resource row returned by the aggregation endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub work_status: Option<String>,
    pub url: String,
}

/// Progress of the one-shot saved-search listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoaderState {
    #[default]
    Loading,
    Ready,
    Failed,
}

impl LoaderState {
    pub fn is_settled(self) -> bool {
        !matches!(self, LoaderState::Loading)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    loader: LoaderState,
    load_requested: bool,
    searches: Vec<SavedSearch>,
    selected: BTreeSet<SearchId>,
    resources: Vec<Resource>,
    latest_generation: Generation,
    pending_generation: Option<Generation>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        let options = self
            .searches
            .iter()
            .map(|search| SearchOptionView::new(search, self.selected.contains(&search.id)))
            .collect();
        let keywords = self.selected_keywords();
        AppViewModel {
            loader: self.loader,
            options,
            keyword_line: crate::keywords::keyword_line(&keywords),
            keywords,
            table: self.resources.iter().map(ResourceRowView::new).collect(),
            fetch_pending: self.fetch_pending(),
            dirty: self.dirty,
        }
    }

    pub fn loader(&self) -> LoaderState {
        self.loader
    }

    pub fn searches(&self) -> &[SavedSearch] {
        &self.searches
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn latest_generation(&self) -> Generation {
        self.latest_generation
    }

    /// True while the most recent resource request has not resolved.
    pub fn fetch_pending(&self) -> bool {
        self.pending_generation.is_some()
    }

    /// Selected ids in option order.
    pub fn selected_ids(&self) -> Vec<SearchId> {
        self.searches
            .iter()
            .filter(|search| self.selected.contains(&search.id))
            .map(|search| search.id)
            .collect()
    }

    /// Deduplicated keywords contributed by the selected searches.
    pub fn selected_keywords(&self) -> Vec<String> {
        let tokens = self
            .searches
            .iter()
            .filter(|search| self.selected.contains(&search.id))
            .flat_map(|search| keyword_tokens(search.keywords.as_deref().unwrap_or("")));
        dedupe_keywords(tokens)
    }

    /// Returns true when the listing request should be issued now.
    pub(crate) fn begin_load(&mut self) -> bool {
        if self.load_requested || self.loader.is_settled() {
            return false;
        }
        self.load_requested = true;
        true
    }

    pub(crate) fn apply_searches(&mut self, searches: Vec<SavedSearch>) {
        self.searches = searches;
        self.selected.clear();
        self.loader = LoaderState::Ready;
        self.dirty = true;
    }

    pub(crate) fn apply_search_failure(&mut self) {
        self.searches.clear();
        self.selected.clear();
        self.loader = LoaderState::Failed;
        self.dirty = true;
    }

    /// Replaces the selection, dropping ids that are not in the option list.
    /// Returns the number of ids ignored.
    pub(crate) fn set_selection(&mut self, ids: &[SearchId]) -> usize {
        let known: BTreeSet<SearchId> = ids
            .iter()
            .copied()
            .filter(|id| self.is_known(*id))
            .collect();
        let ignored = ids.iter().filter(|id| !self.is_known(**id)).count();
        if known != self.selected {
            self.selected = known;
            self.dirty = true;
        }
        ignored
    }

    /// Flips one id; returns false when the id is unknown.
    pub(crate) fn toggle(&mut self, id: SearchId) -> bool {
        if !self.is_known(id) {
            return false;
        }
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
        self.dirty = true;
        true
    }

    pub(crate) fn next_generation(&mut self) -> Generation {
        self.latest_generation += 1;
        self.pending_generation = Some(self.latest_generation);
        self.dirty = true;
        self.latest_generation
    }

    /// Replaces the table if `generation` is the outstanding latest request.
    /// Returns false for stale responses, which leave state untouched.
    pub(crate) fn apply_resources(
        &mut self,
        generation: Generation,
        resources: Vec<Resource>,
    ) -> bool {
        if self.pending_generation != Some(generation) {
            return false;
        }
        self.resources = resources;
        self.pending_generation = None;
        self.dirty = true;
        true
    }

    /// Records a failed request; the table keeps its contents.
    pub(crate) fn apply_fetch_failure(&mut self, generation: Generation) -> bool {
        if self.pending_generation != Some(generation) {
            return false;
        }
        self.pending_generation = None;
        self.dirty = true;
        true
    }

    pub(crate) fn clear_resources(&mut self) {
        self.resources.clear();
        self.dirty = true;
    }

    /// Returns whether the state changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn is_known(&self, id: SearchId) -> bool {
        self.searches.iter().any(|search| search.id == id)
    }
}
