use crate::{Generation, SearchId};

/// Alert text when resources are requested with nothing selected.
pub const NO_SEARCHES_SELECTED: &str = "No searches selected.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    LoadSavedSearches,
    FetchResources {
        generation: Generation,
        search_ids: Vec<SearchId>,
    },
    /// Blocking user notification.
    Alert { message: String },
}
