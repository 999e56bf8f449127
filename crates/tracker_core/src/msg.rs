use crate::{Generation, Resource, SavedSearch, SearchId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Page startup; requests the saved-search listing.
    Init,
    /// The saved-search listing arrived.
    SavedSearchesLoaded(Vec<SavedSearch>),
    /// The saved-search listing failed (transport or parse error).
    SavedSearchesFailed(String),
    /// The multi-select now highlights exactly these ids.
    SelectionChanged(Vec<SearchId>),
    /// User flipped a single entry of the multi-select.
    SearchToggled(SearchId),
    /// User clicked "Show resources".
    ShowResourcesClicked,
    /// A resource request completed.
    ResourcesFetched {
        generation: Generation,
        resources: Vec<Resource>,
    },
    /// A resource request failed.
    ResourcesFailed {
        generation: Generation,
        error: String,
    },
    /// User clicked "Clear".
    ClearClicked,
    /// UI/render tick to coalesce rendering.
    Tick,
    /// Fallback for placeholder wiring.
    NoOp,
}
