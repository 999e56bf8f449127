use tracker_logging::{tracker_debug, tracker_info, tracker_warn};

use crate::effect::NO_SEARCHES_SELECTED;
use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Init => {
            if state.begin_load() {
                vec![Effect::LoadSavedSearches]
            } else {
                Vec::new()
            }
        }
        Msg::SavedSearchesLoaded(searches) => {
            if state.loader().is_settled() {
                tracker_debug!("Ignoring repeated saved-search listing");
                return (state, Vec::new());
            }
            tracker_info!("Loaded {} saved searches", searches.len());
            state.apply_searches(searches);
            Vec::new()
        }
        Msg::SavedSearchesFailed(error) => {
            if state.loader().is_settled() {
                return (state, Vec::new());
            }
            tracker_warn!("Error loading saved searches: {}", error);
            state.apply_search_failure();
            Vec::new()
        }
        Msg::SelectionChanged(ids) => {
            // Handlers attach only after the listing settles.
            if !state.loader().is_settled() {
                return (state, Vec::new());
            }
            let ignored = state.set_selection(&ids);
            if ignored > 0 {
                tracker_debug!("Selection ignored {} unknown search ids", ignored);
            }
            Vec::new()
        }
        Msg::SearchToggled(id) => {
            if state.loader().is_settled() && !state.toggle(id) {
                tracker_debug!("Toggle ignored for unknown search id {}", id);
            }
            Vec::new()
        }
        Msg::ShowResourcesClicked => {
            let search_ids = state.selected_ids();
            if search_ids.is_empty() {
                return (
                    state,
                    vec![Effect::Alert {
                        message: NO_SEARCHES_SELECTED.to_string(),
                    }],
                );
            }
            let generation = state.next_generation();
            vec![Effect::FetchResources {
                generation,
                search_ids,
            }]
        }
        Msg::ResourcesFetched {
            generation,
            resources,
        } => {
            let count = resources.len();
            if state.apply_resources(generation, resources) {
                tracker_info!("Resource request {} returned {} rows", generation, count);
            } else {
                tracker_debug!(
                    "Dropping stale resource response {} (latest is {})",
                    generation,
                    state.latest_generation()
                );
            }
            Vec::new()
        }
        Msg::ResourcesFailed { generation, error } => {
            tracker_warn!("Error fetching resources (request {}): {}", generation, error);
            state.apply_fetch_failure(generation);
            Vec::new()
        }
        Msg::ClearClicked => {
            state.clear_resources();
            Vec::new()
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
