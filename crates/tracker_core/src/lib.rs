//! Resource tracker core: pure state machine and view-model helpers.
mod effect;
mod keywords;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::{Effect, NO_SEARCHES_SELECTED};
pub use keywords::{
    dedupe_keywords, keyword_line, keyword_tokens, label_keywords, option_label,
    NO_KEYWORDS_PLACEHOLDER,
};
pub use msg::Msg;
pub use state::{AppState, Generation, LoaderState, Resource, SavedSearch, SearchId};
pub use update::update;
pub use view_model::{AppViewModel, ResourceRowView, SearchOptionView, LINK_LABEL, MISSING_CELL};
