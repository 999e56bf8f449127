//! Resource tracker engine: backend API client and request execution.
mod client;
mod engine;
mod types;

pub use client::{
    ApiClient, ApiSettings, ReqwestApiClient, RESOURCES_FOR_SEARCHES_PATH, SAVED_SEARCHES_PATH,
};
pub use engine::{EngineError, EngineHandle};
pub use types::{
    ApiError, EngineEvent, FailureKind, ResourceQuery, ResourceRecord, SavedSearchRecord, SearchId,
};
