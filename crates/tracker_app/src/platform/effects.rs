use std::time::Duration;

use tracker_core::{Effect, Msg, Resource, SavedSearch};
use tracker_engine::{EngineEvent, EngineHandle, ResourceRecord, SavedSearchRecord};
use tracker_logging::{tracker_info, tracker_warn};

/// Receives blocking user notifications.
pub trait Notifier {
    fn alert(&mut self, message: &str);
}

/// Prints alerts to stderr.
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&mut self, message: &str) {
        eprintln!("{message}");
    }
}

/// Executes core effects against the engine and turns engine events back
/// into messages.
pub struct EffectRunner<N: Notifier> {
    engine: EngineHandle,
    notifier: N,
}

impl<N: Notifier> EffectRunner<N> {
    pub fn new(engine: EngineHandle, notifier: N) -> Self {
        Self { engine, notifier }
    }

    #[cfg(test)]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn run(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::LoadSavedSearches => {
                    tracker_info!("Requesting saved searches");
                    self.engine.load_saved_searches();
                }
                Effect::FetchResources {
                    generation,
                    search_ids,
                } => {
                    tracker_info!(
                        "FetchResources generation={} search_ids={:?}",
                        generation,
                        search_ids
                    );
                    self.engine.fetch_resources(generation, search_ids);
                }
                Effect::Alert { message } => self.notifier.alert(&message),
            }
        }
    }

    /// Waits up to `timeout` for the next engine result.
    pub fn next_msg(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(map_event)
    }
}

fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SavedSearchesLoaded(Ok(records)) => {
            Msg::SavedSearchesLoaded(records.into_iter().map(map_search).collect())
        }
        EngineEvent::SavedSearchesLoaded(Err(err)) => {
            tracker_warn!("Saved search listing failed: {}", err);
            Msg::SavedSearchesFailed(err.to_string())
        }
        EngineEvent::ResourcesFetched {
            generation,
            result: Ok(records),
        } => Msg::ResourcesFetched {
            generation,
            resources: records.into_iter().map(map_resource).collect(),
        },
        EngineEvent::ResourcesFetched {
            generation,
            result: Err(err),
        } => {
            tracker_warn!("Resource request {} failed: {}", generation, err);
            Msg::ResourcesFailed {
                generation,
                error: err.to_string(),
            }
        }
    }
}

fn map_search(record: SavedSearchRecord) -> SavedSearch {
    SavedSearch {
        id: record.id,
        name: record.name,
        keywords: record.keywords,
    }
}

fn map_resource(record: ResourceRecord) -> Resource {
    Resource {
        title: record.title,
        company: record.company,
        location: record.location,
        work_status: record.work_status,
        url: record.url,
    }
}
