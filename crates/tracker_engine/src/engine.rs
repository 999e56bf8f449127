use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use thiserror::Error;
use tracker_logging::tracker_debug;

use crate::client::{ApiClient, ApiSettings, ReqwestApiClient};
use crate::{ApiError, EngineEvent, SearchId};

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] std::io::Error),
    #[error("failed to build api client: {0}")]
    Client(#[from] ApiError),
}

enum EngineCommand {
    LoadSavedSearches,
    FetchResources {
        generation: u64,
        search_ids: Vec<SearchId>,
    },
}

/// Runs API requests on a background tokio runtime and reports results as
/// [`EngineEvent`]s. Every command is an independent request.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: ApiSettings) -> Result<Self, EngineError> {
        let client = ReqwestApiClient::new(settings)?;
        Self::with_client(Arc::new(client))
    }

    pub fn with_client(client: Arc<dyn ApiClient>) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let client = client.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(client.as_ref(), command, event_tx).await;
                });
            }
            tracker_debug!("Engine command channel closed");
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn load_saved_searches(&self) {
        let _ = self.cmd_tx.send(EngineCommand::LoadSavedSearches);
    }

    pub fn fetch_resources(&self, generation: u64, search_ids: Vec<SearchId>) {
        let _ = self.cmd_tx.send(EngineCommand::FetchResources {
            generation,
            search_ids,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    client: &dyn ApiClient,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::LoadSavedSearches => {
            EngineEvent::SavedSearchesLoaded(client.list_saved_searches().await)
        }
        EngineCommand::FetchResources {
            generation,
            search_ids,
        } => EngineEvent::ResourcesFetched {
            generation,
            result: client.resources_for_searches(&search_ids).await,
        },
    };
    let _ = event_tx.send(event);
}
