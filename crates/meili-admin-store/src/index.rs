//! Index store: indexes of the open project, the open index and its
//! settings.

use meili_admin_client::ClientError;
use meili_admin_types::{ApiResponse, IndexDetail, IndexSummary, ProjectId, Settings, TaskRef};
use serde::Serialize;
use tokio::sync::{RwLock, broadcast};
use tracing::{debug, error};

use crate::events::{Events, StoreEvent, StoreKind};
use crate::source::IndexSource;

/// Everything the index store holds.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IndexState {
    /// Indexes of the last fetched project.
    pub indexes: Vec<IndexSummary>,
    /// Index currently open in the UI.
    pub current_index: Option<IndexDetail>,
    /// Settings of the last index whose settings were fetched.
    pub settings: Option<Settings>,
    /// Whether a fetch is in flight.
    pub loading: bool,
    /// Message of the last failed fetch.
    pub error: Option<String>,
}

/// Mirrors one project's indexes for the UI.
///
/// Same contract as [`crate::ProjectStore`]. Index creation and settings
/// updates are asynchronous on the search service, so they pass through
/// without touching the cache.
#[derive(Debug)]
pub struct IndexStore<S> {
    source: S,
    state: RwLock<IndexState>,
    events: Events,
}

impl<S: IndexSource> IndexStore<S> {
    /// Create an empty store backed by `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: RwLock::new(IndexState::default()),
            events: Events::new(),
        }
    }

    /// The API source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Subscribe to change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Copy of the whole state.
    pub async fn snapshot(&self) -> IndexState {
        self.state.read().await.clone()
    }

    /// Cached index list.
    pub async fn indexes(&self) -> Vec<IndexSummary> {
        self.state.read().await.indexes.clone()
    }

    /// Index currently open in the UI.
    pub async fn current_index(&self) -> Option<IndexDetail> {
        self.state.read().await.current_index.clone()
    }

    /// Cached settings.
    pub async fn settings(&self) -> Option<Settings> {
        self.state.read().await.settings.clone()
    }

    /// Whether a fetch is in flight.
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// Message of the last failed fetch.
    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    async fn begin_fetch(&self) {
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }
        self.events.publish(StoreEvent::Loading {
            store: StoreKind::Index,
            loading: true,
        });
    }

    async fn end_fetch(&self, failure: Option<String>) {
        {
            let mut state = self.state.write().await;
            state.loading = false;
            if let Some(message) = &failure {
                state.error = Some(message.clone());
            }
        }
        if let Some(message) = failure {
            self.events.publish(StoreEvent::Failed {
                store: StoreKind::Index,
                message,
            });
        }
        self.events.publish(StoreEvent::Loading {
            store: StoreKind::Index,
            loading: false,
        });
    }

    /// Load the indexes of `project` into the cache.
    pub async fn fetch_indexes(&self, project: ProjectId) {
        self.begin_fetch().await;
        match self.source.list_indexes(project).await {
            Ok(response) => {
                let indexes = response.data.unwrap_or_default();
                debug!(%project, count = indexes.len(), "Fetched indexes");
                self.state.write().await.indexes = indexes;
                self.events.publish(StoreEvent::Indexes);
                self.end_fetch(None).await;
            }
            Err(e) => {
                error!(error = %e, %project, "Failed to fetch indexes");
                self.end_fetch(Some(e.to_string())).await;
            }
        }
    }

    /// Load one index and make it current.
    ///
    /// Returns the index, or `None` when the fetch failed.
    pub async fn fetch_index(&self, project: ProjectId, uid: &str) -> Option<IndexDetail> {
        self.begin_fetch().await;
        match self.source.get_index(project, uid).await {
            Ok(response) => {
                self.state
                    .write()
                    .await
                    .current_index
                    .clone_from(&response.data);
                self.events.publish(StoreEvent::CurrentIndex);
                self.end_fetch(None).await;
                response.data
            }
            Err(e) => {
                error!(error = %e, %project, uid, "Failed to fetch index");
                self.end_fetch(Some(e.to_string())).await;
                None
            }
        }
    }

    /// Create an index. The cache is untouched until the next fetch.
    pub async fn create_index(
        &self,
        project: ProjectId,
        uid: &str,
        primary_key: Option<&str>,
    ) -> Result<ApiResponse<TaskRef>, ClientError> {
        self.source
            .create_index(project, uid, primary_key)
            .await
            .inspect_err(|e| error!(error = %e, %project, uid, "Failed to create index"))
    }

    /// Delete an index; on success it leaves the cached list.
    pub async fn delete_index(
        &self,
        project: ProjectId,
        uid: &str,
    ) -> Result<ApiResponse<TaskRef>, ClientError> {
        let response = self
            .source
            .delete_index(project, uid)
            .await
            .inspect_err(|e| error!(error = %e, %project, uid, "Failed to delete index"))?;

        if response.success {
            self.state.write().await.indexes.retain(|i| i.uid != uid);
            self.events.publish(StoreEvent::Indexes);
        }
        Ok(response)
    }

    /// Load and cache the settings of an index.
    ///
    /// Unlike the list fetches, failures are returned to the caller.
    pub async fn fetch_settings(
        &self,
        project: ProjectId,
        uid: &str,
    ) -> Result<Option<Settings>, ClientError> {
        let response = self
            .source
            .get_settings(project, uid)
            .await
            .inspect_err(|e| error!(error = %e, %project, uid, "Failed to fetch settings"))?;

        self.state.write().await.settings.clone_from(&response.data);
        self.events.publish(StoreEvent::Settings);
        Ok(response.data)
    }

    /// Patch the settings of an index. The cache is untouched: the change
    /// is applied by an asynchronous task.
    pub async fn update_settings(
        &self,
        project: ProjectId,
        uid: &str,
        settings: &Settings,
    ) -> Result<ApiResponse<TaskRef>, ClientError> {
        self.source
            .update_settings(project, uid, settings)
            .await
            .inspect_err(|e| error!(error = %e, %project, uid, "Failed to update settings"))
    }

    /// Clear the current index and its settings.
    pub async fn clear_current_index(&self) {
        {
            let mut state = self.state.write().await;
            state.current_index = None;
            state.settings = None;
        }
        self.events.publish(StoreEvent::CurrentIndex);
        self.events.publish(StoreEvent::Settings);
    }
}
