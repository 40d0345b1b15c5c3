//! Project store: the cached project list and the project being viewed.

use meili_admin_client::ClientError;
use meili_admin_types::{ApiResponse, NewProject, Project, ProjectId, ProjectUpdate};
use serde::Serialize;
use tokio::sync::{RwLock, broadcast};
use tracing::{debug, error};

use crate::events::{Events, StoreEvent, StoreKind};
use crate::source::ProjectSource;

/// Everything the project store holds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectState {
    /// Cached project list, newest first after local creates.
    pub projects: Vec<Project>,
    /// Project currently open in the UI.
    pub current_project: Option<Project>,
    /// Whether a fetch is in flight.
    pub loading: bool,
    /// Message of the last failed fetch, cleared when the next one starts.
    pub error: Option<String>,
}

/// Mirrors the backend's projects for the UI.
///
/// Fetch actions record failures in [`ProjectState::error`] instead of
/// returning them. Write actions log failures and return them; on a
/// successful response they patch the cache in place instead of refetching.
#[derive(Debug)]
pub struct ProjectStore<S> {
    source: S,
    state: RwLock<ProjectState>,
    events: Events,
}

impl<S: ProjectSource> ProjectStore<S> {
    /// Create an empty store backed by `source`.
    pub fn new(source: S) -> Self {
        Self {
            source,
            state: RwLock::new(ProjectState::default()),
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
    pub async fn snapshot(&self) -> ProjectState {
        self.state.read().await.clone()
    }

    /// Cached project list.
    pub async fn projects(&self) -> Vec<Project> {
        self.state.read().await.projects.clone()
    }

    /// Project currently open in the UI.
    pub async fn current_project(&self) -> Option<Project> {
        self.state.read().await.current_project.clone()
    }

    /// Whether a fetch is in flight.
    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    /// Message of the last failed fetch.
    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    /// Cached project with the given id.
    pub async fn project_by_id(&self, id: ProjectId) -> Option<Project> {
        self.state
            .read()
            .await
            .projects
            .iter()
            .find(|p| p.id == id)
            .cloned()
    }

    /// Cached project for a route parameter such as `"3"`.
    ///
    /// Returns `None` when the parameter is not a project id.
    pub async fn project_by_param(&self, param: &str) -> Option<Project> {
        let id = param.parse().ok()?;
        self.project_by_id(id).await
    }

    async fn begin_fetch(&self) {
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.error = None;
        }
        self.events.publish(StoreEvent::Loading {
            store: StoreKind::Project,
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
                store: StoreKind::Project,
                message,
            });
        }
        self.events.publish(StoreEvent::Loading {
            store: StoreKind::Project,
            loading: false,
        });
    }

    /// Load the active projects into the cache.
    ///
    /// A response without data empties the list.
    pub async fn fetch_projects(&self) {
        self.begin_fetch().await;
        match self.source.list_projects(false).await {
            Ok(response) => {
                let projects = response.data.unwrap_or_default();
                debug!(count = projects.len(), "Fetched projects");
                self.state.write().await.projects = projects;
                self.events.publish(StoreEvent::Projects);
                self.end_fetch(None).await;
            }
            Err(e) => {
                error!(error = %e, "Failed to fetch projects");
                self.end_fetch(Some(e.to_string())).await;
            }
        }
    }

    /// Load one project and make it current.
    ///
    /// Returns the project, or `None` when the fetch failed.
    pub async fn fetch_project(&self, id: ProjectId) -> Option<Project> {
        self.begin_fetch().await;
        match self.source.get_project(id).await {
            Ok(response) => {
                self.state.write().await.current_project.clone_from(&response.data);
                self.events.publish(StoreEvent::CurrentProject);
                self.end_fetch(None).await;
                response.data
            }
            Err(e) => {
                error!(error = %e, %id, "Failed to fetch project");
                self.end_fetch(Some(e.to_string())).await;
                None
            }
        }
    }

    /// Create a project; on success it is prepended to the cache.
    pub async fn create_project(
        &self,
        data: &NewProject,
    ) -> Result<ApiResponse<Project>, ClientError> {
        let response = self
            .source
            .create_project(data)
            .await
            .inspect_err(|e| error!(error = %e, name = %data.name, "Failed to create project"))?;

        if let Some(project) = response.data.as_ref().filter(|_| response.success) {
            self.state.write().await.projects.insert(0, project.clone());
            self.events.publish(StoreEvent::Projects);
        }
        Ok(response)
    }

    /// Update a project; on success the cached entry and the current
    /// project (when it is the same one) are replaced.
    pub async fn update_project(
        &self,
        id: ProjectId,
        data: &ProjectUpdate,
    ) -> Result<ApiResponse<Project>, ClientError> {
        let response = self
            .source
            .update_project(id, data)
            .await
            .inspect_err(|e| error!(error = %e, %id, "Failed to update project"))?;

        if let Some(updated) = response.data.as_ref().filter(|_| response.success) {
            let (mut listed, mut current) = (false, false);
            {
                let mut state = self.state.write().await;
                if let Some(slot) = state.projects.iter_mut().find(|p| p.id == id) {
                    slot.clone_from(updated);
                    listed = true;
                }
                if let Some(slot) = state.current_project.as_mut().filter(|p| p.id == id) {
                    slot.clone_from(updated);
                    current = true;
                }
            }
            if listed {
                self.events.publish(StoreEvent::Projects);
            }
            if current {
                self.events.publish(StoreEvent::CurrentProject);
            }
        }
        Ok(response)
    }

    /// Soft-delete a project; on success it leaves the cache and stops
    /// being current.
    pub async fn delete_project(&self, id: ProjectId) -> Result<ApiResponse<()>, ClientError> {
        let response = self
            .source
            .delete_project(id, false)
            .await
            .inspect_err(|e| error!(error = %e, %id, "Failed to delete project"))?;

        if response.success {
            let cleared = {
                let mut state = self.state.write().await;
                state.projects.retain(|p| p.id != id);
                let is_current = state.current_project.as_ref().is_some_and(|p| p.id == id);
                if is_current {
                    state.current_project = None;
                }
                is_current
            };
            self.events.publish(StoreEvent::Projects);
            if cleared {
                self.events.publish(StoreEvent::CurrentProject);
            }
        }
        Ok(response)
    }

    /// Make `project` current without fetching.
    pub async fn set_current_project(&self, project: Option<Project>) {
        self.state.write().await.current_project = project;
        self.events.publish(StoreEvent::CurrentProject);
    }

    /// Clear the current project.
    pub async fn clear_current_project(&self) {
        self.set_current_project(None).await;
    }
}
