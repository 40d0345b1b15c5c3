//! The API surface each store depends on.
//!
//! Stores are generic over these traits so tests can run them against
//! in-memory fakes. [`AdminClient`] implements both.

use std::future::Future;

use meili_admin_client::{AdminClient, ClientError};
use meili_admin_types::{
    ApiResponse, IndexDetail, IndexSummary, NewProject, Project, ProjectId, ProjectUpdate,
    Settings, TaskRef,
};

/// Result of one API call.
pub type ApiResult<T> = Result<ApiResponse<T>, ClientError>;

/// Project endpoints used by [`crate::ProjectStore`].
pub trait ProjectSource: Send + Sync {
    /// List projects.
    fn list_projects(
        &self,
        include_inactive: bool,
    ) -> impl Future<Output = ApiResult<Vec<Project>>> + Send;

    /// Fetch one project.
    fn get_project(&self, id: ProjectId) -> impl Future<Output = ApiResult<Project>> + Send;

    /// Create a project.
    fn create_project(&self, data: &NewProject)
    -> impl Future<Output = ApiResult<Project>> + Send;

    /// Update a project.
    fn update_project(
        &self,
        id: ProjectId,
        data: &ProjectUpdate,
    ) -> impl Future<Output = ApiResult<Project>> + Send;

    /// Delete a project; `hard` removes the record instead of deactivating it.
    fn delete_project(
        &self,
        id: ProjectId,
        hard: bool,
    ) -> impl Future<Output = ApiResult<()>> + Send;
}

/// Index endpoints used by [`crate::IndexStore`].
pub trait IndexSource: Send + Sync {
    /// List the indexes of a project.
    fn list_indexes(
        &self,
        project: ProjectId,
    ) -> impl Future<Output = ApiResult<Vec<IndexSummary>>> + Send;

    /// Fetch one index with its statistics.
    fn get_index(
        &self,
        project: ProjectId,
        uid: &str,
    ) -> impl Future<Output = ApiResult<IndexDetail>> + Send;

    /// Create an index.
    fn create_index(
        &self,
        project: ProjectId,
        uid: &str,
        primary_key: Option<&str>,
    ) -> impl Future<Output = ApiResult<TaskRef>> + Send;

    /// Delete an index.
    fn delete_index(
        &self,
        project: ProjectId,
        uid: &str,
    ) -> impl Future<Output = ApiResult<TaskRef>> + Send;

    /// Fetch all settings of an index.
    fn get_settings(
        &self,
        project: ProjectId,
        uid: &str,
    ) -> impl Future<Output = ApiResult<Settings>> + Send;

    /// Patch the settings of an index.
    fn update_settings(
        &self,
        project: ProjectId,
        uid: &str,
        settings: &Settings,
    ) -> impl Future<Output = ApiResult<TaskRef>> + Send;
}

impl ProjectSource for AdminClient {
    async fn list_projects(&self, include_inactive: bool) -> ApiResult<Vec<Project>> {
        self.projects().get_all(include_inactive).await
    }

    async fn get_project(&self, id: ProjectId) -> ApiResult<Project> {
        self.projects().get(id).await
    }

    async fn create_project(&self, data: &NewProject) -> ApiResult<Project> {
        self.projects().create(data).await
    }

    async fn update_project(&self, id: ProjectId, data: &ProjectUpdate) -> ApiResult<Project> {
        self.projects().update(id, data).await
    }

    async fn delete_project(&self, id: ProjectId, hard: bool) -> ApiResult<()> {
        self.projects().delete(id, hard).await
    }
}

impl IndexSource for AdminClient {
    async fn list_indexes(&self, project: ProjectId) -> ApiResult<Vec<IndexSummary>> {
        self.indexes().get_all(project).await
    }

    async fn get_index(&self, project: ProjectId, uid: &str) -> ApiResult<IndexDetail> {
        self.indexes().get(project, uid).await
    }

    async fn create_index(
        &self,
        project: ProjectId,
        uid: &str,
        primary_key: Option<&str>,
    ) -> ApiResult<TaskRef> {
        self.indexes().create(project, uid, primary_key).await
    }

    async fn delete_index(&self, project: ProjectId, uid: &str) -> ApiResult<TaskRef> {
        self.indexes().delete(project, uid).await
    }

    async fn get_settings(&self, project: ProjectId, uid: &str) -> ApiResult<Settings> {
        self.indexes().get_settings(project, uid).await
    }

    async fn update_settings(
        &self,
        project: ProjectId,
        uid: &str,
        settings: &Settings,
    ) -> ApiResult<TaskRef> {
        self.indexes().update_settings(project, uid, settings).await
    }
}
