//! Task endpoints (`/projects/{id}/tasks`).

use meili_admin_types::{
    ApiResponse, ProjectId, Task, TaskFilter, TaskList, TaskQuery, TaskRef, TaskUid, WaitRequest,
};

use crate::error::ClientError;
use crate::http::Http;

/// Task listing, cancelation, deletion and waiting.
#[derive(Debug, Clone, Copy)]
pub struct TaskApi<'a> {
    http: &'a Http,
}

impl<'a> TaskApi<'a> {
    pub(crate) const fn new(http: &'a Http) -> Self {
        Self { http }
    }

    /// `GET /projects/{p}/tasks` with list filters joined by commas.
    pub async fn get_all(
        &self,
        project: ProjectId,
        query: &TaskQuery,
    ) -> Result<ApiResponse<TaskList>, ClientError> {
        let p = project.to_string();
        self.http
            .get(&["projects", &p, "tasks"], &query.to_query_pairs())
            .await
    }

    /// `GET /projects/{p}/tasks/{uid}`.
    pub async fn get(
        &self,
        project: ProjectId,
        task: TaskUid,
    ) -> Result<ApiResponse<Task>, ClientError> {
        let p = project.to_string();
        let t = task.to_string();
        self.http.get(&["projects", &p, "tasks", &t], &[]).await
    }

    /// `POST /projects/{p}/tasks/cancel`. The backend answers 400 for an
    /// empty filter.
    pub async fn cancel(
        &self,
        project: ProjectId,
        filter: &TaskFilter,
    ) -> Result<ApiResponse<TaskRef>, ClientError> {
        let p = project.to_string();
        self.http
            .post(&["projects", &p, "tasks", "cancel"], filter)
            .await
    }

    /// `DELETE /projects/{p}/tasks` with the filter as body.
    pub async fn delete(
        &self,
        project: ProjectId,
        filter: &TaskFilter,
    ) -> Result<ApiResponse<TaskRef>, ClientError> {
        let p = project.to_string();
        self.http
            .delete_with_body(&["projects", &p, "tasks"], filter)
            .await
    }

    /// `POST /projects/{p}/tasks/{uid}/wait`: the backend polls until the
    /// task finishes or `timeout_ms` elapses.
    pub async fn wait(
        &self,
        project: ProjectId,
        task: TaskUid,
        timeout_ms: Option<u64>,
    ) -> Result<ApiResponse<Task>, ClientError> {
        let p = project.to_string();
        let t = task.to_string();
        let body = timeout_ms.map_or_else(WaitRequest::default, |timeout| WaitRequest { timeout });
        self.http
            .post(&["projects", &p, "tasks", &t, "wait"], &body)
            .await
    }
}
