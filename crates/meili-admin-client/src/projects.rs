//! Project endpoints (`/projects`).

use meili_admin_types::{
    ApiResponse, ConnectionProbe, ConnectionReport, NewProject, Project, ProjectId, ProjectStats,
    ProjectUpdate,
};

use crate::error::ClientError;
use crate::http::Http;

/// Project CRUD, connection tests and instance statistics.
#[derive(Debug, Clone, Copy)]
pub struct ProjectApi<'a> {
    http: &'a Http,
}

impl<'a> ProjectApi<'a> {
    pub(crate) const fn new(http: &'a Http) -> Self {
        Self { http }
    }

    /// `GET /projects`. Soft-deleted projects are included only on request.
    pub async fn get_all(
        &self,
        include_inactive: bool,
    ) -> Result<ApiResponse<Vec<Project>>, ClientError> {
        self.http
            .get(
                &["projects"],
                &[("include_inactive", include_inactive.to_string())],
            )
            .await
    }

    /// `GET /projects/{id}`.
    pub async fn get(&self, id: ProjectId) -> Result<ApiResponse<Project>, ClientError> {
        let id = id.to_string();
        self.http.get(&["projects", &id], &[]).await
    }

    /// `POST /projects`.
    pub async fn create(&self, data: &NewProject) -> Result<ApiResponse<Project>, ClientError> {
        self.http.post(&["projects"], data).await
    }

    /// `PUT /projects/{id}`.
    pub async fn update(
        &self,
        id: ProjectId,
        data: &ProjectUpdate,
    ) -> Result<ApiResponse<Project>, ClientError> {
        let id = id.to_string();
        self.http.put(&["projects", &id], data).await
    }

    /// `DELETE /projects/{id}`. A soft delete marks the project inactive;
    /// `hard` removes the record.
    pub async fn delete(&self, id: ProjectId, hard: bool) -> Result<ApiResponse<()>, ClientError> {
        let id = id.to_string();
        self.http
            .delete(&["projects", &id], &[("hard", hard.to_string())])
            .await
    }

    /// `POST /projects/test-connection`.
    ///
    /// The backend answers this one with a bare report, not an envelope.
    pub async fn test_connection(
        &self,
        url: &str,
        api_key: Option<&str>,
    ) -> Result<ConnectionReport, ClientError> {
        let probe = ConnectionProbe {
            url: url.to_owned(),
            api_key: api_key.map(ToOwned::to_owned),
        };
        self.http
            .post_raw(&["projects", "test-connection"], &probe)
            .await
    }

    /// `GET /projects/{id}/stats`.
    pub async fn get_stats(&self, id: ProjectId) -> Result<ApiResponse<ProjectStats>, ClientError> {
        let id = id.to_string();
        self.http.get(&["projects", &id, "stats"], &[]).await
    }
}
