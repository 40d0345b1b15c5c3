//! API key endpoints (`/projects/{id}/keys`).

use meili_admin_types::{ApiKey, ApiResponse, KeyList, KeyUpdate, NewKey, ProjectId};

use crate::error::ClientError;
use crate::http::Http;

/// API key management. `key` arguments accept either the key value or its uid.
#[derive(Debug, Clone, Copy)]
pub struct KeyApi<'a> {
    http: &'a Http,
}

impl<'a> KeyApi<'a> {
    pub(crate) const fn new(http: &'a Http) -> Self {
        Self { http }
    }

    /// `GET /projects/{p}/keys`.
    pub async fn get_all(&self, project: ProjectId) -> Result<ApiResponse<KeyList>, ClientError> {
        let p = project.to_string();
        self.http.get(&["projects", &p, "keys"], &[]).await
    }

    /// `GET /projects/{p}/keys/{key}`.
    pub async fn get(
        &self,
        project: ProjectId,
        key: &str,
    ) -> Result<ApiResponse<ApiKey>, ClientError> {
        let p = project.to_string();
        self.http.get(&["projects", &p, "keys", key], &[]).await
    }

    /// `POST /projects/{p}/keys`. `actions` and `indexes` must be non-empty.
    pub async fn create(
        &self,
        project: ProjectId,
        data: &NewKey,
    ) -> Result<ApiResponse<ApiKey>, ClientError> {
        let p = project.to_string();
        self.http.post(&["projects", &p, "keys"], data).await
    }

    /// `PATCH /projects/{p}/keys/{key}`.
    pub async fn update(
        &self,
        project: ProjectId,
        key: &str,
        data: &KeyUpdate,
    ) -> Result<ApiResponse<ApiKey>, ClientError> {
        let p = project.to_string();
        self.http.patch(&["projects", &p, "keys", key], data).await
    }

    /// `DELETE /projects/{p}/keys/{key}`.
    pub async fn delete(&self, project: ProjectId, key: &str) -> Result<ApiResponse<()>, ClientError> {
        let p = project.to_string();
        self.http.delete(&["projects", &p, "keys", key], &[]).await
    }
}
