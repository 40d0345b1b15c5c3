//! Index, document, search and settings endpoints
//! (`/projects/{id}/indexes/...`).

use meili_admin_types::{
    ApiResponse, Document, DocumentIds, DocumentPage, DocumentQuery, Faceting, IndexDetail,
    IndexStats, IndexSummary, NewDocuments, NewIndex, Pagination, ProjectId, SearchRequest,
    SearchResults, Settings, Synonyms, TaskRef, TypoTolerance, UrlImport,
};
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::ClientError;
use crate::http::Http;

/// Everything scoped to one index of a project.
#[derive(Debug, Clone, Copy)]
pub struct IndexApi<'a> {
    http: &'a Http,
}

impl<'a> IndexApi<'a> {
    pub(crate) const fn new(http: &'a Http) -> Self {
        Self { http }
    }

    // -----------------------------------------------------------------------
    // Indexes
    // -----------------------------------------------------------------------

    /// `GET /projects/{p}/indexes`.
    pub async fn get_all(
        &self,
        project: ProjectId,
    ) -> Result<ApiResponse<Vec<IndexSummary>>, ClientError> {
        let p = project.to_string();
        self.http.get(&["projects", &p, "indexes"], &[]).await
    }

    /// `GET /projects/{p}/indexes/{uid}`.
    pub async fn get(
        &self,
        project: ProjectId,
        uid: &str,
    ) -> Result<ApiResponse<IndexDetail>, ClientError> {
        let p = project.to_string();
        self.http.get(&["projects", &p, "indexes", uid], &[]).await
    }

    /// `POST /projects/{p}/indexes`.
    pub async fn create(
        &self,
        project: ProjectId,
        uid: &str,
        primary_key: Option<&str>,
    ) -> Result<ApiResponse<TaskRef>, ClientError> {
        let p = project.to_string();
        let body = NewIndex {
            uid: uid.to_owned(),
            primary_key: primary_key.map(ToOwned::to_owned),
        };
        self.http.post(&["projects", &p, "indexes"], &body).await
    }

    /// `DELETE /projects/{p}/indexes/{uid}`.
    pub async fn delete(
        &self,
        project: ProjectId,
        uid: &str,
    ) -> Result<ApiResponse<TaskRef>, ClientError> {
        let p = project.to_string();
        self.http
            .delete(&["projects", &p, "indexes", uid], &[])
            .await
    }

    /// `GET /projects/{p}/indexes/{uid}/stats`.
    pub async fn get_stats(
        &self,
        project: ProjectId,
        uid: &str,
    ) -> Result<ApiResponse<IndexStats>, ClientError> {
        let p = project.to_string();
        self.http
            .get(&["projects", &p, "indexes", uid, "stats"], &[])
            .await
    }

    // -----------------------------------------------------------------------
    // Documents
    // -----------------------------------------------------------------------

    /// `GET .../documents`.
    pub async fn get_documents(
        &self,
        project: ProjectId,
        uid: &str,
        params: &DocumentQuery,
    ) -> Result<ApiResponse<DocumentPage>, ClientError> {
        let p = project.to_string();
        self.http
            .get(
                &["projects", &p, "indexes", uid, "documents"],
                &params.to_query_pairs(),
            )
            .await
    }

    /// `GET .../documents/{doc_id}`.
    pub async fn get_document(
        &self,
        project: ProjectId,
        uid: &str,
        doc_id: &str,
    ) -> Result<ApiResponse<Document>, ClientError> {
        let p = project.to_string();
        self.http
            .get(&["projects", &p, "indexes", uid, "documents", doc_id], &[])
            .await
    }

    /// `POST .../documents`.
    pub async fn add_documents(
        &self,
        project: ProjectId,
        uid: &str,
        documents: Vec<Document>,
        primary_key: Option<&str>,
    ) -> Result<ApiResponse<TaskRef>, ClientError> {
        let p = project.to_string();
        let body = NewDocuments {
            documents,
            primary_key: primary_key.map(ToOwned::to_owned),
        };
        self.http
            .post(&["projects", &p, "indexes", uid, "documents"], &body)
            .await
    }

    /// `POST .../documents/upload` with a `.json` or `.csv` file.
    ///
    /// The backend parses the file; the envelope's `count` reports how many
    /// documents it found.
    pub async fn upload_documents(
        &self,
        project: ProjectId,
        uid: &str,
        file_name: &str,
        contents: Vec<u8>,
        primary_key: Option<&str>,
    ) -> Result<ApiResponse<TaskRef>, ClientError> {
        let p = project.to_string();
        let mut form = Form::new().part("file", Part::bytes(contents).file_name(file_name.to_owned()));
        if let Some(pk) = primary_key {
            form = form.text("primaryKey", pk.to_owned());
        }
        self.http
            .post_multipart(&["projects", &p, "indexes", uid, "documents", "upload"], form)
            .await
    }

    /// `POST .../documents/fetch-url`: the backend downloads and imports.
    pub async fn import_from_url(
        &self,
        project: ProjectId,
        uid: &str,
        import: &UrlImport,
    ) -> Result<ApiResponse<TaskRef>, ClientError> {
        let p = project.to_string();
        self.http
            .post(
                &["projects", &p, "indexes", uid, "documents", "fetch-url"],
                import,
            )
            .await
    }

    /// `DELETE .../documents/{doc_id}`.
    pub async fn delete_document(
        &self,
        project: ProjectId,
        uid: &str,
        doc_id: &str,
    ) -> Result<ApiResponse<TaskRef>, ClientError> {
        let p = project.to_string();
        self.http
            .delete(&["projects", &p, "indexes", uid, "documents", doc_id], &[])
            .await
    }

    /// `DELETE .../documents` with `{ids}`: deletes only the listed documents.
    pub async fn delete_documents(
        &self,
        project: ProjectId,
        uid: &str,
        ids: Vec<String>,
    ) -> Result<ApiResponse<TaskRef>, ClientError> {
        let p = project.to_string();
        self.http
            .delete_with_body(
                &["projects", &p, "indexes", uid, "documents"],
                &DocumentIds { ids },
            )
            .await
    }

    /// `DELETE .../documents` without a body: empties the index.
    pub async fn delete_all_documents(
        &self,
        project: ProjectId,
        uid: &str,
    ) -> Result<ApiResponse<TaskRef>, ClientError> {
        let p = project.to_string();
        self.http
            .delete(&["projects", &p, "indexes", uid, "documents"], &[])
            .await
    }

    // -----------------------------------------------------------------------
    // Search
    // -----------------------------------------------------------------------

    /// `POST .../search`.
    pub async fn search(
        &self,
        project: ProjectId,
        uid: &str,
        request: &SearchRequest,
    ) -> Result<ApiResponse<SearchResults>, ClientError> {
        let p = project.to_string();
        self.http
            .post(&["projects", &p, "indexes", uid, "search"], request)
            .await
    }

    // -----------------------------------------------------------------------
    // Settings
    // -----------------------------------------------------------------------

    /// `GET .../settings`.
    pub async fn get_settings(
        &self,
        project: ProjectId,
        uid: &str,
    ) -> Result<ApiResponse<Settings>, ClientError> {
        let p = project.to_string();
        self.http
            .get(&["projects", &p, "indexes", uid, "settings"], &[])
            .await
    }

    /// `PATCH .../settings` with the fields to change.
    pub async fn update_settings(
        &self,
        project: ProjectId,
        uid: &str,
        settings: &Settings,
    ) -> Result<ApiResponse<TaskRef>, ClientError> {
        let p = project.to_string();
        self.http
            .patch(&["projects", &p, "indexes", uid, "settings"], settings)
            .await
    }

    /// `DELETE .../settings`: restores every setting to its default.
    pub async fn reset_settings(
        &self,
        project: ProjectId,
        uid: &str,
    ) -> Result<ApiResponse<TaskRef>, ClientError> {
        let p = project.to_string();
        self.http
            .delete(&["projects", &p, "indexes", uid, "settings"], &[])
            .await
    }

    async fn get_setting<T: DeserializeOwned>(
        &self,
        project: ProjectId,
        uid: &str,
        name: &str,
    ) -> Result<ApiResponse<T>, ClientError> {
        let p = project.to_string();
        self.http
            .get(&["projects", &p, "indexes", uid, "settings", name], &[])
            .await
    }

    async fn put_setting<B: Serialize + ?Sized>(
        &self,
        project: ProjectId,
        uid: &str,
        name: &str,
        body: &B,
    ) -> Result<ApiResponse<TaskRef>, ClientError> {
        let p = project.to_string();
        self.http
            .put(&["projects", &p, "indexes", uid, "settings", name], body)
            .await
    }

    async fn patch_setting<B: Serialize + ?Sized>(
        &self,
        project: ProjectId,
        uid: &str,
        name: &str,
        body: &B,
    ) -> Result<ApiResponse<TaskRef>, ClientError> {
        let p = project.to_string();
        self.http
            .patch(&["projects", &p, "indexes", uid, "settings", name], body)
            .await
    }

    /// `GET .../settings/searchable-attributes`.
    pub async fn get_searchable_attributes(
        &self,
        project: ProjectId,
        uid: &str,
    ) -> Result<ApiResponse<Vec<String>>, ClientError> {
        self.get_setting(project, uid, "searchable-attributes").await
    }

    /// `PUT .../settings/searchable-attributes`.
    pub async fn update_searchable_attributes(
        &self,
        project: ProjectId,
        uid: &str,
        attrs: &[String],
    ) -> Result<ApiResponse<TaskRef>, ClientError> {
        self.put_setting(project, uid, "searchable-attributes", attrs).await
    }

    /// `GET .../settings/displayed-attributes`.
    pub async fn get_displayed_attributes(
        &self,
        project: ProjectId,
        uid: &str,
    ) -> Result<ApiResponse<Vec<String>>, ClientError> {
        self.get_setting(project, uid, "displayed-attributes").await
    }

    /// `PUT .../settings/displayed-attributes`.
    pub async fn update_displayed_attributes(
        &self,
        project: ProjectId,
        uid: &str,
        attrs: &[String],
    ) -> Result<ApiResponse<TaskRef>, ClientError> {
        self.put_setting(project, uid, "displayed-attributes", attrs).await
    }

    /// `GET .../settings/filterable-attributes`.
    pub async fn get_filterable_attributes(
        &self,
        project: ProjectId,
        uid: &str,
    ) -> Result<ApiResponse<Vec<String>>, ClientError> {
        self.get_setting(project, uid, "filterable-attributes").await
    }

    /// `PUT .../settings/filterable-attributes`.
    pub async fn update_filterable_attributes(
        &self,
        project: ProjectId,
        uid: &str,
        attrs: &[String],
    ) -> Result<ApiResponse<TaskRef>, ClientError> {
        self.put_setting(project, uid, "filterable-attributes", attrs).await
    }

    /// `GET .../settings/sortable-attributes`.
    pub async fn get_sortable_attributes(
        &self,
        project: ProjectId,
        uid: &str,
    ) -> Result<ApiResponse<Vec<String>>, ClientError> {
        self.get_setting(project, uid, "sortable-attributes").await
    }

    /// `PUT .../settings/sortable-attributes`.
    pub async fn update_sortable_attributes(
        &self,
        project: ProjectId,
        uid: &str,
        attrs: &[String],
    ) -> Result<ApiResponse<TaskRef>, ClientError> {
        self.put_setting(project, uid, "sortable-attributes", attrs).await
    }

    /// `GET .../settings/ranking-rules`.
    pub async fn get_ranking_rules(
        &self,
        project: ProjectId,
        uid: &str,
    ) -> Result<ApiResponse<Vec<String>>, ClientError> {
        self.get_setting(project, uid, "ranking-rules").await
    }

    /// `PUT .../settings/ranking-rules`.
    pub async fn update_ranking_rules(
        &self,
        project: ProjectId,
        uid: &str,
        rules: &[String],
    ) -> Result<ApiResponse<TaskRef>, ClientError> {
        self.put_setting(project, uid, "ranking-rules", rules).await
    }

    /// `GET .../settings/synonyms`.
    pub async fn get_synonyms(
        &self,
        project: ProjectId,
        uid: &str,
    ) -> Result<ApiResponse<Synonyms>, ClientError> {
        self.get_setting(project, uid, "synonyms").await
    }

    /// `PUT .../settings/synonyms`.
    pub async fn update_synonyms(
        &self,
        project: ProjectId,
        uid: &str,
        synonyms: &Synonyms,
    ) -> Result<ApiResponse<TaskRef>, ClientError> {
        self.put_setting(project, uid, "synonyms", synonyms).await
    }

    /// `GET .../settings/stop-words`.
    pub async fn get_stop_words(
        &self,
        project: ProjectId,
        uid: &str,
    ) -> Result<ApiResponse<Vec<String>>, ClientError> {
        self.get_setting(project, uid, "stop-words").await
    }

    /// `PUT .../settings/stop-words`.
    pub async fn update_stop_words(
        &self,
        project: ProjectId,
        uid: &str,
        words: &[String],
    ) -> Result<ApiResponse<TaskRef>, ClientError> {
        self.put_setting(project, uid, "stop-words", words).await
    }

    /// `GET .../settings/typo-tolerance`.
    pub async fn get_typo_tolerance(
        &self,
        project: ProjectId,
        uid: &str,
    ) -> Result<ApiResponse<TypoTolerance>, ClientError> {
        self.get_setting(project, uid, "typo-tolerance").await
    }

    /// `PATCH .../settings/typo-tolerance`.
    pub async fn update_typo_tolerance(
        &self,
        project: ProjectId,
        uid: &str,
        config: &TypoTolerance,
    ) -> Result<ApiResponse<TaskRef>, ClientError> {
        self.patch_setting(project, uid, "typo-tolerance", config).await
    }

    /// `GET .../settings/pagination`.
    pub async fn get_pagination(
        &self,
        project: ProjectId,
        uid: &str,
    ) -> Result<ApiResponse<Pagination>, ClientError> {
        self.get_setting(project, uid, "pagination").await
    }

    /// `PATCH .../settings/pagination`.
    pub async fn update_pagination(
        &self,
        project: ProjectId,
        uid: &str,
        config: &Pagination,
    ) -> Result<ApiResponse<TaskRef>, ClientError> {
        self.patch_setting(project, uid, "pagination", config).await
    }

    /// `GET .../settings/faceting`.
    pub async fn get_faceting(
        &self,
        project: ProjectId,
        uid: &str,
    ) -> Result<ApiResponse<Faceting>, ClientError> {
        self.get_setting(project, uid, "faceting").await
    }

    /// `PATCH .../settings/faceting`.
    pub async fn update_faceting(
        &self,
        project: ProjectId,
        uid: &str,
        config: &Faceting,
    ) -> Result<ApiResponse<TaskRef>, ClientError> {
        self.patch_setting(project, uid, "faceting", config).await
    }

    /// `GET .../settings/dictionary`.
    pub async fn get_dictionary(
        &self,
        project: ProjectId,
        uid: &str,
    ) -> Result<ApiResponse<Vec<String>>, ClientError> {
        self.get_setting(project, uid, "dictionary").await
    }

    /// `PUT .../settings/dictionary`.
    pub async fn update_dictionary(
        &self,
        project: ProjectId,
        uid: &str,
        words: &[String],
    ) -> Result<ApiResponse<TaskRef>, ClientError> {
        self.put_setting(project, uid, "dictionary", words).await
    }

    /// `GET .../settings/separator-tokens`.
    pub async fn get_separator_tokens(
        &self,
        project: ProjectId,
        uid: &str,
    ) -> Result<ApiResponse<Vec<String>>, ClientError> {
        self.get_setting(project, uid, "separator-tokens").await
    }

    /// `PUT .../settings/separator-tokens`.
    pub async fn update_separator_tokens(
        &self,
        project: ProjectId,
        uid: &str,
        tokens: &[String],
    ) -> Result<ApiResponse<TaskRef>, ClientError> {
        self.put_setting(project, uid, "separator-tokens", tokens).await
    }
}
