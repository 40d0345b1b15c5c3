//! Indexes, documents and search payloads.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::project::IndexStats;

/// A document is an arbitrary JSON object; the primary key is one of its fields.
pub type Document = Value;

/// One entry of `GET /projects/{id}/indexes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct IndexSummary {
    /// Index uid (unique name inside the instance).
    pub uid: String,
    /// Primary key attribute, unset until the first document import infers it.
    #[serde(default)]
    pub primary_key: Option<String>,
    /// Creation time as reported by the search service.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update time as reported by the search service.
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// Payload of `GET /projects/{id}/indexes/{uid}`: the summary plus stats.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct IndexDetail {
    /// Index uid.
    pub uid: String,
    /// Primary key attribute.
    #[serde(default)]
    pub primary_key: Option<String>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Document counts and indexing flag.
    #[serde(default)]
    pub stats: Option<IndexStats>,
}

/// Body of `POST /projects/{id}/indexes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct NewIndex {
    /// Uid of the index to create.
    pub uid: String,
    /// Primary key attribute; `null` lets the service infer it.
    pub primary_key: Option<String>,
}

/// Query string of `GET .../documents`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DocumentQuery {
    /// Number of documents to skip (backend default 0).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    /// Page size (backend default 20).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    /// Attributes to return, sent comma-joined.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fields: Option<Vec<String>>,
}

impl DocumentQuery {
    /// Flatten into query-string pairs, skipping unset fields.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(fields) = self.fields.as_ref().filter(|f| !f.is_empty()) {
            pairs.push(("fields", fields.join(",")));
        }
        pairs
    }
}

/// One page of documents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DocumentPage {
    /// Documents on this page.
    #[serde(default)]
    pub results: Vec<Document>,
    /// Offset of the first document.
    #[serde(default)]
    pub offset: u64,
    /// Requested page size.
    #[serde(default)]
    pub limit: u64,
    /// Total documents in the index.
    #[serde(default)]
    pub total: u64,
}

/// Body of `POST .../documents`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct NewDocuments {
    /// Documents to add or replace.
    pub documents: Vec<Document>,
    /// Primary key to use when the index has none yet.
    pub primary_key: Option<String>,
}

/// Body of a batch `DELETE .../documents`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct DocumentIds {
    /// Primary key values of the documents to delete.
    pub ids: Vec<String>,
}

/// Body of `POST .../documents/fetch-url`: the backend downloads JSON from
/// `url`, walks `field_path` (dot separated, numeric segments index arrays)
/// and imports what it finds.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct UrlImport {
    /// Remote JSON resource.
    pub url: String,
    /// Path to the document array inside the response, e.g. `data.items`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_path: Option<String>,
    /// Primary key to use when the index has none yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_key: Option<String>,
    /// Extra request headers for the download.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}

/// Search parameters. `q` is always sent; everything else only when set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct SearchRequest {
    /// Query text; empty matches everything.
    #[serde(default)]
    pub q: String,
    /// Maximum hits to return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    /// Hits to skip.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    /// Filter expression (string or nested arrays).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Value>,
    /// Sort criteria such as `price:asc`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<Vec<String>>,
    /// Attributes to compute facet distributions for.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facets: Option<Vec<String>>,
    /// Attributes to include in each hit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes_to_retrieve: Option<Vec<String>>,
    /// Attributes to highlight in `_formatted`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes_to_highlight: Option<Vec<String>>,
    /// Add `_rankingScore` to each hit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_ranking_score: Option<bool>,
}

impl SearchRequest {
    /// A request for `q` with default parameters.
    pub fn new(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            ..Self::default()
        }
    }
}

/// Search response relayed from the search service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct SearchResults {
    /// Matching documents.
    #[serde(default)]
    pub hits: Vec<Document>,
    /// Echo of the query text.
    #[serde(default)]
    pub query: String,
    /// Server-side processing time.
    #[serde(default)]
    pub processing_time_ms: u64,
    /// Applied limit.
    #[serde(default)]
    pub limit: Option<u64>,
    /// Applied offset.
    #[serde(default)]
    pub offset: Option<u64>,
    /// Estimated number of matches.
    #[serde(default)]
    pub estimated_total_hits: Option<u64>,
    /// Facet value counts per requested facet.
    #[serde(default)]
    pub facet_distribution: Option<BTreeMap<String, BTreeMap<String, u64>>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_request_sends_only_set_params() {
        let mut req = SearchRequest::new("dune");
        req.limit = Some(5);
        req.show_ranking_score = Some(true);
        let json = serde_json::to_value(&req).unwrap_or_default();
        assert_eq!(
            json,
            serde_json::json!({"q": "dune", "limit": 5, "showRankingScore": true})
        );
    }

    #[test]
    fn document_query_joins_fields() {
        let query = DocumentQuery {
            offset: None,
            limit: Some(50),
            fields: Some(vec!["id".to_owned(), "title".to_owned()]),
        };
        assert_eq!(
            query.to_query_pairs(),
            vec![("limit", "50".to_owned()), ("fields", "id,title".to_owned())]
        );
    }

    #[test]
    fn new_index_sends_null_primary_key() {
        let body = NewIndex {
            uid: "movies".to_owned(),
            primary_key: None,
        };
        let json = serde_json::to_value(&body).unwrap_or_default();
        assert_eq!(json, serde_json::json!({"uid": "movies", "primaryKey": null}));
    }
}
