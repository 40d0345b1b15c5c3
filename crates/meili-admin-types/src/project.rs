//! Projects: configured connections to remote search-service instances.
//!
//! Project records come from the dashboard's own database and use
//! `snake_case` keys. The health, version and statistics payloads are
//! relayed from the search service itself and use `camelCase`.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::ids::ProjectId;

/// A configured search-service instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct Project {
    /// Database identifier.
    pub id: ProjectId,
    /// Display name.
    pub name: String,
    /// Base URL of the search service (stored without a trailing slash).
    pub url: String,
    /// Master API key, if the instance requires one.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
    /// Soft-deleted projects are inactive and hidden by default.
    #[serde(default = "default_active")]
    pub is_active: bool,
    /// Creation time (UTC, naive).
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    /// Last update time (UTC, naive).
    #[serde(default)]
    pub updated_at: Option<NaiveDateTime>,
}

const fn default_active() -> bool {
    true
}

/// Payload for `POST /projects`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct NewProject {
    /// Display name (required by the backend).
    pub name: String,
    /// Base URL of the search service (required by the backend).
    pub url: String,
    /// Master API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Free-form description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl NewProject {
    /// Create a payload with the two required fields.
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            api_key: None,
            description: None,
        }
    }
}

/// Payload for `PUT /projects/{id}`. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ProjectUpdate {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// New master API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `POST /projects/test-connection`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ConnectionProbe {
    /// Instance URL to probe.
    pub url: String,
    /// Key to probe with.
    #[serde(default)]
    pub api_key: Option<String>,
}

/// Result of a connection test.
///
/// This endpoint answers with a bare object rather than the usual
/// envelope: `success` plus either version and stats or an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ConnectionReport {
    /// Whether the instance answered and reported healthy.
    #[serde(default)]
    pub success: bool,
    /// Version of the probed instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<ServerVersion>,
    /// Global statistics of the probed instance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<ServerStats>,
    /// Failure description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Payload of `GET /projects/{id}/stats`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct ProjectStats {
    /// Version of the instance, absent when it could not be reached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<ServerVersion>,
    /// Global statistics, absent when the instance could not be reached.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<ServerStats>,
    /// Health flag reported by the instance.
    #[serde(default)]
    pub healthy: bool,
    /// Why the instance could not be queried.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Version triple reported by the search service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ServerVersion {
    /// Package version, e.g. `1.11.0`.
    #[serde(default)]
    pub pkg_version: String,
    /// Build commit.
    #[serde(default)]
    pub commit_sha: String,
    /// Build commit date.
    #[serde(default)]
    pub commit_date: String,
}

/// Instance-wide statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ServerStats {
    /// On-disk size in bytes.
    #[serde(default)]
    pub database_size: u64,
    /// Bytes actually used inside the database file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub used_database_size: Option<u64>,
    /// Time of the last completed update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_update: Option<String>,
    /// Per-index statistics keyed by index uid.
    #[serde(default)]
    pub indexes: BTreeMap<String, IndexStats>,
}

/// Statistics of one index.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct IndexStats {
    /// Number of stored documents.
    #[serde(default)]
    pub number_of_documents: u64,
    /// Whether a task is currently writing to the index.
    #[serde(default)]
    pub is_indexing: bool,
    /// Count of documents per field name.
    #[serde(default)]
    pub field_distribution: BTreeMap<String, u64>,
}
