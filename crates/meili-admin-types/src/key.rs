//! API keys managed through the search service's key endpoints.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// An API key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct ApiKey {
    /// Stable key uid.
    pub uid: Uuid,
    /// The secret key value.
    pub key: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Permitted actions, e.g. `search` or `documents.*`.
    #[serde(default)]
    pub actions: Vec<String>,
    /// Index uids (or patterns) the key applies to.
    #[serde(default)]
    pub indexes: Vec<String>,
    /// Expiry, `None` for keys that never expire.
    #[serde(default)]
    pub expires_at: Option<String>,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update time.
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// One page of keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct KeyList {
    /// Keys on this page.
    #[serde(default)]
    pub results: Vec<ApiKey>,
    /// Offset of the first key.
    #[serde(default)]
    pub offset: u64,
    /// Page size.
    #[serde(default)]
    pub limit: u64,
    /// Total number of keys.
    #[serde(default)]
    pub total: u64,
}

/// Body of `POST /projects/{id}/keys`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct NewKey {
    /// Permitted actions (required by the backend).
    pub actions: Vec<String>,
    /// Index uids or patterns (required by the backend).
    pub indexes: Vec<String>,
    /// Display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Caller-chosen uid.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<Uuid>,
    /// RFC 3339 expiry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<String>,
}

/// Body of `PATCH /projects/{id}/keys/{key}`. Only name and description
/// are mutable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct KeyUpdate {
    /// New display name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_key_uses_camel_case() {
        let body = NewKey {
            actions: vec!["search".to_owned()],
            indexes: vec!["*".to_owned()],
            expires_at: Some("2030-01-01T00:00:00Z".to_owned()),
            ..NewKey::default()
        };
        let json = serde_json::to_value(&body).unwrap_or_default();
        assert_eq!(
            json,
            serde_json::json!({
                "actions": ["search"],
                "indexes": ["*"],
                "expiresAt": "2030-01-01T00:00:00Z"
            })
        );
    }

    #[test]
    fn key_list_decodes() {
        let raw = r#"{
            "results": [{
                "uid": "6062abda-a5aa-4414-ac91-ecd7944c0f8d",
                "key": "d0552b41536279a0ad88bd595327b96f01176a60c2243e906c52ac02375f9bc4",
                "name": "Default Search API Key",
                "description": null,
                "actions": ["search"],
                "indexes": ["*"],
                "expiresAt": null,
                "createdAt": "2024-01-01T00:00:00Z",
                "updatedAt": "2024-01-01T00:00:00Z"
            }],
            "offset": 0, "limit": 20, "total": 1
        }"#;
        let list: KeyList = serde_json::from_str(raw).unwrap_or_default();
        assert_eq!(list.total, 1);
        assert_eq!(
            list.results.first().and_then(|k| k.name.as_deref()),
            Some("Default Search API Key")
        );
    }
}
