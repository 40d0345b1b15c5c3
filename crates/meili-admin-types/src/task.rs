//! Asynchronous task records and task filters.
//!
//! Every write against the search service is queued as a task. Write
//! endpoints answer with a [`TaskRef`]; the task endpoints expose the full
//! [`Task`] records.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use ts_rs::TS;

use crate::ids::TaskUid;

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export, export_to = "bindings/")]
pub enum TaskStatus {
    /// Waiting in the queue.
    Enqueued,
    /// Being applied.
    Processing,
    /// Applied.
    Succeeded,
    /// Rejected; see the task error.
    Failed,
    /// Canceled before completion.
    Canceled,
}

impl TaskStatus {
    /// Wire name of the status.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Enqueued => "enqueued",
            Self::Processing => "processing",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Canceled => "canceled",
        }
    }

    /// Whether the task can no longer change.
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed | Self::Canceled)
    }
}

impl core::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A status name that is not one of the five task states.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown task status: {0:?}")]
pub struct UnknownStatus(pub String);

impl core::str::FromStr for TaskStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        [
            Self::Enqueued,
            Self::Processing,
            Self::Succeeded,
            Self::Failed,
            Self::Canceled,
        ]
        .into_iter()
        .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
        .ok_or_else(|| UnknownStatus(s.to_owned()))
    }
}

/// Handle returned by every queued write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct TaskRef {
    /// Uid of the queued task.
    pub task_uid: TaskUid,
    /// Status at enqueue time.
    pub status: TaskStatus,
}

/// A task record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct Task {
    /// Task uid.
    pub uid: TaskUid,
    /// Target index, absent for instance-wide tasks.
    #[serde(default)]
    pub index_uid: Option<String>,
    /// Current status.
    pub status: TaskStatus,
    /// Task type, e.g. `documentAdditionOrUpdate`.
    #[serde(rename = "type", default)]
    pub kind: String,
    /// Uid of the cancelation task that canceled this one.
    #[serde(default)]
    pub canceled_by: Option<TaskUid>,
    /// Type-specific details.
    #[serde(default)]
    pub details: Option<Value>,
    /// Failure details.
    #[serde(default)]
    pub error: Option<Value>,
    /// ISO-8601 duration of processing.
    #[serde(default)]
    pub duration: Option<String>,
    /// Enqueue time.
    #[serde(default)]
    pub enqueued_at: Option<String>,
    /// Processing start time.
    #[serde(default)]
    pub started_at: Option<String>,
    /// Completion time.
    #[serde(default)]
    pub finished_at: Option<String>,
}

/// One page of tasks, newest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct TaskList {
    /// Tasks on this page.
    #[serde(default)]
    pub results: Vec<Task>,
    /// Page size.
    #[serde(default)]
    pub limit: u64,
    /// Uid of the first task on this page.
    #[serde(default)]
    pub from: Option<TaskUid>,
    /// Uid to pass as `from` for the next page.
    #[serde(default)]
    pub next: Option<TaskUid>,
    /// Total matching tasks.
    #[serde(default)]
    pub total: Option<u64>,
}

/// Query string of `GET /projects/{id}/tasks`.
///
/// List-valued filters are sent comma-joined; date bounds are RFC 3339
/// strings passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct TaskQuery {
    /// Page size.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    /// Uid of the first task to return.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<TaskUid>,
    /// Only tasks in these states.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub statuses: Vec<TaskStatus>,
    /// Only tasks of these types.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub types: Vec<String>,
    /// Only tasks on these indexes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub index_uids: Vec<String>,
    /// Only these task uids.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uids: Vec<TaskUid>,
    /// Enqueued strictly before.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_enqueued_at: Option<String>,
    /// Enqueued strictly after.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_enqueued_at: Option<String>,
    /// Started strictly before.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_started_at: Option<String>,
    /// Started strictly after.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_started_at: Option<String>,
    /// Finished strictly before.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before_finished_at: Option<String>,
    /// Finished strictly after.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after_finished_at: Option<String>,
}

impl TaskQuery {
    /// Flatten into query-string pairs, skipping unset filters.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        if let Some(from) = self.from {
            pairs.push(("from", from.to_string()));
        }
        push_joined(&mut pairs, "statuses", self.statuses.iter().map(|s| s.as_str()));
        push_joined(&mut pairs, "types", self.types.iter().map(String::as_str));
        push_joined(&mut pairs, "indexUids", self.index_uids.iter().map(String::as_str));
        let uids: Vec<String> = self.uids.iter().map(ToString::to_string).collect();
        push_joined(&mut pairs, "uids", uids.iter().map(String::as_str));

        let bounds = [
            ("beforeEnqueuedAt", &self.before_enqueued_at),
            ("afterEnqueuedAt", &self.after_enqueued_at),
            ("beforeStartedAt", &self.before_started_at),
            ("afterStartedAt", &self.after_started_at),
            ("beforeFinishedAt", &self.before_finished_at),
            ("afterFinishedAt", &self.after_finished_at),
        ];
        for (key, value) in bounds {
            if let Some(value) = value {
                pairs.push((key, value.clone()));
            }
        }
        pairs
    }
}

fn push_joined<'a>(
    pairs: &mut Vec<(&'static str, String)>,
    key: &'static str,
    values: impl Iterator<Item = &'a str>,
) {
    let joined = values.collect::<Vec<_>>().join(",");
    if !joined.is_empty() {
        pairs.push((key, joined));
    }
}

/// Body of task cancelation and deletion.
///
/// The backend rejects an empty filter, so at least one field should be set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export, export_to = "bindings/")]
pub struct TaskFilter {
    /// Task uids.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uids: Option<Vec<TaskUid>>,
    /// Task states.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub statuses: Option<Vec<TaskStatus>>,
    /// Task types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub types: Option<Vec<String>>,
    /// Target indexes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_uids: Option<Vec<String>>,
}

impl TaskFilter {
    /// Whether no filter field is set.
    pub fn is_empty(&self) -> bool {
        self.uids.as_ref().is_none_or(Vec::is_empty)
            && self.statuses.as_ref().is_none_or(Vec::is_empty)
            && self.types.as_ref().is_none_or(Vec::is_empty)
            && self.index_uids.as_ref().is_none_or(Vec::is_empty)
    }
}

/// Body of `POST /projects/{id}/tasks/{uid}/wait`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct WaitRequest {
    /// How long the backend polls before giving up, in milliseconds.
    pub timeout: u64,
}

impl Default for WaitRequest {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_WAIT_TIMEOUT_MS,
        }
    }
}

/// Default wait timeout used by the dashboard.
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 5000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_pairs_join_list_filters() {
        let query = TaskQuery {
            limit: Some(20),
            statuses: vec![TaskStatus::Failed, TaskStatus::Canceled],
            index_uids: vec!["movies".to_owned()],
            uids: vec![TaskUid(4), TaskUid(8)],
            after_enqueued_at: Some("2025-01-01T00:00:00Z".to_owned()),
            ..TaskQuery::default()
        };
        assert_eq!(
            query.to_query_pairs(),
            vec![
                ("limit", "20".to_owned()),
                ("statuses", "failed,canceled".to_owned()),
                ("indexUids", "movies".to_owned()),
                ("uids", "4,8".to_owned()),
                ("afterEnqueuedAt", "2025-01-01T00:00:00Z".to_owned()),
            ]
        );
    }

    #[test]
    fn empty_query_has_no_pairs() {
        assert!(TaskQuery::default().to_query_pairs().is_empty());
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("Failed".parse::<TaskStatus>(), Ok(TaskStatus::Failed));
        assert_eq!(" enqueued".parse::<TaskStatus>(), Ok(TaskStatus::Enqueued));
        assert_eq!(
            "done".parse::<TaskStatus>(),
            Err(UnknownStatus("done".to_owned()))
        );
    }

    #[test]
    fn filter_emptiness() {
        assert!(TaskFilter::default().is_empty());
        let filter = TaskFilter {
            statuses: Some(vec![TaskStatus::Enqueued]),
            ..TaskFilter::default()
        };
        assert!(!filter.is_empty());
        let json = serde_json::to_value(&filter).unwrap_or_default();
        assert_eq!(json, serde_json::json!({"statuses": ["enqueued"]}));
    }

    #[test]
    fn task_decodes_type_field() {
        let raw = r#"{
            "uid": 17,
            "indexUid": "movies",
            "status": "succeeded",
            "type": "documentAdditionOrUpdate",
            "details": {"receivedDocuments": 10, "indexedDocuments": 10},
            "duration": "PT0.5S",
            "enqueuedAt": "2025-01-01T00:00:00Z"
        }"#;
        let task: Option<Task> = serde_json::from_str(raw).ok();
        assert_eq!(task.as_ref().map(|t| t.kind.as_str()), Some("documentAdditionOrUpdate"));
        assert!(task.is_some_and(|t| t.status.is_finished()));
    }
}
