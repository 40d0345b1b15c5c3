//! Shared wire types for the Meili Admin dashboard.
//!
//! Every payload exchanged with the dashboard API is defined here once and
//! used by the client, the stores and the CLI. Types flow downstream to
//! `TypeScript` via `ts-rs` for the web front end.
//!
//! # Modules
//!
//! - [`envelope`] -- the `{success, data, error}` response envelope
//! - [`ids`] -- typed project and task identifiers
//! - [`project`] -- projects, connection tests, instance statistics
//! - [`index`] -- indexes, documents, search
//! - [`settings`] -- index settings
//! - [`task`] -- task records, queries and filters
//! - [`key`] -- API keys

pub mod envelope;
pub mod ids;
pub mod index;
pub mod key;
pub mod project;
pub mod settings;
pub mod task;

pub use envelope::{ApiResponse, EnvelopeError};
pub use ids::{ParseIdError, ProjectId, TaskUid};
pub use index::{
    Document, DocumentIds, DocumentPage, DocumentQuery, IndexDetail, IndexSummary, NewDocuments,
    NewIndex, SearchRequest, SearchResults, UrlImport,
};
pub use key::{ApiKey, KeyList, KeyUpdate, NewKey};
pub use project::{
    ConnectionProbe, ConnectionReport, IndexStats, NewProject, Project, ProjectStats,
    ProjectUpdate, ServerStats, ServerVersion,
};
pub use settings::{Faceting, MinWordSizeForTypos, Pagination, Settings, Synonyms, TypoTolerance};
pub use task::{
    DEFAULT_WAIT_TIMEOUT_MS, Task, TaskFilter, TaskList, TaskQuery, TaskRef, TaskStatus,
    UnknownStatus, WaitRequest,
};
