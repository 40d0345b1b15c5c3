//! Store behavior against an in-memory fake of the dashboard API.

#![allow(clippy::unwrap_used)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use meili_admin_client::ClientError;
use meili_admin_store::{
    ApiResult, IndexSource, IndexStore, ProjectSource, ProjectStore, StoreEvent, StoreKind,
};
use meili_admin_types::{
    ApiResponse, IndexDetail, IndexSummary, NewProject, Project, ProjectId, ProjectUpdate,
    Settings, TaskRef, TaskStatus, TaskUid,
};
use tokio::sync::{Notify, broadcast};

fn project(id: i64, name: &str) -> Project {
    Project {
        id: ProjectId(id),
        name: name.to_owned(),
        url: format!("http://search-{id}:7700"),
        api_key: None,
        description: None,
        is_active: true,
        created_at: None,
        updated_at: None,
    }
}

fn summary(uid: &str) -> IndexSummary {
    IndexSummary {
        uid: uid.to_owned(),
        primary_key: Some("id".to_owned()),
        created_at: None,
        updated_at: None,
    }
}

const fn enqueued() -> TaskRef {
    TaskRef {
        task_uid: TaskUid(1),
        status: TaskStatus::Enqueued,
    }
}

fn server_error() -> ClientError {
    ClientError::Api {
        status: 500,
        message: "boom".to_owned(),
    }
}

/// Fake backend. `fail` turns every call into a transport-level error,
/// `reject` turns writes into `success: false` envelopes and `empty` makes
/// reads succeed without a payload.
#[derive(Default)]
struct Fake {
    projects: Mutex<Vec<Project>>,
    indexes: Mutex<Vec<IndexSummary>>,
    fail: AtomicBool,
    reject: AtomicBool,
    empty: AtomicBool,
    gated: bool,
    gate: Notify,
}

impl Fake {
    fn with_projects(projects: Vec<Project>) -> Self {
        Self {
            projects: Mutex::new(projects),
            ..Self::default()
        }
    }

    fn with_indexes(indexes: Vec<IndexSummary>) -> Self {
        Self {
            indexes: Mutex::new(indexes),
            ..Self::default()
        }
    }

    fn failing(&self) -> bool {
        self.fail.load(Ordering::SeqCst)
    }

    fn rejecting(&self) -> bool {
        self.reject.load(Ordering::SeqCst)
    }

    fn read<T>(&self, data: T) -> ApiResult<T> {
        if self.failing() {
            Err(server_error())
        } else if self.empty.load(Ordering::SeqCst) {
            Ok(ApiResponse {
                success: true,
                data: None,
                error: None,
                message: None,
                count: None,
            })
        } else {
            Ok(ApiResponse::ok(data))
        }
    }

    fn write<T>(&self, data: T) -> ApiResult<T> {
        if self.failing() {
            Err(server_error())
        } else if self.rejecting() {
            Ok(ApiResponse::failed("rejected"))
        } else {
            Ok(ApiResponse::ok(data))
        }
    }
}

impl ProjectSource for Fake {
    async fn list_projects(&self, _include_inactive: bool) -> ApiResult<Vec<Project>> {
        if self.gated {
            self.gate.notified().await;
        }
        self.read(self.projects.lock().unwrap().clone())
    }

    async fn get_project(&self, id: ProjectId) -> ApiResult<Project> {
        let found = self.projects.lock().unwrap().iter().find(|p| p.id == id).cloned();
        let found = found.ok_or(ClientError::Api {
            status: 404,
            message: "Project not found".to_owned(),
        })?;
        self.read(found)
    }

    async fn create_project(&self, data: &NewProject) -> ApiResult<Project> {
        self.write(project(100, &data.name))
    }

    async fn update_project(&self, id: ProjectId, data: &ProjectUpdate) -> ApiResult<Project> {
        let mut updated = project(id.into_inner(), "");
        if let Some(name) = &data.name {
            updated.name.clone_from(name);
        }
        self.write(updated)
    }

    async fn delete_project(&self, _id: ProjectId, _hard: bool) -> ApiResult<()> {
        self.write(())
    }
}

impl IndexSource for Fake {
    async fn list_indexes(&self, _project: ProjectId) -> ApiResult<Vec<IndexSummary>> {
        self.read(self.indexes.lock().unwrap().clone())
    }

    async fn get_index(&self, _project: ProjectId, uid: &str) -> ApiResult<IndexDetail> {
        self.read(IndexDetail {
            uid: uid.to_owned(),
            primary_key: Some("id".to_owned()),
            created_at: None,
            updated_at: None,
            stats: None,
        })
    }

    async fn create_index(
        &self,
        _project: ProjectId,
        _uid: &str,
        _primary_key: Option<&str>,
    ) -> ApiResult<TaskRef> {
        self.write(enqueued())
    }

    async fn delete_index(&self, _project: ProjectId, _uid: &str) -> ApiResult<TaskRef> {
        self.write(enqueued())
    }

    async fn get_settings(&self, _project: ProjectId, _uid: &str) -> ApiResult<Settings> {
        if self.failing() {
            return Err(server_error());
        }
        Ok(ApiResponse::ok(Settings {
            stop_words: Some(vec!["the".to_owned()]),
            ..Settings::default()
        }))
    }

    async fn update_settings(
        &self,
        _project: ProjectId,
        _uid: &str,
        _settings: &Settings,
    ) -> ApiResult<TaskRef> {
        self.write(enqueued())
    }
}

fn drain(rx: &mut broadcast::Receiver<StoreEvent>) -> Vec<StoreEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}

fn names(projects: &[Project]) -> Vec<&str> {
    projects.iter().map(|p| p.name.as_str()).collect()
}

// =========================================================================
// Project store
// =========================================================================

#[tokio::test]
async fn fetch_projects_fills_cache_and_reports_progress() {
    let store = ProjectStore::new(Fake::with_projects(vec![project(1, "a"), project(2, "b")]));
    let mut rx = store.subscribe();

    store.fetch_projects().await;

    let state = store.snapshot().await;
    assert_eq!(names(&state.projects), vec!["a", "b"]);
    assert!(!state.loading);
    assert!(state.error.is_none());
    assert_eq!(
        drain(&mut rx),
        vec![
            StoreEvent::Loading {
                store: StoreKind::Project,
                loading: true
            },
            StoreEvent::Projects,
            StoreEvent::Loading {
                store: StoreKind::Project,
                loading: false
            },
        ]
    );
}

#[tokio::test]
async fn fetch_failure_is_recorded_not_returned() {
    let store = ProjectStore::new(Fake::with_projects(vec![project(1, "a")]));
    store.fetch_projects().await;
    store.source().fail.store(true, Ordering::SeqCst);
    let mut rx = store.subscribe();

    store.fetch_projects().await;

    let state = store.snapshot().await;
    assert!(!state.loading);
    assert_eq!(state.error.as_deref(), Some("API returned 500: boom"));
    assert_eq!(names(&state.projects), vec!["a"]);
    assert!(drain(&mut rx).contains(&StoreEvent::Failed {
        store: StoreKind::Project,
        message: "API returned 500: boom".to_owned(),
    }));

    // The next fetch starts by clearing the error.
    store.source().fail.store(false, Ordering::SeqCst);
    store.fetch_projects().await;
    assert!(store.error().await.is_none());
}

#[tokio::test]
async fn state_is_readable_while_a_fetch_is_in_flight() {
    let fake = Fake {
        gated: true,
        ..Fake::with_projects(vec![project(1, "a")])
    };
    let store = Arc::new(ProjectStore::new(fake));
    let mut rx = store.subscribe();

    let fetch = tokio::spawn({
        let store = Arc::clone(&store);
        async move { store.fetch_projects().await }
    });

    assert_eq!(
        rx.recv().await.unwrap(),
        StoreEvent::Loading {
            store: StoreKind::Project,
            loading: true
        }
    );
    assert!(store.is_loading().await);
    assert!(store.projects().await.is_empty());

    store.source().gate.notify_one();
    fetch.await.unwrap();

    assert!(!store.is_loading().await);
    assert_eq!(store.projects().await.len(), 1);
}

#[tokio::test]
async fn lookup_by_route_param() {
    let store = ProjectStore::new(Fake::with_projects(vec![project(1, "a"), project(2, "b")]));
    store.fetch_projects().await;

    assert_eq!(store.project_by_param("2").await.map(|p| p.name).as_deref(), Some("b"));
    assert_eq!(store.project_by_id(ProjectId(1)).await.map(|p| p.name).as_deref(), Some("a"));
    assert!(store.project_by_param("99").await.is_none());
    assert!(store.project_by_param("two").await.is_none());
}

#[tokio::test]
async fn fetch_project_sets_current() {
    let store = ProjectStore::new(Fake::with_projects(vec![project(1, "a")]));

    let fetched = store.fetch_project(ProjectId(1)).await;
    assert_eq!(fetched.map(|p| p.id), Some(ProjectId(1)));
    assert_eq!(store.current_project().await.map(|p| p.id), Some(ProjectId(1)));

    assert!(store.fetch_project(ProjectId(9)).await.is_none());
    assert_eq!(
        store.error().await.as_deref(),
        Some("API returned 404: Project not found")
    );
    assert!(!store.is_loading().await);
}

#[tokio::test]
async fn create_prepends_only_on_success() {
    let store = ProjectStore::new(Fake::with_projects(vec![project(1, "a")]));
    store.fetch_projects().await;

    let response = store.create_project(&NewProject::new("fresh", "http://x")).await.unwrap();
    assert!(response.success);
    assert_eq!(names(&store.projects().await), vec!["fresh", "a"]);

    store.source().reject.store(true, Ordering::SeqCst);
    let response = store.create_project(&NewProject::new("nope", "http://x")).await.unwrap();
    assert!(!response.success);
    assert_eq!(names(&store.projects().await), vec!["fresh", "a"]);
}

#[tokio::test]
async fn write_errors_are_returned_and_leave_state() {
    let store = ProjectStore::new(Fake::with_projects(vec![project(1, "a")]));
    store.fetch_projects().await;
    store.source().fail.store(true, Ordering::SeqCst);

    let err = store.create_project(&NewProject::new("x", "http://x")).await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(store.delete_project(ProjectId(1)).await.is_err());

    let state = store.snapshot().await;
    assert_eq!(names(&state.projects), vec!["a"]);
    assert!(state.error.is_none());
}

#[tokio::test]
async fn update_replaces_cached_and_current() {
    let store = ProjectStore::new(Fake::with_projects(vec![project(1, "a"), project(2, "b")]));
    store.fetch_projects().await;
    store.set_current_project(Some(project(2, "b"))).await;

    let patch = ProjectUpdate {
        name: Some("renamed".to_owned()),
        ..ProjectUpdate::default()
    };
    store.update_project(ProjectId(2), &patch).await.unwrap();

    assert_eq!(names(&store.projects().await), vec!["a", "renamed"]);
    assert_eq!(store.current_project().await.map(|p| p.name).as_deref(), Some("renamed"));

    // Another project's update leaves the current one alone.
    store.update_project(ProjectId(1), &patch).await.unwrap();
    assert_eq!(store.current_project().await.map(|p| p.id), Some(ProjectId(2)));
}

#[tokio::test]
async fn update_of_uncached_project_changes_nothing() {
    let store = ProjectStore::new(Fake::with_projects(vec![project(1, "a")]));
    store.fetch_projects().await;
    let mut rx = store.subscribe();

    store.update_project(ProjectId(5), &ProjectUpdate::default()).await.unwrap();

    assert_eq!(names(&store.projects().await), vec!["a"]);
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn delete_drops_entry_and_current() {
    let store = ProjectStore::new(Fake::with_projects(vec![project(1, "a"), project(2, "b")]));
    store.fetch_projects().await;
    store.set_current_project(Some(project(1, "a"))).await;

    store.delete_project(ProjectId(1)).await.unwrap();

    assert_eq!(names(&store.projects().await), vec!["b"]);
    assert!(store.current_project().await.is_none());
}

#[tokio::test]
async fn rejected_delete_keeps_entry_and_current() {
    let store = ProjectStore::new(Fake::with_projects(vec![project(1, "a")]));
    store.fetch_projects().await;
    store.set_current_project(Some(project(1, "a"))).await;
    store.source().reject.store(true, Ordering::SeqCst);
    let mut rx = store.subscribe();

    let response = store.delete_project(ProjectId(1)).await.unwrap();
    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some("rejected"));
    assert_eq!(names(&store.projects().await), vec!["a"]);
    assert_eq!(store.current_project().await.map(|p| p.id), Some(ProjectId(1)));
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn fetch_without_data_empties_projects() {
    let store = ProjectStore::new(Fake::with_projects(vec![project(1, "a"), project(2, "b")]));
    store.fetch_projects().await;
    store.fetch_project(ProjectId(1)).await;
    assert_eq!(store.projects().await.len(), 2);
    store.source().empty.store(true, Ordering::SeqCst);

    store.fetch_projects().await;
    assert!(store.projects().await.is_empty());

    assert!(store.fetch_project(ProjectId(1)).await.is_none());
    let state = store.snapshot().await;
    assert!(state.current_project.is_none());
    assert!(state.error.is_none());
    assert!(!state.loading);
}

#[tokio::test]
async fn set_and_clear_current() {
    let store = ProjectStore::new(Fake::default());
    store.set_current_project(Some(project(3, "c"))).await;
    assert_eq!(store.current_project().await.map(|p| p.id), Some(ProjectId(3)));
    store.clear_current_project().await;
    assert!(store.current_project().await.is_none());
}

// =========================================================================
// Index store
// =========================================================================

#[tokio::test]
async fn fetch_indexes_and_delete() {
    let store = IndexStore::new(Fake::with_indexes(vec![summary("movies"), summary("books")]));
    store.fetch_indexes(ProjectId(1)).await;
    assert_eq!(store.indexes().await.len(), 2);

    let mut rx = store.subscribe();
    store.delete_index(ProjectId(1), "movies").await.unwrap();

    let uids: Vec<String> = store.indexes().await.into_iter().map(|i| i.uid).collect();
    assert_eq!(uids, vec!["books".to_owned()]);
    assert_eq!(drain(&mut rx), vec![StoreEvent::Indexes]);
}

#[tokio::test]
async fn rejected_index_delete_keeps_list_and_current() {
    let store = IndexStore::new(Fake::with_indexes(vec![summary("movies"), summary("books")]));
    store.fetch_indexes(ProjectId(1)).await;
    store.fetch_index(ProjectId(1), "movies").await;
    store.source().reject.store(true, Ordering::SeqCst);
    let mut rx = store.subscribe();

    let response = store.delete_index(ProjectId(1), "movies").await.unwrap();
    assert!(!response.success);

    let state = store.snapshot().await;
    let uids: Vec<&str> = state.indexes.iter().map(|i| i.uid.as_str()).collect();
    assert_eq!(uids, vec!["movies", "books"]);
    assert_eq!(state.current_index.map(|i| i.uid).as_deref(), Some("movies"));
    assert!(drain(&mut rx).is_empty());
}

#[tokio::test]
async fn index_fetch_without_data_empties_list() {
    let store = IndexStore::new(Fake::with_indexes(vec![summary("movies")]));
    store.fetch_indexes(ProjectId(1)).await;
    store.fetch_index(ProjectId(1), "movies").await;
    store.source().empty.store(true, Ordering::SeqCst);

    store.fetch_indexes(ProjectId(1)).await;
    assert!(store.fetch_index(ProjectId(1), "movies").await.is_none());

    let state = store.snapshot().await;
    assert!(state.indexes.is_empty());
    assert!(state.current_index.is_none());
    assert!(state.error.is_none());
}

#[tokio::test]
async fn create_index_passes_through() {
    let store = IndexStore::new(Fake::with_indexes(vec![summary("movies")]));
    store.fetch_indexes(ProjectId(1)).await;

    let task = store
        .create_index(ProjectId(1), "books", Some("isbn"))
        .await
        .unwrap()
        .into_data()
        .unwrap();
    assert_eq!(task.status, TaskStatus::Enqueued);
    assert_eq!(store.indexes().await.len(), 1);
}

#[tokio::test]
async fn fetch_index_failure_records_error() {
    let store = IndexStore::new(Fake::default());
    assert_eq!(
        store.fetch_index(ProjectId(1), "movies").await.map(|i| i.uid).as_deref(),
        Some("movies")
    );

    store.source().fail.store(true, Ordering::SeqCst);
    assert!(store.fetch_index(ProjectId(1), "movies").await.is_none());

    let state = store.snapshot().await;
    assert!(!state.loading);
    assert!(state.error.is_some());
    // The previously fetched index stays current.
    assert!(state.current_index.is_some());
}

#[tokio::test]
async fn settings_are_cached_and_errors_returned() {
    let store = IndexStore::new(Fake::default());

    let settings = store.fetch_settings(ProjectId(1), "movies").await.unwrap();
    assert_eq!(settings.and_then(|s| s.stop_words), Some(vec!["the".to_owned()]));
    assert!(store.settings().await.is_some());

    store.source().fail.store(true, Ordering::SeqCst);
    assert!(store.fetch_settings(ProjectId(1), "movies").await.is_err());
    assert!(store.update_settings(ProjectId(1), "movies", &Settings::default()).await.is_err());
    // Settings failures are the caller's to show.
    assert!(store.error().await.is_none());
}

#[tokio::test]
async fn clear_current_index_drops_settings_too() {
    let store = IndexStore::new(Fake::default());
    store.fetch_index(ProjectId(1), "movies").await;
    store.fetch_settings(ProjectId(1), "movies").await.unwrap();

    store.clear_current_index().await;

    let state = store.snapshot().await;
    assert!(state.current_index.is_none());
    assert!(state.settings.is_none());
}
