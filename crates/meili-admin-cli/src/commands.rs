//! Command execution.
//!
//! Every command produces a JSON value that `main` prints to stdout.
//! Project and index commands go through the stores so they share the
//! caching and failure bookkeeping the dashboard relies on; tasks and keys
//! talk to the client directly.

use anyhow::{Context, anyhow, bail};
use meili_admin_client::AdminClient;
use meili_admin_routes::{href_by_name, resolve};
use meili_admin_store::{IndexStore, ProjectStore};
use meili_admin_types::{ApiResponse, NewProject, TaskQuery};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::cli::{Command, IndexCommand, KeyCommand, ProjectCommand, RouteCommand, TaskCommand};

/// Execute `command` against the dashboard API.
pub async fn run(command: Command, client: &AdminClient) -> anyhow::Result<Value> {
    match command {
        Command::Projects(cmd) => projects(cmd, client).await,
        Command::Indexes(cmd) => indexes(cmd, client).await,
        Command::Tasks(cmd) => tasks(cmd, client).await,
        Command::Keys(cmd) => keys(cmd, client).await,
        Command::Routes(cmd) => routes(cmd),
    }
}

async fn projects(command: ProjectCommand, client: &AdminClient) -> anyhow::Result<Value> {
    let store = ProjectStore::new(client.clone());
    match command {
        ProjectCommand::List { all: true } => data(client.projects().get_all(true).await?),
        ProjectCommand::List { all: false } => {
            store.fetch_projects().await;
            if let Some(message) = store.error().await {
                bail!("failed to fetch projects: {message}");
            }
            to_json(&store.projects().await)
        }
        ProjectCommand::Show { id } => match store.fetch_project(id).await {
            Some(project) => to_json(&project),
            None => Err(store
                .error()
                .await
                .map_or_else(|| anyhow!("project {id} not found"), |m| anyhow!(m))),
        },
        ProjectCommand::Create {
            name,
            url,
            api_key,
            description,
        } => {
            let data = NewProject {
                name,
                url,
                api_key,
                description,
            };
            envelope(store.create_project(&data).await?)
        }
        ProjectCommand::Delete { id, hard: false } => envelope(store.delete_project(id).await?),
        ProjectCommand::Delete { id, hard: true } => {
            debug!(%id, "Hard-deleting project");
            envelope(client.projects().delete(id, true).await?)
        }
        ProjectCommand::Test { url, api_key } => to_json(
            &client
                .projects()
                .test_connection(&url, api_key.as_deref())
                .await?,
        ),
        ProjectCommand::Stats { id } => data(client.projects().get_stats(id).await?),
    }
}

async fn indexes(command: IndexCommand, client: &AdminClient) -> anyhow::Result<Value> {
    let store = IndexStore::new(client.clone());
    match command {
        IndexCommand::List { project } => {
            store.fetch_indexes(project).await;
            if let Some(message) = store.error().await {
                bail!("failed to fetch indexes: {message}");
            }
            to_json(&store.indexes().await)
        }
        IndexCommand::Show { project, uid } => match store.fetch_index(project, &uid).await {
            Some(index) => to_json(&index),
            None => Err(store
                .error()
                .await
                .map_or_else(|| anyhow!("index {uid:?} not found"), |m| anyhow!(m))),
        },
        IndexCommand::Create {
            project,
            uid,
            primary_key,
        } => envelope(
            store
                .create_index(project, &uid, primary_key.as_deref())
                .await?,
        ),
        IndexCommand::Delete { project, uid } => envelope(store.delete_index(project, &uid).await?),
    }
}

async fn tasks(command: TaskCommand, client: &AdminClient) -> anyhow::Result<Value> {
    let api = client.tasks();
    match command {
        TaskCommand::List {
            project,
            statuses,
            index_uids,
            limit,
        } => {
            let query = TaskQuery {
                limit,
                statuses,
                index_uids,
                ..TaskQuery::default()
            };
            data(api.get_all(project, &query).await?)
        }
        TaskCommand::Show { project, uid } => data(api.get(project, uid).await?),
        TaskCommand::Wait {
            project,
            uid,
            timeout_ms,
        } => data(api.wait(project, uid, timeout_ms).await?),
    }
}

async fn keys(command: KeyCommand, client: &AdminClient) -> anyhow::Result<Value> {
    match command {
        KeyCommand::List { project } => data(client.keys().get_all(project).await?),
    }
}

fn routes(command: RouteCommand) -> anyhow::Result<Value> {
    match command {
        RouteCommand::Resolve { path } => {
            let matched = resolve(&path).ok_or_else(|| anyhow!("no route matches {path:?}"))?;
            to_json(&matched)
        }
        RouteCommand::Href { name, params } => {
            let pairs: Vec<(&str, &str)> = params
                .iter()
                .map(|(k, v)| (k.as_str(), v.as_str()))
                .collect();
            let path = href_by_name(&name, &pairs)?;
            Ok(json!({ "name": name, "path": path }))
        }
    }
}

/// Payload of a successful response.
fn data<T: Serialize>(response: ApiResponse<T>) -> anyhow::Result<Value> {
    to_json(&response.into_data()?)
}

/// Whole envelope, for replies that carry only a message or a task ref.
fn envelope<T: Serialize>(response: ApiResponse<T>) -> anyhow::Result<Value> {
    if !response.success {
        bail!(
            response
                .error
                .unwrap_or_else(|| "request failed".to_owned())
        );
    }
    to_json(&response)
}

fn to_json<T: Serialize>(value: &T) -> anyhow::Result<Value> {
    serde_json::to_value(value).context("failed to serialize output")
}
