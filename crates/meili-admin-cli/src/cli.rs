//! Command-line definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use meili_admin_types::{ProjectId, TaskStatus, TaskUid};

/// Administer search-service projects through the Meili Admin dashboard API.
#[derive(Debug, Parser)]
#[command(name = "meili-admin")]
#[command(version)]
pub struct Cli {
    /// Configuration file (defaults to ./meili-admin.yaml when present)
    #[arg(short, long, env = "MEILI_ADMIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Dashboard API base URL, overriding configuration and environment
    #[arg(long)]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Configured search-service projects
    #[command(subcommand)]
    Projects(ProjectCommand),

    /// Indexes of a project
    #[command(subcommand)]
    Indexes(IndexCommand),

    /// Asynchronous tasks of a project
    #[command(subcommand)]
    Tasks(TaskCommand),

    /// API keys of a project
    #[command(subcommand)]
    Keys(KeyCommand),

    /// Dashboard page routes
    #[command(subcommand)]
    Routes(RouteCommand),
}

#[derive(Debug, Subcommand)]
pub enum ProjectCommand {
    /// List projects
    List {
        /// Include soft-deleted projects
        #[arg(long)]
        all: bool,
    },
    /// Show one project
    Show { id: ProjectId },
    /// Register a project
    Create {
        name: String,
        /// Search service URL, e.g. http://localhost:7700
        url: String,
        #[arg(long)]
        api_key: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a project (soft unless --hard)
    Delete {
        id: ProjectId,
        /// Remove the record instead of deactivating it
        #[arg(long)]
        hard: bool,
    },
    /// Check that a search service is reachable
    Test {
        url: String,
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Version and statistics of a project's instance
    Stats { id: ProjectId },
}

#[derive(Debug, Subcommand)]
pub enum IndexCommand {
    /// List indexes
    List { project: ProjectId },
    /// Show one index with its statistics
    Show { project: ProjectId, uid: String },
    /// Create an index
    Create {
        project: ProjectId,
        uid: String,
        #[arg(long)]
        primary_key: Option<String>,
    },
    /// Delete an index
    Delete { project: ProjectId, uid: String },
}

#[derive(Debug, Subcommand)]
pub enum TaskCommand {
    /// List tasks, newest first
    List {
        project: ProjectId,
        /// Only tasks in these states (comma separated)
        #[arg(long = "status", value_delimiter = ',')]
        statuses: Vec<TaskStatus>,
        /// Only tasks on these indexes (comma separated)
        #[arg(long = "index", value_delimiter = ',')]
        index_uids: Vec<String>,
        /// Page size
        #[arg(short, long)]
        limit: Option<u64>,
    },
    /// Show one task
    Show { project: ProjectId, uid: TaskUid },
    /// Wait for a task to finish
    Wait {
        project: ProjectId,
        uid: TaskUid,
        /// Give up after this many milliseconds (backend default 5000)
        #[arg(long)]
        timeout_ms: Option<u64>,
    },
}

#[derive(Debug, Subcommand)]
pub enum KeyCommand {
    /// List API keys
    List { project: ProjectId },
}

#[derive(Debug, Subcommand)]
pub enum RouteCommand {
    /// Match a browser path against the route table
    Resolve { path: String },
    /// Build the path of a named route
    Href {
        name: String,
        /// Route parameter as key=value (repeatable)
        #[arg(short, long = "param", value_parser = parse_param)]
        params: Vec<(String, String)>,
    },
}

fn parse_param(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.to_owned(), v.to_owned()))
        .ok_or_else(|| format!("expected key=value, got {raw:?}"))
}
