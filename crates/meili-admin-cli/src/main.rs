//! `meili-admin`: command-line front end for the Meili Admin dashboard API.
//!
//! Each invocation runs one command against the backend and prints its
//! result as pretty JSON on stdout. Logs go to stderr.
//!
//! ```text
//! meili-admin projects list
//! meili-admin indexes show 3 movies
//! meili-admin tasks list 3 --status failed,canceled
//! meili-admin routes resolve /projects/3/indexes/movies/synonyms
//! ```

mod cli;
mod commands;
mod config;
mod logging;

use clap::Parser;
use meili_admin_client::AdminClient;
use tracing::info;

use crate::cli::Cli;
use crate::config::AdminConfig;

/// Application entry point.
///
/// Loads configuration, installs logging, builds the API client and runs
/// the requested command.
///
/// # Errors
///
/// Returns an error if configuration is invalid or the command fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = AdminConfig::load(cli.config.as_deref())?;
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    logging::init(&config.logging);
    info!(
        base_url = config.api.base_url,
        timeout_ms = config.api.timeout_ms,
        "meili-admin starting"
    );

    let client = AdminClient::new(&config.client_config())?;
    let output = commands::run(cli.command, &client).await?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
