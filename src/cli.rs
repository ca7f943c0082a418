//! Command-line surface and the `run` entrypoint shared by `main` and the tests.
//!
//! The flow is: resolve config (fails without `API_KEY`), discover templates under
//! the base directory (fails only if it cannot be listed), then send them in
//! batches. Batch failures never change the result.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::discover::discover_templates;
use crate::load_config::load_config;
use crate::synchronise::synchronise;
use crate::upload::ImportClient;

/// Import app templates from a directory tree into the panel template API.
#[derive(Parser, Debug)]
#[clap(
    name = "template-import",
    version,
    about = "Collect template directories (data.yml, docker-compose.yml, logo) and import them in batches"
)]
pub struct Cli {
    /// Directory containing one subdirectory per template (default: current directory)
    #[clap(long)]
    pub dir: Option<PathBuf>,

    /// Import endpoint to POST batches to
    #[clap(long)]
    pub api_url: Option<String>,
}

pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    let config = load_config(cli.dir, cli.api_url)?;

    let templates = discover_templates(&config.base_dir)?;
    println!("\nTotal templates loaded: {}", templates.len());

    if templates.is_empty() {
        println!("No templates found");
        tracing::info!("No templates found, nothing to import");
        return Ok(());
    }

    let uploader = ImportClient::new(config.api_key, config.api_url);
    let report = synchronise(&templates, &uploader).await;
    tracing::info!(
        delivered = report.delivered(),
        failed = report.failed(),
        "Import finished"
    );

    println!("\nImport completed!");
    Ok(())
}
