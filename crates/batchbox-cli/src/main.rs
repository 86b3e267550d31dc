//! batchbox
//!
//! Container entry point. Loads configuration (file, then environment, then
//! flags), prepares the output directory, runs exactly one task and exits
//! with that task's status:
//!
//! - **sitemap** (default): crawl `WEBSITE_URL` and write `sitemap.xml`
//! - **exec**: run an external program with the execution environment applied
//! - **config**: print the effective configuration and exit

mod cli;
mod config;

use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use batchbox_core::domain::ExitStatus;
use batchbox_core::error::ConfigError;
use batchbox_core::impls::{CommandTask, TracingEventSink};
use batchbox_core::ports::{SystemClock, Task, UlidGenerator};
use batchbox_core::{HarnessConfig, JobRunner};
use batchbox_sitemap::SitemapTask;
use clap::Parser;
use cli::{Cli, Commands};
use config::AppConfig;
use tracing::{error, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_LOG_FILTER: &str = "batchbox=info,batchbox_core=info,batchbox_sitemap=info";

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let status = match run(cli).await {
        Ok(status) => status,
        Err(err) => {
            error!("{err:#}");
            exit_status_for(&err)
        }
    };

    // process::exit skips destructors, so buffered stdout is flushed here.
    flush_output(&mut std::io::stdout());
    std::process::exit(status.code());
}

fn flush_output(out: &mut impl Write) -> bool {
    match out.flush() {
        Ok(()) => true,
        Err(err) => {
            warn!("failed to flush stdout: {err}");
            false
        }
    }
}

async fn run(cli: Cli) -> Result<ExitStatus> {
    let mut config = load_config(&cli)?;

    match cli.command() {
        Commands::Config => {
            println!("{}", serde_json::to_string_pretty(&config)?);
            Ok(ExitStatus::SUCCESS)
        }
        Commands::Sitemap(args) => {
            args.apply(&mut config.sitemap);
            let task =
                SitemapTask::new(config.sitemap).context("failed to set up the sitemap task")?;
            Ok(execute(config.harness, &task).await)
        }
        Commands::Exec { program, args } => {
            let task = CommandTask::new(program, args);
            Ok(execute(config.harness, &task).await)
        }
    }
}

fn load_config(cli: &Cli) -> Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    config.apply_env(|name| std::env::var(name).ok())?;
    cli.apply(&mut config.harness);
    Ok(config)
}

async fn execute(harness: HarnessConfig, task: &dyn Task) -> ExitStatus {
    let runner = JobRunner::new(
        harness,
        Arc::new(SystemClock),
        &UlidGenerator::new(SystemClock),
        Arc::new(TracingEventSink),
    );
    runner.execute(task).await
}

/// Errors that stop the process before a runner exists.
fn exit_status_for(err: &anyhow::Error) -> ExitStatus {
    if err.downcast_ref::<ConfigError>().is_some() {
        ExitStatus::CONFIG_FAILURE
    } else {
        ExitStatus::INTERNAL_FAILURE
    }
}
