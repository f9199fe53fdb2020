//! profilekit - profile photo ingest and default avatars.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{ColorChoice, Parser};
use profilekit::cli::{self, Cli, Commands};
use profilekit::config::{ProfileConfig, cfg, init_config};
use profilekit::log;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log!("error"; "{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<()> {
    init_config(ProfileConfig::load(cli)?);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;
    runtime.block_on(dispatch(&cli.command))
}

async fn dispatch(command: &Commands) -> Result<()> {
    let config = cfg();

    match command {
        Commands::Avatar {
            name, svg, output, ..
        } => cli::avatar::run(name, *svg, output.as_deref(), &config),
        Commands::Ingest {
            file,
            user,
            mime,
            output,
            ..
        } => {
            cli::ingest::run(
                file,
                user.as_deref(),
                mime.as_deref(),
                output.as_deref(),
                &config,
            )
            .await
        }
        Commands::Seed { users, .. } => cli::seed::run(users, &config).await,
        Commands::Images { action } => cli::images::run(action, &config).await,
        Commands::Profile { action } => cli::profile::run(action, &config),
    }
}
