//! Pipelog CLI - capture stdin into a bounded set of rotating log files

use anyhow::Result;
use clap::Parser;
use pipelog_core::{CaptureSpec, ConfigFile};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod capture;
mod cli;
mod output;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!(
                    "pipelog={level},pipelog_core={level},pipelog_logs={level}",
                    level = log_level
                )
                .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let result = run(&cli);
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn run(cli: &Cli) -> Result<()> {
    if let Some(path) = &cli.create_config_file {
        ConfigFile::write_default(path)?;
        output::print_success(&format!("Default config file {} created", path.display()));
        return Ok(());
    }

    let spec = CaptureSpec::resolve(cli.config_file.as_deref(), cli.overrides())?;
    capture::run(&spec)
}
