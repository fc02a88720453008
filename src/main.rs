//! Employee Resource - renders employee records into API response bodies.

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use employee_resource as app;
use serde::Deserialize;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use app::config::{AppConfig, ConfigLoadResult, LoggingConfig, SecurityConfig};
use app::models::{CardIdentity, Employee};
use app::resources::EmployeeView;
use app::storage::DiskStorage;

/// Render employee records into API response bodies.
#[derive(Parser)]
#[command(name = "employee-resource")]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long, global = true)]
    dev: bool,

    /// Path to config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render employee records from a JSON file (one record or an array)
    Render {
        input: PathBuf,
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
    /// List the known card identity types
    CardTypes,
    /// Decrypt an encrypted profile photo path
    Decrypt { path: String },
    /// Write a default config file with a new app key
    Init {
        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },
}

/// Render input file contents.
#[derive(Deserialize)]
#[serde(untagged)]
enum RenderInput {
    Many(Vec<Employee>),
    One(Box<Employee>),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config_path = match (&cli.config, cli.dev) {
        (Some(path), _) => path.clone(),
        (None, true) => PathBuf::from("config.toml"),
        (None, false) => AppConfig::default_path(),
    };

    match cli.command {
        Command::Init { force } => {
            let _guard = init_logging(&LoggingConfig::default());
            write_default_config(&config_path, force)
        }
        Command::Render { input, pretty } => {
            let (config, _guard) = load_config(&config_path)?;
            render(&config, &input, pretty)
        }
        Command::CardTypes => {
            for card in CardIdentity::ALL {
                println!("{:<22}{}", card.as_str(), card.label());
            }
            Ok(())
        }
        Command::Decrypt { path } => {
            let (config, _guard) = load_config(&config_path)?;
            let storage = DiskStorage::from_config(&config)?;
            println!("{}", storage.decrypt_filename(&path)?);
            Ok(())
        }
    }
}

/// Load the config file and start logging with its settings.
fn load_config(path: &Path) -> anyhow::Result<(AppConfig, Option<WorkerGuard>)> {
    let config = match AppConfig::try_load(path) {
        ConfigLoadResult::Loaded(config) => config,
        ConfigLoadResult::Missing => {
            bail!("Config not found at {path:?}, run `employee-resource init` to create one")
        }
        ConfigLoadResult::Invalid(e) => {
            return Err(e).with_context(|| format!("Invalid config at {path:?}"));
        }
    };

    let guard = init_logging(&config.logging);
    tracing::info!("Config path: {:?}", path);
    Ok((config, guard))
}

/// Initialize logging to stderr, or to daily rolling files when configured.
fn init_logging(logging: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    match &logging.directory {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, "employee-resource.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}

fn render(config: &AppConfig, input: &Path, pretty: bool) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(input).with_context(|| format!("Failed to read {input:?}"))?;
    let records = match serde_json::from_str::<RenderInput>(&content).context("Invalid employee JSON")? {
        RenderInput::Many(records) => records,
        RenderInput::One(record) => vec![*record],
    };

    let storage = DiskStorage::from_config(config)?;
    let disk = config.storage.default_disk.as_str();
    let views = EmployeeView::collection(&records, disk, &storage)?;
    tracing::info!("Rendered {} employee(s) for disk {}", views.len(), disk);

    let output = if pretty {
        serde_json::to_string_pretty(&views)?
    } else {
        serde_json::to_string(&views)?
    };
    println!("{output}");
    Ok(())
}

fn write_default_config(path: &Path, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        bail!("Config already exists at {path:?}, pass --force to overwrite");
    }

    let config = AppConfig {
        security: SecurityConfig::generate(),
        ..AppConfig::default()
    };
    config.save(path).with_context(|| format!("Failed to write {path:?}"))?;

    tracing::info!("Wrote default config to {:?}", path);
    Ok(())
}
