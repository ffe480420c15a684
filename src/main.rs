use anyhow::{Context, Result};
use cfsummary::cloudcontroller::{format_error, Client, Warnings};
use cfsummary::config::Config;
use cfsummary::Actor;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

const BINARY_NAME: &str = "cfsummary";

/// Summaries of Cloud Controller spaces
#[derive(Parser, Debug)]
#[command(name = "cfsummary", version, about, long_about = None)]
struct Args {
    /// Cloud Controller API endpoint
    #[arg(long, global = true)]
    api: Option<String>,

    /// OAuth access token (without the "bearer" prefix)
    #[arg(long, env = "CF_ACCESS_TOKEN", hide_env_values = true, global = true)]
    token: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Save the API endpoint to the config file
    Target {
        url: String,
    },
    /// Show the summary of one or more spaces as JSON
    SpaceSummary {
        /// Organization name
        #[arg(short, long)]
        org: String,
        #[arg(required = true)]
        spaces: Vec<String>,
    },
    /// Delete a space and everything in it
    DeleteSpace {
        /// Organization name
        #[arg(short, long)]
        org: String,
        space: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("cfsummary started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("cfsummary").join("cfsummary.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".cfsummary").join("cfsummary.log");
    }
    PathBuf::from("cfsummary.log")
}

/// Warnings go to stderr, on success and on failure alike
fn print_warnings(warnings: &Warnings) {
    for warning in warnings {
        eprintln!("{warning}");
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level)?;

    let mut config = Config::load();

    if let Command::Target { url } = &args.command {
        config.set_target(url).context("Failed to save config")?;
        println!("API endpoint: {url}");
        return Ok(ExitCode::SUCCESS);
    }

    let target = config.effective_target(args.api.as_deref(), BINARY_NAME)?;
    tracing::info!("Using API endpoint: {}", target);

    let client = Client::new(&config.client_config(&target, args.token.as_deref()))
        .context("Failed to create Cloud Controller client")?;
    let actor = Actor::new(client);

    match args.command {
        Command::Target { .. } => Ok(ExitCode::SUCCESS),
        Command::SpaceSummary { org, spaces } => space_summary(&actor, &org, &spaces).await,
        Command::DeleteSpace { org, space } => delete_space(&actor, &org, &space).await,
    }
}

async fn space_summary(actor: &Actor, org_name: &str, spaces: &[String]) -> Result<ExitCode> {
    let org = actor.get_organization_by_name(org_name).await;
    print_warnings(&org.warnings);
    let org = match org.value {
        Ok(org) => org,
        Err(err) => {
            eprintln!("FAILED: {}", format_error(&err));
            return Ok(ExitCode::FAILURE);
        }
    };

    let mut status = ExitCode::SUCCESS;
    for (name, summary) in spaces
        .iter()
        .zip(actor.get_space_summaries(&org.guid, spaces).await)
    {
        print_warnings(&summary.warnings);
        match summary.value {
            Ok(summary) => println!("{}", serde_json::to_string_pretty(&summary)?),
            Err(err) => {
                tracing::error!("space summary for {} failed: {}", name, err);
                eprintln!("FAILED ({name}): {}", format_error(&err));
                status = ExitCode::FAILURE;
            }
        }
    }

    Ok(status)
}

async fn delete_space(actor: &Actor, org_name: &str, space: &str) -> Result<ExitCode> {
    let mut warnings = Warnings::new();

    let result = match warnings.absorb(actor.get_organization_by_name(org_name).await) {
        Ok(org) => warnings.absorb(
            actor
                .delete_space_by_organization_and_name(&org.guid, space)
                .await,
        ),
        Err(err) => Err(err),
    };

    print_warnings(&warnings);
    match result {
        Ok(()) => {
            println!("Deleted space {space} in org {org_name}");
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            eprintln!("FAILED: {}", format_error(&err));
            Ok(ExitCode::FAILURE)
        }
    }
}
