//! EdSkill - AI-generated learning paths
//!
//! CLI entry point.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use colored::*;
use eyre::{Context, Result};
use tracing::info;

use edskill::cli::{Cli, Command};
use edskill::config::Config;
use edskill::dashboard::Dashboard;
use edskill::llm::create_client;
use edskill::path::{PathGenerator, Topic, learning_path_schema};
use edskill::render::render_path;
use edskill::repl::DashboardRepl;
use edskill::session::SimulatedAuthenticator;

fn parse_level(level: Option<&str>) -> tracing::Level {
    match level.map(|s| s.to_uppercase()).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") | None => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
    }
}

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("edskill")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Priority: CLI --log-level > config file > INFO
    let level = parse_level(cli_log_level.or(config_log_level));

    let log_file = fs::File::create(log_dir.join("edskill.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    setup_logging(cli.log_level.as_deref(), config.log_level.as_deref()).context("Failed to setup logging")?;

    info!(
        "EdSkill loaded config: provider={}, model={}",
        config.llm.provider,
        config.llm.model()
    );

    match cli.command {
        Some(Command::Schema) => cmd_schema(),
        Some(Command::Generate { topic, json }) => cmd_generate(&config, &topic.join(" "), json).await,
        Some(Command::Dashboard) | None => cmd_dashboard(&config).await,
    }
}

/// Build the one generator shared by everything that issues requests
fn build_generator(config: &Config) -> Result<Arc<PathGenerator>> {
    config.validate()?;
    let llm = create_client(&config.llm).context("Failed to create LLM client")?;
    Ok(Arc::new(PathGenerator::new(llm, &config.generation)))
}

fn cmd_schema() -> Result<()> {
    let schema = learning_path_schema();
    println!("{}", serde_json::to_string_pretty(&schema.schema)?);
    Ok(())
}

async fn cmd_generate(config: &Config, topic: &str, json: bool) -> Result<()> {
    let topic = Topic::parse(topic)?;
    let generator = build_generator(config)?;

    if !json {
        eprintln!("{}", "Generating...".dimmed());
    }

    match generator.generate(&topic).await {
        Ok(path) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&path)?);
            } else {
                print!("{}", render_path(&path));
            }
            Ok(())
        }
        Err(failure) => {
            eprintln!("{} {}", "✗".red(), failure.user_message());
            Err(eyre::eyre!(failure))
        }
    }
}

async fn cmd_dashboard(config: &Config) -> Result<()> {
    let generator = build_generator(config)?;
    let dashboard = Dashboard::new(generator, config.generation.stale_results);
    let authenticator = Arc::new(SimulatedAuthenticator::new(Duration::from_millis(
        config.session.login_delay_ms,
    )));

    DashboardRepl::new(authenticator, dashboard).run().await
}
