//! TravelPlanner - trip itinerary generator
//!
//! CLI entry point: serve the HTTP API or plan a single trip from the terminal.

use std::fs;
use std::sync::Arc;

use clap::Parser;
use eyre::{Context, Result};
use tracing::{debug, info};

use travelplanner::cli::{Cli, Command, OutputFormat, get_log_path};
use travelplanner::config::Config;
use travelplanner::pipeline::{TravelPlanner, TravelRequest};
use travelplanner::server;

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    let log_path = get_log_path();
    if let Some(log_dir) = log_path.parent() {
        fs::create_dir_all(log_dir).context("Failed to create log directory")?;
    }

    // Priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level) {
        Some(s) => match s.to_uppercase().as_str() {
            "TRACE" => tracing::Level::TRACE,
            "DEBUG" => tracing::Level::DEBUG,
            "INFO" => tracing::Level::INFO,
            "WARN" | "WARNING" => tracing::Level::WARN,
            "ERROR" => tracing::Level::ERROR,
            _ => {
                eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", s);
                tracing::Level::INFO
            }
        },
        None => tracing::Level::INFO,
    };

    let log_file = fs::File::create(&log_path).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());
    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let mut config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            cmd_serve(&config).await
        }
        Command::Plan {
            destination,
            dates,
            preferences,
            format,
        } => {
            let mut request = TravelRequest::new(destination, dates);
            request.preferences = preferences;
            cmd_plan(&config, &request, format).await
        }
    }
}

async fn cmd_serve(config: &Config) -> Result<()> {
    config.validate()?;
    let planner = Arc::new(TravelPlanner::from_config(config)?);
    println!("Listening on http://{}:{}", config.server.host, config.server.port);
    server::serve(planner, &config.server).await
}

async fn cmd_plan(config: &Config, request: &TravelRequest, format: OutputFormat) -> Result<()> {
    config.validate()?;
    let planner = TravelPlanner::from_config(config)?;
    let response = planner
        .process_request(request)
        .await
        .context(format!("Failed to plan trip to {}", request.destination))?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("# Plan\n\n{}\n", response.plan);
            if !response.events.is_empty() {
                println!("# Events\n");
                for event in &response.events {
                    println!("- {}", event);
                }
                println!();
            }
            println!("# Itinerary\n\n{}", response.itinerary);
        }
    }
    Ok(())
}
