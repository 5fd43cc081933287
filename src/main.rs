//! AntiFakeKit API server entry point.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use antifakekit_api::app::{bootstrap, serve, API_PREFIX, OPENAPI_PATH};
use antifakekit_api::config::Settings;

/// AntiFakeKit API server.
#[derive(Parser, Debug)]
#[command(name = "antifakekit-api")]
#[command(about = "HTTP API service for AntiFakeKit")]
#[command(version)]
struct Args {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,

    /// Address to bind the HTTP server to.
    #[arg(long, global = true, default_value_t = IpAddr::V4(Ipv4Addr::UNSPECIFIED))]
    host: IpAddr,

    /// HTTP server port.
    #[arg(short, long, global = true, default_value = "8000")]
    port: u16,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the API (default).
    Serve,

    /// Print the resolved settings and exit.
    CheckConfig,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    let filter = if args.verbose {
        EnvFilter::new("antifakekit_api=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    let settings = Settings::load().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    match args.command {
        Some(Command::CheckConfig) => cmd_check_config(&settings),
        Some(Command::Serve) | None => {
            cmd_serve(&settings, SocketAddr::new(args.host, args.port)).await
        }
    }
}

/// Print resolved settings.
fn cmd_check_config(settings: &Settings) -> anyhow::Result<()> {
    println!("ENV = {}", settings.environment_name());
    Ok(())
}

/// Build the app and serve it until a shutdown signal arrives.
async fn cmd_serve(settings: &Settings, addr: SocketAddr) -> anyhow::Result<()> {
    let app = bootstrap(settings);
    info!("Environment: {}", settings.environment_name());
    info!("Title: {}", app.title());
    info!("Health: http://{}{}/health", addr, API_PREFIX);
    info!("OpenAPI: http://{}{}", addr, OPENAPI_PATH);

    serve(app, addr)
        .await
        .with_context(|| format!("HTTP server on {addr} failed"))
}
