//! # GRIDDUEL Game Server
//!
//! Runs the game actor and the WebSocket gateway.
//!
//! ## Usage
//!
//! ```bash
//! gridduel_server --config gridduel.toml --port 8080 --max-clients 10 --seed 42
//! ```
//!
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::net::SocketAddr;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use gridduel_server::{gateway, spawn_actor, ChaChaDice, ServerConfig};

fn print_help() {
    println!("Usage: gridduel_server [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -c, --config <FILE>        TOML config file (default: built-in defaults)");
    println!("  -p, --port <PORT>          TCP port to bind (default: 8080)");
    println!("  -m, --max-clients <NUM>    Maximum connected clients (default: 10)");
    println!("  -s, --seed <SEED>          RNG seed for reproducible games");
    println!("  -h, --help                 Show this help");
}

/// Loads the config file (if any), then applies flag overrides.
fn load_config(args: &[String]) -> Result<Option<ServerConfig>, String> {
    let mut config_path: Option<&str> = None;
    let mut port: Option<u16> = None;
    let mut max_clients: Option<usize> = None;
    let mut seed: Option<u64> = None;

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match args[i].as_str() {
            "--config" | "-c" => {
                config_path = Some(value.ok_or("--config needs a value")?.as_str());
                i += 1;
            }
            "--port" | "-p" => {
                port = Some(parse_flag("--port", value)?);
                i += 1;
            }
            "--max-clients" | "-m" => {
                max_clients = Some(parse_flag("--max-clients", value)?);
                i += 1;
            }
            "--seed" | "-s" => {
                seed = Some(parse_flag("--seed", value)?);
                i += 1;
            }
            "--help" | "-h" => return Ok(None),
            other => return Err(format!("unknown argument: {other}")),
        }
        i += 1;
    }

    let mut config = match config_path {
        Some(path) => ServerConfig::load(path).map_err(|err| err.to_string())?,
        None => ServerConfig::default(),
    };
    if let Some(port) = port {
        config.bind_address = SocketAddr::new(config.bind_address.ip(), port);
    }
    if let Some(max_clients) = max_clients {
        config.max_clients = max_clients;
    }
    if seed.is_some() {
        config.seed = seed;
    }
    config.validate().map_err(|err| err.to_string())?;
    Ok(Some(config))
}

fn parse_flag<T: std::str::FromStr>(flag: &str, value: Option<&String>) -> Result<T, String> {
    value
        .ok_or_else(|| format!("{flag} needs a value"))?
        .parse()
        .map_err(|_| format!("invalid value for {flag}"))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = std::env::args().collect();
    let config = match load_config(&args) {
        Ok(Some(config)) => config,
        Ok(None) => {
            print_help();
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            tracing::error!("{}", err);
            print_help();
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(
        "GRIDDUEL server: bind {}, max clients {}, seed {:?}",
        config.bind_address,
        config.max_clients,
        config.seed
    );

    let runtime = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(runtime) => runtime,
        Err(err) => {
            tracing::error!("Cannot start runtime: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let actor = match spawn_actor(&config, ChaChaDice::new(config.seed)) {
        Ok(actor) => actor,
        Err(err) => {
            tracing::error!("Cannot start game actor: {}", err);
            return ExitCode::FAILURE;
        }
    };

    let app = gateway::router(actor.sender(), config.outbound_buffer);
    let served = runtime.block_on(async {
        let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
        tracing::info!("Listening on {}", config.bind_address);
        axum::serve(listener, app)
            .with_graceful_shutdown(async {
                if let Err(err) = tokio::signal::ctrl_c().await {
                    tracing::error!("Cannot listen for Ctrl-C: {}", err);
                }
                tracing::info!("Ctrl-C received, shutting down");
            })
            .await
    });

    let stats = actor.shutdown();
    if let Some(stats) = stats {
        tracing::info!(
            "Final stats: {} actions, {} rejected, min {}us, avg {}us, max {}us",
            stats.processed,
            stats.rejected,
            stats.min_action_us,
            stats.avg_action_us,
            stats.max_action_us
        );
    }

    match served {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("Server error: {}", err);
            ExitCode::FAILURE
        }
    }
}
