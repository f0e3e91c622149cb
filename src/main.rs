use clap::Parser;
use std::sync::Arc;

use mergington_activities::config::{AppState, Config};
use mergington_activities::{logger, server};

/// Mergington High School activities server
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Configuration file path (extension optional)
    #[arg(short, long, default_value = "config", env = "ACTIVITIES_CONFIG")]
    config: String,

    /// Override `server.host`
    #[arg(long)]
    host: Option<String>,

    /// Override `server.port`
    #[arg(short, long)]
    port: Option<u16>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut cfg = Config::load_from(&cli.config)?;
    if let Some(host) = cli.host {
        cfg.server.host = host;
    }
    if let Some(port) = cli.port {
        cfg.server.port = port;
    }

    logger::init(&cfg)?;

    // Worker thread count comes from config, defaulting to the CPU count
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    let addr = cfg.get_socket_addr()?;
    let listener = server::create_listener(addr)?;

    let state = Arc::new(AppState::from_config(cfg)?);
    let activity_count = state.registry.list().await.len();
    logger::log_server_start(&addr, &state.config, activity_count);

    server::start_signal_handler(Arc::clone(&state))?;
    server::start_server_loop(listener, state).await;
    Ok(())
}
