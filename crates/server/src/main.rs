use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::broadcast;
use tracing::{error, info};

use tempocache_common::{DEFAULT_HOST, DEFAULT_PORT, DEFAULT_REAP_INTERVAL_SECS};
use tempocache_server::{create_router, spawn_reaper};
use tempocache_storage::Store;

#[derive(Parser, Debug)]
#[command(name = "tempocache-server", about = "TempoCache — cache in-memory com TTL")]
struct Args {
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,
    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,
    /// Intervalo do reaper, em segundos
    #[arg(
        long,
        default_value_t = DEFAULT_REAP_INTERVAL_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    reap_interval: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tempocache_server=info".into()),
        )
        .init();

    let args = Args::parse();
    let addr = format!("{}:{}", args.host, args.port);

    let store = Store::new();
    let (shutdown_tx, _) = broadcast::channel::<()>(1);

    let reaper = spawn_reaper(
        store.clone(),
        Duration::from_secs(args.reap_interval),
        shutdown_tx.subscribe(),
    );

    let listener = TcpListener::bind(&addr).await?;
    info!("TempoCache escutando em {addr}");

    let served = axum::serve(listener, create_router(store))
        .with_graceful_shutdown(async {
            if let Err(e) = signal::ctrl_c().await {
                error!("erro ao aguardar sinal: {e}");
            }
            info!("shutdown signal recebido");
        })
        .await;

    // Drop shutdown_tx para encerrar o reaper
    drop(shutdown_tx);
    reaper.await?;

    served?;
    Ok(())
}
