//! Ticket ledger process.
//!
//! Reads newline-delimited JSON requests from stdin and writes one JSON reply
//! per line to stdout. Logs go to stderr. Stops on end of input, Ctrl-C or
//! SIGTERM, saving the snapshot before exiting.

use anyhow::Context;
use metrics_exporter_prometheus::PrometheusBuilder;
use ticket_ledger::config::Config;
use ticket_ledger::{LedgerHandle, LedgerReducer, LedgerServer, LedgerSnapshot, LedgerState, metrics};
use ticket_ledger_core::LedgerEnvironment;
use tokio::io::BufReader;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = Config::from_env();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.observability.log_filter))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!(
        max_mint_per_event = config.ledger.max_mint_per_event,
        snapshot_path = ?config.snapshot.path,
        metrics_addr = ?config.observability.metrics_addr,
        "Configuration loaded"
    );

    if let Some(addr) = config.observability.metrics_addr {
        PrometheusBuilder::new()
            .with_http_listener(addr)
            .install()
            .context("failed to install Prometheus exporter")?;
        info!(%addr, "Metrics exporter listening");
    }
    metrics::register_metrics();

    let state = match &config.snapshot.path {
        Some(path) => match LedgerSnapshot::load(path)
            .with_context(|| format!("failed to load snapshot from {}", path.display()))?
        {
            Some(snapshot) => {
                let state = LedgerState::from(snapshot);
                info!(
                    events = state.event_count(),
                    tickets = state.ticket_count(),
                    "Ledger restored from snapshot"
                );
                state
            }
            None => {
                info!(path = %path.display(), "No snapshot found, starting empty");
                LedgerState::new()
            }
        },
        None => LedgerState::new(),
    };

    let handle = LedgerHandle::new(
        state,
        LedgerReducer::new(config.ledger),
        LedgerEnvironment::production(),
    );
    let server = LedgerServer::new(handle, config.snapshot.path.clone());

    let served = server
        .run(
            BufReader::new(tokio::io::stdin()),
            tokio::io::stdout(),
            shutdown_signal(),
        )
        .await;

    // Save even when serving failed, then report the first failure
    let saved = server.persist().await;
    served.context("failed to serve requests")?;
    saved.context("failed to save snapshot")?;

    info!("Ledger stopped");
    Ok(())
}

/// Graceful shutdown signal handler.
///
/// Waits for:
/// - Ctrl+C (SIGINT)
/// - SIGTERM
///
/// The SIGTERM handler is installed when this is called, not when the future
/// is first polled.
fn shutdown_signal() -> impl Future<Output = ()> {
    #[cfg(unix)]
    let terminate = signal::unix::signal(signal::unix::SignalKind::terminate());

    async move {
        let ctrl_c = async {
            if let Err(err) = signal::ctrl_c().await {
                error!(error = %err, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async move {
            match terminate {
                Ok(mut stream) => {
                    stream.recv().await;
                }
                Err(err) => {
                    error!(error = %err, "Failed to install SIGTERM handler");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => {
                info!("Received Ctrl+C signal");
            }
            () = terminate => {
                info!("Received SIGTERM signal");
            }
        }
    }
}
