//! Background task worker.
//!
//! Consumes tasks from the Postgres-backed queue that the API process feeds.
//! Runs the same task definitions as the API, so the two sides cannot drift.

use clap::Parser;
use fairshare::{config::Config, jobs, telemetry};

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c().await.expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = fairshare::config::Args::parse();

    let config = Config::load(&args)?;

    if args.validate {
        println!("Configuration is valid.");
        return Ok(());
    }

    telemetry::init_telemetry()?;

    let pool = fairshare::connect_pool(&config).await?;

    // The worker can come up before the API has ever run, so it applies the
    // schema migrations itself.
    fairshare::migrator().run(&pool).await?;

    let worker = jobs::build_ocr_worker(pool.clone()).await?;
    tracing::info!("Worker consuming queue {:?}", jobs::OCR_QUEUE);

    tokio::select! {
        result = worker.run() => {
            result?;
        }
        _ = shutdown_signal() => {
            worker.shutdown();
        }
    }

    tracing::info!("Closing database connections...");
    pool.close().await;

    Ok(())
}
