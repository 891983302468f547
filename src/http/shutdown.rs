//! Graceful shutdown signal handling.

use std::time::Duration;

use crate::config::SHUTDOWN_GRACE_SECS;

/// Resolves on SIGTERM or SIGINT.
///
/// Once the signal arrives the server stops accepting connections and waits
/// for in-flight checks. A watchdog exits the process if draining takes longer
/// than the grace period.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }

    tokio::spawn(async {
        tokio::time::sleep(Duration::from_secs(SHUTDOWN_GRACE_SECS)).await;
        tracing::warn!(
            grace_secs = SHUTDOWN_GRACE_SECS,
            "Checks still running after grace period, exiting"
        );
        std::process::exit(0);
    });
    tracing::info!(
        grace_secs = SHUTDOWN_GRACE_SECS,
        "Graceful shutdown initiated, waiting for in-flight checks"
    );
}
