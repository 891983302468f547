//! HTTP server startup logic.

use axum::Router;
use tokio::net::TcpListener;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    #[error("Server error: {0}")]
    Server(String),
}

/// Normalize a listen address. A bare `:port` listens on all interfaces.
pub fn listen_addr(address: &str) -> String {
    match address.strip_prefix(':') {
        Some(port) => format!("0.0.0.0:{}", port),
        None => address.to_string(),
    }
}

/// Bind the probe listener. Host names are resolved.
pub async fn bind(address: &str) -> Result<TcpListener, ServerError> {
    Ok(TcpListener::bind(listen_addr(address)).await?)
}

/// Serve on an already bound listener until a shutdown signal arrives.
pub async fn serve(listener: TcpListener, app: Router) -> Result<(), ServerError> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!(%addr, "Starting HTTP server");
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown::shutdown_signal())
        .await
        .map_err(|e| ServerError::Server(e.to_string()))
}

/// Start the HTTP server on `address`.
///
/// This function blocks until the server shuts down.
pub async fn start_server(app: Router, address: &str) -> Result<(), ServerError> {
    let listener = bind(address).await?;
    serve(listener, app).await
}
