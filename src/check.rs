//! The health check pipeline.
//!
//! A check opens a connection, pings it, and reads the global read-only flag.
//! The first failing stage ends the check. Nothing is retried.

use std::time::Duration;

use crate::db::{Connection, Connector};
use crate::dsn::{Dsn, DsnError};

#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    #[error("invalid connection string: {0}")]
    Dsn(#[from] DsnError),

    #[error("failed to open connection: {0}")]
    Open(#[from] sqlx::Error),

    #[error("timed out after {0:?} opening connection")]
    Timeout(Duration),

    #[error("ping failed: {0}")]
    Ping(sqlx::Error),

    #[error("read only query failed: {0}")]
    Query(sqlx::Error),

    #[error("mysql is read only")]
    ReadOnly,

    #[error("failed to close connection: {0}")]
    Close(sqlx::Error),
}

impl CheckError {
    /// Whether the server answered but refuses writes.
    pub fn is_read_only(&self) -> bool {
        matches!(self, CheckError::ReadOnly)
    }
}

/// Run one check against the server described by `dsn`.
///
/// Once the connection is open it is closed before returning, whichever stage
/// failed. A failure to close is logged and does not change the outcome.
pub async fn run_check(connector: &dyn Connector, dsn: &Dsn) -> Result<(), CheckError> {
    let mut conn = connector.open(dsn).await?;
    let outcome = probe(conn.as_mut()).await;

    if let Err(e) = conn.close().await {
        tracing::debug!(error = %e, "Failed to close MySQL connection");
    }

    outcome
}

async fn probe(conn: &mut dyn Connection) -> Result<(), CheckError> {
    conn.ping().await?;
    match conn.read_only().await? {
        0 => Ok(()),
        _ => Err(CheckError::ReadOnly),
    }
}
