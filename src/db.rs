//! Database access used by the health check.
//!
//! `Connector` opens one connection per check; nothing is pooled or reused.
//! `MySqlConnector` is the production implementation backed by sqlx.

use async_trait::async_trait;
use sqlx::{ConnectOptions, Connection as _, MySqlConnection};

use crate::check::CheckError;
use crate::config::READ_ONLY_QUERY;
use crate::dsn::Dsn;

/// Opens fresh database connections.
#[async_trait]
pub trait Connector: Send + Sync {
    async fn open(&self, dsn: &Dsn) -> Result<Box<dyn Connection>, CheckError>;
}

/// A single open database connection.
#[async_trait]
pub trait Connection: Send {
    /// Round-trip to the server without running a query.
    async fn ping(&mut self) -> Result<(), CheckError>;

    /// Value of the server's global `read_only` variable.
    async fn read_only(&mut self) -> Result<i64, CheckError>;

    /// Release the connection.
    async fn close(self: Box<Self>) -> Result<(), CheckError>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MySqlConnector;

#[async_trait]
impl Connector for MySqlConnector {
    async fn open(&self, dsn: &Dsn) -> Result<Box<dyn Connection>, CheckError> {
        let (options, timeout) = dsn.connect_options()?;
        let conn = match timeout {
            Some(timeout) => tokio::time::timeout(timeout, options.connect())
                .await
                .map_err(|_| CheckError::Timeout(timeout))??,
            None => options.connect().await?,
        };
        Ok(Box::new(MySqlSession(conn)))
    }
}

struct MySqlSession(MySqlConnection);

#[async_trait]
impl Connection for MySqlSession {
    async fn ping(&mut self) -> Result<(), CheckError> {
        self.0.ping().await.map_err(CheckError::Ping)
    }

    async fn read_only(&mut self) -> Result<i64, CheckError> {
        sqlx::query_scalar::<_, i64>(READ_ONLY_QUERY)
            .fetch_one(&mut self.0)
            .await
            .map_err(CheckError::Query)
    }

    async fn close(self: Box<Self>) -> Result<(), CheckError> {
        let MySqlSession(conn) = *self;
        conn.close().await.map_err(CheckError::Close)
    }
}
