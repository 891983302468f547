//! Shared application state for request handlers.

use std::sync::Arc;

use crate::db::{Connector, MySqlConnector};
use crate::dsn::Dsn;

/// Shared application state, cloneable across handlers via Arc-wrapped fields.
///
/// Built once at startup and never mutated. Holds the debug flag gating
/// health-check logging, the connection string, and the connector each check
/// uses to open its own connection.
#[derive(Clone)]
pub struct AppState {
    pub debug: bool,
    pub dsn: Arc<Dsn>,
    pub connector: Arc<dyn Connector>,
}

impl AppState {
    /// Creates state that checks a real MySQL server.
    pub fn new(dsn: Dsn, debug: bool) -> Self {
        Self::with_connector(dsn, debug, MySqlConnector)
    }

    /// Creates state around an arbitrary connector.
    pub fn with_connector(dsn: Dsn, debug: bool, connector: impl Connector + 'static) -> Self {
        Self {
            debug,
            dsn: Arc::new(dsn),
            connector: Arc::new(connector),
        }
    }
}
