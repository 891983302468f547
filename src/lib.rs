//! mysql-check: HTTP liveness probe for a MySQL node.
//!
//! Each request to `/` opens a connection, pings the server, and checks that
//! it is not in read-only mode.

pub mod check;
pub mod config;
pub mod db;
pub mod dsn;
pub mod error;
pub mod http;
pub mod middleware;
pub mod routes;
pub mod state;

pub use check::{run_check, CheckError};
pub use config::{Config, ConfigError};
pub use dsn::Dsn;
pub use error::AppError;
pub use routes::create_router;
pub use state::AppState;
