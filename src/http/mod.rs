//! HTTP server module.
//!
//! Binds the probe listener and serves until SIGTERM/SIGINT, then drains
//! in-flight checks before returning.

mod server;
mod shutdown;

pub use server::{bind, listen_addr, serve, start_server, ServerError};
