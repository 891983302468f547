#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

use async_trait::async_trait;
use mysql_check::db::{Connection, Connector};
use mysql_check::{create_router, AppState, CheckError, Config, Dsn};
use tokio::net::TcpListener;

pub fn init_tracing_once() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("mysql_check=debug")
            .with_test_writer()
            .init();
    });
}

/// How a fake MySQL server behaves for every connection opened against it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Server {
    Writable,
    ReadOnly,
    Unreachable,
    PingFails,
    QueryFails,
}

/// A connector that never touches the network.
///
/// Counts opened and closed connections so tests can check that every
/// connection a probe opens is released again.
#[derive(Debug, Clone)]
pub struct FakeConnector {
    server: Server,
    opened: Arc<AtomicUsize>,
    closed: Arc<AtomicUsize>,
}

impl FakeConnector {
    pub fn new(server: Server) -> Self {
        Self {
            server,
            opened: Arc::new(AtomicUsize::new(0)),
            closed: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn opened(&self) -> usize {
        self.opened.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

struct FakeConnection {
    server: Server,
    closed: Arc<AtomicUsize>,
}

fn refused() -> sqlx::Error {
    sqlx::Error::Io(std::io::Error::new(
        std::io::ErrorKind::ConnectionRefused,
        "connection refused",
    ))
}

#[async_trait]
impl Connector for FakeConnector {
    async fn open(&self, _dsn: &Dsn) -> Result<Box<dyn Connection>, CheckError> {
        if self.server == Server::Unreachable {
            return Err(CheckError::Open(refused()));
        }
        self.opened.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeConnection {
            server: self.server,
            closed: self.closed.clone(),
        }))
    }
}

#[async_trait]
impl Connection for FakeConnection {
    async fn ping(&mut self) -> Result<(), CheckError> {
        match self.server {
            Server::PingFails => Err(CheckError::Ping(refused())),
            _ => Ok(()),
        }
    }

    async fn read_only(&mut self) -> Result<i64, CheckError> {
        match self.server {
            Server::QueryFails => Err(CheckError::Query(sqlx::Error::RowNotFound)),
            Server::ReadOnly => Ok(1),
            _ => Ok(0),
        }
    }

    async fn close(self: Box<Self>) -> Result<(), CheckError> {
        self.closed.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub fn sample_dsn() -> Dsn {
    Dsn::from_config(&Config {
        mysql_address: "db:3306".to_string(),
        mysql_timeout: "5".to_string(),
        mysql_user_password: "root:secret".to_string(),
        http_address: "127.0.0.1:0".to_string(),
    })
}

/// Serve the probe on an ephemeral port, returning its base URL.
pub async fn spawn_app(connector: FakeConnector, debug: bool) -> String {
    init_tracing_once();

    let state = AppState::with_connector(sample_dsn(), debug, connector);
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let address = format!("http://{}", listener.local_addr().unwrap());

    tokio::spawn(mysql_check::http::serve(listener, create_router(state)));

    address
}
