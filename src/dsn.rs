//! MySQL connection string.
//!
//! The DSN is assembled once at startup from the configuration and rendered in
//! the `user:password@tcp(host:port)/?timeout=Ns` form. Its parts are only
//! validated when a check translates them into driver options, so a malformed
//! value fails that check instead of preventing startup.
//!
//! Gaps are filled the way the MySQL driver fills them: an empty user logs in
//! anonymously, an empty host dials the local machine, and a zero timeout
//! means no connect deadline.

use std::fmt;
use std::time::Duration;

use sqlx::mysql::MySqlConnectOptions;

use crate::config::{Config, DEFAULT_MYSQL_HOST, DEFAULT_MYSQL_PORT};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DsnError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),
    #[error("invalid port: {0}")]
    InvalidPort(String),
    #[error("invalid timeout: {0:?}")]
    InvalidTimeout(String),
}

#[derive(Clone, PartialEq, Eq)]
pub struct Dsn {
    address: String,
    timeout: String,
    user_password: String,
}

impl Dsn {
    pub fn from_config(config: &Config) -> Self {
        Self {
            address: config.mysql_address.clone(),
            timeout: config.mysql_timeout.clone(),
            user_password: config.mysql_user_password.clone(),
        }
    }

    /// Driver options and the connect deadline for this DSN, if any.
    pub fn connect_options(&self) -> Result<(MySqlConnectOptions, Option<Duration>), DsnError> {
        let (user, password) = self.credentials();
        let (host, port) = self.host_port()?;
        let timeout = self.timeout()?;

        let mut options = MySqlConnectOptions::new()
            .host(host)
            .port(port)
            .username(user);
        if let Some(password) = password {
            options = options.password(password);
        }

        Ok((options, timeout))
    }

    fn credentials(&self) -> (&str, Option<&str>) {
        match self.user_password.split_once(':') {
            Some((user, password)) => (user, Some(password)),
            None => (self.user_password.as_str(), None),
        }
    }

    fn host_port(&self) -> Result<(&str, u16), DsnError> {
        let address = self.address.as_str();
        let (host, port) = if let Some(rest) = address.strip_prefix('[') {
            let (host, tail) = rest
                .split_once(']')
                .ok_or_else(|| DsnError::InvalidAddress(address.to_string()))?;
            match tail.strip_prefix(':') {
                Some(port) => (host, Some(port)),
                None if tail.is_empty() => (host, None),
                None => return Err(DsnError::InvalidAddress(address.to_string())),
            }
        } else {
            match address.rsplit_once(':') {
                Some((host, port)) => (host, Some(port)),
                None => (address, None),
            }
        };

        let host = if host.is_empty() { DEFAULT_MYSQL_HOST } else { host };
        let port = match port {
            Some(port) => port
                .parse()
                .map_err(|_| DsnError::InvalidPort(port.to_string()))?,
            None => DEFAULT_MYSQL_PORT,
        };
        Ok((host, port))
    }

    fn timeout(&self) -> Result<Option<Duration>, DsnError> {
        let invalid = || DsnError::InvalidTimeout(self.timeout.clone());
        let secs: f64 = self.timeout.trim().parse().map_err(|_| invalid())?;
        if secs == 0.0 {
            return Ok(None);
        }
        if secs < 0.0 {
            return Err(invalid());
        }
        Duration::try_from_secs_f64(secs)
            .map(Some)
            .map_err(|_| invalid())
    }
}

impl fmt::Display for Dsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}@tcp({})/?timeout={}s",
            self.user_password, self.address, self.timeout
        )
    }
}

impl fmt::Debug for Dsn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let user = self
            .user_password
            .split_once(':')
            .map_or(self.user_password.as_str(), |(user, _)| user);
        f.debug_struct("Dsn")
            .field("user", &user)
            .field("address", &self.address)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
