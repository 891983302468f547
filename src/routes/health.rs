//! MySQL health check endpoint.
//!
//! Answers load balancer and orchestrator probes: 200 with an empty body when
//! the server accepts a connection, answers a ping, and is writable; 503
//! otherwise. The failure cause is only logged, and only in debug mode.

use axum::extract::State;
use axum::http::StatusCode;

use crate::check::run_check;
use crate::error::AppError;
use crate::state::AppState;

/// Health check handler.
pub async fn check(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    match run_check(state.connector.as_ref(), &state.dsn).await {
        Ok(()) => {
            if state.debug {
                tracing::info!("check is ok");
            }
            Ok(StatusCode::OK)
        }
        Err(e) => {
            if state.debug {
                tracing::error!(error = %e, read_only = e.is_read_only(), "check failed");
            }
            Err(e.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    use tracing_subscriber::fmt::MakeWriter;

    use crate::config::Config;
    use crate::db::fake::{FailAt, FakeConnector};
    use crate::dsn::Dsn;

    /// Log sink shared between the subscriber and the test.
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn contents(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    /// Run one check and return its status with everything it logged.
    async fn check_with_logs(fail_at: FailAt, read_only: i64, debug: bool) -> (StatusCode, String) {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let dsn = Dsn::from_config(&Config::default());
        let state = AppState::with_connector(dsn, debug, FakeConnector::new(fail_at, read_only));
        let status = match check(State(state)).await {
            Ok(status) => status,
            Err(e) => axum::response::IntoResponse::into_response(e).status(),
        };

        (status, captured.contents())
    }

    #[tokio::test]
    async fn test_debug_logs_failure_detail() {
        let (status, logs) = check_with_logs(FailAt::Nothing, 1, true).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(logs.contains("check failed"), "{logs}");
        assert!(logs.contains("mysql is read only"), "{logs}");
    }

    #[tokio::test]
    async fn test_debug_logs_connection_failure_detail() {
        let (status, logs) = check_with_logs(FailAt::Ping, 0, true).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(logs.contains("ping failed"), "{logs}");
    }

    #[tokio::test]
    async fn test_failure_is_silent_without_debug() {
        for (fail_at, read_only) in [(FailAt::Nothing, 1), (FailAt::Open, 0), (FailAt::Query, 0)] {
            let (status, logs) = check_with_logs(fail_at, read_only, false).await;
            assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
            assert!(logs.is_empty(), "{logs}");
        }
    }

    #[tokio::test]
    async fn test_success_logged_only_in_debug() {
        let (status, logs) = check_with_logs(FailAt::Nothing, 0, true).await;
        assert_eq!(status, StatusCode::OK);
        assert!(logs.contains("check is ok"), "{logs}");

        let (status, logs) = check_with_logs(FailAt::Nothing, 0, false).await;
        assert_eq!(status, StatusCode::OK);
        assert!(logs.is_empty(), "{logs}");
    }
}
