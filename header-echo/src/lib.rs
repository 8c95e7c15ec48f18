//! Diagnostic HTTP server that prints request headers.
//!
//! # Overview
//! One route, `GET /`, answers `200 OK` with an empty body after writing the
//! request line and every header value to a [`HeaderSink`] (standard output
//! in production). Every other path is axum's 404 and every other method on
//! `/` is axum's 405.
//!
//! # Design
//! - The handler holds no mutable state; the sink is shared read-only.
//! - The listener lives in `serve` from a successful `bind` until the
//!   shutdown future resolves, then is dropped so the port is free again.
//! - After shutdown begins, in-flight connections get a short grace period
//!   to finish and are abandoned afterwards.

use std::fmt;
use std::future::{pending, Future, IntoFuture};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    routing::get,
    Router,
};
use tokio::{net::TcpListener, sync::oneshot};

pub mod config;
pub mod dump;
pub mod error;
pub mod shutdown;

pub use dump::{HeaderDump, HeaderSink, Stdout};
pub use error::ServerError;

/// Listener lifecycle. `Stopped -> Running` once bound and accepting,
/// `Running -> Stopped` once the shutdown signal has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Stopped,
    Running,
}

impl fmt::Display for Lifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Lifecycle::Stopped => f.write_str("STOPPED"),
            Lifecycle::Running => f.write_str("RUNNING"),
        }
    }
}

pub type Sink = Arc<dyn HeaderSink>;

pub fn app() -> Router {
    app_with_sink(Arc::new(Stdout))
}

pub fn app_with_sink(sink: Sink) -> Router {
    Router::new().route("/", get(echo_headers)).with_state(sink)
}

async fn echo_headers(
    State(sink): State<Sink>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
) -> StatusCode {
    let dump = HeaderDump {
        method: &method,
        uri: &uri,
        headers: &headers,
    };
    sink.emit(&dump.to_string());
    StatusCode::OK
}

pub async fn bind(addr: SocketAddr) -> Result<TcpListener, ServerError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })
}

/// Serves [`app`] until `shutdown` resolves, then gives in-flight
/// connections at most [`config::GRACE`] before returning.
pub async fn run<F>(listener: TcpListener, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    serve(listener, app(), shutdown, Some(config::GRACE)).await
}

/// Serves `router` on `listener` until `shutdown` resolves.
///
/// `grace: None` drains in-flight connections without a deadline. The
/// listener is dropped before this returns in either case.
pub async fn serve<F>(
    listener: TcpListener,
    router: Router,
    shutdown: F,
    grace: Option<Duration>,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr().map_err(ServerError::Serve)?;
    log::info!(
        "{} -> {}: listening on http://{addr}",
        Lifecycle::Stopped,
        Lifecycle::Running
    );

    let (stopping_tx, stopping_rx) = oneshot::channel::<()>();
    let signal = async move {
        shutdown.await;
        log::info!("no longer accepting connections on {addr}");
        let _ = stopping_tx.send(());
    };
    let server = axum::serve(listener, router)
        .with_graceful_shutdown(signal)
        .into_future();

    let result = match grace {
        None => server.await,
        Some(grace) => {
            let deadline = async move {
                if stopping_rx.await.is_err() {
                    // Server finished before any signal; let it win.
                    pending::<()>().await;
                }
                tokio::time::sleep(grace).await;
            };
            tokio::select! {
                res = server => res,
                () = deadline => {
                    log::warn!("abandoning in-flight connections after {grace:?}");
                    Ok(())
                }
            }
        }
    };

    log::info!("{} -> {}", Lifecycle::Running, Lifecycle::Stopped);
    result.map_err(ServerError::Serve)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Collect(Mutex<Vec<String>>);

    impl HeaderSink for Collect {
        fn emit(&self, dump: &str) {
            self.0.lock().unwrap().push(dump.to_string());
        }
    }

    #[test]
    fn lifecycle_displays_state_names() {
        assert_eq!(Lifecycle::Stopped.to_string(), "STOPPED");
        assert_eq!(Lifecycle::Running.to_string(), "RUNNING");
    }

    #[tokio::test]
    async fn handler_emits_one_dump_and_returns_ok() {
        let sink = Arc::new(Collect::default());
        let mut headers = HeaderMap::new();
        headers.insert("host", "localhost:23366".parse().unwrap());

        let status = echo_headers(
            State(sink.clone() as Sink),
            Method::GET,
            Uri::from_static("/?debug=1"),
            headers,
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let dumps = sink.0.lock().unwrap();
        assert_eq!(dumps.len(), 1);
        assert_eq!(dumps[0], "GET /?debug=1\nhost: localhost:23366");
    }

    #[tokio::test]
    async fn bind_reports_address_in_use() {
        let taken = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let taken_addr = taken.local_addr().unwrap();

        let err = bind(taken_addr).await.unwrap_err();
        match err {
            ServerError::Bind { addr, .. } => assert_eq!(addr, taken_addr),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn run_returns_once_shutdown_resolves() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let result = tokio::time::timeout(
            Duration::from_secs(2),
            run(listener, std::future::ready(())),
        )
        .await
        .expect("server did not stop");
        assert!(result.is_ok());
    }
}
