//! Error types for the header echo server.
//!
//! # Design
//! Only startup can fail. A failed bind is fatal and ends the process with a
//! non-zero status. Per-request failures (malformed framing, unknown path,
//! wrong method) never surface here; hyper and axum answer them on their own.

use std::fmt;
use std::io;
use std::net::SocketAddr;

/// Errors returned while binding or running the server.
#[derive(Debug)]
pub enum ServerError {
    /// The listening socket could not be bound (port in use, no privilege).
    Bind { addr: SocketAddr, source: io::Error },

    /// The accept loop stopped with an I/O error.
    Serve(io::Error),
}

impl fmt::Display for ServerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerError::Bind { addr, source } => {
                write!(f, "failed to bind {addr}: {source}")
            }
            ServerError::Serve(source) => write!(f, "server error: {source}"),
        }
    }
}

impl std::error::Error for ServerError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServerError::Bind { source, .. } => Some(source),
            ServerError::Serve(source) => Some(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error;

    #[test]
    fn bind_error_names_the_address() {
        let err = ServerError::Bind {
            addr: "127.0.0.1:23366".parse().unwrap(),
            source: io::Error::from(io::ErrorKind::AddrInUse),
        };
        let msg = err.to_string();
        assert!(msg.starts_with("failed to bind 127.0.0.1:23366"), "{msg}");
        assert!(err.source().is_some());
    }

    #[test]
    fn serve_error_wraps_the_io_error() {
        let err = ServerError::Serve(io::Error::new(io::ErrorKind::Other, "accept"));
        assert_eq!(err.to_string(), "server error: accept");
        assert!(err.source().is_some());
    }
}
