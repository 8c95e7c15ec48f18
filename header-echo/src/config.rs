//! Fixed listener settings.
//!
//! The server always listens on port 23366 on all interfaces. Nothing here is
//! read from the environment or the command line.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

pub const PORT: u16 = 23366;

pub const ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), PORT);

/// How long in-flight connections may drain after shutdown starts.
pub const GRACE: Duration = Duration::from_millis(1000);
