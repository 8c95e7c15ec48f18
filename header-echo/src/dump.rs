//! Rendering and output of the per-request header dump.

use std::fmt;
use std::io::{self, Write};

use axum::http::{HeaderMap, Method, Uri};

/// Request line plus every header value, one `name: value` line each.
///
/// Repeated header names yield repeated lines in the order hyper delivered
/// them. Values that are not valid UTF-8 are rendered lossily.
pub struct HeaderDump<'a> {
    pub method: &'a Method,
    pub uri: &'a Uri,
    pub headers: &'a HeaderMap,
}

impl fmt::Display for HeaderDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.uri)?;
        for (name, value) in self.headers {
            write!(
                f,
                "\n{}: {}",
                name,
                String::from_utf8_lossy(value.as_bytes())
            )?;
        }
        Ok(())
    }
}

/// Destination for rendered dumps.
pub trait HeaderSink: Send + Sync {
    fn emit(&self, dump: &str);
}

/// Writes each dump to standard output, followed by a blank line.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stdout;

impl HeaderSink for Stdout {
    fn emit(&self, dump: &str) {
        // One lock per dump keeps concurrent requests from interleaving.
        if let Err(e) = write_dump(&mut io::stdout().lock(), dump) {
            log::debug!("dropping header dump: {e}");
        }
    }
}

/// Writes `dump` and a blank separator line, then flushes.
pub fn write_dump<W: Write>(out: &mut W, dump: &str) -> io::Result<()> {
    writeln!(out, "{dump}\n")?;
    out.flush()
}
