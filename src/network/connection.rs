//! Connection Handler
//!
//! Handles individual client connections.

use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::net::TcpStream;
use std::sync::Arc;
use std::time::Duration;

use crate::engine::Engine;
use crate::error::{CatalogError, Result};
use crate::protocol::{read_line, write_line};

/// Handles a single client connection
///
/// Lifecycle: greeting, then one reply per request line until the peer
/// closes its side. The platform filter is never touched on connect or
/// disconnect.
pub struct Connection<R, W> {
    /// Line reader (buffered for efficiency)
    reader: R,

    /// Reply writer (buffered for efficiency)
    writer: W,

    /// Reference to the query engine
    engine: Arc<Engine>,

    /// First line sent to the client
    greeting: String,

    /// Peer address for logging
    peer_addr: String,
}

impl Connection<BufReader<TcpStream>, BufWriter<TcpStream>> {
    /// Create a new connection handler over a TCP stream
    pub fn new(stream: TcpStream, engine: Arc<Engine>, greeting: impl Into<String>) -> Result<Self> {
        // Get peer address for logging before we split the stream
        let peer_addr = stream
            .peer_addr()
            .map(|a| a.to_string())
            .unwrap_or_else(|_| "unknown".to_string());

        // Disable Nagle's algorithm for low latency
        stream.set_nodelay(true)?;

        // Clone stream for separate read/write handles
        let read_stream = stream.try_clone()?;
        let write_stream = stream;

        Ok(Self::from_parts(
            BufReader::new(read_stream),
            BufWriter::new(write_stream),
            engine,
            greeting,
            peer_addr,
        ))
    }

    /// Configure connection timeouts (0 leaves the direction blocking forever)
    pub fn set_timeouts(&mut self, read_ms: u64, write_ms: u64) -> Result<()> {
        let read_stream = self.reader.get_ref();
        let write_stream = self.writer.get_ref();

        if read_ms > 0 {
            read_stream.set_read_timeout(Some(Duration::from_millis(read_ms)))?;
        }
        if write_ms > 0 {
            write_stream.set_write_timeout(Some(Duration::from_millis(write_ms)))?;
        }

        Ok(())
    }
}

impl<R: BufRead, W: Write> Connection<R, W> {
    /// Create a handler over any line-oriented duplex channel
    pub fn from_parts(
        reader: R,
        writer: W,
        engine: Arc<Engine>,
        greeting: impl Into<String>,
        peer_addr: impl Into<String>,
    ) -> Self {
        Self {
            reader,
            writer,
            engine,
            greeting: greeting.into(),
            peer_addr: peer_addr.into(),
        }
    }

    /// Handle the connection (blocking until closed)
    ///
    /// Returns `Ok` when the client disconnects and `Err` on any other
    /// transport failure.
    pub fn handle(&mut self) -> Result<()> {
        tracing::debug!("Connection established from {}", self.peer_addr);

        if let Err(e) = write_line(&mut self.writer, &self.greeting) {
            return self.finish_on_error(e);
        }

        loop {
            // Read next request line
            let line = match read_line(&mut self.reader) {
                Ok(Some(line)) => line,
                Ok(None) => {
                    tracing::debug!("Client {} disconnected", self.peer_addr);
                    return Ok(());
                }
                Err(e) => return self.finish_on_error(e),
            };

            tracing::trace!("Received line from {}: {:?}", self.peer_addr, line);

            // Replies are streamed straight into the writer
            match self.engine.respond_to(&line, &mut self.writer) {
                Ok(status) => tracing::trace!("Replied to {} ({:?})", self.peer_addr, status),
                Err(e) => return self.finish_on_error(e),
            }
        }
    }

    /// Map a transport failure to the handler's exit status
    ///
    /// Peer hang-ups and read timeouts end the session quietly.
    fn finish_on_error(&self, e: CatalogError) -> Result<()> {
        if let CatalogError::Io(ref io_err) = e {
            if is_disconnect(io_err) {
                tracing::debug!("Client {} went away: {}", self.peer_addr, io_err);
                return Ok(());
            }
        }
        tracing::warn!("Transport error with {}: {}", self.peer_addr, e);
        Err(e)
    }

    /// Get the peer address string
    pub fn peer_addr(&self) -> &str {
        &self.peer_addr
    }
}

fn is_disconnect(err: &io::Error) -> bool {
    matches!(
        err.kind(),
        io::ErrorKind::UnexpectedEof
            | io::ErrorKind::ConnectionReset
            | io::ErrorKind::ConnectionAborted
            | io::ErrorKind::BrokenPipe
            // Read timeout (Windows uses TimedOut instead of WouldBlock)
            | io::ErrorKind::WouldBlock
            | io::ErrorKind::TimedOut
    )
}
