//! TCP Server
//!
//! Accepts connections and serves each one on its own thread.

use std::io::{self, BufWriter};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use crate::config::Config;
use crate::engine::Engine;
use crate::error::{CatalogError, Result};
use crate::protocol::{write_response, Response};

use super::Connection;

/// How long the accept loop sleeps when no client is waiting
const ACCEPT_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// TCP server for gamecat
pub struct Server {
    config: Config,
    engine: Arc<Engine>,
    listener: Option<TcpListener>,
    shutdown: Arc<AtomicBool>,
    active: Arc<AtomicUsize>,
}

/// Stops a running [`Server`] from another thread
#[derive(Debug, Clone)]
pub struct ShutdownHandle {
    flag: Arc<AtomicBool>,
}

impl ShutdownHandle {
    pub fn shutdown(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }
}

/// Holds one slot of `max_connections` until the handler thread exits
struct ConnectionSlot {
    active: Arc<AtomicUsize>,
}

impl Drop for ConnectionSlot {
    fn drop(&mut self) {
        self.active.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Server {
    /// Create a new server with the given config and engine
    pub fn new(config: Config, engine: Arc<Engine>) -> Self {
        Self {
            config,
            engine,
            listener: None,
            shutdown: Arc::new(AtomicBool::new(false)),
            active: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Bind the listen address and return the bound socket address
    ///
    /// Port 0 picks an ephemeral port.
    pub fn bind(&mut self) -> Result<SocketAddr> {
        let listener = TcpListener::bind(&self.config.listen_addr).map_err(|e| {
            CatalogError::Config(format!(
                "cannot listen on {}: {}",
                self.config.listen_addr, e
            ))
        })?;
        // Non-blocking accept so the loop can observe shutdown
        listener.set_nonblocking(true)?;

        let addr = listener.local_addr()?;
        self.listener = Some(listener);
        Ok(addr)
    }

    /// Bound address, once [`Server::bind`] has succeeded
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.listener.as_ref().and_then(|l| l.local_addr().ok())
    }

    /// Start the server (blocking until shutdown)
    pub fn run(&mut self) -> Result<()> {
        if self.listener.is_none() {
            self.bind()?;
        }
        let listener = match self.listener.take() {
            Some(listener) => listener,
            None => return Err(CatalogError::Config("listener not bound".to_string())),
        };

        tracing::info!("Server started on {}", listener.local_addr()?);

        while !self.shutdown.load(Ordering::SeqCst) {
            match listener.accept() {
                Ok((stream, addr)) => {
                    tracing::info!("Accepted connection from {}", addr);
                    if let Err(e) = self.dispatch(stream, addr) {
                        tracing::warn!("Failed to start handler for {}: {}", addr, e);
                    }
                }
                Err(ref e) if e.kind() == io::ErrorKind::WouldBlock => {
                    thread::sleep(ACCEPT_POLL_INTERVAL);
                }
                Err(e) => {
                    tracing::warn!("Accept failed: {}", e);
                }
            }
        }

        tracing::info!("Server on {} shutting down", listener.local_addr()?);
        Ok(())
    }

    /// Hand an accepted stream to its own handler thread
    fn dispatch(&self, stream: TcpStream, addr: SocketAddr) -> Result<()> {
        // Accepted sockets may inherit the listener's non-blocking mode
        stream.set_nonblocking(false)?;

        if self.active.fetch_add(1, Ordering::SeqCst) >= self.config.max_connections {
            self.active.fetch_sub(1, Ordering::SeqCst);
            tracing::warn!(
                "Rejecting {}: {} connections already open",
                addr,
                self.config.max_connections
            );
            let mut writer = BufWriter::new(stream);
            return write_response(
                &mut writer,
                &Response::error("Server busy. Please try again later"),
            );
        }
        let slot = ConnectionSlot {
            active: Arc::clone(&self.active),
        };

        let mut connection =
            Connection::new(stream, Arc::clone(&self.engine), self.config.greeting.as_str())?;
        connection.set_timeouts(self.config.read_timeout_ms, self.config.write_timeout_ms)?;

        thread::Builder::new()
            .name(format!("conn-{}", addr))
            .spawn(move || {
                let _slot = slot;
                if let Err(e) = connection.handle() {
                    tracing::warn!("Connection {} closed with error: {}", connection.peer_addr(), e);
                }
            })?;

        Ok(())
    }

    /// Signal the server to shutdown gracefully
    ///
    /// Open connections are served until their clients disconnect.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::SeqCst);
    }

    /// Handle for stopping the server while [`Server::run`] blocks
    pub fn shutdown_handle(&self) -> ShutdownHandle {
        ShutdownHandle {
            flag: Arc::clone(&self.shutdown),
        }
    }
}
