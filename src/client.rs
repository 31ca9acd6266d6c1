//! Client
//!
//! Blocking client for the catalog protocol, used by `gamecat-cli` and tests.

use std::io::{BufReader, BufWriter};
use std::net::{TcpStream, ToSocketAddrs};

use crate::error::{CatalogError, Result};
use crate::protocol::{read_line, read_response, write_command, write_line, Command};

/// A connected client session
pub struct Client {
    reader: BufReader<TcpStream>,
    writer: BufWriter<TcpStream>,
    greeting: String,
}

impl Client {
    /// Connect and read the server greeting
    pub fn connect(addr: impl ToSocketAddrs) -> Result<Self> {
        let stream = TcpStream::connect(addr)?;
        stream.set_nodelay(true)?;

        let mut reader = BufReader::new(stream.try_clone()?);
        let writer = BufWriter::new(stream);

        let greeting = read_line(&mut reader)?.ok_or_else(|| {
            CatalogError::Transport("connection closed before greeting".to_string())
        })?;

        Ok(Self {
            reader,
            writer,
            greeting,
        })
    }

    /// Greeting line sent by the server on connect
    pub fn greeting(&self) -> &str {
        &self.greeting
    }

    /// Send a raw request line and return the reply's content lines
    pub fn request(&mut self, line: &str) -> Result<Vec<String>> {
        write_line(&mut self.writer, line)?;
        read_response(&mut self.reader)
    }

    /// Send a typed command and return the reply's content lines
    pub fn send(&mut self, command: &Command) -> Result<Vec<String>> {
        write_command(&mut self.writer, command)?;
        read_response(&mut self.reader)
    }
}
