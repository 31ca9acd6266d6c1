//! Protocol codec
//!
//! Parsing of request lines and framing of replies.
//!
//! ## Wire Format
//!
//! ### Request
//! ```text
//! <command> [arg ...]\n
//! ```
//! Tokens are separated by runs of whitespace. `search` rejoins all of its
//! arguments with single spaces.
//!
//! ### Response
//! ```text
//! line 1\n
//! ...
//! line n\n
//! <endoftransmission>\n
//! ```

use std::io::{BufRead, Write};

use crate::error::{CatalogError, Result};
use super::response::{block_lines, escape_line};
use super::{Command, CommandType, Reply, Response, SENTINEL};

const LINE_ENDINGS: &[char] = &['\n', '\r'];

// =============================================================================
// Request Parsing
// =============================================================================

/// Parse one request line into a command
///
/// Errors are the replies the client should receive: unknown command,
/// missing argument (usage), or a non-integer count.
pub fn parse_command(line: &str) -> Result<Command> {
    let mut tokens = line.split_whitespace();
    let name = tokens.next().unwrap_or("");

    let command_type = name
        .parse::<CommandType>()
        .map_err(|_| CatalogError::InvalidCommand(name.to_string()))?;

    match command_type {
        CommandType::Random => {
            let count = match tokens.next() {
                Some(token) => parse_count(token)?,
                None => 1,
            };
            Ok(Command::Random { count })
        }
        CommandType::Top => {
            let token = tokens.next().ok_or(CatalogError::Usage("top <number>"))?;
            Ok(Command::Top {
                count: parse_count(token)?,
            })
        }
        CommandType::Worst => {
            let token = tokens.next().ok_or(CatalogError::Usage("worst <number>"))?;
            Ok(Command::Worst {
                count: parse_count(token)?,
            })
        }
        CommandType::Platform => {
            let name = tokens
                .next()
                .ok_or(CatalogError::Usage("platform <platform>"))?;
            Ok(Command::Platform {
                name: name.to_string(),
            })
        }
        CommandType::Platforms => Ok(Command::Platforms),
        CommandType::Search => {
            let words: Vec<&str> = tokens.collect();
            if words.is_empty() {
                return Err(CatalogError::Usage("search <game_title>"));
            }
            Ok(Command::Search {
                title: words.join(" "),
            })
        }
    }
}

fn parse_count(token: &str) -> Result<i32> {
    token
        .parse::<i32>()
        .map_err(|_| CatalogError::InvalidNumber(token.to_string()))
}

// =============================================================================
// Response Framing
// =============================================================================

/// Encode a response as wire text, sentinel included
pub fn encode_response(response: &Response) -> String {
    let mut text = String::new();
    for line in &response.lines {
        text.push_str(&escape_line(line));
        text.push('\n');
    }
    text.push_str(SENTINEL);
    text.push('\n');
    text
}

// =============================================================================
// Stream-based I/O helpers
// =============================================================================

/// Read one line without its terminator
///
/// Bytes that are not valid UTF-8 are replaced with U+FFFD rather than
/// failing the read. Returns `None` at end of stream.
pub fn read_line<R: BufRead>(reader: &mut R) -> Result<Option<String>> {
    let mut bytes = Vec::new();
    if reader.read_until(b'\n', &mut bytes)? == 0 {
        return Ok(None);
    }
    let mut line = String::from_utf8_lossy(&bytes).into_owned();
    let trimmed_len = line.trim_end_matches(LINE_ENDINGS).len();
    line.truncate(trimmed_len);
    Ok(Some(line))
}

/// Write a single line and flush
pub fn write_line<W: Write>(writer: &mut W, line: &str) -> Result<()> {
    writer.write_all(line.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

/// Write a command as a request line
pub fn write_command<W: Write>(writer: &mut W, command: &Command) -> Result<()> {
    write_line(writer, &command.to_string())
}

/// Read the content lines of one reply, consuming the sentinel
///
/// End of stream before the sentinel is a transport error.
pub fn read_response<R: BufRead>(reader: &mut R) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    loop {
        match read_line(reader)? {
            Some(line) if line == SENTINEL => return Ok(lines),
            Some(line) => lines.push(line),
            None => {
                return Err(CatalogError::Transport(
                    "connection closed before end of transmission".to_string(),
                ))
            }
        }
    }
}

/// Write a response to a stream
pub fn write_response<W: Write>(writer: &mut W, response: &Response) -> Result<()> {
    writer.write_all(encode_response(response).as_bytes())?;
    writer.flush()?;
    Ok(())
}

/// Write a reply, encoding lazy record streams one block at a time
pub fn write_reply<W: Write>(writer: &mut W, reply: Reply<'_>) -> Result<()> {
    match reply {
        Reply::Full(response) => write_response(writer, &response),
        Reply::Games(games) => {
            for (i, game) in games.enumerate() {
                if i > 0 {
                    writer.write_all(b"\n")?;
                }
                for line in block_lines(game) {
                    writer.write_all(escape_line(&line).as_bytes())?;
                    writer.write_all(b"\n")?;
                }
            }
            writer.write_all(SENTINEL.as_bytes())?;
            writer.write_all(b"\n")?;
            writer.flush()?;
            Ok(())
        }
    }
}
