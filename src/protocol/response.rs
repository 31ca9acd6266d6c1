//! Response definitions
//!
//! Represents replies to clients.
//!
//! Record blocks are split on `\n` only, so a `\r` inside a summary stays in
//! [`Response::lines`].
//! A content line that is exactly the sentinel is sent with one leading space
//! (see [`escape_line`]) so it cannot end the reply early.

use std::borrow::Cow;

use crate::catalog::Game;
use crate::error::CatalogError;

/// Line terminating every reply
pub const SENTINEL: &str = "<endoftransmission>";

/// Header line of the `platforms` reply
const PLATFORMS_HEADER: &str = "Here is a list of platforms for which you can enable a filter for:";

/// A reply whose body may be produced lazily while it is written
///
/// `Games` is consumed one record at a time by
/// [`write_reply`](super::write_reply), so memory stays flat however many
/// records the iterator yields.
pub enum Reply<'a> {
    /// Fully built response
    Full(Response),

    /// Record blocks separated by one blank line
    Games(Box<dyn Iterator<Item = &'a Game> + 'a>),
}

impl Reply<'_> {
    /// Build the whole response in memory
    pub fn into_response(self) -> Response {
        match self {
            Reply::Full(response) => response,
            Reply::Games(games) => Response::games(games),
        }
    }
}

/// Lines of a record block (more than six when the summary spans lines)
pub fn block_lines(game: &Game) -> Vec<String> {
    game.to_string().split('\n').map(str::to_owned).collect()
}

/// Wire form of a content line
pub fn escape_line(line: &str) -> Cow<'_, str> {
    if line == SENTINEL {
        Cow::Owned(format!(" {}", line))
    } else {
        Cow::Borrowed(line)
    }
}

/// Outcome of a request (server-side only, never sent on the wire)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Error,
}

/// A reply to send to a client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    /// Status code
    pub status: Status,

    /// Content lines, without the sentinel
    pub lines: Vec<String>,
}

impl Response {
    /// Create an OK response
    pub fn ok(lines: Vec<String>) -> Self {
        Self {
            status: Status::Ok,
            lines,
        }
    }

    /// OK response with no content lines
    pub fn empty() -> Self {
        Self::ok(Vec::new())
    }

    /// Create an ERROR response carrying one message line
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: Status::Error,
            lines: vec![message.into()],
        }
    }

    /// Error response whose text is the error's display form
    pub fn from_error(err: &CatalogError) -> Self {
        Self::error(err.to_string())
    }

    /// Full record blocks separated by one blank line
    pub fn games<'a>(games: impl IntoIterator<Item = &'a Game>) -> Self {
        let mut lines = Vec::new();
        for (i, game) in games.into_iter().enumerate() {
            if i > 0 {
                lines.push(String::new());
            }
            lines.extend(block_lines(game));
        }
        Self::ok(lines)
    }

    /// One ranking line per game
    pub fn rankings<'a>(games: impl IntoIterator<Item = &'a Game>) -> Self {
        Self::ok(games.into_iter().map(Game::ranking_line).collect())
    }

    /// Header followed by one platform per line
    pub fn platforms<'a>(platforms: impl IntoIterator<Item = &'a String>) -> Self {
        let mut lines = vec![PLATFORMS_HEADER.to_string()];
        lines.extend(platforms.into_iter().cloned());
        Self::ok(lines)
    }

    /// Confirmation of a filter change (`null` when cleared)
    pub fn filter_set(platform: Option<&str>) -> Self {
        Self::ok(vec![format!(
            "Platform filter set to: {}",
            platform.unwrap_or(crate::filter::CLEAR_KEYWORD)
        )])
    }

    pub fn is_ok(&self) -> bool {
        self.status == Status::Ok
    }
}
