//! Protocol Module
//!
//! Defines the line-oriented text protocol between client and server.
//!
//! ## Session
//! ```text
//! server → client   greeting line
//! client → server   command line
//! server → client   zero or more content lines
//! server → client   <endoftransmission>
//! ```
//!
//! ### Commands
//! - `random [n]`             - n random games (default 1), with replacement
//! - `top <n>`                - n best games by metascore, then userscore
//! - `worst <n>`              - n worst games by metascore, then userscore
//! - `platform <name|null>`   - set or clear the platform filter
//! - `platforms`              - list the known platforms
//! - `search <title>`         - games whose title contains the text
//!
//! Every reply, including errors, ends with the sentinel line. There is no
//! length prefix and no status code on the wire. A content line equal to the
//! sentinel goes out with one leading space. Lines are read leniently: bytes
//! that are not UTF-8 become U+FFFD.

mod command;
mod response;
mod codec;

pub use command::{Command, CommandType};
pub use response::{block_lines, escape_line, Reply, Response, Status, SENTINEL};
pub use codec::{
    encode_response, parse_command, read_line, read_response, write_command, write_line,
    write_reply, write_response,
};
