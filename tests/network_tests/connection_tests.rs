//! Connection Handler Tests
//!
//! Drives a connection over in-memory buffers instead of a socket.

use std::io::{self, Cursor, Write};
use std::sync::Arc;

use gamecat::catalog::{CatalogStore, Game};
use gamecat::network::Connection;
use gamecat::protocol::SENTINEL;
use gamecat::Engine;

// =============================================================================
// Helper Functions
// =============================================================================

fn engine() -> Arc<Engine> {
    Arc::new(Engine::new(CatalogStore::from_games(vec![
        Game::new("A", "X", "2001", "first", "90", "8.0"),
        Game::new("B", "X", "2002", "second", "90", "9.0"),
        Game::new("C", "Y", "2003", "third", "70", "5.0"),
    ])))
}

/// Run a session with the given client input and return everything written back
fn session(engine: Arc<Engine>, input: &str) -> String {
    let mut output = Vec::new();
    let mut connection = Connection::from_parts(
        Cursor::new(input.to_string()),
        &mut output,
        engine,
        "Hello from server!",
        "test-peer",
    );
    connection.handle().unwrap();
    String::from_utf8(output).unwrap()
}

/// Run a session over raw request bytes
fn session_bytes(engine: Arc<Engine>, input: &[u8]) -> String {
    let mut output = Vec::new();
    let mut connection = Connection::from_parts(
        Cursor::new(input.to_vec()),
        &mut output,
        engine,
        "Hello from server!",
        "test-peer",
    );
    connection.handle().unwrap();
    String::from_utf8(output).unwrap()
}

/// Writer that only counts what passes through it
#[derive(Default)]
struct LineCounter {
    lines: usize,
    sentinels: usize,
    pending: Vec<u8>,
}

impl Write for LineCounter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for &byte in buf {
            if byte == b'\n' {
                self.lines += 1;
                if self.pending == SENTINEL.as_bytes() {
                    self.sentinels += 1;
                }
                self.pending.clear();
            } else if self.pending.len() <= SENTINEL.len() {
                self.pending.push(byte);
            }
        }
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// =============================================================================
// Session Tests
// =============================================================================

#[test]
fn test_greeting_only_when_client_sends_nothing() {
    assert_eq!(session(engine(), ""), "Hello from server!\n");
}

#[test]
fn test_replies_in_order() {
    let output = session(engine(), "top 2\nworst 1\n");

    assert_eq!(
        output,
        "Hello from server!\n\
         B (Metascore: 90, Userscore: 9.0)\n\
         A (Metascore: 90, Userscore: 8.0)\n\
         <endoftransmission>\n\
         C (Metascore: 70, Userscore: 5.0)\n\
         <endoftransmission>\n"
    );
}

#[test]
fn test_errors_do_not_end_session() {
    let output = session(engine(), "bogus\ntop nope\nplatform Z\ntop 1\n");

    let replies: Vec<&str> = output.split(&format!("{}\n", SENTINEL)).collect();
    // Greeting glued to the first reply, then three more replies and a trailing empty piece
    assert_eq!(replies.len(), 5);
    assert!(replies[0].ends_with("Invalid command: bogus\n"));
    assert_eq!(replies[1], "Invalid number: nope\n");
    assert!(replies[2].starts_with("Invalid platform."));
    assert_eq!(replies[3], "B (Metascore: 90, Userscore: 9.0)\n");
    assert_eq!(replies[4], "");
}

#[test]
fn test_filter_outlives_session() {
    let shared = engine();

    session(Arc::clone(&shared), "platform Y\n");
    assert_eq!(shared.current_platform().as_deref(), Some("Y"));

    let output = session(Arc::clone(&shared), "top 5\n");
    assert!(output.ends_with("C (Metascore: 70, Userscore: 5.0)\n<endoftransmission>\n"));
    assert!(!output.contains("B (Metascore"));
}

#[test]
fn test_search_without_matches_is_just_sentinel() {
    let output = session(engine(), "search zzz\n");
    assert_eq!(output, "Hello from server!\n<endoftransmission>\n");
}

#[test]
fn test_final_line_without_newline_is_served() {
    let output = session(engine(), "worst 1");
    assert!(output.ends_with("C (Metascore: 70, Userscore: 5.0)\n<endoftransmission>\n"));
}

#[test]
fn test_peer_addr() {
    let mut output = Vec::new();
    let connection = Connection::from_parts(
        Cursor::new(String::new()),
        &mut output,
        engine(),
        "hi",
        "10.0.0.1:4000",
    );
    assert_eq!(connection.peer_addr(), "10.0.0.1:4000");
}

// =============================================================================
// Malformed Input Tests
// =============================================================================

#[test]
fn test_invalid_utf8_request_still_gets_a_reply() {
    let output = session_bytes(engine(), b"search Pok\xe9mon\nplatforms\n");

    assert_eq!(output.matches(SENTINEL).count(), 2);
    assert!(output.ends_with("X\nY\n<endoftransmission>\n"));
}

#[test]
fn test_large_random_reply_is_streamed() {
    let shared = engine();
    shared.set_platform("Y").unwrap();

    let count = 300_000;
    let mut sink = LineCounter::default();
    let mut connection = Connection::from_parts(
        Cursor::new(format!("random {}\ntop 1\n", count)),
        &mut sink,
        shared,
        "Hello from server!",
        "test-peer",
    );
    connection.handle().unwrap();

    // Greeting, six lines per block, a blank line between blocks, two sentinels
    // and the single top entry
    assert_eq!(sink.sentinels, 2);
    assert_eq!(sink.lines, 1 + count * 6 + (count - 1) + 1 + 1 + 1);
}

#[test]
fn test_summary_line_equal_to_sentinel_is_escaped() {
    let shared = Arc::new(Engine::new(CatalogStore::from_games(vec![Game::new(
        "Trick",
        "X",
        "2001",
        "before\n<endoftransmission>\nafter",
        "80",
        "7.0",
    )])));

    let output = session(shared, "search trick\nrandom 1\n");

    assert_eq!(output.matches(&format!("\n{}\n", SENTINEL)).count(), 2);
    assert_eq!(output.matches(&format!("\n {}\n", SENTINEL)).count(), 2);
    assert!(output.ends_with("Userscore: 7.0\n<endoftransmission>\n"));
}
