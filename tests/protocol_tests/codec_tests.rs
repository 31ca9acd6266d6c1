//! Codec Tests
//!
//! Tests for request parsing and reply framing.

use std::io::Cursor;
use gamecat::catalog::Game;
use gamecat::protocol::{
    Command, CommandType, Reply, Response, SENTINEL,
    parse_command, encode_response,
    read_line, read_response,
    write_command, write_reply, write_response,
};
use gamecat::CatalogError;

// =============================================================================
// Command Parsing Tests
// =============================================================================

#[test]
fn test_parse_random_default_count() {
    assert_eq!(parse_command("random").unwrap(), Command::Random { count: 1 });
}

#[test]
fn test_parse_random_with_count() {
    assert_eq!(parse_command("random 5").unwrap(), Command::Random { count: 5 });
}

#[test]
fn test_parse_top_and_worst() {
    assert_eq!(parse_command("top 10").unwrap(), Command::Top { count: 10 });
    assert_eq!(parse_command("worst 3").unwrap(), Command::Worst { count: 3 });
}

#[test]
fn test_parse_negative_count() {
    assert_eq!(parse_command("top -2").unwrap(), Command::Top { count: -2 });
}

#[test]
fn test_parse_platform() {
    assert_eq!(
        parse_command("platform Switch").unwrap(),
        Command::Platform { name: "Switch".to_string() }
    );
    assert_eq!(
        parse_command("platform null").unwrap(),
        Command::Platform { name: "null".to_string() }
    );
}

#[test]
fn test_parse_platforms() {
    assert_eq!(parse_command("platforms").unwrap(), Command::Platforms);
}

#[test]
fn test_parse_search_rejoins_words() {
    assert_eq!(
        parse_command("search   the   legend of  zelda").unwrap(),
        Command::Search { title: "the legend of zelda".to_string() }
    );
}

#[test]
fn test_parse_ignores_surrounding_whitespace() {
    assert_eq!(parse_command("  top\t4  ").unwrap(), Command::Top { count: 4 });
}

#[test]
fn test_parse_extra_arguments_ignored() {
    assert_eq!(parse_command("top 2 please").unwrap(), Command::Top { count: 2 });
}

// =============================================================================
// Parse Error Tests
// =============================================================================

#[test]
fn test_unknown_command() {
    let err = parse_command("jump 3").unwrap_err();
    assert!(matches!(err, CatalogError::InvalidCommand(ref c) if c == "jump"));
    assert_eq!(err.to_string(), "Invalid command: jump");
}

#[test]
fn test_command_names_are_case_sensitive() {
    assert!(matches!(parse_command("TOP 3"), Err(CatalogError::InvalidCommand(_))));
}

#[test]
fn test_empty_line_is_invalid_command() {
    let err = parse_command("").unwrap_err();
    assert_eq!(err.to_string(), "Invalid command: ");
}

#[test]
fn test_invalid_numbers() {
    for line in ["random many", "top 1.5", "worst x", "top 99999999999"] {
        let err = parse_command(line).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidNumber(_)), "{}", line);
    }
    assert_eq!(parse_command("top abc").unwrap_err().to_string(), "Invalid number: abc");
}

#[test]
fn test_missing_arguments_usage() {
    let cases = [
        ("top", "Invalid command. Usage: top <number>"),
        ("worst", "Invalid command. Usage: worst <number>"),
        ("platform", "Invalid command. Usage: platform <platform>"),
        ("search", "Invalid command. Usage: search <game_title>"),
    ];
    for (line, expected) in cases {
        let err = parse_command(line).unwrap_err();
        assert!(matches!(err, CatalogError::Usage(_)));
        assert_eq!(err.to_string(), expected);
    }
}

#[test]
fn test_command_display_round_trips() {
    let commands = [
        Command::Random { count: 2 },
        Command::Top { count: 7 },
        Command::Worst { count: 1 },
        Command::Platform { name: "PC".to_string() },
        Command::Platforms,
        Command::Search { title: "half life".to_string() },
    ];
    for command in commands {
        assert_eq!(parse_command(&command.to_string()).unwrap(), command);
    }
}

#[test]
fn test_command_type_names() {
    assert_eq!(CommandType::Search.as_str(), "search");
    assert_eq!("platforms".parse::<CommandType>(), Ok(CommandType::Platforms));
    assert!("Platforms".parse::<CommandType>().is_err());
}

// =============================================================================
// Response Framing Tests
// =============================================================================

#[test]
fn test_encode_response_appends_sentinel() {
    let response = Response::ok(vec!["one".to_string(), "two".to_string()]);
    assert_eq!(encode_response(&response), "one\ntwo\n<endoftransmission>\n");
}

#[test]
fn test_encode_empty_response() {
    assert_eq!(encode_response(&Response::empty()), "<endoftransmission>\n");
}

#[test]
fn test_encode_error_response() {
    let response = Response::from_error(&CatalogError::InvalidNumber("x".to_string()));
    assert!(!response.is_ok());
    assert_eq!(encode_response(&response), "Invalid number: x\n<endoftransmission>\n");
}

#[test]
fn test_every_reply_ends_with_single_sentinel() {
    let responses = [
        Response::empty(),
        Response::error("bad"),
        Response::filter_set(None),
        Response::platforms(&["PC".to_string()]),
        Response::ok(vec![String::new(), String::new()]),
    ];
    for response in responses {
        let text = encode_response(&response);
        assert!(text.ends_with(&format!("{}\n", SENTINEL)));
        assert_eq!(text.matches(SENTINEL).count(), 1);
    }
}

// =============================================================================
// Stream-based I/O Tests
// =============================================================================

#[test]
fn test_write_then_read_response() {
    let mut buffer = Vec::new();
    write_response(&mut buffer, &Response::ok(vec!["a".into(), "".into(), "b".into()])).unwrap();
    write_response(&mut buffer, &Response::error("second")).unwrap();

    let mut reader = Cursor::new(buffer);
    assert_eq!(read_response(&mut reader).unwrap(), vec!["a", "", "b"]);
    assert_eq!(read_response(&mut reader).unwrap(), vec!["second"]);
}

#[test]
fn test_read_response_without_sentinel_fails() {
    let mut reader = Cursor::new("partial\n");
    let result = read_response(&mut reader);
    assert!(matches!(result, Err(CatalogError::Transport(_))));
}

#[test]
fn test_read_line_strips_terminators() {
    let mut reader = Cursor::new("top 5\r\nplatforms\nlast");
    assert_eq!(read_line(&mut reader).unwrap().as_deref(), Some("top 5"));
    assert_eq!(read_line(&mut reader).unwrap().as_deref(), Some("platforms"));
    assert_eq!(read_line(&mut reader).unwrap().as_deref(), Some("last"));
    assert_eq!(read_line(&mut reader).unwrap(), None);
}

#[test]
fn test_write_command() {
    let mut buffer = Vec::new();
    write_command(&mut buffer, &Command::Search { title: "portal 2".to_string() }).unwrap();
    assert_eq!(buffer, b"search portal 2\n");
}

#[test]
fn test_read_line_replaces_invalid_utf8() {
    let mut reader = Cursor::new(b"search Pok\xe9mon\r\ntop 1\n".to_vec());
    assert_eq!(
        read_line(&mut reader).unwrap().as_deref(),
        Some("search Pok\u{FFFD}mon")
    );
    assert_eq!(read_line(&mut reader).unwrap().as_deref(), Some("top 1"));
}

#[test]
fn test_sentinel_content_line_is_escaped() {
    let response = Response::ok(vec!["a".to_string(), SENTINEL.to_string(), "b".to_string()]);
    let text = encode_response(&response);

    assert_eq!(text, "a\n <endoftransmission>\nb\n<endoftransmission>\n");

    let mut reader = Cursor::new(text);
    assert_eq!(
        read_response(&mut reader).unwrap(),
        vec!["a", " <endoftransmission>", "b"]
    );
}

#[test]
fn test_write_reply_streams_game_blocks() {
    let games = vec![
        Game::new("A", "X", "2001", "first", "90", "8.0"),
        Game::new("B", "Y", "2002", "second", "70", "tbd"),
    ];

    let mut streamed = Vec::new();
    write_reply(&mut streamed, Reply::Games(Box::new(games.iter()))).unwrap();

    let mut built = Vec::new();
    write_response(&mut built, &Response::games(&games)).unwrap();

    assert_eq!(streamed, built);
    let text = String::from_utf8(streamed).unwrap();
    assert!(text.contains("Userscore: 8.0\n\nTitle: B\n"));
    assert!(text.ends_with("Userscore: tbd\n<endoftransmission>\n"));
}

#[test]
fn test_write_reply_with_no_games_is_just_sentinel() {
    let mut buffer = Vec::new();
    write_reply(&mut buffer, Reply::Games(Box::new(std::iter::empty::<&Game>()))).unwrap();
    assert_eq!(buffer, b"<endoftransmission>\n");
}
