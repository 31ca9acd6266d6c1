//! gamecat CLI Client
//!
//! Interactive terminal client for a gamecat server.

use std::io::{self, BufRead, Write};

use clap::Parser;
use gamecat::Client;
use tracing_subscriber::{fmt, EnvFilter};

/// gamecat CLI
#[derive(Parser, Debug)]
#[command(name = "gamecat-cli")]
#[command(about = "Interactive client for the gamecat server")]
struct Args {
    /// Server host name or address
    host: String,

    /// Server port
    port: u16,
}

const MENU: &[&str] = &[
    "random - display a random game",
    "random <number> - display <number> random games",
    "top <number> - display the top games from 1 to <number>",
    "worst <number> - display the worst games from 1 to <number>",
    "search <title> - display games whose title contains <title>",
    "platform <platform> - enable filter so results are for specific platform",
    "platform null - reset filter to expand results to all platforms",
    "platforms - view the available platforms you can search for",
    "help - print this menu again",
    "exit - exit the program",
];

fn print_menu() {
    println!("Menu:");
    for entry in MENU {
        println!("{}", entry);
    }
    println!();
}

fn run(args: &Args) -> gamecat::Result<()> {
    let mut client = Client::connect((args.host.as_str(), args.port))?;
    println!("Connected to {} on port {}", args.host, args.port);
    println!("{}", client.greeting());
    print_menu();

    let stdin = io::stdin();
    let mut input = String::new();
    loop {
        print!("Enter your choice: ");
        io::stdout().flush()?;

        input.clear();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        match input.trim() {
            "help" => print_menu(),
            "exit" => break,
            request => {
                for line in client.request(request)? {
                    println!("{}", line);
                }
                println!();
            }
        }
    }

    Ok(())
}

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let args = Args::parse();

    if let Err(e) = run(&args) {
        tracing::error!("Session with {}:{} failed: {}", args.host, args.port, e);
        std::process::exit(1);
    }
}
