//! # gamecat
//!
//! An in-memory video game catalog served over TCP:
//! - CSV catalog loaded once at startup
//! - Ranking, random sampling and title search
//! - Process-wide platform filter shared by all clients
//! - Line-oriented text protocol with sentinel-terminated replies
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      TCP Server                              │
//! │             (one thread per connection)                      │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │ request line
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                   Protocol Codec                             │
//! │        (parse command / frame reply + sentinel)              │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                    Query Engine                              │
//! └──────────┬─────────────────────────────────┬────────────────┘
//!            │                                 │
//!            ▼                                 ▼
//!   ┌─────────────────┐              ┌─────────────────┐
//!   │  CatalogStore   │              │ PlatformFilter  │
//!   │  (read-only)    │              │    (Mutex)      │
//!   └─────────────────┘              └─────────────────┘
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod catalog;
pub mod filter;
pub mod engine;
pub mod protocol;
pub mod network;
pub mod client;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{CatalogError, Result};
pub use config::Config;
pub use engine::Engine;
pub use client::Client;

// =============================================================================
// Version Info
// =============================================================================

/// Current version of gamecat
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
