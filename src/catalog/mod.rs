//! Catalog Module
//!
//! The in-memory game catalog, loaded once at startup.
//!
//! ## Responsibilities
//! - Parse the CSV data source into [`Game`] records
//! - Key records by title (last row wins on duplicates)
//! - Derive the set of distinct platforms
//!
//! ## Immutability
//! The store is never mutated after load, so it is shared between
//! connections through an `Arc` with no locking.

mod loader;
mod store;

pub use loader::{read_rows, CsvRow, FIELD_COUNT};
pub use store::CatalogStore;

use std::fmt;

use crate::error::{CatalogError, Result};

/// Marker used by the data source for a score that is not available yet
pub const TBD: &str = "tbd";

/// A review score as it appears in the data source
///
/// Keeps the raw text for display and the parsed value for ranking.
/// `tbd` and anything that is not a finite number have no value.
#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    raw: String,
    value: Option<f64>,
}

impl Score {
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let value = if raw.eq_ignore_ascii_case(TBD) {
            None
        } else {
            raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
        };
        Self { raw, value }
    }

    /// Numeric value, `None` when the score is unavailable
    pub fn value(&self) -> Option<f64> {
        self.value
    }

    /// Text exactly as loaded
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn is_tbd(&self) -> bool {
        self.raw.eq_ignore_ascii_case(TBD)
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// One catalog record
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    /// Title, unique within the store
    pub title: String,
    pub platform: String,
    /// Release date, kept as opaque text
    pub release_date: String,
    pub summary: String,
    pub metascore: Score,
    pub userscore: Score,
}

impl Game {
    pub fn new(
        title: impl Into<String>,
        platform: impl Into<String>,
        release_date: impl Into<String>,
        summary: impl Into<String>,
        metascore: impl Into<String>,
        userscore: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            platform: platform.into(),
            release_date: release_date.into(),
            summary: summary.into(),
            metascore: Score::parse(metascore),
            userscore: Score::parse(userscore),
        }
    }

    /// Build a game from a parsed CSV row
    ///
    /// Fields past the sixth are ignored.
    pub fn from_row(row: CsvRow) -> Result<Self> {
        if row.fields.len() < FIELD_COUNT {
            return Err(CatalogError::Load(format!(
                "line {}: expected {} fields, found {}",
                row.line,
                FIELD_COUNT,
                row.fields.len()
            )));
        }

        let mut fields = row.fields.into_iter();
        let mut next = || fields.next().unwrap_or_default();
        Ok(Self::new(next(), next(), next(), next(), next(), next()))
    }

    /// Both scores are present and numeric
    pub fn is_ranked(&self) -> bool {
        self.metascore.value().is_some() && self.userscore.value().is_some()
    }

    /// One-line summary used by the ranking commands
    pub fn ranking_line(&self) -> String {
        format!(
            "{} (Metascore: {}, Userscore: {})",
            self.title, self.metascore, self.userscore
        )
    }
}

/// Six-line record block
impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Title: {}", self.title)?;
        writeln!(f, "Platform: {}", self.platform)?;
        writeln!(f, "Release Date: {}", self.release_date)?;
        writeln!(f, "Summary: {}", self.summary)?;
        writeln!(f, "Metascore: {}", self.metascore)?;
        write!(f, "Userscore: {}", self.userscore)
    }
}
