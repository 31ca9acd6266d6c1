//! Platform Filter
//!
//! Process-wide platform selector shared by every connection.
//!
//! ## Concurrency
//! The selector lives behind a `parking_lot::Mutex`. `set` holds the lock
//! across the membership check and the assignment, so a reader never sees a
//! value that failed validation.

use std::collections::BTreeSet;

use parking_lot::Mutex;

use crate::error::{CatalogError, Result};

/// Argument that clears the filter
pub const CLEAR_KEYWORD: &str = "null";

/// The active platform filter (`None` = all platforms)
#[derive(Debug, Default)]
pub struct PlatformFilter {
    current: Mutex<Option<String>>,
}

impl PlatformFilter {
    /// Create a filter with no platform selected
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the selected platform
    pub fn current(&self) -> Option<String> {
        self.current.lock().clone()
    }

    pub fn is_active(&self) -> bool {
        self.current.lock().is_some()
    }

    /// Select a platform, or clear the filter with [`CLEAR_KEYWORD`]
    ///
    /// `value` must be one of `platforms` exactly (case-sensitive); it is
    /// stored as given. On failure the filter is left unchanged.
    /// Returns the new selection.
    pub fn set(&self, value: &str, platforms: &BTreeSet<String>) -> Result<Option<String>> {
        let mut current = self.current.lock();

        if value == CLEAR_KEYWORD {
            *current = None;
        } else if platforms.contains(value) {
            *current = Some(value.to_string());
        } else {
            return Err(CatalogError::UnknownPlatform(value.to_string()));
        }

        Ok(current.clone())
    }

    pub fn clear(&self) {
        *self.current.lock() = None;
    }
}

/// Case-insensitive platform comparison
pub fn platform_matches(filter: &str, platform: &str) -> bool {
    filter
        .chars()
        .flat_map(char::to_lowercase)
        .eq(platform.chars().flat_map(char::to_lowercase))
}
