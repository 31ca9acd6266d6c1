//! Catalog store
//!
//! Title-keyed map of every game plus the derived platform set.

use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::error::{CatalogError, Result};

use super::{read_rows, Game};

/// Read-only catalog, built once at startup
///
/// ## Invariants
/// - Titles are unique; a later record with the same title replaces the earlier one
/// - `platforms` holds every distinct (case-sensitive) platform in `games`
#[derive(Debug, Default)]
pub struct CatalogStore {
    games: HashMap<String, Game>,
    platforms: BTreeSet<String>,
}

impl CatalogStore {
    /// Load the catalog from a CSV file
    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| {
            CatalogError::Load(format!("cannot open {}: {}", path.display(), e))
        })?;

        tracing::info!("Loading game database from {}", path.display());
        let started = Instant::now();
        let store = Self::from_reader(BufReader::new(file))?;

        tracing::info!(
            "Finished reading in: {} games in {} ms",
            store.len(),
            started.elapsed().as_millis()
        );
        Ok(store)
    }

    /// Parse a catalog from any buffered CSV source
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let games = read_rows(reader)?
            .into_iter()
            .map(Game::from_row)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_games(games))
    }

    /// Build a store from records, in order
    pub fn from_games(games: impl IntoIterator<Item = Game>) -> Self {
        let mut map = HashMap::new();
        for game in games {
            map.insert(game.title.clone(), game);
        }

        let platforms = map.values().map(|g| g.platform.clone()).collect();

        Self {
            games: map,
            platforms,
        }
    }

    pub fn get(&self, title: &str) -> Option<&Game> {
        self.games.get(title)
    }

    /// Iterate over all games in unspecified order
    pub fn iter(&self) -> impl Iterator<Item = &Game> {
        self.games.values()
    }

    /// Distinct platform names, sorted
    pub fn platforms(&self) -> &BTreeSet<String> {
        &self.platforms
    }

    /// Exact, case-sensitive platform membership
    pub fn has_platform(&self, platform: &str) -> bool {
        self.platforms.contains(platform)
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }
}
