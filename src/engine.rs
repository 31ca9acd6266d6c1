//! Engine Module
//!
//! The query engine that answers client commands against the catalog.
//!
//! ## Responsibilities
//! - Load the catalog at startup
//! - Compute the filtered view for every query (never cached)
//! - Rank, sample and search games
//! - Own the shared platform filter

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::io::Write;

use rand::Rng;

use crate::catalog::{CatalogStore, Game};
use crate::config::Config;
use crate::error::{CatalogError, Result};
use crate::filter::{platform_matches, PlatformFilter};
use crate::protocol::{
    parse_command, write_reply, write_response, Command, Reply, Response, Status,
};

/// Sort direction for the ranking commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ranking {
    /// Metascore descending, then userscore descending
    Top,
    /// Metascore ascending, then userscore ascending
    Worst,
}

impl Ranking {
    /// Compare two ranked games
    ///
    /// Games without both scores compare equal; callers exclude them first.
    fn compare(self, a: &Game, b: &Game) -> Ordering {
        let key = |g: &Game| {
            (
                g.metascore.value().unwrap_or_default(),
                g.userscore.value().unwrap_or_default(),
            )
        };
        let (a_meta, a_user) = key(a);
        let (b_meta, b_user) = key(b);

        match self {
            Ranking::Top => b_meta.total_cmp(&a_meta).then(b_user.total_cmp(&a_user)),
            Ranking::Worst => a_meta.total_cmp(&b_meta).then(a_user.total_cmp(&b_user)),
        }
    }
}

/// Random draws with replacement, produced one at a time
pub struct Draws<'a, R> {
    view: Vec<&'a Game>,
    rng: R,
    remaining: usize,
}

impl<'a, R: Rng> Iterator for Draws<'a, R> {
    type Item = &'a Game;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 || self.view.is_empty() {
            return None;
        }
        self.remaining -= 1;
        Some(self.view[self.rng.gen_range(0..self.view.len())])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = if self.view.is_empty() { 0 } else { self.remaining };
        (n, Some(n))
    }
}

/// The query engine
///
/// ## Concurrency Model
/// - `store`: immutable after load, read without locking
/// - `filter`: the only mutable state, guarded inside [`PlatformFilter`]
///
/// One `Engine` is shared by all connections through an `Arc`.
pub struct Engine {
    /// Catalog loaded at startup
    store: CatalogStore,

    /// Process-wide platform filter
    filter: PlatformFilter,
}

impl Engine {
    /// Load the catalog named in the config and build an engine over it
    pub fn open(config: &Config) -> Result<Self> {
        let store = CatalogStore::load(&config.data_path)?;
        Ok(Self::new(store))
    }

    /// Build an engine over an already loaded store, with no filter set
    pub fn new(store: CatalogStore) -> Self {
        Self {
            store,
            filter: PlatformFilter::new(),
        }
    }

    /// Parse and execute one request line
    ///
    /// Recoverable errors become error replies; this never fails. The whole
    /// reply is built in memory; connections use [`Engine::respond_to`].
    pub fn respond(&self, line: &str) -> Response {
        match parse_command(line).and_then(|command| self.execute(command)) {
            Ok(response) => response,
            Err(e) => {
                tracing::debug!("Request {:?} rejected: {}", line, e);
                Response::from_error(&e)
            }
        }
    }

    /// Parse and execute one request line, writing the reply to `writer`
    ///
    /// Record streams are written as they are drawn. Recoverable errors are
    /// written as error replies; anything else (including write failures) is
    /// returned to the caller.
    pub fn respond_to<W: Write>(&self, line: &str, writer: &mut W) -> Result<Status> {
        match parse_command(line).and_then(|command| self.reply(command)) {
            Ok(reply) => {
                write_reply(writer, reply)?;
                Ok(Status::Ok)
            }
            Err(e) if e.is_recoverable() => {
                tracing::debug!("Request {:?} rejected: {}", line, e);
                write_response(writer, &Response::from_error(&e))?;
                Ok(Status::Error)
            }
            Err(e) => Err(e),
        }
    }

    /// Execute a command
    ///
    /// Routes commands to appropriate handlers
    pub fn execute(&self, command: Command) -> Result<Response> {
        Ok(self.reply(command)?.into_response())
    }

    /// Execute a command, leaving random samples to be drawn lazily
    pub fn reply(&self, command: Command) -> Result<Reply<'_>> {
        tracing::debug!("Executing {}", command.command_type().as_str());

        let response = match command {
            Command::Random { count } => {
                let draws = self.draws(rand::thread_rng(), count)?;
                return Ok(Reply::Games(Box::new(draws)));
            }
            Command::Top { count } => Response::rankings(self.top(count)),
            Command::Worst { count } => Response::rankings(self.worst(count)),
            Command::Platform { name } => {
                let selected = self.set_platform(&name)?;
                Response::filter_set(selected.as_deref())
            }
            Command::Platforms => Response::platforms(self.platforms()),
            Command::Search { title } => Response::games(self.search(&title)),
        };
        Ok(Reply::Full(response))
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Games matching the current filter, in unspecified order
    pub fn filtered_view(&self) -> Vec<&Game> {
        match self.filter.current() {
            None => self.store.iter().collect(),
            Some(platform) => self
                .store
                .iter()
                .filter(|g| platform_matches(&platform, &g.platform))
                .collect(),
        }
    }

    /// Draw `count` games uniformly, with replacement
    pub fn random(&self, count: i32) -> Result<Vec<&Game>> {
        self.random_with(&mut rand::thread_rng(), count)
    }

    /// [`Engine::random`] with a caller-supplied generator
    ///
    /// A non-positive count yields nothing, even from an empty view.
    pub fn random_with<R: Rng + ?Sized>(&self, rng: &mut R, count: i32) -> Result<Vec<&Game>> {
        Ok(self.draws(rng, count)?.collect())
    }

    /// Lazy sampler over the current filtered view
    ///
    /// Only the view is materialized; each draw happens on `next`.
    /// Fails with `EmptyCatalog` when `count > 0` and the view is empty.
    pub fn draws<R: Rng>(&self, rng: R, count: i32) -> Result<Draws<'_, R>> {
        let remaining = usize::try_from(count).unwrap_or(0);
        if remaining == 0 {
            return Ok(Draws {
                view: Vec::new(),
                rng,
                remaining,
            });
        }

        let view = self.filtered_view();
        if view.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }

        Ok(Draws {
            view,
            rng,
            remaining,
        })
    }

    /// Best `count` games by metascore, ties by higher userscore
    pub fn top(&self, count: i32) -> Vec<&Game> {
        self.rank(Ranking::Top, count)
    }

    /// Worst `count` games by metascore, ties by lower userscore
    pub fn worst(&self, count: i32) -> Vec<&Game> {
        self.rank(Ranking::Worst, count)
    }

    /// Rank the filtered view, skipping games without both scores
    pub fn rank(&self, ranking: Ranking, count: i32) -> Vec<&Game> {
        let limit = usize::try_from(count).unwrap_or(0);
        if limit == 0 {
            return Vec::new();
        }

        let mut ranked: Vec<&Game> = self
            .filtered_view()
            .into_iter()
            .filter(|g| g.is_ranked())
            .collect();
        ranked.sort_by(|a, b| ranking.compare(a, b));
        ranked.truncate(limit);
        ranked
    }

    /// Games whose title contains `title`, ignoring case
    pub fn search(&self, title: &str) -> Vec<&Game> {
        let needle = title.to_lowercase();
        self.filtered_view()
            .into_iter()
            .filter(|g| g.title.to_lowercase().contains(&needle))
            .collect()
    }

    // =========================================================================
    // Filter
    // =========================================================================

    /// Distinct platforms in the catalog
    pub fn platforms(&self) -> &BTreeSet<String> {
        self.store.platforms()
    }

    /// Select a platform (`null` clears); see [`PlatformFilter::set`]
    pub fn set_platform(&self, value: &str) -> Result<Option<String>> {
        let selected = self.filter.set(value, self.store.platforms())?;
        match &selected {
            Some(platform) => tracing::info!("Platform filter set to {}", platform),
            None => tracing::info!("Platform filter cleared"),
        }
        Ok(selected)
    }

    pub fn current_platform(&self) -> Option<String> {
        self.filter.current()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn store(&self) -> &CatalogStore {
        &self.store
    }
}
