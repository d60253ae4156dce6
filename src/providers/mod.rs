/*!
 * Data source implementations for game documents.
 *
 * This module contains the client for the public MLB Stats API. The
 * `StatsSource` trait lets the controller run against any source that can
 * resolve a season to a game and a game to its live-feed document.
 */

use async_trait::async_trait;
use serde_json::Value;
use std::fmt::Debug;

use crate::errors::FetchError;

/// Upstream identifier of a single game
pub type GameId = u64;

/// Common trait for all game data sources
#[async_trait]
pub trait StatsSource: Send + Sync + Debug {
    /// First regular-season game of the first scheduled date in `year`
    ///
    /// # Returns
    /// * `Ok(None)` - The season has no dates or the first date has no games
    async fn fetch_schedule(&self, year: i32) -> Result<Option<GameId>, FetchError>;

    /// Full live-feed document for a game, returned verbatim
    async fn fetch_game_data(&self, game_id: GameId) -> Result<Value, FetchError>;
}

pub mod mlb_stats;
