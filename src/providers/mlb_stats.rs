use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::app_config::ApiConfig;
use crate::errors::FetchError;
use crate::providers::{GameId, StatsSource};

/// Client for the public MLB Stats API
#[derive(Debug, Clone)]
pub struct MlbStatsApi {
    /// Endpoint settings
    config: ApiConfig,
    /// HTTP client for making requests
    client: Client,
}

/// Schedule response, reduced to what is needed to pick a game.
///
/// Dates stay untyped so only the first game is ever inspected.
#[derive(Debug, Deserialize)]
pub struct ScheduleResponse {
    /// Scheduled dates; absent for seasons without games
    #[serde(default)]
    pub dates: Vec<Value>,
}

impl ScheduleResponse {
    /// First game of the first date, if any.
    ///
    /// Only that game's `gamePk` is checked; later games are never read.
    pub fn first_game(&self) -> Result<Option<GameId>, FetchError> {
        let first = self
            .dates
            .first()
            .and_then(|date| date.get("games"))
            .and_then(Value::as_array)
            .and_then(|games| games.first());

        let Some(game) = first else {
            return Ok(None);
        };

        game.get("gamePk")
            .and_then(Value::as_u64)
            .map(Some)
            .ok_or_else(|| {
                FetchError::ParseError(format!("schedule: first game has no numeric gamePk: {}", game))
            })
    }
}

/// Pick the representative game from a raw schedule body
pub fn first_game_id(body: &str) -> Result<Option<GameId>, FetchError> {
    let schedule: ScheduleResponse = serde_json::from_str(body)
        .map_err(|e| FetchError::ParseError(format!("schedule: {}", e)))?;
    schedule.first_game()
}

impl MlbStatsApi {
    /// Create a new client from endpoint settings
    pub fn new(config: ApiConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder
            .build()
            .map_err(|e| FetchError::RequestFailed(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    /// `{base}/api/{version}/schedule?sportId=..&season=..&gameType=..`
    pub fn schedule_url(&self, year: i32) -> Result<Url, FetchError> {
        let mut url = self.endpoint(&[self.config.schedule_version.as_str(), "schedule"])?;
        url.query_pairs_mut()
            .append_pair("sportId", &self.config.sport_id.to_string())
            .append_pair("season", &year.to_string())
            .append_pair("gameType", &self.config.game_type);
        Ok(url)
    }

    /// `{base}/api/{version}/game/{id}/feed/live`
    pub fn game_feed_url(&self, game_id: GameId) -> Result<Url, FetchError> {
        self.endpoint(&[
            self.config.feed_version.as_str(),
            "game",
            game_id.to_string().as_str(),
            "feed",
            "live",
        ])
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        let mut url = Url::parse(&self.config.base_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{}: {}", self.config.base_url, e)))?;
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidUrl(self.config.base_url.clone()))?
            .pop_if_empty()
            .push("api")
            .extend(segments);
        Ok(url)
    }

    /// GET a URL and return the body of a successful response
    async fn get_text(&self, url: Url) -> Result<String, FetchError> {
        debug!("GET {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::RequestFailed(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to get error response text".to_string());
            error!("Stats API error ({}): {}", status, error_text);
            return Err(FetchError::ApiError {
                status_code: status.as_u16(),
                message: error_text,
            });
        }

        response
            .text()
            .await
            .map_err(|e| FetchError::RequestFailed(format!("Failed to read response body: {}", e)))
    }
}

#[async_trait]
impl StatsSource for MlbStatsApi {
    async fn fetch_schedule(&self, year: i32) -> Result<Option<GameId>, FetchError> {
        let body = self.get_text(self.schedule_url(year)?).await?;
        first_game_id(&body)
    }

    async fn fetch_game_data(&self, game_id: GameId) -> Result<Value, FetchError> {
        let body = self.get_text(self.game_feed_url(game_id)?).await?;
        serde_json::from_str(&body)
            .map_err(|e| FetchError::ParseError(format!("game {}: {}", game_id, e)))
    }
}
