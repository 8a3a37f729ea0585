use crate::domain::model::{Credentials, Record, RecordSet};
use crate::utils::error::{Result, SteamEtlError};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;

pub const DEFAULT_API_BASE: &str = "https://api.steampowered.com";

const PLAYER_SUMMARIES_PATH: &str = "/ISteamUser/GetPlayerSummaries/v0002/";
const OWNED_GAMES_PATH: &str = "/IPlayerService/GetOwnedGames/v0001/";

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    response: T,
}

#[derive(Debug, Deserialize)]
struct PlayerSummaries {
    #[serde(default)]
    players: Vec<PlayerSummary>,
}

#[derive(Debug, Deserialize)]
struct PlayerSummary {
    personaname: String,
}

#[derive(Debug, Deserialize)]
struct OwnedGames {
    // Private profiles answer with an empty `response` object.
    #[serde(default)]
    games: RecordSet,
}

/// Thin wrapper over the two Steam Web API calls the pipeline needs.
#[derive(Debug, Clone)]
pub struct SteamClient {
    client: Client,
    api_base: String,
}

impl SteamClient {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self::with_client(Client::new(), api_base)
    }

    pub fn with_client(client: Client, api_base: impl Into<String>) -> Self {
        let api_base = api_base.into().trim_end_matches('/').to_string();
        Self { client, api_base }
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    /// Resolves a Steam ID to the account's persona name (first player in the summary list).
    pub async fn resolve_persona_name(&self, credentials: &Credentials) -> Result<String> {
        let summaries: Envelope<PlayerSummaries> = self
            .get_json(
                "GetPlayerSummaries",
                PLAYER_SUMMARIES_PATH,
                &[
                    ("key", credentials.api_key.as_str()),
                    ("steamids", credentials.steam_id.as_str()),
                    ("format", "json"),
                ],
            )
            .await?;

        let player = summaries
            .response
            .players
            .into_iter()
            .next()
            .ok_or_else(|| SteamEtlError::NotFoundError {
                steam_id: credentials.steam_id.clone(),
            })?;

        tracing::debug!(persona_name = %player.personaname, "resolved player");
        Ok(player.personaname)
    }

    /// Fetches every owned game with app info. An empty library is not an error here.
    pub async fn fetch_owned_games(&self, credentials: &Credentials) -> Result<Vec<Record>> {
        let owned: Envelope<OwnedGames> = self
            .get_json(
                "GetOwnedGames",
                OWNED_GAMES_PATH,
                &[
                    ("key", credentials.api_key.as_str()),
                    ("steamid", credentials.steam_id.as_str()),
                    ("format", "json"),
                    ("include_appinfo", "1"),
                ],
            )
            .await?;

        tracing::debug!(games = owned.response.games.len(), "fetched owned games");
        Ok(owned.response.games)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T> {
        let url = format!("{}{}", self.api_base, path);
        tracing::debug!("Making API request to: {}{}", self.api_base, path);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| SteamEtlError::transport(endpoint, e))?;

        tracing::debug!("API response status: {}", response.status());

        let body = response
            .bytes()
            .await
            .map_err(|e| SteamEtlError::transport(endpoint, e))?;

        serde_json::from_slice(&body).map_err(|e| SteamEtlError::decode(endpoint, e))
    }
}
