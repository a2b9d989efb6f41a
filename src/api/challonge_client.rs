use crate::api::models::TournamentEnvelope;
use crate::cache::Cache;
use crate::config::settings::{self, SourceSettings};
use crate::domain::TournamentRecord;
use crate::http::{Credentials, RateLimitedClient};
use anyhow::{Context, Result};
use log::{info, warn};
use serde_json::Value;

/// Challonge API client
///
/// The API key is read from the environment on the first request, so
/// runs served entirely from the cache need no key.
pub struct ChallongeClient {
    client: RateLimitedClient,
    api_base_url: String,
    username: String,
}

impl ChallongeClient {
    /// Create a new Challonge API client
    pub fn new(settings: &SourceSettings) -> Result<Self> {
        let client = RateLimitedClient::new(
            &settings.user_agent,
            settings.timeout_secs,
            settings.rate_limit_ms,
        )?;

        Ok(Self {
            client,
            api_base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            username: settings.username.clone(),
        })
    }

    /// Fetch a tournament with its participants and matches
    pub async fn fetch_tournament_raw(&mut self, tournament_key: &str) -> Result<Value> {
        self.ensure_credentials()?;
        let url = self.build_tournament_url(tournament_key);
        info!("Fetching tournament {}", tournament_key);

        self.client
            .get_json(&url)
            .await
            .with_context(|| format!("Failed to fetch tournament {}", tournament_key))
    }

    /// Fetch tournament with cache integration
    /// Saves the FULL raw JSON to cache, then parses it.
    pub async fn fetch_and_cache_tournament(
        &mut self,
        tournament_key: &str,
        cache: &Cache,
        force: bool,
    ) -> Result<TournamentRecord> {
        let cached_value = if force {
            None
        } else {
            cache.load_raw(tournament_key)?
        };

        let json_value = match cached_value {
            Some(val) => val,
            None => {
                let value = self.fetch_tournament_raw(tournament_key).await?;
                if let Err(e) = cache.save_raw(tournament_key, &value) {
                    warn!("Failed to save tournament {} to cache: {:?}", tournament_key, e);
                }
                value
            }
        };

        Self::parse_tournament(tournament_key, json_value)
    }

    pub fn parse_tournament(tournament_key: &str, json_value: Value) -> Result<TournamentRecord> {
        let envelope: TournamentEnvelope = serde_json::from_value(json_value).with_context(|| {
            format!("Failed to map JSON to a tournament for {}", tournament_key)
        })?;
        Ok(envelope.tournament.into_record(tournament_key))
    }

    // --- Helper Methods ---

    fn ensure_credentials(&mut self) -> Result<()> {
        if !self.client.has_credentials() {
            self.client.set_credentials(Credentials {
                username: self.username.clone(),
                api_key: settings::api_key()?,
            });
        }
        Ok(())
    }

    fn build_tournament_url(&self, tournament_key: &str) -> String {
        format!(
            "{}/tournaments/{}.json?include_participants=1&include_matches=1",
            self.api_base_url,
            urlencoding::encode(tournament_key)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_cached_tournament_needs_no_credentials() {
        let temp_dir = std::env::temp_dir().join("bracket_elo_test_client_cached");
        let cache = Cache::new(&temp_dir).unwrap();
        cache
            .save_raw(
                "weekly1",
                &json!({"tournament": {
                    "id": 7,
                    "name": "Weekly 1",
                    "participants_count": 0,
                    "participants": [],
                    "matches": []
                }}),
            )
            .unwrap();

        let mut client = ChallongeClient::new(&SourceSettings::default()).unwrap();
        let record = client
            .fetch_and_cache_tournament("weekly1", &cache, false)
            .await
            .unwrap();

        assert_eq!(record.id, 7);
        assert_eq!(record.key, "weekly1");
        assert!(!client.client.has_credentials());
        std::fs::remove_dir_all(&temp_dir).unwrap();
    }

    #[test]
    fn test_tournament_url_encodes_key() {
        let client = ChallongeClient::new(&SourceSettings {
            api_base_url: "https://example.test/v1/".to_string(),
            ..SourceSettings::default()
        })
        .unwrap();

        assert_eq!(
            client.build_tournament_url("club-weekly/3"),
            "https://example.test/v1/tournaments/club-weekly%2F3.json?include_participants=1&include_matches=1"
        );
    }
}
