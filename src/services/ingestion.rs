use anyhow::Result;
use log::{info, warn};

use crate::api::ChallongeClient;
use crate::cache::{Cache, TOURNAMENTS_KEY};
use crate::config::settings::AppConfig;
use crate::domain::{FetchProgress, TournamentCollection, TournamentRecord};

pub struct IngestionService {
    cache: Cache,
    api_client: ChallongeClient,
    tournament_keys: Vec<String>,
}

impl IngestionService {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self {
            cache: Cache::new(&config.source.cache_dir)?,
            api_client: ChallongeClient::new(&config.source)?,
            tournament_keys: config.tournaments.clone(),
        })
    }

    /// Fetch every configured tournament and refresh the parsed cache.
    ///
    /// With `force`, cached raw responses are ignored and fetched again.
    pub async fn run(&mut self, force: bool) -> Result<Vec<TournamentRecord>> {
        info!("=== Starting Data Ingestion ===\n");

        if self.tournament_keys.is_empty() {
            warn!("No tournaments configured; nothing to fetch");
        }

        // Step 1: Fetch tournament data
        let collection = self.fetch_tournaments(force).await?;
        info!("  → Fetched {} tournaments\n", collection.len());

        // Step 2: Save to parsed cache
        let tournaments = collection.into_vec();
        self.cache.save_parsed(TOURNAMENTS_KEY, &tournaments)?;
        info!("  → Saved to parsed cache\n");

        info!("=== Ingestion Complete ===");
        Ok(tournaments)
    }

    /// Current state of a single tournament, bypassing the cache.
    pub async fn fetch_fresh(&mut self, tournament_key: &str) -> Result<TournamentRecord> {
        self.api_client
            .fetch_and_cache_tournament(tournament_key, &self.cache, true)
            .await
    }

    async fn fetch_tournaments(&mut self, force: bool) -> Result<TournamentCollection> {
        info!("Step 1: Fetching tournament details...");

        let mut progress = FetchProgress::new(self.tournament_keys.len());
        let mut collection = TournamentCollection::new();

        for key in &self.tournament_keys {
            let was_cached = !force && self.cache.has_raw(key);
            let tournament = self
                .api_client
                .fetch_and_cache_tournament(key, &self.cache, force)
                .await?;

            if !collection.add(tournament) {
                warn!("  Tournament {} is listed more than once; keeping the first", key);
            }
            progress.record(was_cached);
        }

        info!("  → {} requests sent to the source", progress.fetched());
        Ok(collection)
    }
}
