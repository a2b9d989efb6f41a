use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use log::info;

use crate::cache::{Cache, TOURNAMENTS_KEY};
use crate::config::settings::AppConfig;
use crate::database;
use crate::domain::TournamentRecord;
use crate::ranking::report::{ranked_report, summaries};
use crate::ranking::{Filter, FilterPipeline, MatchupMatrix};
use crate::rating::{self, Roster};

pub struct ProcessingService {
    config: AppConfig,
    cache: Cache,
}

impl ProcessingService {
    pub fn new(config: AppConfig) -> Result<Self> {
        let cache = Cache::new(&config.source.cache_dir)?;
        Ok(Self { config, cache })
    }

    /// Parsed tournaments from the cache, if they match the configured list.
    pub fn cached_tournaments(&self) -> Result<Option<Vec<TournamentRecord>>> {
        let Some(tournaments) = self
            .cache
            .load_parsed::<Vec<TournamentRecord>>(TOURNAMENTS_KEY)?
        else {
            return Ok(None);
        };

        let cached_keys: Vec<&str> = tournaments.iter().map(|t| t.key.as_str()).collect();
        if cached_keys != self.config.tournaments {
            info!("  → Cached tournament list differs from configuration");
            return Ok(None);
        }
        Ok(Some(tournaments))
    }

    /// Rate `tournaments`, persist the snapshot and write the report files.
    pub fn run(
        &self,
        tournaments: &[TournamentRecord],
        resume: Option<&Path>,
        filters: &FilterPipeline,
    ) -> Result<Roster> {
        info!("=== Starting Rating Calculation ===\n");

        // Step 1: Starting roster
        let mut roster = match resume {
            Some(path) => database::load_snapshot(path)?,
            None => Roster::new(),
        };
        info!("  → Starting from {} competitors\n", roster.len());

        // Step 2: Apply every tournament in order
        let aliases = self.config.alias_table()?;
        let tally =
            rating::calculate_ratings(&mut roster, tournaments, &aliases, &self.config.rating)?;
        info!(
            "  → {} matches rated, {} byes, {} unrecognized scores, {} self-matches\n",
            tally.applied, tally.byes, tally.rejected_scores, tally.self_matches
        );

        // Step 3: Persist the snapshot
        database::save_snapshot(&self.config.output.snapshot_path, &roster)?;

        // Step 4: Reports
        self.write_reports(&roster, filters)?;

        info!("=== Calculation Complete ===");
        Ok(roster)
    }

    fn write_reports(&self, roster: &Roster, filters: &FilterPipeline) -> Result<()> {
        let output = &self.config.output;
        fs::create_dir_all(&output.output_dir)
            .with_context(|| format!("Failed to create {}", output.output_dir.display()))?;

        let list = filters.apply(roster.all());
        info!("  → {} of {} competitors pass the filters", list.len(), roster.len());

        write_text(&output.report_path(), &ranked_report(&list))?;
        write_text(
            &output.summaries_path(),
            &summaries(roster, &list, self.config.rating.notable_margin),
        )?;

        let top = Filter::Top(self.config.rating.matrix_size).apply(list);
        let matrix = MatchupMatrix::build(&top);
        matrix.write_csv(&output.matrix_path())?;
        info!("  → Wrote {}", output.matrix_path().display());
        matrix.write_xlsx(&output.matrix_sheet_path())?;
        info!("  → Wrote {}", output.matrix_sheet_path().display());
        println!("{}", matrix.render());

        Ok(())
    }
}

fn write_text(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write {}", path.display()))?;
    info!("  → Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MatchRecord, ParticipantRecord};

    fn config(root: &Path) -> AppConfig {
        let mut config = AppConfig::new();
        config.source.cache_dir = root.join("cache");
        config.output.output_dir = root.join("output");
        config.output.snapshot_path = root.join("output").join("ratings.db");
        config.tournaments = vec!["weekly1".to_string()];
        config.aliases.insert("Big A".to_string(), "A".to_string());
        config
    }

    fn tournament() -> TournamentRecord {
        TournamentRecord {
            id: 1,
            key: "weekly1".to_string(),
            name: "Weekly 1".to_string(),
            entrant_count: 2,
            participants: vec![
                ParticipantRecord { id: 10, display_name: "Big A".to_string(), final_rank: Some(1) },
                ParticipantRecord { id: 11, display_name: "b".to_string(), final_rank: Some(2) },
            ],
            matches: vec![MatchRecord {
                id: 1,
                winner_id: Some(10),
                loser_id: Some(11),
                score: "2-0".to_string(),
                played_at: None,
            }],
        }
    }

    #[test]
    fn test_run_writes_snapshot_and_reports() {
        let root = std::env::temp_dir().join("bracket_elo_test_processing");
        let service = ProcessingService::new(config(&root)).unwrap();

        let roster = service
            .run(&[tournament()], None, &FilterPipeline::new())
            .unwrap();
        assert!((roster.find("A").unwrap().rating - 1216.0).abs() < 1e-9);

        let output = &service.config.output;
        let report = fs::read_to_string(output.report_path()).unwrap();
        assert!(report.lines().nth(1).unwrap().starts_with("  1 A "));
        assert!(output.summaries_path().exists());
        assert!(output.matrix_path().exists());
        assert!(output.matrix_sheet_path().exists());

        let resumed = service
            .run(&[tournament()], Some(&output.snapshot_path), &FilterPipeline::new())
            .unwrap();
        let a = resumed.find("A").unwrap();
        assert_eq!(a.games_played, 1);
        assert_eq!(a.placements.len(), 1);
        assert!((a.rating - 1216.0).abs() < 1e-9);
        assert!((a.earnings - 6.0).abs() < 1e-9);
        assert_eq!(resumed, roster);
        fs::remove_dir_all(&root).unwrap();
    }

    #[test]
    fn test_cached_tournaments_must_match_config() {
        let root = std::env::temp_dir().join("bracket_elo_test_processing_cache");
        let service = ProcessingService::new(config(&root)).unwrap();
        assert!(service.cached_tournaments().unwrap().is_none());

        service.cache.save_parsed(TOURNAMENTS_KEY, &vec![tournament()]).unwrap();
        assert_eq!(service.cached_tournaments().unwrap(), Some(vec![tournament()]));

        let mut other = tournament();
        other.key = "weekly2".to_string();
        service.cache.save_parsed(TOURNAMENTS_KEY, &vec![other]).unwrap();
        assert!(service.cached_tournaments().unwrap().is_none());
        fs::remove_dir_all(&root).unwrap();
    }
}
