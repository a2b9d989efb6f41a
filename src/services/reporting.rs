use anyhow::Result;
use colored::Colorize;
use log::info;

use crate::config::settings::AppConfig;
use crate::database;
use crate::ranking::report::{
    head_to_head_details, head_to_head_list, ranked_rows, summaries, REPORT_HEADER,
};
use crate::ranking::seeding::{render_seeds, seed_order};
use crate::ranking::{Filter, FilterPipeline, MatchupMatrix};
use crate::rating::{project, AliasTable, Roster, UpdateParams};

/// Read-only views over a persisted roster.
pub struct ReportingService {
    config: AppConfig,
    aliases: AliasTable,
    roster: Roster,
}

impl ReportingService {
    pub fn new(config: AppConfig) -> Result<Self> {
        let roster = database::load_snapshot(&config.output.snapshot_path)?;
        Self::from_roster(config, roster)
    }

    pub fn from_roster(config: AppConfig, roster: Roster) -> Result<Self> {
        let aliases = config.alias_table()?;
        Ok(Self {
            config,
            aliases,
            roster,
        })
    }

    pub fn aliases(&self) -> &AliasTable {
        &self.aliases
    }

    /// Ranked listing, optionally followed by summaries and the matchup matrix.
    pub fn ranking(&self, filters: &FilterPipeline, with_summaries: bool, with_matrix: bool) -> String {
        let list = filters.apply(self.roster.all());
        info!("  → {} of {} competitors pass the filters", list.len(), self.roster.len());

        let mut out = format!("{}\n{}", REPORT_HEADER.bold(), ranked_rows(&list));
        if with_summaries {
            out.push('\n');
            out.push_str(&summaries(&self.roster, &list, self.config.rating.notable_margin));
        }
        if with_matrix {
            let top = Filter::Top(self.config.rating.matrix_size).apply(list);
            out.push('\n');
            out.push_str(&MatchupMatrix::build(&top).render());
        }
        out
    }

    /// Tally against every opponent, or the set log against one.
    pub fn head_to_head(&self, name: &str, opponent: Option<&str>) -> Result<String> {
        let competitor = self.roster.find(&self.aliases.resolve(name)?)?;
        let Some(opponent) = opponent else {
            return Ok(head_to_head_list(&self.roster, competitor));
        };
        let opponent = self.roster.find(&self.aliases.resolve(opponent)?)?;
        Ok(head_to_head_details(&self.roster, competitor, opponent.id))
    }

    /// Ratings both would carry after `winner` beats `loser` by `score`.
    pub fn predict(&self, winner: &str, loser: &str, score: &str) -> Result<String> {
        let winner = self.roster.find(&self.aliases.resolve(winner)?)?;
        let loser = self.roster.find(&self.aliases.resolve(loser)?)?;
        let params = UpdateParams {
            k_factor: self.config.rating.k_factor,
        };
        let projection = project(winner.rating, loser.rating, score, params)?;

        Ok(format!(
            "{}: {:.0} -> {:.0} ({:+.1})\n{}: {:.0} -> {:.0} ({:+.1})\n",
            winner.name,
            projection.winner_before,
            projection.winner_after,
            projection.winner_after - projection.winner_before,
            loser.name,
            projection.loser_before,
            projection.loser_after,
            projection.loser_after - projection.loser_before
        ))
    }

    /// Seed list for an upcoming bracket's sign-ups.
    pub fn seed<S: AsRef<str>>(&self, entrants: &[S]) -> Result<String> {
        let seeds = seed_order(
            &self.roster,
            &self.aliases,
            entrants,
            self.config.rating.unrated_seed_rating,
        )?;
        Ok(render_seeds(&seeds))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{MatchRecord, ParticipantRecord, TournamentRecord};
    use crate::errors::RatingError;
    use crate::rating::calculate_ratings;

    fn service() -> ReportingService {
        let mut config = AppConfig::new();
        config.aliases.insert("Ace".to_string(), "ALPHA".to_string());

        let tournament = TournamentRecord {
            id: 1,
            key: "weekly1".to_string(),
            name: "Weekly 1".to_string(),
            entrant_count: 2,
            participants: vec![
                ParticipantRecord { id: 1, display_name: "Alpha".to_string(), final_rank: Some(1) },
                ParticipantRecord { id: 2, display_name: "Bravo".to_string(), final_rank: Some(2) },
            ],
            matches: vec![MatchRecord {
                id: 1,
                winner_id: Some(1),
                loser_id: Some(2),
                score: "2-1".to_string(),
                played_at: None,
            }],
        };
        let mut roster = Roster::new();
        calculate_ratings(&mut roster, &[tournament], &config.alias_table().unwrap(), &config.rating)
            .unwrap();
        ReportingService::from_roster(config, roster).unwrap()
    }

    #[test]
    fn test_ranking_with_extras() {
        let service = service();
        let text = service.ranking(&FilterPipeline::new(), true, true);
        assert!(text.contains("  1 ALPHA"));
        assert!(text.contains("1. ALPHA"));
        assert!(text.contains("1-0"));
    }

    #[test]
    fn test_head_to_head_resolves_aliases() {
        let service = service();
        let list = service.head_to_head("ace", None).unwrap();
        assert!(list.contains("BRAVO"));

        let details = service.head_to_head("Ace", Some("bravo")).unwrap();
        assert!(details.contains("unknown date: 2-1 (Weekly 1)"));

        let err = service.head_to_head("nobody", None).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<RatingError>(),
            Some(RatingError::UnknownCompetitor { .. })
        ));
    }

    #[test]
    fn test_predict_does_not_mutate() {
        let service = service();
        let before = service.roster.clone();
        let text = service.predict("bravo", "ace", "3-0").unwrap();

        assert!(text.starts_with("BRAVO:"));
        assert_eq!(service.roster, before);
        assert!(service.predict("bravo", "ace", "abc").is_err());
    }

    #[test]
    fn test_seed_places_unknown_entrants_last() {
        let service = service();
        let text = service.seed(&["Newbie", "Bravo", "Ace"]).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert!(lines[0].contains("Ace"));
        assert!(lines[1].contains("Bravo"));
        assert!(lines[2].ends_with("(unrated)"));
    }
}
