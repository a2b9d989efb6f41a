use log::{debug, warn};

use super::aggregator::ParticipantIndex;
use super::competitor::{CompetitorId, Opponent, SetRecord, UpdateParams};
use super::roster::Roster;
use crate::domain::{MatchRecord, TournamentRecord};
use crate::errors::{RatingError, RatingResult};

/// What happened to the matches of one tournament.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MatchTally {
    pub applied: usize,
    pub byes: usize,
    pub rejected_scores: usize,
    pub self_matches: usize,
}

impl MatchTally {
    pub fn absorb(&mut self, other: MatchTally) {
        self.applied += other.applied;
        self.byes += other.byes;
        self.rejected_scores += other.rejected_scores;
        self.self_matches += other.self_matches;
    }
}

/// Applies matches to a roster, strictly in the order given.
pub struct MatchProcessor {
    params: UpdateParams,
}

impl MatchProcessor {
    pub fn new(params: UpdateParams) -> Self {
        Self { params }
    }

    pub fn process_tournament(
        &self,
        roster: &mut Roster,
        tournament: &TournamentRecord,
        index: &ParticipantIndex,
    ) -> RatingResult<MatchTally> {
        let mut tally = MatchTally::default();

        for match_record in &tournament.matches {
            let (Some(winner_pid), Some(loser_pid)) = (match_record.winner_id, match_record.loser_id)
            else {
                tally.byes += 1;
                continue;
            };

            let winner = lookup(index, tournament, winner_pid)?;
            let loser = lookup(index, tournament, loser_pid)?;

            if winner == loser {
                warn!(
                    "    Skipping match {} in '{}': both sides resolve to {}",
                    match_record.id,
                    tournament.name,
                    roster.name_of(winner)
                );
                tally.self_matches += 1;
                continue;
            }

            if self.apply(roster, winner, loser, tournament, match_record) {
                tally.applied += 1;
            } else {
                debug!(
                    "    Ignoring score '{}' for match {} in '{}'",
                    match_record.score, match_record.id, tournament.name
                );
                tally.rejected_scores += 1;
            }
        }

        Ok(tally)
    }

    /// Update both sides from their pre-match ratings.
    fn apply(
        &self,
        roster: &mut Roster,
        winner_id: CompetitorId,
        loser_id: CompetitorId,
        tournament: &TournamentRecord,
        match_record: &MatchRecord,
    ) -> bool {
        let record = SetRecord {
            tournament: tournament.name.clone(),
            score: match_record.score.clone(),
            played_at: match_record.played_at,
        };

        let (winner, loser) = roster.pair_mut(winner_id, loser_id);
        let winner_side = Opponent {
            id: winner.id,
            rating: winner.rating,
        };
        let loser_side = Opponent {
            id: loser.id,
            rating: loser.rating,
        };

        let won = winner.record_win(loser_side, &record, self.params);
        let lost = loser.record_loss(winner_side, &record, self.params);
        won.is_some() && lost.is_some()
    }
}

fn lookup(
    index: &ParticipantIndex,
    tournament: &TournamentRecord,
    participant_id: i64,
) -> RatingResult<CompetitorId> {
    index
        .get(&participant_id)
        .copied()
        .ok_or_else(|| RatingError::UnknownParticipant {
            tournament: tournament.name.clone(),
            participant_id,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::RatingSettings;
    use crate::domain::ParticipantRecord;
    use crate::rating::aggregator::TournamentAggregator;
    use crate::rating::identity::AliasTable;

    fn game(id: i64, winner: Option<i64>, loser: Option<i64>, score: &str) -> MatchRecord {
        MatchRecord {
            id,
            winner_id: winner,
            loser_id: loser,
            score: score.to_string(),
            played_at: None,
        }
    }

    fn setup(matches: Vec<MatchRecord>) -> (Roster, TournamentRecord, ParticipantIndex) {
        let tournament = TournamentRecord {
            id: 7,
            key: "weekly7".to_string(),
            name: "Weekly 7".to_string(),
            entrant_count: 3,
            participants: ["A", "B", "C"]
                .iter()
                .enumerate()
                .map(|(i, name)| ParticipantRecord {
                    id: i as i64 + 1,
                    display_name: name.to_string(),
                    final_rank: None,
                })
                .collect(),
            matches,
        };
        let aliases = AliasTable::new();
        let settings = RatingSettings::default();
        let mut roster = Roster::new();
        let index = TournamentAggregator::new(&aliases, &settings)
            .ingest(&mut roster, &tournament)
            .unwrap();
        (roster, tournament, index)
    }

    fn rating(roster: &Roster, name: &str) -> f64 {
        roster.find(name).unwrap().rating
    }

    #[test]
    fn test_standard_win_scenario() {
        let (mut roster, t, index) = setup(vec![game(1, Some(1), Some(2), "2-0")]);
        let tally = MatchProcessor::new(UpdateParams::default())
            .process_tournament(&mut roster, &t, &index)
            .unwrap();

        assert_eq!(tally.applied, 1);
        assert!((rating(&roster, "A") - 1216.0).abs() < 1e-9);
        assert!((rating(&roster, "B") - 1184.0).abs() < 1e-9);
        assert_eq!(rating(&roster, "C"), 1200.0);
    }

    #[test]
    fn test_unrecognized_score_scenario() {
        let (mut roster, t, index) = setup(vec![game(1, Some(1), Some(2), "5-5")]);
        let before = roster.clone();
        let tally = MatchProcessor::new(UpdateParams::default())
            .process_tournament(&mut roster, &t, &index)
            .unwrap();

        assert_eq!(tally.rejected_scores, 1);
        assert_eq!(roster, before);
    }

    #[test]
    fn test_byes_are_skipped() {
        let (mut roster, t, index) = setup(vec![
            game(1, None, Some(2), "1-0"),
            game(2, None, None, ""),
        ]);
        let tally = MatchProcessor::new(UpdateParams::default())
            .process_tournament(&mut roster, &t, &index)
            .unwrap();

        assert_eq!(tally.byes, 2);
        assert!(roster.iter().all(|c| c.games_played == 0));
    }

    #[test]
    fn test_unknown_participant_is_fatal() {
        let (mut roster, t, index) = setup(vec![game(1, Some(1), Some(99), "2-0")]);
        let err = MatchProcessor::new(UpdateParams::default())
            .process_tournament(&mut roster, &t, &index)
            .unwrap_err();

        assert_eq!(
            err,
            RatingError::UnknownParticipant {
                tournament: "Weekly 7".to_string(),
                participant_id: 99
            }
        );
    }

    #[test]
    fn test_order_matters() {
        let forward = vec![
            game(1, Some(1), Some(2), "3-0"),
            game(2, Some(3), Some(1), "2-1"),
        ];
        let reversed: Vec<MatchRecord> = forward.iter().rev().cloned().collect();

        let (mut r1, t1, i1) = setup(forward);
        let (mut r2, t2, i2) = setup(reversed);
        let processor = MatchProcessor::new(UpdateParams::default());
        processor.process_tournament(&mut r1, &t1, &i1).unwrap();
        processor.process_tournament(&mut r2, &t2, &i2).unwrap();

        assert!((rating(&r1, "A") - rating(&r2, "A")).abs() > 1e-6);
    }

    #[test]
    fn test_games_played_equals_wins_plus_losses() {
        let (mut roster, t, index) = setup(vec![
            game(1, Some(1), Some(2), "2-0"),
            game(2, Some(2), Some(3), "3-2"),
            game(3, Some(3), Some(1), "7-7"),
            game(4, Some(1), Some(3), "1-3"),
            game(5, None, Some(3), ""),
        ]);
        MatchProcessor::new(UpdateParams::default())
            .process_tournament(&mut roster, &t, &index)
            .unwrap();

        for c in roster.iter() {
            let wins: usize = c.h2h_wins.values().map(Vec::len).sum();
            let losses: usize = c.h2h_losses.values().map(Vec::len).sum();
            assert_eq!(c.games_won as usize, wins);
            assert_eq!(c.games_played as usize, wins + losses);
        }
        assert_eq!(roster.find("A").unwrap().games_played, 2);
    }
}
