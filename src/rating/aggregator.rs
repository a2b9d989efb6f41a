use std::collections::{HashMap, HashSet};

use log::debug;

use super::competitor::CompetitorId;
use super::identity::AliasTable;
use super::roster::Roster;
use crate::config::settings::RatingSettings;
use crate::domain::TournamentRecord;
use crate::errors::RatingResult;

/// Participant ids of one tournament mapped to roster competitors.
pub type ParticipantIndex = HashMap<i64, CompetitorId>;

/// Turns participant lists into competitors, placements and earnings.
pub struct TournamentAggregator<'a> {
    aliases: &'a AliasTable,
    settings: &'a RatingSettings,
}

impl<'a> TournamentAggregator<'a> {
    pub fn new(aliases: &'a AliasTable, settings: &'a RatingSettings) -> Self {
        Self { aliases, settings }
    }

    /// Register every participant of `tournament` and attach placements.
    ///
    /// A competitor entered twice under different aliases keeps only the
    /// first placement recorded for that tournament.
    pub fn ingest(
        &self,
        roster: &mut Roster,
        tournament: &TournamentRecord,
    ) -> RatingResult<ParticipantIndex> {
        let mut index = ParticipantIndex::with_capacity(tournament.participants.len());
        let mut placed = HashSet::new();

        for participant in &tournament.participants {
            let name = self.aliases.resolve(&participant.display_name)?;
            let id = roster.get_or_create(&name, self.settings.default_rating);
            index.insert(participant.id, id);

            let Some(rank) = participant.final_rank else {
                debug!(
                    "    {} has no final rank in '{}'",
                    name, tournament.name
                );
                continue;
            };
            if placed.insert(id) {
                roster.get_mut(id).record_placement(
                    &tournament.name,
                    tournament.entrant_count,
                    rank,
                    self.settings.entry_fee,
                );
            }
        }

        Ok(index)
    }
}
