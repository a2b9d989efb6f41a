pub mod aggregator;
pub mod competitor;
pub mod identity;
pub mod processor;
pub mod projection;
pub mod roster;
pub mod score;

pub use aggregator::{ParticipantIndex, TournamentAggregator};
pub use competitor::{Competitor, CompetitorId, Placement, SetRecord, UpdateParams};
pub use identity::AliasTable;
pub use processor::{MatchProcessor, MatchTally};
pub use projection::{project, Projection};
pub use roster::Roster;
pub use score::{MarginCategory, SetScore};

use log::info;

use crate::config::settings::RatingSettings;
use crate::domain::TournamentRecord;
use crate::errors::RatingResult;

/// Fold a sequence of tournaments into `roster`.
///
/// All participants are registered first so that every match can be
/// resolved; matches are then applied tournament by tournament in the
/// order given. Tournaments the roster already contains are skipped, so a
/// resumed roster never counts a bracket twice.
pub fn calculate_ratings(
    roster: &mut Roster,
    tournaments: &[TournamentRecord],
    aliases: &AliasTable,
    settings: &RatingSettings,
) -> RatingResult<MatchTally> {
    let mut pending: Vec<&TournamentRecord> = Vec::with_capacity(tournaments.len());
    for tournament in tournaments {
        let repeated = pending.iter().any(|t| t.key == tournament.key);
        if roster.is_applied(&tournament.key) || repeated {
            info!("  → Skipping '{}': already applied", tournament.name);
        } else {
            pending.push(tournament);
        }
    }
    info!(
        "Calculating ratings for {} tournaments ({} skipped)",
        pending.len(),
        tournaments.len() - pending.len()
    );

    let aggregator = TournamentAggregator::new(aliases, settings);
    let indices = pending
        .iter()
        .map(|t| aggregator.ingest(roster, t))
        .collect::<RatingResult<Vec<_>>>()?;
    info!("Registered {} competitors", roster.len());

    let processor = MatchProcessor::new(UpdateParams {
        k_factor: settings.k_factor,
    });
    let mut total = MatchTally::default();
    for (tournament, index) in pending.iter().zip(&indices) {
        let tally = processor.process_tournament(roster, tournament, index)?;
        info!(
            "  → {}: {} rated, {} byes, {} unrecognized scores",
            tournament.name, tally.applied, tally.byes, tally.rejected_scores
        );
        roster.mark_applied(&tournament.key);
        total.absorb(tally);
    }

    Ok(total)
}
