use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One finished (or abandoned) bracket, independent of the hosting service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentRecord {
    pub id: i64,
    /// Identifier used to request the tournament, e.g. the URL slug.
    pub key: String,
    pub name: String,
    pub entrant_count: u32,
    pub participants: Vec<ParticipantRecord>,
    /// Matches in play order; this order drives rating updates.
    pub matches: Vec<MatchRecord>,
}

/// An entrant of a single tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParticipantRecord {
    /// Identifier unique within the hosting service, not across names.
    pub id: i64,
    pub display_name: String,
    pub final_rank: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub id: i64,
    /// `None` for byes and matches that were never played.
    pub winner_id: Option<i64>,
    pub loser_id: Option<i64>,
    pub score: String,
    pub played_at: Option<DateTime<Utc>>,
}
