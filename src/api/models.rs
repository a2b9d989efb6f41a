use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::domain::{MatchRecord, ParticipantRecord, TournamentRecord};

/// Score assumed when the bracket has a winner but no reported games.
pub const DEFAULT_SCORE: &str = "1-0";

// --- API Response Structures ---

/// Envelope of `GET /tournaments/{id}.json`
#[derive(Debug, Deserialize, Serialize)]
pub struct TournamentEnvelope {
    pub tournament: TournamentResponse,
}

/// Raw tournament API response from Challonge
#[derive(Debug, Deserialize, Serialize)]
pub struct TournamentResponse {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub participants_count: Option<u32>,
    #[serde(default)]
    pub participants: Vec<ParticipantEnvelope>,
    #[serde(default)]
    pub matches: Vec<MatchEnvelope>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ParticipantEnvelope {
    pub participant: ParticipantResponse,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ParticipantResponse {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub final_rank: Option<u32>,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct MatchEnvelope {
    #[serde(rename = "match")]
    pub match_data: MatchResponse,
}

/// Raw match API response from Challonge
#[derive(Debug, Deserialize, Serialize)]
pub struct MatchResponse {
    pub id: i64,
    #[serde(default)]
    pub player1_id: Option<i64>,
    #[serde(default)]
    pub player2_id: Option<i64>,
    #[serde(default)]
    pub winner_id: Option<i64>,
    #[serde(default)]
    pub loser_id: Option<i64>,
    #[serde(default)]
    pub scores_csv: Option<String>,
    #[serde(default)]
    pub started_at: Option<String>,
    #[serde(default)]
    pub completed_at: Option<String>,
}

impl ParticipantResponse {
    pub fn shown_name(&self) -> String {
        self.display_name
            .as_deref()
            .or(self.name.as_deref())
            .filter(|n| !n.trim().is_empty())
            .unwrap_or("UNKNOWN")
            .to_string()
    }
}

impl MatchResponse {
    /// Loser as reported, or the other slot when only the winner is set.
    pub fn resolved_loser_id(&self) -> Option<i64> {
        if self.loser_id.is_some() {
            return self.loser_id;
        }
        let winner = self.winner_id?;
        match (self.player1_id, self.player2_id) {
            (Some(p1), Some(p2)) if p1 == winner => Some(p2),
            (Some(p1), Some(p2)) if p2 == winner => Some(p1),
            _ => None,
        }
    }

    pub fn score(&self) -> String {
        self.scores_csv
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_SCORE)
            .to_string()
    }

    pub fn played_at(&self) -> Option<DateTime<Utc>> {
        let raw = self
            .started_at
            .as_deref()
            .or(self.completed_at.as_deref())?;
        match DateTime::parse_from_rfc3339(raw) {
            Ok(dt) => Some(dt.with_timezone(&Utc)),
            Err(e) => {
                warn!("Unparseable timestamp '{}' on match {}: {}", raw, self.id, e);
                None
            }
        }
    }
}

impl TournamentResponse {
    /// Convert to the source-agnostic record consumed by the rating core.
    pub fn into_record(self, key: &str) -> TournamentRecord {
        let participants: Vec<ParticipantRecord> = self
            .participants
            .into_iter()
            .map(|p| ParticipantRecord {
                id: p.participant.id,
                display_name: p.participant.shown_name(),
                final_rank: p.participant.final_rank,
            })
            .collect();

        let matches = self
            .matches
            .into_iter()
            .map(|m| {
                let m = m.match_data;
                MatchRecord {
                    id: m.id,
                    winner_id: m.winner_id,
                    loser_id: m.resolved_loser_id(),
                    score: m.score(),
                    played_at: m.played_at(),
                }
            })
            .collect();

        TournamentRecord {
            id: self.id,
            key: key.to_string(),
            name: self.name,
            entrant_count: self
                .participants_count
                .unwrap_or(participants.len() as u32),
            participants,
            matches,
        }
    }
}
