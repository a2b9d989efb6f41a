use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::score::SetScore;

/// Stable index of a competitor inside a [`super::Roster`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CompetitorId(pub u32);

impl fmt::Display for CompetitorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Prize split for the top three finishers.
const PRIZE_SHARES: [f64; 3] = [0.6, 0.3, 0.1];

/// Parameters of a single rating update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UpdateParams {
    pub k_factor: f64,
}

impl Default for UpdateParams {
    fn default() -> Self {
        Self { k_factor: 32.0 }
    }
}

/// The opposing side of a set, as seen before either rating moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Opponent {
    pub id: CompetitorId,
    pub rating: f64,
}

/// One finished set, as stored in a head-to-head log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetRecord {
    pub tournament: String,
    /// Winner-perspective score, e.g. `"3-1"`.
    pub score: String,
    pub played_at: Option<DateTime<Utc>>,
}

/// Final standing at one tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub tournament: String,
    pub entrants: u32,
    pub rank: u32,
}

impl Placement {
    pub fn ordinal(&self) -> String {
        let suffix = match (self.rank % 10, self.rank % 100) {
            (1, r) if r != 11 => "st",
            (2, r) if r != 12 => "nd",
            (3, r) if r != 13 => "rd",
            _ => "th",
        };
        format!("{}{}", self.rank, suffix)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Competitor {
    pub id: CompetitorId,
    pub name: String,
    pub rating: f64,
    pub games_won: u32,
    pub games_played: u32,
    pub earnings: f64,
    pub placements: Vec<Placement>,
    pub h2h_wins: BTreeMap<CompetitorId, Vec<SetRecord>>,
    pub h2h_losses: BTreeMap<CompetitorId, Vec<SetRecord>>,
}

impl Competitor {
    pub fn new(id: CompetitorId, name: impl Into<String>, rating: f64) -> Self {
        Self {
            id,
            name: name.into(),
            rating,
            games_won: 0,
            games_played: 0,
            earnings: 0.0,
            placements: Vec::new(),
            h2h_wins: BTreeMap::new(),
            h2h_losses: BTreeMap::new(),
        }
    }

    pub fn games_lost(&self) -> u32 {
        self.games_played - self.games_won
    }

    pub fn win_ratio(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.games_won as f64 / self.games_played as f64
    }

    pub fn average_placement(&self) -> Option<f64> {
        if self.placements.is_empty() {
            return None;
        }
        let total: u32 = self.placements.iter().map(|p| p.rank).sum();
        Some(total as f64 / self.placements.len() as f64)
    }

    /// Apply a set win against `opponent`.
    ///
    /// Returns the rating change, or `None` when the score is not in the
    /// margin table, in which case nothing about the competitor changes.
    pub fn record_win(
        &mut self,
        opponent: Opponent,
        record: &SetRecord,
        params: UpdateParams,
    ) -> Option<f64> {
        let score = SetScore::parse(&record.score)?;
        let expected = expected_score(self.rating, opponent.rating);
        let delta = params.k_factor * (score.category.winner_outcome() - expected);

        self.rating += delta;
        self.games_played += 1;
        self.games_won += 1;
        self.h2h_wins
            .entry(opponent.id)
            .or_default()
            .push(normalized(record, score));
        Some(delta)
    }

    /// Apply a set loss against `opponent`. Mirrors [`Competitor::record_win`].
    pub fn record_loss(
        &mut self,
        opponent: Opponent,
        record: &SetRecord,
        params: UpdateParams,
    ) -> Option<f64> {
        let score = SetScore::parse(&record.score)?;
        let expected = expected_score(self.rating, opponent.rating);
        let delta = params.k_factor * (score.category.loser_outcome() - expected);

        self.rating += delta;
        self.games_played += 1;
        self.h2h_losses
            .entry(opponent.id)
            .or_default()
            .push(normalized(record, score));
        Some(delta)
    }

    /// Record a tournament finish; the top three take a share of the pot.
    pub fn record_placement(
        &mut self,
        tournament: &str,
        entrants: u32,
        rank: u32,
        entry_fee: f64,
    ) {
        if let Some(share) = rank
            .checked_sub(1)
            .and_then(|idx| PRIZE_SHARES.get(idx as usize))
        {
            self.earnings += entrants as f64 * entry_fee * share;
        }
        self.placements.push(Placement {
            tournament: tournament.to_string(),
            entrants,
            rank,
        });
    }

    /// Win-loss tally against one opponent.
    pub fn record_against(&self, opponent: CompetitorId) -> (usize, usize) {
        let wins = self.h2h_wins.get(&opponent).map_or(0, Vec::len);
        let losses = self.h2h_losses.get(&opponent).map_or(0, Vec::len);
        (wins, losses)
    }

    /// Every opponent faced, in id order.
    pub fn opponents(&self) -> Vec<CompetitorId> {
        let mut ids: Vec<CompetitorId> = self
            .h2h_wins
            .keys()
            .chain(self.h2h_losses.keys())
            .copied()
            .collect();
        ids.sort_unstable();
        ids.dedup();
        ids
    }
}

/// Logistic expectation of `rating` scoring against `opponent_rating`.
pub fn expected_score(rating: f64, opponent_rating: f64) -> f64 {
    let own = 10f64.powf(rating / 400.0);
    let other = 10f64.powf(opponent_rating / 400.0);
    own / (own + other)
}

fn normalized(record: &SetRecord, score: SetScore) -> SetRecord {
    SetRecord {
        score: score.to_string(),
        ..record.clone()
    }
}
