use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static SCORE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)\s*-\s*(\d+)\s*$").expect("score pattern is a valid regex")
});

/// How decisive a set was, judged from its game split.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarginCategory {
    Shutout,
    Standard,
    Close,
}

impl MarginCategory {
    /// Actual-outcome value credited to the winner.
    pub fn winner_outcome(self) -> f64 {
        match self {
            MarginCategory::Shutout => 1.25,
            MarginCategory::Standard => 1.0,
            MarginCategory::Close => 0.67,
        }
    }

    /// Actual-outcome value credited to the loser. Always `1 - winner_outcome`.
    pub fn loser_outcome(self) -> f64 {
        match self {
            MarginCategory::Shutout => -0.25,
            MarginCategory::Standard => 0.0,
            MarginCategory::Close => 0.33,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MarginCategory::Shutout => "shutout",
            MarginCategory::Standard => "standard",
            MarginCategory::Close => "close",
        }
    }
}

// Winner-perspective game splits; mirrored strings are folded onto these.
const MARGIN_TABLE: [((u32, u32), MarginCategory); 6] = [
    ((3, 0), MarginCategory::Shutout),
    ((1, 0), MarginCategory::Standard),
    ((2, 0), MarginCategory::Standard),
    ((3, 1), MarginCategory::Standard),
    ((2, 1), MarginCategory::Close),
    ((3, 2), MarginCategory::Close),
];

/// A recognized set result, stored from the winner's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetScore {
    pub winner_games: u32,
    pub loser_games: u32,
    pub category: MarginCategory,
}

impl SetScore {
    /// Classify a raw score string.
    ///
    /// The bracket service reports scores from player one's point of view, so
    /// `"1-2"` is the same set as `"2-1"`. Anything outside the margin table
    /// (draws, disqualifications written as `"-1-0"`, multi-set CSVs) yields
    /// `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let captures = SCORE_PATTERN.captures(raw)?;
        let a: u32 = captures[1].parse().ok()?;
        let b: u32 = captures[2].parse().ok()?;
        let split = (a.max(b), a.min(b));

        MARGIN_TABLE
            .iter()
            .find(|(games, _)| *games == split)
            .map(|&((winner_games, loser_games), category)| SetScore {
                winner_games,
                loser_games,
                category,
            })
    }
}

impl fmt::Display for SetScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.winner_games, self.loser_games)
    }
}
