use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct DbCompetitor {
    pub id: u32,
    pub name: String,
    pub rating: f64,
    pub games_won: u32,
    pub games_played: u32,
    pub earnings: f64,
}

#[derive(Debug, Clone)]
pub struct DbPlacement {
    pub competitor_id: u32,
    pub tournament: String,
    pub entrants: u32,
    pub final_rank: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
}

impl Outcome {
    pub fn as_str(&self) -> &str {
        match self {
            Outcome::Win => "win",
            Outcome::Loss => "loss",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "win" => Some(Outcome::Win),
            "loss" => Some(Outcome::Loss),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct DbSet {
    pub competitor_id: u32,
    pub opponent_id: u32,
    pub outcome: String,
    pub tournament: String,
    pub score: String,
    pub played_at: Option<DateTime<Utc>>,
}
