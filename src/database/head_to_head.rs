use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::models::{DbSet, Outcome};
use crate::rating::{CompetitorId, SetRecord};

pub fn insert_set(
    conn: &Connection,
    competitor_id: CompetitorId,
    opponent_id: CompetitorId,
    outcome: Outcome,
    set: &SetRecord,
) -> Result<()> {
    let sql = "INSERT INTO head_to_head (competitor_id, opponent_id, outcome, tournament, score, played_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

    conn.execute(
        sql,
        params![
            competitor_id.0,
            opponent_id.0,
            outcome.as_str(),
            set.tournament,
            set.score,
            set.played_at
        ],
    )
    .context("Failed to insert head-to-head set")?;
    Ok(())
}

fn parse_set_row(row: &rusqlite::Row) -> rusqlite::Result<DbSet> {
    Ok(DbSet {
        competitor_id: row.get(0)?,
        opponent_id: row.get(1)?,
        outcome: row.get(2)?,
        tournament: row.get(3)?,
        score: row.get(4)?,
        played_at: row.get(5)?,
    })
}

/// Every logged set, in insertion order.
pub fn list_all(conn: &Connection) -> Result<Vec<DbSet>> {
    let sql = "SELECT competitor_id, opponent_id, outcome, tournament, score, played_at FROM head_to_head ORDER BY id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_set_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read head-to-head sets")?;

    Ok(rows)
}
