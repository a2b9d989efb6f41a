use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::models::DbPlacement;
use crate::rating::{CompetitorId, Placement};

pub fn insert_placement(
    conn: &Connection,
    competitor_id: CompetitorId,
    placement: &Placement,
) -> Result<()> {
    let sql = "INSERT INTO placements (competitor_id, tournament, entrants, final_rank) VALUES (?1, ?2, ?3, ?4)";

    conn.execute(
        sql,
        params![
            competitor_id.0,
            placement.tournament,
            placement.entrants,
            placement.rank
        ],
    )
    .context("Failed to insert placement")?;
    Ok(())
}

fn parse_placement_row(row: &rusqlite::Row) -> rusqlite::Result<DbPlacement> {
    Ok(DbPlacement {
        competitor_id: row.get(0)?,
        tournament: row.get(1)?,
        entrants: row.get(2)?,
        final_rank: row.get(3)?,
    })
}

/// Every placement, in insertion order.
pub fn list_all(conn: &Connection) -> Result<Vec<DbPlacement>> {
    let sql = "SELECT competitor_id, tournament, entrants, final_rank FROM placements ORDER BY id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_placement_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read placements")?;

    Ok(rows)
}
