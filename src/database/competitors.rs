use anyhow::{Context, Result};
use rusqlite::{params, Connection};

use super::models::DbCompetitor;
use crate::rating::Competitor;

pub fn insert_competitor(conn: &Connection, competitor: &Competitor) -> Result<()> {
    let sql = "INSERT INTO competitors (id, name, rating, games_won, games_played, earnings) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";

    conn.execute(
        sql,
        params![
            competitor.id.0,
            competitor.name,
            competitor.rating,
            competitor.games_won,
            competitor.games_played,
            competitor.earnings
        ],
    )
    .with_context(|| format!("Failed to insert competitor {}", competitor.name))?;
    Ok(())
}

fn parse_competitor_row(row: &rusqlite::Row) -> rusqlite::Result<DbCompetitor> {
    Ok(DbCompetitor {
        id: row.get(0)?,
        name: row.get(1)?,
        rating: row.get(2)?,
        games_won: row.get(3)?,
        games_played: row.get(4)?,
        earnings: row.get(5)?,
    })
}

pub fn list_all(conn: &Connection) -> Result<Vec<DbCompetitor>> {
    let sql = "SELECT id, name, rating, games_won, games_played, earnings FROM competitors ORDER BY id";

    let mut stmt = conn.prepare(sql)?;
    let rows = stmt
        .query_map([], parse_competitor_row)?
        .collect::<rusqlite::Result<Vec<_>>>()
        .context("Failed to read competitors")?;

    Ok(rows)
}
