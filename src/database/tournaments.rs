use anyhow::{Context, Result};
use rusqlite::{params, Connection};

pub fn insert_tournament(conn: &Connection, tournament_key: &str) -> Result<()> {
    conn.execute(
        "INSERT INTO tournaments (tournament_key) VALUES (?1)",
        params![tournament_key],
    )
    .with_context(|| format!("Failed to insert tournament '{}'", tournament_key))?;
    Ok(())
}

/// Keys of every folded-in tournament, in the order they were applied.
pub fn list_keys(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn.prepare("SELECT tournament_key FROM tournaments ORDER BY id")?;
    let keys = stmt
        .query_map([], |row| row.get(0))?
        .collect::<rusqlite::Result<Vec<String>>>()
        .context("Failed to read applied tournaments")?;

    Ok(keys)
}
