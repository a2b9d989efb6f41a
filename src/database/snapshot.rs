use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use rusqlite::Connection;

use super::connection::{create_pool, get_connection};
use super::models::Outcome;
use super::{competitors, head_to_head, placements, setup, tournaments};
use crate::rating::{Competitor, CompetitorId, Placement, Roster, SetRecord};

/// Persist the whole roster, replacing `path` atomically.
pub fn save_snapshot(path: &Path, roster: &Roster) -> Result<()> {
    let temp_path = temp_path_for(path);
    if temp_path.exists() {
        std::fs::remove_file(&temp_path)?;
    }
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }

    {
        let pool = create_pool(&temp_path)?;
        let mut conn = get_connection(&pool)?;
        write_roster(&mut conn, roster)?;
    }

    std::fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to move snapshot into {}", path.display()))?;
    info!("Saved {} competitors to {}", roster.len(), path.display());
    Ok(())
}

pub fn load_snapshot(path: &Path) -> Result<Roster> {
    if !path.exists() {
        anyhow::bail!(
            "No snapshot at {}; run `calculate` first",
            path.display()
        );
    }
    let pool = create_pool(path)?;
    let conn = get_connection(&pool)?;
    let roster = read_roster(&conn)
        .with_context(|| format!("Failed to load snapshot {}", path.display()))?;
    info!("Loaded {} competitors from {}", roster.len(), path.display());
    Ok(roster)
}

pub fn write_roster(conn: &mut Connection, roster: &Roster) -> Result<()> {
    let tx = conn.transaction()?;
    setup::reset_database(&tx)?;

    for key in roster.applied_tournaments() {
        tournaments::insert_tournament(&tx, key)?;
    }
    for competitor in roster.iter() {
        competitors::insert_competitor(&tx, competitor)?;
    }
    for competitor in roster.iter() {
        for placement in &competitor.placements {
            placements::insert_placement(&tx, competitor.id, placement)?;
        }
        for (opponent, sets) in &competitor.h2h_wins {
            for set in sets {
                head_to_head::insert_set(&tx, competitor.id, *opponent, Outcome::Win, set)?;
            }
        }
        for (opponent, sets) in &competitor.h2h_losses {
            for set in sets {
                head_to_head::insert_set(&tx, competitor.id, *opponent, Outcome::Loss, set)?;
            }
        }
    }

    tx.commit().context("Failed to commit snapshot")
}

pub fn read_roster(conn: &Connection) -> Result<Roster> {
    let mut roster: Vec<Competitor> = competitors::list_all(conn)?
        .into_iter()
        .map(|row| Competitor {
            games_won: row.games_won,
            games_played: row.games_played,
            earnings: row.earnings,
            ..Competitor::new(CompetitorId(row.id), row.name, row.rating)
        })
        .collect();

    for row in placements::list_all(conn)? {
        let competitor = slot(&mut roster, row.competitor_id)?;
        competitor.placements.push(Placement {
            tournament: row.tournament,
            entrants: row.entrants,
            rank: row.final_rank,
        });
    }

    for row in head_to_head::list_all(conn)? {
        let outcome = Outcome::parse(&row.outcome)
            .with_context(|| format!("Unknown outcome '{}'", row.outcome))?;
        let opponent = CompetitorId(row.opponent_id);
        let set = SetRecord {
            tournament: row.tournament,
            score: row.score,
            played_at: row.played_at,
        };
        let competitor = slot(&mut roster, row.competitor_id)?;
        let log = match outcome {
            Outcome::Win => &mut competitor.h2h_wins,
            Outcome::Loss => &mut competitor.h2h_losses,
        };
        log.entry(opponent).or_default().push(set);
    }

    Roster::from_parts(roster, tournaments::list_keys(conn)?)
}

fn slot(roster: &mut [Competitor], id: u32) -> Result<&mut Competitor> {
    roster
        .get_mut(id as usize)
        .with_context(|| format!("Snapshot references unknown competitor {}", id))
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".tmp");
    PathBuf::from(name)
}
