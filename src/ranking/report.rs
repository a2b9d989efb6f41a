use std::collections::BTreeSet;
use std::fmt::Write as _;

use super::filter::sorted_by_rating;
use crate::rating::{Competitor, CompetitorId, Roster};

pub const REPORT_HEADER: &str = "    NAME                  ELO    W    G     W/G     AVG";

/// Fixed-width ranked listing, highest rating first.
pub fn ranked_report(list: &[&Competitor]) -> String {
    format!("{}\n{}", REPORT_HEADER, ranked_rows(list))
}

/// Report rows without the header line.
pub fn ranked_rows(list: &[&Competitor]) -> String {
    let mut out = String::new();
    for (idx, competitor) in sorted_by_rating(list.to_vec()).iter().enumerate() {
        let _ = writeln!(out, "{:>3} {}", idx + 1, ranked_line(competitor));
    }
    out
}

fn ranked_line(c: &Competitor) -> String {
    let average = c
        .average_placement()
        .map_or_else(|| "-".to_string(), |avg| format!("{:.2}", avg));
    format!(
        "{:20} {:0>4.0} {:>4} {:>4} {:>7.3} {:>7}",
        c.name,
        c.rating,
        c.games_won,
        c.games_played,
        c.win_ratio(),
        average
    )
}

/// Win-loss tally against every opponent faced.
pub fn head_to_head_list(roster: &Roster, competitor: &Competitor) -> String {
    let mut out = format!("{}'s head-to-head records:\n", competitor.name);
    for opponent in competitor.opponents() {
        let (wins, losses) = competitor.record_against(opponent);
        let _ = writeln!(out, "{:20}: {}-{}", roster.name_of(opponent), wins, losses);
    }
    out
}

/// Every set between two competitors with date and score.
pub fn head_to_head_details(roster: &Roster, competitor: &Competitor, opponent: CompetitorId) -> String {
    let opponent_name = roster.name_of(opponent);
    if competitor.record_against(opponent) == (0, 0) {
        return format!("No matches against {} recorded.", opponent_name);
    }

    let mut out = format!(
        "{}'s detailed head-to-head against {}:\n",
        competitor.name, opponent_name
    );
    for (label, log) in [("Wins", &competitor.h2h_wins), ("Losses", &competitor.h2h_losses)] {
        let _ = writeln!(out, "{}:", label);
        for set in log.get(&opponent).into_iter().flatten() {
            let date = set
                .played_at
                .map_or_else(|| "unknown date".to_string(), |d| d.format("%Y-%m-%d").to_string());
            let _ = writeln!(out, "{}: {} ({})", date, set.score, set.tournament);
        }
    }
    out
}

/// Narrative summary: standing, record, placements and notable sets.
///
/// A win is notable when the opponent was rated no more than `margin` below
/// the competitor; a loss is notable when the opponent was rated no more
/// than `margin` above.
pub fn summary(roster: &Roster, competitor: &Competitor, rank: usize, margin: f64) -> String {
    let mut out = format!(
        "{}. {} ({:.0}) - {}-{} in sets ({:.1}%), ${:.2} earned\n",
        rank,
        competitor.name,
        competitor.rating,
        competitor.games_won,
        competitor.games_lost(),
        competitor.win_ratio() * 100.0,
        competitor.earnings
    );

    if !competitor.placements.is_empty() {
        let placements: Vec<String> = competitor
            .placements
            .iter()
            .map(|p| format!("{} of {} at '{}'", p.ordinal(), p.entrants, p.tournament))
            .collect();
        let _ = writeln!(out, "   Placements: {}", placements.join(", "));
    }

    let wins = notable(roster, competitor.h2h_wins.keys(), |rating| {
        rating >= competitor.rating - margin
    });
    if !wins.is_empty() {
        let _ = writeln!(out, "   Notable wins: {}", wins.join(", "));
    }

    let losses = notable(roster, competitor.h2h_losses.keys(), |rating| {
        rating <= competitor.rating + margin
    });
    if !losses.is_empty() {
        let _ = writeln!(out, "   Notable losses: {}", losses.join(", "));
    }

    out
}

/// Summaries for a whole list, ranked by rating.
pub fn summaries(roster: &Roster, list: &[&Competitor], margin: f64) -> String {
    sorted_by_rating(list.to_vec())
        .iter()
        .enumerate()
        .map(|(idx, c)| summary(roster, c, idx + 1, margin))
        .collect::<Vec<_>>()
        .join("\n")
}

fn notable<'a>(
    roster: &Roster,
    opponents: impl Iterator<Item = &'a CompetitorId>,
    qualifies: impl Fn(f64) -> bool,
) -> Vec<String> {
    let ids: BTreeSet<CompetitorId> = opponents.copied().collect();
    let picked: Vec<&Competitor> = ids
        .into_iter()
        .map(|id| roster.get(id))
        .filter(|opponent| qualifies(opponent.rating))
        .collect();
    sorted_by_rating(picked)
        .iter()
        .map(|o| format!("{} ({:.0})", o.name, o.rating))
        .collect()
}
