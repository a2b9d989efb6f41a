use std::cmp::Ordering;
use std::fmt::Write as _;

use crate::errors::RatingResult;
use crate::rating::{AliasTable, Roster};

#[derive(Debug, Clone, PartialEq)]
pub struct SeedEntry {
    pub entrant: String,
    pub canonical_name: String,
    pub rating: f64,
    pub rated: bool,
}

/// Seed order for an upcoming bracket, strongest first.
///
/// Entrants missing from the roster are placed at `unrated_rating`. Equal
/// ratings keep sign-up order.
pub fn seed_order<I, S>(
    roster: &Roster,
    aliases: &AliasTable,
    entrants: I,
    unrated_rating: f64,
) -> RatingResult<Vec<SeedEntry>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seeds = entrants
        .into_iter()
        .map(|entrant| {
            let entrant = entrant.as_ref();
            let canonical_name = aliases.resolve(entrant)?;
            let rated = roster.id_of(&canonical_name).map(|id| roster.get(id).rating);
            Ok(SeedEntry {
                entrant: entrant.trim().to_string(),
                canonical_name,
                rating: rated.unwrap_or(unrated_rating),
                rated: rated.is_some(),
            })
        })
        .collect::<RatingResult<Vec<_>>>()?;

    seeds.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal));
    Ok(seeds)
}

pub fn render_seeds(seeds: &[SeedEntry]) -> String {
    let mut out = String::new();
    for (idx, seed) in seeds.iter().enumerate() {
        let marker = if seed.rated { "" } else { " (unrated)" };
        let _ = writeln!(
            out,
            "{:>3}. {:20} {:.0}{}",
            idx + 1,
            seed.entrant,
            seed.rating,
            marker
        );
    }
    out
}
