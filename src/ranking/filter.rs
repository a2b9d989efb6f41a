use std::cmp::Ordering;
use std::collections::HashSet;

use crate::errors::RatingResult;
use crate::rating::{AliasTable, Competitor};

/// A selection criterion applied to a rating list after computation.
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    MinGames(u32),
    MinWins(u32),
    MinTournaments(usize),
    MinRating(f64),
    /// Keep the `n` highest-rated entries.
    Top(usize),
    /// Keep only the listed canonical names.
    Include(HashSet<String>),
}

impl Filter {
    /// Build an allow-list filter, resolving each raw name through `aliases`.
    pub fn include<I, S>(names: I, aliases: &AliasTable) -> RatingResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let resolved = names
            .into_iter()
            .filter(|n| !n.as_ref().trim().is_empty())
            .map(|n| aliases.resolve(n.as_ref()))
            .collect::<RatingResult<HashSet<_>>>()?;
        Ok(Filter::Include(resolved))
    }

    pub fn apply<'a>(&self, list: Vec<&'a Competitor>) -> Vec<&'a Competitor> {
        match self {
            Filter::MinGames(min) => keep(list, |c| c.games_played >= *min),
            Filter::MinWins(min) => keep(list, |c| c.games_won >= *min),
            Filter::MinTournaments(min) => keep(list, |c| c.placements.len() >= *min),
            Filter::MinRating(min) => keep(list, |c| c.rating >= *min),
            Filter::Include(names) => keep(list, |c| names.contains(&c.name)),
            Filter::Top(n) => {
                let mut sorted = sorted_by_rating(list);
                sorted.truncate(*n);
                sorted
            }
        }
    }
}

fn keep<'a>(list: Vec<&'a Competitor>, predicate: impl Fn(&Competitor) -> bool) -> Vec<&'a Competitor> {
    list.into_iter().filter(|c| predicate(c)).collect()
}

/// Highest rating first; equal ratings keep their input order.
pub fn sorted_by_rating(mut list: Vec<&Competitor>) -> Vec<&Competitor> {
    list.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal));
    list
}

/// Filters applied in sequence.
#[derive(Debug, Clone, Default)]
pub struct FilterPipeline {
    filters: Vec<Filter>,
}

impl FilterPipeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, filter: Filter) -> &mut Self {
        self.filters.push(filter);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    pub fn apply<'a>(&self, list: Vec<&'a Competitor>) -> Vec<&'a Competitor> {
        self.filters
            .iter()
            .fold(list, |current, filter| filter.apply(current))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::CompetitorId;

    fn competitor(id: u32, name: &str, rating: f64, won: u32, played: u32) -> Competitor {
        Competitor {
            games_won: won,
            games_played: played,
            ..Competitor::new(CompetitorId(id), name, rating)
        }
    }

    fn sample() -> Vec<Competitor> {
        vec![
            competitor(0, "A", 1250.0, 8, 10),
            competitor(1, "B", 1300.0, 2, 3),
            competitor(2, "C", 1250.0, 5, 12),
            competitor(3, "D", 1100.0, 0, 9),
        ]
    }

    fn names(list: &[&Competitor]) -> Vec<String> {
        list.iter().map(|c| c.name.clone()).collect()
    }

    #[test]
    fn test_threshold_filters_keep_input_order() {
        let all = sample();
        let list: Vec<&Competitor> = all.iter().collect();

        assert_eq!(names(&Filter::MinGames(9).apply(list.clone())), ["A", "C", "D"]);
        assert_eq!(names(&Filter::MinWins(5).apply(list.clone())), ["A", "C"]);
        assert_eq!(names(&Filter::MinRating(1250.0).apply(list.clone())), ["A", "B", "C"]);
        assert!(Filter::MinTournaments(1).apply(list).is_empty());
    }

    #[test]
    fn test_top_sorts_and_breaks_ties_by_input_order() {
        let all = sample();
        let list: Vec<&Competitor> = all.iter().collect();

        let top = Filter::Top(3).apply(list.clone());
        assert_eq!(names(&top), ["B", "A", "C"]);
        assert_eq!(Filter::Top(10).apply(list).len(), 4);
    }

    #[test]
    fn test_top_is_idempotent() {
        let all = sample();
        let once = Filter::Top(2).apply(all.iter().collect());
        let twice = Filter::Top(2).apply(once.clone());
        assert_eq!(names(&once), names(&twice));
    }

    #[test]
    fn test_include_resolves_aliases() {
        let mut aliases = AliasTable::new();
        aliases.insert("alpha", "A");
        let all = sample();

        let filter = Filter::include(["alpha", "d", ""], &aliases).unwrap();
        assert_eq!(names(&filter.apply(all.iter().collect())), ["A", "D"]);
    }

    #[test]
    fn test_pipeline_applies_in_order() {
        let all = sample();
        let mut pipeline = FilterPipeline::new();
        pipeline.push(Filter::MinGames(5)).push(Filter::Top(2));

        assert_eq!(names(&pipeline.apply(all.iter().collect())), ["A", "C"]);
        assert!(all.iter().all(|c| c.games_played > 0));
    }
}
