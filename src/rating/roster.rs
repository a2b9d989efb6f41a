use std::collections::{HashMap, HashSet};

use super::competitor::{Competitor, CompetitorId};
use crate::errors::{RatingError, RatingResult};

/// Owns every competitor of a run, keyed by canonical name.
///
/// Ids are dense indices into `competitors`; competitors are never removed.
/// `applied` lists the keys of tournaments already folded in, in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Roster {
    competitors: Vec<Competitor>,
    by_name: HashMap<String, CompetitorId>,
    applied: Vec<String>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a roster from previously persisted competitors.
    ///
    /// Competitors must arrive with ids `0..n` in order.
    pub fn from_parts(competitors: Vec<Competitor>, applied: Vec<String>) -> anyhow::Result<Self> {
        let mut by_name = HashMap::with_capacity(competitors.len());
        for (idx, competitor) in competitors.iter().enumerate() {
            if competitor.id.0 as usize != idx {
                anyhow::bail!(
                    "Competitor '{}' has id {} but sits at position {}",
                    competitor.name,
                    competitor.id,
                    idx
                );
            }
            if by_name.insert(competitor.name.clone(), competitor.id).is_some() {
                anyhow::bail!("Duplicate competitor name '{}'", competitor.name);
            }
        }
        let mut seen = HashSet::with_capacity(applied.len());
        if let Some(key) = applied.iter().find(|key| !seen.insert(key.as_str())) {
            anyhow::bail!("Tournament '{}' is recorded as applied twice", key);
        }
        Ok(Self {
            competitors,
            by_name,
            applied,
        })
    }

    /// Look up a canonical name, creating the competitor on first sight.
    pub fn get_or_create(&mut self, canonical_name: &str, default_rating: f64) -> CompetitorId {
        if let Some(&id) = self.by_name.get(canonical_name) {
            return id;
        }
        let id = CompetitorId(self.competitors.len() as u32);
        self.competitors
            .push(Competitor::new(id, canonical_name, default_rating));
        self.by_name.insert(canonical_name.to_string(), id);
        id
    }

    pub fn id_of(&self, canonical_name: &str) -> Option<CompetitorId> {
        self.by_name.get(canonical_name).copied()
    }

    pub fn find(&self, canonical_name: &str) -> RatingResult<&Competitor> {
        self.id_of(canonical_name)
            .map(|id| self.get(id))
            .ok_or_else(|| RatingError::UnknownCompetitor {
                name: canonical_name.to_string(),
            })
    }

    pub fn get(&self, id: CompetitorId) -> &Competitor {
        &self.competitors[id.0 as usize]
    }

    pub fn get_mut(&mut self, id: CompetitorId) -> &mut Competitor {
        &mut self.competitors[id.0 as usize]
    }

    pub fn name_of(&self, id: CompetitorId) -> &str {
        &self.get(id).name
    }

    /// Borrow two distinct competitors mutably at once.
    pub fn pair_mut(
        &mut self,
        first: CompetitorId,
        second: CompetitorId,
    ) -> (&mut Competitor, &mut Competitor) {
        let (a, b) = (first.0 as usize, second.0 as usize);
        assert_ne!(a, b, "a competitor cannot play itself");
        if a < b {
            let (left, right) = self.competitors.split_at_mut(b);
            (&mut left[a], &mut right[0])
        } else {
            let (left, right) = self.competitors.split_at_mut(a);
            (&mut right[0], &mut left[b])
        }
    }

    pub fn len(&self) -> usize {
        self.competitors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.competitors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Competitor> {
        self.competitors.iter()
    }

    /// Every competitor, in creation order.
    pub fn all(&self) -> Vec<&Competitor> {
        self.competitors.iter().collect()
    }

    pub fn is_applied(&self, tournament_key: &str) -> bool {
        self.applied.iter().any(|key| key == tournament_key)
    }

    pub fn mark_applied(&mut self, tournament_key: &str) {
        if !self.is_applied(tournament_key) {
            self.applied.push(tournament_key.to_string());
        }
    }

    /// Keys of every tournament folded into this roster, oldest first.
    pub fn applied_tournaments(&self) -> &[String] {
        &self.applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_create_is_unique_per_name() {
        let mut roster = Roster::new();
        let a = roster.get_or_create("NERFAN", 1200.0);
        let b = roster.get_or_create("MANGO", 1200.0);
        let again = roster.get_or_create("NERFAN", 1500.0);

        assert_eq!(a, again);
        assert_ne!(a, b);
        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get(a).rating, 1200.0);
    }

    #[test]
    fn test_pair_mut_in_both_orders() {
        let mut roster = Roster::new();
        let a = roster.get_or_create("A", 1200.0);
        let b = roster.get_or_create("B", 1200.0);

        let (x, y) = roster.pair_mut(b, a);
        assert_eq!((x.name.as_str(), y.name.as_str()), ("B", "A"));
        let (x, y) = roster.pair_mut(a, b);
        assert_eq!((x.name.as_str(), y.name.as_str()), ("A", "B"));
    }

    #[test]
    fn test_find_unknown_name() {
        let roster = Roster::new();
        assert_eq!(
            roster.find("NOBODY").unwrap_err(),
            RatingError::UnknownCompetitor {
                name: "NOBODY".to_string()
            }
        );
    }

    #[test]
    fn test_from_parts_rejects_gaps() {
        let competitors = vec![Competitor::new(CompetitorId(1), "A", 1200.0)];
        assert!(Roster::from_parts(competitors, Vec::new()).is_err());
    }

    #[test]
    fn test_applied_tournaments_are_unique() {
        let mut roster = Roster::new();
        roster.mark_applied("weekly1");
        roster.mark_applied("weekly2");
        roster.mark_applied("weekly1");

        assert!(roster.is_applied("weekly1"));
        assert!(!roster.is_applied("weekly3"));
        assert_eq!(roster.applied_tournaments(), ["weekly1", "weekly2"]);

        let twice = vec!["weekly1".to_string(), "weekly1".to_string()];
        assert!(Roster::from_parts(Vec::new(), twice).is_err());
    }
}
