use std::collections::HashSet;

use super::models::TournamentRecord;

/// Tournaments in processing order, at most one per id.
///
/// Ratings are path-dependent, so insertion order is preserved.
pub struct TournamentCollection {
    tournaments: Vec<TournamentRecord>,
    seen: HashSet<i64>,
}

impl TournamentCollection {
    pub fn new() -> Self {
        Self {
            tournaments: Vec::new(),
            seen: HashSet::new(),
        }
    }

    /// Append a tournament. Returns `false` if it was already present.
    pub fn add(&mut self, tournament: TournamentRecord) -> bool {
        if !self.seen.insert(tournament.id) {
            return false;
        }
        self.tournaments.push(tournament);
        true
    }

    pub fn len(&self) -> usize {
        self.tournaments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tournaments.is_empty()
    }

    pub fn into_vec(self) -> Vec<TournamentRecord> {
        self.tournaments
    }
}

impl Default for TournamentCollection {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tournament(id: i64) -> TournamentRecord {
        TournamentRecord {
            id,
            key: format!("t{id}"),
            name: format!("Tournament {id}"),
            entrant_count: 0,
            participants: Vec::new(),
            matches: Vec::new(),
        }
    }

    #[test]
    fn test_keeps_insertion_order_and_drops_duplicates() {
        let mut collection = TournamentCollection::new();
        assert!(collection.add(tournament(3)));
        assert!(collection.add(tournament(1)));
        assert!(!collection.add(tournament(3)));

        assert_eq!(collection.len(), 2);
        let keys: Vec<String> = collection.into_vec().into_iter().map(|t| t.key).collect();
        assert_eq!(keys, ["t3", "t1"]);
    }
}
