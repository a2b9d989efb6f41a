use std::collections::{BTreeMap, HashMap, HashSet};

use crate::errors::{RatingError, RatingResult};

/// Name replacements applied before a competitor is looked up.
///
/// Keys and values are stored normalized (trimmed, uppercased). Chains are
/// followed transitively, so `A -> B` and `B -> C` resolve `A` to `C`.
#[derive(Debug, Clone, Default)]
pub struct AliasTable {
    replacements: HashMap<String, String>,
}

impl AliasTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from raw configuration.
    ///
    /// Rejects keys that differ only by case or surrounding whitespace, and
    /// chains that loop.
    pub fn from_config(raw: &BTreeMap<String, String>) -> RatingResult<Self> {
        let mut replacements = HashMap::with_capacity(raw.len());
        for (from, to) in raw {
            let key = normalize(from);
            if replacements.contains_key(&key) {
                return Err(RatingError::DuplicateAlias { name: key });
            }
            replacements.insert(key, normalize(to));
        }
        let table = Self { replacements };
        table.validate()?;
        Ok(table)
    }

    pub fn insert(&mut self, from: &str, to: &str) {
        self.replacements.insert(normalize(from), normalize(to));
    }

    /// Resolve a raw display name to its canonical form.
    pub fn resolve(&self, raw_name: &str) -> RatingResult<String> {
        let mut name = normalize(raw_name);
        let mut seen = HashSet::new();
        let mut chain = vec![name.clone()];

        while let Some(next) = self.replacements.get(&name) {
            if !seen.insert(name.clone()) {
                return Err(RatingError::AliasCycle { chain });
            }
            chain.push(next.clone());
            name = next.clone();
        }

        Ok(name)
    }

    fn validate(&self) -> RatingResult<()> {
        for from in self.replacements.keys() {
            self.resolve(from)?;
        }
        Ok(())
    }
}

fn normalize(name: &str) -> String {
    name.trim().to_uppercase()
}
