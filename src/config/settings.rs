use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use log::info;
use serde::Deserialize;

use crate::rating::AliasTable;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RatingSettings {
    pub default_rating: f64,
    pub k_factor: f64,
    pub entry_fee: f64,
    /// Rating distance within which a win or loss counts as notable.
    pub notable_margin: f64,
    pub matrix_size: usize,
    pub unrated_seed_rating: f64,
}

impl Default for RatingSettings {
    fn default() -> Self {
        Self {
            default_rating: 1200.0,
            k_factor: 32.0,
            entry_fee: 5.0,
            notable_margin: 80.0,
            matrix_size: 15,
            unrated_seed_rating: 1000.0,
        }
    }
}

pub const API_KEY_ENV: &str = "CHALLONGE_API_KEY";

/// API key from the environment; never read from the config file.
pub fn api_key() -> Result<String> {
    std::env::var(API_KEY_ENV).with_context(|| format!("{} is not set", API_KEY_ENV))
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SourceSettings {
    pub api_base_url: String,
    pub username: String,
    pub rate_limit_ms: u64,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub cache_dir: PathBuf,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.challonge.com/v1".to_string(),
            username: String::new(),
            rate_limit_ms: 250, // 4 req/sec
            user_agent: "BracketElo/1.0".to_string(),
            timeout_secs: 30,
            cache_dir: PathBuf::from("cache"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    pub output_dir: PathBuf,
    pub snapshot_path: PathBuf,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("output"),
            snapshot_path: PathBuf::from("output").join("ratings.db"),
        }
    }
}

impl OutputSettings {
    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join("elos.txt")
    }

    pub fn summaries_path(&self) -> PathBuf {
        self.output_dir.join("summaries.txt")
    }

    pub fn matrix_path(&self) -> PathBuf {
        self.output_dir.join("matchups.csv")
    }

    pub fn matrix_sheet_path(&self) -> PathBuf {
        self.output_dir.join("matchups.xlsx")
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub rating: RatingSettings,
    pub source: SourceSettings,
    pub output: OutputSettings,
    /// Tournament identifiers in processing order.
    pub tournaments: Vec<String>,
    /// Raw display name -> replacement name.
    pub aliases: BTreeMap<String, String>,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file; a missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No config at {}, using defaults", path.display());
                return Ok(Self::new());
            }
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read config at {}", path.display()));
            }
        };
        Self::parse(&content).with_context(|| format!("Failed to parse config at {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        Ok(config)
    }

    pub fn alias_table(&self) -> Result<AliasTable> {
        AliasTable::from_config(&self.aliases).context("Invalid alias table")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::new();
        assert_eq!(config.rating.default_rating, 1200.0);
        assert_eq!(config.rating.k_factor, 32.0);
        assert!(config.tournaments.is_empty());
    }

    #[test]
    fn test_parse_partial_config() {
        let config = AppConfig::parse(
            r#"
            tournaments = ["wfw6r2aw", "lvrpool1"]

            [rating]
            entry_fee = 10.0

            [aliases]
            "Jeremy Lefurge" = "Nerfan"
            "#,
        )
        .unwrap();

        assert_eq!(config.tournaments, vec!["wfw6r2aw", "lvrpool1"]);
        assert_eq!(config.rating.entry_fee, 10.0);
        assert_eq!(config.rating.k_factor, 32.0);
        assert_eq!(config.source.rate_limit_ms, 250);
        let aliases = config.alias_table().unwrap();
        assert_eq!(aliases.resolve("JEREMY LEFURGE").unwrap(), "NERFAN");
    }

    #[test]
    fn test_alias_cycle_in_config() {
        let config = AppConfig::parse(
            r#"
            [aliases]
            "A" = "B"
            "B" = "A"
            "#,
        )
        .unwrap();
        assert!(config.alias_table().is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("bracket_elo_no_such_config.toml");
        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.output.output_dir, PathBuf::from("output"));
    }
}
