use anyhow::{Context, Result};
use log::{debug, info};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Parsed-tier key holding the ordered tournament list.
pub const TOURNAMENTS_KEY: &str = "tournaments";

#[derive(Debug, Clone, Copy)]
enum Tier {
    /// Responses exactly as the service returned them.
    Raw,
    /// Source-agnostic records ready for rating.
    Parsed,
}

impl Tier {
    fn dir_name(self) -> &'static str {
        match self {
            Tier::Raw => "raw",
            Tier::Parsed => "parsed",
        }
    }
}

/// Two-tier JSON file cache rooted at one directory.
pub struct Cache {
    root: PathBuf,
}

impl Cache {
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let cache = Self {
            root: root.as_ref().to_path_buf(),
        };
        for tier in [Tier::Raw, Tier::Parsed] {
            let dir = cache.root.join(tier.dir_name());
            fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create cache directory {}", dir.display()))?;
        }
        Ok(cache)
    }

    pub fn save_raw(&self, tournament_key: &str, data: &Value) -> Result<()> {
        let path = self.entry_path(Tier::Raw, tournament_key);
        write_json(&path, data)?;
        debug!("Cached raw response at {}", path.display());
        Ok(())
    }

    pub fn load_raw(&self, tournament_key: &str) -> Result<Option<Value>> {
        read_json(&self.entry_path(Tier::Raw, tournament_key))
    }

    pub fn has_raw(&self, tournament_key: &str) -> bool {
        self.entry_path(Tier::Raw, tournament_key).exists()
    }

    pub fn save_parsed<T: Serialize>(&self, key: &str, data: &T) -> Result<()> {
        let path = self.entry_path(Tier::Parsed, key);
        write_json(&path, data)?;
        info!("Saved parsed data to cache: {}", path.display());
        Ok(())
    }

    pub fn load_parsed<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        read_json(&self.entry_path(Tier::Parsed, key))
    }

    /// Tournament keys may contain `/`, so file names are percent-encoded.
    fn entry_path(&self, tier: Tier, key: &str) -> PathBuf {
        self.root
            .join(tier.dir_name())
            .join(format!("{}.json", urlencoding::encode(key)))
    }
}

fn write_json<T: Serialize>(path: &Path, data: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json).with_context(|| format!("Failed to write cache file {}", path.display()))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>> {
    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to read cache file {}", path.display()))?;
    let data = serde_json::from_str(&json).with_context(|| {
        format!(
            "Failed to parse JSON from {}. First 200 chars: {}",
            path.display(),
            json.chars().take(200).collect::<String>()
        )
    })?;
    Ok(Some(data))
}
