//! Run configuration loaded from a JSON file.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Operator-supplied settings for one reroll run.
///
/// Anything not present in the file keeps its default; the CLI may override
/// individual fields on top of that.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Console address, `host:port`.
    pub address: String,
    /// Game profile name (`swsh`, `bdsp`, `la`, `sv`).
    pub game: String,
    /// Acceptance patterns; empty means the profile defaults.
    pub patterns: Vec<String>,
    /// Fail the run after this many restarts. Absent means unbounded, which
    /// is the historical behavior.
    pub max_restarts: Option<u32>,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            address: "192.168.0.1:6000".to_string(),
            game: "swsh".to_string(),
            patterns: Vec::new(),
            max_restarts: None,
        }
    }
}

impl RunConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("reroll.json");

        let config = RunConfig {
            address: "10.0.0.7:6000".to_string(),
            game: "sv".to_string(),
            patterns: vec!["9xxxxx".to_string()],
            max_restarts: Some(200),
        };
        config.save(&path).unwrap();

        let loaded = RunConfig::load(&path).unwrap();
        assert_eq!(loaded.address, "10.0.0.7:6000");
        assert_eq!(loaded.game, "sv");
        assert_eq!(loaded.patterns, vec!["9xxxxx"]);
        assert_eq!(loaded.max_restarts, Some(200));
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        fs::write(&path, r#"{ "game": "bdsp" }"#).unwrap();

        let loaded = RunConfig::load(&path).unwrap();
        assert_eq!(loaded.game, "bdsp");
        assert_eq!(loaded.address, RunConfig::default().address);
        assert!(loaded.patterns.is_empty());
        assert_eq!(loaded.max_restarts, None);
    }

    #[test]
    fn test_load_missing_file_fails() {
        assert!(RunConfig::load("/definitely/not/here.json").is_err());
    }
}
