use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::scoring::ScoringConfig;
use crate::table::DEFAULT_BROWSE_LIMIT;

pub const DEFAULT_TOP_K: usize = 10;
pub const DEFAULT_PROGRAMS_PATH: &str = "programs.csv";
pub const DEFAULT_WORLD_RANKINGS_PATH: &str = "world_rankings.csv";

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

fn default_browse_limit() -> usize {
    DEFAULT_BROWSE_LIMIT
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub data: DataConfig,
    #[serde(default)]
    pub scoring: Option<ScoringConfig>,
    /// Number of programs `top` shows
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    #[serde(default = "default_browse_limit")]
    pub browse_limit: usize,
    /// States `top` is restricted to; empty means all
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub regions: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data: DataConfig::default(),
            scoring: None,
            top_k: DEFAULT_TOP_K,
            browse_limit: DEFAULT_BROWSE_LIMIT,
            regions: Vec::new(),
        }
    }
}

impl Config {
    pub fn scoring(&self) -> ScoringConfig {
        self.scoring.clone().unwrap_or_default()
    }
}

/// Locations of the source CSV files. Relative paths resolve against the
/// working directory.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct DataConfig {
    #[serde(default = "default_programs_path")]
    pub programs: PathBuf,
    #[serde(default = "default_world_rankings_path")]
    pub world_rankings: PathBuf,
}

fn default_programs_path() -> PathBuf {
    PathBuf::from(DEFAULT_PROGRAMS_PATH)
}

fn default_world_rankings_path() -> PathBuf {
    PathBuf::from(DEFAULT_WORLD_RANKINGS_PATH)
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            programs: default_programs_path(),
            world_rankings: default_world_rankings_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_uses_defaults() {
        let config: Config = serde_saphyr::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.scoring().weights().rank, 0.5);
    }

    #[test]
    fn test_full_yaml() {
        let yaml = r#"
data:
  programs: /srv/phd/programs.csv
  world_rankings: /srv/phd/world.csv
scoring:
  rank: 0.6
  tuition: 0.2
  stipend: 0.2
top_k: 5
browse_limit: 25
regions:
  - CA
  - NY
"#;
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.data.programs, PathBuf::from("/srv/phd/programs.csv"));
        assert_eq!(config.data.world_rankings, PathBuf::from("/srv/phd/world.csv"));
        assert_eq!(config.scoring().weights().rank, 0.6);
        assert_eq!(config.top_k, 5);
        assert_eq!(config.browse_limit, 25);
        assert_eq!(config.regions, vec!["CA", "NY"]);
    }

    #[test]
    fn test_partial_data_section() {
        let yaml = "data:\n  programs: mine.csv\n";
        let config: Config = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(config.data.programs, PathBuf::from("mine.csv"));
        assert_eq!(config.data.world_rankings, PathBuf::from(DEFAULT_WORLD_RANKINGS_PATH));
    }

    #[test]
    fn test_unknown_scoring_key_rejected() {
        let yaml = "scoring:\n  prestige: 0.4\n";
        assert!(serde_saphyr::from_str::<Config>(yaml).is_err());
    }
}
