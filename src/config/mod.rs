pub mod init;
mod schema;

pub use init::run_init_wizard;
pub use schema::{
    Config, DataConfig, DEFAULT_PROGRAMS_PATH, DEFAULT_TOP_K, DEFAULT_WORLD_RANKINGS_PATH,
};

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::debug;

use crate::scoring::validate_scoring;

/// Get the config directory path (~/.config/doctorate-discover/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("doctorate-discover"))
}

/// Get the default config file path (~/.config/doctorate-discover/config.yaml)
pub fn get_config_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("config.yaml"))
}

/// Load configuration from a YAML file
///
/// # Arguments
///
/// * `path` - Optional path to config file. If None, uses the default path
///   and falls back to built-in defaults when that file does not exist.
///
/// # Errors
///
/// Returns an error if:
/// - An explicitly given config file does not exist
/// - The config file cannot be read
/// - The YAML cannot be parsed
pub fn load_config(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Config file not found at {}", p.display());
            }
            p
        }
        None => {
            let default_path = match get_config_path() {
                Ok(p) => p,
                Err(_) => return Ok(Config::default()),
            };
            if !default_path.exists() {
                debug!(path = %default_path.display(), "no config file, using defaults");
                return Ok(Config::default());
            }
            default_path
        }
    };

    let config_content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read config file at {}", config_path.display()))?;

    let config: Config = serde_saphyr::from_str(&config_content)
        .with_context(|| format!("Failed to parse config: invalid YAML in {}", config_path.display()))?;

    debug!(path = %config_path.display(), "loaded config");
    Ok(config)
}

/// Validate a loaded configuration.
/// Returns all validation errors at once (not just the first).
pub fn validate_config(config: &Config) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    if let Some(scoring) = &config.scoring {
        if let Err(scoring_errors) = validate_scoring(scoring) {
            errors.extend(scoring_errors);
        }
    }
    if config.top_k == 0 {
        errors.push("top_k: must be at least 1".to_string());
    }
    if config.browse_limit == 0 {
        errors.push("browse_limit: must be at least 1".to_string());
    }
    for region in &config.regions {
        if region.trim().is_empty() {
            errors.push("regions: entries must not be blank".to_string());
            break;
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoringConfig;
    use std::env;

    #[test]
    fn test_load_explicit_missing_file_errors() {
        let path = env::temp_dir().join("doctorate_discover_test_missing_config.yaml");
        let _ = fs::remove_file(&path);

        let err = load_config(Some(path)).unwrap_err();
        assert!(err.to_string().contains("Config file not found"));
    }

    #[test]
    fn test_load_explicit_file() {
        let path = env::temp_dir().join("doctorate_discover_test_config.yaml");
        fs::write(&path, "top_k: 3\nscoring:\n  rank: 1.0\n  tuition: 0.0\n  stipend: 0.0\n").unwrap();

        let config = load_config(Some(path.clone())).unwrap();
        assert_eq!(config.top_k, 3);
        assert_eq!(config.scoring().weights().rank, 1.0);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_invalid_yaml() {
        let path = env::temp_dir().join("doctorate_discover_test_bad_config.yaml");
        fs::write(&path, "top_k: [not, a, number]\n").unwrap();

        let err = load_config(Some(path.clone())).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_validate_default_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_validate_collects_all_errors() {
        let config = Config {
            scoring: Some(ScoringConfig {
                rank: Some(2.0),
                tuition: None,
                stipend: Some(-1.0),
            }),
            top_k: 0,
            regions: vec![" ".to_string()],
            ..Default::default()
        };
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.iter().any(|e| e.starts_with("top_k")));
        assert!(errors.iter().any(|e| e.starts_with("regions")));
    }
}
