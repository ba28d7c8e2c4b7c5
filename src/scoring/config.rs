use serde::{Deserialize, Serialize};

pub const DEFAULT_RANK_WEIGHT: f64 = 0.5;
pub const DEFAULT_TUITION_WEIGHT: f64 = 0.3;
pub const DEFAULT_STIPEND_WEIGHT: f64 = 0.2;

/// Scoring section of the config file.
///
/// Each weight is optional; unset weights fall back to the defaults
/// (0.5 / 0.3 / 0.2).
///
/// Example YAML:
/// ```yaml
/// scoring:
///   rank: 0.6
///   tuition: 0.2
///   stipend: 0.2
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoringConfig {
    /// Weight of the (inverted) USA rank
    #[serde(default)]
    pub rank: Option<f64>,

    /// Weight of the (inverted) tuition
    #[serde(default)]
    pub tuition: Option<f64>,

    /// Weight of the stipend
    #[serde(default)]
    pub stipend: Option<f64>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            rank: Some(DEFAULT_RANK_WEIGHT),
            tuition: Some(DEFAULT_TUITION_WEIGHT),
            stipend: Some(DEFAULT_STIPEND_WEIGHT),
        }
    }
}

impl ScoringConfig {
    /// Resolve to concrete weights, filling gaps with defaults.
    pub fn weights(&self) -> ScoreWeights {
        ScoreWeights {
            rank: self.rank.unwrap_or(DEFAULT_RANK_WEIGHT),
            tuition: self.tuition.unwrap_or(DEFAULT_TUITION_WEIGHT),
            stipend: self.stipend.unwrap_or(DEFAULT_STIPEND_WEIGHT),
        }
    }
}

/// Weight triple for the composite score. Meant to sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreWeights {
    pub rank: f64,
    pub tuition: f64,
    pub stipend: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        ScoringConfig::default().weights()
    }
}

impl ScoreWeights {
    pub fn new(rank: f64, tuition: f64, stipend: f64) -> Self {
        Self {
            rank,
            tuition,
            stipend,
        }
    }

    pub fn sum(&self) -> f64 {
        self.rank + self.tuition + self.stipend
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_scoring_config() {
        let config = ScoringConfig::default();
        assert_eq!(config.rank, Some(0.5));
        assert_eq!(config.tuition, Some(0.3));
        assert_eq!(config.stipend, Some(0.2));
    }

    #[test]
    fn test_default_weights_sum_to_one() {
        assert!((ScoreWeights::default().sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_scoring_config_serde_roundtrip() {
        let config = ScoringConfig::default();
        let yaml = serde_saphyr::to_string(&config).unwrap();
        let parsed: ScoringConfig = serde_saphyr::from_str(&yaml).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_partial_scoring_config_fills_defaults() {
        let yaml = "rank: 0.7\n";
        let config: ScoringConfig = serde_saphyr::from_str(yaml).unwrap();
        let weights = config.weights();
        assert_eq!(weights.rank, 0.7);
        assert_eq!(weights.tuition, DEFAULT_TUITION_WEIGHT);
        assert_eq!(weights.stipend, DEFAULT_STIPEND_WEIGHT);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let yaml = "rank: 0.7\nprestige: 0.3\n";
        let result: Result<ScoringConfig, _> = serde_saphyr::from_str(yaml);
        assert!(result.is_err());
    }
}
