use super::config::{ScoreWeights, ScoringConfig};
use super::engine::WEIGHT_SUM_TOLERANCE;
use crate::diagnostics::Warning;

/// Validate scoring configuration at startup.
/// Returns all validation errors at once (not just the first).
///
/// A sum other than 1.0 is not an error; `weight_sum_warning` reports it.
pub fn validate_scoring(config: &ScoringConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (name, weight) in [
        ("rank", config.rank),
        ("tuition", config.tuition),
        ("stipend", config.stipend),
    ] {
        if let Some(w) = weight {
            if !w.is_finite() || !(0.0..=1.0).contains(&w) {
                errors.push(format!("scoring.{}: must be between 0 and 1, got {}", name, w));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// `WeightSum` when the weights are further than the tolerance from 1.0.
pub fn weight_sum_warning(weights: &ScoreWeights) -> Option<Warning> {
    let sum = weights.sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        Some(Warning::WeightSum { sum })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        let config = ScoringConfig::default();
        assert!(validate_scoring(&config).is_ok());
        assert!(weight_sum_warning(&config.weights()).is_none());
    }

    #[test]
    fn test_empty_config() {
        let config = ScoringConfig {
            rank: None,
            tuition: None,
            stipend: None,
        };
        assert!(validate_scoring(&config).is_ok());
    }

    #[test]
    fn test_weight_out_of_range() {
        let config = ScoringConfig {
            rank: Some(1.5),
            tuition: None,
            stipend: None,
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("scoring.rank"));
    }

    #[test]
    fn test_negative_and_nan_weights() {
        let config = ScoringConfig {
            rank: None,
            tuition: Some(-0.1),
            stipend: Some(f64::NAN),
        };
        let errors = validate_scoring(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
        assert!(errors[0].contains("scoring.tuition"));
        assert!(errors[1].contains("scoring.stipend"));
    }

    #[test]
    fn test_sum_mismatch_is_warning_not_error() {
        let config = ScoringConfig {
            rank: Some(0.5),
            tuition: Some(0.5),
            stipend: Some(0.5),
        };
        assert!(validate_scoring(&config).is_ok());
        let warning = weight_sum_warning(&config.weights()).unwrap();
        assert_eq!(warning, Warning::WeightSum { sum: 1.5 });
        assert!(warning.to_string().contains("1.50"));
    }

    #[test]
    fn test_weight_sum_within_tolerance() {
        let weights = ScoreWeights::new(0.1, 0.2, 0.7);
        assert!(weight_sum_warning(&weights).is_none());
        assert!(weight_sum_warning(&ScoreWeights::new(0.5, 0.3, 0.3)).is_some());
    }
}
