//! Grading configuration: component weights and letter grade bands.
//!
//! A policy is fixed for the lifetime of a [`crate::registry::Registry`].
//! The default matches the published course rules; a JSON file can override it.
//!
//! Example JSON:
//! ```json
//! {
//!   "weights": { "quiz": 0.1, "assignment": 0.2, "midterm": 0.3, "final_exam": 0.4 },
//!   "scale": {
//!     "bands": [
//!       { "letter": "A", "min": 85.0 },
//!       { "letter": "B", "min": 70.0 }
//!     ],
//!     "floor": "C"
//!   },
//!   "remedial_below": 70.0
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, TrackerError};

const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Weights applied to the four grade components. Must be non-negative and sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Weights {
    pub quiz: f64,
    pub assignment: f64,
    pub midterm: f64,
    pub final_exam: f64,
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            quiz: 0.10,
            assignment: 0.20,
            midterm: 0.30,
            final_exam: 0.40,
        }
    }
}

impl Weights {
    pub fn sum(&self) -> f64 {
        self.quiz + self.assignment + self.midterm + self.final_exam
    }

    fn named(&self) -> [(&'static str, f64); 4] {
        [
            ("quiz", self.quiz),
            ("assignment", self.assignment),
            ("midterm", self.midterm),
            ("final_exam", self.final_exam),
        ]
    }
}

/// One letter grade band. Scores `>= min` fall into it unless a better band matched first.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GradeBand {
    pub letter: String,
    pub min: f64,
}

impl GradeBand {
    pub fn new(letter: impl Into<String>, min: f64) -> Self {
        Self {
            letter: letter.into(),
            min,
        }
    }
}

/// Ordered letter grade bands, best first, plus the letter for everything below.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GradeScale {
    pub bands: Vec<GradeBand>,
    pub floor: String,
}

impl Default for GradeScale {
    fn default() -> Self {
        Self {
            bands: vec![
                GradeBand::new("A", 85.0),
                GradeBand::new("B", 70.0),
                GradeBand::new("C", 55.0),
                GradeBand::new("D", 40.0),
            ],
            floor: "E".to_string(),
        }
    }
}

/// Full grading configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GradingPolicy {
    #[serde(default)]
    pub weights: Weights,
    #[serde(default)]
    pub scale: GradeScale,
    /// Final scores strictly below this value are remedial.
    #[serde(default = "default_remedial_below")]
    pub remedial_below: f64,
}

fn default_remedial_below() -> f64 {
    70.0
}

impl Default for GradingPolicy {
    fn default() -> Self {
        Self {
            weights: Weights::default(),
            scale: GradeScale::default(),
            remedial_below: default_remedial_below(),
        }
    }
}

impl GradingPolicy {
    /// Loads and validates a policy from a JSON file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| TrackerError::io(path, e))?;
        let policy: GradingPolicy = serde_json::from_str(&content).map_err(|e| {
            TrackerError::Validation(format!("policy {}: {}", path.display(), e))
        })?;
        policy.validate()?;
        debug!(path = %path.display(), "Grading policy loaded");
        Ok(policy)
    }

    /// Checks every rule and reports all violations at once.
    pub fn validate(&self) -> Result<()> {
        let errors = self.problems();
        if errors.is_empty() {
            Ok(())
        } else {
            Err(TrackerError::Validation(errors.join("; ")))
        }
    }

    fn problems(&self) -> Vec<String> {
        let mut errors = Vec::new();

        for (name, weight) in self.weights.named() {
            if !weight.is_finite() || weight < 0.0 {
                errors.push(format!("weights.{name}: must be a non-negative number"));
            }
        }
        let sum = self.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            errors.push(format!("weights: must sum to 1.0 (got {sum})"));
        }

        if self.scale.bands.is_empty() {
            errors.push("scale.bands: at least one band is required".to_string());
        }
        for (i, band) in self.scale.bands.iter().enumerate() {
            if band.letter.trim().is_empty() {
                errors.push(format!("scale.bands[{i}].letter: must not be empty"));
            }
            if !band.min.is_finite() {
                errors.push(format!("scale.bands[{i}].min: must be finite"));
            }
        }
        for (i, pair) in self.scale.bands.windows(2).enumerate() {
            if pair[1].min >= pair[0].min {
                errors.push(format!(
                    "scale.bands[{}].min: must be below scale.bands[{}].min",
                    i + 1,
                    i
                ));
            }
        }
        if self.scale.floor.trim().is_empty() {
            errors.push("scale.floor: must not be empty".to_string());
        }

        if !self.remedial_below.is_finite() {
            errors.push("remedial_below: must be finite".to_string());
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_policy_is_valid() {
        let policy = GradingPolicy::default();
        assert!(policy.validate().is_ok());
        assert_eq!(policy.weights.sum(), 1.0);
        assert_eq!(policy.remedial_below, 70.0);
    }

    #[test]
    fn test_partial_policy_parse_uses_defaults() {
        let json = r#"{ "remedial_below": 60.0 }"#;
        let policy: GradingPolicy = serde_json::from_str(json).unwrap();
        assert_eq!(policy.remedial_below, 60.0);
        assert_eq!(policy.weights, Weights::default());
        assert_eq!(policy.scale, GradeScale::default());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let json = r#"{ "weights": { "quiz": 1.0, "assignment": 0.0, "midterm": 0.0, "final_exam": 0.0, "bonus": 0.1 } }"#;
        assert!(serde_json::from_str::<GradingPolicy>(json).is_err());
    }

    #[test]
    fn test_weights_must_sum_to_one() {
        let policy = GradingPolicy {
            weights: Weights {
                quiz: 0.5,
                assignment: 0.5,
                midterm: 0.5,
                final_exam: 0.0,
            },
            ..Default::default()
        };
        let err = policy.validate().unwrap_err().to_string();
        assert!(err.contains("must sum to 1.0"));
    }

    #[test]
    fn test_collects_all_errors() {
        let policy = GradingPolicy {
            weights: Weights {
                quiz: -0.1,
                assignment: 0.2,
                midterm: 0.3,
                final_exam: 0.4,
            },
            scale: GradeScale {
                bands: vec![GradeBand::new("A", 50.0), GradeBand::new("B", 60.0)],
                floor: String::new(),
            },
            remedial_below: f64::NAN,
        };
        let problems = policy.problems();
        assert_eq!(problems.len(), 5);
        assert!(problems[0].contains("weights.quiz"));
        assert!(problems.iter().any(|p| p.contains("scale.bands[1].min")));
        assert!(problems.iter().any(|p| p.contains("scale.floor")));
        assert!(problems.iter().any(|p| p.contains("remedial_below")));
    }

    #[test]
    fn test_empty_bands_rejected() {
        let policy = GradingPolicy {
            scale: GradeScale {
                bands: vec![],
                floor: "F".to_string(),
            },
            ..Default::default()
        };
        assert!(matches!(policy.validate(), Err(TrackerError::Validation(_))));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "weights": {{ "quiz": 0.25, "assignment": 0.25, "midterm": 0.25, "final_exam": 0.25 }} }}"#
        )
        .unwrap();

        let policy = GradingPolicy::load(file.path()).unwrap();
        assert_eq!(policy.weights.quiz, 0.25);
        assert_eq!(policy.scale, GradeScale::default());
    }

    #[test]
    fn test_load_invalid_file_fails_validation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "remedial_below": "seventy" }}"#).unwrap();
        assert!(matches!(
            GradingPolicy::load(file.path()),
            Err(TrackerError::Validation(_))
        ));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = GradingPolicy::load(dir.path().join("missing.json"));
        assert!(matches!(result, Err(TrackerError::Io { .. })));
    }
}
