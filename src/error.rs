//! Error types for urn inference.
//!
//! Every failure the engine can report falls into one of three kinds
//! (see [`ErrorKind`]): a bad configuration caught at construction, a
//! degenerate normalization during an update stage, or a query made before
//! inference has finished.

use std::fmt;

/// Broad classification of an [`UrnError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid parameters or an empty hypothesis space.
    Configuration,
    /// Zero or non-finite normalization constant during an update.
    ArithmeticDegeneracy,
    /// An operation called out of order or with mismatched inputs.
    Usage,
}

/// Main error type for urn inference.
///
/// # Examples
///
/// ```
/// use bayes_urns::error::{ErrorKind, UrnError};
///
/// let err = UrnError::EmptyHypothesisSpace { lower: 5, upper: 3 };
/// assert_eq!(err.kind(), ErrorKind::Configuration);
/// assert!(err.to_string().contains("empty hypothesis space"));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum UrnError {
    /// A configuration parameter violates its constraint.
    InvalidConfiguration {
        /// Parameter name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// The derived hypothesis range `[lower, upper]` contains no value.
    EmptyHypothesisSpace {
        /// Smallest admissible hypothesis
        lower: i64,
        /// Largest admissible hypothesis
        upper: i64,
    },

    /// Every hypothesis received zero (or non-finite) posterior mass.
    DegenerateNormalization {
        /// Stage that failed (1-based), `None` for a standalone update
        stage: Option<usize>,
        /// Observation folded at that stage
        observation: u64,
        /// Offending normalization constant
        normalizer: f64,
    },

    /// A probability vector does not line up with the hypothesis space.
    DimensionMismatch {
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// A query argument (not engine configuration) is out of range.
    InvalidArgument {
        /// Argument name
        param: String,
        /// Provided value
        value: String,
        /// Constraint description
        constraint: String,
    },

    /// Conclusions were requested before every observation was folded in.
    InferenceIncomplete {
        /// Stages present in the posterior history
        completed: usize,
        /// Stages required (observations + 1)
        expected: usize,
    },
}

impl fmt::Display for UrnError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UrnError::InvalidConfiguration {
                param,
                value,
                constraint,
            } => {
                write!(
                    f,
                    "Invalid configuration: {param} = {value}, expected {constraint}"
                )
            }
            UrnError::EmptyHypothesisSpace { lower, upper } => {
                write!(
                    f,
                    "Invalid configuration: empty hypothesis space [{lower}, {upper}]"
                )
            }
            UrnError::DegenerateNormalization {
                stage,
                observation,
                normalizer,
            } => match stage {
                Some(stage) => write!(
                    f,
                    "Degenerate normalization at stage {stage} (observation {observation}): Z = {normalizer}"
                ),
                None => write!(
                    f,
                    "Degenerate normalization (observation {observation}): Z = {normalizer}"
                ),
            },
            UrnError::DimensionMismatch { expected, actual } => {
                write!(
                    f,
                    "Prior dimension mismatch: expected {expected}, got {actual}"
                )
            }
            UrnError::InvalidArgument {
                param,
                value,
                constraint,
            } => {
                write!(f, "Invalid argument: {param} = {value}, expected {constraint}")
            }
            UrnError::InferenceIncomplete {
                completed,
                expected,
            } => {
                write!(
                    f,
                    "Inference incomplete: {completed} of {expected} stages folded"
                )
            }
        }
    }
}

impl std::error::Error for UrnError {}

impl UrnError {
    /// Create an invalid configuration error with descriptive context
    #[must_use]
    pub fn invalid_config(
        param: &str,
        value: impl fmt::Display,
        constraint: &str,
    ) -> Self {
        Self::InvalidConfiguration {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }

    /// Create an invalid query argument error
    #[must_use]
    pub fn invalid_argument(param: &str, value: impl fmt::Display, constraint: &str) -> Self {
        Self::InvalidArgument {
            param: param.to_string(),
            value: value.to_string(),
            constraint: constraint.to_string(),
        }
    }

    /// Which of the three error classes this error belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            UrnError::InvalidConfiguration { .. } | UrnError::EmptyHypothesisSpace { .. } => {
                ErrorKind::Configuration
            }
            UrnError::DegenerateNormalization { .. } => ErrorKind::ArithmeticDegeneracy,
            UrnError::DimensionMismatch { .. }
            | UrnError::InvalidArgument { .. }
            | UrnError::InferenceIncomplete { .. } => ErrorKind::Usage,
        }
    }

    /// Tag a degenerate normalization with the stage that produced it.
    #[must_use]
    pub(crate) fn at_stage(self, stage: usize) -> Self {
        match self {
            UrnError::DegenerateNormalization {
                observation,
                normalizer,
                ..
            } => UrnError::DegenerateNormalization {
                stage: Some(stage),
                observation,
                normalizer,
            },
            other => other,
        }
    }
}

#[allow(clippy::cmp_owned)]
impl PartialEq<&str> for UrnError {
    fn eq(&self, other: &&str) -> bool {
        self.to_string() == *other
    }
}

/// Convenience type alias for Results.
pub type Result<T> = std::result::Result<T, UrnError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_configuration_display() {
        let err = UrnError::invalid_config("draws", 0, ">= 1");
        let msg = err.to_string();
        assert!(msg.contains("Invalid configuration"));
        assert!(msg.contains("draws"));
        assert!(msg.contains(">= 1"));
    }

    #[test]
    fn test_degenerate_normalization_display_with_stage() {
        let err = UrnError::DegenerateNormalization {
            stage: Some(3),
            observation: 7,
            normalizer: 0.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("stage 3"));
        assert!(msg.contains("observation 7"));
    }

    #[test]
    fn test_degenerate_normalization_display_without_stage() {
        let err = UrnError::DegenerateNormalization {
            stage: None,
            observation: 2,
            normalizer: f64::NAN,
        };
        assert!(!err.to_string().contains("stage"));
    }

    #[test]
    fn test_at_stage_tags_degenerate_only() {
        let err = UrnError::DegenerateNormalization {
            stage: None,
            observation: 1,
            normalizer: 0.0,
        }
        .at_stage(2);
        assert!(matches!(
            err,
            UrnError::DegenerateNormalization { stage: Some(2), .. }
        ));

        let other = UrnError::DimensionMismatch {
            expected: 3,
            actual: 4,
        };
        assert_eq!(other.clone().at_stage(5), other);
    }

    #[test]
    fn test_error_kinds() {
        assert_eq!(
            UrnError::invalid_config("population", 1, ">= 2").kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            UrnError::EmptyHypothesisSpace { lower: 4, upper: 3 }.kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            UrnError::DegenerateNormalization {
                stage: Some(1),
                observation: 0,
                normalizer: 0.0,
            }
            .kind(),
            ErrorKind::ArithmeticDegeneracy
        );
        assert_eq!(
            UrnError::InferenceIncomplete {
                completed: 0,
                expected: 2,
            }
            .kind(),
            ErrorKind::Usage
        );
        assert_eq!(
            UrnError::invalid_argument("mass", 1.0, "in (0, 1)").kind(),
            ErrorKind::Usage
        );
    }

    #[test]
    fn test_invalid_argument_display() {
        let err = UrnError::invalid_argument("mass", 1.5, "in (0, 1)");
        assert!(err == "Invalid argument: mass = 1.5, expected in (0, 1)");
    }

    #[test]
    fn test_error_eq_str() {
        let err = UrnError::InferenceIncomplete {
            completed: 1,
            expected: 3,
        };
        assert!(err == "Inference incomplete: 1 of 3 stages folded");
    }

    #[test]
    fn test_error_source_is_none() {
        use std::error::Error;
        let err = UrnError::EmptyHypothesisSpace { lower: 2, upper: 1 };
        assert!(err.source().is_none());
    }
}
