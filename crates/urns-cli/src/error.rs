//! Error types for the urns CLI.

use bayes_urns::{ErrorKind, UrnError};
use std::path::PathBuf;
use std::process::ExitCode;
use thiserror::Error;

/// Result type alias for CLI operations
pub(crate) type Result<T> = std::result::Result<T, CliError>;

/// CLI error types
#[derive(Error, Debug)]
pub(crate) enum CliError {
    /// Config file not found
    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),

    /// Config file is not valid JSON for an experiment configuration
    #[error("Invalid config file {}: {message}", .path.display())]
    InvalidConfigFile { path: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Experiment parameters rejected by the engine
    #[error("{0}")]
    Configuration(String),

    /// Inference hit a degenerate normalization
    #[error("{0}")]
    Degenerate(String),

    /// Engine used out of order
    #[error("{0}")]
    Usage(String),

    /// Report serialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl CliError {
    /// Get exit code for this error
    pub(crate) fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }

    fn code(&self) -> u8 {
        match self {
            Self::Usage(_) => 1,
            Self::ConfigNotFound(_) => 3,
            Self::InvalidConfigFile { .. } => 4,
            Self::Configuration(_) => 5,
            Self::Degenerate(_) => 6,
            Self::Io(_) => 7,
            Self::Serialization(_) => 8,
        }
    }
}

impl From<UrnError> for CliError {
    fn from(e: UrnError) -> Self {
        match e.kind() {
            ErrorKind::Configuration => Self::Configuration(e.to_string()),
            ErrorKind::ArithmeticDegeneracy => Self::Degenerate(e.to_string()),
            ErrorKind::Usage => Self::Usage(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urn_error_maps_by_kind() {
        let err: CliError = UrnError::EmptyHypothesisSpace { lower: 4, upper: 3 }.into();
        assert!(matches!(err, CliError::Configuration(_)));

        let err: CliError = UrnError::DegenerateNormalization {
            stage: Some(2),
            observation: 0,
            normalizer: 0.0,
        }
        .into();
        assert!(matches!(err, CliError::Degenerate(_)));
        assert!(err.to_string().contains("stage 2"));

        let err: CliError = UrnError::InferenceIncomplete {
            completed: 0,
            expected: 2,
        }
        .into();
        assert!(matches!(err, CliError::Usage(_)));
    }

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [
            CliError::ConfigNotFound(PathBuf::from("x.json")).code(),
            CliError::InvalidConfigFile {
                path: PathBuf::from("x.json"),
                message: "bad".into(),
            }
            .code(),
            CliError::Configuration(String::new()).code(),
            CliError::Degenerate(String::new()).code(),
            CliError::Usage(String::new()).code(),
        ];
        for (i, a) in codes.iter().enumerate() {
            for b in &codes[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_config_not_found_display() {
        let err = CliError::ConfigNotFound(PathBuf::from("/nope/urn.json"));
        assert_eq!(err.to_string(), "Config file not found: /nope/urn.json");
    }
}
