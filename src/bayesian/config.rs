//! Experiment configuration for urn inference.

use crate::error::{Result, UrnError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Significance level used when none is given.
pub const DEFAULT_SIGNIFICANCE_LEVEL: f64 = 0.1;

/// Largest supported population.
///
/// The hypothesis space is enumerated in memory (up to `M - 1` entries), so
/// the cap keeps it to a few MiB. Every count also stays usable as a `u32`
/// exponent and as a signed 64-bit difference.
pub const MAX_POPULATION: u64 = 1 << 20;

/// How balls are drawn within one experiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sampling {
    /// Each ball is returned before the next draw (binomial likelihood).
    WithReplacement,
    /// Drawn balls stay out of the urn (hypergeometric likelihood).
    WithoutReplacement,
}

impl Sampling {
    /// Maps the boolean "with replacement" switch onto a sampling mode.
    #[must_use]
    pub fn from_replacement(with_replacement: bool) -> Self {
        if with_replacement {
            Self::WithReplacement
        } else {
            Self::WithoutReplacement
        }
    }

    /// Returns `true` for [`Sampling::WithReplacement`].
    #[must_use]
    pub fn with_replacement(self) -> bool {
        matches!(self, Self::WithReplacement)
    }
}

impl fmt::Display for Sampling {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WithReplacement => write!(f, "with replacement"),
            Self::WithoutReplacement => write!(f, "without replacement"),
        }
    }
}

fn default_significance_level() -> f64 {
    DEFAULT_SIGNIFICANCE_LEVEL
}

/// Parameters of a series of draw experiments on one urn.
///
/// The value is plain data; [`UrnConfig::validate`] checks it and
/// [`UrnInference::new`](crate::bayesian::UrnInference::new) refuses anything
/// that does not validate.
///
/// # Example
///
/// ```
/// use bayes_urns::bayesian::{Sampling, UrnConfig};
///
/// let config = UrnConfig::new(10, 3, vec![1, 2], Sampling::WithoutReplacement)
///     .with_significance_level(0.05);
/// assert!(config.validate().is_ok());
/// assert_eq!(config.significance_level(), 0.05);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrnConfig {
    /// Total number of balls in the urn (M)
    population: u64,
    /// Balls drawn per experiment (N)
    draws: u64,
    /// Balls of interest seen in each experiment, in order
    observations: Vec<u64>,
    /// Likelihood family selector
    sampling: Sampling,
    /// Threshold on `1 - max posterior` for accepting the best hypothesis
    #[serde(default = "default_significance_level")]
    significance_level: f64,
}

impl UrnConfig {
    /// Creates a configuration with the default significance level (0.1).
    #[must_use]
    pub fn new(population: u64, draws: u64, observations: Vec<u64>, sampling: Sampling) -> Self {
        Self {
            population,
            draws,
            observations,
            sampling,
            significance_level: DEFAULT_SIGNIFICANCE_LEVEL,
        }
    }

    /// Sets the significance level used by the decision rule.
    #[must_use]
    pub fn with_significance_level(mut self, significance_level: f64) -> Self {
        self.significance_level = significance_level;
        self
    }

    /// Total number of balls in the urn (M).
    #[must_use]
    pub fn population(&self) -> u64 {
        self.population
    }

    /// Balls drawn per experiment (N).
    #[must_use]
    pub fn draws(&self) -> u64 {
        self.draws
    }

    /// Observed balls of interest, one entry per experiment.
    #[must_use]
    pub fn observations(&self) -> &[u64] {
        &self.observations
    }

    /// Sampling mode.
    #[must_use]
    pub fn sampling(&self) -> Sampling {
        self.sampling
    }

    /// Significance level of the decision rule.
    #[must_use]
    pub fn significance_level(&self) -> f64 {
        self.significance_level
    }

    /// Checks every parameter constraint.
    ///
    /// # Errors
    ///
    /// Returns [`UrnError::InvalidConfiguration`] naming the first offending
    /// parameter.
    pub fn validate(&self) -> Result<()> {
        if self.population < 2 {
            return Err(UrnError::invalid_config(
                "population",
                self.population,
                ">= 2",
            ));
        }
        if self.population > MAX_POPULATION {
            return Err(UrnError::invalid_config(
                "population",
                self.population,
                format!("<= {MAX_POPULATION}").as_str(),
            ));
        }
        if self.draws < 1 || self.draws > self.population {
            return Err(UrnError::invalid_config(
                "draws",
                self.draws,
                format!("in [1, {}]", self.population).as_str(),
            ));
        }
        if self.observations.is_empty() {
            return Err(UrnError::invalid_config(
                "observations",
                "[]",
                "at least one experiment",
            ));
        }
        if let Some((i, &k)) = self
            .observations
            .iter()
            .enumerate()
            .find(|&(_, &k)| k > self.draws)
        {
            return Err(UrnError::invalid_config(
                &format!("observations[{i}]"),
                k,
                format!("in [0, {}]", self.draws).as_str(),
            ));
        }
        if !(self.significance_level > 0.0 && self.significance_level < 1.0) {
            return Err(UrnError::invalid_config(
                "significance_level",
                self.significance_level,
                "in (0, 1)",
            ));
        }
        Ok(())
    }
}
