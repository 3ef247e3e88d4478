//! Sequential Bayesian inference of an urn's composition.
//!
//! An urn holds `M` balls of two colors. Each experiment draws `N` balls and
//! counts the balls of interest. Starting from a uniform prior over the
//! admissible counts `b`, every observation is folded into the running
//! posterior with Bayes' theorem:
//!
//! ```text
//! p_i(b) = L(k_i | b) · p_{i-1}(b) / Σ_b' L(k_i | b') · p_{i-1}(b')
//! ```
//!
//! where `L` is the binomial or hypergeometric [`RandomProcess`].

use super::config::{Sampling, UrnConfig};
use super::likelihood::RandomProcess;
use crate::error::{Result, UrnError};
use crate::stats::combinatorics::signed;
use rayon::prelude::*;
use serde::Serialize;

/// Progress of the sequential update loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum InferenceState {
    /// No posterior history yet.
    Uninitialized,
    /// Prior plus some, but not all, posterior stages.
    PartiallyFolded {
        /// Stages in the history (prior included)
        stages: usize,
    },
    /// Every observation has been folded in.
    FullyFolded,
}

/// Outcome of the decision rule on a posterior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Conclusion {
    /// Most probable hypothesis (first one on ties)
    pub best_hypothesis: u64,
    /// Its posterior probability
    pub max_probability: f64,
    /// Whether `1 - max_probability <= significance_level`
    pub accepted: bool,
    /// Threshold the verdict was taken at
    pub significance_level: f64,
}

/// Point and interval estimates of the final posterior.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PosteriorSummary {
    /// Posterior mean of `b`
    pub mean: f64,
    /// Posterior mode of `b` (first one on ties)
    pub mode: u64,
    /// Smallest hypothesis of the equal-tailed credible interval
    pub lower: u64,
    /// Largest hypothesis of the equal-tailed credible interval
    pub upper: u64,
    /// Requested credible mass; the interval holds at least this much
    pub mass: f64,
}

/// Urn inference engine.
///
/// Owns the hypothesis space (fixed at construction) and the posterior
/// history (stage 0 is the uniform prior, stage `i` the posterior after the
/// `i`-th observation).
///
/// # Example
///
/// ```
/// use bayes_urns::bayesian::{Sampling, UrnConfig, UrnInference};
///
/// let config = UrnConfig::new(10, 3, vec![1, 2], Sampling::WithoutReplacement);
/// let mut urn = UrnInference::new(config).unwrap();
/// assert_eq!(urn.hypothesis_space(), &[2, 3, 4, 5, 6, 7, 8]);
///
/// let history = urn.run_inference().unwrap();
/// assert_eq!(history.len(), 3);
///
/// let conclusion = urn.conclude().unwrap();
/// assert!(urn.hypothesis_space().contains(&conclusion.best_hypothesis));
/// ```
#[derive(Debug, Clone)]
pub struct UrnInference {
    config: UrnConfig,
    process: RandomProcess,
    hypotheses: Vec<u64>,
    posteriors: Vec<Vec<f64>>,
}

impl UrnInference {
    /// Validates `config` and derives the hypothesis space.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if any parameter is invalid or the
    /// hypothesis space is empty.
    pub fn new(config: UrnConfig) -> Result<Self> {
        config.validate()?;
        let hypotheses = hypothesis_space(&config)?;
        let process = RandomProcess::new(config.sampling(), config.population(), config.draws());

        tracing::debug!(
            population = config.population(),
            draws = config.draws(),
            sampling = %config.sampling(),
            hypotheses = hypotheses.len(),
            "urn inference configured"
        );

        Ok(Self {
            config,
            process,
            hypotheses,
            posteriors: Vec::new(),
        })
    }

    /// Configuration this engine was built from.
    #[must_use]
    pub fn config(&self) -> &UrnConfig {
        &self.config
    }

    /// Candidate counts of balls of interest, in increasing order.
    #[must_use]
    pub fn hypothesis_space(&self) -> &[u64] {
        &self.hypotheses
    }

    /// Every stage computed so far (empty before [`run_inference`](Self::run_inference)).
    #[must_use]
    pub fn posterior_history(&self) -> &[Vec<f64>] {
        &self.posteriors
    }

    /// Latest stage of the history, i.e. the prior for the next update.
    #[must_use]
    pub fn prior(&self) -> Option<&[f64]> {
        self.posteriors.last().map(Vec::as_slice)
    }

    /// Where the update loop currently stands.
    #[must_use]
    pub fn state(&self) -> InferenceState {
        match self.posteriors.len() {
            0 => InferenceState::Uninitialized,
            n if n == self.expected_stages() => InferenceState::FullyFolded,
            stages => InferenceState::PartiallyFolded { stages },
        }
    }

    /// Probability of drawing `k` balls of interest when the urn holds `b`.
    #[must_use]
    pub fn likelihood(&self, b: u64, k: u64) -> f64 {
        self.process.probability(b, k)
    }

    /// Uniform distribution over the hypothesis space.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn uniform_prior(&self) -> Vec<f64> {
        let n = self.hypotheses.len();
        vec![1.0 / n as f64; n]
    }

    /// One Bayesian update of `prior` with observation `k`.
    ///
    /// Likelihood × prior products are evaluated in parallel; normalization
    /// happens once all of them are available.
    ///
    /// # Errors
    ///
    /// - [`UrnError::DimensionMismatch`] if `prior` does not match the
    ///   hypothesis space
    /// - [`UrnError::DegenerateNormalization`] if the normalization constant
    ///   is zero or not finite
    pub fn update(&self, prior: &[f64], k: u64) -> Result<Vec<f64>> {
        if prior.len() != self.hypotheses.len() {
            return Err(UrnError::DimensionMismatch {
                expected: self.hypotheses.len(),
                actual: prior.len(),
            });
        }

        let weighted: Vec<f64> = self
            .hypotheses
            .par_iter()
            .zip(prior.par_iter())
            .map(|(&b, &p)| self.process.probability(b, k) * p)
            .collect();

        let normalizer: f64 = weighted.iter().sum();
        if !normalizer.is_finite() || normalizer <= 0.0 {
            tracing::warn!(observation = k, normalizer, "degenerate normalization");
            return Err(UrnError::DegenerateNormalization {
                stage: None,
                observation: k,
                normalizer,
            });
        }

        Ok(weighted.into_iter().map(|w| w / normalizer).collect())
    }

    /// Folds every pending observation into the posterior history.
    ///
    /// Starts from the uniform prior on first use. Each stage is conditioned
    /// on the previous one. Calling it again once the history is complete is
    /// a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`UrnError::DegenerateNormalization`] tagged with the failing
    /// stage. Stages before it stay in the history; the failing one is not
    /// appended.
    pub fn run_inference(&mut self) -> Result<&[Vec<f64>]> {
        let expected = self.expected_stages();
        if self.posteriors.len() == expected {
            tracing::trace!(stages = expected, "posterior history already complete");
            return Ok(self.posteriors.as_slice());
        }

        let _span = tracing::debug_span!(
            "run_inference",
            sampling = %self.config.sampling(),
            observations = self.config.observations().len()
        )
        .entered();

        if self.posteriors.is_empty() {
            self.posteriors.push(self.uniform_prior());
        }

        for stage in self.posteriors.len()..expected {
            let k = self.config.observations()[stage - 1];
            let posterior = self
                .update(&self.posteriors[stage - 1], k)
                .map_err(|e| e.at_stage(stage))?;

            if tracing::enabled!(tracing::Level::DEBUG) {
                let (index, max) = arg_max(&posterior);
                tracing::debug!(
                    stage,
                    observation = k,
                    best_hypothesis = self.hypotheses[index],
                    max_probability = max,
                    "folded observation"
                );
            }
            self.posteriors.push(posterior);
        }

        tracing::info!(stages = self.posteriors.len(), "posterior history complete");
        Ok(self.posteriors.as_slice())
    }

    /// Final posterior, once every observation has been folded in.
    ///
    /// # Errors
    ///
    /// Returns [`UrnError::InferenceIncomplete`] before inference completes.
    pub fn posterior(&self) -> Result<&[f64]> {
        let expected = self.expected_stages();
        match self.posteriors.last() {
            Some(last) if self.posteriors.len() == expected => Ok(last.as_slice()),
            _ => Err(UrnError::InferenceIncomplete {
                completed: self.posteriors.len(),
                expected,
            }),
        }
    }

    /// Applies the decision rule to the final posterior.
    ///
    /// # Errors
    ///
    /// Returns [`UrnError::InferenceIncomplete`] before inference completes.
    pub fn conclude(&self) -> Result<Conclusion> {
        decide(
            &self.hypotheses,
            self.posterior()?,
            self.config.significance_level(),
        )
    }

    /// Posterior mean, mode and an equal-tailed credible interval holding at
    /// least `mass` of the final posterior.
    ///
    /// # Errors
    ///
    /// - [`UrnError::InvalidArgument`] if `mass` is not in (0, 1)
    /// - [`UrnError::InferenceIncomplete`] before inference completes
    pub fn summarize(&self, mass: f64) -> Result<PosteriorSummary> {
        if !(mass > 0.0 && mass < 1.0) {
            return Err(UrnError::invalid_argument("mass", mass, "in (0, 1)"));
        }
        let posterior = self.posterior()?;

        #[allow(clippy::cast_precision_loss)]
        let mean: f64 = self
            .hypotheses
            .iter()
            .zip(posterior)
            .map(|(&b, &p)| b as f64 * p)
            .sum();
        let (mode_index, _) = arg_max(posterior);

        let tail = (1.0 - mass) / 2.0;
        let lower = tail_index(posterior.iter().copied().enumerate(), tail);
        let upper = tail_index(posterior.iter().copied().enumerate().rev(), tail);

        Ok(PosteriorSummary {
            mean,
            mode: self.hypotheses[mode_index],
            lower: self.hypotheses[lower],
            upper: self.hypotheses[upper],
            mass,
        })
    }

    fn expected_stages(&self) -> usize {
        self.config.observations().len() + 1
    }
}

/// Decision rule on an arbitrary posterior over `hypotheses`.
///
/// Picks the most probable hypothesis (the first in order on ties) and
/// accepts it when `1 - max_probability <= significance_level`.
///
/// # Errors
///
/// Returns [`UrnError::DimensionMismatch`] if the slices differ in length or
/// are empty.
///
/// # Example
///
/// ```
/// use bayes_urns::bayesian::decide;
///
/// let verdict = decide(&[1, 2, 3], &[0.02, 0.95, 0.03], 0.1).unwrap();
/// assert_eq!(verdict.best_hypothesis, 2);
/// assert!(verdict.accepted);
///
/// let verdict = decide(&[1, 2, 3], &[0.02, 0.95, 0.03], 0.01).unwrap();
/// assert!(!verdict.accepted);
/// ```
pub fn decide(hypotheses: &[u64], posterior: &[f64], significance_level: f64) -> Result<Conclusion> {
    if hypotheses.is_empty() || hypotheses.len() != posterior.len() {
        return Err(UrnError::DimensionMismatch {
            expected: hypotheses.len(),
            actual: posterior.len(),
        });
    }

    let (index, max_probability) = arg_max(posterior);
    Ok(Conclusion {
        best_hypothesis: hypotheses[index],
        max_probability,
        accepted: 1.0 - max_probability <= significance_level,
        significance_level,
    })
}

/// Derives the fixed hypothesis space from the whole configuration.
///
/// With replacement every count in `[1, M-1]` is admissible. Without
/// replacement `b` must cover the largest observation and leave room for the
/// most non-interest balls seen: `[max(k), M + min(k) - N - 1]`.
fn hypothesis_space(config: &UrnConfig) -> Result<Vec<u64>> {
    let population = config.population();
    match config.sampling() {
        Sampling::WithReplacement => Ok((1..population).collect()),
        Sampling::WithoutReplacement => {
            let observations = config.observations();
            let max = observations.iter().copied().max().unwrap_or(0);
            let min = observations.iter().copied().min().unwrap_or(0);

            // population <= MAX_POPULATION keeps these exact in i64.
            let lower = signed(max);
            let upper = signed(population) + signed(min) - signed(config.draws()) - 1;
            if lower > upper {
                return Err(UrnError::EmptyHypothesisSpace { lower, upper });
            }
            let upper = u64::try_from(upper).unwrap_or(max);
            Ok((max..=upper).collect())
        }
    }
}

/// Index and value of the largest entry; the first one wins ties.
fn arg_max(values: &[f64]) -> (usize, f64) {
    let mut best = (0, f64::NEG_INFINITY);
    for (i, &v) in values.iter().enumerate() {
        if v > best.1 {
            best = (i, v);
        }
    }
    best
}

/// First index, walking `entries` in order, at which the accumulated mass
/// would exceed `tail`.
fn tail_index(entries: impl Iterator<Item = (usize, f64)>, tail: f64) -> usize {
    let mut accumulated = 0.0;
    let mut last = 0;
    for (i, p) in entries {
        last = i;
        if accumulated + p > tail {
            return i;
        }
        accumulated += p;
    }
    last
}

#[cfg(test)]
#[path = "urn_tests.rs"]
mod tests;
