//! Random-process models: probability of a draw count given an urn composition.
//!
//! Both families are evaluated as exact big-integer ratios and rounded to
//! `f64` once, at the end:
//!
//! - Binomial (with replacement):
//!   `C(N,k)·b^k·(M−b)^(N−k) / M^N`, which equals `C(N,k)·q^k·(1−q)^(N−k)`
//!   with `q = b/M`
//! - Hypergeometric (without replacement):
//!   `C(b,k)·C(M−b, N−k) / C(M,N)`
//!
//! Impossible draws (`k > N`, `k > b`, `N − k > M − b`) give probability 0.

use super::config::Sampling;
use crate::stats::combinatorics::{binomial, ratio_to_f64, signed};
use num_bigint::BigUint;
use num_traits::Zero;

/// Likelihood model for one experiment of `draws` balls from `population`.
///
/// # Example
///
/// ```
/// use bayes_urns::bayesian::{RandomProcess, Sampling};
///
/// let process = RandomProcess::new(Sampling::WithReplacement, 10, 3);
/// // C(3,2) · 0.5^2 · 0.5^1
/// assert!((process.probability(5, 2) - 0.375).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RandomProcess {
    /// Sampling with replacement.
    Binomial {
        /// Total balls (M)
        population: u64,
        /// Draws per experiment (N)
        draws: u64,
    },
    /// Sampling without replacement.
    Hypergeometric {
        /// Total balls (M)
        population: u64,
        /// Draws per experiment (N)
        draws: u64,
        /// `C(M, N)`, shared by every evaluation
        outcomes: BigUint,
    },
}

impl RandomProcess {
    /// Selects the likelihood family for a sampling mode.
    ///
    /// Callers are expected to pass `draws <= population <=`
    /// [`MAX_POPULATION`](super::MAX_POPULATION), as enforced by
    /// [`UrnConfig::validate`](super::UrnConfig::validate).
    #[must_use]
    pub fn new(sampling: Sampling, population: u64, draws: u64) -> Self {
        match sampling {
            Sampling::WithReplacement => Self::Binomial { population, draws },
            Sampling::WithoutReplacement => Self::Hypergeometric {
                population,
                draws,
                outcomes: binomial(population, signed(draws)),
            },
        }
    }

    /// Probability of observing `k` balls of interest in one experiment when
    /// the urn holds `b` of them.
    #[must_use]
    pub fn probability(&self, b: u64, k: u64) -> f64 {
        match self {
            Self::Binomial { population, draws } => {
                binomial_probability(*population, *draws, b, k)
            }
            Self::Hypergeometric {
                population,
                draws,
                outcomes,
            } => {
                if b > *population {
                    return 0.0;
                }
                let favourable = binomial(b, signed(k))
                    * binomial(population - b, signed(*draws) - signed(k));
                ratio_to_f64(&favourable, outcomes)
            }
        }
    }

    /// Sampling mode this model implements.
    #[must_use]
    pub fn sampling(&self) -> Sampling {
        match self {
            Self::Binomial { .. } => Sampling::WithReplacement,
            Self::Hypergeometric { .. } => Sampling::WithoutReplacement,
        }
    }
}

fn binomial_probability(population: u64, draws: u64, b: u64, k: u64) -> f64 {
    if b > population {
        return 0.0;
    }
    let ways = binomial(draws, signed(k));
    if ways.is_zero() {
        return 0.0;
    }
    // k <= draws here, and draws <= MAX_POPULATION by configuration.
    let (Ok(hits), Ok(trials)) = (u32::try_from(k), u32::try_from(draws)) else {
        return f64::NAN;
    };
    let favourable =
        ways * BigUint::from(b).pow(hits) * BigUint::from(population - b).pow(trials - hits);
    ratio_to_f64(&favourable, &BigUint::from(population).pow(trials))
}
