//! Bayesian inference of a two-color urn's composition.
//!
//! An urn holds `M` balls, `b` of which are "balls of interest". Every
//! experiment draws `N` balls, with or without replacement, and reports how
//! many balls of interest came out. Starting from a uniform prior over the
//! admissible values of `b`, each report is folded into the posterior in
//! order.
//!
//! - [`UrnConfig`]: validated experiment parameters
//! - [`RandomProcess`]: binomial / hypergeometric likelihoods
//! - [`UrnInference`]: hypothesis space, posterior history, decision rule
//!
//! # Example: sampling without replacement
//!
//! ```
//! use bayes_urns::bayesian::{Sampling, UrnConfig, UrnInference};
//!
//! let config = UrnConfig::new(20, 5, vec![2, 3, 2, 1, 2], Sampling::WithoutReplacement)
//!     .with_significance_level(0.1);
//! let mut urn = UrnInference::new(config).unwrap();
//! urn.run_inference().unwrap();
//!
//! let verdict = urn.conclude().unwrap();
//! println!(
//!     "b = {} with probability {:.4} ({})",
//!     verdict.best_hypothesis,
//!     verdict.max_probability,
//!     if verdict.accepted { "accepted" } else { "rejected" }
//! );
//! ```

mod config;
mod likelihood;
mod urn;

pub use config::{Sampling, UrnConfig, DEFAULT_SIGNIFICANCE_LEVEL, MAX_POPULATION};
pub use likelihood::RandomProcess;
pub use urn::{decide, Conclusion, InferenceState, PosteriorSummary, UrnInference};
