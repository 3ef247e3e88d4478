//! Bayes Urns: sequential Bayesian inference on the composition of a two-color urn.
//!
//! An urn holds `M` balls, an unknown number `b` of which are balls of
//! interest. Repeated experiments each draw `N` balls (with or without
//! replacement) and count the balls of interest. This crate turns those counts
//! into a posterior distribution over `b`, one stage per experiment, and an
//! accept/reject verdict on the most probable `b`.
//!
//! # Quick Start
//!
//! ```
//! use bayes_urns::prelude::*;
//!
//! // 10 balls, 3 drawn with replacement, 2 balls of interest seen.
//! let config = UrnConfig::new(10, 3, vec![2], Sampling::WithReplacement);
//! let mut urn = UrnInference::new(config).unwrap();
//!
//! let history = urn.run_inference().unwrap();
//! assert_eq!(history.len(), 2); // prior + one posterior
//!
//! let verdict = urn.conclude().unwrap();
//! assert_eq!(verdict.best_hypothesis, 7);
//! ```
//!
//! # Modules
//!
//! - [`bayesian`]: configuration, likelihood models and the inference engine
//! - [`stats`]: exact combinatorics
//! - [`error`]: error taxonomy

pub mod bayesian;
pub mod error;
pub mod prelude;
pub mod stats;

pub use error::{ErrorKind, Result, UrnError};
