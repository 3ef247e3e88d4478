//! Convenience re-exports for common usage.
//!
//! ```
//! use bayes_urns::prelude::*;
//! ```

pub use crate::bayesian::{
    decide, Conclusion, InferenceState, PosteriorSummary, RandomProcess, Sampling, UrnConfig,
    UrnInference,
};
pub use crate::error::{ErrorKind, Result, UrnError};
pub use crate::stats::binomial;
