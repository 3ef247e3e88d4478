//! Statistical primitives shared by the inference models.
//!
//! - [`combinatorics`]: exact binomial coefficients and big-integer ratios

pub mod combinatorics;

pub use combinatorics::{binomial, ratio_to_f64};
