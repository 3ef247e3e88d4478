//! Inference report: what the engine concluded, rendered as text or JSON.

use crate::error::Result;
use crate::output;
use bayes_urns::bayesian::{Conclusion, PosteriorSummary, UrnConfig, UrnInference};
use serde::Serialize;

/// Everything a caller needs to present one inference run.
#[derive(Debug, Serialize)]
pub(crate) struct Report<'a> {
    pub config: &'a UrnConfig,
    pub hypotheses: &'a [u64],
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history: Option<&'a [Vec<f64>]>,
    pub posterior: &'a [f64],
    pub conclusion: Conclusion,
    pub summary: PosteriorSummary,
}

impl<'a> Report<'a> {
    /// Collects the report from an engine whose inference has completed.
    pub(crate) fn from_engine(
        urn: &'a UrnInference,
        credible_mass: f64,
        with_history: bool,
    ) -> Result<Self> {
        Ok(Self {
            config: urn.config(),
            hypotheses: urn.hypothesis_space(),
            history: with_history.then(|| urn.posterior_history()),
            posterior: urn.posterior()?,
            conclusion: urn.conclude()?,
            summary: urn.summarize(credible_mass)?,
        })
    }

    /// Pretty-printed JSON.
    pub(crate) fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Human-readable report on stdout.
    pub(crate) fn print(&self) {
        let population = self.config.population();

        output::section("Input");
        output::kv("Balls in the urn", population);
        output::kv("Balls per experiment", self.config.draws());
        output::kv("Balls of interest per experiment", format!("{:?}", self.config.observations()));
        output::kv("Sampling", self.config.sampling());
        output::kv("Significance level", self.config.significance_level());
        output::kv(
            "Hypotheses",
            format!(
                "{} ({}..={})",
                self.hypotheses.len(),
                self.hypotheses[0],
                self.hypotheses[self.hypotheses.len() - 1]
            ),
        );

        if let Some(history) = self.history {
            output::section("Posterior history");
            for (stage, vector) in history.iter().enumerate() {
                let cells: Vec<String> = vector.iter().map(|p| format!("{p:.4}")).collect();
                println!("  Stage {stage}: [{}]", cells.join(", "));
            }
        }

        output::section("Probability");
        let rows = output::posterior_plot(
            self.hypotheses,
            self.posterior,
            self.conclusion.best_hypothesis,
            output::PLOT_MAX_ROWS,
            output::PLOT_WIDTH,
        );
        output::plot(&rows);

        output::section("Estimate");
        output::kv("Posterior mean", format!("{:.4}", self.summary.mean));
        output::kv(
            &format!("{:.0}% credible interval", self.summary.mass * 100.0),
            format!("[{}, {}]", self.summary.lower, self.summary.upper),
        );

        output::section("Conclusion");
        println!(
            "The maximum probability is {:.4}.",
            self.conclusion.max_probability
        );
        println!(
            "The most likely number of balls of interest is {} out of {population}.",
            self.conclusion.best_hypothesis
        );
        let verdict = if self.conclusion.accepted {
            "accepted"
        } else {
            "rejected"
        };
        let line = format!(
            "The hypothesis that the number of balls of interest equals {} is {verdict} (significance level {}).",
            self.conclusion.best_hypothesis, self.conclusion.significance_level
        );
        if self.conclusion.accepted {
            output::accepted(&line);
        } else {
            output::rejected(&line);
        }
    }
}
