//! Output formatting utilities.

use colored::Colorize;

/// Maximum rows in a posterior plot; larger hypothesis spaces are binned.
pub(crate) const PLOT_MAX_ROWS: usize = 40;

/// Width of the longest bar in a posterior plot.
pub(crate) const PLOT_WIDTH: usize = 50;

/// Print a section header
pub(crate) fn section(title: &str) {
    println!("\n{}", format!("=== {title} ===").cyan().bold());
}

/// Print a key-value pair
pub(crate) fn kv(key: &str, value: impl std::fmt::Display) {
    println!("  {}: {}", key.white().bold(), value);
}

/// Print an accepted verdict
pub(crate) fn accepted(msg: &str) {
    println!("{} {}", "[ACCEPTED]".green().bold(), msg);
}

/// Print a rejected verdict
pub(crate) fn rejected(msg: &str) {
    println!("{} {}", "[REJECTED]".red().bold(), msg);
}

/// One row of a posterior plot.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct PlotRow {
    /// Hypothesis value, or `lo-hi` for a bin
    pub label: String,
    /// Posterior mass of the row
    pub mass: f64,
    /// Bar length in characters
    pub bar: usize,
    /// Whether the row holds the most probable hypothesis
    pub best: bool,
}

/// Lays out a horizontal bar chart of `posterior` over `hypotheses`.
///
/// Consecutive hypotheses are merged into bins so that at most `max_rows`
/// rows are produced. Bars are scaled against the heaviest row.
pub(crate) fn posterior_plot(
    hypotheses: &[u64],
    posterior: &[f64],
    best: u64,
    max_rows: usize,
    width: usize,
) -> Vec<PlotRow> {
    if hypotheses.is_empty() || max_rows == 0 {
        return Vec::new();
    }
    let bin = hypotheses.len().div_ceil(max_rows);

    let mut rows: Vec<PlotRow> = hypotheses
        .chunks(bin)
        .zip(posterior.chunks(bin))
        .map(|(values, masses)| {
            let (first, last) = (values[0], values[values.len() - 1]);
            PlotRow {
                label: if first == last {
                    first.to_string()
                } else {
                    format!("{first}-{last}")
                },
                mass: masses.iter().sum(),
                bar: 0,
                best: (first..=last).contains(&best),
            }
        })
        .collect();

    let peak = rows.iter().map(|r| r.mass).fold(0.0, f64::max);
    if peak > 0.0 {
        for row in &mut rows {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss, clippy::cast_precision_loss)]
            {
                row.bar = ((row.mass / peak) * width as f64).round() as usize;
            }
        }
    }
    rows
}

/// Print a posterior plot, highlighting the most probable row.
pub(crate) fn plot(rows: &[PlotRow]) {
    let label_width = rows.iter().map(|r| r.label.len()).max().unwrap_or(0);
    for row in rows {
        let bar = "#".repeat(row.bar);
        let line = format!("  {:>label_width$} | {bar} {:.4}", row.label, row.mass);
        if row.best {
            println!("{}", line.red().bold());
        } else {
            println!("{line}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_one_row_per_hypothesis() {
        let rows = posterior_plot(&[2, 3, 4], &[0.25, 0.5, 0.25], 3, 40, 10);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1].label, "3");
        assert_eq!(rows[1].bar, 10);
        assert_eq!(rows[0].bar, 5);
        assert!(rows[1].best);
        assert!(!rows[0].best && !rows[2].best);
    }

    #[test]
    fn test_plot_bins_large_spaces() {
        let hypotheses: Vec<u64> = (1..100).collect();
        let posterior = vec![1.0 / 99.0; 99];
        let rows = posterior_plot(&hypotheses, &posterior, 50, 40, 20);

        assert!(rows.len() <= 40);
        assert_eq!(rows[0].label, "1-3");
        let total: f64 = rows.iter().map(|r| r.mass).sum();
        assert!((total - 1.0).abs() < 1e-12);
        assert_eq!(rows.iter().filter(|r| r.best).count(), 1);
    }

    #[test]
    fn test_plot_empty() {
        assert!(posterior_plot(&[], &[], 0, 40, 10).is_empty());
    }
}
