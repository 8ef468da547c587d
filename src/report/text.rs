//! Plain-text console report.

use crate::analysis::{OutcomeCounts, Summary};
use crate::models::{outcome_label, Report};

fn describe_counts(counts: &OutcomeCounts) -> String {
    let parts: Vec<String> = counts
        .most_common()
        .into_iter()
        .map(|(taken, count)| format!("{} {}", outcome_label(taken), count))
        .collect();
    if parts.is_empty() {
        "none".to_string()
    } else {
        parts.join(", ")
    }
}

fn summary_lines(label: &str, summary: Option<&Summary>) -> String {
    match summary {
        Some(s) => format!(
            "Standard deviation of {}: {:.6}\nVariance of {}: {:.6}\n",
            label, s.std_dev, label, s.variance
        ),
        None => format!("Statistics of {}: not enough records\n", label),
    }
}

/// Render the report as console text.
pub fn generate_text_report(report: &Report) -> String {
    let mut out = String::new();
    let meta = &report.metadata;

    out.push_str(&format!(
        "Trace: {} ({} records)\n\n",
        meta.trace_path, meta.records
    ));

    let desc = &report.descriptive;
    match desc.whole {
        Some(ref whole) => {
            out.push_str(&format!("Mean branch number: {:.6}\n", whole.mean));
            out.push_str(&format!(
                "Standard deviation of branches: {:.6}\n",
                whole.std_dev
            ));
            out.push_str(&format!("Variance in branches: {:.6}\n", whole.variance));
        }
        None => out.push_str("Branch statistics: not enough records\n"),
    }
    out.push_str(&summary_lines(
        &format!("first {} branches", desc.window),
        desc.leading.as_ref(),
    ));
    out.push_str(&summary_lines(
        &format!("last {} branches", desc.window),
        desc.trailing.as_ref(),
    ));
    out.push('\n');

    let outcomes = &report.outcomes;
    out.push_str(&format!("Outcomes: {}\n", describe_counts(&outcomes.whole)));
    out.push_str(&format!(
        "Outcomes in first {}: {}\n\n",
        outcomes.window,
        describe_counts(&outcomes.leading)
    ));

    let freq = &report.frequency;
    out.push_str(&format!(
        "There are {} branches that occur at least {} times\n",
        freq.hot_branches, freq.hot_threshold
    ));
    out.push_str(&format!("Top {} branches:\n", freq.top.len()));
    for (i, entry) in freq.top.iter().enumerate() {
        out.push_str(&format!(
            "  {:>4}. {:<20} {}\n",
            i + 1,
            entry.address,
            entry.count
        ));
    }
    for coverage in &freq.coverage {
        out.push_str(&format!(
            "Top {} account for: {}/{} ({:.2}%)\n",
            coverage.top,
            coverage.records,
            coverage.total,
            coverage.percentage()
        ));
    }
    out.push_str(&format!("There are {} unique branches\n\n", freq.unique));

    for streak in &report.streaks {
        let label = outcome_label(streak.taken);
        out.push_str(&format!(
            "The longest streak of {} is: {}\n",
            label, streak.longest
        ));
        out.push_str(&format!(
            "We had {} streaks of {} of length {} or more\n",
            streak.runs, label, streak.min_run
        ));
        out.push_str(&format!(
            "They accounted for: {} branches\n",
            streak.covered
        ));
    }

    if !report.predictors.is_empty() {
        out.push_str("\nPredictor accuracy:\n");
        let width = report
            .predictors
            .iter()
            .map(|p| p.predictor.len())
            .max()
            .unwrap_or(0);
        for sim in &report.predictors {
            out.push_str(&format!(
                "  {:<width$}  {:>6.2}%\n",
                sim.predictor,
                sim.accuracy(),
                width = width
            ));
        }
    }

    out
}
