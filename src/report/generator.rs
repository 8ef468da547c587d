//! Markdown and JSON report generation.
//!
//! This module generates Markdown trace reports from the analysis
//! results, plus a JSON rendering of the same data.

use crate::analysis::{StreakSummary, Summary};
use crate::models::{
    outcome_label, DescriptiveReport, FrequencyReport, OutcomeReport, Report, ReportMetadata,
};
use crate::predictor::Simulation;
use anyhow::Result;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let mut output = String::new();

    // Title
    output.push_str("# Branch Trace Report\n\n");

    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_descriptive_section(&report.descriptive));
    output.push_str(&generate_outcome_section(&report.outcomes));
    output.push_str(&generate_frequency_section(&report.frequency));
    output.push_str(&generate_streak_section(&report.streaks));
    output.push_str(&generate_predictor_section(&report.predictors));

    // Footer
    output.push_str(&generate_footer(&report.metadata));

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Trace:** `{}`\n", metadata.trace_path));
    section.push_str(&format!("- **Records:** {}\n", metadata.records));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!(
        "- **Analysis Duration:** {:.3}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

fn summary_row(label: &str, summary: Option<&Summary>) -> String {
    match summary {
        Some(s) => format!(
            "| {} | {} | {:.3} | {:.3} | {:.3} |\n",
            label, s.count, s.mean, s.std_dev, s.variance
        ),
        None => format!("| {} | - | n/a | n/a | n/a |\n", label),
    }
}

/// Generate the descriptive statistics section.
fn generate_descriptive_section(descriptive: &DescriptiveReport) -> String {
    let mut section = String::new();

    section.push_str("## Branch Identifier Statistics\n\n");
    section.push_str("| Slice | Records | Mean | Std Dev | Variance |\n");
    section.push_str("|:---|---:|---:|---:|---:|\n");
    section.push_str(&summary_row("Whole trace", descriptive.whole.as_ref()));
    section.push_str(&summary_row(
        &format!("First {}", descriptive.window),
        descriptive.leading.as_ref(),
    ));
    section.push_str(&summary_row(
        &format!("Last {}", descriptive.window),
        descriptive.trailing.as_ref(),
    ));
    section.push('\n');

    section
}

/// Generate the outcome counts section.
fn generate_outcome_section(outcomes: &OutcomeReport) -> String {
    let mut section = String::new();

    section.push_str("## Outcomes\n\n");
    section.push_str("| Slice | Taken | Not Taken | Taken Rate |\n");
    section.push_str("|:---|---:|---:|---:|\n");
    for (label, counts) in [
        ("Whole trace".to_string(), &outcomes.whole),
        (format!("First {}", outcomes.window), &outcomes.leading),
    ] {
        section.push_str(&format!(
            "| {} | {} | {} | {:.2}% |\n",
            label,
            counts.taken,
            counts.not_taken,
            counts.taken_rate()
        ));
    }
    section.push('\n');

    section
}

/// Generate the frequency distribution section.
fn generate_frequency_section(frequency: &FrequencyReport) -> String {
    let mut section = String::new();

    section.push_str("## Branch Frequency\n\n");
    section.push_str(&format!("- **Unique branches:** {}\n", frequency.unique));
    section.push_str(&format!(
        "- **Branches occurring at least {} times:** {}\n\n",
        frequency.hot_threshold, frequency.hot_branches
    ));

    if !frequency.top.is_empty() {
        section.push_str(&format!(
            "### Top {} Branches\n\n",
            frequency.top.len()
        ));
        section.push_str("| Rank | Branch | Count | Share |\n");
        section.push_str("|---:|:---|---:|---:|\n");

        for (i, entry) in frequency.top.iter().enumerate() {
            let share = if frequency.total == 0 {
                0.0
            } else {
                (entry.count as f64 / frequency.total as f64) * 100.0
            };
            section.push_str(&format!(
                "| {} | `{}` | {} | {:.2}% |\n",
                i + 1,
                entry.address,
                entry.count,
                share
            ));
        }
        section.push('\n');
    }

    if !frequency.coverage.is_empty() {
        section.push_str("### Coverage\n\n");
        section.push_str("| Top k | Records | Share |\n");
        section.push_str("|---:|---:|---:|\n");

        for coverage in &frequency.coverage {
            section.push_str(&format!(
                "| {} | {}/{} | {:.2}% |\n",
                coverage.top,
                coverage.records,
                coverage.total,
                coverage.percentage()
            ));
        }
        section.push('\n');
    }

    section
}

/// Generate the streak section.
fn generate_streak_section(streaks: &[StreakSummary]) -> String {
    let mut section = String::new();

    section.push_str("## Streaks\n\n");
    section.push_str("| Outcome | Longest | Runs | Min Length | Records Covered |\n");
    section.push_str("|:---|---:|---:|---:|---:|\n");

    for streak in streaks {
        section.push_str(&format!(
            "| {} | {} | {} | {} | {} |\n",
            outcome_label(streak.taken),
            streak.longest,
            streak.runs,
            streak.min_run,
            streak.covered
        ));
    }
    section.push('\n');

    section
}

/// Generate the predictor accuracy section.
fn generate_predictor_section(predictors: &[Simulation]) -> String {
    if predictors.is_empty() {
        return String::new();
    }

    let mut section = String::new();

    section.push_str("## Predictor Accuracy\n\n");
    section.push_str("| Predictor | Correct | Incorrect | Accuracy |\n");
    section.push_str("|:---|---:|---:|---:|\n");

    for sim in predictors {
        section.push_str(&format!(
            "| {} | {} | {} | {:.2}% |\n",
            sim.predictor,
            sim.correct,
            sim.incorrect,
            sim.accuracy()
        ));
    }
    section.push('\n');

    // Best predictor
    if let Some(best) = predictors
        .iter()
        .max_by(|a, b| a.accuracy().total_cmp(&b.accuracy()))
    {
        section.push_str(&format!(
            "Best: **{}** at {:.2}%\n\n",
            best.predictor,
            best.accuracy()
        ));
    }

    section
}

/// Generate the report footer.
fn generate_footer(metadata: &ReportMetadata) -> String {
    let mut footer = String::new();

    footer.push_str("---\n\n");
    footer.push_str(&format!(
        "*Report generated by branchstat v{}*\n",
        metadata.tool_version
    ));

    footer
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}
