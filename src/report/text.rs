use clap::ValueEnum;

use crate::input::Dataset;
use crate::model::anomaly::Detection;
use crate::model::maturity::{dimension_order, MaturityAssessment};
use crate::model::profile::MaturityProfile;
use crate::report::{benchmark_statement, report_date};

/// Columns shown first in the anomaly table when the dataset has them;
/// conventional UNSW-NB15 field names, consumed opportunistically.
pub const PREFERRED_COLUMNS: [&str; 16] = [
    "srcip", "dstip", "sport", "dport", "proto", "service", "state", "dur", "sbytes", "dbytes",
    "spkts", "dpkts", "sttl", "dttl", "label", "attack_cat",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewMode {
    All,
    Anomalies,
    Normal,
}

pub fn render_anomaly_summary(detection: &Detection) -> String {
    let mut out = String::new();
    out.push_str(&format!("Metric: {}\n", detection.metric));
    out.push_str(&format!("Samples: {}\n", detection.n));
    out.push_str(&format!("Mean: {:.3}\n", detection.mean));
    out.push_str(&format!("Std: {:.3}\n", detection.std));
    out.push_str(&format!(
        "Threshold (mean + {:.1} * std): {:.3}\n",
        detection.k, detection.threshold
    ));
    out.push_str(&format!(
        "Anomalies: {} ({:.2}%)\n",
        detection.anomaly_count(),
        detection.anomaly_fraction() * 100.0
    ));
    out.push_str(alert_statement(detection.anomaly_count()));
    out.push('\n');
    out
}

fn alert_statement(anomaly_count: usize) -> &'static str {
    if anomaly_count > 0 {
        "WARNING: early anomalies detected for the selected metric and k."
    } else {
        "No anomalies detected for the selected metric and k."
    }
}

/// Row indices for the requested view, sorted by severity descending and
/// truncated to `top`.
pub fn view_filter(detection: &Detection, mode: ViewMode, top: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = detection
        .rows
        .iter()
        .enumerate()
        .filter(|(_, row)| match mode {
            ViewMode::All => true,
            ViewMode::Anomalies => row.anomaly,
            ViewMode::Normal => !row.anomaly,
        })
        .map(|(i, _)| i)
        .collect();
    indices.sort_by(|&a, &b| {
        detection.rows[b]
            .severity
            .partial_cmp(&detection.rows[a].severity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    indices.truncate(top);
    indices
}

/// An empty view is informational, not an error.
pub fn empty_view_message(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::Anomalies => "No anomalies detected for the selected metric and k.",
        ViewMode::Normal => "No normal samples to display; every sample is flagged.",
        ViewMode::All => "No data to display with the current settings.",
    }
}

/// Plain fixed-width table over the preferred columns (falling back to all
/// columns), with the severity appended.
pub fn render_anomaly_table(dataset: &Dataset, detection: &Detection, indices: &[usize]) -> String {
    let names = dataset.column_names();
    let mut shown: Vec<usize> = PREFERRED_COLUMNS
        .iter()
        .filter_map(|name| names.iter().position(|n| n == name))
        .collect();
    if shown.is_empty() {
        shown = (0..dataset.n_columns()).collect();
    }

    let mut header: Vec<String> = shown.iter().map(|&c| names[c].to_string()).collect();
    header.push("severity".to_string());

    let mut rows: Vec<Vec<String>> = Vec::with_capacity(indices.len());
    for &row in indices {
        let mut cells: Vec<String> = shown.iter().map(|&c| dataset.cell(row, c)).collect();
        cells.push(format!("{:.3}", detection.rows[row].severity));
        rows.push(cells);
    }

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.chars().count().min(18));
        }
    }

    let mut out = String::new();
    push_row(&mut out, &header, &widths);
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push_str("  ");
        }
        let shown: String = cell.chars().take(18).collect();
        out.push_str(&format!("{:>width$}", shown, width = widths[i]));
    }
    out.push('\n');
}

pub fn render_maturity_summary(
    assessment: &MaturityAssessment,
    profile: &MaturityProfile,
    recommendations: &[&str],
) -> String {
    let mut out = String::new();
    out.push_str("Digital maturity assessment\n\n");
    out.push_str(&format!("Company: {}\n", assessment.company));
    out.push_str(&format!("Date: {}\n", report_date()));
    out.push_str(&format!("Maturity index: {:.2}\n", assessment.index));
    out.push_str(&format!("Maturity tier: {}\n\n", assessment.tier.label()));

    out.push_str("Benchmark comparison\n");
    for (i, dim) in dimension_order().iter().enumerate() {
        out.push_str(&format!(
            "  {}: score {:.2} | benchmark {:.1}\n",
            dim.label(),
            assessment.dimension_scores[i],
            profile.benchmark(*dim)
        ));
    }
    out.push('\n');

    out.push_str("Interpretation\n");
    for (i, dim) in dimension_order().iter().enumerate() {
        out.push_str(&format!(
            "  {}: {}\n",
            dim.label(),
            benchmark_statement(assessment.dimension_scores[i], profile.benchmark(*dim))
        ));
    }
    out.push('\n');

    out.push_str("Recommended actions\n");
    for (i, rec) in recommendations.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, rec));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::maturity::Tier;
    use crate::pipeline::detect::run_detect;
    use crate::pipeline::recommend::recommendations_for;

    #[test]
    fn test_summary_mentions_threshold_and_alert() {
        let det = run_detect(&[1.0, 1.0, 1.0, 50.0], "sbytes", 1.0);
        let summary = render_anomaly_summary(&det);
        assert!(summary.contains("Threshold"));
        assert!(summary.contains("WARNING"));

        let quiet = run_detect(&[1.0, 1.0, 1.0], "sbytes", 2.5);
        assert!(render_anomaly_summary(&quiet).contains("No anomalies"));
    }

    #[test]
    fn test_view_filter_modes() {
        let det = run_detect(&[1.0, 1.0, 1.0, 50.0, 40.0], "sbytes", 0.5);
        let all = view_filter(&det, ViewMode::All, 100);
        let anomalies = view_filter(&det, ViewMode::Anomalies, 100);
        let normal = view_filter(&det, ViewMode::Normal, 100);
        assert_eq!(all.len(), det.rows.len());
        assert_eq!(anomalies.len() + normal.len(), all.len());
        for idx in &anomalies {
            assert!(det.rows[*idx].anomaly);
        }
        // Severity descending within the filtered view.
        for pair in anomalies.windows(2) {
            assert!(det.rows[pair[0]].severity >= det.rows[pair[1]].severity);
        }
        // Top-N truncation.
        assert_eq!(view_filter(&det, ViewMode::All, 2).len(), 2);
    }

    #[test]
    fn test_maturity_summary_contains_all_dimensions() {
        let profile = MaturityProfile::default_v1();
        let assessment = MaturityAssessment {
            company: "Acme".to_string(),
            dimension_scores: [3.4, 2.6, 3.6, 4.4, 2.8],
            index: 3.42,
            tier: Tier::Intermediate,
        };
        let summary = render_maturity_summary(
            &assessment,
            &profile,
            recommendations_for(assessment.tier),
        );
        for dim in dimension_order() {
            assert!(summary.contains(dim.label()));
        }
        assert!(summary.contains("Maturity index: 3.42"));
        assert!(summary.contains("Intermediate"));
        assert!(summary.contains("1. "));
        assert!(summary.contains("4. "));
    }
}
