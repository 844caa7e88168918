use std::path::{Path, PathBuf};

use crate::input::Dataset;
use crate::model::anomaly::Detection;
use crate::report::ReportError;

/// Columns appended after the original dataset columns on export.
pub const EXTRA_COLUMNS: [&str; 5] = ["metric", "k", "threshold", "anomaly", "severity"];

pub fn anomaly_csv_name(metric: &str, k: f64, ts: &str) -> String {
    format!("unsw_anomalies_{}_k{:.1}_{}.csv", metric, k, ts)
}

/// Write the anomalous rows only, sorted by severity descending, with the
/// original columns followed by `EXTRA_COLUMNS`. Returns `None` when the
/// detection flagged nothing; an empty export is informational, not an
/// error.
pub fn write_anomaly_csv(
    dataset: &Dataset,
    detection: &Detection,
    out_dir: &Path,
    ts: &str,
) -> Result<Option<PathBuf>, ReportError> {
    let mut flagged = detection.anomaly_indices();
    if flagged.is_empty() {
        return Ok(None);
    }
    flagged.sort_by(|&a, &b| {
        detection.rows[b]
            .severity
            .partial_cmp(&detection.rows[a].severity)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let path = out_dir.join(anomaly_csv_name(&detection.metric, detection.k, ts));
    let mut writer = csv::Writer::from_path(&path)?;

    let mut header: Vec<&str> = dataset.column_names();
    header.extend(EXTRA_COLUMNS);
    writer.write_record(&header)?;

    for &row in &flagged {
        let mut record: Vec<String> = (0..dataset.n_columns())
            .map(|col| dataset.cell(row, col))
            .collect();
        record.push(detection.metric.clone());
        record.push(format!("{}", detection.k));
        record.push(format!("{}", detection.threshold));
        record.push("true".to_string());
        record.push(format!("{}", detection.rows[row].severity));
        writer.write_record(&record)?;
    }
    writer.flush()?;

    Ok(Some(path))
}

/// One reloaded export row: the metric value plus the recorded scalars.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportedAnomaly {
    pub value: f64,
    pub threshold: f64,
    pub severity: f64,
}

/// Read an exported anomaly CSV back. Used to verify that export and
/// reload agree on the flagged set for the same (metric, k).
pub fn read_anomaly_csv(path: &Path, metric: &str) -> Result<Vec<ExportedAnomaly>, ReportError> {
    let mut reader = csv::Reader::from_path(path)?;
    let headers = reader.headers()?.clone();

    let value_col = headers
        .iter()
        .position(|h| h == metric)
        .ok_or_else(|| ReportError::MissingColumn(metric.to_string()))?;
    // Appended columns sit after any same-named dataset column.
    let threshold_col = rposition(&headers, "threshold")?;
    let severity_col = rposition(&headers, "severity")?;

    let mut out = Vec::new();
    for record in reader.records() {
        let record = record?;
        out.push(ExportedAnomaly {
            value: parse_or_zero(record.get(value_col)),
            threshold: parse_or_zero(record.get(threshold_col)),
            severity: parse_or_zero(record.get(severity_col)),
        });
    }
    Ok(out)
}

fn rposition(headers: &csv::StringRecord, name: &str) -> Result<usize, ReportError> {
    headers
        .iter()
        .collect::<Vec<_>>()
        .iter()
        .rposition(|h| *h == name)
        .ok_or_else(|| ReportError::MissingColumn(name.to_string()))
}

fn parse_or_zero(cell: Option<&str>) -> f64 {
    cell.and_then(|s| s.trim().parse::<f64>().ok()).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::load_dataset;
    use crate::pipeline::detect::run_detect;
    use std::io::Write;

    #[test]
    fn test_export_sorted_and_reloadable() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("traffic.csv");
        let mut file = std::fs::File::create(&csv_path).unwrap();
        write!(
            file,
            "proto,sbytes\ntcp,1\ntcp,2\nudp,900\ntcp,3\nudp,500\n"
        )
        .unwrap();
        drop(file);

        let dataset = load_dataset(&csv_path).unwrap();
        let values = dataset.numeric_view("sbytes").unwrap();
        let detection = run_detect(&values, "sbytes", 1.0);
        assert!(detection.anomaly_count() > 0);

        let path = write_anomaly_csv(&dataset, &detection, dir.path(), "20260101_000000")
            .unwrap()
            .unwrap();
        let reloaded = read_anomaly_csv(&path, "sbytes").unwrap();
        assert_eq!(reloaded.len(), detection.anomaly_count());

        // Severity descending, and every row agrees with the detection
        // under the recorded threshold.
        for pair in reloaded.windows(2) {
            assert!(pair[0].severity >= pair[1].severity);
        }
        for row in &reloaded {
            assert!(row.value > row.threshold);
            assert!((row.severity - (row.value - row.threshold)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_no_anomalies_skips_export() {
        let dir = tempfile::tempdir().unwrap();
        let csv_path = dir.path().join("flat.csv");
        std::fs::write(&csv_path, "sbytes\n5\n5\n5\n").unwrap();

        let dataset = load_dataset(&csv_path).unwrap();
        let values = dataset.numeric_view("sbytes").unwrap();
        let detection = run_detect(&values, "sbytes", 2.5);
        let exported =
            write_anomaly_csv(&dataset, &detection, dir.path(), "20260101_000000").unwrap();
        assert!(exported.is_none());
    }
}
