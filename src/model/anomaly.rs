use serde::Serialize;

/// Per-row outcome of one detection call. `severity` is zero exactly when
/// the row is not anomalous.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnomalyRow {
    pub value: f64,
    pub anomaly: bool,
    pub severity: f64,
}

/// Result of screening one numeric column. `mean`, `std` and `threshold`
/// are dataset-wide scalars for the chosen metric.
#[derive(Debug, Clone, Serialize)]
pub struct Detection {
    pub metric: String,
    pub k: f64,
    pub n: usize,
    pub mean: f64,
    pub std: f64,
    pub threshold: f64,
    pub rows: Vec<AnomalyRow>,
}

impl Detection {
    pub fn anomaly_count(&self) -> usize {
        self.rows.iter().filter(|r| r.anomaly).count()
    }

    pub fn anomaly_fraction(&self) -> f64 {
        if self.rows.is_empty() {
            return 0.0;
        }
        self.anomaly_count() as f64 / self.rows.len() as f64
    }

    /// Row indices flagged anomalous, in dataset order.
    pub fn anomaly_indices(&self) -> Vec<usize> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, r)| r.anomaly)
            .map(|(i, _)| i)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detection_with(rows: Vec<AnomalyRow>) -> Detection {
        Detection {
            metric: "sbytes".to_string(),
            k: 2.5,
            n: rows.len(),
            mean: 0.0,
            std: 0.0,
            threshold: 0.0,
            rows,
        }
    }

    #[test]
    fn test_anomaly_count_and_indices() {
        let det = detection_with(vec![
            AnomalyRow {
                value: 1.0,
                anomaly: false,
                severity: 0.0,
            },
            AnomalyRow {
                value: 9.0,
                anomaly: true,
                severity: 4.0,
            },
            AnomalyRow {
                value: 8.0,
                anomaly: true,
                severity: 3.0,
            },
        ]);
        assert_eq!(det.anomaly_count(), 2);
        assert_eq!(det.anomaly_indices(), vec![1, 2]);
    }

    #[test]
    fn test_anomaly_fraction_empty() {
        let det = detection_with(Vec::new());
        assert_eq!(det.anomaly_fraction(), 0.0);
    }
}
