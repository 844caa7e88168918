use crate::model::anomaly::{AnomalyRow, Detection};

/// Screen one numeric column against `mean + k * std`.
///
/// Pure function of `(values, k)`: no ordering dependency, no mutation.
/// The std is sample (Bessel-corrected, n - 1) and degenerates to 0 when
/// n <= 1, so the threshold collapses to the mean. A value exactly on the
/// threshold is NOT anomalous.
pub fn run_detect(values: &[f64], metric: &str, k: f64) -> Detection {
    let n = values.len();
    let mean = if n == 0 {
        0.0
    } else {
        values.iter().sum::<f64>() / n as f64
    };
    let std = sample_std(values, mean);
    let threshold = mean + k * std;

    let rows = values
        .iter()
        .map(|&value| AnomalyRow {
            value,
            anomaly: value > threshold,
            severity: (value - threshold).max(0.0),
        })
        .collect();

    Detection {
        metric: metric.to_string(),
        k,
        n,
        mean,
        std,
        threshold,
        rows,
    }
}

fn sample_std(values: &[f64], mean: f64) -> f64 {
    let n = values.len();
    if n <= 1 {
        return 0.0;
    }
    let ss: f64 = values
        .iter()
        .map(|&v| {
            let d = v - mean;
            d * d
        })
        .sum();
    (ss / (n - 1) as f64).sqrt()
}
