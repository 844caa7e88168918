use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::model::anomaly::Detection;
use crate::report::ReportError;

const FIGURE_SIZE: (u32, u32) = (1000, 400);
const HISTOGRAM_BINS: usize = 60;

pub fn series_plot_name(metric: &str, k: f64, ts: &str) -> String {
    format!("figure_metric_{}_k{:.1}_{}.png", metric, k, ts)
}

pub fn histogram_name(metric: &str, k: f64, ts: &str) -> String {
    format!("figure_hist_{}_k{:.1}_{}.png", metric, k, ts)
}

/// Value series in sample order with the threshold line and anomaly
/// markers.
pub fn write_series_plot(
    detection: &Detection,
    out_dir: &Path,
    ts: &str,
) -> Result<PathBuf, ReportError> {
    let path = out_dir.join(series_plot_name(&detection.metric, detection.k, ts));
    draw_series(detection, &path).map_err(|e| ReportError::Plot(e.to_string()))?;
    Ok(path)
}

/// Value distribution histogram with the threshold line.
pub fn write_histogram(
    detection: &Detection,
    out_dir: &Path,
    ts: &str,
) -> Result<PathBuf, ReportError> {
    let path = out_dir.join(histogram_name(&detection.metric, detection.k, ts));
    draw_histogram(detection, &path).map_err(|e| ReportError::Plot(e.to_string()))?;
    Ok(path)
}

fn draw_series(detection: &Detection, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let n = detection.rows.len().max(1) as f64;
    let (y_min, y_max) = value_range(detection);
    let mut chart = ChartBuilder::on(&root)
        .margin(12)
        .build_cartesian_2d(0.0..n, y_min..y_max)?;

    chart.draw_series(LineSeries::new(
        detection
            .rows
            .iter()
            .enumerate()
            .map(|(i, row)| (i as f64, row.value)),
        &BLUE,
    ))?;

    chart.draw_series(LineSeries::new(
        vec![(0.0, detection.threshold), (n, detection.threshold)],
        RED.stroke_width(2),
    ))?;

    chart.draw_series(
        detection
            .rows
            .iter()
            .enumerate()
            .filter(|(_, row)| row.anomaly)
            .map(|(i, row)| Circle::new((i as f64, row.value), 3, RED.filled())),
    )?;

    root.present()?;
    Ok(())
}

fn draw_histogram(detection: &Detection, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, FIGURE_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let (bins, x_min, width) = bin_values(detection);
    let y_max = bins.iter().copied().max().unwrap_or(0).max(1) as f64 * 1.05;
    let x_max = x_min + width * HISTOGRAM_BINS as f64;
    // Keep the threshold line inside the drawing area even when it sits
    // beyond the observed values.
    let x_hi = x_max.max(detection.threshold + width);

    let mut chart = ChartBuilder::on(&root)
        .margin(12)
        .build_cartesian_2d(x_min..x_hi, 0.0..y_max)?;

    chart.draw_series(bins.iter().enumerate().filter(|(_, c)| **c > 0).map(
        |(i, &count)| {
            let x0 = x_min + width * i as f64;
            Rectangle::new(
                [(x0, 0.0), (x0 + width, count as f64)],
                BLUE.mix(0.6).filled(),
            )
        },
    ))?;

    chart.draw_series(LineSeries::new(
        vec![(detection.threshold, 0.0), (detection.threshold, y_max)],
        RED.stroke_width(2),
    ))?;

    root.present()?;
    Ok(())
}

fn value_range(detection: &Detection) -> (f64, f64) {
    let mut min = detection.threshold;
    let mut max = detection.threshold;
    for row in &detection.rows {
        min = min.min(row.value);
        max = max.max(row.value);
    }
    pad_range(min, max)
}

fn pad_range(min: f64, max: f64) -> (f64, f64) {
    if min == max {
        return (min - 1.0, max + 1.0);
    }
    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}

fn bin_values(detection: &Detection) -> (Vec<usize>, f64, f64) {
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for row in &detection.rows {
        min = min.min(row.value);
        max = max.max(row.value);
    }
    if !min.is_finite() || !max.is_finite() {
        return (vec![0; HISTOGRAM_BINS], 0.0, 1.0);
    }
    let width = if max > min {
        (max - min) / HISTOGRAM_BINS as f64
    } else {
        1.0
    };
    let mut bins = vec![0usize; HISTOGRAM_BINS];
    for row in &detection.rows {
        let idx = ((row.value - min) / width) as usize;
        bins[idx.min(HISTOGRAM_BINS - 1)] += 1;
    }
    (bins, min, width)
}
