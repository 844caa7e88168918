//! Statistical threshold screening for network-traffic datasets and
//! weighted digital-maturity scoring.
//!
//! Two independent pipelines share this crate: `anomaly` loads a CSV
//! dataset, screens one numeric metric against `mean + k * std` and exports
//! flagged rows plus figures; `maturity` averages a 5x5 Likert survey into
//! dimension scores, computes a weighted index, classifies it into a tier
//! and renders a PDF report.

pub mod input;
pub mod model;
pub mod pipeline;
pub mod report;
