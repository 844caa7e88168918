use thiserror::Error;

pub mod export;
pub mod pdf;
pub mod plot;
pub mod text;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("exported file is missing column: {0}")]
    MissingColumn(String),
    #[error("plot rendering failed: {0}")]
    Plot(String),
    #[error("PDF rendering failed: {0}")]
    Pdf(String),
}

/// Export files are uniquely named by timestamp; writes never overwrite.
pub fn timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

pub fn report_date() -> String {
    chrono::Local::now().format("%d.%m.%Y").to_string()
}

/// Lowercased alphanumeric slug for file names; runs of other characters
/// collapse to a single underscore.
pub fn company_slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut last_was_sep = true;
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            out.extend(ch.to_lowercase());
            last_was_sep = false;
        } else if !last_was_sep {
            out.push('_');
            last_was_sep = true;
        }
    }
    let trimmed = out.trim_end_matches('_').to_string();
    if trimmed.is_empty() {
        "company".to_string()
    } else {
        trimmed
    }
}

/// One interpretation sentence per dimension, relative to the fixed
/// industry benchmark.
pub fn benchmark_statement(score: f64, benchmark: f64) -> &'static str {
    if score >= benchmark {
        "the result is at or above the industry average."
    } else {
        "the result is below the industry average; improvement is recommended."
    }
}
