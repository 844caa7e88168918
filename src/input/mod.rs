use std::path::Path;

use thiserror::Error;

pub mod survey;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("survey parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("dataset has no data rows")]
    EmptyDataset,
    #[error("unknown column: {0}")]
    UnknownColumn(String),
    #[error("column is not numeric: {0}")]
    NotNumeric(String),
    #[error("survey is missing dimension: {0}")]
    MissingDimension(&'static str),
    #[error("dimension {dimension} has {found} answers, expected {expected}")]
    AnswerCount {
        dimension: &'static str,
        found: usize,
        expected: usize,
    },
    #[error("dimension {dimension} has answer {value}, expected 1..=5")]
    AnswerOutOfRange { dimension: &'static str, value: u8 },
}

#[derive(Debug, Clone)]
pub enum ColumnData {
    /// Every non-empty cell parsed as a finite f64; empty cells are missing.
    Numeric(Vec<Option<f64>>),
    Text(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub data: ColumnData,
}

impl Column {
    pub fn is_numeric(&self) -> bool {
        matches!(self.data, ColumnData::Numeric(_))
    }
}

/// A CSV dataset loaded once, immutable thereafter. Column types are
/// inferred at load time so that metric selection is a declared error
/// rather than a silent failure.
#[derive(Debug, Clone)]
pub struct Dataset {
    columns: Vec<Column>,
    n_rows: usize,
}

pub fn load_dataset(path: &Path) -> Result<Dataset, InputError> {
    if !path.exists() {
        return Err(InputError::MissingInput(format!(
            "dataset not found: {}",
            path.display()
        )));
    }

    let mut reader = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|s| s.trim().to_string())
        .collect();

    let mut cells: Vec<Vec<String>> = vec![Vec::new(); headers.len()];
    let mut n_rows = 0usize;
    for record in reader.records() {
        let record = record?;
        for (i, column) in cells.iter_mut().enumerate() {
            let value = record.get(i).map(|s| s.trim()).unwrap_or("");
            column.push(value.to_string());
        }
        n_rows += 1;
    }
    if n_rows == 0 {
        return Err(InputError::EmptyDataset);
    }

    let columns: Vec<Column> = headers
        .into_iter()
        .zip(cells)
        .map(|(name, raw)| Column {
            data: infer_column(raw),
            name,
        })
        .collect();
    tracing::debug!(
        rows = n_rows,
        columns = columns.len(),
        numeric = columns.iter().filter(|c| c.is_numeric()).count(),
        "dataset parsed"
    );

    Ok(Dataset { columns, n_rows })
}

fn infer_column(raw: Vec<String>) -> ColumnData {
    let mut parsed = Vec::with_capacity(raw.len());
    let mut any_value = false;
    for cell in &raw {
        if cell.is_empty() {
            parsed.push(None);
            continue;
        }
        match cell.parse::<f64>() {
            Ok(v) if v.is_finite() => {
                parsed.push(Some(v));
                any_value = true;
            }
            _ => return ColumnData::Text(raw),
        }
    }
    if any_value {
        ColumnData::Numeric(parsed)
    } else {
        ColumnData::Text(raw)
    }
}

impl Dataset {
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    /// Candidate metrics, in declared order.
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.is_numeric())
            .map(|c| c.name.as_str())
            .collect()
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Typed accessor for one numeric column with missing values filled
    /// with 0.0, matching the preprocessor contract.
    pub fn numeric_view(&self, name: &str) -> Result<Vec<f64>, InputError> {
        let column = self
            .column(name)
            .ok_or_else(|| InputError::UnknownColumn(name.to_string()))?;
        match &column.data {
            ColumnData::Numeric(values) => {
                Ok(values.iter().map(|v| v.unwrap_or(0.0)).collect())
            }
            ColumnData::Text(_) => Err(InputError::NotNumeric(name.to_string())),
        }
    }

    /// Cell rendered for table views and CSV export. Numeric cells are
    /// re-rendered from the parsed value; missing cells render empty.
    pub fn cell(&self, row: usize, col: usize) -> String {
        match &self.columns[col].data {
            ColumnData::Numeric(values) => match values.get(row).copied().flatten() {
                Some(v) => format_numeric_cell(v),
                None => String::new(),
            },
            ColumnData::Text(values) => values.get(row).cloned().unwrap_or_default(),
        }
    }
}

pub fn format_numeric_cell(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{:.0}", v)
    } else {
        format!("{}", v)
    }
}
