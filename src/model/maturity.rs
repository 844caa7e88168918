use serde::{Deserialize, Serialize};

/// The five assessed dimensions. Survey files address them by their
/// snake_case keys; reports use the display labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    ItInfrastructure,
    ProcessDigitalization,
    DataAnalytics,
    CyberSecurity,
    DigitalCompetencies,
}

impl Dimension {
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::ItInfrastructure => "IT infrastructure",
            Dimension::ProcessDigitalization => "Process digitalization",
            Dimension::DataAnalytics => "Data & analytics",
            Dimension::CyberSecurity => "Cyber security",
            Dimension::DigitalCompetencies => "Digital competencies",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            Dimension::ItInfrastructure => "it_infrastructure",
            Dimension::ProcessDigitalization => "process_digitalization",
            Dimension::DataAnalytics => "data_analytics",
            Dimension::CyberSecurity => "cyber_security",
            Dimension::DigitalCompetencies => "digital_competencies",
        }
    }

    /// Position in `dimension_order()`.
    pub fn index(&self) -> usize {
        match self {
            Dimension::ItInfrastructure => 0,
            Dimension::ProcessDigitalization => 1,
            Dimension::DataAnalytics => 2,
            Dimension::CyberSecurity => 3,
            Dimension::DigitalCompetencies => 4,
        }
    }
}

pub fn dimension_order() -> &'static [Dimension] {
    &[
        Dimension::ItInfrastructure,
        Dimension::ProcessDigitalization,
        Dimension::DataAnalytics,
        Dimension::CyberSecurity,
        Dimension::DigitalCompetencies,
    ]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Initial,
    Intermediate,
    Advanced,
}

impl Tier {
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Initial => "Initial",
            Tier::Intermediate => "Intermediate",
            Tier::Advanced => "Advanced",
        }
    }
}

/// Outcome of scoring one survey. `dimension_scores` follows
/// `dimension_order()`; `index` is already rounded to two decimals.
#[derive(Debug, Clone, Serialize)]
pub struct MaturityAssessment {
    pub company: String,
    pub dimension_scores: [f64; 5],
    pub index: f64,
    pub tier: Tier,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimension_order_matches_index() {
        for (i, dim) in dimension_order().iter().enumerate() {
            assert_eq!(dim.index(), i);
        }
    }

    #[test]
    fn test_dimension_keys_deserialize() {
        for dim in dimension_order() {
            let parsed: Dimension =
                serde_json::from_str(&format!("\"{}\"", dim.key())).unwrap();
            assert_eq!(parsed, *dim);
        }
    }

    #[test]
    fn test_labels_distinct() {
        let labels: Vec<&str> = dimension_order().iter().map(|d| d.label()).collect();
        for i in 0..labels.len() {
            for j in (i + 1)..labels.len() {
                assert_ne!(labels[i], labels[j]);
            }
        }
    }
}
