use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::input::InputError;
use crate::model::maturity::{dimension_order, Dimension};

pub const ANSWERS_PER_DIMENSION: usize = 5;

/// Survey answer file: company name plus five Likert answers (1..=5) for
/// each of the five dimensions, keyed by `Dimension::key()`.
#[derive(Debug, Clone, Deserialize)]
pub struct Survey {
    pub company: String,
    pub answers: HashMap<Dimension, Vec<u8>>,
}

pub fn load_survey(path: &Path) -> Result<Survey, InputError> {
    if !path.exists() {
        return Err(InputError::MissingInput(format!(
            "survey not found: {}",
            path.display()
        )));
    }
    let file = File::open(path)?;
    let survey: Survey = serde_json::from_reader(BufReader::new(file))?;
    validate(&survey)?;
    Ok(survey)
}

fn validate(survey: &Survey) -> Result<(), InputError> {
    for dim in dimension_order() {
        let answers = survey
            .answers
            .get(dim)
            .ok_or(InputError::MissingDimension(dim.label()))?;
        if answers.len() != ANSWERS_PER_DIMENSION {
            return Err(InputError::AnswerCount {
                dimension: dim.label(),
                found: answers.len(),
                expected: ANSWERS_PER_DIMENSION,
            });
        }
        for &answer in answers {
            if !(1..=5).contains(&answer) {
                return Err(InputError::AnswerOutOfRange {
                    dimension: dim.label(),
                    value: answer,
                });
            }
        }
    }
    Ok(())
}

impl Survey {
    /// Per-dimension arithmetic mean of the Likert answers, each in [1, 5].
    pub fn dimension_scores(&self) -> HashMap<Dimension, f64> {
        self.answers
            .iter()
            .filter(|(_, answers)| !answers.is_empty())
            .map(|(&dim, answers)| {
                let sum: u32 = answers.iter().map(|&a| u32::from(a)).sum();
                (dim, f64::from(sum) / answers.len() as f64)
            })
            .collect()
    }
}
