use std::collections::HashMap;

use thiserror::Error;

use crate::model::maturity::{dimension_order, Dimension, MaturityAssessment};
use crate::model::profile::MaturityProfile;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ScoreError {
    /// The survey layer is contractually responsible for supplying all five
    /// dimensions; a missing key propagates instead of being defaulted.
    #[error("missing dimension score: {0}")]
    MissingDimension(&'static str),
}

/// Weighted maturity index over the five dimension scores, rounded to two
/// decimals before classification.
pub fn run_score(
    company: &str,
    scores: &HashMap<Dimension, f64>,
    profile: &MaturityProfile,
) -> Result<MaturityAssessment, ScoreError> {
    let mut dimension_scores = [0.0f64; 5];
    let mut raw = 0.0f64;
    for (i, dim) in dimension_order().iter().enumerate() {
        let score = *scores
            .get(dim)
            .ok_or(ScoreError::MissingDimension(dim.label()))?;
        dimension_scores[i] = score;
        raw += score * profile.weight(*dim);
    }

    let index = round2(raw);
    let tier = profile.classify(index);

    Ok(MaturityAssessment {
        company: company.to_string(),
        dimension_scores,
        index,
        tier,
    })
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::maturity::Tier;

    fn uniform_scores(value: f64) -> HashMap<Dimension, f64> {
        dimension_order().iter().map(|&d| (d, value)).collect()
    }

    #[test]
    fn test_uniform_three_gives_intermediate() {
        let profile = MaturityProfile::default_v1();
        let assessment = run_score("Acme", &uniform_scores(3.0), &profile).unwrap();
        assert_eq!(assessment.index, 3.0);
        assert_eq!(assessment.tier, Tier::Intermediate);
    }

    #[test]
    fn test_index_boundary_two_point_five_is_intermediate() {
        let profile = MaturityProfile::default_v1();
        let assessment = run_score("Acme", &uniform_scores(2.5), &profile).unwrap();
        assert_eq!(assessment.index, 2.5);
        assert_eq!(assessment.tier, Tier::Intermediate);
    }

    #[test]
    fn test_index_boundary_three_point_eight_is_advanced() {
        let profile = MaturityProfile::default_v1();
        let assessment = run_score("Acme", &uniform_scores(3.8), &profile).unwrap();
        assert_eq!(assessment.index, 3.8);
        assert_eq!(assessment.tier, Tier::Advanced);
    }

    #[test]
    fn test_low_scores_give_initial() {
        let profile = MaturityProfile::default_v1();
        let assessment = run_score("Acme", &uniform_scores(1.0), &profile).unwrap();
        assert_eq!(assessment.index, 1.0);
        assert_eq!(assessment.tier, Tier::Initial);
    }

    #[test]
    fn test_weighted_mix_rounds_to_two_decimals() {
        let profile = MaturityProfile::default_v1();
        let mut scores = uniform_scores(3.0);
        scores.insert(Dimension::CyberSecurity, 4.333);
        // 3.0 * 0.75 + 4.333 * 0.25 = 3.33325 -> 3.33
        let assessment = run_score("Acme", &scores, &profile).unwrap();
        assert_eq!(assessment.index, 3.33);
    }

    #[test]
    fn test_missing_dimension_is_an_error() {
        let profile = MaturityProfile::default_v1();
        let mut scores = uniform_scores(3.0);
        scores.remove(&Dimension::CyberSecurity);
        let err = run_score("Acme", &scores, &profile).unwrap_err();
        assert_eq!(err, ScoreError::MissingDimension("Cyber security"));
    }
}
