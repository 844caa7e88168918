use crate::model::maturity::{Dimension, Tier};

/// Fixed scoring constants: per-dimension weights (sum 1.0), tier cutoffs
/// and the industry benchmark used only for report comparison. Built once
/// at startup, never mutated.
#[derive(Debug, Clone)]
pub struct MaturityProfile {
    pub weights: [f64; 5],
    pub benchmarks: [f64; 5],
    pub initial_cutoff: f64,
    pub intermediate_cutoff: f64,
}

impl MaturityProfile {
    pub fn default_v1() -> Self {
        Self {
            weights: [0.20, 0.20, 0.20, 0.25, 0.15],
            benchmarks: [3.8, 3.5, 3.4, 3.9, 3.6],
            initial_cutoff: 2.5,
            intermediate_cutoff: 3.8,
        }
    }

    pub fn weight(&self, dim: Dimension) -> f64 {
        self.weights[dim.index()]
    }

    pub fn benchmark(&self, dim: Dimension) -> f64 {
        self.benchmarks[dim.index()]
    }

    /// Cutoffs are strict: an index of exactly `initial_cutoff` classifies
    /// Intermediate and exactly `intermediate_cutoff` classifies Advanced.
    pub fn classify(&self, index: f64) -> Tier {
        if index < self.initial_cutoff {
            Tier::Initial
        } else if index < self.intermediate_cutoff {
            Tier::Intermediate
        } else {
            Tier::Advanced
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weights_sum_to_one() {
        let profile = MaturityProfile::default_v1();
        let sum: f64 = profile.weights.iter().sum();
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_classify_cutoff_boundaries() {
        let profile = MaturityProfile::default_v1();
        assert_eq!(profile.classify(2.49), Tier::Initial);
        assert_eq!(profile.classify(2.5), Tier::Intermediate);
        assert_eq!(profile.classify(3.79), Tier::Intermediate);
        assert_eq!(profile.classify(3.8), Tier::Advanced);
        assert_eq!(profile.classify(5.0), Tier::Advanced);
    }

    #[test]
    fn test_benchmark_lookup() {
        let profile = MaturityProfile::default_v1();
        assert_eq!(profile.benchmark(Dimension::CyberSecurity), 3.9);
        assert_eq!(profile.weight(Dimension::CyberSecurity), 0.25);
    }
}
