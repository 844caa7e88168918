use crate::model::maturity::Tier;

/// Fixed recommendation list per tier. Total over the enumeration; exactly
/// four entries each.
pub fn recommendations_for(tier: Tier) -> &'static [&'static str; 4] {
    match tier {
        Tier::Initial => &[
            "Establish a baseline IT infrastructure.",
            "Standardize the key business processes.",
            "Define baseline cyber security policies.",
            "Launch digital training programs for employees.",
        ],
        Tier::Intermediate => &[
            "Increase the degree of process automation.",
            "Improve data management practices.",
            "Strengthen the security controls.",
            "Develop a clear digital strategy.",
        ],
        Tier::Advanced => &[
            "Apply advanced analytics and AI.",
            "Optimize processes through digital platforms.",
            "Continuously test cyber resilience.",
            "Encourage digital innovation.",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TIERS: [Tier; 3] = [Tier::Initial, Tier::Intermediate, Tier::Advanced];

    #[test]
    fn test_four_recommendations_per_tier() {
        for tier in TIERS {
            let recs = recommendations_for(tier);
            assert_eq!(recs.len(), 4);
            for rec in recs {
                assert!(!rec.is_empty());
            }
        }
    }

    #[test]
    fn test_tier_lists_pairwise_distinct() {
        for i in 0..TIERS.len() {
            for j in (i + 1)..TIERS.len() {
                assert_ne!(
                    recommendations_for(TIERS[i]),
                    recommendations_for(TIERS[j])
                );
            }
        }
    }
}
