use tracing::debug;

use crate::models::{AreaRecord, Result, ScoredArea, ScorerError};

use super::{ImportanceWeights, ScalingPolicy};

/// Computes the importance score: a convex combination of min-max-scaled
/// attribute values under normalized weights. Pure function of its inputs;
/// scores are bounded by the policy's target range.
pub struct ImportanceScorer {
    policy: ScalingPolicy,
}

impl ImportanceScorer {
    pub fn new(policy: ScalingPolicy) -> Self {
        Self { policy }
    }

    pub fn with_defaults() -> Self {
        Self::new(ScalingPolicy::unit_range())
    }

    /// Score every area under the given weights.
    ///
    /// Validation runs before any scaling work: invalid weights, an empty
    /// working set, or a positively-weighted attribute absent from every
    /// area all fail without producing output.
    pub fn score(
        &self,
        areas: &[AreaRecord],
        weights: &ImportanceWeights,
    ) -> Result<Vec<ScoredArea>> {
        weights.validate()?;
        if areas.is_empty() {
            return Err(ScorerError::EmptyInput);
        }

        let normalized = weights.normalized()?;
        let active: Vec<&str> = normalized
            .iter()
            .filter(|(_, fraction)| **fraction > 0.0)
            .map(|(attribute, _)| *attribute)
            .collect();
        validate_schema(areas, &active)?;

        let mut scores = vec![0.0; areas.len()];
        for (attribute, fraction) in &normalized {
            if *fraction == 0.0 {
                continue;
            }
            let scaled = self.policy.scale_attribute(areas, attribute);
            for (score, value) in scores.iter_mut().zip(scaled) {
                *score += fraction * value;
            }
        }

        debug!(areas = areas.len(), attributes = active.len(), "scored working set");
        Ok(areas
            .iter()
            .zip(scores)
            .map(|(area, score)| ScoredArea::from_area(area, score))
            .collect())
    }
}

/// Every listed attribute must appear in at least one area's attribute map.
pub fn validate_schema(areas: &[AreaRecord], attributes: &[&str]) -> Result<()> {
    for attribute in attributes {
        if !areas
            .iter()
            .any(|area| area.attributes.contains_key(*attribute))
        {
            return Err(ScorerError::UnknownAttribute {
                attribute: (*attribute).to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(id: &str, entries: &[(&str, f64)]) -> AreaRecord {
        let mut record = AreaRecord::new(id);
        for (attribute, value) in entries {
            record.attributes.insert((*attribute).to_string(), *value);
        }
        record
    }

    fn two_attribute_weights(population: f64, income: f64) -> ImportanceWeights {
        let mut weights = ImportanceWeights::default();
        for slot in weights.values_mut() {
            *slot = 0.0;
        }
        weights.population = population;
        weights.median_income = income;
        weights
    }

    fn population_income_areas() -> Vec<AreaRecord> {
        vec![
            area(
                "x",
                &[("population", 100.0), ("median_household_income", 50_000.0)],
            ),
            area(
                "y",
                &[("population", 200.0), ("median_household_income", 100_000.0)],
            ),
        ]
    }

    #[test]
    fn test_two_area_example() {
        let scorer = ImportanceScorer::with_defaults();
        let table = scorer
            .score(&population_income_areas(), &two_attribute_weights(1.0, 1.0))
            .unwrap();

        // X scales to (0, 0), Y to (1, 1); normalized weight 0.5 each.
        assert!((table[0].score - 0.0).abs() < 1e-12);
        assert!((table[1].score - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_ordering_holds_under_percent_preset() {
        let scorer = ImportanceScorer::new(ScalingPolicy::percent_range());
        let table = scorer
            .score(&population_income_areas(), &two_attribute_weights(1.0, 1.0))
            .unwrap();
        assert!(table[1].score > table[0].score);
    }

    #[test]
    fn test_scale_invariance() {
        let scorer = ImportanceScorer::with_defaults();
        let areas = population_income_areas();

        let small = scorer
            .score(&areas, &two_attribute_weights(1.0, 4.0))
            .unwrap();
        let large = scorer
            .score(&areas, &two_attribute_weights(2.0, 8.0))
            .unwrap();

        for (a, b) in small.iter().zip(&large) {
            assert!((a.score - b.score).abs() < 1e-12);
        }
    }

    #[test]
    fn test_boundedness_unit_range() {
        let scorer = ImportanceScorer::with_defaults();
        let areas = vec![
            area("a", &[("population", 10.0), ("pct_rented", 40.0)]),
            area("b", &[("population", 90.0), ("pct_rented", 10.0)]),
            area("c", &[("population", 55.0), ("pct_rented", 75.0)]),
        ];
        let table = scorer.score(&areas, &ImportanceWeights::default()).unwrap();
        for scored in table {
            assert!(scored.score >= 0.0 && scored.score <= 1.0);
        }
    }

    #[test]
    fn test_zero_weight_attribute_has_no_effect() {
        let scorer = ImportanceScorer::with_defaults();
        let base = vec![
            area("a", &[("population", 100.0), ("pct_rented", 10.0)]),
            area("b", &[("population", 200.0), ("pct_rented", 90.0)]),
        ];
        let mut varied = base.clone();
        varied[0].attributes.insert("pct_rented".to_string(), 80.0);
        varied[1].attributes.insert("pct_rented".to_string(), 5.0);

        let weights = two_attribute_weights(1.0, 0.0);
        let with_base = scorer.score(&base, &weights).unwrap();
        let with_varied = scorer.score(&varied, &weights).unwrap();

        for (a, b) in with_base.iter().zip(&with_varied) {
            assert_eq!(a.score, b.score);
        }
    }

    #[test]
    fn test_degenerate_attribute_contributes_zero() {
        let scorer = ImportanceScorer::with_defaults();
        let areas = vec![
            area(
                "a",
                &[("population", 100.0), ("median_household_income", 60_000.0)],
            ),
            area(
                "b",
                &[("population", 200.0), ("median_household_income", 60_000.0)],
            ),
        ];
        let table = scorer
            .score(&areas, &two_attribute_weights(1.0, 1.0))
            .unwrap();

        // Income is identical everywhere, so only population separates the
        // two areas and its normalized weight caps the score.
        assert!((table[0].score - 0.0).abs() < 1e-12);
        assert!((table[1].score - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_all_zero_weights_fail() {
        let scorer = ImportanceScorer::with_defaults();
        let result = scorer.score(&population_income_areas(), &two_attribute_weights(0.0, 0.0));
        assert!(matches!(result, Err(ScorerError::InvalidWeights)));
    }

    #[test]
    fn test_empty_input_fails() {
        let scorer = ImportanceScorer::with_defaults();
        let result = scorer.score(&[], &ImportanceWeights::default());
        assert!(matches!(result, Err(ScorerError::EmptyInput)));
    }

    #[test]
    fn test_unknown_attribute_fails() {
        let scorer = ImportanceScorer::with_defaults();
        let areas = vec![area("a", &[("population", 100.0)])];
        // Income carries weight but no area has the column.
        let result = scorer.score(&areas, &two_attribute_weights(1.0, 1.0));
        assert!(matches!(
            result,
            Err(ScorerError::UnknownAttribute { attribute }) if attribute == "median_household_income"
        ));
    }

    #[test]
    fn test_idempotence() {
        let scorer = ImportanceScorer::with_defaults();
        let areas = population_income_areas();
        let weights = two_attribute_weights(0.3, 0.7);

        let first = scorer.score(&areas, &weights).unwrap();
        let second = scorer.score(&areas, &weights).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_validate_schema() {
        let areas = vec![area("a", &[("population", 1.0)])];
        assert!(validate_schema(&areas, &["population"]).is_ok());
        assert!(validate_schema(&areas, &["population", "pct_owned"]).is_err());
    }
}
