use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::models::{Result, ScorerError};

/// Column names of the ten scored attributes, as they appear in the
/// demographics table.
pub const ATTRIBUTES: [&str; 10] = [
    "population",
    "median_household_income",
    "pct_bachelors_or_higher",
    "pct_owned",
    "pct_rented",
    "pct_18-24",
    "pct_25-34",
    "pct_35-44",
    "pct_45-66",
    "pct_67+",
];

/// Display labels for the sliders, aligned with [`ATTRIBUTES`].
pub const ATTRIBUTE_LABELS: [&str; 10] = [
    "Population of Tract",
    "Median Household Income",
    "Percent Bachelors or Higher",
    "Percent Homeowners",
    "Percent Renters",
    "Percent Aged 18-24",
    "Percent Aged 25-34",
    "Percent Aged 35-44",
    "Percent Aged 45-66",
    "Percent Aged 67+",
];

/// User-chosen relative importance per attribute. Values are non-negative
/// slider positions; only their ratios matter, the scorer normalizes them
/// to fractions before use.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportanceWeights {
    pub population: f64,
    pub median_income: f64,
    pub bachelors: f64,
    pub homeowners: f64,
    pub renters: f64,
    pub age_18_24: f64,
    pub age_25_34: f64,
    pub age_35_44: f64,
    pub age_45_66: f64,
    pub age_67_plus: f64,
}

impl Default for ImportanceWeights {
    fn default() -> Self {
        Self {
            population: 0.5,
            median_income: 0.5,
            bachelors: 0.5,
            homeowners: 0.5,
            renters: 0.5,
            age_18_24: 0.5,
            age_25_34: 0.5,
            age_35_44: 0.5,
            age_45_66: 0.5,
            age_67_plus: 0.5,
        }
    }
}

impl ImportanceWeights {
    /// Weight per attribute column, in [`ATTRIBUTES`] order.
    pub fn entries(&self) -> [(&'static str, f64); 10] {
        [
            (ATTRIBUTES[0], self.population),
            (ATTRIBUTES[1], self.median_income),
            (ATTRIBUTES[2], self.bachelors),
            (ATTRIBUTES[3], self.homeowners),
            (ATTRIBUTES[4], self.renters),
            (ATTRIBUTES[5], self.age_18_24),
            (ATTRIBUTES[6], self.age_25_34),
            (ATTRIBUTES[7], self.age_35_44),
            (ATTRIBUTES[8], self.age_45_66),
            (ATTRIBUTES[9], self.age_67_plus),
        ]
    }

    /// Mutable slider slots, in [`ATTRIBUTES`] order.
    pub fn values_mut(&mut self) -> [&mut f64; 10] {
        [
            &mut self.population,
            &mut self.median_income,
            &mut self.bachelors,
            &mut self.homeowners,
            &mut self.renters,
            &mut self.age_18_24,
            &mut self.age_25_34,
            &mut self.age_35_44,
            &mut self.age_45_66,
            &mut self.age_67_plus,
        ]
    }

    pub fn total(&self) -> f64 {
        self.entries().iter().map(|(_, w)| w).sum()
    }

    pub fn validate(&self) -> Result<()> {
        if self.entries().iter().any(|(_, w)| *w < 0.0) {
            return Err(ScorerError::InvalidWeights);
        }
        if self.total() <= 0.0 {
            return Err(ScorerError::InvalidWeights);
        }
        Ok(())
    }

    /// Weights divided by their sum, so the result is invariant to the
    /// sliders' absolute scale. The fractions sum to 1.
    pub fn normalized(&self) -> Result<BTreeMap<&'static str, f64>> {
        self.validate()?;
        let total = self.total();
        Ok(self
            .entries()
            .iter()
            .map(|(attribute, weight)| (*attribute, weight / total))
            .collect())
    }

    /// Set a weight by its attribute column name. Returns false for a name
    /// outside [`ATTRIBUTES`].
    pub fn set_by_name(&mut self, attribute: &str, value: f64) -> bool {
        let Some(index) = ATTRIBUTES.iter().position(|a| *a == attribute) else {
            return false;
        };
        if let Some(slot) = self.values_mut().into_iter().nth(index) {
            *slot = value;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let weights = ImportanceWeights::default();
        assert!(weights.validate().is_ok());
        assert!((weights.total() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_normalized_sums_to_one() {
        let mut weights = ImportanceWeights::default();
        weights.population = 0.9;
        weights.age_67_plus = 0.1;

        let normalized = weights.normalized().unwrap();
        let total: f64 = normalized.values().sum();
        assert!((total - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_sum_is_invalid() {
        let weights = ImportanceWeights {
            population: 0.0,
            median_income: 0.0,
            bachelors: 0.0,
            homeowners: 0.0,
            renters: 0.0,
            age_18_24: 0.0,
            age_25_34: 0.0,
            age_35_44: 0.0,
            age_45_66: 0.0,
            age_67_plus: 0.0,
        };
        assert!(matches!(weights.validate(), Err(ScorerError::InvalidWeights)));
        assert!(weights.normalized().is_err());
    }

    #[test]
    fn test_negative_weight_is_invalid() {
        let mut weights = ImportanceWeights::default();
        weights.renters = -0.1;
        assert!(matches!(weights.validate(), Err(ScorerError::InvalidWeights)));
    }

    #[test]
    fn test_set_by_name() {
        let mut weights = ImportanceWeights::default();
        assert!(weights.set_by_name("pct_67+", 0.8));
        assert_eq!(weights.age_67_plus, 0.8);
        assert!(weights.set_by_name("median_household_income", 0.2));
        assert_eq!(weights.median_income, 0.2);
        assert!(!weights.set_by_name("pct_unknown", 1.0));
    }
}
