use std::fmt::Write as _;

use crate::models::{AreaRecord, ScoredArea};
use crate::scoring::ImportanceWeights;

/// Single-entry cache for the most recently computed scored table.
///
/// The key is a digest of the areas snapshot and the submitted weights, so a
/// resubmission with unchanged sliders reuses the previous table instead of
/// rescoring.
#[derive(Debug, Default)]
pub struct ResultCache {
    last: Option<(String, Vec<ScoredArea>)>,
}

impl ResultCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Content key over the working set and weights. Attribute maps iterate
    /// in sorted order and values are fingerprinted by their bit pattern, so
    /// identical inputs always digest identically.
    pub fn key(areas: &[AreaRecord], weights: &ImportanceWeights) -> String {
        let mut fingerprint = String::new();
        for area in areas {
            fingerprint.push_str(&area.id);
            fingerprint.push(';');
            for (attribute, value) in &area.attributes {
                let _ = write!(fingerprint, "{}={:016x};", attribute, value.to_bits());
            }
        }
        fingerprint.push('|');
        for (attribute, value) in weights.entries() {
            let _ = write!(fingerprint, "{}={:016x};", attribute, value.to_bits());
        }
        format!("{:x}", md5::compute(fingerprint.as_bytes()))
    }

    pub fn get(&self, key: &str) -> Option<&[ScoredArea]> {
        match &self.last {
            Some((cached_key, table)) if cached_key == key => Some(table),
            _ => None,
        }
    }

    pub fn put(&mut self, key: String, table: Vec<ScoredArea>) {
        self.last = Some((key, table));
    }

    pub fn clear(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_area(id: &str, population: f64) -> AreaRecord {
        let mut area = AreaRecord::new(id);
        area.attributes.insert("population".to_string(), population);
        area
    }

    #[test]
    fn test_key_stable_for_identical_inputs() {
        let areas = vec![sample_area("000505", 1200.0), sample_area("000600", 800.0)];
        let weights = ImportanceWeights::default();

        assert_eq!(
            ResultCache::key(&areas, &weights),
            ResultCache::key(&areas, &weights)
        );
    }

    #[test]
    fn test_key_changes_with_weights() {
        let areas = vec![sample_area("000505", 1200.0)];
        let defaults = ImportanceWeights::default();
        let mut shifted = defaults.clone();
        shifted.population = 0.9;

        assert_ne!(
            ResultCache::key(&areas, &defaults),
            ResultCache::key(&areas, &shifted)
        );
    }

    #[test]
    fn test_key_changes_with_areas() {
        let weights = ImportanceWeights::default();
        let a = vec![sample_area("000505", 1200.0)];
        let b = vec![sample_area("000505", 1201.0)];

        assert_ne!(ResultCache::key(&a, &weights), ResultCache::key(&b, &weights));
    }

    #[test]
    fn test_get_requires_matching_key() {
        let areas = vec![sample_area("000505", 1200.0)];
        let weights = ImportanceWeights::default();
        let key = ResultCache::key(&areas, &weights);

        let mut cache = ResultCache::new();
        assert!(cache.get(&key).is_none());

        cache.put(key.clone(), vec![ScoredArea::from_area(&areas[0], 0.5)]);
        assert!(cache.get(&key).is_some());
        assert!(cache.get("somethingelse").is_none());

        cache.clear();
        assert!(cache.get(&key).is_none());
    }
}
