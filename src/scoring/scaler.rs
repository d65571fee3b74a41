use crate::models::AreaRecord;

use super::weights::ATTRIBUTES;

/// Min-max scaling policy: which attributes get rescaled over the working
/// set, and into which target range. The two constructors are the two
/// observed conventions; the target range cancels out of the score ordering
/// but must be applied consistently.
#[derive(Debug, Clone, PartialEq)]
pub struct ScalingPolicy {
    pub target_range: (f64, f64),
    pub rescale: Vec<String>,
}

impl ScalingPolicy {
    /// Canonical preset: every attribute rescaled into [0, 1].
    pub fn unit_range() -> Self {
        Self {
            target_range: (0.0, 1.0),
            rescale: ATTRIBUTES.iter().map(|a| (*a).to_string()).collect(),
        }
    }

    /// Alternate preset: only the absolute-magnitude attributes rescaled
    /// into [0, 100]; percentage attributes pass through as-is.
    pub fn percent_range() -> Self {
        Self {
            target_range: (0.0, 100.0),
            rescale: vec![
                "population".to_string(),
                "median_household_income".to_string(),
            ],
        }
    }

    /// Scaled value of one attribute for every area, aligned with the input
    /// order. Areas missing the attribute scale to 0 and are excluded from
    /// the observed min/max. A degenerate range (all areas identical, or a
    /// single area) scales to 0 for every area instead of dividing by zero.
    pub(crate) fn scale_attribute(&self, areas: &[AreaRecord], attribute: &str) -> Vec<f64> {
        let observed: Vec<Option<f64>> = areas
            .iter()
            .map(|area| area.attributes.get(attribute).copied())
            .collect();

        if !self.rescale.iter().any(|r| r == attribute) {
            return observed.into_iter().map(|v| v.unwrap_or(0.0)).collect();
        }

        let mut bounds: Option<(f64, f64)> = None;
        for value in observed.iter().flatten() {
            bounds = Some(match bounds {
                None => (*value, *value),
                Some((lo, hi)) => (lo.min(*value), hi.max(*value)),
            });
        }
        let Some((lo, hi)) = bounds else {
            return vec![0.0; areas.len()];
        };

        let span = hi - lo;
        let (target_lo, target_hi) = self.target_range;
        observed
            .into_iter()
            .map(|value| match value {
                Some(value) if span > 0.0 => {
                    let t = (value - lo) / span;
                    target_lo + t * (target_hi - target_lo)
                }
                _ => 0.0,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(id: &str, entries: &[(&str, f64)]) -> AreaRecord {
        let mut record = AreaRecord::new(id);
        for (attribute, value) in entries {
            record
                .attributes
                .insert((*attribute).to_string(), *value);
        }
        record
    }

    #[test]
    fn test_unit_range_endpoints() {
        let areas = vec![
            area("a", &[("population", 100.0)]),
            area("b", &[("population", 300.0)]),
            area("c", &[("population", 200.0)]),
        ];
        let scaled = ScalingPolicy::unit_range().scale_attribute(&areas, "population");
        assert_eq!(scaled, vec![0.0, 1.0, 0.5]);
    }

    #[test]
    fn test_percent_range_passthrough() {
        let areas = vec![
            area("a", &[("pct_rented", 35.0), ("population", 100.0)]),
            area("b", &[("pct_rented", 62.0), ("population", 200.0)]),
        ];
        let policy = ScalingPolicy::percent_range();

        // Percentage attributes keep their raw values.
        assert_eq!(policy.scale_attribute(&areas, "pct_rented"), vec![35.0, 62.0]);
        // Absolute-magnitude attributes map onto [0, 100].
        assert_eq!(
            policy.scale_attribute(&areas, "population"),
            vec![0.0, 100.0]
        );
    }

    #[test]
    fn test_degenerate_range_scales_to_zero() {
        let areas = vec![
            area("a", &[("population", 150.0)]),
            area("b", &[("population", 150.0)]),
        ];
        let scaled = ScalingPolicy::unit_range().scale_attribute(&areas, "population");
        assert_eq!(scaled, vec![0.0, 0.0]);
    }

    #[test]
    fn test_single_area_scales_to_zero() {
        let areas = vec![area("a", &[("population", 150.0)])];
        let scaled = ScalingPolicy::unit_range().scale_attribute(&areas, "population");
        assert_eq!(scaled, vec![0.0]);
    }

    #[test]
    fn test_missing_value_excluded_from_bounds() {
        let areas = vec![
            area("a", &[("population", 100.0)]),
            area("b", &[]),
            area("c", &[("population", 200.0)]),
        ];
        let scaled = ScalingPolicy::unit_range().scale_attribute(&areas, "population");
        assert_eq!(scaled, vec![0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_attribute_absent_everywhere_scales_to_zero() {
        let areas = vec![area("a", &[]), area("b", &[])];
        let scaled = ScalingPolicy::unit_range().scale_attribute(&areas, "population");
        assert_eq!(scaled, vec![0.0, 0.0]);
    }
}
