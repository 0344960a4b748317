use serde::{Deserialize, Serialize};

/// A labeled metric interval accumulating lines of code.
///
/// Bounds are inclusive. `upper == None` leaves the region open-ended, so it
/// matches every value at or above `lower`. Inputs are not validated: a
/// negative value that falls inside the bounds is accumulated like any other.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Region {
    label: String,
    lower: f64,
    upper: Option<f64>,
    weight: f64,
}

impl Region {
    pub fn new(label: impl Into<String>, lower: f64, upper: Option<f64>) -> Self {
        debug_assert!(
            upper.map_or(true, |upper| lower <= upper),
            "region lower bound exceeds upper bound"
        );
        Self {
            label: label.into(),
            lower,
            upper,
            weight: 0.0,
        }
    }

    /// Region covering `[lower, upper]`.
    pub fn bounded(label: impl Into<String>, lower: f64, upper: f64) -> Self {
        Self::new(label, lower, Some(upper))
    }

    /// Region covering `[lower, ∞)`.
    pub fn unbounded(label: impl Into<String>, lower: f64) -> Self {
        Self::new(label, lower, None)
    }

    pub fn contains(&self, value: f64) -> bool {
        match self.upper {
            Some(upper) => self.lower <= value && value <= upper,
            None => self.lower <= value,
        }
    }

    /// Accumulate `loc` when it lies inside the region. The value classifies
    /// itself, e.g. a file bucketed by its own line count.
    pub fn update_loc(&mut self, loc: f64) {
        if self.contains(loc) {
            self.weight += loc;
        }
    }

    /// Accumulate `weight` when `metric` lies inside the region.
    pub fn update(&mut self, metric: f64, weight: f64) {
        if self.contains(metric) {
            self.weight += weight;
        }
    }

    /// True when both regions accept at least one common value.
    pub fn overlaps(&self, other: &Region) -> bool {
        let self_below_other = self.upper.is_some_and(|upper| upper < other.lower);
        let other_below_self = other.upper.is_some_and(|upper| upper < self.lower);
        !self_below_other && !other_below_self
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn lower(&self) -> f64 {
        self.lower
    }

    pub fn upper(&self) -> Option<f64> {
        self.upper
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_loc_inside_bounds() {
        let mut region = Region::bounded("0-15", 0.0, 15.0);
        region.update_loc(0.0);
        region.update_loc(15.0);
        region.update_loc(7.0);
        assert_eq!(region.weight(), 22.0);
    }

    #[test]
    fn test_update_loc_outside_bounds_is_ignored() {
        let mut region = Region::bounded("16-30", 16.0, 30.0);
        region.update_loc(15.0);
        region.update_loc(31.0);
        assert_eq!(region.weight(), 0.0);
    }

    #[test]
    fn test_unbounded_region_accepts_everything_above_lower() {
        let mut region = Region::unbounded("60+", 61.0);
        region.update_loc(60.0);
        region.update_loc(61.0);
        region.update_loc(1_000_000.0);
        assert_eq!(region.weight(), 1_000_061.0);
    }

    #[test]
    fn test_update_adds_weight_not_metric() {
        let mut region = Region::bounded("6-10", 6.0, 10.0);
        region.update(8.0, 120.0);
        region.update(11.0, 500.0);
        assert_eq!(region.weight(), 120.0);
    }

    #[test]
    fn test_zero_upper_bound_is_a_real_bound() {
        let mut region = Region::bounded("zero", 0.0, 0.0);
        region.update_loc(5.0);
        assert_eq!(region.weight(), 0.0);
        region.update(0.0, 3.0);
        assert_eq!(region.weight(), 3.0);
    }

    #[test]
    fn test_negative_values_accumulate_without_validation() {
        let mut region = Region::bounded("any", -10.0, 10.0);
        region.update_loc(-4.0);
        region.update(1.0, -2.0);
        assert_eq!(region.weight(), -6.0);
    }

    #[test]
    fn test_overlaps() {
        let low = Region::bounded("0-15", 0.0, 16.0);
        let mid = Region::bounded("16-30", 15.0, 31.0);
        let high = Region::unbounded("31+", 32.0);

        assert!(low.overlaps(&mid));
        assert!(mid.overlaps(&low));
        assert!(!low.overlaps(&high));
        assert!(!mid.overlaps(&high));
        assert!(Region::unbounded("a", 1.0).overlaps(&Region::unbounded("b", 100.0)));
    }
}
