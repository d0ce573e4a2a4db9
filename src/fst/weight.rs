use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Weight in the tropical semiring: `times` is addition, `plus` is minimum.
///
/// Lower is better. `zero()` (positive infinity) marks an impossible path,
/// `one()` (0.0) is the identity for path extension.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TropicalWeight(pub f32);

impl TropicalWeight {
    pub fn one() -> Self {
        TropicalWeight(0.0)
    }

    pub fn zero() -> Self {
        TropicalWeight(f32::INFINITY)
    }

    pub fn value(self) -> f32 {
        self.0
    }

    /// Extend a path by another weight.
    pub fn times(self, other: TropicalWeight) -> Self {
        TropicalWeight(self.0 + other.0)
    }

    /// Pick the better of two alternatives.
    pub fn plus(self, other: TropicalWeight) -> Self {
        if other < self {
            other
        } else {
            self
        }
    }

    pub fn is_zero(self) -> bool {
        self.0 == f32::INFINITY
    }

    /// Usable as a transition or final weight: finite and not negative.
    pub fn is_valid(self) -> bool {
        self.0.is_finite() && self.0 >= 0.0
    }
}

impl Default for TropicalWeight {
    fn default() -> Self {
        TropicalWeight::one()
    }
}

impl Eq for TropicalWeight {}

impl PartialOrd for TropicalWeight {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TropicalWeight {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for TropicalWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            write!(f, "Infinity")
        } else {
            write!(f, "{}", self.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_times_adds() {
        let w = TropicalWeight(1.5).times(TropicalWeight(2.0));
        assert_eq!(w, TropicalWeight(3.5));
    }

    #[test]
    fn test_plus_takes_minimum() {
        assert_eq!(
            TropicalWeight(1.0).plus(TropicalWeight(0.5)),
            TropicalWeight(0.5)
        );
        assert_eq!(
            TropicalWeight(0.5).plus(TropicalWeight(1.0)),
            TropicalWeight(0.5)
        );
    }

    #[test]
    fn test_identities() {
        let w = TropicalWeight(2.0);
        assert_eq!(w.times(TropicalWeight::one()), w);
        assert_eq!(w.plus(TropicalWeight::zero()), w);
        assert!(TropicalWeight::zero().is_zero());
    }

    #[test]
    fn test_ordering_is_total() {
        let mut weights = vec![
            TropicalWeight(3.0),
            TropicalWeight::zero(),
            TropicalWeight(0.0),
            TropicalWeight(1.0),
        ];
        weights.sort();
        assert_eq!(
            weights,
            vec![
                TropicalWeight(0.0),
                TropicalWeight(1.0),
                TropicalWeight(3.0),
                TropicalWeight::zero()
            ]
        );
    }

    #[test]
    fn test_validity() {
        assert!(TropicalWeight(0.0).is_valid());
        assert!(!TropicalWeight::zero().is_valid());
        assert!(!TropicalWeight(-1.0).is_valid());
        assert!(!TropicalWeight(f32::NAN).is_valid());
    }

    #[test]
    fn test_serializes_as_plain_number() {
        let json = serde_json::to_string(&TropicalWeight(1.5)).unwrap();
        assert_eq!(json, "1.5");
    }
}
