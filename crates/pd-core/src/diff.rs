//! Count-map diffing.
//!
//! Compares two per-move count maps and classifies every disagreeing key as
//! missing, extra, or wrong. Keys where both engines agree never appear in
//! the result.

use serde::{Deserialize, Serialize};

use crate::counts::CountMap;

/// All disagreements between a reference and a test count map for one round.
///
/// The three key-sets are pairwise disjoint:
/// - `missing`: present in the reference, absent from the test (reference
///   count).
/// - `extra`: present in the test, absent from the reference (test count).
/// - `wrong`: present in both with different counts (test count).
///
/// `expected` holds the reference count for every key the reference knows
/// about, i.e. exactly the `missing` and `wrong` keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DivergenceReport {
    pub missing: CountMap,
    pub extra: CountMap,
    pub wrong: CountMap,
    pub expected: CountMap,
}

impl DivergenceReport {
    /// True when the two engines fully agreed.
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty() && self.wrong.is_empty()
    }

    /// Sorted union of all disagreeing move keys.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self
            .missing
            .keys()
            .chain(self.extra.keys())
            .chain(self.wrong.keys())
            .cloned()
            .collect();
        keys.sort();
        keys
    }
}

/// Compare two count maps and return every disagreement.
///
/// Pure function of its two snapshots; iteration order of the inputs cannot
/// affect the result.
pub fn diff_counts(reference: &CountMap, test: &CountMap) -> DivergenceReport {
    let mut report = DivergenceReport::default();

    for (key, &ref_count) in reference {
        match test.get(key) {
            None => {
                report.missing.insert(key.clone(), ref_count);
                report.expected.insert(key.clone(), ref_count);
            }
            Some(&test_count) if test_count != ref_count => {
                report.wrong.insert(key.clone(), test_count);
                report.expected.insert(key.clone(), ref_count);
            }
            Some(_) => {}
        }
    }

    for (key, &test_count) in test {
        if !reference.contains_key(key) {
            report.extra.insert(key.clone(), test_count);
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counts(pairs: &[(&str, u64)]) -> CountMap {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn equal_maps_produce_empty_report() {
        let map = counts(&[("e2e4", 20), ("d2d4", 20)]);
        let report = diff_counts(&map, &map.clone());
        assert!(report.is_empty());
        assert!(report.expected.is_empty());
    }

    #[test]
    fn single_wrong_count() {
        let reference = counts(&[("e2e4", 20), ("d2d4", 20)]);
        let test = counts(&[("e2e4", 20), ("d2d4", 19)]);
        let report = diff_counts(&reference, &test);
        assert_eq!(report.wrong, counts(&[("d2d4", 19)]));
        assert_eq!(report.expected["d2d4"], 20);
        assert!(report.missing.is_empty());
        assert!(report.extra.is_empty());
    }

    #[test]
    fn reference_only_key_is_missing() {
        let report = diff_counts(&counts(&[("a2a3", 1)]), &CountMap::new());
        assert_eq!(report.missing, counts(&[("a2a3", 1)]));
        assert!(report.extra.is_empty());
        assert!(report.wrong.is_empty());
    }

    #[test]
    fn test_only_key_is_extra() {
        let report = diff_counts(&CountMap::new(), &counts(&[("h7h8q", 3)]));
        assert_eq!(report.extra, counts(&[("h7h8q", 3)]));
        assert!(report.missing.is_empty());
        assert!(report.expected.is_empty());
    }

    #[test]
    fn keys_are_sorted_union() {
        let reference = counts(&[("g1f3", 2), ("a2a3", 1)]);
        let test = counts(&[("g1f3", 3), ("c2c4", 5)]);
        let report = diff_counts(&reference, &test);
        assert_eq!(report.keys(), ["a2a3", "c2c4", "g1f3"]);
    }

    #[test]
    fn agreeing_keys_are_excluded() {
        let reference = counts(&[("e2e4", 20), ("d2d4", 20), ("c2c4", 20)]);
        let test = counts(&[("e2e4", 20), ("d2d4", 19), ("c2c4", 20)]);
        let report = diff_counts(&reference, &test);
        assert_eq!(report.keys(), ["d2d4"]);
    }
}
