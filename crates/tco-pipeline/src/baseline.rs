//! Unoptimized baseline sequence
//!
//! The comparison sequence runs the pruned tests in their original order.
//! Optimized tests can be relabelled with their baseline position through
//! the UUID each test keeps from generation onward.

use crate::error::CrossReferenceError;
use std::collections::HashMap;
use tco_model::{OrderedTest, ScenarioSet, TestConfiguration};

/// Sequence `tests` in input order, starting from the empty configuration
#[must_use]
pub fn unoptimized_order(tests: &[TestConfiguration]) -> Vec<OrderedTest> {
    let mut current = ScenarioSet::new();
    tests
        .iter()
        .enumerate()
        .map(|(k, test)| {
            let ordered = OrderedTest::after(k + 1, &current, test.clone());
            current = test.scenario_set();
            ordered
        })
        .collect()
}

/// Baseline id of each optimized test, in optimized order
///
/// # Errors
/// Returns [`CrossReferenceError::UnknownTest`] if an optimized test has no
/// baseline counterpart.
pub fn baseline_ids(
    optimized: &[OrderedTest],
    baseline: &[OrderedTest],
) -> Result<Vec<usize>, CrossReferenceError> {
    let by_uuid: HashMap<_, _> = baseline.iter().map(|t| (t.uuid(), t.id)).collect();
    optimized
        .iter()
        .map(|t| {
            by_uuid
                .get(&t.uuid())
                .copied()
                .ok_or(CrossReferenceError::UnknownTest { uuid: t.uuid() })
        })
        .collect()
}

/// Replace each optimized test's id with its baseline id
///
/// Leaves `optimized` untouched on error.
///
/// # Errors
/// See [`baseline_ids`].
pub fn relabel_with_baseline_ids(
    optimized: &mut [OrderedTest],
    baseline: &[OrderedTest],
) -> Result<(), CrossReferenceError> {
    let ids = baseline_ids(optimized, baseline)?;
    for (test, id) in optimized.iter_mut().zip(ids) {
        test.id = id;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tests(raw: &[&str]) -> Vec<TestConfiguration> {
        raw.iter()
            .map(|s| TestConfiguration::new(&ScenarioSet::parse(s)))
            .collect()
    }

    #[test]
    fn baseline_walks_input_order() {
        let seq = unoptimized_order(&tests(&["1,2", "2,3", ""]));
        assert_eq!(seq.iter().map(|t| t.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(seq[0].apply, vec!["1", "2"]);
        assert_eq!(seq[1].apply, vec!["3"]);
        assert_eq!(seq[1].retract, vec!["1"]);
        assert_eq!(seq[2].retract, vec!["2", "3"]);
    }

    #[test]
    fn relabel_maps_by_uuid() {
        let input = tests(&["a", "b", "c"]);
        let baseline = unoptimized_order(&input);
        let mut optimized = unoptimized_order(&[input[2].clone(), input[0].clone()]);

        relabel_with_baseline_ids(&mut optimized, &baseline).unwrap();
        assert_eq!(optimized[0].id, 3);
        assert_eq!(optimized[1].id, 1);
    }

    #[test]
    fn unknown_uuid_is_an_error() {
        let baseline = unoptimized_order(&tests(&["a"]));
        let mut stranger = unoptimized_order(&tests(&["a"]));
        let err = relabel_with_baseline_ids(&mut stranger, &baseline).unwrap_err();
        assert_eq!(
            err,
            CrossReferenceError::UnknownTest {
                uuid: stranger[0].uuid()
            }
        );
        assert_eq!(stranger[0].id, 1);
    }
}
