//! Test configurations
//!
//! Defines the generated [`TestConfiguration`] and the [`OrderedTest`] it
//! becomes once placed in an execution sequence. Field names are the JSON
//! artifact names exchanged with the reporting layer.

use crate::digest::ConfigDigest;
use crate::scenario::ScenarioSet;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use uuid::Uuid;

/// Requirements covering one quantity inside a test
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityEntry {
    /// Sorted requirement identifiers
    pub requirements: Vec<String>,
}

impl QuantityEntry {
    #[must_use]
    pub fn new(requirements: Vec<String>) -> Self {
        Self { requirements }
    }
}

/// A distinct test configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestConfiguration {
    /// Primary identity, preserved through pruning and ordering
    pub uuid: Uuid,
    pub config_digest: ConfigDigest,
    /// Sorted scenario identifiers
    pub scenarios: Vec<String>,
    /// Quantity id -> requirements of this configuration or any strict subset
    pub quantities: BTreeMap<String, QuantityEntry>,
    /// Requirements whose scenario set is exactly this configuration
    pub requirements_direct: Vec<String>,
    /// Quantities with at least one direct requirement
    pub quantities_direct: Vec<String>,
}

impl TestConfiguration {
    /// New test for `set` with a fresh UUID and no quantities
    #[must_use]
    pub fn new(set: &ScenarioSet) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            config_digest: set.digest(),
            scenarios: set.to_sorted_vec(),
            quantities: BTreeMap::new(),
            requirements_direct: Vec::new(),
            quantities_direct: Vec::new(),
        }
    }

    /// The configuration as a set
    #[must_use]
    pub fn scenario_set(&self) -> ScenarioSet {
        ScenarioSet::from_ids(self.scenarios.iter().cloned())
    }

    /// Every requirement listed under any quantity
    #[must_use]
    pub fn requirement_ids(&self) -> BTreeSet<&str> {
        self.quantities
            .values()
            .flat_map(|entry| entry.requirements.iter().map(String::as_str))
            .collect()
    }
}

/// A test at a fixed position of an execution sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedTest {
    /// 1-based position in the sequence
    pub id: usize,
    #[serde(flatten)]
    pub test: TestConfiguration,
    /// Scenarios added relative to the predecessor, sorted
    pub apply: Vec<String>,
    /// Scenarios removed relative to the predecessor, sorted
    pub retract: Vec<String>,
}

impl OrderedTest {
    /// Place `test` after a predecessor configuration
    #[must_use]
    pub fn after(id: usize, previous: &ScenarioSet, test: TestConfiguration) -> Self {
        let current = test.scenario_set();
        Self {
            id,
            apply: current.difference(previous),
            retract: previous.difference(&current),
            test,
        }
    }

    #[inline]
    #[must_use]
    pub fn uuid(&self) -> Uuid {
        self.test.uuid
    }

    #[inline]
    #[must_use]
    pub fn scenarios(&self) -> &[String] {
        &self.test.scenarios
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn new_test_sorts_scenarios() {
        let test = TestConfiguration::new(&ScenarioSet::parse("b,a"));
        assert_eq!(test.scenarios, vec!["a", "b"]);
        assert_eq!(test.config_digest, ConfigDigest::of_sorted(&["a", "b"]));
    }

    #[test]
    fn ordered_test_computes_deltas() {
        let previous = ScenarioSet::parse("a,b");
        let test = TestConfiguration::new(&ScenarioSet::parse("b,c"));
        let ordered = OrderedTest::after(3, &previous, test);
        assert_eq!(ordered.id, 3);
        assert_eq!(ordered.apply, vec!["c"]);
        assert_eq!(ordered.retract, vec!["a"]);
    }

    #[test]
    fn ordered_test_serializes_flat() {
        let test = TestConfiguration::new(&ScenarioSet::parse("a"));
        let ordered = OrderedTest::after(1, &ScenarioSet::new(), test);
        let value = serde_json::to_value(&ordered).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["scenarios"], serde_json::json!(["a"]));
        assert_eq!(value["apply"], serde_json::json!(["a"]));
        assert!(value.get("test").is_none());

        let back: OrderedTest = serde_json::from_value(value).unwrap();
        assert_eq!(back, ordered);
    }

    #[test]
    fn requirement_ids_spans_quantities() {
        let mut test = TestConfiguration::new(&ScenarioSet::parse("a"));
        test.quantities
            .insert("q1".into(), QuantityEntry::new(vec!["r1".into(), "r2".into()]));
        test.quantities
            .insert("q2".into(), QuantityEntry::new(vec!["r2".into()]));
        assert_eq!(test.requirement_ids().into_iter().collect::<Vec<_>>(), vec!["r1", "r2"]);
    }
}
