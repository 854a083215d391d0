//! Sufficiency oracle
//!
//! A requirement with no record is sufficient everywhere. A requirement with
//! a record is sufficient only under the configurations it certifies.

use crate::record::SufficiencyRecord;
use crate::scenario::ScenarioSet;
use std::collections::{HashMap, HashSet};

/// Source of sufficiency certifications
pub trait SufficiencyOracle {
    /// Configurations certified for `requirement_id`, or `None` when the
    /// requirement has no record at all
    fn certified(&self, requirement_id: &str) -> Option<&HashSet<ScenarioSet>>;

    /// Whether `requirement_id` may stay in a test run under `configuration`
    fn is_sufficient(&self, requirement_id: &str, configuration: &ScenarioSet) -> bool {
        self.certified(requirement_id)
            .map_or(true, |sets| sets.contains(configuration))
    }
}

/// In-memory sufficiency table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SufficiencyTable {
    records: HashMap<String, HashSet<ScenarioSet>>,
}

impl SufficiencyTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from feed rows
    ///
    /// Each row replaces any earlier certification for the same requirement,
    /// so a requirement ends up certified for the configuration of its last
    /// row.
    #[must_use]
    pub fn from_records(records: &[SufficiencyRecord]) -> Self {
        let mut table = Self::new();
        for record in records {
            table
                .records
                .insert(record.requirement_id.clone(), HashSet::from([record.configuration()]));
        }
        table
    }

    /// Add one more certified configuration for a requirement
    #[must_use]
    pub fn certify(
        mut self,
        requirement_id: impl Into<String>,
        configuration: ScenarioSet,
    ) -> Self {
        self.records
            .entry(requirement_id.into())
            .or_default()
            .insert(configuration);
        self
    }

    /// Number of requirements with a record
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl SufficiencyOracle for SufficiencyTable {
    fn certified(&self, requirement_id: &str) -> Option<&HashSet<ScenarioSet>> {
        self.records.get(requirement_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unrecorded_requirement_is_always_sufficient() {
        let table = SufficiencyTable::new();
        assert!(table.is_sufficient("r1", &ScenarioSet::parse("a")));
        assert!(table.is_sufficient("r1", &ScenarioSet::new()));
    }

    #[test]
    fn recorded_requirement_needs_exact_set() {
        let table = SufficiencyTable::from_records(&[SufficiencyRecord::new("r1", "b,a")]);
        assert!(table.is_sufficient("r1", &ScenarioSet::parse("a,b")));
        assert!(!table.is_sufficient("r1", &ScenarioSet::parse("a")));
        assert!(!table.is_sufficient("r1", &ScenarioSet::parse("a,b,c")));
    }

    #[test]
    fn later_record_replaces_earlier() {
        let table = SufficiencyTable::from_records(&[
            SufficiencyRecord::new("r1", "a"),
            SufficiencyRecord::new("r1", "b"),
        ]);
        assert_eq!(table.len(), 1);
        assert!(!table.is_sufficient("r1", &ScenarioSet::parse("a")));
        assert!(table.is_sufficient("r1", &ScenarioSet::parse("b")));
    }

    #[test]
    fn certify_accumulates() {
        let table = SufficiencyTable::new()
            .certify("r1", ScenarioSet::parse("a"))
            .certify("r1", ScenarioSet::parse("b"));
        assert!(table.is_sufficient("r1", &ScenarioSet::parse("a")));
        assert!(table.is_sufficient("r1", &ScenarioSet::parse("b")));
    }
}
