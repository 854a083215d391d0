//! Configuration generation
//!
//! Derives one [`TestConfiguration`] per distinct scenario set of the
//! requirements feed, in first-seen order. A configuration covers its own
//! ("direct") requirements plus those of every strict subset.

use crate::graph::ConfigurationGraph;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use tco_model::{QuantityEntry, RequirementRecord, ScenarioSet, TestConfiguration};

/// Why a requirement row was left out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SkipReason {
    MissingRequirementId,
    MissingQuantity,
    MissingScenarios,
}

/// A requirement row the generator did not use
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedRecord {
    /// Position in the input feed
    pub index: usize,
    pub reason: SkipReason,
}

/// Generator output
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerationReport {
    pub tests: Vec<TestConfiguration>,
    pub skipped: Vec<SkippedRecord>,
}

impl GenerationReport {
    #[inline]
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Indexes accumulated from the requirement rows
#[derive(Debug, Default)]
struct RequirementIndex {
    /// Scenario set -> direct requirements, both in first-seen order
    by_set: IndexMap<ScenarioSet, IndexSet<String>>,
    requirements_by_quantity: HashMap<String, BTreeSet<String>>,
    /// Last quantity seen for each requirement
    quantity_by_requirement: HashMap<String, String>,
}

impl RequirementIndex {
    fn insert(&mut self, requirement: &str, quantity: &str, set: ScenarioSet) {
        self.by_set
            .entry(set)
            .or_default()
            .insert(requirement.to_string());
        self.requirements_by_quantity
            .entry(quantity.to_string())
            .or_default()
            .insert(requirement.to_string());
        self.quantity_by_requirement
            .insert(requirement.to_string(), quantity.to_string());
    }

    fn direct(&self, node: usize) -> Option<&IndexSet<String>> {
        self.by_set.get_index(node).map(|(_, reqs)| reqs)
    }
}

fn classify(record: &RequirementRecord) -> Result<(&str, &str, &str), SkipReason> {
    let requirement = record
        .requirement_id
        .as_deref()
        .ok_or(SkipReason::MissingRequirementId)?;
    let quantity = record
        .quantity_id
        .as_deref()
        .ok_or(SkipReason::MissingQuantity)?;
    let scenarios = record
        .scenarios
        .as_deref()
        .ok_or(SkipReason::MissingScenarios)?;
    Ok((requirement, quantity, scenarios))
}

/// Generate the distinct test configurations implied by `records`
#[must_use]
pub fn generate_tests(records: &[RequirementRecord]) -> GenerationReport {
    let mut index = RequirementIndex::default();
    let mut skipped = Vec::new();

    for (position, record) in records.iter().enumerate() {
        match classify(record) {
            Ok((requirement, quantity, scenarios)) => {
                index.insert(requirement, quantity, ScenarioSet::parse(scenarios));
            }
            Err(reason) => {
                tracing::debug!("skipping requirement row {}: {:?}", position, reason);
                skipped.push(SkippedRecord {
                    index: position,
                    reason,
                });
            }
        }
    }

    let graph = ConfigurationGraph::build(index.by_set.keys().cloned().collect());
    tracing::debug!(
        "configuration graph: {} nodes, {} subset edges",
        graph.node_count(),
        graph.edge_count()
    );
    let tests = (0..graph.node_count())
        .filter_map(|node| build_test(&graph, &index, node))
        .collect::<Vec<_>>();

    tracing::info!(
        "Generated {} test configurations from {} requirement rows ({} skipped)",
        tests.len(),
        records.len(),
        skipped.len()
    );

    GenerationReport { tests, skipped }
}

fn build_test(
    graph: &ConfigurationGraph,
    index: &RequirementIndex,
    node: usize,
) -> Option<TestConfiguration> {
    let set = graph.node(node)?;
    let direct = index.direct(node)?;

    let mut total: BTreeSet<&str> = direct.iter().map(String::as_str).collect();
    for &subset in graph.successors(node) {
        if let Some(inherited) = index.direct(subset) {
            total.extend(inherited.iter().map(String::as_str));
        }
    }

    let quantities: BTreeSet<&str> = total
        .iter()
        .filter_map(|r| index.quantity_by_requirement.get(*r))
        .map(String::as_str)
        .collect();

    let mut test = TestConfiguration::new(set);
    for quantity in quantities {
        let requirements: Vec<String> = index
            .requirements_by_quantity
            .get(quantity)
            .into_iter()
            .flatten()
            .filter(|r| total.contains(r.as_str()))
            .cloned()
            .collect();

        if requirements.iter().any(|r| direct.contains(r)) {
            test.quantities_direct.push(quantity.to_string());
        }
        test.quantities
            .insert(quantity.to_string(), QuantityEntry::new(requirements));
    }
    test.requirements_direct = direct.iter().cloned().collect();

    Some(test)
}
