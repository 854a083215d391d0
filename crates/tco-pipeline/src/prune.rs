//! Sufficiency pruning
//!
//! Removes requirements that are not certified sufficient for the exact
//! configuration of the test carrying them. Quantities left without
//! requirements are dropped, then tests left without quantities.
//!
//! Each test is rebuilt rather than edited in place. `requirements_direct`
//! and `quantities_direct` are carried over unchanged.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tco_model::{QuantityEntry, SufficiencyOracle, TestConfiguration};
use uuid::Uuid;

/// A requirement removed from one quantity of one test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedRequirement {
    pub test: Uuid,
    pub quantity: String,
    pub requirement: String,
}

/// A quantity removed from one test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DroppedQuantity {
    pub test: Uuid,
    pub quantity: String,
}

/// Pruner output
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PruneReport {
    /// Surviving tests, in input order
    pub tests: Vec<TestConfiguration>,
    pub dropped_requirements: Vec<DroppedRequirement>,
    pub dropped_quantities: Vec<DroppedQuantity>,
    pub dropped_tests: Vec<Uuid>,
}

/// Prune `tests` against `oracle`
///
/// Every surviving test has at least one quantity and every surviving
/// quantity at least one requirement.
pub fn prune_tests<O>(tests: Vec<TestConfiguration>, oracle: &O) -> PruneReport
where
    O: SufficiencyOracle + ?Sized,
{
    let mut report = PruneReport::default();
    let input_count = tests.len();

    for test in tests {
        let configuration = test.scenario_set();
        let mut quantities = BTreeMap::new();

        for (quantity, entry) in &test.quantities {
            let mut keep = Vec::with_capacity(entry.requirements.len());
            for requirement in &entry.requirements {
                if oracle.is_sufficient(requirement, &configuration) {
                    keep.push(requirement.clone());
                } else {
                    tracing::info!("drop requirement {} from test {}", requirement, test.uuid);
                    report.dropped_requirements.push(DroppedRequirement {
                        test: test.uuid,
                        quantity: quantity.clone(),
                        requirement: requirement.clone(),
                    });
                }
            }

            if keep.is_empty() {
                tracing::info!("drop quantity {} from test {}", quantity, test.uuid);
                report.dropped_quantities.push(DroppedQuantity {
                    test: test.uuid,
                    quantity: quantity.clone(),
                });
            } else {
                quantities.insert(quantity.clone(), QuantityEntry::new(keep));
            }
        }

        if quantities.is_empty() {
            tracing::info!("drop test {}", test.uuid);
            report.dropped_tests.push(test.uuid);
            continue;
        }

        report.tests.push(TestConfiguration { quantities, ..test });
    }

    tracing::info!(
        "Pruned {} of {} tests ({} requirement drops, {} quantity drops)",
        report.dropped_tests.len(),
        input_count,
        report.dropped_requirements.len(),
        report.dropped_quantities.len()
    );

    report
}
