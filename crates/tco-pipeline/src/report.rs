//! Cost reporting
//!
//! Sums apply and retract costs over an execution sequence. The final test's
//! whole configuration is retracted at the end of the campaign, so its
//! scenarios count once more on the retract side.

use serde::{Deserialize, Serialize};
use tco_model::{Cost, CostTable, OrderedTest};

/// Totals for one execution sequence
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostSummary {
    pub total_apply_cost: Cost,
    pub total_retract_cost: Cost,
    pub total_combined_cost: Cost,
}

/// Cost figures for one test of a sequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCost {
    pub id: usize,
    /// Cost of setting up this configuration from scratch
    pub absolute_cost: Cost,
    /// Apply plus retract cost of reaching it from its predecessor
    pub ordered_cost: Cost,
    /// Running sum of ordered costs; the last entry includes teardown
    pub cumulative_cost: Cost,
}

/// Total apply, retract and combined cost of `tests`
///
/// An empty sequence costs nothing.
#[must_use]
pub fn calculate_costs(tests: &[OrderedTest], costs: &CostTable) -> CostSummary {
    let mut total_apply_cost = 0;
    let mut total_retract_cost = 0;

    for test in tests {
        total_apply_cost += costs.scenarios_cost(&test.apply);
        total_retract_cost += costs.scenarios_cost(&test.retract);
    }
    if let Some(last) = tests.last() {
        total_retract_cost += costs.scenarios_cost(last.scenarios());
    }

    let summary = CostSummary {
        total_apply_cost,
        total_retract_cost,
        total_combined_cost: total_apply_cost + total_retract_cost,
    };
    tracing::debug!("cost summary: {:?}", summary);
    summary
}

/// Per-test cost figures of `tests`, in sequence order
#[must_use]
pub fn cost_breakdown(tests: &[OrderedTest], costs: &CostTable) -> Vec<TestCost> {
    let mut cumulative = 0;
    let mut rows: Vec<TestCost> = tests
        .iter()
        .map(|test| {
            let ordered_cost =
                costs.scenarios_cost(&test.apply) + costs.scenarios_cost(&test.retract);
            cumulative += ordered_cost;
            TestCost {
                id: test.id,
                absolute_cost: costs.scenarios_cost(test.scenarios()),
                ordered_cost,
                cumulative_cost: cumulative,
            }
        })
        .collect();

    if let Some(last) = rows.last_mut() {
        last.cumulative_cost += last.absolute_cost;
    }
    rows
}
