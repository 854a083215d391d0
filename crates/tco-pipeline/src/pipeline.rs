//! End-to-end pipeline
//!
//! Runs generation, pruning and ordering as one unit of work:
//! 1. Generate configurations from the requirements feed
//! 2. Prune them against the sufficiency oracle
//! 3. Order the survivors with 2-opt
//! 4. Build the unoptimized baseline and cost both sequences
//!
//! Every stage consumes its input and returns a fresh collection.

use crate::baseline::{baseline_ids, unoptimized_order};
use crate::config::OptimizerConfig;
use crate::error::{CrossReferenceError, PipelineError};
use crate::generate::{generate_tests, GenerationReport};
use crate::optimize::{optimize_test_order, OptimizedOrder};
use crate::prune::{prune_tests, PruneReport};
use crate::report::{calculate_costs, CostSummary};
use serde::{Deserialize, Serialize};
use tco_model::feed::{self, SparqlResults};
use tco_model::{CostTable, OrderedTest, RequirementRecord, SufficiencyOracle, SufficiencyTable};

/// Everything one pipeline run produces
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Generated tests, before pruning
    pub generation: GenerationReport,
    pub pruning: PruneReport,
    pub optimized: OptimizedOrder,
    /// Pruned tests in original order
    pub baseline: Vec<OrderedTest>,
    pub optimized_costs: CostSummary,
    pub baseline_costs: CostSummary,
}

impl PipelineReport {
    /// Baseline id of each optimized test, in optimized order
    ///
    /// # Errors
    /// See [`crate::baseline::baseline_ids`].
    pub fn baseline_ids(&self) -> Result<Vec<usize>, CrossReferenceError> {
        baseline_ids(&self.optimized.tests, &self.baseline)
    }

    /// Combined cost saved by the optimized order
    #[must_use]
    pub fn savings(&self) -> i64 {
        self.baseline_costs.total_combined_cost - self.optimized_costs.total_combined_cost
    }
}

/// Test configuration pipeline
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: OptimizerConfig,
}

impl Pipeline {
    #[inline]
    #[must_use]
    pub fn new(config: OptimizerConfig) -> Self {
        Self { config }
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &OptimizerConfig {
        &self.config
    }

    /// Run all stages
    ///
    /// # Errors
    /// Returns [`PipelineError`] only for internal invariant violations;
    /// malformed requirement rows are reported in the generation report.
    pub fn run<O>(
        &self,
        requirements: &[RequirementRecord],
        sufficiency: &O,
        costs: &CostTable,
    ) -> Result<PipelineReport, PipelineError>
    where
        O: SufficiencyOracle + ?Sized,
    {
        tracing::info!("Running pipeline over {} requirement rows", requirements.len());

        let generation = generate_tests(requirements);
        let pruning = prune_tests(generation.tests.clone(), sufficiency);
        let optimized = optimize_test_order(&pruning.tests, costs, &self.config)?;
        let baseline = unoptimized_order(&pruning.tests);

        let optimized_costs = calculate_costs(&optimized.tests, costs);
        let baseline_costs = calculate_costs(&baseline, costs);
        tracing::info!(
            "Combined cost: {} optimized, {} unoptimized",
            optimized_costs.total_combined_cost,
            baseline_costs.total_combined_cost
        );

        Ok(PipelineReport {
            generation,
            pruning,
            optimized,
            baseline,
            optimized_costs,
            baseline_costs,
        })
    }

    /// Run all stages over SPARQL result documents
    ///
    /// # Errors
    /// See [`Pipeline::run`].
    pub fn run_feeds(
        &self,
        requirements: &SparqlResults,
        sufficiency: &SparqlResults,
        costs: &CostTable,
    ) -> Result<PipelineReport, PipelineError> {
        let records = feed::requirements_from_sparql(requirements);
        let table = SufficiencyTable::from_records(&feed::sufficiency_from_sparql(sufficiency));
        self.run(&records, &table, costs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tco_model::SufficiencyRecord;

    #[test]
    fn empty_run() {
        let report = Pipeline::default()
            .run(&[], &SufficiencyTable::new(), &CostTable::default())
            .unwrap();
        assert!(report.generation.tests.is_empty());
        assert!(report.optimized.tests.is_empty());
        assert_eq!(report.optimized.reconfiguration_cost, 0);
        assert_eq!(report.savings(), 0);
    }

    #[test]
    fn full_run_links_sequences() {
        let requirements = vec![
            RequirementRecord::new("R1", "Q1", "a"),
            RequirementRecord::new("R2", "Q2", "a,b"),
            RequirementRecord::new("R3", "Q1", "b"),
            RequirementRecord::new("R4", "Q3", "c"),
        ];
        let table = SufficiencyTable::from_records(&[SufficiencyRecord::new("R4", "a,b")]);
        let costs = CostTable::default()
            .with_scenario("a", 2)
            .with_scenario("b", 4)
            .with_scenario("c", 8);

        let report = Pipeline::default().run(&requirements, &table, &costs).unwrap();

        assert_eq!(report.generation.tests.len(), 4);
        assert_eq!(report.pruning.tests.len(), 3);
        assert_eq!(report.optimized.tests.len(), 3);
        assert_eq!(
            report.optimized_costs.total_combined_cost,
            report.optimized.reconfiguration_cost
        );

        let mut ids = report.baseline_ids().unwrap();
        ids.sort_unstable();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
