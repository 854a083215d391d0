//! Test order optimization
//!
//! Prepends the empty "nothing applied" configuration, solves the tour,
//! rotates it so the empty configuration comes first, and walks it as a path
//! emitting one [`OrderedTest`] per real test.

use super::matrix::DistanceMatrix;
use super::two_opt::{TwoOpt, TwoOptStats};
use crate::config::OptimizerConfig;
use crate::error::OptimizeError;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tco_model::{Cost, CostTable, OrderedTest, ScenarioSet, TestConfiguration};

/// Matrix index of the empty start configuration
pub const ORIGIN: usize = 0;

/// Optimizer output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptimizedOrder {
    /// Running 2-opt cost of the closed tour (initial cost when not optimized)
    pub reconfiguration_cost: Cost,
    /// Summed observation cost of every test's quantities
    pub observation_cost: Cost,
    /// Tests in execution order, ids `1..=n`
    pub tests: Vec<OrderedTest>,
    #[serde(skip)]
    pub stats: TwoOptStats,
}

/// Observation cost of all quantities across `tests`
#[must_use]
pub fn observation_cost(tests: &[TestConfiguration], costs: &CostTable) -> Cost {
    tests
        .iter()
        .map(|t| costs.observations_cost(t.quantities.keys()))
        .sum()
}

/// Find a low-cost execution order for `tests`
///
/// # Errors
/// Returns an [`OptimizeError`] only when the solved tour violates its own
/// construction invariants, which indicates a bug.
pub fn optimize_test_order(
    tests: &[TestConfiguration],
    costs: &CostTable,
    config: &OptimizerConfig,
) -> Result<OptimizedOrder, OptimizeError> {
    tracing::info!("loaded {} cost map entries", costs.len());

    let mut tests = tests.to_vec();
    if config.resort {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        tests.shuffle(&mut rng);
    }

    let configurations: Vec<ScenarioSet> = std::iter::once(ScenarioSet::new())
        .chain(tests.iter().map(TestConfiguration::scenario_set))
        .collect();
    let matrix = DistanceMatrix::build(&configurations, costs);
    let observation_cost = observation_cost(&tests, costs);

    if config.concorde {
        tracing::warn!("exact solver not available, using 2-opt instead");
    }

    let mut solver = TwoOpt::new(&matrix);
    tracing::info!("initial tour cost: {}", solver.cost());
    if config.optimize {
        solver.optimize(config.strategy, config.max_passes);
    }
    let stats = solver.stats();
    let (mut tour, reconfiguration_cost) = solver.into_tour();
    tracing::info!("optimized tour cost: {}", reconfiguration_cost);

    let start = tour
        .iter()
        .position(|&node| node == ORIGIN)
        .ok_or(OptimizeError::OriginMissing)?;
    tour.rotate_left(start);

    let mut ordered = Vec::with_capacity(tests.len());
    for (position, pair) in tour.windows(2).enumerate() {
        let (current, next) = (pair[0], pair[1]);
        let test = next
            .checked_sub(1)
            .and_then(|k| tests.get(k))
            .ok_or(OptimizeError::OriginRevisited {
                position: position + 1,
            })?;
        ordered.push(OrderedTest::after(
            position + 1,
            &configurations[current],
            test.clone(),
        ));
    }

    tracing::info!("emitting {} test configurations", ordered.len());

    Ok(OptimizedOrder {
        reconfiguration_cost,
        observation_cost,
        tests: ordered,
        stats,
    })
}
