//! 2-opt local search
//!
//! The tour is a cycle over matrix indices. A move removes the edges
//! `(tour[i], tour[i+1])` and `(tour[j], tour[j+1 mod n])` and reconnects by
//! reversing `tour[i+1..=j]`.
//!
//! With [`SwapStrategy::ScanContinue`] every improving move is applied the
//! moment it is found and the scan carries on from the same `(i, j)` slot
//! without restarting. Passes repeat until one finds nothing. Changing this
//! loop order changes the resulting tours and costs.

use super::matrix::DistanceMatrix;
use crate::config::SwapStrategy;
use serde::{Deserialize, Serialize};
use tco_model::Cost;

/// Counters from one optimization run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TwoOptStats {
    /// Cost of the starting tour
    pub initial_cost: Cost,
    /// Full passes performed
    pub passes: usize,
    /// Moves applied
    pub improvements: usize,
    /// Stopped by the pass cap rather than by convergence
    pub capped: bool,
}

/// 2-opt solver over a [`DistanceMatrix`]
#[derive(Debug, Clone)]
pub struct TwoOpt<'a> {
    matrix: &'a DistanceMatrix,
    tour: Vec<usize>,
    cost: Cost,
    stats: TwoOptStats,
}

impl<'a> TwoOpt<'a> {
    /// Start from the identity tour `0, 1, .., n-1`
    #[must_use]
    pub fn new(matrix: &'a DistanceMatrix) -> Self {
        Self::with_tour(matrix, (0..matrix.dimension()).collect())
    }

    /// Start from an explicit tour
    ///
    /// `tour` must be a permutation of `0..matrix.dimension()`.
    #[must_use]
    pub fn with_tour(matrix: &'a DistanceMatrix, tour: Vec<usize>) -> Self {
        let cost = matrix.cycle_length(&tour);
        Self {
            matrix,
            tour,
            cost,
            stats: TwoOptStats {
                initial_cost: cost,
                ..TwoOptStats::default()
            },
        }
    }

    /// Running tour cost
    #[inline]
    #[must_use]
    pub fn cost(&self) -> Cost {
        self.cost
    }

    #[inline]
    #[must_use]
    pub fn tour(&self) -> &[usize] {
        &self.tour
    }

    #[inline]
    #[must_use]
    pub fn stats(&self) -> TwoOptStats {
        self.stats
    }

    /// Consume the solver, returning the tour and its cost
    #[must_use]
    pub fn into_tour(self) -> (Vec<usize>, Cost) {
        (self.tour, self.cost)
    }

    /// Improve the tour until a pass finds no improving move, or until
    /// `max_passes` passes have run
    pub fn optimize(&mut self, strategy: SwapStrategy, max_passes: Option<usize>) {
        loop {
            if max_passes.is_some_and(|cap| self.stats.passes >= cap) {
                self.stats.capped = true;
                break;
            }
            self.stats.passes += 1;

            let improved = match strategy {
                SwapStrategy::ScanContinue => self.scan_continue_pass(),
                SwapStrategy::BestImprovement => self.best_improvement_pass(),
            };
            tracing::debug!(
                "2-opt pass {}: cost {}, {} moves so far",
                self.stats.passes,
                self.cost,
                self.stats.improvements
            );

            if !improved {
                break;
            }
        }
    }

    /// Change in cycle length if `tour[i+1..=j]` were reversed
    fn delta(&self, i: usize, j: usize) -> Cost {
        let n = self.tour.len();
        let t = &self.tour;
        let d = |a: usize, b: usize| self.matrix.distance(a, b);
        let next = t[(j + 1) % n];

        d(t[i], t[j]) + d(t[i + 1], next) - d(t[i], t[i + 1]) - d(t[j], next)
    }

    fn apply(&mut self, i: usize, j: usize, delta: Cost) {
        self.tour[i + 1..=j].reverse();
        self.cost += delta;
        self.stats.improvements += 1;
    }

    fn scan_continue_pass(&mut self) -> bool {
        let n = self.tour.len();
        let mut improved = false;

        for i in 0..n.saturating_sub(1) {
            for j in (i + 2)..n {
                let delta = self.delta(i, j);
                if delta < 0 {
                    self.apply(i, j, delta);
                    improved = true;
                }
            }
        }

        improved
    }

    fn best_improvement_pass(&mut self) -> bool {
        let n = self.tour.len();
        let mut best: Option<(usize, usize, Cost)> = None;

        for i in 0..n.saturating_sub(1) {
            for j in (i + 2)..n {
                let delta = self.delta(i, j);
                if delta < best.map_or(0, |(_, _, d)| d) {
                    best = Some((i, j, delta));
                }
            }
        }

        match best {
            Some((i, j, delta)) => {
                self.apply(i, j, delta);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tco_model::{CostTable, ScenarioSet};

    fn matrix(raw: &[&str], costs: &CostTable) -> DistanceMatrix {
        let sets: Vec<ScenarioSet> = raw.iter().map(|s| ScenarioSet::parse(s)).collect();
        DistanceMatrix::build(&sets, costs)
    }

    fn unit_costs(ids: &[&str]) -> CostTable {
        ids.iter()
            .fold(CostTable::default(), |t, id| t.with_scenario(*id, 1))
    }

    #[test]
    fn identity_tour_and_initial_cost() {
        let costs = CostTable::default().with_scenario("1", 10);
        let m = matrix(&["", "", "1"], &costs);
        let solver = TwoOpt::new(&m);
        assert_eq!(solver.tour(), &[0, 1, 2]);
        assert_eq!(solver.cost(), 20);
        assert_eq!(solver.stats().initial_cost, 20);
    }

    #[test]
    fn three_nodes_cannot_improve() {
        let costs = CostTable::default().with_scenario("1", 10);
        let m = matrix(&["", "", "1"], &costs);
        let mut solver = TwoOpt::new(&m);
        solver.optimize(SwapStrategy::ScanContinue, None);
        assert_eq!(solver.cost(), 20);
        assert_eq!(solver.stats().improvements, 0);
        assert_eq!(solver.stats().passes, 1);
    }

    #[test]
    fn single_node_tour() {
        let m = matrix(&[""], &CostTable::default());
        let mut solver = TwoOpt::new(&m);
        solver.optimize(SwapStrategy::ScanContinue, None);
        assert_eq!(solver.into_tour(), (vec![0], 0));
    }

    #[test]
    fn untangles_crossing_tour() {
        // a, ab, b, abc reachable cheaply in chain order; identity order
        // jumps back and forth
        let costs = unit_costs(&["a", "b", "c", "d"]);
        let m = matrix(&["", "a,b,c,d", "a", "a,b,c", "a,b"], &costs);
        let mut solver = TwoOpt::new(&m);
        let before = solver.cost();
        solver.optimize(SwapStrategy::ScanContinue, None);
        assert!(solver.cost() < before);
        assert_eq!(solver.cost(), m.cycle_length(solver.tour()));
        assert_eq!(solver.cost(), 8);
    }

    fn scan_order_instance() -> DistanceMatrix {
        let costs = CostTable::default()
            .with_scenario("s0", 9)
            .with_scenario("s1", 12)
            .with_scenario("s2", 0)
            .with_scenario("s3", 16)
            .with_scenario("s4", 5)
            .with_scenario("s5", 5)
            .with_scenario("s6", 17)
            .with_scenario("s7", 10);
        matrix(
            &["", "s5,s7", "s0,s3,s7", "s0,s5,s6", "s1,s5", "s1,s6,s7"],
            &costs,
        )
    }

    #[test]
    fn scan_continues_after_accepted_move() {
        // Restarting the scan after each move settles at 186 on [0, 2, 1, 4, 5, 3]
        let m = scan_order_instance();
        let mut solver = TwoOpt::new(&m);
        assert_eq!(solver.cost(), 202);

        solver.optimize(SwapStrategy::ScanContinue, None);
        assert_eq!(solver.tour(), &[0, 1, 2, 3, 5, 4]);
        assert_eq!(solver.cost(), 178);
        assert_eq!(solver.cost(), m.cycle_length(solver.tour()));
    }

    #[test]
    fn running_cost_matches_recomputed_length() {
        let costs = CostTable::default()
            .with_scenario("1", 7)
            .with_scenario("2", 3)
            .with_scenario("3", 11)
            .with_scenario("4", 2);
        let m = matrix(&["", "1,2,3", "4", "1", "2,4", "1,3", "3,4", "2"], &costs);
        for strategy in [SwapStrategy::ScanContinue, SwapStrategy::BestImprovement] {
            let mut solver = TwoOpt::new(&m);
            solver.optimize(strategy, None);
            assert_eq!(solver.cost(), m.cycle_length(solver.tour()));
            let mut sorted = solver.tour().to_vec();
            sorted.sort_unstable();
            assert_eq!(sorted, (0..8).collect::<Vec<_>>());
        }
    }

    #[test]
    fn pass_cap_stops_early() {
        let costs = unit_costs(&["a", "b", "c", "d"]);
        let m = matrix(&["", "a,b,c,d", "a", "a,b,c", "a,b"], &costs);
        let mut solver = TwoOpt::new(&m);
        solver.optimize(SwapStrategy::BestImprovement, Some(1));
        assert_eq!(solver.stats().passes, 1);
        assert!(solver.stats().capped);
        assert_eq!(solver.stats().improvements, 1);
    }

    #[test]
    fn zero_pass_cap_keeps_initial_tour() {
        let costs = unit_costs(&["a", "b"]);
        let m = matrix(&["", "a,b", "a", "b"], &costs);
        let mut solver = TwoOpt::new(&m);
        solver.optimize(SwapStrategy::ScanContinue, Some(0));
        assert_eq!(solver.tour(), &[0, 1, 2, 3]);
        assert_eq!(solver.stats().passes, 0);
    }
}
