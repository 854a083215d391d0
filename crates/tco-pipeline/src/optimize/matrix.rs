//! Reconfiguration distance matrix
//!
//! The distance between two configurations is the cost of their symmetric
//! difference: everything one has and the other lacks must be applied or
//! retracted. Only the lower triangle (`j <= i`) is stored.

use tco_model::{Cost, CostTable, ScenarioSet};

/// Symmetric pairwise reconfiguration costs
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistanceMatrix {
    weights: Vec<Vec<Cost>>,
}

impl DistanceMatrix {
    /// Build the matrix over `configurations`
    #[must_use]
    pub fn build(configurations: &[ScenarioSet], costs: &CostTable) -> Self {
        let weights = configurations
            .iter()
            .enumerate()
            .map(|(i, si)| {
                configurations[..=i]
                    .iter()
                    .map(|sj| transition_cost(si, sj, costs))
                    .collect()
            })
            .collect();
        Self { weights }
    }

    /// Number of configurations
    #[inline]
    #[must_use]
    pub fn dimension(&self) -> usize {
        self.weights.len()
    }

    /// Distance between configurations `i` and `j`
    ///
    /// # Panics
    /// Panics if either index is out of range.
    #[inline]
    #[must_use]
    pub fn distance(&self, i: usize, j: usize) -> Cost {
        if j < i {
            self.weights[i][j]
        } else {
            self.weights[j][i]
        }
    }

    /// Length of `tour` as a closed cycle
    #[must_use]
    pub fn cycle_length(&self, tour: &[usize]) -> Cost {
        let n = tour.len();
        (0..n)
            .map(|k| self.distance(tour[k], tour[(k + 1) % n]))
            .sum()
    }
}

/// Cost of moving between two configurations in either direction
#[must_use]
pub fn transition_cost(from: &ScenarioSet, to: &ScenarioSet, costs: &CostTable) -> Cost {
    costs.scenarios_cost(to.difference(from)) + costs.scenarios_cost(from.difference(to))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> CostTable {
        CostTable::default().with_scenario("1", 5).with_scenario("2", 3)
    }

    #[test]
    fn transition_cost_is_symmetric_difference() {
        let a = ScenarioSet::parse("1,2");
        let b = ScenarioSet::parse("1");
        let c = ScenarioSet::parse("2");
        assert_eq!(transition_cost(&a, &b, &table()), 3);
        assert_eq!(transition_cost(&b, &c, &table()), 8);
        assert_eq!(transition_cost(&c, &b, &table()), 8);
        assert_eq!(transition_cost(&a, &a, &table()), 0);
    }

    #[test]
    fn lower_triangle_lookup_is_symmetric() {
        let sets = vec![
            ScenarioSet::new(),
            ScenarioSet::parse("1,2"),
            ScenarioSet::parse("1"),
        ];
        let m = DistanceMatrix::build(&sets, &table());
        assert_eq!(m.dimension(), 3);
        for i in 0..3 {
            assert_eq!(m.distance(i, i), 0);
            for j in 0..3 {
                assert_eq!(m.distance(i, j), m.distance(j, i));
            }
        }
        assert_eq!(m.distance(0, 1), 8);
        assert_eq!(m.distance(2, 0), 5);
    }

    #[test]
    fn cycle_length_closes_the_loop() {
        let sets = vec![ScenarioSet::new(), ScenarioSet::parse("1")];
        let m = DistanceMatrix::build(&sets, &table());
        assert_eq!(m.cycle_length(&[0, 1]), 10);
        assert_eq!(m.cycle_length(&[0]), 0);
        assert_eq!(m.cycle_length(&[]), 0);
    }

    #[test]
    fn unknown_scenarios_are_free() {
        let sets = vec![ScenarioSet::new(), ScenarioSet::parse("x,y")];
        let m = DistanceMatrix::build(&sets, &table());
        assert_eq!(m.distance(0, 1), 0);
    }
}
