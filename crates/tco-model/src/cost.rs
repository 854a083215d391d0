//! Cost table
//!
//! Two independent lookups: scenario id -> cost and quantity/observation id
//! -> cost. Unknown ids cost zero. The table is built once per pipeline run
//! and only read afterwards.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Integer cost unit
pub type Cost = i64;

/// Scenario and observation costs
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostTable {
    #[serde(default)]
    scenarios: BTreeMap<String, Cost>,
    #[serde(default)]
    observations: BTreeMap<String, Cost>,
}

impl CostTable {
    #[must_use]
    pub fn new(scenarios: BTreeMap<String, Cost>, observations: BTreeMap<String, Cost>) -> Self {
        Self {
            scenarios,
            observations,
        }
    }

    /// With one more scenario cost
    #[inline]
    #[must_use]
    pub fn with_scenario(mut self, id: impl Into<String>, cost: Cost) -> Self {
        self.scenarios.insert(id.into(), cost);
        self
    }

    /// With one more observation cost
    #[inline]
    #[must_use]
    pub fn with_observation(mut self, id: impl Into<String>, cost: Cost) -> Self {
        self.observations.insert(id.into(), cost);
        self
    }

    /// Cost of one scenario, zero if unknown
    #[inline]
    #[must_use]
    pub fn scenario_cost(&self, id: &str) -> Cost {
        self.scenarios.get(id).copied().unwrap_or(0)
    }

    /// Cost of one observation, zero if unknown
    #[inline]
    #[must_use]
    pub fn observation_cost(&self, id: &str) -> Cost {
        self.observations.get(id).copied().unwrap_or(0)
    }

    /// Summed cost of several scenarios
    pub fn scenarios_cost<I, S>(&self, ids: I) -> Cost
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ids.into_iter()
            .map(|id| self.scenario_cost(id.as_ref()))
            .sum()
    }

    /// Summed cost of several observations
    pub fn observations_cost<I, S>(&self, ids: I) -> Cost
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ids.into_iter()
            .map(|id| self.observation_cost(id.as_ref()))
            .sum()
    }

    #[inline]
    #[must_use]
    pub fn scenarios(&self) -> &BTreeMap<String, Cost> {
        &self.scenarios
    }

    #[inline]
    #[must_use]
    pub fn observations(&self) -> &BTreeMap<String, Cost> {
        &self.observations
    }

    /// Total number of entries across both lookups
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.scenarios.len() + self.observations.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
