//! Input records supplied by the data-loading layer

use crate::scenario::ScenarioSet;
use serde::{Deserialize, Serialize};

/// One row of the requirements feed
///
/// Every field is optional at this level; the generator skips rows that
/// lack any of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementRecord {
    pub requirement_id: Option<String>,
    pub quantity_id: Option<String>,
    /// Comma-joined scenario identifiers
    pub scenarios: Option<String>,
}

impl RequirementRecord {
    /// Fully populated record
    #[must_use]
    pub fn new(
        requirement_id: impl Into<String>,
        quantity_id: impl Into<String>,
        scenarios: impl Into<String>,
    ) -> Self {
        Self {
            requirement_id: Some(requirement_id.into()),
            quantity_id: Some(quantity_id.into()),
            scenarios: Some(scenarios.into()),
        }
    }
}

/// One row of the sufficiency feed: `requirement_id` is certified
/// sufficient under exactly the configuration named by `scenarios`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SufficiencyRecord {
    pub requirement_id: String,
    /// Comma-joined scenario identifiers
    pub scenarios: String,
}

impl SufficiencyRecord {
    #[must_use]
    pub fn new(requirement_id: impl Into<String>, scenarios: impl Into<String>) -> Self {
        Self {
            requirement_id: requirement_id.into(),
            scenarios: scenarios.into(),
        }
    }

    /// The certified configuration
    #[must_use]
    pub fn configuration(&self) -> ScenarioSet {
        ScenarioSet::parse(&self.scenarios)
    }
}
