//! SPARQL result feeds
//!
//! The data-loading layer hands over query results in the SPARQL 1.1 JSON
//! results format:
//!
//! ```json
//! {"results": {"bindings": [{"reqName": {"type": "literal", "value": "R1"}}]}}
//! ```
//!
//! Structural problems (invalid JSON, no `results.bindings`) are fatal.
//! Missing columns in requirement and sufficiency rows are not; those rows
//! surface as partially empty records. Cost rows must be complete.

use crate::cost::{Cost, CostTable};
use crate::error::FeedError;
use crate::record::{RequirementRecord, SufficiencyRecord};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Requirement identifier column
pub const REQUIREMENT_COLUMN: &str = "reqName";
/// Quantity identifier column
pub const QUANTITY_COLUMN: &str = "quaID";
/// Comma-joined scenario identifiers column
pub const SCENARIOS_COLUMN: &str = "scenarios";
/// Scenario identifier column of the scenario cost feed
pub const SCENARIO_ID_COLUMN: &str = "scenarioID";
/// Quantity identifier column of the observation cost feed
pub const QUANTITY_ID_COLUMN: &str = "quantityID";
/// Cost column of both cost feeds
pub const COST_COLUMN: &str = "cost";

/// One RDF term of a binding
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BindingTerm {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
}

/// One result row: column name -> term
pub type Binding = HashMap<String, BindingTerm>;

/// `results` member of a result document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparqlBindings {
    pub bindings: Vec<Binding>,
}

/// SPARQL JSON result document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SparqlResults {
    pub results: SparqlBindings,
}

impl SparqlResults {
    /// Parse a result document
    ///
    /// # Errors
    /// Returns [`FeedError::Json`] if the text is not a result document
    pub fn from_json(text: &str) -> Result<Self, FeedError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a result document from disk
    ///
    /// # Errors
    /// Returns [`FeedError::Io`] or [`FeedError::Json`]
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, FeedError> {
        read_json(path)
    }

    #[inline]
    #[must_use]
    pub fn bindings(&self) -> &[Binding] {
        &self.results.bindings
    }
}

/// Value of `column` in `binding`, if present and non-null
#[must_use]
pub fn binding_value<'a>(binding: &'a Binding, column: &str) -> Option<&'a str> {
    binding.get(column)?.value.as_deref()
}

/// Read any JSON document from disk
///
/// # Errors
/// Returns [`FeedError::Io`] if the file cannot be read and
/// [`FeedError::Json`] if it does not decode into `T`
pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, FeedError> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|source| FeedError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

/// Requirement rows, one record per binding
#[must_use]
pub fn requirements_from_sparql(doc: &SparqlResults) -> Vec<RequirementRecord> {
    doc.bindings()
        .iter()
        .map(|binding| RequirementRecord {
            requirement_id: binding_value(binding, REQUIREMENT_COLUMN).map(str::to_string),
            quantity_id: binding_value(binding, QUANTITY_COLUMN).map(str::to_string),
            scenarios: binding_value(binding, SCENARIOS_COLUMN).map(str::to_string),
        })
        .collect()
}

/// Sufficiency rows; bindings missing a column are dropped
#[must_use]
pub fn sufficiency_from_sparql(doc: &SparqlResults) -> Vec<SufficiencyRecord> {
    doc.bindings()
        .iter()
        .filter_map(|binding| {
            Some(SufficiencyRecord::new(
                binding_value(binding, REQUIREMENT_COLUMN)?,
                binding_value(binding, SCENARIOS_COLUMN)?,
            ))
        })
        .collect()
}

/// `id_column -> cost` map from a cost feed
///
/// # Errors
/// Returns [`FeedError::MissingColumn`] for incomplete rows and
/// [`FeedError::InvalidCost`] for non-integer costs
pub fn cost_entries_from_sparql(
    doc: &SparqlResults,
    id_column: &'static str,
) -> Result<BTreeMap<String, Cost>, FeedError> {
    let mut entries = BTreeMap::new();
    for (index, binding) in doc.bindings().iter().enumerate() {
        let id = binding_value(binding, id_column).ok_or(FeedError::MissingColumn {
            index,
            column: id_column,
        })?;
        let raw = binding_value(binding, COST_COLUMN).ok_or(FeedError::MissingColumn {
            index,
            column: COST_COLUMN,
        })?;
        let cost = raw.trim().parse::<Cost>().map_err(|_| FeedError::InvalidCost {
            index,
            id: id.to_string(),
            value: raw.to_string(),
        })?;
        entries.insert(id.to_string(), cost);
    }
    Ok(entries)
}

/// Cost table from the scenario and observation cost feeds
///
/// # Errors
/// See [`cost_entries_from_sparql`]
pub fn cost_table_from_sparql(
    scenario_costs: &SparqlResults,
    observation_costs: &SparqlResults,
) -> Result<CostTable, FeedError> {
    Ok(CostTable::new(
        cost_entries_from_sparql(scenario_costs, SCENARIO_ID_COLUMN)?,
        cost_entries_from_sparql(observation_costs, QUANTITY_ID_COLUMN)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    const REQUIREMENTS: &str = r#"{
        "head": {"vars": ["reqName", "quaID", "scenarios"]},
        "results": {"bindings": [
            {"reqName": {"type": "literal", "value": "R1"},
             "quaID": {"type": "literal", "value": "Q1"},
             "scenarios": {"type": "literal", "value": "1,2"}},
            {"reqName": {"type": "literal", "value": "R2"},
             "scenarios": {"type": "literal", "value": "1"}}
        ]}
    }"#;

    #[test]
    fn decodes_requirement_rows() {
        let doc = SparqlResults::from_json(REQUIREMENTS).unwrap();
        let records = requirements_from_sparql(&doc);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], RequirementRecord::new("R1", "Q1", "1,2"));
        assert_eq!(records[1].quantity_id, None);
    }

    #[test]
    fn null_values_are_missing() {
        let doc = SparqlResults::from_json(
            r#"{"results": {"bindings": [{"reqName": {"value": null}}]}}"#,
        )
        .unwrap();
        assert_eq!(requirements_from_sparql(&doc)[0].requirement_id, None);
    }

    #[test]
    fn sufficiency_skips_incomplete_rows() {
        let doc = SparqlResults::from_json(
            r#"{"results": {"bindings": [
                {"reqName": {"value": "R1"}, "scenarios": {"value": "1"}},
                {"reqName": {"value": "R2"}}
            ]}}"#,
        )
        .unwrap();
        let records = sufficiency_from_sparql(&doc);
        assert_eq!(records, vec![SufficiencyRecord::new("R1", "1")]);
    }

    #[test]
    fn malformed_document_is_fatal() {
        assert!(matches!(
            SparqlResults::from_json("{\"results\": 3}"),
            Err(FeedError::Json(_))
        ));
        assert!(matches!(
            SparqlResults::from_json("not json"),
            Err(FeedError::Json(_))
        ));
    }

    #[test]
    fn decodes_cost_feeds() {
        let scenarios = SparqlResults::from_json(
            r#"{"results": {"bindings": [
                {"scenarioID": {"value": "1"}, "cost": {"value": "10"}},
                {"scenarioID": {"value": "2"}, "cost": {"value": " 3 "}}
            ]}}"#,
        )
        .unwrap();
        let observations = SparqlResults::from_json(
            r#"{"results": {"bindings": [
                {"quantityID": {"value": "Q1"}, "cost": {"value": "7"}}
            ]}}"#,
        )
        .unwrap();
        let table = cost_table_from_sparql(&scenarios, &observations).unwrap();
        assert_eq!(table.scenario_cost("1"), 10);
        assert_eq!(table.scenario_cost("2"), 3);
        assert_eq!(table.observation_cost("Q1"), 7);
    }

    #[test]
    fn non_integer_cost_is_fatal() {
        let doc = SparqlResults::from_json(
            r#"{"results": {"bindings": [
                {"scenarioID": {"value": "1"}, "cost": {"value": "1.5"}}
            ]}}"#,
        )
        .unwrap();
        let err = cost_entries_from_sparql(&doc, SCENARIO_ID_COLUMN).unwrap_err();
        assert!(matches!(err, FeedError::InvalidCost { index: 0, .. }));
    }

    #[test]
    fn incomplete_cost_row_is_fatal() {
        let doc = SparqlResults::from_json(
            r#"{"results": {"bindings": [{"scenarioID": {"value": "1"}}]}}"#,
        )
        .unwrap();
        let err = cost_entries_from_sparql(&doc, SCENARIO_ID_COLUMN).unwrap_err();
        assert!(matches!(
            err,
            FeedError::MissingColumn {
                index: 0,
                column: COST_COLUMN
            }
        ));
    }

    #[test]
    fn reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(REQUIREMENTS.as_bytes()).unwrap();
        let doc = SparqlResults::from_path(file.path()).unwrap();
        assert_eq!(doc.bindings().len(), 2);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = SparqlResults::from_path("/nonexistent/feed.json").unwrap_err();
        assert!(err.to_string().contains("/nonexistent/feed.json"));
    }
}
