//! Testing utilities for TCO workspace
//!
//! Shared fixtures, proptest strategies and SPARQL document builders.

#![allow(missing_docs)]

use proptest::collection::{btree_map, btree_set, vec};
use proptest::prelude::*;
use serde_json::{json, Value};
use tco_model::feed::SparqlResults;
use tco_model::{CostTable, RequirementRecord, ScenarioSet, SufficiencyTable, TestConfiguration};

/// Requirement rows from `(requirement, quantity, scenarios)` triples
pub fn records(rows: &[(&str, &str, &str)]) -> Vec<RequirementRecord> {
    rows.iter()
        .map(|(r, q, s)| RequirementRecord::new(*r, *q, *s))
        .collect()
}

/// One configuration per comma-separated scenario list
pub fn configurations(raw: &[&str]) -> Vec<TestConfiguration> {
    raw.iter()
        .map(|s| TestConfiguration::new(&ScenarioSet::parse(s)))
        .collect()
}

/// Scenario cost table from `(scenario, cost)` pairs
pub fn scenario_costs(entries: &[(&str, i64)]) -> CostTable {
    entries
        .iter()
        .fold(CostTable::default(), |table, (id, cost)| table.with_scenario(*id, *cost))
}

/// `{1,2}` with requirement A, `{1}` with B, `{2}` with C
pub fn nested_records() -> Vec<RequirementRecord> {
    records(&[("A", "QA", "1,2"), ("B", "QB", "1"), ("C", "QC", "2")])
}

pub fn nested_costs() -> CostTable {
    scenario_costs(&[("1", 5), ("2", 3)])
}

/// A small campaign over four scenarios with overlapping configurations
pub fn campaign_records() -> Vec<RequirementRecord> {
    records(&[
        ("R1", "Q1", "s1"),
        ("R2", "Q1", "s1,s2"),
        ("R3", "Q2", "s2,s3"),
        ("R4", "Q3", "s1,s2,s3"),
        ("R5", "Q4", "s4"),
        ("R6", "Q2", "s3,s4"),
        ("R7", "Q5", "s2"),
    ])
}

pub fn campaign_costs() -> CostTable {
    scenario_costs(&[("s1", 4), ("s2", 7), ("s3", 2), ("s4", 9)])
        .with_observation("Q1", 1)
        .with_observation("Q2", 2)
        .with_observation("Q3", 3)
}

/// R4 only counts under the full three-scenario configuration
pub fn campaign_sufficiency() -> SufficiencyTable {
    SufficiencyTable::new()
        .certify("R4", ScenarioSet::parse("s1,s2,s3"))
        .certify("R5", ScenarioSet::parse("s1"))
}

/// SPARQL result document with one binding per row
pub fn sparql_document(columns: &[&str], rows: &[&[&str]]) -> Value {
    let bindings: Vec<Value> = rows
        .iter()
        .map(|row| {
            let mut binding = serde_json::Map::new();
            for (column, value) in columns.iter().zip(row.iter()) {
                binding.insert(
                    (*column).to_string(),
                    json!({ "type": "literal", "value": value }),
                );
            }
            Value::Object(binding)
        })
        .collect();
    json!({
        "head": { "vars": columns },
        "results": { "bindings": bindings }
    })
}

pub fn sparql_results(columns: &[&str], rows: &[&[&str]]) -> SparqlResults {
    serde_json::from_value(sparql_document(columns, rows)).unwrap()
}

/// Scenario identifiers drawn from a small alphabet so sets overlap often
pub fn scenario_id() -> impl Strategy<Value = String> {
    (0u8..6).prop_map(|n| format!("s{n}"))
}

pub fn scenario_set() -> impl Strategy<Value = ScenarioSet> {
    btree_set(scenario_id(), 0..5).prop_map(ScenarioSet::from_ids)
}

/// Well-formed requirement rows with a handful of quantities
pub fn requirement_records() -> impl Strategy<Value = Vec<RequirementRecord>> {
    vec((0u8..12, 0u8..4, scenario_set()), 0..16).prop_map(|rows| {
        rows.into_iter()
            .map(|(r, q, set)| {
                RequirementRecord::new(format!("R{r}"), format!("Q{q}"), set.to_string())
            })
            .collect()
    })
}

/// Non-negative scenario costs over the strategy alphabet
pub fn cost_table() -> impl Strategy<Value = CostTable> {
    btree_map(scenario_id(), 0i64..50, 0..6).prop_map(|scenarios| {
        scenarios
            .into_iter()
            .fold(CostTable::default(), |table, (id, cost)| table.with_scenario(id, cost))
    })
}

/// Distinct configurations, as generation would produce them
pub fn distinct_configurations() -> impl Strategy<Value = Vec<TestConfiguration>> {
    btree_set(scenario_set(), 0..10)
        .prop_map(|sets| sets.iter().map(TestConfiguration::new).collect())
}

pub fn sufficiency_table() -> impl Strategy<Value = SufficiencyTable> {
    vec((0u8..12, scenario_set()), 0..8).prop_map(|rows| {
        rows.into_iter().fold(SufficiencyTable::new(), |table, (r, set)| {
            table.certify(format!("R{r}"), set)
        })
    })
}
