//! Scenario sets
//!
//! A [`ScenarioSet`] is the identity of a test configuration. Equality and
//! subset comparisons use set semantics; iteration is always sorted.

use crate::digest::ConfigDigest;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::convert::Infallible;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

/// Immutable set of scenario identifiers
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioSet(BTreeSet<String>);

impl ScenarioSet {
    /// Create an empty set (the "nothing applied" configuration)
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a comma-delimited scenario string
    ///
    /// Tokens are trimmed; empty tokens are dropped, so `""` parses to the
    /// empty set.
    ///
    /// Plain `split(',')` would keep them: `""` would become `{""}` and
    /// `"1, 2"` would become `{"1", " 2"}`. Digests therefore differ from
    /// tools that split without trimming, e.g. the empty configuration
    /// digests as `md5("[]")` here, not `md5("[\"\"]")`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        raw.split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Build from any list of identifiers
    #[must_use]
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(ids.into_iter().map(Into::into).collect())
    }

    /// Number of scenarios
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, scenario: &str) -> bool {
        self.0.contains(scenario)
    }

    /// Sorted iteration over scenario identifiers
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        self.0.iter().map(String::as_str)
    }

    /// `self ⊂ other`, excluding equality
    #[inline]
    #[must_use]
    pub fn is_strict_subset_of(&self, other: &Self) -> bool {
        self.0.len() < other.0.len() && self.0.is_subset(&other.0)
    }

    /// `self ⊃ other`, excluding equality
    #[inline]
    #[must_use]
    pub fn is_strict_superset_of(&self, other: &Self) -> bool {
        other.is_strict_subset_of(self)
    }

    /// Scenarios in `self` that are not in `other`, sorted ascending
    #[must_use]
    pub fn difference(&self, other: &Self) -> Vec<String> {
        self.0.difference(&other.0).cloned().collect()
    }

    /// Sorted scenario list
    #[must_use]
    pub fn to_sorted_vec(&self) -> Vec<String> {
        self.0.iter().cloned().collect()
    }

    /// Digest of the sorted scenario list
    #[must_use]
    pub fn digest(&self) -> ConfigDigest {
        ConfigDigest::of_sorted(&self.to_sorted_vec())
    }
}

impl FromIterator<String> for ScenarioSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for ScenarioSet {
    fn from_iter<T: IntoIterator<Item = &'a str>>(iter: T) -> Self {
        Self(iter.into_iter().map(str::to_string).collect())
    }
}

impl FromStr for ScenarioSet {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Display for ScenarioSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for scenario in &self.0 {
            if !first {
                f.write_str(",")?;
            }
            f.write_str(scenario)?;
            first = false;
        }
        Ok(())
    }
}
