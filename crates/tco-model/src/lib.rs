//! TCO Model
//!
//! Value types shared by every stage of the test configuration pipeline.
//!
//! # Core Concepts
//!
//! - [`ScenarioSet`]: Unordered set of scenario identifiers (a configuration)
//! - [`ConfigDigest`]: Stable MD5 digest of a configuration's sorted scenario list
//! - [`TestConfiguration`]: One generated test, with its quantity map
//! - [`OrderedTest`]: A test placed in an execution sequence, with apply/retract deltas
//! - [`CostTable`]: Scenario and observation costs, immutable after construction
//! - [`SufficiencyOracle`]: Certifies under which configurations a requirement is sufficient
//!
//! # Example
//!
//! ```rust,ignore
//! use tco_model::{feed, CostTable, ScenarioSet};
//!
//! let doc = feed::SparqlResults::from_path("Requirements.json")?;
//! let records = feed::requirements_from_sparql(&doc);
//!
//! let costs: CostTable = feed::read_json("costs.json")?;
//! let set = ScenarioSet::parse("s1,s2");
//! println!("apply cost: {}", costs.scenarios_cost(set.iter()));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
mod configuration;
mod cost;
mod digest;
mod error;
mod record;
mod scenario;
mod sufficiency;

/// SPARQL result document decoding
pub mod feed;

// Re-exports
pub use configuration::{OrderedTest, QuantityEntry, TestConfiguration};
pub use cost::{Cost, CostTable};
pub use digest::ConfigDigest;
pub use error::{DigestError, FeedError};
pub use record::{RequirementRecord, SufficiencyRecord};
pub use scenario::ScenarioSet;
pub use sufficiency::{SufficiencyOracle, SufficiencyTable};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
