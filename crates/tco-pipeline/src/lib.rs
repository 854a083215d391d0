//! TCO Pipeline - Test Configuration Optimization
//!
//! Turns a requirements feed into an ordered test campaign:
//! - Generates one test per distinct scenario set, inheriting requirements
//!   from every strict subset
//! - Prunes requirements that are not certified sufficient for their test
//! - Orders the survivors to keep reconfiguration cost low (2-opt)
//! - Reports apply, retract and combined cost of any sequence
//!
//! # Example
//!
//! ```rust,ignore
//! use tco_model::{CostTable, RequirementRecord, SufficiencyTable};
//! use tco_pipeline::{OptimizerConfig, Pipeline};
//!
//! let records = vec![RequirementRecord::new("R1", "Q1", "s1,s2")];
//! let costs = CostTable::default().with_scenario("s1", 3);
//!
//! let report = Pipeline::new(OptimizerConfig::new().with_seed(7))
//!     .run(&records, &SufficiencyTable::new(), &costs)?;
//! println!("combined cost: {}", report.optimized_costs.total_combined_cost);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod baseline;
pub mod config;
pub mod error;
pub mod generate;
pub mod graph;
pub mod optimize;
pub mod pipeline;
pub mod prune;
pub mod report;

// Re-exports for convenience
pub use baseline::{baseline_ids, relabel_with_baseline_ids, unoptimized_order};
pub use config::{OptimizerConfig, SwapStrategy};
pub use error::{CrossReferenceError, OptimizeError, PipelineError};
pub use generate::{generate_tests, GenerationReport, SkipReason, SkippedRecord};
pub use graph::{ConfigurationGraph, NodeIndex};
pub use optimize::{optimize_test_order, OptimizedOrder};
pub use pipeline::{Pipeline, PipelineReport};
pub use prune::{prune_tests, DroppedQuantity, DroppedRequirement, PruneReport};
pub use report::{calculate_costs, cost_breakdown, CostSummary, TestCost};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with TCO Pipeline
    pub use crate::{
        calculate_costs, generate_tests, optimize_test_order, prune_tests, OptimizerConfig,
        Pipeline, PipelineReport, SwapStrategy,
    };
    pub use tco_model::{CostTable, RequirementRecord, SufficiencyTable, TestConfiguration};
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
