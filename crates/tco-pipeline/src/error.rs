//! Error types for TCO Pipeline
//!
//! Generation and pruning never fail: bad requirement rows are reported,
//! not raised. What remains are feed decoding failures, broken tour
//! invariants inside the optimizer, and cross-reference misses.

use tco_model::FeedError;
use uuid::Uuid;

/// Main pipeline error type
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Input feed could not be decoded
    #[error("feed error: {0}")]
    Feed(#[from] FeedError),

    /// Tour optimization broke an internal invariant
    #[error("optimization failed: {0}")]
    Optimize(#[from] OptimizeError),

    /// Optimized and baseline sequences do not match up
    #[error("cross-reference failed: {0}")]
    CrossReference(#[from] CrossReferenceError),
}

impl PipelineError {
    /// Internal invariant violation (a bug, not bad input)
    #[inline]
    #[must_use]
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Optimize(_))
    }

    /// Whether fixing the inputs can make a rerun succeed
    #[inline]
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        !self.is_internal()
    }
}

/// Tour invariant violations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OptimizeError {
    /// The empty start configuration is not in the solved tour
    #[error("empty start configuration missing from tour")]
    OriginMissing,

    /// The empty start configuration appears after the rotation point
    #[error("tour position {position} revisits the empty start configuration")]
    OriginRevisited { position: usize },
}

/// Cross-reference errors between optimized and baseline sequences
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CrossReferenceError {
    /// No baseline test carries this UUID
    #[error("test {uuid} has no baseline counterpart")]
    UnknownTest { uuid: Uuid },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn optimizer_errors_are_internal() {
        let err = PipelineError::from(OptimizeError::OriginMissing);
        assert!(err.is_internal());
        assert!(!err.is_recoverable());
    }

    #[test]
    fn cross_reference_errors_are_recoverable() {
        let err = PipelineError::from(CrossReferenceError::UnknownTest { uuid: Uuid::nil() });
        assert!(!err.is_internal());
        assert!(err.to_string().contains("no baseline counterpart"));
    }
}
