//! Configuration for test order optimization.

use serde::{Deserialize, Serialize};

/// How 2-opt applies improving moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SwapStrategy {
    /// Apply every improving move as soon as it is found and keep scanning
    /// from the same `(i, j)` position. Reproduces the reference tour costs.
    #[default]
    ScanContinue,
    /// Evaluate the whole neighbourhood, then apply only the best move of
    /// each pass.
    BestImprovement,
}

/// Optimizer settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OptimizerConfig {
    /// Run 2-opt. When false the identity tour is emitted with its cost.
    pub optimize: bool,

    /// Shuffle the tests before the empty configuration is inserted.
    pub resort: bool,

    /// Request an exact solver. None is available: a warning is logged and
    /// 2-opt runs instead.
    pub concorde: bool,

    /// Seed for the `resort` shuffle. `None` draws from OS entropy.
    pub seed: Option<u64>,

    pub strategy: SwapStrategy,

    /// Cap on full 2-opt passes. `None` runs until a pass finds no
    /// improving move.
    pub max_passes: Option<usize>,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            optimize: true,
            resort: false,
            concorde: false,
            seed: None,
            strategy: SwapStrategy::ScanContinue,
            max_passes: None,
        }
    }
}

impl OptimizerConfig {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables 2-opt.
    #[must_use]
    pub fn with_optimize(mut self, optimize: bool) -> Self {
        self.optimize = optimize;
        self
    }

    /// Enables the pre-insertion shuffle.
    #[must_use]
    pub fn with_resort(mut self, resort: bool) -> Self {
        self.resort = resort;
        self
    }

    /// Requests the exact solver.
    #[must_use]
    pub fn with_concorde(mut self, concorde: bool) -> Self {
        self.concorde = concorde;
        self
    }

    /// Sets the shuffle seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the move strategy.
    #[must_use]
    pub fn with_strategy(mut self, strategy: SwapStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Caps the number of 2-opt passes.
    #[must_use]
    pub fn with_max_passes(mut self, passes: usize) -> Self {
        self.max_passes = Some(passes);
        self
    }
}
