//! Tour optimization
//!
//! Orders test configurations to keep reconfiguration cost low, modelled as
//! a traveling salesman tour over configurations and improved with 2-opt.

mod matrix;
mod order;
mod two_opt;

pub use matrix::{transition_cost, DistanceMatrix};
pub use order::{observation_cost, optimize_test_order, OptimizedOrder, ORIGIN};
pub use two_opt::{TwoOpt, TwoOptStats};
