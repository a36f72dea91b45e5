//! Local search operators for improving tours and partitions.
//!
//! - [`two_opt`]: Tour 2-opt segment reversal (closed tours and open paths)
//! - [`relocate_improve`]: Inter-route stop relocation
//! - [`swap_improve`]: Inter-route stop exchange
//!
//! The inter-route operators price overload with a penalty per unit of
//! demand, so they can start from an overloaded partition.

mod relocate;
mod swap;
mod two_opt;

pub use relocate::relocate_improve;
pub use swap::swap_improve;
pub use two_opt::{two_opt, two_opt_route, TwoOptOutcome};
