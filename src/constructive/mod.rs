//! Constructive heuristics for building initial tours and partitions.
//!
//! - [`greedy_tour`]: Nearest-neighbor tour from stop 0, O(n²)
//! - [`cheapest_insertion`]: Capacity-aware cheapest insertion (Rosenkrantz et al., 1977), O(n³)
//! - [`pack_demands`]: Exact bounded search for a capacity-feasible assignment

mod cheapest_insertion;
mod nearest_neighbor;
mod packing;

pub use cheapest_insertion::{cheapest_insertion, cheapest_insertion_into};
pub(crate) use cheapest_insertion::insertion_cost;
pub use nearest_neighbor::{greedy_path, greedy_tour};
pub use packing::{pack_demands, partition_from_bins, PackingOutcome};
