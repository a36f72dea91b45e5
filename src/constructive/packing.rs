//! Exact demand packing for capacity-tight instances.
//!
//! Cheapest insertion chooses stops by distance and can strand a stop even
//! when the fleet could carry everything. This module decides whether any
//! assignment of demands to vehicles exists.
//!
//! # Algorithm
//!
//! Depth-first search over stops sorted by decreasing demand, trying each
//! vehicle in order (first-fit decreasing is the first leaf visited).
//! Vehicles with the same spare capacity are interchangeable, so only the
//! first of them is tried. A branch is cut when the demand still to place
//! exceeds the spare capacity left. The search gives up after `node_limit`
//! nodes.

use crate::cvrp::Partition;
use crate::models::CvrpProblem;

use super::{cheapest_insertion_into, greedy_path};

/// Result of [`pack_demands`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PackingOutcome {
    /// One stop list per vehicle, every capacity respected.
    Packed(Vec<Vec<usize>>),
    /// The search proved no assignment exists.
    Impossible,
    /// The node limit was reached before a decision.
    Undecided,
}

/// Assigns every positive-demand stop to a vehicle without overloading any.
///
/// Zero-demand stops and the depot are not part of the result; they fit
/// anywhere. Bins come back in vehicle order, stops unordered.
///
/// # Examples
///
/// ```
/// use route_optimizer::models::{CvrpProblem, Vehicle};
/// use route_optimizer::distance::DistanceMatrix;
/// use route_optimizer::constructive::{pack_demands, PackingOutcome};
///
/// let rows = vec![vec![0.0; 6]; 6];
/// let dm = DistanceMatrix::from_rows(rows).unwrap();
///
/// let tight = CvrpProblem::new(dm.clone(), vec![0, 4, 3, 3, 2, 0], Vehicle::fleet(2, 6), 0).unwrap();
/// let PackingOutcome::Packed(bins) = pack_demands(&tight, 1_000) else { panic!() };
/// assert_eq!(bins, vec![vec![1, 4], vec![2, 3]]);
///
/// let odd = CvrpProblem::new(dm, vec![0, 10, 10, 10, 10, 10], Vehicle::fleet(2, 25), 0).unwrap();
/// assert_eq!(pack_demands(&odd, 1_000), PackingOutcome::Impossible);
/// ```
pub fn pack_demands(problem: &CvrpProblem, node_limit: usize) -> PackingOutcome {
    let mut items: Vec<(usize, u64)> = problem
        .customers()
        .into_iter()
        .map(|s| (s, problem.demand(s)))
        .filter(|&(_, d)| d > 0)
        .collect();
    items.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut suffix = vec![0u64; items.len() + 1];
    for i in (0..items.len()).rev() {
        suffix[i] = suffix[i + 1] + items[i].1;
    }

    let vehicles = problem.num_vehicles();
    let mut packer = Packer {
        items,
        suffix,
        spare: (0..vehicles).map(|v| problem.capacity(v)).collect(),
        bins: vec![Vec::new(); vehicles],
        nodes: 0,
        node_limit,
    };

    match packer.place(0) {
        Search::Found => {
            let mut bins = packer.bins;
            for bin in &mut bins {
                bin.sort_unstable();
            }
            PackingOutcome::Packed(bins)
        }
        Search::Exhausted => PackingOutcome::Impossible,
        Search::Aborted => {
            log::warn!(
                "cvrp.construct: packing undecided after {} nodes",
                packer.nodes
            );
            PackingOutcome::Undecided
        }
    }
}

/// Turns packed bins into a complete partition.
///
/// Each bin is ordered by nearest neighbor from the depot; zero-demand stops
/// are then placed by cheapest insertion.
pub fn partition_from_bins(problem: &CvrpProblem, bins: Vec<Vec<usize>>) -> Partition {
    let depot = problem.depot();
    let routes = bins
        .iter()
        .map(|bin| greedy_path(problem.matrix(), depot, bin))
        .collect();
    let mut partition = Partition::new(routes, Vec::new());

    let free: Vec<usize> = problem
        .customers()
        .into_iter()
        .filter(|&s| problem.demand(s) == 0)
        .collect();
    cheapest_insertion_into(problem, &mut partition, free);
    partition
}

enum Search {
    Found,
    Exhausted,
    Aborted,
}

struct Packer {
    items: Vec<(usize, u64)>,
    suffix: Vec<u64>,
    spare: Vec<u64>,
    bins: Vec<Vec<usize>>,
    nodes: usize,
    node_limit: usize,
}

impl Packer {
    fn place(&mut self, i: usize) -> Search {
        if i == self.items.len() {
            return Search::Found;
        }
        self.nodes += 1;
        if self.nodes > self.node_limit {
            return Search::Aborted;
        }
        if self.suffix[i] > self.spare.iter().sum::<u64>() {
            return Search::Exhausted;
        }

        let (stop, demand) = self.items[i];
        let mut tried: Vec<u64> = Vec::new();
        for b in 0..self.spare.len() {
            let spare = self.spare[b];
            if spare < demand || tried.contains(&spare) {
                continue;
            }
            tried.push(spare);

            self.spare[b] -= demand;
            self.bins[b].push(stop);
            match self.place(i + 1) {
                Search::Exhausted => {}
                done => return done,
            }
            self.bins[b].pop();
            self.spare[b] += demand;
        }
        Search::Exhausted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::DistanceMatrix;
    use crate::models::Vehicle;

    fn problem(demands: Vec<u32>, vehicles: Vec<Vehicle>) -> CvrpProblem {
        let n = demands.len();
        let dm = DistanceMatrix::from_rows(vec![vec![0.0; n]; n]).expect("valid");
        CvrpProblem::new(dm, demands, vehicles, 0).expect("valid")
    }

    #[test]
    fn test_first_fit_when_it_works() {
        let p = problem(vec![0, 5, 5, 5], Vehicle::fleet(2, 10));
        assert_eq!(
            pack_demands(&p, 100),
            PackingOutcome::Packed(vec![vec![1, 2], vec![3]])
        );
    }

    #[test]
    fn test_backtracks_past_first_fit() {
        // First fit decreasing pairs the fours and strands a two.
        let p = problem(vec![0, 4, 4, 3, 3, 2, 2], Vehicle::fleet(2, 9));
        let PackingOutcome::Packed(bins) = pack_demands(&p, 10_000) else {
            panic!("expected a packing");
        };
        for bin in &bins {
            let load: u64 = bin.iter().map(|&s| p.demand(s)).sum();
            assert!(load <= 9);
        }
        assert_eq!(bins.iter().map(Vec::len).sum::<usize>(), 6);
    }

    #[test]
    fn test_equal_totals_but_no_packing() {
        let p = problem(vec![0, 10, 10, 10, 10, 10], Vehicle::fleet(2, 25));
        assert_eq!(pack_demands(&p, 10_000), PackingOutcome::Impossible);
    }

    #[test]
    fn test_heterogeneous_fleet() {
        let p = problem(
            vec![0, 7, 3],
            vec![Vehicle::new(0, 3), Vehicle::new(1, 7)],
        );
        assert_eq!(
            pack_demands(&p, 100),
            PackingOutcome::Packed(vec![vec![2], vec![1]])
        );
    }

    #[test]
    fn test_zero_demands_skipped() {
        let p = problem(vec![0, 0, 0], Vehicle::fleet(1, 1));
        assert_eq!(pack_demands(&p, 1), PackingOutcome::Packed(vec![vec![]]));
    }

    #[test]
    fn test_partition_from_bins_places_free_stops() {
        let p = problem(vec![0, 4, 0, 3, 3], Vehicle::fleet(2, 6));
        let PackingOutcome::Packed(bins) = pack_demands(&p, 100) else {
            panic!("expected a packing");
        };
        let part = partition_from_bins(&p, bins);
        assert!(part.is_feasible(&p));
        let placed: usize = part.routes().iter().map(Vec::len).sum();
        assert_eq!(placed, 4);
    }

    #[test]
    fn test_node_limit() {
        let p = problem(vec![0, 4, 4, 3, 3, 2, 2], Vehicle::fleet(2, 9));
        assert_eq!(pack_demands(&p, 2), PackingOutcome::Undecided);
    }
}
