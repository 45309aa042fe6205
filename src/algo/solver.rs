use log::debug;

use crate::algo::oracle::DistanceOracle;
use crate::algo::sample::NodeSet;
use crate::node::NodeId;
use crate::tour::Tour;
use crate::{Error, Result};

/// Greedy nearest-neighbor tour over `nodes`, starting and ending at
/// `start`. Each step extends the tour to the unvisited node with the
/// smallest shortest-path distance from the current position; an exact
/// distance tie goes to the smaller node id, so the result does not depend
/// on any container's iteration order.
///
/// The tour is a Hamiltonian cycle over `nodes`, not an optimal one. A
/// missing route between the current position and any unvisited node is
/// fatal: the heuristic cannot place a node it cannot measure.
pub fn nearest_neighbor_tour(
    nodes: &NodeSet,
    start: NodeId,
    oracle: &dyn DistanceOracle,
) -> Result<Tour> {
    if !nodes.contains(start) {
        return Err(Error::InvalidStartNode(start));
    }

    let mut unvisited: Vec<NodeId> = nodes.ids().iter().copied().filter(|&id| id != start).collect();
    let mut tour = Vec::with_capacity(nodes.len() + 1);
    tour.push(start);

    while !unvisited.is_empty() {
        let current = *tour.last().unwrap_or(&start);
        let mut best: Option<(f64, usize)> = None;

        for (pos, &candidate) in unvisited.iter().enumerate() {
            let dist = oracle.distance(current, candidate)?;
            let closer = match best {
                None => true,
                Some((best_dist, best_pos)) => {
                    dist < best_dist || (dist == best_dist && candidate < unvisited[best_pos])
                }
            };
            if closer {
                best = Some((dist, pos));
            }
        }

        // Unvisited is non-empty, so a candidate was either selected or the
        // oracle already failed the whole solve above.
        let (dist, pos) = best.ok_or_else(|| Error::invalid_data("no candidate selected"))?;
        let next = unvisited.remove(pos);
        debug!("solver: {current} -> {next} dist={dist:.1} remaining={}", unvisited.len());
        tour.push(next);
    }

    tour.push(start);
    Tour::new(tour)
}
