use std::collections::{HashSet, VecDeque};

use crate::graph::{RoadNetwork, RouteGraph};
use crate::node::NodeId;
use crate::{Error, Result};

/// Restricts `graph` to its largest connected component.
///
/// Directed graphs use weak connectivity (edge direction ignored while
/// grouping); the induced subgraph keeps every edge between retained nodes
/// with its direction and attributes. Components are discovered by scanning
/// nodes in stored order, and a size tie goes to the component discovered
/// first, so the result is deterministic for a fixed graph instance.
pub fn largest_component(graph: &RoadNetwork) -> Result<RoadNetwork> {
    if graph.node_count() == 0 {
        return Err(Error::EmptyGraph);
    }

    let mut visited: HashSet<NodeId> = HashSet::with_capacity(graph.node_count());
    let mut best: HashSet<NodeId> = HashSet::new();

    for &root in graph.node_ids() {
        if visited.contains(&root) {
            continue;
        }
        let component = bfs_component(graph, root);
        visited.extend(component.iter().copied());
        if component.len() > best.len() {
            best = component;
        }
    }

    let mut reduced = RoadNetwork::new(graph.is_directed());
    for &id in graph.node_ids() {
        if best.contains(&id) {
            let coords = graph
                .coords(id)
                .ok_or_else(|| Error::invalid_data(format!("node {id} has no coordinates")))?;
            reduced.add_node(id, coords)?;
        }
    }
    for &id in graph.node_ids() {
        if !best.contains(&id) {
            continue;
        }
        for edge in graph.out_edges(id) {
            // Undirected storage exposes each edge from both endpoints;
            // re-add it only from the lower-ordered occurrence.
            if !graph.is_directed() && edge.to < id {
                continue;
            }
            if best.contains(&edge.to) {
                reduced.add_edge(id, edge.to, edge.attrs.clone())?;
            }
        }
    }

    Ok(reduced)
}

fn bfs_component(graph: &RoadNetwork, root: NodeId) -> HashSet<NodeId> {
    let mut component = HashSet::new();
    let mut queue = VecDeque::new();
    component.insert(root);
    queue.push_back(root);

    while let Some(current) = queue.pop_front() {
        for neighbor in graph.undirected_neighbors(current) {
            if component.insert(neighbor) {
                queue.push_back(neighbor);
            }
        }
    }

    component
}
