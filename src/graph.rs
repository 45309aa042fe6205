use std::collections::{BTreeMap, HashMap};

use crate::node::{NodeId, RoadNode};
use crate::{Error, Result};

/// Weighted edge out of a node. Attributes are named numeric weights;
/// physical length in meters lives under `"length"` by convention.
#[derive(Clone, Debug, PartialEq)]
pub struct RoadEdge {
    pub to: NodeId,
    pub attrs: BTreeMap<String, f64>,
}

impl RoadEdge {
    pub fn new(to: NodeId, attrs: BTreeMap<String, f64>) -> Self {
        Self { to, attrs }
    }

    pub fn weight(&self, attr: &str) -> Option<f64> {
        self.attrs.get(attr).copied()
    }
}

/// Uniform read-only view over a road graph, directed or not.
///
/// `node_ids` returns the stored node order, which is fixed for a given
/// graph instance; sampling and component selection depend on that order
/// being stable.
pub trait RouteGraph {
    fn is_directed(&self) -> bool;
    fn node_ids(&self) -> &[NodeId];
    fn contains(&self, id: NodeId) -> bool;
    fn coords(&self, id: NodeId) -> Option<RoadNode>;
    /// Edges leaving `id`. For undirected graphs each edge is visible from
    /// both endpoints.
    fn out_edges(&self, id: NodeId) -> &[RoadEdge];
    /// Neighbors reachable ignoring edge direction (weak adjacency).
    fn undirected_neighbors(&self, id: NodeId) -> Vec<NodeId>;

    fn node_count(&self) -> usize {
        self.node_ids().len()
    }

    fn edge_weight(&self, from: NodeId, to: NodeId, attr: &str) -> Option<f64> {
        self.out_edges(from)
            .iter()
            .filter(|e| e.to == to)
            .filter_map(|e| e.weight(attr))
            .fold(None, |best, w| match best {
                Some(b) if b <= w => Some(b),
                _ => Some(w),
            })
    }
}

/// Adjacency-list road network with insertion-ordered nodes.
#[derive(Clone, Debug, Default)]
pub struct RoadNetwork {
    directed: bool,
    order: Vec<NodeId>,
    nodes: HashMap<NodeId, RoadNode>,
    out: HashMap<NodeId, Vec<RoadEdge>>,
    preds: HashMap<NodeId, Vec<NodeId>>,
}

impl RoadNetwork {
    pub fn new(directed: bool) -> Self {
        Self {
            directed,
            ..Self::default()
        }
    }

    pub fn add_node(&mut self, id: NodeId, coords: RoadNode) -> Result<()> {
        if self.nodes.contains_key(&id) {
            return Err(Error::invalid_data(format!("duplicate node id {id}")));
        }
        self.order.push(id);
        self.nodes.insert(id, coords);
        Ok(())
    }

    /// Inserts an edge `from -> to` (both directions when undirected).
    /// Both endpoints must already exist.
    pub fn add_edge(
        &mut self,
        from: NodeId,
        to: NodeId,
        attrs: BTreeMap<String, f64>,
    ) -> Result<()> {
        if !self.nodes.contains_key(&from) {
            return Err(Error::invalid_data(format!(
                "edge references unknown node {from}"
            )));
        }
        if !self.nodes.contains_key(&to) {
            return Err(Error::invalid_data(format!(
                "edge references unknown node {to}"
            )));
        }

        self.out
            .entry(from)
            .or_default()
            .push(RoadEdge::new(to, attrs.clone()));
        if self.directed {
            self.preds.entry(to).or_default().push(from);
        } else if from != to {
            self.out.entry(to).or_default().push(RoadEdge::new(from, attrs));
        }
        Ok(())
    }

    pub fn edge_count(&self) -> usize {
        let stored: usize = self.out.values().map(Vec::len).sum();
        if self.directed { stored } else { stored.div_ceil(2) }
    }
}

impl RouteGraph for RoadNetwork {
    fn is_directed(&self) -> bool {
        self.directed
    }

    fn node_ids(&self) -> &[NodeId] {
        &self.order
    }

    fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    fn coords(&self, id: NodeId) -> Option<RoadNode> {
        self.nodes.get(&id).copied()
    }

    fn out_edges(&self, id: NodeId) -> &[RoadEdge] {
        self.out.get(&id).map(Vec::as_slice).unwrap_or(&[])
    }

    fn undirected_neighbors(&self, id: NodeId) -> Vec<NodeId> {
        let mut neighbors: Vec<NodeId> = self.out_edges(id).iter().map(|e| e.to).collect();
        if self.directed {
            if let Some(preds) = self.preds.get(&id) {
                neighbors.extend_from_slice(preds);
            }
        }
        neighbors.sort_unstable();
        neighbors.dedup();
        neighbors
    }
}
