use rand::seq::SliceRandom;
use rand::{rngs::StdRng, SeedableRng};

use crate::graph::RouteGraph;
use crate::node::NodeId;
use crate::{Error, Result};

/// Ordered, duplicate-free selection of graph nodes. The position of each
/// id is the index the encoded tour refers to, so the order is part of the
/// contract.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NodeSet {
    ids: Vec<NodeId>,
}

impl NodeSet {
    pub(crate) fn new(ids: Vec<NodeId>) -> Self {
        Self { ids }
    }

    pub fn ids(&self) -> &[NodeId] {
        &self.ids
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<NodeId> {
        self.ids.get(index).copied()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.ids.contains(&id)
    }
}

/// Draws `count` node ids from the graph's stored node order with a seeded
/// Fisher-Yates shuffle. Identical `(graph, count, seed)` inputs always
/// produce the identical ordered set.
pub fn sample<G: RouteGraph>(graph: &G, count: usize, seed: u64) -> Result<NodeSet> {
    let available = graph.node_count();
    if count == 0 || count > available {
        return Err(Error::InvalidSampleSize {
            requested: count,
            available,
        });
    }

    let mut ids = graph.node_ids().to_vec();
    let mut rng = StdRng::seed_from_u64(seed);
    ids.shuffle(&mut rng);
    ids.truncate(count);
    Ok(NodeSet::new(ids))
}
