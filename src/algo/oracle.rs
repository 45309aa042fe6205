use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

use rayon::prelude::*;

use crate::graph::RouteGraph;
use crate::node::NodeId;
use crate::{Error, Result};

/// Shortest-path queries between arbitrary graph nodes under a named
/// edge-weight attribute. The solver issues O(N²) `distance` calls, so this
/// is the performance-critical seam of the whole pipeline.
pub trait DistanceOracle {
    /// Total weight of a shortest path from `a` to `b`, respecting edge
    /// direction on directed graphs.
    fn distance(&self, a: NodeId, b: NodeId) -> Result<f64>;
    /// One shortest path from `a` to `b` as a node sequence, `a` first.
    fn path(&self, a: NodeId, b: NodeId) -> Result<Vec<NodeId>>;
}

/// Shortest-path tree from one source: reached distances plus the
/// predecessor of every reached node except the source.
#[derive(Clone, Debug, Default)]
struct SourceRun {
    dist: HashMap<NodeId, f64>,
    preds: HashMap<NodeId, NodeId>,
}

impl SourceRun {
    fn path_to(&self, source: NodeId, target: NodeId) -> Result<Vec<NodeId>> {
        if !self.dist.contains_key(&target) {
            return Err(Error::NoPath {
                from: source,
                to: target,
            });
        }
        let mut path = vec![target];
        let mut current = target;
        while current != source {
            current = *self.preds.get(&current).ok_or(Error::NoPath {
                from: source,
                to: target,
            })?;
            path.push(current);
        }
        path.reverse();
        Ok(path)
    }
}

/// Binary-heap Dijkstra from `source`, stopping early once `target` is
/// settled when one is given. Heap entries order by (distance bits, node
/// id), so ties resolve identically on every run. Weights are taken from
/// `attr`; edges without the attribute, or with a negative or non-finite
/// value, are not traversable.
fn dijkstra<G: RouteGraph>(
    graph: &G,
    attr: &str,
    source: NodeId,
    target: Option<NodeId>,
) -> SourceRun {
    let mut run = SourceRun::default();
    if !graph.contains(source) {
        return run;
    }

    run.dist.insert(source, 0.0);
    let mut heap = BinaryHeap::new();
    heap.push(Reverse((0.0_f64.to_bits(), source)));

    while let Some(Reverse((dist_bits, u))) = heap.pop() {
        let dist = f64::from_bits(dist_bits);
        if run.dist.get(&u).is_some_and(|&d| dist > d) {
            continue;
        }
        if target == Some(u) {
            break;
        }

        for edge in graph.out_edges(u) {
            let Some(weight) = edge.weight(attr) else {
                continue;
            };
            if !weight.is_finite() || weight < 0.0 {
                continue;
            }
            let next = dist + weight;
            let better = run.dist.get(&edge.to).is_none_or(|&d| next < d);
            if better {
                run.dist.insert(edge.to, next);
                run.preds.insert(edge.to, u);
                heap.push(Reverse((next.to_bits(), edge.to)));
            }
        }
    }

    run
}

/// Recomputes a shortest path on every query. No state beyond the graph
/// reference, so results depend only on the graph and the weight name.
pub struct DijkstraOracle<'g, G: RouteGraph> {
    graph: &'g G,
    attr: String,
}

impl<'g, G: RouteGraph> DijkstraOracle<'g, G> {
    pub fn new(graph: &'g G, attr: impl Into<String>) -> Self {
        Self {
            graph,
            attr: attr.into(),
        }
    }

    fn check_endpoints(&self, a: NodeId, b: NodeId) -> Result<()> {
        for id in [a, b] {
            if !self.graph.contains(id) {
                return Err(Error::invalid_input(format!("unknown node {id}")));
            }
        }
        Ok(())
    }
}

impl<G: RouteGraph> DistanceOracle for DijkstraOracle<'_, G> {
    fn distance(&self, a: NodeId, b: NodeId) -> Result<f64> {
        self.check_endpoints(a, b)?;
        let run = dijkstra(self.graph, &self.attr, a, Some(b));
        run.dist
            .get(&b)
            .copied()
            .ok_or(Error::NoPath { from: a, to: b })
    }

    fn path(&self, a: NodeId, b: NodeId) -> Result<Vec<NodeId>> {
        self.check_endpoints(a, b)?;
        dijkstra(self.graph, &self.attr, a, Some(b)).path_to(a, b)
    }
}

/// All-pairs cache over a fixed source set: one full Dijkstra per source,
/// computed up front in parallel. Queries must originate from a precomputed
/// source. Results are identical to [`DijkstraOracle`] because the same
/// traversal runs underneath, only without the early exit.
pub struct CachedOracle {
    runs: HashMap<NodeId, SourceRun>,
}

impl CachedOracle {
    pub fn precompute<G>(graph: &G, attr: &str, sources: &[NodeId]) -> Result<Self>
    where
        G: RouteGraph + Sync,
    {
        for &id in sources {
            if !graph.contains(id) {
                return Err(Error::invalid_input(format!("unknown source node {id}")));
            }
        }

        let runs = sources
            .par_iter()
            .map(|&source| (source, dijkstra(graph, attr, source, None)))
            .collect();
        Ok(Self { runs })
    }

    fn run_for(&self, a: NodeId) -> Result<&SourceRun> {
        self.runs
            .get(&a)
            .ok_or_else(|| Error::invalid_input(format!("node {a} is not a precomputed source")))
    }
}

impl DistanceOracle for CachedOracle {
    fn distance(&self, a: NodeId, b: NodeId) -> Result<f64> {
        self.run_for(a)?
            .dist
            .get(&b)
            .copied()
            .ok_or(Error::NoPath { from: a, to: b })
    }

    fn path(&self, a: NodeId, b: NodeId) -> Result<Vec<NodeId>> {
        self.run_for(a)?.path_to(a, b)
    }
}
