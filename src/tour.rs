use std::collections::{HashMap, HashSet};

use log::warn;

use crate::algo::oracle::DistanceOracle;
use crate::algo::sample::NodeSet;
use crate::node::NodeId;
use crate::{Error, Result};

const METERS_PER_KM: f64 = 1_000.0;

/// Closed visiting order over a node set: first and last entries are the
/// start node, every other sampled node appears exactly once in between.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tour {
    nodes: Vec<NodeId>,
}

impl Tour {
    /// Builds a tour, rejecting sequences that are not closed or that visit
    /// a node twice before the closing repeat.
    pub fn new(nodes: Vec<NodeId>) -> Result<Self> {
        match (nodes.first(), nodes.last()) {
            (Some(first), Some(last)) if first == last => {}
            _ => {
                return Err(Error::invalid_data(
                    "tour must start and end at the same node",
                ));
            }
        }
        let mut seen = HashSet::with_capacity(nodes.len());
        for &id in &nodes[..nodes.len() - 1] {
            if !seen.insert(id) {
                return Err(Error::invalid_data(format!("tour visits node {id} twice")));
            }
        }
        Ok(Self { nodes })
    }

    pub fn nodes(&self) -> &[NodeId] {
        &self.nodes
    }

    /// Number of visited nodes, not counting the closing repeat.
    pub fn visit_count(&self) -> usize {
        self.nodes.len().saturating_sub(1)
    }
}

/// The tour expressed as positions into the sampled [`NodeSet`], with the
/// measured length of every consecutive segment.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EncodedTour {
    pub indices: Vec<usize>,
    pub segments: Vec<f64>,
    pub total: f64,
}

impl EncodedTour {
    pub fn total_km(&self) -> f64 {
        self.total / METERS_PER_KM
    }

    pub fn log_metrics(&self) {
        let n = self.indices.len().saturating_sub(1);
        let longest = self.segments.iter().copied().fold(0.0_f64, f64::max);
        log::info!(
            "metrics: n={n} total_m={:.0} longest_m={longest:.0}",
            self.total
        );
    }
}

/// Re-expresses `tour` as indices into `nodes` and measures each segment
/// with the oracle.
///
/// A segment whose endpoints have no route is recorded as 0.0 and logged;
/// that keeps the encoding total a literal sum over all segments while
/// leaving the gap visible in the log. Any other oracle failure aborts.
pub fn encode_tour(
    nodes: &NodeSet,
    tour: &Tour,
    oracle: &dyn DistanceOracle,
) -> Result<EncodedTour> {
    let positions: HashMap<NodeId, usize> = nodes
        .ids()
        .iter()
        .enumerate()
        .map(|(idx, &id)| (id, idx))
        .collect();

    let mut indices = Vec::with_capacity(tour.nodes().len());
    for &id in tour.nodes() {
        let idx = positions
            .get(&id)
            .ok_or_else(|| Error::invalid_data(format!("tour node {id} is not in the node set")))?;
        indices.push(*idx);
    }

    let mut segments = Vec::with_capacity(tour.visit_count());
    let mut total = 0.0;
    for pair in tour.nodes().windows(2) {
        let (from, to) = (pair[0], pair[1]);
        let dist = match oracle.distance(from, to) {
            Ok(d) => d,
            Err(Error::NoPath { .. }) => {
                warn!("encode: no path {from} -> {to}, recording zero-length segment");
                0.0
            }
            Err(e) => return Err(e),
        };
        total += dist;
        segments.push(dist);
    }

    Ok(EncodedTour {
        indices,
        segments,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::{encode_tour, Tour};
    use crate::algo::oracle::DistanceOracle;
    use crate::algo::sample::NodeSet;
    use crate::node::NodeId;
    use crate::{Error, Result};

    /// Distances read from a fixed table; pairs outside it have no route.
    struct TableOracle {
        table: Vec<(NodeId, NodeId, f64)>,
    }

    impl DistanceOracle for TableOracle {
        fn distance(&self, a: NodeId, b: NodeId) -> Result<f64> {
            self.table
                .iter()
                .find(|&&(u, v, _)| u == a && v == b)
                .map(|&(_, _, d)| d)
                .ok_or(Error::NoPath { from: a, to: b })
        }

        fn path(&self, a: NodeId, b: NodeId) -> Result<Vec<NodeId>> {
            self.distance(a, b).map(|_| vec![a, b])
        }
    }

    #[test]
    fn open_sequence_is_not_a_tour() {
        assert!(matches!(
            Tour::new(vec![1, 2, 3]),
            Err(Error::InvalidData(_))
        ));
        assert!(matches!(Tour::new(vec![]), Err(Error::InvalidData(_))));
    }

    #[test]
    fn repeated_visit_is_not_a_tour() {
        assert!(matches!(
            Tour::new(vec![1, 2, 2, 3, 1]),
            Err(Error::InvalidData(_))
        ));
    }

    #[test]
    fn single_node_loop_is_a_tour() {
        assert!(Tour::new(vec![5, 5]).is_ok());
    }

    #[test]
    fn indices_follow_node_set_order() {
        let nodes = NodeSet::new(vec![30, 10, 20]);
        let tour = Tour::new(vec![10, 30, 20, 10]).unwrap();
        let oracle = TableOracle {
            table: vec![(10, 30, 1.0), (30, 20, 2.0), (20, 10, 3.0)],
        };
        let encoded = encode_tour(&nodes, &tour, &oracle).unwrap();
        assert_eq!(encoded.indices, vec![1, 0, 2, 1]);
        assert_eq!(encoded.segments, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn total_is_the_sum_of_segments() {
        let nodes = NodeSet::new(vec![1, 2, 3]);
        let tour = Tour::new(vec![1, 2, 3, 1]).unwrap();
        let oracle = TableOracle {
            table: vec![(1, 2, 4.5), (2, 3, 0.5), (3, 1, 2.0)],
        };
        let encoded = encode_tour(&nodes, &tour, &oracle).unwrap();
        let sum: f64 = encoded.segments.iter().sum();
        assert_eq!(encoded.total, sum);
        assert_eq!(encoded.total, 7.0);
        assert_eq!(encoded.total_km(), 0.007);
    }

    #[test]
    fn unreachable_segment_is_zeroed_not_fatal() {
        let nodes = NodeSet::new(vec![1, 2, 3]);
        let tour = Tour::new(vec![1, 2, 3, 1]).unwrap();
        let oracle = TableOracle {
            table: vec![(1, 2, 4.0), (3, 1, 2.0)],
        };
        let encoded = encode_tour(&nodes, &tour, &oracle).unwrap();
        assert_eq!(encoded.segments, vec![4.0, 0.0, 2.0]);
        assert_eq!(encoded.total, 6.0);
    }

    #[test]
    fn tour_node_outside_the_set_is_invalid_data() {
        let nodes = NodeSet::new(vec![1, 2]);
        let tour = Tour::new(vec![1, 9, 1]).unwrap();
        let oracle = TableOracle { table: vec![] };
        assert!(matches!(
            encode_tour(&nodes, &tour, &oracle),
            Err(Error::InvalidData(_))
        ));
    }
}
