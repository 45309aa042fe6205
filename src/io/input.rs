use std::collections::BTreeMap;
use std::fs;
use std::io::Read;

use serde::Deserialize;

use crate::graph::RoadNetwork;
use crate::node::RoadNode;
use crate::{Error, Result};

/// On-disk road-network document. Produced by whatever extracted the road
/// network from the map source; this loader only validates and converts.
///
/// ```json
/// {
///   "directed": true,
///   "nodes": [{"id": 1, "lat": 39.92, "lon": 32.85}],
///   "edges": [{"u": 1, "v": 2, "length": 120.5}]
/// }
/// ```
#[derive(Debug, Deserialize)]
struct GraphDocument {
    #[serde(default)]
    directed: bool,
    nodes: Vec<NodeDocument>,
    edges: Vec<EdgeDocument>,
}

#[derive(Debug, Deserialize)]
struct NodeDocument {
    id: u64,
    lat: f64,
    lon: f64,
}

#[derive(Debug, Deserialize)]
struct EdgeDocument {
    u: u64,
    v: u64,
    #[serde(flatten)]
    attrs: BTreeMap<String, serde_json::Value>,
}

/// Reads a graph document from `path`, or from stdin when `path` is empty.
pub fn load_graph(path: &str) -> Result<RoadNetwork> {
    let raw = if path.is_empty() {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(path)?
    };
    parse_graph(&raw)
}

pub(crate) fn parse_graph(raw: &str) -> Result<RoadNetwork> {
    let doc: GraphDocument = serde_json::from_str(raw)
        .map_err(|e| Error::invalid_input(format!("malformed graph document: {e}")))?;

    let mut graph = RoadNetwork::new(doc.directed);
    for node in &doc.nodes {
        let coords = RoadNode::new(node.lat, node.lon);
        if !coords.is_valid() {
            return Err(Error::invalid_data(format!(
                "node {}: invalid coordinates {},{}",
                node.id, node.lat, node.lon
            )));
        }
        graph.add_node(node.id, coords)?;
    }

    for (idx, edge) in doc.edges.iter().enumerate() {
        let mut attrs = BTreeMap::new();
        for (name, value) in &edge.attrs {
            // Non-numeric attributes (street names, highway class) are
            // allowed in the document but irrelevant to routing.
            let Some(weight) = value.as_f64() else {
                continue;
            };
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::invalid_data(format!(
                    "edge {}: attribute {name} must be a non-negative finite number, got {weight}",
                    idx + 1
                )));
            }
            attrs.insert(name.clone(), weight);
        }
        graph.add_edge(edge.u, edge.v, attrs)?;
    }

    Ok(graph)
}
