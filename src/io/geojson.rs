use std::fs::File;
use std::io::BufWriter;

use log::warn;
use serde_json::{json, Value};

use crate::algo::oracle::DistanceOracle;
use crate::algo::sample::NodeSet;
use crate::graph::RouteGraph;
use crate::node::NodeId;
use crate::tour::EncodedTour;
use crate::{Error, Result};

const METERS_PER_KM: f64 = 1_000.0;

/// Writes the tour as a GeoJSON FeatureCollection: one Point per sampled
/// node and one LineString per tour segment tracing the actual road-level
/// shortest path, not a straight line.
///
/// Segments with no route are omitted from the geometry (with a warning)
/// instead of failing the export.
pub fn write_tour_geojson<G: RouteGraph>(
    path: &str,
    graph: &G,
    nodes: &NodeSet,
    encoded: &EncodedTour,
    oracle: &dyn DistanceOracle,
) -> Result<()> {
    let collection = tour_feature_collection(graph, nodes, encoded, oracle)?;
    let file = File::create(path)?;
    serde_json::to_writer_pretty(BufWriter::new(file), &collection)
        .map_err(|e| Error::invalid_data(format!("failed to serialize geojson: {e}")))?;
    Ok(())
}

pub(crate) fn tour_feature_collection<G: RouteGraph>(
    graph: &G,
    nodes: &NodeSet,
    encoded: &EncodedTour,
    oracle: &dyn DistanceOracle,
) -> Result<Value> {
    let mut features = Vec::new();

    for (idx, &id) in nodes.ids().iter().enumerate() {
        features.push(node_feature(graph, encoded, idx, id)?);
    }

    let leg_count = encoded.indices.len().saturating_sub(1);
    for leg in 0..leg_count {
        let from = tour_node(nodes, encoded, leg)?;
        let to = tour_node(nodes, encoded, leg + 1)?;

        let path = match oracle.path(from, to) {
            Ok(p) => p,
            Err(Error::NoPath { .. }) => {
                warn!("geojson: no path {from} -> {to}, omitting segment {leg}");
                continue;
            }
            Err(e) => return Err(e),
        };
        // A LineString needs at least two positions; a self-segment
        // (single-node tour) has no geometry to draw.
        if path.len() < 2 {
            warn!("geojson: segment {leg} ({from} -> {to}) has no extent, omitting");
            continue;
        }

        let role = if leg == leg_count - 1 { "return" } else { "leg" };
        features.push(json!({
            "type": "Feature",
            "geometry": {
                "type": "LineString",
                "coordinates": line_coordinates(graph, &path)?,
            },
            "properties": {
                "segment": leg,
                "role": role,
                "distance_km": encoded.segments[leg] / METERS_PER_KM,
            },
        }));
    }

    Ok(json!({
        "type": "FeatureCollection",
        "features": features,
        "properties": {
            "nodes": nodes.len(),
            "total_km": encoded.total_km(),
        },
    }))
}

fn node_feature<G: RouteGraph>(
    graph: &G,
    encoded: &EncodedTour,
    idx: usize,
    id: NodeId,
) -> Result<Value> {
    let coords = graph
        .coords(id)
        .ok_or_else(|| Error::invalid_data(format!("node {id} has no coordinates")))?;
    // Position in the tour, ignoring the closing repeat of the start.
    let position = encoded.indices[..encoded.indices.len().saturating_sub(1)]
        .iter()
        .position(|&i| i == idx);

    let role = match position {
        Some(0) => "start",
        Some(p) if p + 2 == encoded.indices.len() => "finish",
        _ => "stop",
    };
    let distance_to_next_km = position
        .and_then(|p| encoded.segments.get(p))
        .map(|d| d / METERS_PER_KM);

    Ok(json!({
        "type": "Feature",
        "geometry": {
            "type": "Point",
            "coordinates": [coords.lng, coords.lat],
        },
        "properties": {
            "index": idx,
            "tour_position": position,
            "role": role,
            "distance_to_next_km": distance_to_next_km,
        },
    }))
}

fn tour_node(nodes: &NodeSet, encoded: &EncodedTour, at: usize) -> Result<NodeId> {
    let idx = encoded.indices[at];
    nodes
        .get(idx)
        .ok_or_else(|| Error::invalid_data(format!("tour index {idx} out of range")))
}

fn line_coordinates<G: RouteGraph>(graph: &G, path: &[NodeId]) -> Result<Vec<[f64; 2]>> {
    path.iter()
        .map(|&id| {
            graph
                .coords(id)
                .map(|c| [c.lng, c.lat])
                .ok_or_else(|| Error::invalid_data(format!("path node {id} has no coordinates")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::tour_feature_collection;
    use crate::algo::oracle::DijkstraOracle;
    use crate::algo::sample::NodeSet;
    use crate::algo::solver::nearest_neighbor_tour;
    use crate::graph::test_support::grid;
    use crate::tour::encode_tour;

    fn ring() -> crate::RoadNetwork {
        grid(
            false,
            &[
                (1, (0.0, 0.0)),
                (2, (0.0, 1.0)),
                (3, (1.0, 1.0)),
                (4, (1.0, 0.0)),
            ],
            &[(1, 2, 1.0), (2, 3, 1.0), (3, 4, 1.0), (4, 1, 1.0)],
        )
    }

    #[test]
    fn collection_has_points_and_segment_lines() {
        let g = ring();
        let oracle = DijkstraOracle::new(&g, "length");
        let nodes = NodeSet::new(vec![1, 3]);
        let tour = nearest_neighbor_tour(&nodes, 1, &oracle).unwrap();
        let encoded = encode_tour(&nodes, &tour, &oracle).unwrap();

        let collection = tour_feature_collection(&g, &nodes, &encoded, &oracle).unwrap();
        let features = collection["features"].as_array().unwrap();
        // 2 points + 2 segments (out and return).
        assert_eq!(features.len(), 4);

        let lines: Vec<_> = features
            .iter()
            .filter(|f| f["geometry"]["type"] == "LineString")
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines.last().unwrap()["properties"]["role"], "return");
        // Road-following geometry: each leg passes through an intermediate
        // ring node, so it has three coordinates.
        assert_eq!(
            lines[0]["geometry"]["coordinates"].as_array().unwrap().len(),
            3
        );
    }

    #[test]
    fn single_node_tour_emits_no_linestrings() {
        let g = ring();
        let oracle = DijkstraOracle::new(&g, "length");
        let nodes = NodeSet::new(vec![3]);
        let tour = nearest_neighbor_tour(&nodes, 3, &oracle).unwrap();
        let encoded = encode_tour(&nodes, &tour, &oracle).unwrap();

        let collection = tour_feature_collection(&g, &nodes, &encoded, &oracle).unwrap();
        let features = collection["features"].as_array().unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0]["geometry"]["type"], "Point");
    }

    #[test]
    fn start_point_is_labeled() {
        let g = ring();
        let oracle = DijkstraOracle::new(&g, "length");
        let nodes = NodeSet::new(vec![2, 4]);
        let tour = nearest_neighbor_tour(&nodes, 2, &oracle).unwrap();
        let encoded = encode_tour(&nodes, &tour, &oracle).unwrap();

        let collection = tour_feature_collection(&g, &nodes, &encoded, &oracle).unwrap();
        let features = collection["features"].as_array().unwrap();
        let start = features
            .iter()
            .find(|f| f["properties"]["role"] == "start")
            .unwrap();
        assert_eq!(start["properties"]["index"], 0);
        assert_eq!(start["geometry"]["coordinates"][0], 1.0);
    }
}
