//! Approximate round-trip tours over real road networks.
//!
//! Reduces a weighted road graph to its largest connected component,
//! samples a reproducible node subset, builds a nearest-neighbor tour from
//! shortest-path distances, and encodes the result (index order, segment
//! distances, total) for rendering.

mod algo;
mod error;
mod graph;
pub mod io;
pub mod logging;
mod node;
mod tour;

pub use algo::oracle::{CachedOracle, DijkstraOracle, DistanceOracle};
pub use algo::reduce::largest_component;
pub use algo::sample::{sample, NodeSet};
pub use algo::solver::nearest_neighbor_tour;
pub use error::{Error, Result};
pub use graph::{RoadEdge, RoadNetwork, RouteGraph};
pub use io::options::SolverOptions;
pub use node::{NodeId, RoadNode};
pub use tour::{encode_tour, EncodedTour, Tour};
