use std::time::Instant;

use log::info;

use road_tour::{
    encode_tour, io, largest_component, logging, nearest_neighbor_tour, sample, CachedOracle,
    Error, Result, RouteGraph, SolverOptions,
};

fn main() -> Result<()> {
    let now = Instant::now();
    let options = SolverOptions::from_args()?;
    logging::init_logger(&options)?;

    let graph = io::input::load_graph(&options.graph)?;
    info!(
        "input: nodes={} edges={} directed={}",
        graph.node_count(),
        graph.edge_count(),
        graph.is_directed()
    );

    let graph = largest_component(&graph)?;
    info!("reduced: nodes={} edges={}", graph.node_count(), graph.edge_count());

    let nodes = sample(&graph, options.nodes, options.seed)?;
    let start = nodes.get(options.start_index).ok_or_else(|| {
        Error::invalid_input(format!(
            "start index {} out of range for sample of {}",
            options.start_index,
            nodes.len()
        ))
    })?;

    if let Some(coords) = graph.coords(start) {
        info!("start: node {start} at {coords}");
    }

    let oracle = CachedOracle::precompute(&graph, &options.weight, nodes.ids())?;
    let tour = nearest_neighbor_tour(&nodes, start, &oracle)?;
    let encoded = encode_tour(&nodes, &tour, &oracle)?;

    println!("Tour: {:?}", encoded.indices);
    println!("Tour length = {:.2} km", encoded.total_km());

    if let Some(output) = options.output_path() {
        io::geojson::write_tour_geojson(&options.output, &graph, &nodes, &encoded, &oracle)?;
        println!("Saved map: {}", output.display());
    }

    info!(
        "output: n={} time={:.2}s",
        tour.visit_count(),
        now.elapsed().as_secs_f32()
    );
    encoded.log_metrics();

    Ok(())
}
