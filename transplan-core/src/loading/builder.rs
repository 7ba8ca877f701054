use log::info;

use super::config::PlannerConfig;
use super::{dsv, osm};
use crate::{Error, Planner};

/// Assembles a planner from the configured input files
///
/// # Errors
///
/// Returns an error if any input file cannot be read or the street map
/// contains no nodes.
pub fn create_planner(config: &PlannerConfig) -> Result<Planner, Error> {
    info!(
        "Processing street data (OSM): {}",
        config.osm_path.display()
    );
    let street_map = osm::street_map_from_xml(&config.osm_path)?;
    if street_map.node_count() == 0 {
        return Err(Error::InvalidData(
            "street map contains no nodes".to_string(),
        ));
    }

    info!(
        "Processing bus data: {} / {}",
        config.stops_path.display(),
        config.routes_path.display()
    );
    let bus_network =
        dsv::bus_network_from_dsv(&config.stops_path, &config.routes_path, config.delimiter)?;

    info!(
        "Assembling planner: {} nodes, {} ways, {} stops, {} routes (precompute budget {:?})",
        street_map.node_count(),
        street_map.way_count(),
        bus_network.stop_count(),
        bus_network.route_count(),
        config.routing.precompute_time_budget
    );
    let planner = Planner::new(street_map, bus_network, config.routing.clone());
    info!("Planner created successfully");
    Ok(planner)
}
