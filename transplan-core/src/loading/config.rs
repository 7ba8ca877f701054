use std::path::PathBuf;
use std::time::Duration;

/// Planner tuning options, immutable after construction
#[derive(Debug, Clone)]
pub struct RoutingConfig {
    /// Walking speed in miles per hour
    pub walk_speed: f64,
    /// Biking speed in miles per hour
    pub bike_speed: f64,
    /// Driving speed for ways without a usable `maxspeed` tag, also the
    /// bus travel speed, in miles per hour
    pub default_speed_limit: f64,
    /// Flat time penalty per boarded bus segment, in hours
    pub bus_stop_time: f64,
    /// Soft deadline for optional precomputation at construction
    pub precompute_time_budget: Duration,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        Self {
            walk_speed: 3.0,
            bike_speed: 8.0,
            default_speed_limit: 25.0,
            bus_stop_time: 30.0 / 3600.0,
            precompute_time_budget: Duration::from_secs(30),
        }
    }
}

/// Input locations and options for assembling a planner from files
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// OpenStreetMap XML file with street map data
    pub osm_path: PathBuf,
    /// Delimiter-separated file with `stop_id,node_id` rows
    pub stops_path: PathBuf,
    /// Delimiter-separated file with `route_name,stop_id` rows
    pub routes_path: PathBuf,
    /// Field delimiter for the stops and routes files
    pub delimiter: u8,
    pub routing: RoutingConfig,
}

impl PlannerConfig {
    pub fn new(osm_path: PathBuf, stops_path: PathBuf, routes_path: PathBuf) -> Self {
        Self {
            osm_path,
            stops_path,
            routes_path,
            delimiter: b',',
            routing: RoutingConfig::default(),
        }
    }
}
