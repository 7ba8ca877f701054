//! Path-finding over the per-mode street graphs and the bus overlay

pub mod dijkstra;
pub mod graph;
pub mod itinerary;
pub mod multimodal;

pub use dijkstra::WalkingRoute;
pub use graph::ModeGraphs;
pub use itinerary::{describe_path, steps_to_geojson, steps_to_geojson_string, Mode, Trip, TripStep};
