//! Multimodal trip planning over a street map with a bus overlay
//!
//! The planner ingests an OpenStreetMap XML street map plus tabular bus
//! stop and route data, fuses them into parallel per-mode weighted graphs,
//! and answers shortest-walking-distance and fastest-multimodal-time
//! queries over the combined network.

pub mod error;
pub mod geo_utils;
pub mod loading;
pub mod model;
pub mod planner;
pub mod prelude;
pub mod routing;

pub use error::Error;
pub use planner::Planner;

/// OSM street node identifier
pub type NodeId = u64;
/// OSM way identifier
pub type WayId = u64;
/// Bus stop identifier
pub type StopId = u64;
/// Travel time in hours
pub type Hours = f64;
/// Great-circle distance in miles
pub type Miles = f64;

/// Sentinel returned when a query has no answer; the accompanying path is
/// always empty.
pub const NO_PATH_EXISTS: f64 = f64::INFINITY;
