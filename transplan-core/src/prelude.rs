// Re-export key components
pub use crate::loading::{create_planner, PlannerConfig, RoutingConfig};
pub use crate::model::{BusIndexer, BusNetwork, Node, Route, Stop, StreetMap, Way};
pub use crate::planner::Planner;
pub use crate::routing::{describe_path, Mode, Trip, TripStep, WalkingRoute};

// Core identifier and quantity types
pub use crate::{Hours, Miles, NodeId, StopId, WayId};

pub use crate::{Error, NO_PATH_EXISTS};
