//! Planner facade over the street map, the bus network, and the graphs
//!
//! All state is built once at construction; queries are read-only and may
//! be issued through shared references from any number of callers.

use geo::Point;

use crate::loading::RoutingConfig;
use crate::model::{BusIndexer, BusNetwork, Node, StreetMap};
use crate::routing::dijkstra::{self, WalkingRoute};
use crate::routing::graph::ModeGraphs;
use crate::routing::itinerary::{describe_path, Trip, TripStep};
use crate::routing::multimodal::{self, BusOverlay};
use crate::NodeId;

#[derive(Debug, Clone)]
pub struct Planner {
    street_map: StreetMap,
    bus_network: BusNetwork,
    indexer: BusIndexer,
    graphs: ModeGraphs,
    overlay: BusOverlay,
    config: RoutingConfig,
}

impl Planner {
    pub fn new(street_map: StreetMap, bus_network: BusNetwork, config: RoutingConfig) -> Self {
        let graphs = ModeGraphs::build(&street_map, &config);
        let indexer = BusIndexer::new(&bus_network);
        let overlay = BusOverlay::build(&indexer, &graphs);
        Self {
            street_map,
            bus_network,
            indexer,
            graphs,
            overlay,
            config,
        }
    }

    /// Number of street nodes in the planning graph
    pub fn node_count(&self) -> usize {
        self.graphs.vertex_count()
    }

    /// Node at the given position of the ascending-node-id order
    pub fn sorted_node_by_index(&self, index: usize) -> Option<&Node> {
        let position = self.graphs.map_position(index)?;
        self.street_map.nodes().get(position)
    }

    /// Minimum-distance walking path; miles plus the node-id trace
    pub fn find_shortest_path(&self, src: NodeId, dest: NodeId) -> WalkingRoute {
        dijkstra::shortest_walking_path(&self.graphs, src, dest)
    }

    /// Minimum-time multimodal path over walking, biking, and bus riding
    pub fn find_fastest_path(&self, src: NodeId, dest: NodeId) -> Trip {
        multimodal::fastest_path(&self.graphs, &self.overlay, &self.config, src, dest)
    }

    /// Human-readable lines for a trip-step sequence
    pub fn get_path_description(&self, steps: &[TripStep]) -> Vec<String> {
        describe_path(steps)
    }

    pub fn street_map(&self) -> &StreetMap {
        &self.street_map
    }

    pub fn bus_network(&self) -> &BusNetwork {
        &self.bus_network
    }

    pub fn bus_indexer(&self) -> &BusIndexer {
        &self.indexer
    }

    pub fn config(&self) -> &RoutingConfig {
        &self.config
    }

    /// Location of a street node, if the map contains it
    pub fn location_of(&self, id: NodeId) -> Option<Point<f64>> {
        self.street_map.node_by_id(id).map(|node| node.geometry)
    }
}
