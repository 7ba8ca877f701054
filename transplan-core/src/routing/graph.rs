//! Construction of the three per-mode street graphs
//!
//! All three graphs share one vertex set: the street map's nodes in
//! ascending id order. Vertices are added in that order, so
//! `NodeIndex::index()` is the canonical dense vertex id and is stable
//! across runs on the same input. Edge weights are travel hours for the
//! owning mode.

use geo::Point;
use hashbrown::HashMap;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::geo_utils::haversine_miles;
use crate::loading::RoutingConfig;
use crate::model::StreetMap;
use crate::{Hours, NodeId};

#[derive(Debug, Clone)]
pub struct ModeGraphs {
    /// Positions into the street map's node list, ascending by node id
    node_order: Vec<usize>,
    /// Vertex locations in canonical order
    locations: Vec<Point<f64>>,
    vertex_of: HashMap<NodeId, NodeIndex>,
    pub drive: DiGraph<NodeId, Hours>,
    pub walk: DiGraph<NodeId, Hours>,
    pub bike: DiGraph<NodeId, Hours>,
}

impl ModeGraphs {
    pub fn build(map: &StreetMap, config: &RoutingConfig) -> Self {
        let mut node_order: Vec<usize> = (0..map.node_count()).collect();
        node_order.sort_by_key(|&pos| map.nodes()[pos].id);

        let vertex_count = node_order.len();
        let mut drive = DiGraph::with_capacity(vertex_count, map.way_count());
        let mut walk = DiGraph::with_capacity(vertex_count, 2 * map.way_count());
        let mut bike = DiGraph::with_capacity(vertex_count, map.way_count());
        let mut vertex_of = HashMap::with_capacity(vertex_count);
        let mut locations = Vec::with_capacity(vertex_count);

        for &pos in &node_order {
            let node = &map.nodes()[pos];
            let vertex = walk.add_node(node.id);
            drive.add_node(node.id);
            bike.add_node(node.id);
            vertex_of.insert(node.id, vertex);
            locations.push(node.geometry);
        }

        // Ways in document order, pairs in sequence order; edges are never
        // reordered after insertion.
        for way in map.ways() {
            let oneway = way.is_oneway();
            let bikeable = way.allows_bicycles();
            let drive_speed = way.maxspeed().unwrap_or(config.default_speed_limit);

            for pair in way.nodes.windows(2) {
                let (Some(&a), Some(&b)) = (vertex_of.get(&pair[0]), vertex_of.get(&pair[1]))
                else {
                    // way references a node the map does not contain
                    continue;
                };
                let miles = haversine_miles(locations[a.index()], locations[b.index()]);

                walk.add_edge(a, b, miles / config.walk_speed);
                walk.add_edge(b, a, miles / config.walk_speed);

                drive.add_edge(a, b, miles / drive_speed);
                if !oneway {
                    drive.add_edge(b, a, miles / drive_speed);
                }

                if bikeable {
                    bike.add_edge(a, b, miles / config.bike_speed);
                    if !oneway {
                        bike.add_edge(b, a, miles / config.bike_speed);
                    }
                }
            }
        }

        Self {
            node_order,
            locations,
            vertex_of,
            drive,
            walk,
            bike,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.walk.node_count()
    }

    /// Canonical vertex of an OSM node id
    pub fn vertex_of(&self, id: NodeId) -> Option<NodeIndex> {
        self.vertex_of.get(&id).copied()
    }

    /// OSM id of a canonical vertex
    pub fn node_id_at(&self, vertex: usize) -> NodeId {
        self.walk[NodeIndex::new(vertex)]
    }

    /// Location of a canonical vertex
    pub fn location_at(&self, vertex: usize) -> Point<f64> {
        self.locations[vertex]
    }

    /// Street map position (document order) of the vertex at the given
    /// place in the ascending-id order
    pub fn map_position(&self, index: usize) -> Option<usize> {
        self.node_order.get(index).copied()
    }
}

#[cfg(test)]
mod tests {
    use geo::Point;

    use super::*;
    use crate::model::{Node, Way};

    fn node(id: NodeId, lon: f64, lat: f64) -> Node {
        Node {
            id,
            geometry: Point::new(lon, lat),
            attributes: Vec::new(),
        }
    }

    fn way(id: u64, nodes: &[NodeId], tags: &[(&str, &str)]) -> Way {
        Way {
            id,
            nodes: nodes.to_vec(),
            attributes: tags
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    fn edge_weights(graph: &DiGraph<NodeId, Hours>, a: NodeIndex, b: NodeIndex) -> Vec<Hours> {
        graph.edges_connecting(a, b).map(|e| *e.weight()).collect()
    }

    #[test]
    fn vertices_follow_ascending_id_order() {
        let map = StreetMap::new(vec![node(30, 0.0, 0.0), node(10, 1.0, 0.0)], Vec::new());
        let graphs = ModeGraphs::build(&map, &RoutingConfig::default());
        assert_eq!(graphs.vertex_count(), 2);
        assert_eq!(graphs.node_id_at(0), 10);
        assert_eq!(graphs.node_id_at(1), 30);
        assert_eq!(graphs.vertex_of(30).map(NodeIndex::index), Some(1));
    }

    #[test]
    fn walking_edges_are_symmetric_even_on_oneway_streets() {
        let map = StreetMap::new(
            vec![node(1, 0.0, 0.0), node(2, 0.01, 0.0)],
            vec![way(7, &[1, 2], &[("oneway", "yes")])],
        );
        let graphs = ModeGraphs::build(&map, &RoutingConfig::default());
        let (a, b) = (graphs.vertex_of(1).unwrap(), graphs.vertex_of(2).unwrap());
        assert_eq!(edge_weights(&graphs.walk, a, b).len(), 1);
        assert_eq!(edge_weights(&graphs.walk, b, a).len(), 1);
    }

    #[test]
    fn oneway_restricts_driving_and_biking() {
        let map = StreetMap::new(
            vec![node(1, 0.0, 0.0), node(2, 0.01, 0.0)],
            vec![way(7, &[1, 2], &[("oneway", "yes")])],
        );
        let graphs = ModeGraphs::build(&map, &RoutingConfig::default());
        let (a, b) = (graphs.vertex_of(1).unwrap(), graphs.vertex_of(2).unwrap());
        assert_eq!(edge_weights(&graphs.drive, a, b).len(), 1);
        assert!(edge_weights(&graphs.drive, b, a).is_empty());
        assert_eq!(edge_weights(&graphs.bike, a, b).len(), 1);
        assert!(edge_weights(&graphs.bike, b, a).is_empty());
    }

    #[test]
    fn bicycle_no_ways_contribute_no_biking_edges() {
        let map = StreetMap::new(
            vec![node(1, 0.0, 0.0), node(2, 0.01, 0.0)],
            vec![way(7, &[1, 2], &[("bicycle", "no")])],
        );
        let graphs = ModeGraphs::build(&map, &RoutingConfig::default());
        assert_eq!(graphs.bike.edge_count(), 0);
        assert_eq!(graphs.walk.edge_count(), 2);
        assert_eq!(graphs.drive.edge_count(), 2);
    }

    #[test]
    fn maxspeed_scales_driving_weight_with_fallback() {
        let config = RoutingConfig::default();
        let map = StreetMap::new(
            vec![node(1, 0.0, 0.0), node(2, 0.01, 0.0), node(3, 0.02, 0.0)],
            vec![
                way(7, &[1, 2], &[("maxspeed", "50")]),
                way(8, &[2, 3], &[("maxspeed", "brisk")]),
            ],
        );
        let graphs = ModeGraphs::build(&map, &config);
        let (a, b, c) = (
            graphs.vertex_of(1).unwrap(),
            graphs.vertex_of(2).unwrap(),
            graphs.vertex_of(3).unwrap(),
        );
        let miles = haversine_miles(graphs.location_at(a.index()), graphs.location_at(b.index()));
        let tagged = edge_weights(&graphs.drive, a, b)[0];
        assert!((tagged - miles / 50.0).abs() < 1e-12);
        let fallback = edge_weights(&graphs.drive, b, c)[0];
        assert!((fallback - miles / config.default_speed_limit).abs() < 1e-12);
    }

    #[test]
    fn pairs_with_unknown_endpoints_are_skipped() {
        let map = StreetMap::new(
            vec![node(1, 0.0, 0.0), node(2, 0.01, 0.0), node(4, 0.03, 0.0)],
            // node 3 is missing; the pairs touching it are dropped
            vec![way(7, &[1, 2, 3, 4], &[])],
        );
        let graphs = ModeGraphs::build(&map, &RoutingConfig::default());
        // only 1-2 contributes; 2-3 and 3-4 both touch the unknown node
        assert_eq!(graphs.walk.edge_count(), 2);
    }
}
