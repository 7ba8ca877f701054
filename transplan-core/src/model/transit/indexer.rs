//! Constant-time lookups over a bus network
//!
//! The indexer is what lets the planner detect bus-accessible street nodes
//! during the multimodal search without scanning the route tables.

use hashbrown::HashMap;

use super::{BusNetwork, Route, Stop};
use crate::{NodeId, StopId};

#[derive(Debug, Clone)]
pub struct BusIndexer {
    /// Stops ascending by stop id
    stops: Vec<Stop>,
    /// Routes ascending lexicographic by name
    routes: Vec<Route>,
    /// Street node id -> the stop located at that node. Last-wins when the
    /// bus data places several stops on one node (largest stop id, since
    /// insertion follows ascending stop-id order).
    node_to_stop: HashMap<NodeId, Stop>,
    /// Stop id -> every (route index, position within route) occurrence
    stop_routes: HashMap<StopId, Vec<(usize, usize)>>,
}

impl BusIndexer {
    pub fn new(network: &BusNetwork) -> Self {
        let mut stops = network.stops().to_vec();
        stops.sort_by_key(|stop| stop.id);

        let mut routes = network.routes().to_vec();
        routes.sort_by(|a, b| a.name.cmp(&b.name));

        let mut node_to_stop = HashMap::with_capacity(stops.len());
        for stop in &stops {
            node_to_stop.insert(stop.node_id, *stop);
        }

        let mut stop_routes: HashMap<StopId, Vec<(usize, usize)>> = HashMap::new();
        for (route_idx, route) in routes.iter().enumerate() {
            for (position, &stop_id) in route.stops.iter().enumerate() {
                stop_routes
                    .entry(stop_id)
                    .or_default()
                    .push((route_idx, position));
            }
        }

        Self {
            stops,
            routes,
            node_to_stop,
            stop_routes,
        }
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    /// Stop at the given position of the ascending-stop-id order
    pub fn sorted_stop_by_index(&self, index: usize) -> Option<Stop> {
        self.stops.get(index).copied()
    }

    /// Route at the given position of the ascending-name order
    pub fn sorted_route_by_index(&self, index: usize) -> Option<&Route> {
        self.routes.get(index)
    }

    /// Routes in ascending name order
    pub fn sorted_routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn stop_by_id(&self, id: StopId) -> Option<Stop> {
        self.stops
            .binary_search_by_key(&id, |stop| stop.id)
            .ok()
            .map(|idx| self.stops[idx])
    }

    /// Stop located at the given street node, if any
    pub fn stop_by_node_id(&self, node_id: NodeId) -> Option<Stop> {
        self.node_to_stop.get(&node_id).copied()
    }

    /// Every (route index, position) at which the stop appears, in sorted
    /// route order
    pub fn routes_for_stop(&self, stop_id: StopId) -> &[(usize, usize)] {
        self.stop_routes
            .get(&stop_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every route containing a segment whose consecutive stops sit at the
    /// two nodes, in either direction. Empty if either node hosts no stop.
    pub fn routes_between_node_ids(&self, src_node: NodeId, dest_node: NodeId) -> Vec<&Route> {
        let (Some(src_stop), Some(dest_stop)) = (
            self.stop_by_node_id(src_node),
            self.stop_by_node_id(dest_node),
        ) else {
            return Vec::new();
        };

        self.routes
            .iter()
            .filter(|route| {
                route.stops.windows(2).any(|pair| {
                    (pair[0] == src_stop.id && pair[1] == dest_stop.id)
                        || (pair[0] == dest_stop.id && pair[1] == src_stop.id)
                })
            })
            .collect()
    }

    /// True iff at least one route has a segment between the stops at the
    /// two nodes
    pub fn route_between_node_ids(&self, src_node: NodeId, dest_node: NodeId) -> bool {
        !self.routes_between_node_ids(src_node, dest_node).is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn network() -> BusNetwork {
        BusNetwork::new(
            vec![
                Stop { id: 3, node_id: 300 },
                Stop { id: 1, node_id: 100 },
                Stop { id: 2, node_id: 200 },
            ],
            vec![
                Route {
                    name: "Z".to_string(),
                    stops: vec![2, 3],
                },
                Route {
                    name: "A".to_string(),
                    stops: vec![1, 2, 3],
                },
            ],
        )
    }

    #[test]
    fn stops_sorted_by_id_and_routes_by_name() {
        let indexer = BusIndexer::new(&network());
        assert_eq!(indexer.stop_count(), 3);
        assert_eq!(indexer.route_count(), 2);
        let ids: Vec<StopId> = (0..3)
            .filter_map(|i| indexer.sorted_stop_by_index(i))
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, [1, 2, 3]);
        assert_eq!(
            indexer.sorted_route_by_index(0).map(|r| r.name.as_str()),
            Some("A")
        );
        assert!(indexer.sorted_route_by_index(2).is_none());
    }

    #[test]
    fn stop_lookup_by_node_id() {
        let indexer = BusIndexer::new(&network());
        assert_eq!(indexer.stop_by_node_id(200).map(|s| s.id), Some(2));
        assert!(indexer.stop_by_node_id(999).is_none());
    }

    #[test]
    fn duplicate_stops_on_one_node_are_last_wins() {
        let indexer = BusIndexer::new(&BusNetwork::new(
            vec![
                Stop { id: 9, node_id: 100 },
                Stop { id: 4, node_id: 100 },
            ],
            Vec::new(),
        ));
        // Insertion follows ascending stop id, so the largest id wins
        assert_eq!(indexer.stop_by_node_id(100).map(|s| s.id), Some(9));
    }

    #[test]
    fn route_segments_between_nodes() {
        let indexer = BusIndexer::new(&network());
        // 1 -> 2 appears only on route A
        let routes = indexer.routes_between_node_ids(100, 200);
        assert_eq!(routes.len(), 1);
        assert_eq!(routes[0].name, "A");
        // reversed direction matches too
        assert!(indexer.route_between_node_ids(200, 100));
        // 2 -> 3 appears on both routes, in sorted name order
        let both: Vec<&str> = indexer
            .routes_between_node_ids(200, 300)
            .iter()
            .map(|r| r.name.as_str())
            .collect();
        assert_eq!(both, ["A", "Z"]);
        // 1 and 3 are on a common route but never adjacent
        assert!(!indexer.route_between_node_ids(100, 300));
        // unknown node
        assert!(indexer.routes_between_node_ids(100, 999).is_empty());
    }

    #[test]
    fn routes_for_stop_lists_every_occurrence() {
        let indexer = BusIndexer::new(&network());
        // stop 2 is position 1 on route A (index 0) and position 0 on Z (index 1)
        assert_eq!(indexer.routes_for_stop(2), &[(0, 1), (1, 0)]);
        assert!(indexer.routes_for_stop(42).is_empty());
    }
}
