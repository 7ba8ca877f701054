//! Bus system data structures

use hashbrown::HashMap;

use crate::{NodeId, StopId};

/// Bus stop anchored to a street node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stop {
    pub id: StopId,
    /// Street node the stop is located at
    pub node_id: NodeId,
}

/// Named ordered list of stops served by one bus line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    pub name: String,
    /// Stop ids in travel order
    pub stops: Vec<StopId>,
}

/// Read-only bus system: stops in document order, routes in ascending name
/// order.
#[derive(Debug, Clone, Default)]
pub struct BusNetwork {
    stops: Vec<Stop>,
    routes: Vec<Route>,
    stop_index: HashMap<StopId, usize>,
}

impl BusNetwork {
    pub fn new(stops: Vec<Stop>, routes: Vec<Route>) -> Self {
        let stop_index = stops
            .iter()
            .enumerate()
            .map(|(idx, stop)| (stop.id, idx))
            .collect();
        Self {
            stops,
            routes,
            stop_index,
        }
    }

    pub fn stop_count(&self) -> usize {
        self.stops.len()
    }

    pub fn route_count(&self) -> usize {
        self.routes.len()
    }

    pub fn stops(&self) -> &[Stop] {
        &self.stops
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn stop_by_id(&self, id: StopId) -> Option<Stop> {
        self.stop_index.get(&id).map(|&idx| self.stops[idx])
    }

    pub fn route_by_name(&self, name: &str) -> Option<&Route> {
        self.routes.iter().find(|route| route.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stop_and_route_lookups() {
        let network = BusNetwork::new(
            vec![
                Stop { id: 10, node_id: 100 },
                Stop { id: 7, node_id: 200 },
            ],
            vec![Route {
                name: "A".to_string(),
                stops: vec![10, 7],
            }],
        );
        assert_eq!(network.stop_count(), 2);
        assert_eq!(network.route_count(), 1);
        assert_eq!(network.stop_by_id(7).map(|s| s.node_id), Some(200));
        assert!(network.stop_by_id(1).is_none());
        assert_eq!(network.route_by_name("A").map(|r| r.stops.len()), Some(2));
        assert!(network.route_by_name("B").is_none());
    }
}
