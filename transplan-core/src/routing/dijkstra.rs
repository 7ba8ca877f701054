//! Shortest walking path between two street nodes

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use super::graph::ModeGraphs;
use crate::geo_utils::haversine_miles;
use crate::{Miles, NodeId, NO_PATH_EXISTS};

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    node: NodeIndex,
}

impl Eq for State {}

// Min-heap by cost (reversed from standard Rust BinaryHeap); equal costs
// pop the smaller vertex index first, keeping results byte-stable.
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Result of a shortest-path query: total great-circle miles over the
/// chosen edges and the node ids from source to destination. Unreachable
/// queries carry [`NO_PATH_EXISTS`] and an empty node list.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkingRoute {
    pub miles: Miles,
    pub nodes: Vec<NodeId>,
}

impl WalkingRoute {
    pub(crate) fn unreachable() -> Self {
        Self {
            miles: NO_PATH_EXISTS,
            nodes: Vec::new(),
        }
    }

    pub fn exists(&self) -> bool {
        self.miles.is_finite()
    }
}

/// Dijkstra over the walking graph. The graph stores walking hours, but
/// with a constant walking speed the hour and mile orderings coincide, so
/// the reported distance is the Haversine-mile sum of the chosen edges.
pub(crate) fn shortest_walking_path(graphs: &ModeGraphs, src: NodeId, dest: NodeId) -> WalkingRoute {
    let (Some(src), Some(dest)) = (graphs.vertex_of(src), graphs.vertex_of(dest)) else {
        return WalkingRoute::unreachable();
    };

    let n = graphs.vertex_count();
    let mut dist = vec![f64::INFINITY; n];
    let mut prev = vec![usize::MAX; n];
    let mut heap = BinaryHeap::new();

    dist[src.index()] = 0.0;
    heap.push(State {
        cost: 0.0,
        node: src,
    });

    while let Some(State { cost, node }) = heap.pop() {
        if cost > dist[node.index()] {
            continue; // stale heap entry
        }
        if node == dest {
            break;
        }
        for edge in graphs.walk.edges(node) {
            let next = edge.target();
            let next_cost = cost + *edge.weight();
            if next_cost < dist[next.index()] {
                dist[next.index()] = next_cost;
                prev[next.index()] = node.index();
                heap.push(State {
                    cost: next_cost,
                    node: next,
                });
            }
        }
    }

    if dist[dest.index()].is_infinite() {
        return WalkingRoute::unreachable();
    }

    // Follow predecessors back to the source, then flip to src -> dest
    let mut order = vec![dest.index()];
    let mut current = dest.index();
    while current != src.index() {
        current = prev[current];
        order.push(current);
    }
    order.reverse();

    let miles = order
        .windows(2)
        .map(|pair| haversine_miles(graphs.location_at(pair[0]), graphs.location_at(pair[1])))
        .sum();
    let nodes = order.iter().map(|&v| graphs.node_id_at(v)).collect();

    WalkingRoute { miles, nodes }
}
