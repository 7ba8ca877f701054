//! Fastest multimodal path over a composite (vertex, mode) state space
//!
//! The search walks two mode layers (Walk, Bike) over the per-mode street
//! graphs, swaps between them at zero cost, and rides the bus overlay as
//! transitions that land back in the Walk layer at a downstream stop.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use hashbrown::HashMap;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use super::graph::ModeGraphs;
use super::itinerary::{Mode, Trip, TripStep};
use crate::geo_utils::haversine_miles;
use crate::loading::RoutingConfig;
use crate::model::BusIndexer;
use crate::{Miles, NodeId};

/// Mode layers of the search; a bus ride is an edge, not a layer
const MODE_COUNT: usize = 2;
const WALK: usize = 0;
const BIKE: usize = 1;

/// Kind of the edge that reached a state, kept per state for trip
/// reconstruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EdgeKind {
    WalkEdge,
    BikeEdge,
    ModeSwap,
    BusSegment,
}

impl EdgeKind {
    /// Reported mode of a step reached over this edge
    fn mode(self) -> Mode {
        match self {
            EdgeKind::WalkEdge | EdgeKind::ModeSwap => Mode::Walk,
            EdgeKind::BikeEdge => Mode::Bike,
            EdgeKind::BusSegment => Mode::Bus,
        }
    }
}

#[derive(Copy, Clone, PartialEq)]
struct State {
    cost: f64,
    state: usize,
}

impl Eq for State {}

// Min-heap by cost (reversed from standard Rust BinaryHeap); equal costs
// pop the smaller state id first, keeping results byte-stable.
impl Ord for State {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .cost
            .total_cmp(&self.cost)
            .then_with(|| other.state.cmp(&self.state))
    }
}

impl PartialOrd for State {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Per-route boarding data: the street vertex of each stop (where the
/// stop's node exists in the map) and cumulative great-circle miles along
/// the stop sequence. Stops without a street node contribute no distance
/// and cannot be boarded or alighted at.
#[derive(Debug, Clone)]
struct RouteGeometry {
    stop_vertices: Vec<Option<NodeIndex>>,
    prefix_miles: Vec<Miles>,
}

/// Bus overlay: for every street vertex hosting a stop, each
/// (route, position) the planner may board at.
#[derive(Debug, Clone)]
pub(crate) struct BusOverlay {
    routes: Vec<RouteGeometry>,
    boardings: HashMap<NodeIndex, Vec<(usize, usize)>>,
}

impl BusOverlay {
    pub(crate) fn build(indexer: &BusIndexer, graphs: &ModeGraphs) -> Self {
        let routes: Vec<RouteGeometry> = indexer
            .sorted_routes()
            .iter()
            .map(|route| {
                let stop_vertices: Vec<Option<NodeIndex>> = route
                    .stops
                    .iter()
                    .map(|&stop_id| {
                        indexer
                            .stop_by_id(stop_id)
                            .and_then(|stop| graphs.vertex_of(stop.node_id))
                    })
                    .collect();

                let mut prefix_miles = Vec::with_capacity(stop_vertices.len());
                let mut total = 0.0;
                prefix_miles.push(total);
                for pair in stop_vertices.windows(2) {
                    if let (Some(a), Some(b)) = (pair[0], pair[1]) {
                        total += haversine_miles(
                            graphs.location_at(a.index()),
                            graphs.location_at(b.index()),
                        );
                    }
                    prefix_miles.push(total);
                }

                RouteGeometry {
                    stop_vertices,
                    prefix_miles,
                }
            })
            .collect();

        // Boarding happens through the canonical stop at a node, so the
        // node -> stop mapping decides which occurrences are reachable.
        let mut boardings: HashMap<NodeIndex, Vec<(usize, usize)>> = HashMap::new();
        for index in 0..indexer.stop_count() {
            let Some(stop) = indexer.sorted_stop_by_index(index) else {
                continue;
            };
            if indexer.stop_by_node_id(stop.node_id) != Some(stop) {
                continue; // shadowed by another stop on the same node
            }
            let Some(vertex) = graphs.vertex_of(stop.node_id) else {
                continue;
            };
            for &occurrence in indexer.routes_for_stop(stop.id) {
                boardings.entry(vertex).or_default().push(occurrence);
            }
        }

        Self { routes, boardings }
    }
}

/// Dijkstra over (vertex, mode) states; `state_id = vertex * 2 + mode`
/// keeps the distance and predecessor scratch flat.
pub(crate) fn fastest_path(
    graphs: &ModeGraphs,
    overlay: &BusOverlay,
    config: &RoutingConfig,
    src: NodeId,
    dest: NodeId,
) -> Trip {
    let (Some(src), Some(dest)) = (graphs.vertex_of(src), graphs.vertex_of(dest)) else {
        return Trip::unreachable();
    };

    let state_count = graphs.vertex_count() * MODE_COUNT;
    let mut dist = vec![f64::INFINITY; state_count];
    let mut prev = vec![usize::MAX; state_count];
    let mut kind = vec![EdgeKind::WalkEdge; state_count];
    let mut heap = BinaryHeap::new();

    let start = src.index() * MODE_COUNT + WALK;
    dist[start] = 0.0;
    heap.push(State {
        cost: 0.0,
        state: start,
    });

    while let Some(State { cost, state }) = heap.pop() {
        if cost > dist[state] {
            continue; // stale heap entry
        }

        let vertex = NodeIndex::new(state / MODE_COUNT);
        let mode = state % MODE_COUNT;

        if vertex == dest {
            return reconstruct(graphs, &prev, &kind, start, state, cost);
        }

        let mut relax = |next_state: usize, next_cost: f64, edge_kind: EdgeKind| {
            if next_cost < dist[next_state] {
                dist[next_state] = next_cost;
                prev[next_state] = state;
                kind[next_state] = edge_kind;
                heap.push(State {
                    cost: next_cost,
                    state: next_state,
                });
            }
        };

        match mode {
            WALK => {
                for edge in graphs.walk.edges(vertex) {
                    relax(
                        edge.target().index() * MODE_COUNT + WALK,
                        cost + *edge.weight(),
                        EdgeKind::WalkEdge,
                    );
                }
            }
            _ => {
                for edge in graphs.bike.edges(vertex) {
                    relax(
                        edge.target().index() * MODE_COUNT + BIKE,
                        cost + *edge.weight(),
                        EdgeKind::BikeEdge,
                    );
                }
            }
        }

        // Zero-cost swap to the other mode layer at the same vertex
        let other = vertex.index() * MODE_COUNT + (1 - mode);
        relax(other, cost, EdgeKind::ModeSwap);

        // Board a bus: every downstream stop of every route occurrence is
        // its own relaxation; the queue decides where to alight.
        if mode == WALK {
            if let Some(occurrences) = overlay.boardings.get(&vertex) {
                for &(route_idx, board_pos) in occurrences {
                    let route = &overlay.routes[route_idx];
                    for alight_pos in board_pos + 1..route.stop_vertices.len() {
                        let Some(alight_vertex) = route.stop_vertices[alight_pos] else {
                            continue;
                        };
                        let ride_miles =
                            route.prefix_miles[alight_pos] - route.prefix_miles[board_pos];
                        let ride_cost =
                            config.bus_stop_time + ride_miles / config.default_speed_limit;
                        relax(
                            alight_vertex.index() * MODE_COUNT + WALK,
                            cost + ride_cost,
                            EdgeKind::BusSegment,
                        );
                    }
                }
            }
        }
    }

    Trip::unreachable()
}

fn reconstruct(
    graphs: &ModeGraphs,
    prev: &[usize],
    kind: &[EdgeKind],
    start: usize,
    end: usize,
    cost: f64,
) -> Trip {
    let mut chain = vec![end];
    let mut current = end;
    while current != start {
        current = prev[current];
        chain.push(current);
    }
    chain.reverse();

    let steps = chain
        .iter()
        .enumerate()
        .map(|(idx, &state)| {
            // First step is Walk by convention; later steps report the
            // incoming edge's mode
            let mode = if idx == 0 { Mode::Walk } else { kind[state].mode() };
            TripStep {
                mode,
                node_id: graphs.node_id_at(state / MODE_COUNT),
            }
        })
        .collect();

    Trip { hours: cost, steps }
}
