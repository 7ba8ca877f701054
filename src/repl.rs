//! Interactive command loop over the planner facade

use std::io::{BufRead, Write};

use anyhow::Result;
use transplan_core::geo_utils::format_dms;
use transplan_core::prelude::*;

use crate::export;

/// Last computed path, kept for `save` and `print`
enum LastPath {
    None,
    Shortest(Vec<NodeId>),
    Fastest(Vec<TripStep>),
}

impl LastPath {
    /// Uniform (mode, node) view for export; shortest paths are all Walk
    fn steps(&self) -> Option<Vec<TripStep>> {
        match self {
            LastPath::None => None,
            LastPath::Shortest(nodes) => Some(
                nodes
                    .iter()
                    .map(|&node_id| TripStep {
                        mode: Mode::Walk,
                        node_id,
                    })
                    .collect(),
            ),
            LastPath::Fastest(steps) => Some(steps.clone()),
        }
    }
}

const HELP: &[&str] = &[
    "help     Display this help menu",
    "exit     Exit the program",
    "quit     Exit the program",
    "count    Output the number of nodes in the map",
    "node     Syntax \"node [0, count)\", outputs node ID and Lat/Lon",
    "shortest Syntax \"shortest start end\", distance of the shortest walking path",
    "fastest  Syntax \"fastest start end\", time of the fastest multimodal path",
    "save     Saves the last calculated path to file",
    "print    Prints the steps for the last calculated path",
];

pub fn run<R, W, E>(planner: &Planner, input: R, out: &mut W, err: &mut E) -> Result<()>
where
    R: BufRead,
    W: Write,
    E: Write,
{
    let mut last = LastPath::None;

    for line in input.lines() {
        let line = line?;
        let mut parts = line.split_whitespace();
        let Some(command) = parts.next() else {
            continue;
        };

        match command {
            "exit" | "quit" => return Ok(()),
            "help" => {
                for entry in HELP {
                    writeln!(out, "{entry}")?;
                }
            }
            "count" => writeln!(out, "{} nodes", planner.node_count())?,
            "node" => match parts.next().and_then(|token| token.parse::<usize>().ok()) {
                Some(index) => match planner.sorted_node_by_index(index) {
                    Some(node) => writeln!(
                        out,
                        "Node {index}: id = {} is at {}",
                        node.id,
                        format_dms(node.geometry)
                    )?,
                    None => writeln!(err, "Index out of range [0, {})", planner.node_count())?,
                },
                None => writeln!(err, "Usage: node [0, count)")?,
            },
            "shortest" => match parse_endpoints(&mut parts) {
                Some((src, dest)) => {
                    let route = planner.find_shortest_path(src, dest);
                    if route.exists() {
                        writeln!(out, "Shortest path distance: {:.4} miles", route.miles)?;
                        last = LastPath::Shortest(route.nodes);
                    } else {
                        writeln!(err, "No path exists between {src} and {dest}")?;
                        last = LastPath::None;
                    }
                }
                None => writeln!(err, "Usage: shortest start end")?,
            },
            "fastest" => match parse_endpoints(&mut parts) {
                Some((src, dest)) => {
                    let trip = planner.find_fastest_path(src, dest);
                    if trip.exists() {
                        writeln!(out, "Fastest path time: {:.4} hours", trip.hours)?;
                        last = LastPath::Fastest(trip.steps);
                    } else {
                        writeln!(err, "No path exists between {src} and {dest}")?;
                        last = LastPath::None;
                    }
                }
                None => writeln!(err, "Usage: fastest start end")?,
            },
            "save" => match last.steps() {
                Some(steps) => {
                    let name = match parts.next() {
                        Some(token) => token.to_string(),
                        None => default_filename(&steps),
                    };
                    match export::save_path(planner, &steps, &name) {
                        Ok(()) => writeln!(out, "Path saved to {name}")?,
                        Err(e) => writeln!(err, "Failed to save path: {e}")?,
                    }
                }
                None => writeln!(err, "No path to save")?,
            },
            "print" => match &last {
                LastPath::Fastest(steps) => {
                    for line in planner.get_path_description(steps) {
                        writeln!(out, "{line}")?;
                    }
                }
                LastPath::Shortest(nodes) => {
                    let rendered: Vec<String> =
                        nodes.iter().map(|id| id.to_string()).collect();
                    writeln!(out, "Path: {}", rendered.join(" -> "))?;
                }
                LastPath::None => writeln!(err, "No path computed yet to print")?,
            },
            _ => writeln!(err, "Unknown command: {command}")?,
        }
    }

    // EOF without an explicit exit is still a clean exit
    Ok(())
}

fn parse_endpoints<'a, I>(parts: &mut I) -> Option<(NodeId, NodeId)>
where
    I: Iterator<Item = &'a str>,
{
    let src = parts.next()?.parse().ok()?;
    let dest = parts.next()?.parse().ok()?;
    Some((src, dest))
}

fn default_filename(steps: &[TripStep]) -> String {
    match (steps.first(), steps.last()) {
        (Some(first), Some(last)) => format!("{}_{}", first.node_id, last.node_id),
        _ => "path".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use geo::Point;

    use super::*;

    fn planner() -> Planner {
        let nodes = vec![
            Node {
                id: 1,
                geometry: Point::new(0.0, 0.0),
                attributes: Vec::new(),
            },
            Node {
                id: 2,
                geometry: Point::new(0.01, 0.0),
                attributes: Vec::new(),
            },
        ];
        let ways = vec![Way {
            id: 7,
            nodes: vec![1, 2],
            attributes: Vec::new(),
        }];
        Planner::new(
            StreetMap::new(nodes, ways),
            BusNetwork::default(),
            RoutingConfig::default(),
        )
    }

    fn session(input: &str) -> (String, String) {
        let planner = planner();
        let mut out = Vec::new();
        let mut err = Vec::new();
        run(&planner, input.as_bytes(), &mut out, &mut err).unwrap();
        (
            String::from_utf8(out).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    #[test]
    fn count_and_node_commands() {
        let (out, err) = session("count\nnode 0\nnode 5\nexit\n");
        assert!(out.contains("2 nodes"));
        assert!(out.contains("Node 0: id = 1 is at "));
        assert!(err.contains("Index out of range [0, 2)"));
    }

    #[test]
    fn shortest_then_print() {
        let (out, _) = session("shortest 1 2\nprint\nquit\n");
        assert!(out.contains("Shortest path distance: "));
        assert!(out.contains("Path: 1 -> 2"));
    }

    #[test]
    fn bad_input_goes_to_stderr() {
        let (_, err) = session("shortest one two\nbogus\nprint\n");
        assert!(err.contains("Usage: shortest start end"));
        assert!(err.contains("Unknown command: bogus"));
        assert!(err.contains("No path computed yet to print"));
    }
}
