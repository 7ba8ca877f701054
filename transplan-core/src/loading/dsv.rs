//! Delimiter-separated bus data ingest
//!
//! Both sources tolerate a header row: any row whose fields fail typed
//! deserialization is skipped, so real-world files with headers just work.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::ReaderBuilder;
use serde::Deserialize;

use crate::model::{BusNetwork, Route, Stop};
use crate::{Error, NodeId, StopId};

/// Reads a bus network from stops and routes files
pub fn bus_network_from_dsv(
    stops_path: &Path,
    routes_path: &Path,
    delimiter: u8,
) -> Result<BusNetwork, Error> {
    let stop_rows = read_rows(File::open(stops_path)?, delimiter);
    let route_rows = read_rows(File::open(routes_path)?, delimiter);
    Ok(assemble(stop_rows, route_rows))
}

/// Reads a bus network from any pair of readers
pub fn bus_network_from_readers<S: Read, R: Read>(
    stops: S,
    routes: R,
    delimiter: u8,
) -> BusNetwork {
    assemble(read_rows(stops, delimiter), read_rows(routes, delimiter))
}

/// Typed rows from a delimiter-separated source; rows that fail to
/// deserialize (the header row included) are skipped.
fn read_rows<T, R>(source: R, delimiter: u8) -> Vec<T>
where
    T: for<'de> Deserialize<'de>,
    R: Read,
{
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(source)
        .deserialize()
        .filter_map(Result::ok)
        .collect()
}

fn assemble(stop_rows: Vec<(StopId, NodeId)>, route_rows: Vec<(String, StopId)>) -> BusNetwork {
    let stops = stop_rows
        .into_iter()
        .map(|(id, node_id)| Stop { id, node_id })
        .collect();

    // Row order defines the stop sequence within a route; routes
    // materialize in ascending name order.
    let mut grouped: BTreeMap<String, Vec<StopId>> = BTreeMap::new();
    for (name, stop_id) in route_rows {
        grouped.entry(name).or_default().push(stop_id);
    }
    let routes = grouped
        .into_iter()
        .map(|(name, stops)| Route { name, stops })
        .collect();

    BusNetwork::new(stops, routes)
}
