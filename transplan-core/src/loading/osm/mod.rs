//! OSM XML processing
//!
//! The reader consumes a SAX-style event stream and recognizes `node`,
//! `way`, `nd`, and `tag` elements; everything else is ignored. Elements
//! with missing or unparseable numeric fields are skipped silently so a
//! partially damaged extract still yields a usable map.

use std::io::BufRead;
use std::path::Path;

use geo::Point;
use log::debug;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::model::{Node, StreetMap, Way};
use crate::Error;

/// Reads a street map from an OSM XML file
pub fn street_map_from_xml(path: &Path) -> Result<StreetMap, Error> {
    let mut reader = Reader::from_file(path)?;
    street_map_from_events(&mut reader)
}

/// Reads a street map from any buffered OSM XML source
pub fn street_map_from_reader<R: BufRead>(source: R) -> Result<StreetMap, Error> {
    let mut reader = Reader::from_reader(source);
    street_map_from_events(&mut reader)
}

/// Element currently being populated; `None` while between elements or
/// inside one that failed to parse.
enum Pending {
    Node(Node),
    Way(Way),
}

fn street_map_from_events<R: BufRead>(reader: &mut Reader<R>) -> Result<StreetMap, Error> {
    let mut nodes = Vec::new();
    let mut ways = Vec::new();
    let mut pending: Option<Pending> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(start) => open_element(&start, &mut pending),
            Event::Empty(start) => {
                // Self-closing form, e.g. <node .../> or <tag .../>
                open_element(&start, &mut pending);
                close_element(
                    start.local_name().as_ref(),
                    &mut pending,
                    &mut nodes,
                    &mut ways,
                );
            }
            Event::End(end) => close_element(
                end.local_name().as_ref(),
                &mut pending,
                &mut nodes,
                &mut ways,
            ),
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    debug!("parsed {} nodes and {} ways", nodes.len(), ways.len());
    Ok(StreetMap::new(nodes, ways))
}

fn open_element(start: &BytesStart, pending: &mut Option<Pending>) {
    match start.local_name().as_ref() {
        b"node" => *pending = parse_node(start).map(Pending::Node),
        b"way" => *pending = parse_way(start).map(Pending::Way),
        b"nd" => {
            if let Some(Pending::Way(way)) = pending {
                if let Some(node_ref) = attr_value(start, b"ref").and_then(|v| v.parse().ok()) {
                    way.nodes.push(node_ref);
                }
            }
        }
        b"tag" => {
            if let (Some(key), Some(value)) = (attr_value(start, b"k"), attr_value(start, b"v")) {
                match pending {
                    Some(Pending::Node(node)) => node.attributes.push((key, value)),
                    Some(Pending::Way(way)) => way.attributes.push((key, value)),
                    None => {}
                }
            }
        }
        _ => {}
    }
}

fn close_element(
    name: &[u8],
    pending: &mut Option<Pending>,
    nodes: &mut Vec<Node>,
    ways: &mut Vec<Way>,
) {
    match name {
        b"node" => {
            if let Some(Pending::Node(node)) = pending.take() {
                nodes.push(node);
            }
        }
        b"way" => {
            if let Some(Pending::Way(way)) = pending.take() {
                ways.push(way);
            }
        }
        _ => {}
    }
}

fn parse_node(start: &BytesStart) -> Option<Node> {
    let id = attr_value(start, b"id")?.parse().ok()?;
    let lat: f64 = attr_value(start, b"lat")?.parse().ok()?;
    let lon: f64 = attr_value(start, b"lon")?.parse().ok()?;
    Some(Node {
        id,
        geometry: Point::new(lon, lat),
        attributes: Vec::new(),
    })
}

fn parse_way(start: &BytesStart) -> Option<Way> {
    let id = attr_value(start, b"id")?.parse().ok()?;
    Some(Way {
        id,
        nodes: Vec::new(),
        attributes: Vec::new(),
    })
}

fn attr_value(start: &BytesStart, key: &[u8]) -> Option<String> {
    start
        .attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .and_then(|attr| attr.unescape_value().ok())
        .map(|value| value.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"<?xml version='1.0' encoding='UTF-8'?>
<osm version="0.6">
  <bounds minlat="38.5" minlon="-121.8" maxlat="38.6" maxlon="-121.7"/>
  <node id="62208369" lat="38.5178523" lon="-121.7712408"/>
  <node id="62209104" lat="38.535052" lon="-121.7408606">
    <tag k="highway" v="traffic_signals"/>
  </node>
  <way id="10745854">
    <nd ref="62208369"/>
    <nd ref="62209104"/>
    <tag k="highway" v="residential"/>
    <tag k="oneway" v="yes"/>
  </way>
</osm>"#;

    #[test]
    fn parses_nodes_ways_and_tags() {
        let map = street_map_from_reader(SAMPLE.as_bytes()).unwrap();
        assert_eq!(map.node_count(), 2);
        assert_eq!(map.way_count(), 1);

        let node = map.node_by_id(62209104).unwrap();
        assert_eq!(node.attribute("highway"), Some("traffic_signals"));
        assert!((node.geometry.y() - 38.535052).abs() < 1e-9);
        assert!((node.geometry.x() + 121.7408606).abs() < 1e-9);

        let way = &map.ways()[0];
        assert_eq!(way.id, 10745854);
        assert_eq!(way.nodes, [62208369, 62209104]);
        assert!(way.is_oneway());
    }

    #[test]
    fn skips_malformed_elements() {
        let xml = r#"<osm>
  <node id="1" lat="0.0" lon="0.0"/>
  <node id="2" lat="not-a-number" lon="0.0"/>
  <node id="3" lon="0.5"/>
  <node id="4" lat="0.5" lon="0.5">
    <tag k="name"/>
  </node>
  <way id="7">
    <nd ref="1"/>
    <nd ref="abc"/>
    <nd ref="4"/>
  </way>
</osm>"#;
        let map = street_map_from_reader(xml.as_bytes()).unwrap();
        let ids: Vec<_> = map.nodes().iter().map(|n| n.id).collect();
        assert_eq!(ids, [1, 4]);
        // the tag without a value was dropped
        assert!(map.node_by_id(4).unwrap().attributes.is_empty());
        // the unparseable nd ref was dropped, the rest kept
        assert_eq!(map.ways()[0].nodes, [1, 4]);
    }

    #[test]
    fn unrecognized_elements_are_ignored() {
        let xml = r#"<osm>
  <relation id="9"><member type="way" ref="1"/></relation>
  <node id="5" lat="1.0" lon="1.0"/>
</osm>"#;
        let map = street_map_from_reader(xml.as_bytes()).unwrap();
        assert_eq!(map.node_count(), 1);
        assert_eq!(map.way_count(), 0);
    }
}
