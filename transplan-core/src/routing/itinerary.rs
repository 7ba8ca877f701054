//! Trip steps and their presentation

use std::fmt;

use geo::LineString;
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use serde_json::{Map, Value};

use crate::planner::Planner;
use crate::{Error, Hours, NodeId, NO_PATH_EXISTS};

/// Transportation means used to reach a trip step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Walk,
    Bike,
    Bus,
}

impl Mode {
    pub fn as_str(self) -> &'static str {
        match self {
            Mode::Walk => "Walk",
            Mode::Bike => "Bike",
            Mode::Bus => "Bus",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One step of a fastest-path trip: the mode used to arrive at the node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TripStep {
    pub mode: Mode,
    pub node_id: NodeId,
}

/// Result of a fastest-path query. Unreachable queries carry
/// [`NO_PATH_EXISTS`] and an empty step list.
#[derive(Debug, Clone, PartialEq)]
pub struct Trip {
    pub hours: Hours,
    pub steps: Vec<TripStep>,
}

impl Trip {
    pub(crate) fn unreachable() -> Self {
        Self {
            hours: NO_PATH_EXISTS,
            steps: Vec::new(),
        }
    }

    pub fn exists(&self) -> bool {
        self.hours.is_finite()
    }

    /// Converts the trip to a `GeoJSON` `FeatureCollection`
    pub fn to_geojson(&self, planner: &Planner) -> FeatureCollection {
        steps_to_geojson(&self.steps, planner)
    }

    pub fn to_geojson_string(&self, planner: &Planner) -> Result<String, Error> {
        steps_to_geojson_string(&self.steps, planner)
    }
}

/// Serialized form of [`steps_to_geojson`]
pub fn steps_to_geojson_string(steps: &[TripStep], planner: &Planner) -> Result<String, Error> {
    serde_json::to_string(&steps_to_geojson(steps, planner))
        .map_err(|e| Error::GeoJsonError(e.to_string()))
}

/// Renders a trip-step sequence as display lines. Equal inputs produce
/// equal outputs.
pub fn describe_path(steps: &[TripStep]) -> Vec<String> {
    let mut lines = Vec::with_capacity(steps.len());
    for (idx, step) in steps.iter().enumerate() {
        if idx == 0 {
            lines.push(format!("Start at node {}", step.node_id));
            continue;
        }
        let line = match step.mode {
            Mode::Walk => format!("Walk to node {}", step.node_id),
            Mode::Bike => format!("Bike to node {}", step.node_id),
            Mode::Bus => format!("Take the bus to node {}", step.node_id),
        };
        lines.push(line);
    }
    lines
}

/// One LineString feature per same-mode run of steps, plus start and end
/// point markers.
pub fn steps_to_geojson(steps: &[TripStep], planner: &Planner) -> FeatureCollection {
    let mut features = Vec::new();

    let locate = |id: NodeId| planner.location_of(id).map(|p| vec![p.x(), p.y()]);

    let mut segment: Vec<Vec<f64>> = Vec::new();
    let mut segment_mode: Option<Mode> = None;
    for (idx, step) in steps.iter().enumerate() {
        let Some(position) = locate(step.node_id) else {
            continue;
        };
        if idx == 0 {
            features.push(point_feature(&position, "start", step.node_id));
            segment.push(position);
            continue;
        }
        if segment_mode.is_some() && segment_mode != Some(step.mode) {
            // Mode change: flush the finished run and reuse its endpoint
            // as the next run's origin
            let origin = segment.last().cloned();
            flush_segment(&mut features, &mut segment, segment_mode);
            segment.extend(origin);
        }
        segment_mode = Some(step.mode);
        segment.push(position);
    }
    flush_segment(&mut features, &mut segment, segment_mode);

    if steps.len() > 1 {
        if let Some(last) = steps.last() {
            if let Some(position) = locate(last.node_id) {
                features.push(point_feature(&position, "end", last.node_id));
            }
        }
    }

    FeatureCollection {
        bbox: None,
        features,
        foreign_members: None,
    }
}

fn flush_segment(features: &mut Vec<Feature>, segment: &mut Vec<Vec<f64>>, mode: Option<Mode>) {
    let coords = std::mem::take(segment);
    let Some(mode) = mode else {
        return;
    };
    if coords.len() < 2 {
        return;
    }
    let line: LineString<f64> = coords
        .iter()
        .map(|position| (position[0], position[1]))
        .collect();

    let mut properties = Map::new();
    properties.insert("mode".to_string(), Value::from(mode.as_str()));

    features.push(Feature {
        bbox: None,
        geometry: Some(Geometry::new(GeoJsonValue::from(&line))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    });
}

fn point_feature(position: &[f64], marker: &str, node_id: NodeId) -> Feature {
    let mut properties = Map::new();
    properties.insert("marker".to_string(), Value::from(marker));
    properties.insert("node_id".to_string(), Value::from(node_id));

    Feature {
        bbox: None,
        geometry: Some(Geometry::new(GeoJsonValue::Point(position.to_vec()))),
        id: None,
        properties: Some(properties),
        foreign_members: None,
    }
}
