//! Saving a computed path as a CSV trace plus a GeoJSON visualization

use std::fs::File;
use std::io::Write;

use anyhow::{Context, Result};
use transplan_core::prelude::*;
use transplan_core::routing::steps_to_geojson_string;

/// Writes `<name>.csv` with (mode, node_id) rows and `<name>.geojson` with
/// the path geometry
pub fn save_path(planner: &Planner, steps: &[TripStep], name: &str) -> Result<()> {
    let csv_path = format!("{name}.csv");
    let mut writer = csv::Writer::from_path(&csv_path)
        .with_context(|| format!("failed to create {csv_path}"))?;
    writer.write_record(["mode", "node_id"])?;
    for step in steps {
        writer.write_record([step.mode.as_str(), &step.node_id.to_string()])?;
    }
    writer.flush()?;

    let geojson_path = format!("{name}.geojson");
    let geojson = steps_to_geojson_string(steps, planner)?;
    let mut file =
        File::create(&geojson_path).with_context(|| format!("failed to create {geojson_path}"))?;
    file.write_all(geojson.as_bytes())?;

    Ok(())
}
