use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use transplan_core::prelude::*;

mod export;
mod repl;

/// Interactive multimodal trip planner over an OpenStreetMap street map
/// and a bus network
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// OpenStreetMap XML file with street map data
    osm_file: PathBuf,
    /// CSV file with bus stop data (stop_id,node_id)
    stops_file: PathBuf,
    /// CSV file with bus route data (route_name,stop_id)
    routes_file: PathBuf,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let config = PlannerConfig::new(args.osm_file, args.stops_file, args.routes_file);
    let planner = match create_planner(&config) {
        Ok(planner) => planner,
        Err(e) => {
            log::error!("initialization failed: {e}");
            eprintln!("Error: {e}");
            return ExitCode::from(1);
        }
    };

    let stdin = io::stdin();
    match repl::run(
        &planner,
        stdin.lock(),
        &mut io::stdout(),
        &mut io::stderr(),
    ) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::from(1)
        }
    }
}
