//! Run the drone flight-plan engine offline for one estate.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use survey_cli::parse_tree_arg;
use survey_core::{
    compute_flight_plan, compute_flight_plan_traced, DronePlanResponse, GridSpec, TreePlacement,
};

/// Compute the survey flight distance for an estate
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Estate length (grid columns)
    #[arg(long)]
    length: u32,

    /// Estate width (grid rows)
    #[arg(long)]
    width: u32,

    /// Tree as x,y,height (repeatable)
    #[arg(long = "tree", value_parser = parse_tree_arg)]
    trees: Vec<TreePlacement>,

    /// JSON file holding an array of {x, y, height}
    #[arg(long)]
    trees_file: Option<PathBuf>,

    /// Flight-distance budget
    #[arg(long)]
    max_distance: Option<i64>,

    /// Print every visited cell to stderr
    #[arg(long)]
    trace: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    anyhow::ensure!(
        args.length > 0 && args.width > 0,
        "estate dimensions must be positive"
    );

    let mut trees = args.trees;
    if let Some(path) = &args.trees_file {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let from_file: Vec<TreePlacement> =
            serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
        trees.extend(from_file);
    }

    let grid = GridSpec::new(args.length, args.width);
    let result = if args.trace {
        compute_flight_plan_traced(grid, &trees, args.max_distance, |visit| {
            eprintln!(
                "({:>3}, {:>3}) tree={:>2} altitude={:>2} distance={}",
                visit.cell.x, visit.cell.y, visit.tree_height, visit.altitude, visit.distance
            );
        })
    } else {
        compute_flight_plan(grid, &trees, args.max_distance)
    };

    let response = DronePlanResponse::from(result);
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
