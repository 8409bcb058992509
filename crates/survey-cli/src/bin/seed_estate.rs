//! Seed a running survey server with a randomly planted estate.

use anyhow::Result;
use clap::Parser;
use survey_cli::random_trees;
use survey_core::GridSpec;
use survey_sdk::SurveyClient;

/// Create an estate with random trees and print its stats and drone plan
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Survey server URL
    #[arg(long, default_value = "http://localhost:3000")]
    url: String,

    /// Estate length (grid columns)
    #[arg(long, default_value_t = 10)]
    length: u32,

    /// Estate width (grid rows)
    #[arg(long, default_value_t = 10)]
    width: u32,

    /// Number of trees to plant
    #[arg(long, default_value_t = 20)]
    trees: usize,

    /// Tallest tree to plant
    #[arg(long, default_value_t = 30)]
    max_height: u32,

    /// Flight-distance budget for the drone plan
    #[arg(long)]
    max_distance: Option<i64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let client = SurveyClient::new(args.url);

    let estate_id = client
        .create_estate(i64::from(args.length), i64::from(args.width))
        .await?;
    println!("Created estate {} ({}x{})", estate_id, args.length, args.width);

    let grid = GridSpec::new(args.length, args.width);
    let placements = random_trees(&mut rand::rng(), grid, args.trees, args.max_height);
    for tree in &placements {
        client
            .plant_tree(
                &estate_id,
                i64::from(tree.x),
                i64::from(tree.y),
                i64::from(tree.height),
            )
            .await?;
    }
    println!("Planted {} trees", placements.len());

    let stats = client.stats(&estate_id).await?;
    println!(
        "Stats: count={} max={} min={} median={}",
        stats.count, stats.max, stats.min, stats.median
    );

    let plan = client.drone_plan(&estate_id, args.max_distance).await?;
    println!("Drone distance: {}", plan.distance);
    if let Some(rest) = plan.rest {
        println!("Rest point: ({}, {})", rest.x, rest.y);
    }

    Ok(())
}
