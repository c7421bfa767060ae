//! Command line client for the plantation server.
//!
//! Talks to a running server, or simulates a drone flight locally from a
//! snapshot file with `simulate`.

use anyhow::Result;
use clap::{Parser, Subcommand};
use plantation_cli::{EstateClient, EstateSnapshot};
use plantation_core::{compute_stats, plan_flight_with, CutoffPolicy};

/// Manage plantation estates and plan monitoring drone flights
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Plantation Server URL
    #[arg(long, global = true, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Create an estate (dimensions in 10m plots)
    CreateEstate {
        #[arg(long)]
        width: i64,
        #[arg(long)]
        length: i64,
    },
    /// Plant a tree on a plot
    AddTree {
        #[arg(long)]
        estate: String,
        #[arg(long)]
        x: i64,
        #[arg(long)]
        y: i64,
        /// Height in metres (1-30)
        #[arg(long)]
        height: i64,
    },
    /// Show tree height statistics
    Stats {
        #[arg(long)]
        estate: String,
    },
    /// Ask the server for a drone flight plan
    DronePlan {
        #[arg(long)]
        estate: String,
        /// Distance budget in metres
        #[arg(long)]
        max_distance: Option<u64>,
    },
    /// Plan a flight locally from a snapshot file
    Simulate {
        #[arg(long)]
        file: String,
        /// Distance budget in metres
        #[arg(long)]
        max_distance: Option<u64>,
        /// Report the distance before the landing plot instead of after it
        #[arg(long)]
        rollback: bool,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();
    let client = EstateClient::new(&args.url);

    match args.command {
        Command::CreateEstate { width, length } => {
            let estate = client.create_estate(width, length)?;
            println!("Created estate {} ({}x{} plots)", estate.id, estate.width, estate.length);
        }
        Command::AddTree {
            estate,
            x,
            y,
            height,
        } => {
            let id = client.add_tree(&estate, x, y, height)?;
            println!("Planted tree {} at ({}, {})", id, x, y);
        }
        Command::Stats { estate } => {
            let stats = client.stats(&estate)?;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Command::DronePlan {
            estate,
            max_distance,
        } => {
            let plan = client.drone_plan(&estate, max_distance)?;
            println!("{}", serde_json::to_string_pretty(&plan)?);
        }
        Command::Simulate {
            file,
            max_distance,
            rollback,
        } => {
            let (estate, heights) = EstateSnapshot::load(&file)?.into_inputs()?;
            let policy = if rollback {
                CutoffPolicy::RollbackOverflow
            } else {
                CutoffPolicy::IncludeOverflow
            };

            println!("Simulating drone over {}x{} plots", estate.width, estate.length);
            let plan = plan_flight_with(estate.width, estate.length, &heights, max_distance, policy);
            match plan.rest {
                Some(rest) => println!("  Landed at {} after {}m", rest, plan.distance),
                None => println!("  Completed the plan: {}m", plan.distance),
            }

            let stats = compute_stats(&heights);
            println!(
                "  Trees: {} (min {}m, max {}m, median {}m)",
                stats.count, stats.min, stats.max, stats.median
            );
        }
    }

    Ok(())
}
