//! trip_plan — command-line front end for the tripmate route planner.
//!
//! Loads the OpenFlights datasets once, then answers one command:
//!
//! ```text
//! trip_plan --airports airports.dat --routes routes.dat plan request.json
//! trip_plan --airports airports.dat --routes routes.dat plan -        # stdin
//! trip_plan --airports airports.dat --routes routes.dat nearest --lat 40.71 --lng -74.0
//! ```
//!
//! A request file holds one request object or an array of them; arrays are
//! planned in parallel and answered with an array in the same order.
//! Logs go to stderr (`RUST_LOG`, default `info`); JSON goes to stdout.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{Value, json};
use tracing_subscriber::EnvFilter;

use tm_air::load_openflights;
use tm_plan::{PlanRequest, PlannerConfig, TripPlanner};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// OpenFlights airports.dat
    #[arg(long, default_value = "airports.dat")]
    airports: PathBuf,

    /// OpenFlights routes.dat
    #[arg(long, default_value = "routes.dat")]
    routes: PathBuf,

    /// JSON file overriding planner thresholds
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Plan a trip (or an array of trips) read from a JSON file, `-` for stdin
    Plan { request: PathBuf },

    /// Print the airport closest to a coordinate
    Nearest {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str::<PlannerConfig>(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => PlannerConfig::default(),
    };

    let t0 = Instant::now();
    let (network, _report) = load_openflights(&args.airports, &args.routes)
        .context("loading airport network")?;
    tracing::info!(elapsed_ms = t0.elapsed().as_millis() as u64, "network ready");

    let planner = TripPlanner::new(Arc::new(network)).with_config(config)?;

    let out = match args.command {
        Command::Plan { request } => plan(&planner, &request)?,
        Command::Nearest { lat, lng } => serde_json::to_value(planner.nearest_airport(lat, lng)?)?,
    };

    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn plan(planner: &TripPlanner, path: &Path) -> Result<Value> {
    let text = read_input(path)?;
    let value: Value = serde_json::from_str(&text).context("request is not valid JSON")?;

    if value.is_array() {
        let requests: Vec<PlanRequest> = serde_json::from_value(value).context("invalid request array")?;
        let results = planner
            .plan_many(&requests)
            .into_iter()
            .map(|r| match r {
                Ok(plan) => serde_json::to_value(plan).map_err(anyhow::Error::from),
                Err(e) => Ok(json!({ "error": e.to_string() })),
            })
            .collect::<Result<Vec<_>>>()?;
        return Ok(Value::Array(results));
    }

    let request: PlanRequest = serde_json::from_value(value).context("invalid request")?;
    Ok(serde_json::to_value(planner.plan(&request)?)?)
}

fn read_input(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf).context("reading stdin")?;
        Ok(buf)
    } else {
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }
}
