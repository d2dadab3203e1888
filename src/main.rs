mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use foxroute_core::DisplayPoint;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "foxroute",
    version,
    about = "Compile and query the Foxhole road network"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Compile SVG road artwork into an adjacency document
    Compile {
        /// SVG document (or bare path data with --raw)
        source: PathBuf,

        /// Adjacency document to write
        #[arg(short, long)]
        output: PathBuf,

        /// Read SOURCE as the content of a single `d` attribute
        #[arg(long)]
        raw: bool,
    },
    /// Snap a map position to the closest road node
    Nearest {
        #[arg(long)]
        graph: PathBuf,

        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
    },
    /// Route between two map positions and print the route as GeoJSON
    Route {
        #[arg(long)]
        graph: PathBuf,

        /// Start position as LAT,LNG
        #[arg(long, value_parser = parse_lat_lng, allow_hyphen_values = true)]
        from: DisplayPoint,

        /// End position as LAT,LNG
        #[arg(long, value_parser = parse_lat_lng, allow_hyphen_values = true)]
        to: DisplayPoint,
    },
}

fn parse_lat_lng(text: &str) -> Result<DisplayPoint, String> {
    let (lat, lng) = text
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LNG, got {text:?}"))?;
    let parse = |value: &str| {
        value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| format!("invalid coordinate {value:?}"))
    };
    Ok(DisplayPoint::new(parse(lat)?, parse(lng)?))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout().lock();
    match cli.command {
        Command::Compile {
            source,
            output,
            raw,
        } => commands::compile(source, output, raw, &mut stdout),
        Command::Nearest { graph, lat, lng } => {
            commands::nearest(&graph, DisplayPoint::new(lat, lng), &mut stdout)
        }
        Command::Route { graph, from, to } => commands::route(&graph, from, to, &mut stdout),
    }
}
