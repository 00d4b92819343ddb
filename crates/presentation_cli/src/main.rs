//! MobiAcess CLI
//!
//! Command-line front end for place search, reverse geocoding and routing.

#![allow(clippy::print_stdout)]

mod config;

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use domain::{Coordinate, PlaceCandidate, RouteResult};
use integration_routing::{
    LocationRoutingService, MIN_QUERY_CHARS, ReverseGeocodeOutcome, RoutingError, SearchOutcome,
    TripPlanner,
};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::AppConfig;

/// MobiAcess CLI
#[derive(Parser)]
#[command(name = "mobiacess-cli")]
#[command(author, version, about = "MobiAcess place search and routing CLI", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (default: ./mobiacess.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search places by name or address
    ///
    /// Example: mobiacess-cli search "Avenida Paulista" --near=-23.56,-46.65
    Search {
        /// Free-text query
        query: String,

        /// Prefer results around this position ("lat,lon")
        #[arg(long, allow_hyphen_values = true)]
        near: Option<Coordinate>,
    },

    /// Look up the address of a position
    ///
    /// Example: mobiacess-cli reverse -- -23.5505,-46.6333
    Reverse {
        /// Position as "lat,lon"
        #[arg(allow_hyphen_values = true)]
        position: Coordinate,
    },

    /// Fetch a driving route between two positions
    ///
    /// Example: mobiacess-cli route -- -23.55,-46.63 -22.90,-43.20
    Route {
        /// Start as "lat,lon"
        #[arg(allow_hyphen_values = true)]
        from: Coordinate,

        /// End as "lat,lon"
        #[arg(allow_hyphen_values = true)]
        to: Coordinate,

        /// Also print every vertex of the path
        #[arg(long)]
        geometry: bool,
    },

    /// Plan a trip from place names, picking the first match of each search
    ///
    /// Without --from, the origin is the address at --near.
    /// Example: mobiacess-cli plan --from "Praça da Sé" --to "Parque Ibirapuera"
    Plan {
        /// Origin search text
        #[arg(long)]
        from: Option<String>,

        /// Destination search text
        #[arg(long)]
        to: String,

        /// Current position ("lat,lon"), used as search bias
        #[arg(long, allow_hyphen_values = true)]
        near: Option<Coordinate>,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Two lines per candidate: short name, then full name and position
fn format_candidates(places: &[PlaceCandidate]) -> String {
    places
        .iter()
        .enumerate()
        .map(|(i, p)| {
            format!(
                "{}. {}\n   {} ({:.5}, {:.5})",
                i + 1,
                p.short_name(),
                p.name,
                p.latitude,
                p.longitude
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_route(route: &RouteResult, geometry: bool) -> String {
    let mut out = format!("🚗 {}\n", route.format_summary());
    if let (Some(start), Some(end)) = (route.start(), route.end()) {
        out.push_str(&format!("   from {start}\n   to   {end}\n"));
    }
    out.push_str(&format!("   {} vertices", route.path.len()));
    if geometry {
        for coord in &route.path {
            out.push_str(&format!("\n   {coord}"));
        }
    }
    out
}

fn print_route(route: &RouteResult, geometry: bool, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(route)?);
    } else {
        println!("{}", format_route(route, geometry));
    }
    Ok(())
}

/// Write a reverse-geocoding outcome; failures go to `err`. Returns false on failure.
fn report_reverse(
    outcome: ReverseGeocodeOutcome,
    position: Coordinate,
    json: bool,
    out: &mut impl Write,
    err: &mut impl Write,
) -> anyhow::Result<bool> {
    match outcome {
        ReverseGeocodeOutcome::Found(place) => {
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&place)?)?;
            } else {
                writeln!(out, "📍 {}", place.name)?;
            }
            Ok(true)
        },
        ReverseGeocodeOutcome::NotFound => {
            writeln!(out, "📍 No address known for {position}")?;
            Ok(true)
        },
        ReverseGeocodeOutcome::Failed(e) => {
            writeln!(err, "❌ Reverse geocoding failed: {e}")?;
            Ok(false)
        },
    }
}

/// Trip searches only run for queries longer than [`MIN_QUERY_CHARS`]
fn ensure_searchable(label: &str, text: &str) -> anyhow::Result<()> {
    if text.trim().chars().count() <= MIN_QUERY_CHARS {
        anyhow::bail!(
            "{label} query \"{text}\" is too short: type more than {MIN_QUERY_CHARS} characters"
        );
    }
    Ok(())
}

/// First candidate of a trip search
fn first_candidate(
    label: &str,
    text: &str,
    result: Result<SearchOutcome<Vec<PlaceCandidate>>, RoutingError>,
) -> anyhow::Result<PlaceCandidate> {
    result
        .with_context(|| format!("{label} search failed"))?
        .fresh()
        .and_then(|places| places.into_iter().next())
        .with_context(|| format!("No {label} found for \"{text}\""))
}

async fn plan(
    service: LocationRoutingService,
    from: Option<String>,
    to: &str,
    near: Option<Coordinate>,
    json: bool,
) -> anyhow::Result<()> {
    let planner = TripPlanner::new(Arc::new(service));
    planner.set_device_location(near);

    let origin = match from {
        Some(text) => {
            ensure_searchable("Origin", &text)?;
            let origin =
                first_candidate("origin", &text, planner.search_origin(&text).await)?;
            planner.select_origin(origin.clone());
            origin
        },
        None => planner
            .use_current_location()
            .await?
            .context("No address found for the current position")?,
    };
    println!("📍 From: {}", origin.short_name());

    ensure_searchable("Destination", to)?;
    let destination =
        first_candidate("destination", to, planner.search_destination(to).await)?;
    planner.select_destination(destination.clone());
    println!("🏁 To:   {}", destination.short_name());

    let route = planner.plan_route().await?;
    print_route(&route, false, json)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over -v
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter_from_verbosity(cli.verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app_config = AppConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;
    info!(
        geocoder = %app_config.routing.geocoder_base_url,
        router = %app_config.routing.router_base_url,
        "Configuration loaded"
    );

    let service = LocationRoutingService::new(&app_config.routing)?;

    match cli.command {
        Commands::Search { query, near } => {
            let places = service.search_places(&query, near).await?;

            if cli.json {
                println!("{}", serde_json::to_string_pretty(&places)?);
            } else if places.is_empty() {
                println!("🔍 No places found for \"{query}\"");
            } else {
                println!("🔍 {} result(s):", places.len());
                println!("{}", format_candidates(&places));
            }
        },

        Commands::Reverse { position } => {
            let outcome = service.reverse_geocode_outcome(position).await;
            let ok = report_reverse(
                outcome,
                position,
                cli.json,
                &mut std::io::stdout(),
                &mut std::io::stderr(),
            )?;
            if !ok {
                std::process::exit(1);
            }
        },

        Commands::Route { from, to, geometry } => {
            let route = service.fetch_route(Some(from), Some(to)).await?;
            print_route(&route, geometry, cli.json)?;
        },

        Commands::Plan { from, to, near } => {
            plan(service, from, &to, near, cli.json).await?;
        },
    }

    Ok(())
}
