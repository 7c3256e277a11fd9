use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use route_viz::{
    sdk::config::ServiceConfig,
    sdk::controller::RouteController,
    sdk::map::{LatLon, SceneMap},
    sdk::panel::HtmlPanel,
    sdk::places::{Endpoint, PlaceBook},
    sdk::routing::{FixtureRouteService, HttpRouteService, RoutingError},
    sdk::util::log::init_logging,
};
use std::{fs, path::PathBuf};

/// Request route alternatives between two places and render them as a map scene
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Origin place name
    #[arg(long, default_value = "Rond-point Victoire")]
    from: String,

    /// Origin as "lat,lon"; takes precedence over --from
    #[arg(long, allow_hyphen_values = true)]
    from_coords: Option<LatLon>,

    /// Destination place name
    #[arg(long, default_value = "Gare Centrale")]
    to: String,

    /// Destination as "lat,lon"; takes precedence over --to
    #[arg(long, allow_hyphen_values = true)]
    to_coords: Option<LatLon>,

    /// Number of route alternatives to request (1-8)
    #[arg(short, long, default_value_t = 3, value_parser = clap::value_parser!(u32).range(1..=8))]
    alternatives: u32,

    /// Swap origin and destination before computing
    #[arg(long)]
    swap: bool,

    /// Zoom to this route after rendering (numbered from 1, as in the summary)
    #[arg(long)]
    select: Option<usize>,

    /// CSV file with name,lat,lon columns replacing the built-in places
    #[arg(long)]
    places: Option<PathBuf>,

    /// Replay a recorded service response instead of calling the service
    #[arg(long)]
    fixture: Option<PathBuf>,

    /// Where to write the rendered scene
    #[arg(long, default_value = "routes.geojson")]
    geojson: PathBuf,

    /// Where to write the summary panel (stdout when omitted)
    #[arg(long)]
    html: Option<PathBuf>,

    /// List the known places and exit
    #[arg(long)]
    list: bool,

    /// Check that the route service is up and exit
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    dotenvy::dotenv().ok();

    // --- 1. Argument Parsing with Clap ---
    let cli = Cli::parse();

    // --- 2. Dependency Initialization ---
    let places = match &cli.places {
        Some(path) => PlaceBook::from_csv(path)
            .map_err(|e| anyhow!("Failed to load places from {}: {}", path.display(), e))?,
        None => PlaceBook::builtin(),
    };

    if cli.list {
        for place in places.iter() {
            println!("{}\t{}", place.name, place.location);
        }
        return Ok(());
    }

    let config = ServiceConfig::from_env()?;
    log::info!("Route service at {}", config.base_url);

    if cli.check {
        let service = HttpRouteService::new(&config)?;
        let health = service
            .health()
            .await
            .with_context(|| format!("Route service at {} is not reachable", config.base_url))?;
        println!(
            "{} ({})",
            health.status,
            health.service.as_deref().unwrap_or("unknown service")
        );
        return Ok(());
    }

    // --- 3. Compute and Render ---
    let mut controller = RouteController::new(SceneMap::default(), HtmlPanel::new(), places);
    controller.set_origin(match cli.from_coords {
        Some(point) => Endpoint::Coordinates(point),
        None => Endpoint::Named(cli.from.clone()),
    });
    controller.set_destination(match cli.to_coords {
        Some(point) => Endpoint::Coordinates(point),
        None => Endpoint::Named(cli.to.clone()),
    });
    if cli.swap {
        controller.swap_endpoints();
    }

    let result = match &cli.fixture {
        Some(path) => {
            let service = FixtureRouteService::from_file(path)
                .with_context(|| format!("Failed to read fixture {}", path.display()))?;
            controller.compute_selected(&service, cli.alternatives).await
        }
        None => {
            let service = HttpRouteService::new(&config)?;
            controller.compute_selected(&service, cli.alternatives).await
        }
    };

    match result {
        Ok(count) => log::info!("{} route(s) rendered", count),
        Err(RoutingError::MissingCoordinates(name)) => {
            bail!("No coordinates known for \"{}\" (see --list)", name)
        }
        // Already shown in the panel
        Err(e) => log::error!("{}", e),
    }

    if let Some(number) = cli.select {
        if number == 0 || !controller.select_route(number - 1) {
            log::warn!("No route number {} to select", number);
        }
    }

    // --- 4. Output Results ---
    controller
        .map()
        .export_geojson(&cli.geojson)
        .with_context(|| format!("Failed to write {}", cli.geojson.display()))?;
    log::info!("Scene written to {}", cli.geojson.display());

    let html = controller.panel().html();
    match &cli.html {
        Some(path) => {
            fs::write(path, html).with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Summary written to {}", path.display());
        }
        None => println!("{}", html),
    }

    Ok(())
}
