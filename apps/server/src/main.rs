use anyhow::Context;
use clap::{Parser, Subcommand};
use hotel_config::load as load_config;
use hotel_gateway::{create_router, GatewayState};
use hotel_runtime::{telemetry, BackendServices};
use rand::{rngs::StdRng, SeedableRng};
use tokio::net::TcpListener;
use tracing::info;

mod data;
mod seed;

#[derive(Parser)]
#[command(name = "hotel-backend")]
#[command(about = "Hotel operations backend (serves HTTP by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve,
    /// Print every table of the database
    DumpData,
    /// Delete all rows from every table
    ClearData,
    /// Seed the database with demo hotels, staff, stock and bookings
    SeedData {
        /// Seed for the random generator, for repeatable data sets
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    telemetry::init_tracing().context("failed to initialise tracing")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server().await,
        Commands::DumpData => dump_data().await,
        Commands::ClearData => clear_data().await,
        Commands::SeedData { seed } => seed_data(seed).await,
    }
}

async fn initialise() -> anyhow::Result<(hotel_config::AppConfig, BackendServices)> {
    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    Ok((config, services))
}

async fn run_server() -> anyhow::Result<()> {
    info!("starting hotel backend");

    let (config, services) = initialise().await?;

    let state = GatewayState::new(services.db_pool.clone(), services.services.clone());
    let app = create_router(state);

    let address = format!("{}:{}", config.http.address, config.http.port);
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(hotel_runtime::shutdown_signal())
        .await
        .context("http server error")?;

    info!("backend shut down");
    Ok(())
}

async fn dump_data() -> anyhow::Result<()> {
    let (_, services) = initialise().await?;
    data::dump(&services.db_pool).await
}

async fn clear_data() -> anyhow::Result<()> {
    info!("clearing all data from database");

    let (_, services) = initialise().await?;
    let cleared = data::clear(&services.db_pool).await?;

    println!("Database cleared:");
    for (table, rows) in cleared {
        println!("- {rows} rows deleted from {table}");
    }
    Ok(())
}

async fn seed_data(seed: Option<u64>) -> anyhow::Result<()> {
    info!("seeding database with demo data");

    let (_, services) = initialise().await?;
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let report = seed::seed(&services.services, &mut rng).await?;

    println!("Database seeded with demo data:");
    println!("- {} hotels", report.hotels);
    println!("- {} rooms", report.rooms);
    println!("- {} employees", report.employees);
    println!("- {} inventory items", report.items);
    println!("- {} bookings", report.bookings);
    println!("Run 'dump-data' to see the inserted data");

    Ok(())
}
