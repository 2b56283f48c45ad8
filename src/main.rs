use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use travel_guide::config::{Config, DEFAULT_CONFIG_PATH};
use travel_guide::domain::Domain;
use travel_guide::resolver::{CountryResolver, Locator};
use travel_guide::server::{start_server, AppState};
use travel_guide::services::Catalog;
use travel_guide::storage::{InMemoryStorage, SeedData, Storage};
use travel_guide::{logging, metrics};

#[derive(Parser)]
#[command(name = "travel_guide")]
#[command(about = "Travel information API with slug-tolerant country lookups")]
#[command(version)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Port to listen on (overrides config and PORT)
        #[arg(short, long)]
        port: Option<u16>,
        /// Seed file to load (overrides config and TRAVEL_SEED_FILE)
        #[arg(long)]
        seed: Option<PathBuf>,
    },
    /// Resolve a country locator against one collection and print the outcome
    Resolve {
        #[arg(long, value_enum)]
        domain: Domain,
        locator: String,
    },
    /// Load a seed file and print per-collection counts
    CheckSeed { file: PathBuf },
}

fn open_storage(config: &Config) -> anyhow::Result<Arc<dyn Storage>> {
    Ok(Arc::new(InMemoryStorage::open(&config.storage)?))
}

fn build_resolver(config: &Config) -> Arc<CountryResolver> {
    let aliases = config.resolver.alternate_names();
    info!("Alternate-name table has {} entries", aliases.len());
    Arc::new(CountryResolver::new(Arc::new(aliases)))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    dotenv::dotenv().ok();
    let mut config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Serve { port, seed } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(seed) = seed {
                config.storage.seed_file = Some(seed);
            }

            let _guard = logging::init_logging(&config.logging.directory)?;
            metrics::init_metrics();
            info!("Starting travel_guide on {}", config.bind_address());

            let state = AppState::new(open_storage(&config)?, build_resolver(&config));
            start_server(state, &config).await?;
        }
        Commands::Resolve { domain, locator } => {
            logging::init_cli_logging();
            let catalog = Catalog::new(open_storage(&config)?, build_resolver(&config));
            let outcome = catalog.resolve_json(domain, &Locator::parse(&locator)?).await?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Commands::CheckSeed { file } => {
            logging::init_cli_logging();
            let seed = SeedData::load(&file)?;
            println!("{}", serde_json::to_string_pretty(&seed.summary())?);
        }
    }

    Ok(())
}
