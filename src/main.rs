// Entrypoint for the CLI application.
// - Keeps `main` small: set up logging, load config, build the client and
//   hand it to the selected command (or the interactive menu).
// - Returns `anyhow::Result` so local setup errors exit non-zero; remote
//   failures are printed by the UI layer and never end the process.

use anyhow::Context;
use clap::{Parser, Subcommand};
use tour_images_cli::images::{FilterPair, Filters};
use tour_images_cli::seed::DEFAULT_COUNT;
use tour_images_cli::{ui, ApiClient, Config, TourImages};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "tour-images", version, about = "Read and seed the tour_images table")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the fetch demonstration (list, search, get by id)
    Fetch,
    /// List images
    List {
        #[arg(long, default_value_t = 100)]
        limit: u32,
    },
    /// Fetch one image by id
    Get { id: String },
    /// Search with KEY=VALUE filters, e.g. `country=Japan total_usage[gt]=10`
    Search {
        #[arg(required = true)]
        filters: Vec<FilterPair>,
    },
    /// Find images by related program wholesaler and/or tour code
    Programs {
        #[arg(long)]
        wholesaler: Option<String>,
        #[arg(long)]
        code: Option<String>,
        #[arg(long, default_value_t = 1000)]
        limit: u32,
    },
    /// Generate sample records and create them
    Seed {
        #[arg(long, default_value_t = DEFAULT_COUNT)]
        count: usize,
        /// Print the generated records without sending them
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tour_images_cli=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::load().context("Failed to load configuration")?;
    tracing::debug!(?config, "configuration loaded");
    let images = TourImages::new(ApiClient::new(&config)?);

    match cli.command {
        None => ui::main_menu(&images, &config)?,
        Some(Command::Fetch) => {
            ui::print_banner(&images);
            ui::run_fetch_demo(&images)?;
        }
        Some(Command::List { limit }) => ui::report_list(&images.list_all(limit), usize::MAX)?,
        Some(Command::Get { id }) => ui::report_get(&images.get_by_id(&id), &id)?,
        Some(Command::Search { filters }) => {
            ui::run_search(&images, &filters.into_iter().collect::<Filters>())?
        }
        Some(Command::Programs { wholesaler, code, limit }) => {
            ui::run_programs(&images, wholesaler.as_deref(), code.as_deref(), limit)?
        }
        Some(Command::Seed { count, dry_run }) => {
            ui::run_seed(&images, count, config.seed_delay, dry_run)?
        }
    }
    Ok(())
}
