use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use game_prices::scrapers::{ExtractionMode, InstantGamingScraper, ScrapeParams, ScraperTrait};
use game_prices::storage::{display_price, DEFAULT_TABLE_PATH};
use game_prices::{DataSearcher, TableStore};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[clap(name = "game-prices")]
#[clap(about = "Scrape Instant Gaming prices and search them", long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape result pages and save them to the table
    Scrape {
        /// Number of result pages to fetch
        #[clap(short, long, value_parser)]
        pages: u32,

        /// Table file to write
        #[clap(short, long, value_parser, default_value = DEFAULT_TABLE_PATH)]
        output: PathBuf,

        /// Use independent title/link/price passes instead of listing cards
        #[clap(long)]
        legacy: bool,
    },

    /// Search the saved table by title
    Search {
        /// Text to look for in game titles
        #[clap(value_parser)]
        query: String,

        /// Table file to read
        #[clap(short, long, value_parser, default_value = DEFAULT_TABLE_PATH)]
        input: PathBuf,

        #[clap(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Scrape { pages, output, legacy } => {
            let params = ScrapeParams {
                mode: if legacy {
                    ExtractionMode::Legacy
                } else {
                    ExtractionMode::Container
                },
                ..ScrapeParams::default()
            };

            info!("🎮 Game Prices - Instant Gaming Scraper");
            info!("=======================================");

            let scraper = InstantGamingScraper::with_params(params)?;
            let listings = scraper
                .scrape(pages)
                .await
                .context("Scrape aborted")?;

            let store = TableStore::new(output);
            store
                .save(&listings)
                .with_context(|| format!("Failed to write {}", store.path().display()))?;
            println!("Données sauvegardées dans \"{}\"", store.path().display());
        }
        Commands::Search { query, input, format } => {
            let searcher = DataSearcher::new(TableStore::new(input));
            let matches = searcher.search(&query)?;

            match format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&matches)?);
                }
                OutputFormat::Text if matches.is_empty() => {
                    println!("Aucun jeu correspondant trouvé.");
                }
                OutputFormat::Text => {
                    println!("Voici les {} jeux correspondants :", matches.len());
                    for listing in &matches {
                        println!("Titre : {}", listing.title);
                        println!("Prix : {}", display_price(listing.price));
                        println!("Prix final : {}", display_price(listing.final_price));
                        println!("Lien : {}", listing.link);
                        println!();
                    }
                }
            }
        }
    }

    Ok(())
}
