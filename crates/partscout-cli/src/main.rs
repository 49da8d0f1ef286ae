use std::process;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use partscout::WebScraper;
use partscout::render::{render_csv, render_html};
use partscout::types::Vehicle;
use partscout::utils::ListingStats;

#[derive(Parser)]
#[command(name = "partscout")]
#[command(about = "Search sold OEM parts listings on eBay for a vehicle", long_about = None)]
struct Cli {
    #[arg(
        short = 'l',
        long = "log-level",
        value_enum,
        default_value = "info",
        help = "Set the logging level"
    )]
    log_level: LogLevel,

    #[arg(long, help = "Model year, e.g. 2015")]
    year: String,

    #[arg(long, help = "Vehicle make, e.g. Honda")]
    make: String,

    #[arg(long, help = "Vehicle model, e.g. Civic")]
    model: String,

    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value = "text",
        help = "Output format"
    )]
    format: OutputFormat,

    #[arg(
        long,
        default_value_t = 1,
        value_parser = clap::value_parser!(u16).range(1..=8),
        help = "Number of searches to run at once"
    )]
    concurrency: u16,
}

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Csv,
    Html,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level.clone().into())
        .init();

    let vehicle = Vehicle::from_parts(
        Some(cli.year.as_str()),
        Some(cli.make.as_str()),
        Some(cli.model.as_str()),
    )
    .unwrap_or_else(|e| {
        log::error!("Invalid args: {e}");
        process::exit(1);
    });

    let scraper = WebScraper::new()?.with_concurrency(cli.concurrency.into());

    let listings = scraper.search_parts(&vehicle).await.unwrap_or_else(|e| {
        log::error!("Error searching parts for {}: {}", vehicle, e);
        process::exit(1);
    });

    match cli.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&listings)?),
        OutputFormat::Csv => println!("{}", render_csv(&listings)),
        OutputFormat::Html => println!("{}", render_html(&vehicle, &listings)),
        OutputFormat::Text => {
            if listings.is_empty() {
                println!("No listings found for {}.", vehicle);
            } else {
                for (i, listing) in listings.iter().enumerate() {
                    println!("{:>3}. {}", i + 1, listing);
                }
                print!("{}", ListingStats::from_listings(&listings));
            }
        }
    }

    Ok(())
}
