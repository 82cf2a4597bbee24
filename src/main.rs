// src/main.rs
mod dse;
mod extractors;
mod utils;

use clap::Parser;
use dse::client;
use dse::models::{CompanyPage, DEFAULT_BASE_URL};
use extractors::page::{extract_page, Dispatch, PageOptions, DEFAULT_TABLE_CLASS};
use std::path::PathBuf;
use utils::AppError;

/// Command Line Interface for the DSE company profile extractor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Trading code of the company (e.g. RENATA)
    #[arg(short, long, required_unless_present = "input")]
    symbol: Option<String>,

    /// Company profile endpoint; the symbol is sent as the `name` query parameter
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Read a saved company page instead of downloading it
    #[arg(short, long, conflicts_with = "symbol")]
    input: Option<PathBuf>,

    /// How tables are matched to extractors
    #[arg(short, long, value_enum, default_value_t = Dispatch::Signature)]
    dispatch: Dispatch,

    /// Classes a table must carry to be extracted
    #[arg(long, default_value = DEFAULT_TABLE_CLASS)]
    table_class: String,

    /// Print compact JSON instead of pretty-printed
    #[arg(long)]
    compact: bool,
}

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // 1. Setup Logging (reads RUST_LOG env var)
    utils::logging::setup_logging();

    // 2. Parse CLI Arguments
    let args = Args::parse();
    tracing::info!("Starting processing for args: {:?}", args);

    // 3. Load the page HTML
    let (html, source) = match (&args.input, &args.symbol) {
        (Some(path), _) => {
            tracing::info!("Reading company page from file: {}", path.display());
            (std::fs::read_to_string(path)?, path.display().to_string())
        }
        (None, Some(symbol)) => {
            let page = CompanyPage::new(symbol, &args.base_url);
            let url = page.url()?;
            (client::download_company_page(&url).await?, url)
        }
        (None, None) => {
            return Err(AppError::Config("either --symbol or --input is required".to_string()));
        }
    };
    tracing::info!("Loaded {} bytes of HTML from {}", html.len(), source);

    // 4. Extract every company table
    let options = PageOptions {
        table_class: args.table_class.clone(),
        dispatch: args.dispatch,
    };
    let report = extract_page(&html, &source, &options)?;

    let extracted = report.tables.iter().filter(|t| t.extractor.is_some()).count();
    let failed = report.tables.iter().filter(|t| t.error.is_some()).count();
    tracing::info!(
        "Processing finished. Tables: {}, Extracted: {}, Failures: {}",
        report.tables.len(),
        extracted,
        failed
    );

    // 5. Emit the report
    let json = if args.compact {
        serde_json::to_string(&report)?
    } else {
        serde_json::to_string_pretty(&report)?
    };
    println!("{}", json);

    if report.tables.is_empty() {
        return Err(AppError::Config(format!(
            "No tables with class '{}' found in {}",
            args.table_class, source
        )));
    }

    Ok(())
}
