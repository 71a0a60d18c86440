use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use mesh_product_catalog::config::loader::load_config;
use mesh_product_catalog::product::{HttpProductFetcher, ProductCatalog, ProductFetcher};
use mesh_product_catalog::AuthContext;

#[derive(Parser)]
#[command(name = "catalog-cli")]
#[command(about = "Inspect the API product catalog and test product resolution", long_about = None)]
struct Cli {
    /// Management API base URL (products are read from {url}/products).
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Read the base URL and timeout from a config file instead.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fetch timeout in seconds.
    #[arg(short, long, default_value_t = 30)]
    timeout: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch and print the product catalog
    Products,
    /// Show which products authorize a call
    Resolve {
        /// API product granted to the caller (repeatable, in grant order)
        #[arg(short, long = "product", required = true)]
        products: Vec<String>,

        /// Target mesh service
        #[arg(short = 's', long)]
        target: String,

        /// Request path
        #[arg(long)]
        path: String,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let fetcher = match &cli.config {
        Some(path) => {
            let config = load_config(path)?;
            HttpProductFetcher::from_base(&config.catalog.base_url, config.catalog.fetch_timeout())?
        }
        None => HttpProductFetcher::from_base(&cli.url, Duration::from_secs(cli.timeout))?,
    };

    let products = fetcher.fetch().await?;

    match cli.command {
        Commands::Products => {
            println!("{}", serde_json::to_string_pretty(&products)?);
        }
        Commands::Resolve { products: granted, target, path } => {
            let catalog = ProductCatalog::new();
            catalog.publish(products);

            let ctx = AuthContext::with_products(granted);
            let resolved = catalog.resolve(&ctx, &target, &path);
            let names: Vec<&str> = resolved.iter().map(|p| p.name.as_str()).collect();

            if names.is_empty() {
                eprintln!("No API product authorizes {} {}", target, path);
            }
            println!("{}", serde_json::to_string_pretty(&names)?);
        }
    }

    Ok(())
}
