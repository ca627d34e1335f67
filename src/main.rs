//! aws-offers - Query the AWS price list catalog from the command line

use anyhow::Result;
use aws_offers::catalog::{services, Region};
use aws_offers::commands::{DetailsCommand, PriceQuery, PricesCommand};
use aws_offers::config::{Config, OutputFormat};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::{Level, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "aws-offers",
    version,
    about = "Query the AWS price list catalog",
    long_about = "Fetches the AWS price list index and per-service offer files, and filters products by region and attributes."
)]
struct Cli {
    /// Region to price (code or display name)
    #[arg(short, long, global = true)]
    region: Option<Region>,

    /// Price list endpoint
    #[arg(long, global = true)]
    root_url: Option<String>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true)]
    format: Option<OutputFormat>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "AWS_OFFERS_PROXY")]
    proxy: Option<String>,

    /// Always download, never read or write the response cache
    #[arg(long, global = true)]
    no_cache: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show catalog index metadata
    #[command(alias = "d")]
    Details,

    /// List prices for a service in the selected region
    #[command(alias = "p")]
    Prices {
        /// Service key (ec2, ses, ddb, s3)
        service: String,

        /// Pricing term (OnDemand or Reserved)
        #[arg(short, long)]
        term: Option<String>,

        /// Look up a single SKU, ignoring region and attributes
        #[arg(long)]
        sku: Option<String>,

        /// Attribute constraint, repeatable (e.g. --attr volumeType=Standard)
        #[arg(short, long = "attr", value_parser = parse_attribute)]
        attrs: Vec<(String, String)>,
    },

    /// List supported regions
    Regions,

    /// List supported services
    Services,
}

fn parse_attribute(s: &str) -> Result<(String, String), String> {
    let (key, value) = s.split_once('=').ok_or_else(|| format!("Expected key=value, got: {}", s))?;

    let key = key.trim();
    if key.is_empty() {
        return Err(format!("Attribute key is empty in: {}", s));
    }

    Ok((key.to_string(), value.trim().to_string()))
}

/// Builds the log subscriber: DEBUG when verbose, otherwise `RUST_LOG` plus INFO.
fn log_subscriber<W>(verbose: bool, writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    let filter = if verbose {
        EnvFilter::new(Level::DEBUG.to_string())
    } else {
        EnvFilter::from_default_env().add_directive(Level::INFO.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(writer)
        .finish()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the formatted output
    log_subscriber(cli.verbose, std::io::stderr).init();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env();

    // Apply CLI overrides
    if let Some(region) = cli.region {
        config.region = region;
    }
    if let Some(root_url) = cli.root_url {
        config.root_url = root_url;
    }
    if let Some(format) = cli.format {
        config.format = format;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    if cli.no_cache {
        config.cache = false;
    }

    match cli.command {
        Commands::Details => {
            let cmd = DetailsCommand::new(config);
            let output = cmd.execute().await?;
            println!("{}", output);
        }

        Commands::Prices { service, term, sku, attrs } => {
            let query = PriceQuery { service, term, sku, attributes: attrs.into_iter().collect() };

            let cmd = PricesCommand::new(config);
            let output = cmd.execute(&query).await?;
            println!("{}", output);
        }

        Commands::Regions => {
            println!("Supported regions:\n");
            println!("{:<16} {:<28}", "Code", "Location");
            println!("{:-<16} {:-<28}", "", "");

            for region in Region::all() {
                println!("{:<16} {:<28}", region.code(), region.display_name());
            }
        }

        Commands::Services => {
            println!("Supported services:\n");
            println!("{:<6} {:<16} {}", "Key", "Offer code", "Product families");
            println!("{:-<6} {:-<16} {:-<40}", "", "", "");

            for service in services::all() {
                let families: Vec<String> = service
                    .families()
                    .into_iter()
                    .map(|(family, attribute)| format!("{} ({})", family, attribute))
                    .collect();

                println!("{:<6} {:<16} {}", service.key, service.offer_code, families.join(", "));
            }
        }
    }

    Ok(())
}
