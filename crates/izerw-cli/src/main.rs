mod browse;
mod shell;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use izerw_catalog::{CommerceClient, FixtureCommerce, ShopifyCommerce, ViewMode};
use izerw_core::{AppConfig, CategoryFilter};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "izerw")]
#[command(about = "Browse the izerw marine hardware catalog")]
struct Cli {
    /// Serve products from a JSON file instead of the live storefront
    #[arg(long, global = true)]
    fixture: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print one page of the catalog
    Browse {
        /// Category name or slug, or "all"
        #[arg(long, default_value = "all")]
        category: CategoryFilter,
        #[arg(long, default_value_t = 1)]
        page: u32,
        /// Products per page (defaults to IZERW_PAGE_SIZE)
        #[arg(long)]
        page_size: Option<u32>,
        #[arg(long, default_value_t = ViewMode::Grid)]
        view: ViewMode,
    },
    /// Search titles, SKUs, manufacturers, and descriptions
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        #[arg(long, default_value_t = ViewMode::Grid)]
        view: ViewMode,
    },
    /// List the catalog categories
    Categories,
    /// Show the connection status and catalog size
    Status,
    /// Interactive catalog browser
    Shell {
        #[arg(long)]
        page_size: Option<u32>,
        #[arg(long, default_value_t = ViewMode::Grid)]
        view: ViewMode,
    },
}

impl Cli {
    /// CLI flags that shadow their `IZERW_*` environment variables.
    fn config_overrides(&self) -> Vec<(&'static str, String)> {
        let mut overrides = Vec::new();
        if let Some(path) = &self.fixture {
            overrides.push(("IZERW_FIXTURE_PATH", path.display().to_string()));
        }
        if let Some(
            Commands::Browse {
                page_size: Some(size),
                ..
            }
            | Commands::Shell {
                page_size: Some(size),
                ..
            },
        ) = &self.command
        {
            overrides.push(("IZERW_PAGE_SIZE", size.to_string()));
        }
        overrides
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let overrides = cli.config_overrides();

    match cli.command {
        // Static list: needs neither configuration nor a catalog.
        Some(Commands::Categories) => {
            browse::run_categories();
            Ok(())
        }
        Some(Commands::Browse {
            category,
            page,
            view,
            ..
        }) => {
            let (config, client) = connect(&overrides)?;
            browse::run_browse(client, config.page_size, category, page, view).await
        }
        Some(Commands::Search { query, view }) => {
            let (config, client) = connect(&overrides)?;
            browse::run_search(client, config.page_size, &query.join(" "), view).await
        }
        Some(Commands::Status) => {
            let (config, client) = connect(&overrides)?;
            browse::run_status(client, &config).await
        }
        Some(Commands::Shell { view, .. }) => {
            let (config, client) = connect(&overrides)?;
            shell::run_shell(client, config.page_size, view).await
        }
        None => {
            let (config, client) = connect(&overrides)?;
            shell::run_shell(client, config.page_size, ViewMode::Grid).await
        }
    }
}

/// Loads configuration, installs the tracing subscriber, and builds the
/// catalog client.
fn connect(
    overrides: &[(&str, String)],
) -> anyhow::Result<(AppConfig, Box<dyn CommerceClient>)> {
    let config = izerw_core::load_app_config_with_overrides(overrides)?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let client = build_client(&config)?;
    Ok((config, client))
}

/// The fixture file when one is configured, otherwise the live storefront.
fn build_client(config: &AppConfig) -> anyhow::Result<Box<dyn CommerceClient>> {
    if let Some(path) = &config.fixture_path {
        tracing::info!(path = %path.display(), "using offline fixture catalog");
        return Ok(Box::new(FixtureCommerce::load(path)?));
    }
    let commerce = ShopifyCommerce::from_config(config)?;
    tracing::info!(shop_url = commerce.shop_url(), "using live storefront");
    Ok(Box::new(commerce))
}
