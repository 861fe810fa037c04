//! amz-catalog - Command-line client for the Amazon Product Advertising catalog API.

use amz_catalog::amazon::{Locale, SearchRequest};
use amz_catalog::commands::{BrowseCommand, LookupCommand, SearchCommand};
use amz_catalog::config::{Config, OutputFormat};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "amz-catalog",
    version,
    about = "Query the Amazon Product Advertising catalog API",
    long_about = "Signs and sends ItemLookup, ItemSearch, and BrowseNodeLookup requests and prints typed results."
)]
struct Cli {
    /// API locale
    #[arg(short, long, global = true, env = "AMZ_LOCALE")]
    locale: Option<Locale>,

    /// Proxy URL (e.g., socks5://host:port)
    #[arg(long, global = true, env = "AMZ_PROXY")]
    proxy: Option<String>,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Log each signed request URL
    #[arg(short = 'u', long, global = true)]
    print_url: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up items by ASIN
    #[command(alias = "l")]
    Lookup {
        /// ASIN(s) to look up
        #[arg(required = true)]
        asins: Vec<String>,
    },

    /// Search the catalog
    #[command(alias = "s")]
    Search {
        /// Search keywords
        keywords: Option<String>,

        /// Match on title
        #[arg(long)]
        title: Option<String>,

        /// Restrict to a browse node
        #[arg(long)]
        browse_node: Option<u64>,

        /// Search index (e.g. All, Books, DVD, MP3Downloads)
        #[arg(short, long, default_value = "All")]
        index: String,

        /// Result page
        #[arg(short, long)]
        page: Option<u32>,

        /// Response group
        #[arg(long, default_value = "Medium")]
        response_group: String,
    },

    /// Look up a browse node with its ancestors and children
    #[command(alias = "b")]
    Browse {
        /// Browse node id (e.g. 17 for Literature & Fiction)
        node_id: u64,
    },

    /// List supported locales
    Locales,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config with layered overrides
    let mut config = Config::load(cli.config.as_deref())?.with_env()?;

    // Apply CLI overrides
    if let Some(locale) = cli.locale {
        config.locale = locale;
    }
    if let Some(proxy) = cli.proxy {
        config.proxy = Some(proxy);
    }
    config.format = cli.format;
    config.print_url |= cli.print_url;

    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose, config.print_url)?)
        .with_target(false)
        .init();

    match cli.command {
        Commands::Lookup { asins } => {
            let cmd = LookupCommand::new(config);

            let output = if asins.len() == 1 {
                cmd.execute(&asins[0]).await?
            } else {
                cmd.execute_batch(&asins).await?
            };

            println!("{}", output);
        }

        Commands::Search { keywords, title, browse_node, index, page, response_group } => {
            let mut request = SearchRequest {
                keywords,
                title,
                ..SearchRequest::default()
            }
            .search_index(index)
            .response_group(response_group);

            if let Some(node) = browse_node {
                request = request.browse_node(node);
            }
            if let Some(page) = page {
                request = request.page(page);
            }

            let cmd = SearchCommand::new(config);
            let output = cmd.execute(&request).await?;
            println!("{}", output);
        }

        Commands::Browse { node_id } => {
            let cmd = BrowseCommand::new(config);
            let output = cmd.execute(node_id).await?;
            println!("{}", output);
        }

        Commands::Locales => {
            println!("Supported locales:\n");
            println!("{:<6} {:<24}", "Code", "Host");
            println!("{:-<6} {:-<24}", "", "");

            for locale in Locale::all() {
                println!("{:<6} {:<24}", locale.to_string(), locale.host());
            }
        }
    }

    Ok(())
}

/// Picks the log filter; signed URLs are logged at info level by the api module.
fn log_filter(verbose: bool, print_url: bool) -> Result<EnvFilter> {
    if verbose {
        return Ok(EnvFilter::new(Level::DEBUG.to_string()));
    }

    let filter = EnvFilter::from_default_env().add_directive(Level::WARN.into());
    if print_url {
        Ok(filter.add_directive("amz_catalog::amazon::api=info".parse()?))
    } else {
        Ok(filter)
    }
}
