//! QKart CLI - a command-line storefront.
//!
//! # Usage
//!
//! ```bash
//! # List the catalog
//! qkart products
//!
//! # Search by name or category
//! qkart search basketball
//!
//! # Live search: each line typed on stdin is a new input value
//! qkart browse
//!
//! # Accounts
//! qkart register -u crio.do -p learnbydoing -c learnbydoing
//! qkart login -u crio.do -p learnbydoing
//!
//! # Cart (requires login)
//! qkart add KCRwjF7lN97HnEaY --qty 2
//! qkart set KCRwjF7lN97HnEaY 5
//! qkart remove KCRwjF7lN97HnEaY
//! qkart cart
//! ```
//!
//! Configuration comes from `QKART_*` environment variables (see
//! `qkart_storefront::config`). Logs go to stderr; `RUST_LOG` overrides the
//! default filter.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use qkart_storefront::{LogFormat, StorefrontConfig};
use tracing_subscriber::EnvFilter;

mod commands;
mod output;

use commands::CliError;

const DEFAULT_LOG_FILTER: &str = "qkart=info,qkart_storefront=info";

#[derive(Parser)]
#[command(name = "qkart")]
#[command(author, version, about = "QKart storefront on the command line")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all products
    Products,
    /// Search products by name or category
    Search {
        /// Search text
        text: String,
    },
    /// Live search: read input lines from stdin and search once typing pauses
    Browse,
    /// Show the cart
    Cart,
    /// Add a product to the cart
    Add {
        /// Product ID
        product_id: String,

        /// Quantity to add
        #[arg(short, long, default_value_t = 1)]
        qty: u32,
    },
    /// Set the quantity of a product in the cart
    Set {
        /// Product ID
        product_id: String,

        /// New quantity (0 removes the product)
        qty: u32,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        product_id: String,
    },
    /// Log in and save the session
    Login {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,
    },
    /// Create an account
    Register {
        #[arg(short, long)]
        username: String,

        #[arg(short, long)]
        password: String,

        /// Password again
        #[arg(short, long)]
        confirm_password: String,
    },
    /// Forget the saved session
    Logout,
    /// Show the logged-in user
    Whoami,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match StorefrontConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing(LogFormat::Text);
            tracing::error!("Invalid configuration: {e}");
            std::process::exit(1);
        }
    };
    init_tracing(config.log_format);

    if let Err(e) = run(cli, config).await {
        if let CliError::Shop(shop_error) = &e {
            output::notices(&shop_error.notices());
        }
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Install the global subscriber. Output goes to stderr so stdout only
/// carries command results.
fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    match format {
        LogFormat::Text => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}

async fn run(cli: Cli, config: StorefrontConfig) -> Result<(), CliError> {
    let mut ctx = commands::Context::new(&config)?;

    match cli.command {
        Commands::Products => commands::catalog::products(&mut ctx).await?,
        Commands::Search { text } => commands::catalog::search(&ctx, &text).await?,
        Commands::Browse => commands::catalog::browse(&ctx, config.search_debounce).await?,
        Commands::Cart => commands::cart::show(&mut ctx).await?,
        Commands::Add { product_id, qty } => {
            commands::cart::add(&mut ctx, &product_id.into(), qty).await?;
        }
        Commands::Set { product_id, qty } => {
            commands::cart::set(&mut ctx, &product_id.into(), qty).await?;
        }
        Commands::Remove { product_id } => {
            commands::cart::set(&mut ctx, &product_id.into(), 0).await?;
        }
        Commands::Login { username, password } => {
            commands::account::login(&mut ctx, username, password).await?;
        }
        Commands::Register {
            username,
            password,
            confirm_password,
        } => {
            commands::account::register(&ctx, username, password, confirm_password).await?;
        }
        Commands::Logout => commands::account::logout(&mut ctx)?,
        Commands::Whoami => commands::account::whoami(&ctx),
    }
    Ok(())
}
