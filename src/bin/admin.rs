//! CLI administration tool for counter-shortener.
//!
//! Inspects and seeds the PostgreSQL store without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show the global counter
//! cargo run --bin admin -- counter show
//!
//! # Create the counter with a custom seed
//! cargo run --bin admin -- counter init --seed 100000
//!
//! # Apply migrations and write the sentinel mapping
//! cargo run --bin admin -- bootstrap
//!
//! # Shorten or resolve from the terminal
//! cargo run --bin admin -- shorten example.com/some/page
//! cargo run --bin admin -- resolve 67f
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` (or `DB_*` components), `COUNTER_SEED`,
//! `SENTINEL_CODE`, `SENTINEL_URL`, `PUBLIC_HOST` and the store timeouts.

use counter_shortener::AppError;
use counter_shortener::domain::entities::CounterRecord;
use counter_shortener::config::{self, Config, StoreBackend, mask_connection_string};
use counter_shortener::infrastructure::persistence::{PgCounterRepository, PgUrlMappingRepository};
use counter_shortener::server::connect_pool;
use counter_shortener::state::AppState;
use counter_shortener::utils::base62;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing counter-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Inspect or create the global counter
    Counter {
        #[command(subcommand)]
        action: CounterAction,
    },

    /// Apply migrations and seed an empty store
    Bootstrap {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Shorten a URL (prompts when omitted)
    Shorten { url: Option<String> },

    /// Show the URL a short code redirects to
    Resolve { code: String },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Counter subcommands.
#[derive(Subcommand)]
enum CounterAction {
    /// Show the current counter value
    Show,

    /// Create the counter if it does not exist
    Init {
        /// Initial value (defaults to `COUNTER_SEED`)
        #[arg(short, long)]
        seed: Option<u64>,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env().context("Failed to load configuration")?;
    if config.store_backend != StoreBackend::Postgres {
        anyhow::bail!("admin only operates on the postgres backend");
    }

    let pool = connect_pool(&config).await?;

    match cli.command {
        Commands::Counter { action } => handle_counter_action(action, &config, &pool).await?,
        Commands::Bootstrap { yes } => bootstrap(&config, &pool, yes).await?,
        Commands::Shorten { url } => shorten(&config, &pool, url).await?,
        Commands::Resolve { code } => resolve(&config, &pool, &code).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Wires the services over the PostgreSQL repositories.
fn app_state(config: &Config, pool: &PgPool, seed: u64) -> Result<AppState> {
    let pool = Arc::new(pool.clone());
    let policy = config.tx_policy();

    Ok(AppState::new(
        Arc::new(PgUrlMappingRepository::new(pool.clone(), policy.clone())),
        Arc::new(PgCounterRepository::new(pool, policy)),
        seed,
        config.sentinel()?,
        config.public_host.clone(),
    ))
}

/// Dispatches counter commands.
async fn handle_counter_action(action: CounterAction, config: &Config, pool: &PgPool) -> Result<()> {
    match action {
        CounterAction::Show => {
            let state = app_state(config, pool, config.counter_seed)?;
            println!("{}", "Global counter".bright_blue().bold());
            println!();

            let current = state
                .counter
                .current()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to read counter: {}", e))?;

            match current.map(CounterRecord::new) {
                Some(record) => {
                    println!("  Value:     {}", record.count.to_string().bright_green().bold());
                    match record.successor() {
                        Some(next) => println!("  Next code: {}", base62::encode(next).cyan()),
                        None => println!("  Next code: {}", "counter exhausted".red()),
                    }
                }
                None => println!("{}", "  Counter not initialized".yellow()),
            }
            println!();
        }
        CounterAction::Init { seed } => {
            let seed = seed.unwrap_or(config.counter_seed);
            let state = app_state(config, pool, seed)?;

            let before = state
                .counter
                .current()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to read counter: {}", e))?;

            if let Some(value) = before {
                println!(
                    "{} {}",
                    "Counter already exists with value".yellow(),
                    value.to_string().bright_white()
                );
                return Ok(());
            }

            state
                .counter
                .ensure_initialized()
                .await
                .map_err(|e| anyhow::anyhow!("Failed to create counter: {}", e))?;

            println!(
                "{} {}",
                "Counter created with seed".green().bold(),
                state.counter.seed().to_string().bright_white()
            );
        }
    }

    Ok(())
}

/// Applies migrations and writes the sentinel mapping and counter.
///
/// A store that already holds mappings is left untouched.
async fn bootstrap(config: &Config, pool: &PgPool, skip_confirm: bool) -> Result<()> {
    println!("{}", "Bootstrap store".bright_blue().bold());
    println!();
    let database_url = config.database_url.as_deref().unwrap_or_default();
    println!("  Database: {}", mask_connection_string(database_url).cyan());
    println!(
        "  Sentinel: {} -> {}",
        config.sentinel_code.cyan(),
        config.sentinel_url.cyan()
    );
    println!("  Seed:     {}", config.counter_seed.to_string().cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Apply migrations and seed the store?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .context("Failed to migrate")?;
    println!("{}", "Migrations applied".green());

    let state = app_state(config, pool, config.counter_seed)?;
    state
        .registry
        .ensure_initialized()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bootstrap: {}", e))?;

    let mappings = state
        .mappings
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count mappings: {}", e))?;

    println!("{}", "Store ready".green().bold());
    println!("  Mappings: {}", mappings.to_string().bright_white());
    println!();

    Ok(())
}

/// Shortens a URL through the registry, exactly as the HTTP endpoint does.
async fn shorten(config: &Config, pool: &PgPool, url: Option<String>) -> Result<()> {
    let url = match url {
        Some(u) => u,
        None => Input::new().with_prompt("URL to shorten").interact_text()?,
    };

    let state = app_state(config, pool, config.counter_seed)?;
    let code = state
        .registry
        .shorten_or_get(&url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten: {}", e))?;

    println!("  Code: {}", code.bright_yellow().bold());
    if let Some(host) = &config.public_host {
        println!("  Link: {}", state.registry.short_url(host, &code).cyan());
    }

    Ok(())
}

/// Prints the URL a code redirects to.
async fn resolve(config: &Config, pool: &PgPool, code: &str) -> Result<()> {
    let state = app_state(config, pool, config.counter_seed)?;

    match state.resolver.resolve(code).await {
        Ok(url) => println!("  {} -> {}", code.cyan(), url.bright_white()),
        Err(e @ AppError::NotFound { .. }) => {
            println!("{}", e.to_string().yellow());
        }
        Err(e) => anyhow::bail!("Failed to resolve: {}", e),
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let mappings: Option<i64> =
                sqlx::query_scalar(r#"SELECT COUNT(*) FROM "shortened-urls""#)
                    .fetch_one(pool)
                    .await
                    .ok();

            println!("  PostgreSQL: {}", version.bright_white());
            match mappings {
                Some(count) => println!("  Mappings:   {}", count.to_string().bright_green()),
                None => println!("  Mappings:   {}", "schema not migrated".yellow()),
            }
            println!();
        }
    }

    Ok(())
}
