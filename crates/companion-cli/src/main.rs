//! Companion CLI - Browse and manage companions
//!
//! Thin client over the Companion HTTP API.

mod api;
mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::{Confirm, Password};
use tracing_subscriber::EnvFilter;

use api::CompanionClient;
use companion::CompanionFilter;
use config::Config;

#[derive(Parser)]
#[command(name = "companion")]
#[command(about = "Companion CLI - Browse and manage AI companions", long_about = None)]
#[command(version)]
struct Cli {
    /// Log HTTP requests
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Login and store a session token
    Login {
        /// Session token (will prompt if not provided)
        #[arg(short, long)]
        token: Option<String>,
    },

    /// Show current configuration
    Config,

    /// Search companions
    List {
        /// Name to search for (case-insensitive)
        #[arg(short, long)]
        name: Option<String>,
        /// Category ID (defaults to the configured category)
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show a companion
    Show {
        /// Companion ID
        id: String,
    },

    /// Delete one of your companions
    Delete {
        /// Companion ID
        id: String,
        /// Skip confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// List categories
    Categories,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("companion_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Login { token } => cmd_login(token).await,
        Commands::Config => cmd_config(),
        Commands::List { name, category } => cmd_list(name, category).await,
        Commands::Show { id } => cmd_show(id).await,
        Commands::Delete { id, yes } => cmd_delete(id, yes).await,
        Commands::Categories => cmd_categories().await,
    }
}

fn load_config() -> Result<Config> {
    Ok(Config::load()?.with_env_overrides(|key| std::env::var(key).ok()))
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_login(token: Option<String>) -> Result<()> {
    let mut config = load_config()?;

    let token = match token {
        Some(t) => t,
        None => Password::new()
            .with_prompt("Session token")
            .interact()
            .context("Failed to read session token")?,
    };

    // Test connection
    let client = CompanionClient::new(&config.base_url, Some(&token));
    print!("Testing connection... ");

    match client.health().await {
        Ok(true) => {
            println!("{}", "OK".green());
        }
        _ => {
            println!("{}", "Failed".red());
            bail!("Could not reach Companion API at {}", config.base_url);
        }
    }

    config.set_token(token);
    config.save()?;

    println!(
        "{} Session token saved to {:?}",
        "✓".green(),
        Config::config_path()?
    );

    Ok(())
}

fn cmd_config() -> Result<()> {
    let config = load_config()?;

    println!("{}", "Configuration:".bold());
    println!("  Path: {:?}", Config::config_path()?);
    println!("  Base URL: {}", config.base_url);
    println!(
        "  Token: {}",
        if config.token.is_some() {
            "Set".green()
        } else {
            "Not set".red()
        }
    );
    println!(
        "  Default Category: {}",
        config.default_category.as_deref().unwrap_or("None").cyan()
    );

    Ok(())
}

async fn cmd_list(name: Option<String>, category: Option<String>) -> Result<()> {
    let config = load_config()?;
    let client = CompanionClient::new(&config.base_url, config.token.as_deref());

    let category = category.or_else(|| config.default_category.clone());
    let filter = CompanionFilter::from_query(name.as_deref(), category.as_deref());

    let companions = client.list_companions(&filter).await?;

    if companions.is_empty() {
        println!("No companions found.");
        return Ok(());
    }

    println!("{}", "Companions:".bold());
    for companion in companions {
        println!(
            "  {} {} {} {}",
            companion.id.to_string().dimmed(),
            companion.name.cyan().bold(),
            format!("@{}", companion.user_name).dimmed(),
            truncate_string(&companion.description, 50)
        );
    }

    Ok(())
}

async fn cmd_show(id: String) -> Result<()> {
    let config = load_config()?;
    let client = CompanionClient::new(&config.base_url, config.token.as_deref());

    let companion = client.get_companion(&id).await?;

    println!("{} {}", companion.name.cyan().bold(), companion.id.to_string().dimmed());
    println!("  {} {}", "By:".bold(), companion.user_name);
    println!("  {} {}", "Category:".bold(), companion.category_id);
    println!("  {} {}", "Image:".bold(), companion.src);
    println!("  {} {}", "Updated:".bold(), companion.updated_at.format("%Y-%m-%d %H:%M"));
    println!("\n{}\n  {}", "Description".bold(), companion.description);
    println!("\n{}\n{}", "Instructions".bold(), companion.instructions);
    println!("\n{}\n{}", "Seed".bold(), companion.seed.dimmed());

    Ok(())
}

async fn cmd_delete(id: String, yes: bool) -> Result<()> {
    let config = load_config()?;
    let token = config.require_token()?;
    let client = CompanionClient::new(&config.base_url, Some(token));

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete companion {} and its image?", id))
            .default(false)
            .interact()
            .context("Failed to read confirmation")?;

        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let deleted = client.delete_companion(&id).await?;

    println!("{} Deleted {}", "✓".green(), deleted.name.cyan());

    Ok(())
}

async fn cmd_categories() -> Result<()> {
    let config = load_config()?;
    let client = CompanionClient::new(&config.base_url, config.token.as_deref());

    let categories = client.list_categories().await?;

    if categories.is_empty() {
        println!("No categories found.");
        return Ok(());
    }

    println!("{}", "Categories:".bold());
    for category in categories {
        let marker = if config.default_category.as_deref() == Some(&category.id.to_string()) {
            " (default)".green().to_string()
        } else {
            String::new()
        };
        println!(
            "  {} {}{}",
            category.id.to_string().dimmed(),
            category.name.cyan(),
            marker
        );
    }

    Ok(())
}

/// Truncate string safely for UTF-8 (by char count, not bytes)
fn truncate_string(s: &str, max_chars: usize) -> String {
    let chars: Vec<char> = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        format!("{}...", chars.into_iter().collect::<String>())
    } else {
        s.to_string()
    }
}
