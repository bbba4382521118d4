//! CLI administration tool for linkdir.
//!
//! Provides commands for managing accounts and the legacy shared secret
//! without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create an account (interactive)
//! cargo run --bin admin -- account create
//!
//! # Create an admin account non-interactively
//! cargo run --bin admin -- account create --username trung --email t@example.com --admin -y
//!
//! # List all accounts
//! cargo run --bin admin -- account list
//!
//! # Hash a shared secret for SHARED_SECRET_HASH
//! cargo run --bin admin -- secret hash
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use linkdir::application::services::CredentialHasher;
use linkdir::domain::entities::NewAccount;
use linkdir::domain::repositories::AccountRepository;
use linkdir::infrastructure::persistence::PgAccountRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input, Password};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing linkdir.
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
    /// Manage accounts
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },

    /// Manage the legacy shared secret
    Secret {
        #[command(subcommand)]
        action: SecretAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Account management subcommands.
#[derive(Subcommand)]
enum AccountAction {
    /// Create a new account
    Create {
        /// Username
        #[arg(short, long)]
        username: Option<String>,

        /// Email address
        #[arg(short, long)]
        email: Option<String>,

        /// Password (prompted securely if not provided)
        #[arg(short, long)]
        password: Option<String>,

        /// Grant administrator privileges
        #[arg(short, long)]
        admin: bool,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all accounts
    List,

    /// Delete an account by username or id
    Delete {
        /// Username or numeric id
        name_or_id: String,
    },
}

/// Shared-secret subcommands.
#[derive(Subcommand)]
enum SecretAction {
    /// Hash a secret for the SHARED_SECRET_HASH environment variable
    Hash {
        /// Secret value (prompted securely if not provided)
        value: Option<String>,
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

    // The secret hash command needs no database.
    let command = match cli.command {
        Commands::Secret {
            action: SecretAction::Hash { value },
        } => return hash_secret(value),
        command => command,
    };

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match command {
        Commands::Account { action } => handle_account_action(action, &pool).await?,
        Commands::Secret { .. } => unreachable!("handled above"),
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches account management commands.
async fn handle_account_action(action: AccountAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgAccountRepository::new(Arc::new(pool.clone())));

    match action {
        AccountAction::Create {
            username,
            email,
            password,
            admin,
            yes,
        } => {
            create_account(repo, username, email, password, admin, yes).await?;
        }
        AccountAction::List => {
            list_accounts(repo).await?;
        }
        AccountAction::Delete { name_or_id } => {
            delete_account(repo, name_or_id).await?;
        }
    }

    Ok(())
}

/// Creates an account with interactive prompts.
///
/// # Security
///
/// Only the PBKDF2 hash is stored; the password is read without echo
/// when prompted.
async fn create_account(
    repo: Arc<PgAccountRepository>,
    username: Option<String>,
    email: Option<String>,
    password: Option<String>,
    admin: bool,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "👤 Create Account".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };

    let email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let password = match password {
        Some(p) => p,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords do not match")
            .interact()?,
    };

    if password.len() < 8 {
        anyhow::bail!("Password must be at least 8 characters");
    }

    println!();
    println!("{}", "Account details:".bright_white().bold());
    println!("  Username: {}", username.cyan());
    println!("  Email:    {}", email.cyan());
    println!(
        "  Role:     {}",
        if admin { "ADMIN".yellow() } else { "user".normal() }
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this account?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let hasher = CredentialHasher::new();
    let password_hash = hasher.hash_blocking(&password);

    let account = repo
        .insert(NewAccount {
            username,
            email,
            password_hash,
            is_admin: admin,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create account: {}", e))?;

    println!();
    println!("{}", "✅ Account created successfully!".green().bold());
    println!("  ID: {}", account.id.to_string().bright_black());
    println!();

    Ok(())
}

/// Lists all accounts with role indicators.
async fn list_accounts(repo: Arc<PgAccountRepository>) -> Result<()> {
    println!("{}", "📋 Accounts".bright_blue().bold());
    println!();

    let accounts = repo
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list accounts: {}", e))?;

    if accounts.is_empty() {
        println!("{}", "  No accounts found".yellow());
        println!();
        println!(
            "  Create one with: {} admin account create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<4} {:<20} {:<30} {:<20} {:<6}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "Email".bright_white().bold(),
        "Created".bright_white().bold(),
        "Role".bright_white().bold()
    );
    println!("  {}", "─".repeat(84).bright_black());

    for account in &accounts {
        let role = if account.is_admin {
            "ADMIN".yellow()
        } else {
            "user".normal()
        };

        println!(
            "  {:<4} {:<20} {:<30} {:<20} {}",
            account.id.to_string().bright_black(),
            account.username.cyan(),
            account.email,
            account
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            role
        );
    }

    println!();
    println!(
        "  Total: {}",
        accounts.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Deletes an account by username or id with confirmation prompt.
async fn delete_account(repo: Arc<PgAccountRepository>, name_or_id: String) -> Result<()> {
    println!("{}", "🗑️  Delete Account".bright_blue().bold());
    println!();

    let account = match name_or_id.parse::<i64>() {
        Ok(id) => repo
            .find_by_id(id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?,
        Err(_) => repo
            .find_by_username(&name_or_id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?,
    };

    let account = account.context("Account not found")?;

    println!("  Username: {}", account.username.cyan());
    println!("  ID:       {}", account.id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Delete this account?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    repo.delete(account.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete account: {}", e))?;

    println!();
    println!("{}", "✅ Account deleted".green().bold());
    println!();

    Ok(())
}

/// Hashes a shared secret for the legacy automation surface.
///
/// Prints the tagged encoding to export as `SHARED_SECRET_HASH`. The raw
/// secret is never stored.
fn hash_secret(value: Option<String>) -> Result<()> {
    println!("{}", "🔑 Hash Shared Secret".bright_blue().bold());
    println!();

    let secret = match value {
        Some(v) => v,
        None => Password::new()
            .with_prompt("Secret")
            .with_confirmation("Confirm secret", "Secrets do not match")
            .interact()?,
    };

    let hasher = CredentialHasher::new();
    let encoded = hasher.hash_blocking(&secret);

    println!("{}", "Add this to your environment:".bright_white());
    println!(
        "  {}={}",
        "SHARED_SECRET_HASH".bright_cyan(),
        encoded.bright_yellow()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let redirects: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM redirects")
                .fetch_one(pool)
                .await?;

            let accounts: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  Redirects:  {}",
                redirects.to_string().bright_green().bold()
            );
            println!(
                "  Accounts:   {}",
                accounts.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}
