//! Tillpoint CLI - Seed data inspection and demo credential tools.
//!
//! # Usage
//!
//! ```bash
//! # List the seeded demo users
//! tillpoint users list
//!
//! # Same, as JSON
//! tillpoint users list --json
//!
//! # Encode a password with the demo placeholder scheme
//! tillpoint passwd encode staff123
//!
//! # Generate a temporary password
//! tillpoint passwd generate --length 12
//! ```
//!
//! # Commands
//!
//! - `users list` - List the seeded demo users
//! - `passwd` - Encode, verify, or generate demo passwords

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "tillpoint")]
#[command(author, version, about = "Tillpoint CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect the seeded demo users
    Users {
        #[command(subcommand)]
        action: UsersAction,
    },
    /// Demo password utilities
    Passwd {
        #[command(subcommand)]
        action: PasswdAction,
    },
}

#[derive(Subcommand)]
enum UsersAction {
    /// List the seeded demo users
    List {
        /// Output as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
enum PasswdAction {
    /// Encode a password with the placeholder scheme
    Encode {
        /// The plain-text password
        password: String,
    },
    /// Check a password against an encoded value
    Verify {
        /// The encoded value (`hashed:` prefixed base64)
        encoded: String,
        /// The plain-text password to check
        password: String,
    },
    /// Generate a temporary password
    Generate {
        /// Password length
        #[arg(short, long, default_value_t = 10)]
        length: usize,
    },
}

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), commands::CliError> {
    match cli.command {
        Commands::Users { action } => match action {
            UsersAction::List { json } => commands::users::list(json)?,
        },
        Commands::Passwd { action } => match action {
            PasswdAction::Encode { password } => commands::passwd::encode(&password),
            PasswdAction::Verify { encoded, password } => {
                commands::passwd::verify(&encoded, &password);
            }
            PasswdAction::Generate { length } => commands::passwd::generate(length),
        },
    }
    Ok(())
}
