//! CLI module for jwt-gate
//!
//! Provides command-line interface parsing and handling for the jwt-gate binary.
//! Uses clap for argument parsing and owo-colors for colored terminal output.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// jwt-gate - HMAC session tokens and the middleware that checks them
#[derive(Parser, Debug)]
#[command(
    name = "jwt-gate",
    version,
    about = "jwt-gate - mint, verify and enforce HMAC-signed session tokens",
    long_about = "Mint and verify HMAC-signed session tokens, or run a small server whose\n\
                  /api routes require one.\n\n\
                  The signing secret is read from the environment variable named by\n\
                  auth.jwt_secret_env (JWT_SECRET by default); a .env file is honoured.",
    after_help = "EXAMPLES:\n    \
                  jwt-gate mint --claim sub=user-1             # Mint a token\n    \
                  jwt-gate mint --claims '{\"roles\":[\"admin\"]}' --raw\n    \
                  jwt-gate decode <token>                      # Verify and show claims\n    \
                  jwt-gate serve --port 8080                   # Run the demo server\n    \
                  jwt-gate config --validate                   # Check jwt-gate.toml"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "jwt-gate.toml", global = true)]
    pub config: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Mint a signed token
    ///
    /// Claims come from --claims (a JSON object) and any number of
    /// --claim key=value pairs; values that parse as JSON keep their type.
    Mint {
        /// Claims as a JSON object
        #[arg(long)]
        claims: Option<String>,

        /// Single claim as key=value (repeatable)
        #[arg(long = "claim", value_name = "KEY=VALUE")]
        claim: Vec<String>,

        /// Token lifetime in minutes (overrides the config)
        #[arg(short, long)]
        expiry: Option<u32>,

        /// HMAC algorithm: HS256, HS384 or HS512 (overrides the config)
        #[arg(short, long)]
        algorithm: Option<String>,

        /// Print only the token
        #[arg(long)]
        raw: bool,
    },

    /// Verify a token and print its claims
    Decode {
        /// The compact token string
        token: String,

        /// Print only the claims as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run the demo HTTP server guarded by the auth middleware
    Serve {
        /// Host address for the server
        #[arg(long)]
        host: Option<String>,

        /// Port for the server
        #[arg(long)]
        port: Option<u16>,
    },

    /// Show configuration information
    Config {
        /// Validate the configuration file
        #[arg(long)]
        validate: bool,
    },
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
