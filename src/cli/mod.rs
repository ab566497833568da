//! CLI module - Command-line interface for Watchlist
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

/// Watchlist - a personal movie list served over HTTP
#[derive(Parser)]
#[command(name = "watchlist")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (default)
    #[command(alias = "web")]
    Serve,

    /// Initialize the database
    Initdb {
        /// Drop all tables before creating them
        #[arg(long)]
        drop: bool,
    },

    /// Fill the database with sample movies
    Forge,

    /// Create the login user, or update the existing one
    Admin {
        /// The username used to login
        #[arg(long)]
        username: String,
        /// The password used to login. Prompted for on stdin when omitted
        #[arg(long)]
        password: Option<String>,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
