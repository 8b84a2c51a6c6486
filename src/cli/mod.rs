//! CLI module - Command-line interface for tripfinder
//!
//! This module provides a structured CLI using clap for argument parsing.

mod commands;

use clap::{Parser, Subcommand};

use crate::models::trip::SortBy;

/// tripfinder - cached trip search with saved trips
#[derive(Parser)]
#[command(name = "tripfinder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Search trips between two airports
    #[command(alias = "s")]
    Search {
        /// Origin airport code (e.g. ATL)
        origin: String,
        /// Destination airport code (e.g. PEK)
        destination: String,
        /// Result order: fastest or cheapest
        #[arg(long, default_value_t = SortBy::Fastest)]
        sort: SortBy,
    },

    /// Save a trip from a search result
    Save {
        /// Trip ID as shown by `search`
        id: String,
        origin: String,
        destination: String,
    },

    /// List saved trips, newest first
    #[command(alias = "ls", alias = "list")]
    Saved {
        /// Page size (1-100)
        #[arg(long)]
        limit: Option<u64>,
        /// Number of trips to skip
        #[arg(long)]
        offset: Option<u64>,
    },

    /// Show one saved trip
    #[command(alias = "i", alias = "info")]
    Show {
        id: String,
    },

    /// Remove a saved trip
    #[command(alias = "rm")]
    Remove {
        id: String,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
