use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "greekmovies")]
#[command(author, version, about = "Catalog add-on for greek-movies.com")]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the add-on HTTP server
    Start {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Print the catalog as served to add-on clients
    Catalog {
        /// Only list titles matching this term
        #[arg(short, long)]
        search: Option<String>,
    },

    /// Print the detail record for a content ID
    Meta {
        /// Content ID, e.g. greekm:/m/1
        id: String,
    },

    /// Print the streams for a content ID
    Streams {
        /// Content ID, e.g. greekm:/m/1
        id: String,
    },

    /// Validate configuration file
    Validate {
        /// Config file to validate (uses default if not specified)
        config: Option<PathBuf>,
    },

    /// Display version information
    Version,
}
