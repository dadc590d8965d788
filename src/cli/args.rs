//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Static site host with extra public directories
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: site.toml, searched upward)
    #[arg(short = 'C', long, global = true, default_value = "site.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// Output directory path (relative to project root)
    #[arg(short, long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Native public directory path (relative to project root)
    #[arg(short = 'P', long, global = true, value_hint = clap::ValueHint::DirPath)]
    pub public: Option<PathBuf>,

    /// Fail when an extra public directory cannot be resolved
    #[arg(long, global = true)]
    pub strict: bool,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long, global = true)]
    pub verbose: bool,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Build the site into the output directory
    #[command(visible_alias = "b")]
    Build {
        /// Clean output directory completely before building
        #[arg(short, long)]
        clean: bool,
    },

    /// Start the development server
    #[command(visible_alias = "s")]
    Serve {
        /// Network interface to bind (e.g., 127.0.0.1, 0.0.0.0)
        #[arg(short, long)]
        interface: Option<std::net::IpAddr>,

        /// Port number to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Resolve extra public directories and report them
    #[command(visible_alias = "c")]
    Check {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
}
