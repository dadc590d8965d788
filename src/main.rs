//! extrapub - a static site host with extra public directories.

#![allow(dead_code)]

mod cli;
mod config;
mod core;
mod host;
mod logger;
mod public;
mod utils;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::SiteConfig;
use host::HostPaths;
use public::PublicDirs;

fn main() -> Result<()> {
    // Setup global Ctrl+C handler (before any blocking operations)
    core::setup_shutdown_handler()?;

    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }
    logger::set_verbose(cli.verbose);

    let config = SiteConfig::load(&cli)?;
    let paths = HostPaths::from_config(&config);
    let dirs = PublicDirs::setup(&config.extra_public, &paths)?;

    match &cli.command {
        Commands::Build { clean } => cli::build::build_site(&paths, &dirs, *clean).map(|_| ()),
        Commands::Serve { .. } => cli::serve::serve_site(&config, &dirs),
        Commands::Check { json } => cli::check::check_dirs(&dirs, *json),
    }
}
