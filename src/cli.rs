use std::path::PathBuf;

use clap::Parser;

use crate::movies::PayloadShape;

#[derive(Parser, Debug)]
#[command(name = "lazymovies", version, about = "TUI for browsing movies from a JSON endpoint")]
pub struct Args {
    /// Movies endpoint URL (e.g., "https://swapi.dev/api/films/")
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Shape of the JSON returned by the endpoint
    #[arg(short, long, value_enum)]
    pub shape: Option<PayloadShape>,

    /// Theme name (e.g., "Catppuccin Latte")
    #[arg(short, long)]
    pub theme: Option<String>,

    /// Path to a config file instead of the platform default
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Fetch once, print the result and exit without starting the TUI
    #[arg(short, long)]
    pub print: bool,
}
