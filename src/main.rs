use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use color_eyre::Result;
use color_eyre::eyre::WrapErr;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::App;
use crate::config::KeyResolver;
use crate::movies::{HttpMovieSource, MovieSource, MoviesService};

mod app;
mod cli;
pub mod commands;
mod config;
mod headless;
mod movies;
mod search;
pub mod service;
mod theme;
pub mod tui;
mod ui;

pub use theme::Theme;

#[tokio::main]
async fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let _guard = initialize_logging()?;
    info!("Starting lazymovies");

    let args = cli::Args::parse();

    let mut config = config::load(args.config.as_deref())?;
    config.apply_cli_args(&args);

    let endpoint = &config.endpoint;
    let url = endpoint.parsed_url()?;
    info!(%url, shape = endpoint.shape.label(), writable = endpoint.is_writable(), "Using endpoint");
    let source: Arc<dyn MovieSource> = Arc::new(
        HttpMovieSource::new(url, endpoint.shape, endpoint.timeout())
            .wrap_err("Failed to create HTTP client")?,
    );

    if args.print {
        let branch = headless::print_once(source, &mut std::io::stdout()).await?;
        return Ok(headless::exit_code(branch));
    }

    let resolver = Arc::new(KeyResolver::new(Arc::new(config.keybindings.clone())));
    let theme = theme::theme_from_name(&config.theme.name);
    let service = MoviesService::new(source, endpoint.is_writable(), Arc::clone(&resolver));

    let mut app = App::new(Box::new(service), resolver, theme);
    app.run().await?;

    Ok(ExitCode::SUCCESS)
}

fn initialize_logging() -> Result<WorkerGuard> {
    let directory = dirs::data_local_dir().map_or_else(
        || std::path::PathBuf::from("logs"),
        |path| path.join("lazymovies").join("logs"),
    );
    std::fs::create_dir_all(&directory)?;

    let file_appender = tracing_appender::rolling::daily(&directory, "lazymovies.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false)
                .with_file(true)
                .with_line_number(true)
                .with_thread_ids(true),
        )
        .init();

    Ok(guard)
}
