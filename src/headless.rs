//! One-shot fetch that prints the selected branch as plain text.

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use color_eyre::Result;
use tracing::info;

use crate::movies::view::{LOADING_TEXT, NO_MOVIES_TEXT};
use crate::movies::{Branch, FetchController, FetchState, MovieSource};

/// Render `state` the way the selected branch would show it, one movie per
/// line as `<id>\t<releaseDate>\t<title>`.
pub fn render_plain(state: &FetchState, branch: Branch) -> String {
    match branch {
        Branch::Loading => format!("{LOADING_TEXT}\n"),
        Branch::Error => format!("{}\n", state.error_message().unwrap_or_default()),
        Branch::NoMovies => format!("{NO_MOVIES_TEXT}\n"),
        Branch::Movies => state
            .movies
            .iter()
            .map(|m| format!("{}\t{}\t{}\n", m.id, m.release_date, m.title))
            .collect(),
    }
}

/// Fetch once, write the result to `out` and return the branch it showed.
pub async fn print_once(source: Arc<dyn MovieSource>, out: &mut impl Write) -> Result<Branch> {
    let mut controller = FetchController::new(source);
    controller.refresh().await;

    let branch = controller.branch();
    info!(?branch, count = controller.state().movies.len(), "Printing movies");
    out.write_all(render_plain(controller.state(), branch).as_bytes())?;
    out.flush()?;
    Ok(branch)
}

/// Failure for the error branch, success otherwise.
pub fn exit_code(branch: Branch) -> ExitCode {
    if branch == Branch::Error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
