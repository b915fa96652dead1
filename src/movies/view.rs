//! Selection of what the movies screen shows for a given fetch state.

use crate::movies::FetchState;

pub const NO_MOVIES_TEXT: &str = "Found no movies.";
pub const LOADING_TEXT: &str = "Loading...";

/// The four things the movies screen can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    NoMovies,
    Movies,
    Error,
    Loading,
}

struct Rule {
    branch: Branch,
    applies: fn(&FetchState) -> bool,
}

const fn always(_: &FetchState) -> bool {
    true
}

fn has_movies(state: &FetchState) -> bool {
    !state.movies.is_empty()
}

fn has_error(state: &FetchState) -> bool {
    state.error_message().is_some()
}

const fn is_loading(state: &FetchState) -> bool {
    state.is_loading()
}

/// Lowest precedence first. The last rule that applies wins.
const RULES: [Rule; 4] = [
    Rule {
        branch: Branch::NoMovies,
        applies: always,
    },
    Rule {
        branch: Branch::Movies,
        applies: has_movies,
    },
    Rule {
        branch: Branch::Error,
        applies: has_error,
    },
    Rule {
        branch: Branch::Loading,
        applies: is_loading,
    },
];

/// Pick the branch to display: loading over error over list over empty.
pub fn select(state: &FetchState) -> Branch {
    RULES
        .iter()
        .rev()
        .find(|rule| (rule.applies)(state))
        .map_or(Branch::NoMovies, |rule| rule.branch)
}
