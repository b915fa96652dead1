//! Fetch state and its pure reducer.
//!
//! All transitions of the movie collection go through [`reduce`], which takes
//! the current state and an event and returns the next state. Each refresh is
//! tagged with a [`RequestId`]; only the completion of the most recently
//! started request is applied, so an overtaken response can never overwrite a
//! newer one.

use crate::movies::Movie;

/// Sequence number of a refresh. Strictly increasing per controller.
pub type RequestId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FetchStatus {
    #[default]
    Idle,
    Loading,
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FetchState {
    /// Movies in arrival order.
    pub movies: Vec<Movie>,
    pub status: FetchStatus,
    /// Highest request id started so far; 0 before the first refresh.
    pub latest_request: RequestId,
}

impl FetchState {
    pub const fn is_loading(&self) -> bool {
        matches!(self.status, FetchStatus::Loading)
    }

    pub fn error_message(&self) -> Option<&str> {
        match &self.status {
            FetchStatus::Error(message) => Some(message),
            _ => None,
        }
    }

    /// Whether a completion for `request` would be applied.
    pub const fn is_current(&self, request: RequestId) -> bool {
        request == self.latest_request
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchEvent {
    /// A refresh was issued.
    Started(RequestId),
    /// A refresh returned a collection.
    Succeeded {
        request: RequestId,
        movies: Vec<Movie>,
    },
    /// A refresh failed; `message` is what the user sees.
    Failed { request: RequestId, message: String },
}

pub fn reduce(state: FetchState, event: FetchEvent) -> FetchState {
    match event {
        FetchEvent::Started(request) if request > state.latest_request => FetchState {
            status: FetchStatus::Loading,
            latest_request: request,
            ..state
        },
        FetchEvent::Succeeded { request, movies } if state.is_current(request) => FetchState {
            movies,
            status: FetchStatus::Idle,
            ..state
        },
        FetchEvent::Failed { request, message } if state.is_current(request) => FetchState {
            status: FetchStatus::Error(message),
            ..state
        },
        // Reused ids and completions of superseded requests.
        _ => state,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: &str) -> Movie {
        Movie {
            id: id.to_string(),
            title: format!("Movie {id}"),
            opening_text: String::new(),
            release_date: String::new(),
        }
    }

    fn run(events: impl IntoIterator<Item = FetchEvent>) -> FetchState {
        events.into_iter().fold(FetchState::default(), reduce)
    }

    #[test]
    fn test_initial_state() {
        let state = FetchState::default();
        assert!(state.movies.is_empty());
        assert_eq!(state.status, FetchStatus::Idle);
        assert_eq!(state.error_message(), None);
    }

    #[test]
    fn test_successful_refresh_populates_movies() {
        let state = run([
            FetchEvent::Started(1),
            FetchEvent::Succeeded {
                request: 1,
                movies: vec![movie("1"), movie("2"), movie("3")],
            },
        ]);

        assert_eq!(state.movies.len(), 3);
        assert_eq!(state.status, FetchStatus::Idle);
    }

    #[test]
    fn test_failed_refresh_keeps_previous_movies() {
        let loaded = run([
            FetchEvent::Started(1),
            FetchEvent::Succeeded {
                request: 1,
                movies: vec![movie("1")],
            },
        ]);

        let failed = [
            FetchEvent::Started(2),
            FetchEvent::Failed {
                request: 2,
                message: "Something went wrong!".to_string(),
            },
        ]
        .into_iter()
        .fold(loaded.clone(), reduce);

        assert_eq!(failed.movies, loaded.movies);
        assert_eq!(failed.error_message(), Some("Something went wrong!"));
    }

    #[test]
    fn test_start_clears_error() {
        let state = run([
            FetchEvent::Started(1),
            FetchEvent::Failed {
                request: 1,
                message: "boom".to_string(),
            },
            FetchEvent::Started(2),
        ]);

        assert!(state.is_loading());
        assert_eq!(state.error_message(), None);
    }

    #[test]
    fn test_superseded_completion_is_discarded() {
        let state = run([
            FetchEvent::Started(1),
            FetchEvent::Started(2),
            FetchEvent::Succeeded {
                request: 2,
                movies: vec![movie("new")],
            },
            FetchEvent::Succeeded {
                request: 1,
                movies: vec![movie("old-a"), movie("old-b")],
            },
        ]);

        assert_eq!(state.movies, vec![movie("new")]);
        assert_eq!(state.status, FetchStatus::Idle);
    }

    #[test]
    fn test_stale_completion_does_not_end_loading() {
        let state = run([
            FetchEvent::Started(1),
            FetchEvent::Started(2),
            FetchEvent::Failed {
                request: 1,
                message: "late failure".to_string(),
            },
        ]);

        assert!(state.is_loading());
        assert_eq!(state.latest_request, 2);
    }

    #[test]
    fn test_reused_request_id_is_ignored() {
        let state = run([
            FetchEvent::Started(3),
            FetchEvent::Succeeded {
                request: 3,
                movies: vec![movie("a")],
            },
            FetchEvent::Started(3),
        ]);

        assert_eq!(state.status, FetchStatus::Idle);
    }
}
