use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::movies::state::{FetchEvent, FetchState, RequestId, reduce};
use crate::movies::view::{self, Branch};
use crate::movies::{FetchError, Movie, MovieSource, NewMovie};

/// Owns the fetch lifecycle of one movie collection.
///
/// The controller never performs I/O on its own schedule: callers start a
/// refresh with [`begin_refresh`](Self::begin_refresh), run the request
/// wherever they like, and hand the outcome back to
/// [`complete`](Self::complete).
pub struct FetchController {
    state: FetchState,
    source: Arc<dyn MovieSource>,
}

impl FetchController {
    pub fn new(source: Arc<dyn MovieSource>) -> Self {
        Self {
            state: FetchState::default(),
            source,
        }
    }

    pub const fn state(&self) -> &FetchState {
        &self.state
    }

    pub fn source(&self) -> Arc<dyn MovieSource> {
        Arc::clone(&self.source)
    }

    pub fn branch(&self) -> Branch {
        view::select(&self.state)
    }

    /// Enter `Loading` and return the id the completion must carry.
    ///
    /// Calling this while another refresh is in flight supersedes it.
    pub fn begin_refresh(&mut self) -> RequestId {
        let request = self.state.latest_request + 1;
        debug!(request, "Refreshing movies");
        self.apply(FetchEvent::Started(request));
        request
    }

    /// Apply the outcome of a refresh. Returns false when the request was
    /// superseded and the outcome discarded.
    pub fn complete(&mut self, request: RequestId, result: Result<Vec<Movie>, FetchError>) -> bool {
        // `reduce` ignores stale outcomes on its own; this early return only
        // keeps them out of the info/warn log lines below.
        if !self.state.is_current(request) {
            debug!(
                request,
                latest = self.state.latest_request,
                "Discarding superseded movie response"
            );
            return false;
        }

        let event = match result {
            Ok(movies) => {
                info!(request, count = movies.len(), "Movies loaded");
                FetchEvent::Succeeded { request, movies }
            }
            Err(error) => {
                warn!(request, %error, "Failed to fetch movies");
                FetchEvent::Failed {
                    request,
                    message: error.user_message().to_string(),
                }
            }
        };
        self.apply(event);
        true
    }

    /// Run one whole fetch cycle inline.
    pub async fn refresh(&mut self) {
        let request = self.begin_refresh();
        let result = self.source.fetch_movies().await;
        self.complete(request, result);
    }

    fn apply(&mut self, event: FetchEvent) {
        self.state = reduce(std::mem::take(&mut self.state), event);
    }
}

/// Store a movie and report whether the server accepted it.
///
/// Failures are logged and swallowed: they never reach the fetch state, and
/// the collection only shows the new movie after the next refresh.
pub async fn add_movie(source: &dyn MovieSource, movie: &NewMovie) -> bool {
    match source.add_movie(movie).await {
        Ok(()) => {
            info!(title = %movie.title, "Movie added");
            true
        }
        Err(error) => {
            warn!(title = %movie.title, %error, "Failed to add movie");
            false
        }
    }
}
