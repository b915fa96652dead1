//! Commands for talking to the movies endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc::UnboundedSender;

use crate::app::AppMessage;
use crate::commands::Command;
use crate::movies::controller::add_movie;
use crate::movies::message::MoviesMsg;
use crate::movies::state::RequestId;
use crate::movies::{MovieSource, NewMovie};
use crate::ui::ToastType;

/// Fetch the collection and report back with the request id it was issued
/// under.
pub struct FetchMoviesCmd {
    source: Arc<dyn MovieSource>,
    request: RequestId,
    tx: UnboundedSender<MoviesMsg>,
}

impl FetchMoviesCmd {
    pub fn new(source: Arc<dyn MovieSource>, request: RequestId, tx: UnboundedSender<MoviesMsg>) -> Self {
        Self { source, request, tx }
    }
}

#[async_trait]
impl Command for FetchMoviesCmd {
    fn name(&self) -> String {
        format!("Fetching movies (#{})", self.request)
    }

    async fn execute(self: Box<Self>, _app_tx: UnboundedSender<AppMessage>) -> color_eyre::Result<()> {
        let result = self.source.fetch_movies().await;
        let _ = self.tx.send(MoviesMsg::FetchCompleted {
            request: self.request,
            result,
        });
        Ok(())
    }
}

/// POST a new movie. A successful write shows a toast and asks the service
/// to refresh; a failed one is only logged.
pub struct AddMovieCmd {
    source: Arc<dyn MovieSource>,
    movie: NewMovie,
    tx: UnboundedSender<MoviesMsg>,
}

impl AddMovieCmd {
    pub const fn new(source: Arc<dyn MovieSource>, movie: NewMovie, tx: UnboundedSender<MoviesMsg>) -> Self {
        Self { source, movie, tx }
    }
}

#[async_trait]
impl Command for AddMovieCmd {
    fn name(&self) -> String {
        format!("Adding movie '{}'", self.movie.title)
    }

    async fn execute(self: Box<Self>, app_tx: UnboundedSender<AppMessage>) -> color_eyre::Result<()> {
        if add_movie(self.source.as_ref(), &self.movie).await {
            let _ = app_tx.send(AppMessage::ShowToast {
                message: format!("Added '{}'", self.movie.title),
                toast_type: ToastType::Success,
            });
            let _ = self.tx.send(MoviesMsg::Refresh);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tokio::sync::mpsc;

    use super::*;
    use crate::movies::controller::tests::{ScriptedSource, movie};

    #[tokio::test]
    async fn test_fetch_reports_request_id() {
        let source = Arc::new(ScriptedSource::with_fetches(vec![Ok(vec![movie("1", "A")])]));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (app_tx, _app_rx) = mpsc::unbounded_channel();

        Box::new(FetchMoviesCmd::new(source, 7, tx)).execute(app_tx).await.unwrap();

        match rx.recv().await {
            Some(MoviesMsg::FetchCompleted { request, result }) => {
                assert_eq!(request, 7);
                assert_eq!(result.unwrap(), vec![movie("1", "A")]);
            }
            other => panic!("unexpected message: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_add_success_shows_toast_and_refreshes() {
        let source = Arc::new(ScriptedSource::default());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (app_tx, mut app_rx) = mpsc::unbounded_channel();
        let new_movie = NewMovie {
            title: "Solo".to_string(),
            opening_text: String::new(),
            release_date: "2018-05-25".to_string(),
        };

        Box::new(AddMovieCmd::new(source.clone(), new_movie, tx)).execute(app_tx).await.unwrap();

        assert_eq!(source.added.lock().unwrap().len(), 1);
        assert!(matches!(
            app_rx.try_recv(),
            Ok(AppMessage::ShowToast { toast_type: ToastType::Success, .. })
        ));
        assert!(matches!(rx.try_recv(), Ok(MoviesMsg::Refresh)));
    }

    #[tokio::test]
    async fn test_add_failure_is_silent() {
        let source = Arc::new(ScriptedSource::rejecting_adds());
        let (tx, mut rx) = mpsc::unbounded_channel();
        let (app_tx, mut app_rx) = mpsc::unbounded_channel();
        let new_movie = NewMovie {
            title: "Solo".to_string(),
            opening_text: String::new(),
            release_date: String::new(),
        };

        let result = Box::new(AddMovieCmd::new(source, new_movie, tx)).execute(app_tx).await;

        assert!(result.is_ok());
        assert!(app_rx.try_recv().is_err());
        assert!(rx.try_recv().is_err());
    }
}
