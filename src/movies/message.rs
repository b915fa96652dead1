//! Messages for the movies service.
//!
//! Key presses, form results and async completions all reach the service as
//! a [`MoviesMsg`] and are processed in order by `update()`.

use crate::movies::source::FetchError;
use crate::movies::state::RequestId;
use crate::movies::{Movie, NewMovie};

#[derive(Debug)]
pub enum MoviesMsg {
    /// Fetch the collection again.
    Refresh,
    /// A fetch issued with `request` finished.
    FetchCompleted {
        request: RequestId,
        result: Result<Vec<Movie>, FetchError>,
    },
    /// Open the add-movie form.
    ShowAddForm,
    /// The form was closed without submitting.
    FormCancelled,
    /// The form was submitted.
    SubmitMovie(NewMovie),
}
