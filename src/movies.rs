//! The movie collection: fetching, state, display selection and the screen
//! that shows it.

mod command;
pub mod controller;
mod form;
mod list;
mod message;
mod model;
pub mod normalize;
mod service;
pub mod source;
pub mod state;
pub mod view;

pub use controller::FetchController;
pub use model::{Movie, NewMovie};
pub use normalize::PayloadShape;
pub use service::MoviesService;
pub use source::{FetchError, HttpMovieSource, MovieSource};
pub use state::{FetchState, FetchStatus};
pub use view::Branch;
