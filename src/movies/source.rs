use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use thiserror::Error;
use tracing::debug;
use url::Url;

use crate::movies::normalize::{PayloadShape, normalize};
use crate::movies::{Movie, NewMovie};

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Failure talking to a movies endpoint.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response (DNS, connection, timeout).
    #[error("request to movies endpoint failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The endpoint answered with a non-success status.
    #[error("movies endpoint responded with {0}")]
    Status(StatusCode),
    /// The body could not be read as the configured payload shape.
    #[error("movies endpoint returned an unreadable body: {0}")]
    Parse(#[from] serde_json::Error),
}

impl FetchError {
    /// Short message for the user. Details go to the log instead.
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::Transport(_) => "Failed to fetch movies.",
            Self::Status(_) | Self::Parse(_) => "Something went wrong!",
        }
    }
}

/// A remote collection of movies.
#[async_trait]
pub trait MovieSource: Send + Sync {
    /// Human-readable location of the collection, used in the status bar.
    fn describe(&self) -> String;

    /// Fetch and normalize the full collection.
    async fn fetch_movies(&self) -> Result<Vec<Movie>, FetchError>;

    /// Store a new movie. The response body is not interpreted.
    async fn add_movie(&self, movie: &NewMovie) -> Result<(), FetchError>;
}

/// [`MovieSource`] backed by a JSON HTTP endpoint.
#[derive(Clone, Debug)]
pub struct HttpMovieSource {
    client: Client,
    url: Url,
    shape: PayloadShape,
}

impl HttpMovieSource {
    /// Build a source for `url`. Without a timeout a hung request never
    /// completes.
    pub fn new(url: Url, shape: PayloadShape, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
            url,
            shape,
        })
    }
}

#[async_trait]
impl MovieSource for HttpMovieSource {
    fn describe(&self) -> String {
        let host = self.url.host_str().unwrap_or("?");
        format!("{host}{}", self.url.path())
    }

    async fn fetch_movies(&self) -> Result<Vec<Movie>, FetchError> {
        debug!(url = %self.url, shape = self.shape.label(), "GET movies");
        let response = self.client.get(self.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.bytes().await?;
        Ok(normalize(self.shape, &body)?)
    }

    async fn add_movie(&self, movie: &NewMovie) -> Result<(), FetchError> {
        debug!(url = %self.url, title = %movie.title, "POST movie");
        let response = self.client.post(self.url.clone()).json(movie).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response.text().await?;
        debug!(%status, body = %body, "Movie stored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn source(server: &MockServer, shape: PayloadShape) -> HttpMovieSource {
        let url = Url::parse(&format!("{}/movies.json", server.uri())).unwrap();
        HttpMovieSource::new(url, shape, Some(Duration::from_secs(5))).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_list_shape() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movies.json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "results": [
                    {"episode_id": 4, "title": "A New Hope", "opening_crawl": "...", "release_date": "1977-05-25"},
                    {"episode_id": 5, "title": "The Empire Strikes Back", "opening_crawl": "...", "release_date": "1980-05-17"}
                ]
            })))
            .mount(&server)
            .await;

        let movies = source(&server, PayloadShape::List).await.fetch_movies().await.unwrap();
        assert_eq!(movies.len(), 2);
        assert_eq!(movies[1].id, "5");
        assert_eq!(movies[1].title, "The Empire Strikes Back");
    }

    #[tokio::test]
    async fn test_fetch_keyed_shape() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/movies.json"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"b": {"title": "Second"}, "a": {"title": "First"}}"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let movies = source(&server, PayloadShape::Keyed).await.fetch_movies().await.unwrap();
        let ids: Vec<&str> = movies.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
    }

    #[tokio::test]
    async fn test_non_success_status_is_an_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let err = source(&server, PayloadShape::List).await.fetch_movies().await.unwrap_err();
        assert!(matches!(err, FetchError::Status(StatusCode::NOT_FOUND)));
        assert_eq!(err.user_message(), "Something went wrong!");
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = source(&server, PayloadShape::List).await.fetch_movies().await.unwrap_err();
        assert!(matches!(err, FetchError::Parse(_)));
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_is_a_transport_error() {
        // Bind and release a port so nothing is listening on it.
        let port = std::net::TcpListener::bind("127.0.0.1:0")
            .unwrap()
            .local_addr()
            .unwrap()
            .port();
        let url = Url::parse(&format!("http://127.0.0.1:{port}/movies.json")).unwrap();

        let source = HttpMovieSource::new(url, PayloadShape::List, Some(Duration::from_secs(2))).unwrap();
        let err = source.fetch_movies().await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
        assert_eq!(err.user_message(), "Failed to fetch movies.");
    }

    #[tokio::test]
    async fn test_add_movie_posts_json_without_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/movies.json"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({
                "title": "Rogue One",
                "openingText": "Rebels steal the plans.",
                "releaseDate": "2016-12-16"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"name": "-Nx1"})))
            .expect(1)
            .mount(&server)
            .await;

        let movie = NewMovie {
            title: "Rogue One".to_string(),
            opening_text: "Rebels steal the plans.".to_string(),
            release_date: "2016-12-16".to_string(),
        };
        source(&server, PayloadShape::Keyed).await.add_movie(&movie).await.unwrap();
    }

    #[tokio::test]
    async fn test_add_movie_rejected_by_server() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(405))
            .mount(&server)
            .await;

        let movie = NewMovie {
            title: "T".to_string(),
            opening_text: String::new(),
            release_date: String::new(),
        };
        let err = source(&server, PayloadShape::List).await.add_movie(&movie).await.unwrap_err();
        assert!(matches!(err, FetchError::Status(StatusCode::METHOD_NOT_ALLOWED)));
    }

    #[tokio::test]
    async fn test_describe_uses_host_and_path() {
        let url = Url::parse("https://swapi.dev/api/films/").unwrap();
        let source = HttpMovieSource::new(url, PayloadShape::List, None).unwrap();
        assert_eq!(source.describe(), "swapi.dev/api/films/");
    }
}
