//! Conversion of endpoint payloads into [`Movie`] sequences.
//!
//! Two payload topologies are understood:
//!
//! - **List**: `{"results": [{"episode_id", "title", "opening_crawl", "release_date"}]}`
//! - **Keyed**: `{"<key>": {"title", "openingText", "releaseDate"}}`, where each key
//!   becomes the movie id and document order is kept.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::movies::Movie;

/// JSON topology returned by a movies endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum PayloadShape {
    /// Top-level object with a `results` array.
    #[default]
    List,
    /// Top-level object keyed by record id.
    Keyed,
}

impl PayloadShape {
    pub const fn label(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Keyed => "keyed",
        }
    }
}

#[derive(Deserialize)]
struct ListPayload {
    results: Vec<ListRecord>,
}

#[derive(Deserialize)]
struct ListRecord {
    #[serde(default)]
    episode_id: Option<Value>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    opening_crawl: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct KeyedRecord {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    opening_text: Option<String>,
    #[serde(default)]
    release_date: Option<String>,
}

/// Render a source identifier as a string. Numbers keep their JSON spelling.
fn identifier(value: Option<Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s,
        Some(other) => other.to_string(),
    }
}

impl From<ListRecord> for Movie {
    fn from(record: ListRecord) -> Self {
        Self {
            id: identifier(record.episode_id),
            title: record.title.unwrap_or_default(),
            opening_text: record.opening_crawl.unwrap_or_default(),
            release_date: record.release_date.unwrap_or_default(),
        }
    }
}

fn from_keyed(id: String, record: KeyedRecord) -> Movie {
    Movie {
        id,
        title: record.title.unwrap_or_default(),
        opening_text: record.opening_text.unwrap_or_default(),
        release_date: record.release_date.unwrap_or_default(),
    }
}

/// Parse a response body in the given shape.
///
/// Movies keep the order in which they appear in the document. A keyed
/// payload of `null` (an empty collection on some document stores) yields
/// no movies.
pub fn normalize(shape: PayloadShape, body: &[u8]) -> Result<Vec<Movie>, serde_json::Error> {
    match shape {
        PayloadShape::List => {
            let payload: ListPayload = serde_json::from_slice(body)?;
            Ok(payload.results.into_iter().map(Movie::from).collect())
        }
        PayloadShape::Keyed => {
            let payload: Option<Map<String, Value>> = serde_json::from_slice(body)?;
            payload
                .unwrap_or_default()
                .into_iter()
                .map(|(id, value)| {
                    serde_json::from_value::<KeyedRecord>(value).map(|record| from_keyed(id, record))
                })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body(value: &Value) -> Vec<u8> {
        serde_json::to_vec(value).unwrap()
    }

    #[test]
    fn test_list_shape_mapping() {
        let payload = json!({
            "count": 1,
            "results": [{
                "episode_id": 4,
                "title": "A New Hope",
                "opening_crawl": "...",
                "release_date": "1977-05-25",
                "director": "George Lucas"
            }]
        });

        let movies = normalize(PayloadShape::List, &body(&payload)).unwrap();
        assert_eq!(
            movies,
            vec![Movie {
                id: "4".to_string(),
                title: "A New Hope".to_string(),
                opening_text: "...".to_string(),
                release_date: "1977-05-25".to_string(),
            }]
        );
    }

    #[test]
    fn test_keyed_shape_mapping() {
        let payload = json!({"k1": {"title": "T", "openingText": "O", "releaseDate": "R"}});

        let movies = normalize(PayloadShape::Keyed, &body(&payload)).unwrap();
        assert_eq!(
            movies,
            vec![Movie {
                id: "k1".to_string(),
                title: "T".to_string(),
                opening_text: "O".to_string(),
                release_date: "R".to_string(),
            }]
        );
    }

    #[test]
    fn test_keyed_shape_keeps_document_order() {
        let raw = br#"{
            "-Nz9": {"title": "Third"},
            "-Aa1": {"title": "First"},
            "-Mm5": {"title": "Second"}
        }"#;

        let ids: Vec<String> = normalize(PayloadShape::Keyed, raw)
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        assert_eq!(ids, ["-Nz9", "-Aa1", "-Mm5"]);
    }

    #[test]
    fn test_list_shape_keeps_arrival_order_and_duplicates() {
        let payload = json!({"results": [
            {"episode_id": 5, "title": "Empire"},
            {"episode_id": 4, "title": "Hope"},
            {"episode_id": 4, "title": "Hope"}
        ]});

        let titles: Vec<String> = normalize(PayloadShape::List, &body(&payload))
            .unwrap()
            .into_iter()
            .map(|m| m.title)
            .collect();
        assert_eq!(titles, ["Empire", "Hope", "Hope"]);
    }

    #[test]
    fn test_missing_fields_become_empty() {
        let list = normalize(PayloadShape::List, br#"{"results": [{"title": "Only title"}]}"#)
            .unwrap();
        assert_eq!(list[0].id, "");
        assert_eq!(list[0].opening_text, "");
        assert_eq!(list[0].release_date, "");

        let keyed = normalize(PayloadShape::Keyed, br#"{"abc": {"releaseDate": null}}"#).unwrap();
        assert_eq!(keyed[0].id, "abc");
        assert_eq!(keyed[0].title, "");
        assert_eq!(keyed[0].release_date, "");
    }

    #[test]
    fn test_string_episode_id_is_kept() {
        let movies =
            normalize(PayloadShape::List, br#"{"results": [{"episode_id": "IV"}]}"#).unwrap();
        assert_eq!(movies[0].id, "IV");
    }

    #[test]
    fn test_empty_collections() {
        assert!(normalize(PayloadShape::List, br#"{"results": []}"#).unwrap().is_empty());
        assert!(normalize(PayloadShape::Keyed, b"{}").unwrap().is_empty());
        assert!(normalize(PayloadShape::Keyed, b"null").unwrap().is_empty());
    }

    #[test]
    fn test_shape_mismatch_is_an_error() {
        assert!(normalize(PayloadShape::List, br#"{"k1": {"title": "T"}}"#).is_err());
        assert!(normalize(PayloadShape::Keyed, br#"[1, 2, 3]"#).is_err());
        assert!(normalize(PayloadShape::Keyed, br#"{"k1": "not a record"}"#).is_err());
        assert!(normalize(PayloadShape::List, b"<html>").is_err());
    }
}
