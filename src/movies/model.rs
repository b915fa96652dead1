use std::fmt::Display;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// A movie after normalization. Every field is present; values the source
/// did not provide are empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub opening_text: String,
    pub release_date: String,
}

impl Movie {
    fn parsed_release_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.release_date.trim(), "%Y-%m-%d").ok()
    }

    /// Year of release when the date is in `YYYY-MM-DD` form.
    pub fn release_year(&self) -> Option<i32> {
        self.parsed_release_date().map(|date| date.year())
    }

    /// Release date for display, e.g. "25 May 1977". Dates in any other
    /// format are shown as received.
    pub fn display_release_date(&self) -> String {
        self.parsed_release_date().map_or_else(
            || self.release_date.clone(),
            |date| date.format("%-d %B %Y").to_string(),
        )
    }
}

impl Display for Movie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title)
    }
}

/// Body of an add-movie request. The identifier is assigned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMovie {
    pub title: String,
    pub opening_text: String,
    pub release_date: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(release_date: &str) -> Movie {
        Movie {
            id: "4".to_string(),
            title: "A New Hope".to_string(),
            opening_text: "It is a period of civil war.".to_string(),
            release_date: release_date.to_string(),
        }
    }

    #[test]
    fn test_release_date_formatting() {
        let m = movie("1977-05-25");
        assert_eq!(m.release_year(), Some(1977));
        assert_eq!(m.display_release_date(), "25 May 1977");
    }

    #[test]
    fn test_unparseable_release_date_is_kept_verbatim() {
        let m = movie("Summer '77");
        assert_eq!(m.release_year(), None);
        assert_eq!(m.display_release_date(), "Summer '77");
        assert_eq!(movie("").display_release_date(), "");
    }

    #[test]
    fn test_new_movie_serializes_without_id() {
        let body = serde_json::to_value(NewMovie {
            title: "T".to_string(),
            opening_text: "O".to_string(),
            release_date: "R".to_string(),
        })
        .unwrap();

        assert_eq!(
            body,
            serde_json::json!({"title": "T", "openingText": "O", "releaseDate": "R"})
        );
    }
}
