//! Fuzzy matching for the movie search box.

use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

/// Case-insensitive fuzzy matcher.
pub struct Matcher {
    inner: SkimMatcherV2,
}

impl Default for Matcher {
    fn default() -> Self {
        Self {
            inner: SkimMatcherV2::default().ignore_case(),
        }
    }
}

impl Matcher {
    /// Whether `pattern` fuzzy-matches `text`. Characters must appear in
    /// order but need not be adjacent. A blank pattern matches everything.
    pub fn matches(&self, text: &str, pattern: &str) -> bool {
        let pattern = pattern.trim();
        pattern.is_empty() || self.inner.fuzzy_match(text, pattern).is_some()
    }

    pub fn matches_any<'a>(&self, texts: impl IntoIterator<Item = &'a str>, pattern: &str) -> bool {
        texts.into_iter().any(|text| self.matches(text, pattern))
    }

    /// Keep the items with a matching field, preserving their order.
    pub fn filter<'a, T, F, I>(&self, items: &'a [T], pattern: &str, fields: F) -> Vec<&'a T>
    where
        F: Fn(&'a T) -> I,
        I: IntoIterator<Item = &'a str>,
    {
        items
            .iter()
            .filter(|item| self.matches_any(fields(item), pattern))
            .collect()
    }
}
