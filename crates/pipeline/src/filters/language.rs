//! Filter on `original_language`.

use crate::traits::MovieFilter;
use data_loader::{Movie, normalize_key};

/// Keeps movies whose original language code matches (case-insensitive)
pub struct LanguageFilter {
    language: String,
}

impl LanguageFilter {
    pub fn new(language: &str) -> Self {
        Self {
            language: normalize_key(language),
        }
    }
}

impl MovieFilter for LanguageFilter {
    fn name(&self) -> &str {
        "LanguageFilter"
    }

    fn keep(&self, movie: &Movie) -> bool {
        movie
            .original_language
            .as_deref()
            .is_some_and(|language| normalize_key(language) == self.language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::movie;

    #[test]
    fn test_language_filter() {
        let mut french = movie(1, "Amélie");
        french.original_language = Some("fr".to_string());
        let mut unknown = movie(2, "Unknown");
        unknown.original_language = None;
        let movies = vec![french, unknown, movie(3, "Heat")];

        let filtered = LanguageFilter::new("FR").apply(movies.iter().collect());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);
    }
}
