//! Case-insensitive substring filters over text columns.

use crate::traits::MovieFilter;
use data_loader::Movie;

/// Keeps movies whose title contains a substring.
///
/// This is what the "recommendation" endpoint is built on: every film whose
/// title contains the query, in table order.
pub struct TitleContainsFilter {
    needle: String,
}

impl TitleContainsFilter {
    pub fn new(needle: &str) -> Self {
        Self {
            needle: needle.to_lowercase(),
        }
    }
}

impl MovieFilter for TitleContainsFilter {
    fn name(&self) -> &str {
        "TitleContainsFilter"
    }

    fn keep(&self, movie: &Movie) -> bool {
        movie.title.to_lowercase().contains(&self.needle)
    }
}

/// Keeps movies whose overview contains a keyword.
///
/// The keyword is matched literally; a missing overview never matches.
pub struct OverviewContainsFilter {
    keyword: String,
}

impl OverviewContainsFilter {
    pub fn new(keyword: &str) -> Self {
        Self {
            keyword: keyword.to_lowercase(),
        }
    }
}

impl MovieFilter for OverviewContainsFilter {
    fn name(&self) -> &str {
        "OverviewContainsFilter"
    }

    fn keep(&self, movie: &Movie) -> bool {
        movie
            .overview
            .as_deref()
            .is_some_and(|overview| overview.to_lowercase().contains(&self.keyword))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::movie;

    #[test]
    fn test_title_contains_ignores_case() {
        let movies = vec![
            movie(1, "Toy Story"),
            movie(2, "Toy Story 2"),
            movie(3, "The Story of Us"),
            movie(4, "Heat"),
        ];

        let filtered = TitleContainsFilter::new("TOY STORY").apply(movies.iter().collect());
        let ids: Vec<_> = filtered.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn test_overview_keyword_is_literal() {
        let mut heist = movie(1, "Heat");
        heist.overview = Some("A group of professional bank robbers...".to_string());
        let mut regex_bait = movie(2, "Odd");
        regex_bait.overview = Some("Costs $5 (plus tax)".to_string());
        let silent = movie(3, "Silent");

        let movies = vec![heist, regex_bait, silent];

        let robbers = OverviewContainsFilter::new("Bank Robbers").apply(movies.iter().collect());
        assert_eq!(robbers.len(), 1);
        assert_eq!(robbers[0].id, 1);

        let literal = OverviewContainsFilter::new("(plus").apply(movies.iter().collect());
        assert_eq!(literal.len(), 1);
        assert_eq!(literal[0].id, 2);
    }
}
