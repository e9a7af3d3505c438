//! Filter on the unnested `genres` column.

use crate::traits::MovieFilter;
use data_loader::Movie;

/// Keeps movies tagged with a genre (case-insensitive name match)
pub struct GenreFilter {
    genre: String,
}

impl GenreFilter {
    pub fn new(genre: &str) -> Self {
        Self {
            genre: genre.to_string(),
        }
    }
}

impl MovieFilter for GenreFilter {
    fn name(&self) -> &str {
        "GenreFilter"
    }

    fn keep(&self, movie: &Movie) -> bool {
        movie.has_genre(&self.genre)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{movie, with_genres};

    #[test]
    fn test_genre_filter() {
        let movies = vec![
            with_genres(movie(1, "Alien"), &["Horror", "Science Fiction"]),
            with_genres(movie(2, "Heat"), &["Action", "Crime", "Drama", "Thriller"]),
            movie(3, "Untagged"),
        ];

        let filtered = GenreFilter::new("science fiction").apply(movies.iter().collect());
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);
    }
}
