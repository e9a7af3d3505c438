//! Composable filters over the movies table.
//!
//! This crate provides:
//! - MovieFilter trait and implementations for row filtering
//! - FilterPipeline for composing filters
//! - calendar lookups for Spanish month and weekday names
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::FilterPipeline;
//! use pipeline::filters::*;
//!
//! let pipeline = FilterPipeline::new()
//!     .add_filter(GenreFilter::new("Drama"))
//!     .add_filter(ReleaseMonthFilter::new(12))
//!     .add_filter(MinimumVotesFilter::new(100));
//!
//! let december_dramas = pipeline.run(&index);
//! ```

pub mod traits;
pub mod filters;
pub mod filter_pipeline;
pub mod calendar;

// Re-export main types
pub use traits::MovieFilter;
pub use filter_pipeline::FilterPipeline;
pub use calendar::{month_from_name, weekday_from_name};

#[cfg(test)]
pub(crate) mod test_support {
    use chrono::NaiveDate;
    use data_loader::{Genre, Movie, MovieId};

    pub fn movie(id: MovieId, title: &str) -> Movie {
        Movie {
            id,
            title: title.to_string(),
            original_language: Some("en".to_string()),
            overview: None,
            tagline: None,
            status: Some("Released".to_string()),
            belongs_to_collection: None,
            genres: vec![],
            production_companies: vec![],
            production_countries: vec![],
            spoken_languages: vec![],
            budget: 0.0,
            revenue: 0.0,
            popularity: 0.0,
            runtime: 0.0,
            vote_average: 0.0,
            vote_count: 0,
            release_date: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            release_year: 2000,
            return_ratio: 0.0,
        }
    }

    pub fn with_genres(mut movie: Movie, names: &[&str]) -> Movie {
        movie.genres = names
            .iter()
            .map(|name| Genre {
                id: 0,
                name: name.to_string(),
            })
            .collect();
        movie
    }

    pub fn released(mut movie: Movie, year: i32, month: u32, day: u32) -> Movie {
        movie.release_date = NaiveDate::from_ymd_opt(year, month, day).unwrap();
        movie.release_year = year;
        movie
    }
}
