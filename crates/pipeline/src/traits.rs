//! Core trait for the filtering pipeline.
//!
//! This module defines the MovieFilter trait that allows composable,
//! extensible filters to be applied to slices of the movies table.

use data_loader::Movie;
use rayon::prelude::*;

/// Core trait for filtering movies.
///
/// ## Design Note
/// - `Send + Sync` lets the provided `apply` evaluate `keep` on Rayon workers
/// - Filters work on borrowed rows, so chaining them never clones a Movie
/// - `apply` keeps the input order
pub trait MovieFilter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Whether a single movie passes this filter
    fn keep(&self, movie: &Movie) -> bool;

    /// Apply this filter to a set of movies.
    fn apply<'a>(&self, movies: Vec<&'a Movie>) -> Vec<&'a Movie> {
        movies
            .into_par_iter()
            .filter(|movie| self.keep(movie))
            .collect()
    }
}
