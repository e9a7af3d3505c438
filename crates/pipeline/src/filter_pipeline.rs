//! The FilterPipeline chains multiple filters.

use crate::traits::MovieFilter;
use data_loader::{DataIndex, Movie};

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let pipeline = FilterPipeline::new()
///     .add_filter(TitleContainsFilter::new("story"))
///     .add_filter(MinimumVotesFilter::new(100));
///
/// let matches = pipeline.run(&index);
/// ```
pub struct FilterPipeline {
    filters: Vec<Box<dyn MovieFilter>>,
}

impl FilterPipeline {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl MovieFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence, logging counts before and after each.
    pub fn apply<'a>(&self, movies: Vec<&'a Movie>) -> Vec<&'a Movie> {
        let mut current = movies;
        for filter in &self.filters {
            tracing::debug!(
                "Applying filter: {} (input count: {})",
                filter.name(),
                current.len()
            );
            current = filter.apply(current);
            tracing::debug!(
                "Filter applied: {} (output count: {})",
                filter.name(),
                current.len()
            );
        }
        current
    }

    /// Run the pipeline over the whole movies table
    pub fn run<'a>(&self, index: &'a DataIndex) -> Vec<&'a Movie> {
        self.apply(index.movies().iter().collect())
    }
}

impl Default for FilterPipeline {
    fn default() -> Self {
        Self::new()
    }
}
