//! Filter to ensure a minimum number of votes.
//!
//! Vote averages computed from a handful of votes are noise; this keeps only
//! films with enough votes for their average to mean something.

use crate::traits::MovieFilter;
use data_loader::Movie;

/// Removes movies with fewer than `min_votes` votes
pub struct MinimumVotesFilter {
    min_votes: u32,
}

impl MinimumVotesFilter {
    pub fn new(min_votes: u32) -> Self {
        Self { min_votes }
    }

    pub fn min_votes(&self) -> u32 {
        self.min_votes
    }
}

impl MovieFilter for MinimumVotesFilter {
    fn name(&self) -> &str {
        "MinimumVotesFilter"
    }

    fn keep(&self, movie: &Movie) -> bool {
        movie.vote_count >= self.min_votes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::movie;

    #[test]
    fn test_threshold_is_inclusive() {
        let mut exact = movie(1, "Exactly");
        exact.vote_count = 2000;
        let mut below = movie(2, "Below");
        below.vote_count = 1999;

        let movies = vec![exact, below];
        let filter = MinimumVotesFilter::new(2000);
        let filtered = filter.apply(movies.iter().collect());

        assert_eq!(filter.min_votes(), 2000);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);
    }
}
