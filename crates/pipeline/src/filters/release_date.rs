//! Filters on the release date: calendar month and day of the week.

use crate::traits::MovieFilter;
use chrono::{Datelike, Weekday};
use data_loader::Movie;

/// Keeps movies released in a calendar month (1 = January)
pub struct ReleaseMonthFilter {
    month: u32,
}

impl ReleaseMonthFilter {
    pub fn new(month: u32) -> Self {
        Self { month }
    }
}

impl MovieFilter for ReleaseMonthFilter {
    fn name(&self) -> &str {
        "ReleaseMonthFilter"
    }

    fn keep(&self, movie: &Movie) -> bool {
        movie.release_date.month() == self.month
    }
}

/// Keeps movies released on a given day of the week
pub struct ReleaseWeekdayFilter {
    weekday: Weekday,
}

impl ReleaseWeekdayFilter {
    pub fn new(weekday: Weekday) -> Self {
        Self { weekday }
    }
}

impl MovieFilter for ReleaseWeekdayFilter {
    fn name(&self) -> &str {
        "ReleaseWeekdayFilter"
    }

    fn keep(&self, movie: &Movie) -> bool {
        movie.release_date.weekday() == self.weekday
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{movie, released};

    #[test]
    fn test_month_filter() {
        let movies = vec![
            released(movie(1, "Toy Story"), 1995, 10, 30),
            released(movie(2, "Jumanji"), 1995, 12, 15),
            released(movie(3, "Heat"), 1995, 12, 15),
        ];

        let december = ReleaseMonthFilter::new(12).apply(movies.iter().collect());
        assert_eq!(december.len(), 2);
    }

    #[test]
    fn test_weekday_filter() {
        // 1995-10-30 was a Monday, 1995-12-15 a Friday
        let movies = vec![
            released(movie(1, "Toy Story"), 1995, 10, 30),
            released(movie(2, "Jumanji"), 1995, 12, 15),
        ];

        let mondays = ReleaseWeekdayFilter::new(Weekday::Mon).apply(movies.iter().collect());
        assert_eq!(mondays.len(), 1);
        assert_eq!(mondays[0].id, 1);

        let fridays = ReleaseWeekdayFilter::new(Weekday::Fri).apply(movies.iter().collect());
        assert_eq!(fridays[0].id, 2);
    }
}
