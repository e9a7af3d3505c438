//! Concrete filter implementations.
//!
//! Text filters compare lowercase forms, so every match ignores case.

pub mod genre;
pub mod language;
pub mod minimum_votes;
pub mod release_date;
pub mod text_contains;

pub use genre::GenreFilter;
pub use language::LanguageFilter;
pub use minimum_votes::MinimumVotesFilter;
pub use release_date::{ReleaseMonthFilter, ReleaseWeekdayFilter};
pub use text_contains::{OverviewContainsFilter, TitleContainsFilter};
