//! # Data Loader Crate
//!
//! Cleans the movies metadata dataset and holds it in memory for querying.
//!
//! ## Main Components
//!
//! - **types**: Cleaned records (Movie, Credits, nested records) and DataIndex
//! - **literal**: Parser for the stringified list-of-dict columns
//! - **parser**: Raw CSV ingestion
//! - **clean**: Type coercion, derived columns, unnesting
//! - **store**: JSON Lines persistence of the cleaned tables
//! - **index**: Loading, validation and summary queries over DataIndex
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::DataIndex;
//! use std::path::Path;
//!
//! let index = DataIndex::load_from_files(Path::new("datasets"))?;
//!
//! for movie in index.find_by_title("Toy Story") {
//!     println!("{} ({}) popularity {}", movie.title, movie.release_year, movie.popularity);
//! }
//! for credits in index.credits_for_director("John Lasseter") {
//!     let film = index.get_movie(credits.id);
//! }
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod literal;
pub mod parser;
pub mod clean;
pub mod store;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use clean::CleanReport;
pub use index::{LoadReport, ValidationReport, clean_csv_files};
pub use types::{
    // Type aliases
    MovieId,
    // Tables
    Movie,
    Credits,
    DataIndex,
    // Nested records
    CastMember,
    Collection,
    Company,
    Country,
    CrewMember,
    Genre,
    SpokenLanguage,
    // Helpers
    normalize_key,
};
