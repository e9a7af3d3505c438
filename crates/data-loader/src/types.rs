//! Core domain types for the movies dataset.
//!
//! Two tables come out of cleaning:
//! - `movies_metadata`: one [`Movie`] per film
//! - `credits`: one [`Credits`] per film, holding unnested cast and crew
//!
//! The nested record types ([`Genre`], [`Company`], [`CastMember`], ...) mirror
//! the dictionaries stored inside the raw CSV columns. Every field has a
//! default so a dictionary with missing keys still deserializes.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// =============================================================================
// Type Aliases
// =============================================================================

/// Unique identifier for a film (the TMDB id shared by both tables)
pub type MovieId = u32;

// =============================================================================
// Nested Records
// =============================================================================

/// Entry of the `genres` column, e.g. `{'id': 16, 'name': 'Animation'}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Genre {
    pub id: u32,
    pub name: String,
}

/// Entry of the `production_companies` column
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Company {
    pub id: u32,
    pub name: String,
}

/// Entry of the `production_countries` column
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Country {
    pub iso_3166_1: String,
    pub name: String,
}

/// Entry of the `spoken_languages` column
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpokenLanguage {
    pub iso_639_1: String,
    pub name: String,
}

/// The single dictionary stored in `belongs_to_collection`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Collection {
    pub id: u32,
    pub name: String,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
}

/// One actor credit from the `cast` column of `credits`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CastMember {
    pub cast_id: u32,
    pub character: String,
    pub credit_id: String,
    pub gender: u8,
    pub id: u32,
    pub name: String,
    pub order: u32,
    pub profile_path: Option<String>,
}

/// One crew credit from the `crew` column of `credits`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrewMember {
    pub credit_id: String,
    pub department: String,
    pub gender: u8,
    pub id: u32,
    pub job: String,
    pub name: String,
    pub profile_path: Option<String>,
}

impl CrewMember {
    pub fn is_director(&self) -> bool {
        self.job == "Director"
    }
}

// =============================================================================
// Tables
// =============================================================================

/// A cleaned row of `movies_metadata`.
///
/// Numeric columns are already coerced (missing or malformed values are 0),
/// and rows without a parseable release date never make it this far, so
/// `release_date` is not optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: MovieId,
    pub title: String,
    pub original_language: Option<String>,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub status: Option<String>,
    pub belongs_to_collection: Option<Collection>,
    pub genres: Vec<Genre>,
    pub production_companies: Vec<Company>,
    pub production_countries: Vec<Country>,
    pub spoken_languages: Vec<SpokenLanguage>,
    pub budget: f64,
    pub revenue: f64,
    pub popularity: f64,
    pub runtime: f64,
    pub vote_average: f64,
    pub vote_count: u32,
    pub release_date: NaiveDate,
    pub release_year: i32,
    /// `revenue / budget`, or 0 when there is no budget
    #[serde(rename = "return")]
    pub return_ratio: f64,
}

impl Movie {
    /// Whether one of the genres is named `name`, ignoring case
    pub fn has_genre(&self, name: &str) -> bool {
        let wanted = normalize_key(name);
        self.genres.iter().any(|g| normalize_key(&g.name) == wanted)
    }
}

/// A cleaned row of `credits`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Credits {
    pub id: MovieId,
    pub cast: Vec<CastMember>,
    pub crew: Vec<CrewMember>,
}

impl Credits {
    pub fn directors(&self) -> impl Iterator<Item = &CrewMember> {
        self.crew.iter().filter(|member| member.is_director())
    }
}

// =============================================================================
// DataIndex - The In-Memory Database
// =============================================================================

/// Holds both cleaned tables and the lookup indices built over them.
///
/// Tables keep their file order; every index maps a normalized key to row
/// positions in ascending order, so results come back in table order just
/// like a linear scan would produce them.
#[derive(Debug)]
pub struct DataIndex {
    // Primary tables
    pub(crate) movies: Vec<Movie>,
    pub(crate) credits: Vec<Credits>,

    /// Movie rows per id (the dataset contains a few duplicated ids)
    pub(crate) id_index: HashMap<MovieId, Vec<usize>>,
    /// Movie rows per lowercase title
    pub(crate) title_index: HashMap<String, Vec<usize>>,
    /// Movie rows per lowercase genre name
    pub(crate) genre_index: HashMap<String, Vec<usize>>,
    /// Movie rows per lowercase `original_language`
    pub(crate) language_index: HashMap<String, Vec<usize>>,

    /// Credits rows per lowercase actor name
    pub(crate) actor_index: HashMap<String, Vec<usize>>,
    /// Credits rows per lowercase director name
    pub(crate) director_index: HashMap<String, Vec<usize>>,
}

impl DataIndex {
    /// Creates a new, empty DataIndex
    pub fn new() -> Self {
        Self {
            movies: Vec::new(),
            credits: Vec::new(),
            id_index: HashMap::new(),
            title_index: HashMap::new(),
            genre_index: HashMap::new(),
            language_index: HashMap::new(),
            actor_index: HashMap::new(),
            director_index: HashMap::new(),
        }
    }

    /// Build an index from already-cleaned tables
    pub fn from_tables(movies: Vec<Movie>, credits: Vec<Credits>) -> Self {
        let mut index = Self::new();
        for movie in movies {
            index.insert_movie(movie);
        }
        for row in credits {
            index.insert_credits(row);
        }
        index
    }

    // Getters

    /// The whole movies table, in file order
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    /// The whole credits table, in file order
    pub fn credits(&self) -> &[Credits] {
        &self.credits
    }

    /// First movie row with the given id
    pub fn get_movie(&self, id: MovieId) -> Option<&Movie> {
        self.id_index
            .get(&id)
            .and_then(|rows| rows.first())
            .map(|&row| &self.movies[row])
    }

    /// Movies whose title equals `title`, ignoring case
    pub fn find_by_title(&self, title: &str) -> Vec<&Movie> {
        lookup(&self.movies, &self.title_index, title)
    }

    /// Movies tagged with the genre `name`, ignoring case
    pub fn movies_by_genre(&self, name: &str) -> Vec<&Movie> {
        lookup(&self.movies, &self.genre_index, name)
    }

    /// Movies whose original language code equals `language`, ignoring case
    pub fn movies_by_language(&self, language: &str) -> Vec<&Movie> {
        lookup(&self.movies, &self.language_index, language)
    }

    /// Credits rows whose cast lists the actor `name`
    pub fn credits_for_actor(&self, name: &str) -> Vec<&Credits> {
        lookup(&self.credits, &self.actor_index, name)
    }

    /// Credits rows whose crew lists `name` as director
    pub fn credits_for_director(&self, name: &str) -> Vec<&Credits> {
        lookup(&self.credits, &self.director_index, name)
    }

    // Mutators - only used while loading

    /// Append a movie row and index it
    pub fn insert_movie(&mut self, movie: Movie) {
        let row = self.movies.len();

        push_row(self.id_index.entry(movie.id).or_default(), row);
        push_row(
            self.title_index.entry(normalize_key(&movie.title)).or_default(),
            row,
        );
        for genre in &movie.genres {
            push_row(
                self.genre_index.entry(normalize_key(&genre.name)).or_default(),
                row,
            );
        }
        if let Some(language) = &movie.original_language {
            push_row(
                self.language_index.entry(normalize_key(language)).or_default(),
                row,
            );
        }

        self.movies.push(movie);
    }

    /// Append a credits row and index its actors and directors
    pub fn insert_credits(&mut self, credits: Credits) {
        let row = self.credits.len();

        for member in &credits.cast {
            push_row(
                self.actor_index.entry(normalize_key(&member.name)).or_default(),
                row,
            );
        }
        for member in credits.directors() {
            push_row(
                self.director_index.entry(normalize_key(&member.name)).or_default(),
                row,
            );
        }

        self.credits.push(credits);
    }

    /// Table sizes as (movies, credits)
    pub fn counts(&self) -> (usize, usize) {
        (self.movies.len(), self.credits.len())
    }
}

impl Default for DataIndex {
    fn default() -> Self {
        Self::new()
    }
}

/// Key form used by every string index: trimmed and lowercased
pub fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}

// Rows are inserted in ascending order, so checking the tail is enough to
// keep one entry per row (an actor credited twice in the same film, say).
fn push_row(rows: &mut Vec<usize>, row: usize) {
    if rows.last() != Some(&row) {
        rows.push(row);
    }
}

fn lookup<'a, T>(table: &'a [T], index: &HashMap<String, Vec<usize>>, key: &str) -> Vec<&'a T> {
    index
        .get(&normalize_key(key))
        .map(|rows| rows.iter().map(|&row| &table[row]).collect())
        .unwrap_or_default()
}
