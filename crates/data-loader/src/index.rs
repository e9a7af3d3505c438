//! DataIndex loading and validation.
//!
//! Two ways in:
//! - [`DataIndex::load_from_files`] reads the cleaned JSON Lines tables
//! - [`DataIndex::load_from_csv`] ingests and cleans the raw CSVs in memory
//!
//! Both read the two tables in parallel with `rayon::join`, then index them
//! and run [`DataIndex::validate`].

use crate::clean::{self, CleanReport};
use crate::error::Result;
use crate::parser;
use crate::store;
use crate::types::*;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Integrity findings over the loaded tables.
///
/// Neither finding is fatal: the raw dataset ships with both.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Movie ids that appear on more than one row
    pub duplicate_movie_ids: Vec<MovieId>,
    /// Credits ids with no movie row to join against
    pub orphan_credits: Vec<MovieId>,
}

impl ValidationReport {
    pub fn is_clean(&self) -> bool {
        self.duplicate_movie_ids.is_empty() && self.orphan_credits.is_empty()
    }
}

/// Cleaning outcome for both tables
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub movies: CleanReport,
    pub credits: CleanReport,
}

impl DataIndex {
    /// Load the cleaned tables written by [`store::write_tables`]
    pub fn load_from_files(data_dir: &Path) -> Result<Self> {
        tracing::info!("Loading cleaned dataset from {:?}", data_dir);
        let (movies_path, credits_path) = store::table_paths(data_dir);

        let (movies, credits) = rayon::join(
            || store::read_jsonl::<Movie>(&movies_path),
            || store::read_jsonl::<Credits>(&credits_path),
        );
        let movies = movies?;
        let credits = credits?;

        Ok(Self::build(movies, credits))
    }

    /// Ingest and clean the raw CSVs without touching disk
    pub fn load_from_csv(movies_csv: &Path, credits_csv: &Path) -> Result<(Self, LoadReport)> {
        let (movies, credits, report) = clean_csv_files(movies_csv, credits_csv)?;
        Ok((Self::build(movies, credits), report))
    }

    fn build(movies: Vec<Movie>, credits: Vec<Credits>) -> Self {
        tracing::info!(
            "Loaded {} movies and {} credits rows",
            movies.len(),
            credits.len()
        );

        let index = Self::from_tables(movies, credits);
        let report = index.validate();
        if !report.duplicate_movie_ids.is_empty() {
            tracing::warn!(
                count = report.duplicate_movie_ids.len(),
                "movie ids appear on several rows; lookups use the first"
            );
        }
        if !report.orphan_credits.is_empty() {
            tracing::warn!(
                count = report.orphan_credits.len(),
                "credits rows have no matching movie"
            );
        }
        index
    }

    /// Check the join key between both tables.
    ///
    /// Ids are reported in ascending order, each once.
    pub fn validate(&self) -> ValidationReport {
        let mut duplicate_movie_ids: Vec<MovieId> = self
            .id_index
            .iter()
            .filter(|(_, rows)| rows.len() > 1)
            .map(|(&id, _)| id)
            .collect();
        duplicate_movie_ids.sort_unstable();

        let mut seen = HashSet::new();
        let mut orphan_credits: Vec<MovieId> = self
            .credits
            .iter()
            .map(|row| row.id)
            .filter(|id| !self.id_index.contains_key(id) && seen.insert(*id))
            .collect();
        orphan_credits.sort_unstable();

        ValidationReport {
            duplicate_movie_ids,
            orphan_credits,
        }
    }

    /// Distinct genre names, sorted
    pub fn genre_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .movies
            .iter()
            .flat_map(|movie| movie.genres.iter().map(|genre| genre.name.as_str()))
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        names.sort_unstable();
        names
    }

    /// Movie count per original language, most common first
    pub fn language_counts(&self) -> Vec<(&str, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for movie in &self.movies {
            if let Some(language) = movie.original_language.as_deref() {
                *counts.entry(language).or_insert(0) += 1;
            }
        }
        let mut counts: Vec<_> = counts.into_iter().collect();
        counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        counts
    }
}

/// Read both raw CSVs in parallel and clean them
pub fn clean_csv_files(
    movies_csv: &Path,
    credits_csv: &Path,
) -> Result<(Vec<Movie>, Vec<Credits>, LoadReport)> {
    tracing::info!("Cleaning raw dataset {:?} + {:?}", movies_csv, credits_csv);

    let (raw_movies, raw_credits) = rayon::join(
        || parser::parse_movies_csv(movies_csv),
        || parser::parse_credits_csv(credits_csv),
    );
    let raw_movies = raw_movies?;
    let raw_credits = raw_credits?;

    let ((movies, movies_report), (credits, credits_report)) = rayon::join(
        || clean::clean_movies(raw_movies),
        || clean::clean_credits(raw_credits),
    );

    tracing::info!(
        kept = movies_report.kept,
        dropped_invalid_date = movies_report.dropped_invalid_date,
        dropped_invalid_id = movies_report.dropped_invalid_id,
        "cleaned movies table"
    );
    tracing::info!(
        kept = credits_report.kept,
        dropped_invalid_id = credits_report.dropped_invalid_id,
        "cleaned credits table"
    );

    Ok((
        movies,
        credits,
        LoadReport {
            movies: movies_report,
            credits: credits_report,
        },
    ))
}
