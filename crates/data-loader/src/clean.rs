//! Cleaning: turn raw CSV rows into typed [`Movie`] and [`Credits`] records.
//!
//! Movies:
//! 1. Coerce `budget`, `popularity`, `revenue`, `runtime`, `vote_average` and
//!    `vote_count` to numbers, filling anything missing or malformed with 0
//! 2. Parse `release_date`; rows without a valid date are dropped
//! 3. Derive `release_year` and `return` (revenue / budget, 0 without budget)
//! 4. Drop rows whose `id` is not an integer, since they can never join
//! 5. Unnest the list-of-dict columns through [`crate::literal`]
//!
//! Credits only need a valid id and the `cast`/`crew` columns unnested.
//!
//! Rows are cleaned in parallel with Rayon; `collect` on an indexed parallel
//! iterator keeps the input order, so the output tables stay in file order.

use crate::literal::{parse_nested_list, parse_nested_record};
use crate::parser::{RawCreditsRow, RawMovieRow, RawTable};
use crate::types::{Credits, Movie, MovieId};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use rayon::prelude::*;
use serde::Serialize;

/// Why a raw row did not make it into a cleaned table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropReason {
    InvalidReleaseDate,
    InvalidId,
}

/// Row accounting for one cleaned table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CleanReport {
    /// Rows the CSV reader produced
    pub rows_read: usize,
    /// Rows the CSV reader could not decode at all
    pub undecodable: usize,
    pub kept: usize,
    pub dropped_invalid_date: usize,
    pub dropped_invalid_id: usize,
}

impl CleanReport {
    fn record(&mut self, reason: DropReason) {
        match reason {
            DropReason::InvalidReleaseDate => self.dropped_invalid_date += 1,
            DropReason::InvalidId => self.dropped_invalid_id += 1,
        }
    }
}

/// Clean the whole movies table
pub fn clean_movies(raw: RawTable<RawMovieRow>) -> (Vec<Movie>, CleanReport) {
    let cleaned: Vec<_> = raw.rows.into_par_iter().map(clean_movie_row).collect();
    collect_table(cleaned, raw.skipped)
}

/// Clean the whole credits table
pub fn clean_credits(raw: RawTable<RawCreditsRow>) -> (Vec<Credits>, CleanReport) {
    let cleaned: Vec<_> = raw.rows.into_par_iter().map(clean_credits_row).collect();
    collect_table(cleaned, raw.skipped)
}

fn collect_table<T>(
    cleaned: Vec<Result<T, DropReason>>,
    undecodable: usize,
) -> (Vec<T>, CleanReport) {
    let mut report = CleanReport {
        rows_read: cleaned.len(),
        undecodable,
        ..CleanReport::default()
    };

    let mut rows = Vec::with_capacity(cleaned.len());
    for result in cleaned {
        match result {
            Ok(row) => rows.push(row),
            Err(reason) => report.record(reason),
        }
    }
    report.kept = rows.len();
    (rows, report)
}

/// Clean a single `movies_metadata` row
pub fn clean_movie_row(row: RawMovieRow) -> Result<Movie, DropReason> {
    let release_date =
        parse_release_date(row.release_date.as_deref()).ok_or(DropReason::InvalidReleaseDate)?;
    let id = parse_id(row.id.as_deref()).ok_or(DropReason::InvalidId)?;

    let budget = coerce_number(row.budget.as_deref());
    let revenue = coerce_number(row.revenue.as_deref());

    Ok(Movie {
        id,
        title: row.title.unwrap_or_default(),
        original_language: non_blank(row.original_language),
        overview: non_blank(row.overview),
        tagline: non_blank(row.tagline),
        status: non_blank(row.status),
        belongs_to_collection: parse_nested_record(row.belongs_to_collection.as_deref()),
        genres: parse_nested_list(row.genres.as_deref()),
        production_companies: parse_nested_list(row.production_companies.as_deref()),
        production_countries: parse_nested_list(row.production_countries.as_deref()),
        spoken_languages: parse_nested_list(row.spoken_languages.as_deref()),
        budget,
        revenue,
        popularity: coerce_number(row.popularity.as_deref()),
        runtime: coerce_number(row.runtime.as_deref()),
        vote_average: coerce_number(row.vote_average.as_deref()),
        vote_count: coerce_count(row.vote_count.as_deref()),
        release_year: release_date.year(),
        release_date,
        return_ratio: compute_return(revenue, budget),
    })
}

/// Clean a single `credits` row
pub fn clean_credits_row(row: RawCreditsRow) -> Result<Credits, DropReason> {
    let id = parse_id(row.id.as_deref()).ok_or(DropReason::InvalidId)?;
    Ok(Credits {
        id,
        cast: parse_nested_list(row.cast.as_deref()),
        crew: parse_nested_list(row.crew.as_deref()),
    })
}

/// Numeric coercion: anything missing, malformed or non-finite becomes 0
pub fn coerce_number(raw: Option<&str>) -> f64 {
    raw.and_then(|text| text.trim().parse::<f64>().ok())
        .filter(|n| n.is_finite())
        .unwrap_or(0.0)
}

fn coerce_count(raw: Option<&str>) -> u32 {
    let n = coerce_number(raw);
    if n > 0.0 { n.round() as u32 } else { 0 }
}

/// `revenue / budget` when there is a budget, 0 otherwise
pub fn compute_return(revenue: f64, budget: f64) -> f64 {
    if budget > 0.0 { revenue / budget } else { 0.0 }
}

/// Accepts `YYYY-MM-DD`, the same with a time part, or `DD/MM/YYYY`
pub fn parse_release_date(raw: Option<&str>) -> Option<NaiveDate> {
    let text = raw?.trim();

    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        return Some(date);
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(text, format) {
            return Some(datetime.date());
        }
    }
    NaiveDate::parse_from_str(text, "%d/%m/%Y").ok()
}

fn parse_id(raw: Option<&str>) -> Option<MovieId> {
    raw?.trim().parse().ok()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}
