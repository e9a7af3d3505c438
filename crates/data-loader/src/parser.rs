//! Raw CSV ingestion for `movies_metadata.csv` and `credits.csv`.
//!
//! Every column is read as an optional string: the raw dataset mixes numbers,
//! dates and stringified literals in ways that only the cleaning step knows
//! how to interpret. Rows the CSV reader cannot decode at all (broken quoting,
//! invalid UTF-8) are skipped and counted instead of aborting the load.

use crate::error::{DataLoadError, Result};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::path::Path;

/// One untyped row of `movies_metadata.csv`.
///
/// Only the columns the cleaning step keeps are listed; `video`, `imdb_id`,
/// `adult`, `original_title`, `poster_path` and `homepage` are ignored here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawMovieRow {
    pub id: Option<String>,
    pub title: Option<String>,
    pub original_language: Option<String>,
    pub overview: Option<String>,
    pub tagline: Option<String>,
    pub status: Option<String>,
    pub belongs_to_collection: Option<String>,
    pub genres: Option<String>,
    pub production_companies: Option<String>,
    pub production_countries: Option<String>,
    pub spoken_languages: Option<String>,
    pub budget: Option<String>,
    pub revenue: Option<String>,
    pub popularity: Option<String>,
    pub runtime: Option<String>,
    pub vote_average: Option<String>,
    pub vote_count: Option<String>,
    pub release_date: Option<String>,
}

/// One untyped row of `credits.csv`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawCreditsRow {
    pub cast: Option<String>,
    pub crew: Option<String>,
    pub id: Option<String>,
}

/// Rows read from a CSV plus the number of undecodable rows skipped
#[derive(Debug, Clone)]
pub struct RawTable<T> {
    pub rows: Vec<T>,
    pub skipped: usize,
}

/// Parse `movies_metadata.csv`
pub fn parse_movies_csv(path: &Path) -> Result<RawTable<RawMovieRow>> {
    read_csv(path)
}

/// Parse `credits.csv`
pub fn parse_credits_csv(path: &Path) -> Result<RawTable<RawCreditsRow>> {
    read_csv(path)
}

fn read_csv<T: DeserializeOwned>(path: &Path) -> Result<RawTable<T>> {
    let file_name = display_name(path);
    let file = File::open(path).map_err(|_| DataLoadError::FileNotFound {
        path: path.display().to_string(),
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    // Force the header row now so a file with unusable headers fails loudly
    let headers = reader
        .headers()
        .map_err(|source| DataLoadError::CsvError {
            file: file_name.clone(),
            source,
        })?
        .clone();

    let mut rows = Vec::new();
    let mut skipped = 0;
    for (idx, result) in reader.records().enumerate() {
        // Short rows are padded so columns missing at the end read as empty,
        // including columns the row type does not declare.
        let decoded = result.and_then(|mut record| {
            while record.len() < headers.len() {
                record.push_field("");
            }
            record.deserialize::<T>(Some(&headers))
        });
        match decoded {
            Ok(row) => rows.push(row),
            Err(err) => {
                // +2: one for the header, one for 1-based numbering
                tracing::debug!(file = %file_name, record = idx + 2, %err, "skipping undecodable row");
                skipped += 1;
            }
        }
    }

    if skipped > 0 {
        tracing::warn!(file = %file_name, skipped, "skipped undecodable CSV rows");
    }
    Ok(RawTable { rows, skipped })
}

pub(crate) fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_movies_csv_reads_quoted_fields() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "adult,budget,genres,id,overview,title,release_date").unwrap();
        writeln!(
            file,
            "False,30000000,\"[{{'id': 16, 'name': 'Animation'}}]\",862,\"Led by Woody,\nAndy's toys live happily.\",Toy Story,1995-10-30"
        )
        .unwrap();
        writeln!(file, "False,,[],863,,,").unwrap();

        let table = parse_movies_csv(file.path()).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.skipped, 0);

        let first = &table.rows[0];
        assert_eq!(first.id.as_deref(), Some("862"));
        assert_eq!(first.genres.as_deref(), Some("[{'id': 16, 'name': 'Animation'}]"));
        assert!(first.overview.as_deref().unwrap().contains('\n'));
        // columns absent from the header stay None
        assert!(first.vote_count.is_none());

        let second = &table.rows[1];
        assert!(second.budget.is_none());
        assert!(second.title.is_none());
    }

    #[test]
    fn test_short_rows_are_tolerated() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "cast,crew,id").unwrap();
        writeln!(file, "[],[],1").unwrap();
        writeln!(file, "[]").unwrap();

        let table = parse_credits_csv(file.path()).unwrap();
        assert_eq!(table.rows.len(), 2);
        assert!(table.rows[1].id.is_none());
    }

    #[test]
    fn test_short_row_ending_before_ignored_column() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "id,title,release_date,video,imdb_id").unwrap();
        writeln!(file, "1,A,1995-01-01,False,tt0000001").unwrap();
        writeln!(file, "2,B,1995-01-02").unwrap();
        writeln!(file, "- Written by Ørnås").unwrap();

        let table = parse_movies_csv(file.path()).unwrap();
        assert_eq!(table.skipped, 0);
        assert_eq!(table.rows.len(), 3);

        let short = &table.rows[1];
        assert_eq!(short.id.as_deref(), Some("2"));
        assert_eq!(short.release_date.as_deref(), Some("1995-01-02"));

        let shifted = &table.rows[2];
        assert_eq!(shifted.id.as_deref(), Some("- Written by Ørnås"));
        assert!(shifted.title.is_none());
    }

    #[test]
    fn test_long_rows_ignore_extra_fields() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "cast,crew,id").unwrap();
        writeln!(file, "[],[],7,extra,fields").unwrap();

        let table = parse_credits_csv(file.path()).unwrap();
        assert_eq!(table.skipped, 0);
        assert_eq!(table.rows[0].id.as_deref(), Some("7"));
    }

    #[test]
    fn test_missing_file() {
        let result = parse_credits_csv(Path::new("does/not/exist.csv"));
        assert!(matches!(result, Err(DataLoadError::FileNotFound { .. })));
    }
}
