//! Persistence of the cleaned tables as JSON Lines.
//!
//! One record per line keeps the files streamable and diffable, and lets a
//! decode error point at an exact line.

use crate::error::{DataLoadError, Result};
use crate::parser::display_name;
use crate::types::{Credits, Movie};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// File name of the cleaned movies table
pub const MOVIES_FILE: &str = "movies_dataset.jsonl";
/// File name of the cleaned credits table
pub const CREDITS_FILE: &str = "credits.jsonl";

/// Paths of both cleaned tables inside `dir`
pub fn table_paths(dir: &Path) -> (PathBuf, PathBuf) {
    (dir.join(MOVIES_FILE), dir.join(CREDITS_FILE))
}

/// Write both cleaned tables into `dir`, creating it if needed
pub fn write_tables(dir: &Path, movies: &[Movie], credits: &[Credits]) -> Result<()> {
    fs::create_dir_all(dir)?;
    let (movies_path, credits_path) = table_paths(dir);
    write_jsonl(&movies_path, movies)?;
    write_jsonl(&credits_path, credits)?;
    Ok(())
}

pub fn write_jsonl<T: Serialize>(path: &Path, records: &[T]) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for record in records {
        serde_json::to_writer(&mut writer, record)?;
        writer.write_all(b"\n")?;
    }
    writer.flush()?;
    Ok(())
}

pub fn read_jsonl<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file_name = display_name(path);
    let file = File::open(path).map_err(|_| DataLoadError::FileNotFound {
        path: path.display().to_string(),
    })?;

    let mut records = Vec::new();
    for (idx, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let record = serde_json::from_str(&line).map_err(|e| DataLoadError::ParseError {
            file: file_name.clone(),
            line: idx + 1,
            reason: e.to_string(),
        })?;
        records.push(record);
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CastMember;
    use tempfile::tempdir;

    #[test]
    fn test_credits_survive_a_write_and_read() {
        let dir = tempdir().unwrap();
        let credits = vec![Credits {
            id: 862,
            cast: vec![CastMember {
                name: "Tom Hanks".to_string(),
                character: "Woody (voice)".to_string(),
                ..CastMember::default()
            }],
            crew: vec![],
        }];

        write_tables(&dir.path().join("out"), &[], &credits).unwrap();
        let (movies_path, credits_path) = table_paths(&dir.path().join("out"));

        let movies: Vec<Movie> = read_jsonl(&movies_path).unwrap();
        assert!(movies.is_empty());
        let loaded: Vec<Credits> = read_jsonl(&credits_path).unwrap();
        assert_eq!(loaded, credits);
    }

    #[test]
    fn test_bad_line_reports_its_number() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CREDITS_FILE);
        fs::write(&path, "{\"id\":1,\"cast\":[],\"crew\":[]}\n\n{oops}\n").unwrap();

        match read_jsonl::<Credits>(&path) {
            Err(DataLoadError::ParseError { file, line, .. }) => {
                assert_eq!(file, CREDITS_FILE);
                assert_eq!(line, 3);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
