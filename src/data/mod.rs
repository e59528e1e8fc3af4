//! Loading of simulation output tables
//!
//! Both table kinds are comma-separated with a header row. The file handle
//! lives only for the duration of a load call.

pub mod animal_log;
pub mod population_log;
pub mod species;

pub use animal_log::{load_animal_log, AnimalLog};
pub use population_log::{load_population_log, PopulationLog, PopulationSample};
pub use species::Species;

use crate::error::{ReportError, ReportResult};
use csv::{ReaderBuilder, StringRecord, Trim};
use std::fs::File;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Open `path` as a header-carrying CSV reader and return it with its header row.
pub(crate) fn open_csv(path: &Path) -> ReportResult<(csv::Reader<File>, StringRecord)> {
    if path.is_dir() {
        return Err(not_found(path));
    }

    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => not_found(path),
        _ => ReportError::Io(e),
    })?;

    // The simulator's writer does not pad short rows.
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::Headers)
        .from_reader(file);

    let headers = reader.headers()?.clone();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(ReportError::malformed(path, "missing header row"));
    }

    Ok((reader, headers))
}

pub(crate) fn column_index(headers: &StringRecord, name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

/// Parse a numeric cell; empty, unparsable and NaN cells are missing.
pub(crate) fn parse_number(field: Option<&str>) -> Option<f64> {
    let field = field?.trim();
    if field.is_empty() {
        return None;
    }
    field.parse::<f64>().ok().filter(|v| !v.is_nan())
}

fn not_found(path: &Path) -> ReportError {
    ReportError::FileNotFound {
        path: PathBuf::from(path),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number(Some("12")), Some(12.0));
        assert_eq!(parse_number(Some(" 3.5 ")), Some(3.5));
        assert_eq!(parse_number(Some("")), None);
        assert_eq!(parse_number(Some("n/a")), None);
        assert_eq!(parse_number(Some("NaN")), None);
        assert_eq!(parse_number(None), None);
    }

    #[test]
    fn test_open_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            open_csv(&dir.path().join("nope.csv")),
            Err(ReportError::FileNotFound { .. })
        ));
        assert!(matches!(open_csv(dir.path()), Err(ReportError::FileNotFound { .. })));
    }

    #[test]
    fn test_open_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");
        std::fs::write(&path, "").unwrap();

        assert!(matches!(open_csv(&path), Err(ReportError::MalformedInput { .. })));
    }
}
