//! Per-animal logs
//!
//! # CSV format
//!
//! One row per animal that died during the run, as written by the simulator:
//!
//! ```csv
//! Animal,Age,Time of death,Death cause,Total population
//! HAWK,12,301,HUNGER,5120
//! SQUIRREL,3,301,EATEN,5119
//! ```
//!
//! Only `Age` is required. When an `Animal` column exists, rows naming a
//! different species are skipped so a combined log can serve both species.
//! When a `Death cause` column exists, causes are tallied.

use super::{column_index, open_csv, parse_number, Species};
use crate::error::{ReportError, ReportResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

pub const AGE_COLUMN: &str = "Age";
pub const ANIMAL_COLUMN: &str = "Animal";
pub const DEATH_CAUSE_COLUMN: &str = "Death cause";

/// Per-individual records for one species within one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimalLog {
    pub species: Species,
    pub source: PathBuf,
    /// One entry per row; `None` where the age was missing or not numeric
    pub ages: Vec<Option<f64>>,
    /// Death cause tally, keyed by the upper-cased cause
    pub death_causes: BTreeMap<String, u32>,
    /// Rows skipped because they belong to another species
    pub foreign_rows: usize,
}

impl AnimalLog {
    pub fn new(species: Species, source: impl Into<PathBuf>) -> Self {
        Self {
            species,
            source: source.into(),
            ages: Vec::new(),
            death_causes: BTreeMap::new(),
            foreign_rows: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.ages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ages.is_empty()
    }

    /// Number of rows whose age could not be used
    pub fn missing_ages(&self) -> usize {
        self.ages.iter().filter(|a| a.is_none()).count()
    }

    pub fn valid_ages(&self) -> impl Iterator<Item = f64> + '_ {
        self.ages.iter().filter_map(|a| *a)
    }
}

/// Load the animal log at `path`, labelled as `species`.
pub fn load_animal_log(path: &Path, species: Species) -> ReportResult<AnimalLog> {
    let (mut reader, headers) = open_csv(path)?;

    let age_idx = column_index(&headers, AGE_COLUMN)
        .ok_or_else(|| ReportError::malformed(path, format!("no `{}` column", AGE_COLUMN)))?;
    let animal_idx = column_index(&headers, ANIMAL_COLUMN);
    let cause_idx = column_index(&headers, DEATH_CAUSE_COLUMN);

    let mut log = AnimalLog::new(species, path);

    for record in reader.records() {
        let record = record?;

        if let Some(idx) = animal_idx {
            let other = record.get(idx).and_then(Species::from_label);
            if other.is_some_and(|s| s != species) {
                log.foreign_rows += 1;
                continue;
            }
        }

        log.ages.push(parse_number(record.get(age_idx)));

        if let Some(idx) = cause_idx {
            if let Some(cause) = record.get(idx).map(str::trim).filter(|c| !c.is_empty()) {
                *log.death_causes.entry(cause.to_uppercase()).or_insert(0) += 1;
            }
        }
    }

    let missing = log.missing_ages();
    if missing > 0 {
        warn!(
            "{}: {} of {} {} rows have no numeric age and are excluded",
            path.display(),
            missing,
            log.len(),
            species
        );
    }
    debug!(
        "Loaded {} {} rows from {} ({} foreign rows skipped)",
        log.len(),
        species,
        path.display(),
        log.foreign_rows
    );

    Ok(log)
}
