//! Per-tick population counts
//!
//! The file carries one row per simulation tick with at least `HAWK` and
//! `SQUIRREL` columns. The tick itself is never read from the file: row
//! position (0-based) is the tick.

use super::{column_index, open_csv, parse_number, Species};
use crate::error::{ReportError, ReportResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Counts for a single tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationSample {
    pub tick: usize,
    pub hawk: Option<f64>,
    pub squirrel: Option<f64>,
}

impl PopulationSample {
    pub fn count(&self, species: Species) -> Option<f64> {
        match species {
            Species::Hawk => self.hawk,
            Species::Squirrel => self.squirrel,
        }
    }
}

/// Aggregate counts for one scenario, in tick order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopulationLog {
    pub source: PathBuf,
    pub samples: Vec<PopulationSample>,
}

impl PopulationLog {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn ticks(&self) -> Vec<usize> {
        self.samples.iter().map(|s| s.tick).collect()
    }

    /// Count series for one species, `None` where the cell was not numeric
    pub fn series(&self, species: Species) -> Vec<Option<f64>> {
        self.samples.iter().map(|s| s.count(species)).collect()
    }
}

/// Load the population log at `path` and assign ticks `0..N`.
pub fn load_population_log(path: &Path) -> ReportResult<PopulationLog> {
    let (mut reader, headers) = open_csv(path)?;

    let hawk_idx = require_column(&headers, path, Species::Hawk)?;
    let squirrel_idx = require_column(&headers, path, Species::Squirrel)?;

    let mut samples = Vec::new();
    for (tick, record) in reader.records().enumerate() {
        let record = record?;
        samples.push(PopulationSample {
            tick,
            hawk: parse_number(record.get(hawk_idx)),
            squirrel: parse_number(record.get(squirrel_idx)),
        });
    }

    debug!("Loaded {} ticks from {}", samples.len(), path.display());

    Ok(PopulationLog {
        source: path.to_path_buf(),
        samples,
    })
}

fn require_column(headers: &csv::StringRecord, path: &Path, species: Species) -> ReportResult<usize> {
    column_index(headers, species.column())
        .ok_or_else(|| ReportError::malformed(path, format!("no `{}` column", species.column())))
}
