//! Persistence of report results

use crate::analytics::report::format_summary;
use crate::error::{ReportError, ReportResult};
use crate::pipeline::ReportResults;
use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Handles saving report results under an output directory
pub struct ReportLogger {
    output_dir: PathBuf,
}

impl ReportLogger {
    /// Create a new logger with the specified output directory
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    fn logs_dir(&self) -> PathBuf {
        self.output_dir.join("logs")
    }

    /// Save results to a timestamped JSON file
    pub fn save_results(&self, results: &ReportResults) -> ReportResult<PathBuf> {
        let json = serde_json::to_string_pretty(results)?;
        let path = self.write_timestamped("report", "json", json.as_bytes())?;

        info!("Results saved to: {}", path.display());
        Ok(path)
    }

    /// Load results from a JSON file
    pub fn load_results(path: &Path) -> ReportResult<ReportResults> {
        let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ReportError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => ReportError::Io(e),
        })?;

        Ok(serde_json::from_str(&contents)?)
    }

    /// Save a text summary next to the JSON results
    pub fn save_summary(&self, results: &ReportResults) -> ReportResult<PathBuf> {
        let summary = format_summary(results);
        let path = self.write_timestamped("summary", "txt", summary.as_bytes())?;

        info!("Summary saved to: {}", path.display());
        Ok(path)
    }

    fn write_timestamped(&self, stem: &str, ext: &str, contents: &[u8]) -> ReportResult<PathBuf> {
        let dir = self.logs_dir();
        fs::create_dir_all(&dir)?;

        let timestamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
        let path = dir.join(format!("{}_{}.{}", stem, timestamp, ext));

        let mut file = File::create(&path)?;
        file.write_all(contents)?;
        Ok(path)
    }
}
