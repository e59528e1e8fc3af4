//! Report configuration
//!
//! A YAML file maps each scenario to its three input files:
//!
//! ```yaml
//! output_dir: output
//! scenarios:
//!   - name: hawk dies
//!     population_file: hawkdies/pop.csv
//!     hawk_age_file: hawkdies/hawk.csv
//!     squirrel_age_file: hawkdies/squirrel.csv
//! ```
//!
//! Scenarios are reported in file order. Relative input paths are resolved
//! against the directory holding the config file.

use crate::analytics::chart::slug;
use crate::data::Species;
use crate::error::{ReportError, ReportResult};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Input files for one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub name: String,
    #[serde(alias = "populationFile")]
    pub population_file: PathBuf,
    #[serde(alias = "hawkAgeFile")]
    pub hawk_age_file: PathBuf,
    #[serde(alias = "squirrelAgeFile")]
    pub squirrel_age_file: PathBuf,
}

impl ScenarioConfig {
    /// Scenario whose files live in `dir` as `pop.csv`, `hawk.csv` and `squirrel.csv`
    pub fn in_dir(name: &str, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            name: name.to_string(),
            population_file: dir.join("pop.csv"),
            hawk_age_file: dir.join("hawk.csv"),
            squirrel_age_file: dir.join("squirrel.csv"),
        }
    }

    pub fn age_file(&self, species: Species) -> &Path {
        match species {
            Species::Hawk => &self.hawk_age_file,
            Species::Squirrel => &self.squirrel_age_file,
        }
    }

    fn rebase(&mut self, base: &Path) {
        for path in [
            &mut self.population_file,
            &mut self.hawk_age_file,
            &mut self.squirrel_age_file,
        ] {
            if path.is_relative() {
                *path = base.join(&*path);
            }
        }
    }
}

/// Main report configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Output directory for charts and saved results
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Scenarios in report order
    pub scenarios: Vec<ScenarioConfig>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("output")
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            scenarios: vec![
                ScenarioConfig::in_dir("hawk dies", "hawkdies"),
                ScenarioConfig::in_dir("both die", "bothDies"),
                ScenarioConfig::in_dir("all survive", "all-survive2"),
            ],
        }
    }
}

impl ReportConfig {
    /// Parse a YAML config; paths are left as written.
    pub fn from_yaml_str(yaml: &str) -> ReportResult<Self> {
        let config: ReportConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a YAML config file, resolving relative input paths against its directory.
    pub fn from_yaml_file(path: &Path) -> ReportResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ReportError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => ReportError::Io(e),
        })?;

        let config = Self::from_yaml_str(&contents)?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        Ok(config.with_data_dir(base))
    }

    /// Resolve relative input paths against `dir`.
    pub fn with_data_dir(mut self, dir: impl AsRef<Path>) -> Self {
        for scenario in &mut self.scenarios {
            scenario.rebase(dir.as_ref());
        }
        self
    }

    pub fn validate(&self) -> ReportResult<()> {
        if self.scenarios.is_empty() {
            return Err(ReportError::Config("no scenarios configured".to_string()));
        }

        let mut seen = HashSet::new();
        // Chart pages are named by slug, so names must stay distinct after slugging.
        let mut chart_names: HashMap<String, &str> = HashMap::new();
        for scenario in &self.scenarios {
            let name = scenario.name.trim();
            if name.is_empty() {
                return Err(ReportError::Config("scenario with empty name".to_string()));
            }
            if !seen.insert(name) {
                return Err(ReportError::Config(format!("duplicate scenario `{}`", name)));
            }
            if let Some(other) = chart_names.insert(slug(name), name) {
                return Err(ReportError::Config(format!(
                    "scenarios `{}` and `{}` would share the chart `{}.html`",
                    other,
                    name,
                    slug(name)
                )));
            }
        }
        Ok(())
    }
}
