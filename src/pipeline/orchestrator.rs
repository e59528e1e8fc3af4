//! Report Orchestrator
//!
//! Drives the load -> summarize -> report -> plot sequence over the
//! configured scenarios, one scenario at a time.

use crate::analytics::{
    chart::plot_population,
    report::{report_scenario, write_scenario_report},
    stats::{summarize_population, PopulationSummary, SpeciesSummary},
};
use crate::config::{ReportConfig, ScenarioConfig};
use crate::data::{load_animal_log, load_population_log, PopulationLog, Species};
use crate::error::ReportResult;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Results of a complete report run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportResults {
    /// RFC 3339 timestamp of the run
    pub generated_at: String,
    /// Per-scenario results, in configured order
    pub scenarios: Vec<ScenarioResult>,
}

/// Everything derived for one scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    /// Age statistics, hawk first
    pub species: Vec<SpeciesSummary>,
    pub population: PopulationLog,
    pub population_summary: PopulationSummary,
    /// Written chart page, if charts were rendered
    pub chart: Option<PathBuf>,
}

/// Main report orchestrator
pub struct Orchestrator {
    config: ReportConfig,
    /// Render population charts
    charts: bool,
}

impl Orchestrator {
    /// Create a new orchestrator with the given configuration
    pub fn new(config: ReportConfig) -> Self {
        Self {
            config,
            charts: true,
        }
    }

    /// Enable or disable chart rendering
    pub fn with_charts(mut self, charts: bool) -> Self {
        self.charts = charts;
        self
    }

    /// Run every configured scenario, writing the console report to `out`.
    ///
    /// The first load failure aborts the run. Output already written for
    /// earlier scenarios stays in place.
    pub fn run<W: Write>(&self, out: &mut W) -> ReportResult<ReportResults> {
        self.config.validate()?;

        info!("Starting scenario report...");
        info!("Scenarios: {}", self.config.scenarios.len());

        let mut scenarios = Vec::with_capacity(self.config.scenarios.len());
        for scenario in &self.config.scenarios {
            scenarios.push(self.run_scenario(scenario, out)?);
        }

        info!("Report complete!");

        Ok(ReportResults {
            generated_at: chrono::Utc::now().to_rfc3339(),
            scenarios,
        })
    }

    /// Load, report and plot one scenario
    fn run_scenario<W: Write>(&self, scenario: &ScenarioConfig, out: &mut W) -> ReportResult<ScenarioResult> {
        info!("Scenario: {}", scenario.name);

        // Everything is loaded before anything is printed, so a bad file
        // leaves no partial report for this scenario.
        let logs = Species::ALL
            .into_iter()
            .map(|species| load_animal_log(scenario.age_file(species), species))
            .collect::<ReportResult<Vec<_>>>()?;
        let population = load_population_log(&scenario.population_file)?;

        let species = report_scenario(out, &scenario.name, &logs)?;
        drop(logs);

        let population_summary = summarize_population(&population);
        debug!("{} population over {} ticks", scenario.name, population_summary.ticks);

        let chart = self.plot(&scenario.name, &population)?;

        Ok(ScenarioResult {
            name: scenario.name.clone(),
            species,
            population,
            population_summary,
            chart,
        })
    }

    fn plot(&self, name: &str, population: &PopulationLog) -> ReportResult<Option<PathBuf>> {
        if !self.charts {
            return Ok(None);
        }
        plot_population(name, population, &self.config.output_dir).map(Some)
    }
}

/// Re-emit the console report and charts from previously saved results.
pub fn replay<W: Write>(
    results: &ReportResults,
    out: &mut W,
    chart_dir: Option<&Path>,
) -> ReportResult<Vec<PathBuf>> {
    let mut charts = Vec::new();
    for scenario in &results.scenarios {
        write_scenario_report(out, &scenario.name, &scenario.species)?;
        if let Some(dir) = chart_dir {
            charts.push(plot_population(&scenario.name, &scenario.population, dir)?);
        }
    }
    Ok(charts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use std::fs;

    /// Write a scenario's three files into `dir/<sub>` and return its config.
    fn scenario(dir: &Path, name: &str, sub: &str) -> ScenarioConfig {
        let sub_dir = dir.join(sub);
        fs::create_dir_all(&sub_dir).unwrap();
        fs::write(sub_dir.join("hawk.csv"), "Animal,Age,Death cause\nHAWK,10,AGE\nHAWK,20,HUNGER\nHAWK,30,AGE\n").unwrap();
        fs::write(sub_dir.join("squirrel.csv"), "Animal,Age\nSQUIRREL,1\nSQUIRREL,\nSQUIRREL,3\n").unwrap();
        fs::write(sub_dir.join("pop.csv"), "HAWK,SQUIRREL\n4,100\n2,120\n0,150\n").unwrap();
        ScenarioConfig::in_dir(name, sub_dir)
    }

    fn config(dir: &Path, scenarios: Vec<ScenarioConfig>) -> ReportConfig {
        ReportConfig {
            output_dir: dir.join("output"),
            scenarios,
        }
    }

    fn snapshot(dir: &Path) -> Vec<(PathBuf, Vec<u8>)> {
        let mut files = Vec::new();
        for entry in fs::read_dir(dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                files.extend(snapshot(&path));
            } else {
                files.push((path.clone(), fs::read(&path).unwrap()));
            }
        }
        files.sort();
        files
    }

    #[test]
    fn test_full_run() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(
            dir.path(),
            vec![
                scenario(dir.path(), "hawk dies", "hawkdies"),
                scenario(dir.path(), "all survive", "allsurvive"),
            ],
        );

        let mut out: Vec<u8> = Vec::new();
        let results = Orchestrator::new(config).run(&mut out).unwrap();

        assert_eq!(results.scenarios.len(), 2);
        let first = &results.scenarios[0];
        assert_eq!(first.name, "hawk dies");
        assert_eq!(first.species[0].species, Species::Hawk);
        assert_eq!(first.species[0].ages.mean, 20.0);
        assert_eq!(first.species[1].ages.mean, 2.0);
        assert_eq!(first.species[1].ages.missing, 1);
        assert_eq!(first.population.ticks(), vec![0, 1, 2]);
        assert_eq!(first.population_summary.hawk.extinction_tick, Some(2));
        assert!(first.chart.as_ref().unwrap().exists());

        let text = String::from_utf8(out).unwrap();
        let headers: Vec<&str> = text.lines().filter(|l| l.ends_with("mean and avg")).collect();
        assert_eq!(headers, vec!["hawk dies mean and avg", "all survive mean and avg"]);
        assert!(text.contains("Age avg: 20\n"));
    }

    #[test]
    fn test_inputs_are_never_written() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data");
        let config = ReportConfig {
            output_dir: dir.path().join("output"),
            scenarios: vec![scenario(&data_dir, "both die", "bothDies")],
        };

        let before = snapshot(&data_dir);
        Orchestrator::new(config).run(&mut Vec::<u8>::new()).unwrap();
        assert_eq!(snapshot(&data_dir), before);
    }

    #[test]
    fn test_failure_aborts_after_earlier_output() {
        let dir = tempfile::tempdir().unwrap();
        let good = scenario(dir.path(), "hawk dies", "hawkdies");
        let bad = scenario(dir.path(), "both die", "bothDies");
        fs::write(&bad.population_file, "SQUIRREL\n10\n").unwrap();
        let config = config(dir.path(), vec![good, bad]);

        let mut out: Vec<u8> = Vec::new();
        let err = Orchestrator::new(config).with_charts(false).run(&mut out).unwrap_err();
        assert!(matches!(err, ReportError::MalformedInput { .. }));

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("hawk dies mean and avg"));
        assert!(!text.contains("both die"));
    }

    #[test]
    fn test_names_sharing_a_chart_are_rejected_before_output() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(
            dir.path(),
            vec![
                scenario(dir.path(), "hawk dies", "first"),
                scenario(dir.path(), "Hawk-Dies", "second"),
            ],
        );

        let mut out: Vec<u8> = Vec::new();
        let err = Orchestrator::new(config).run(&mut out).unwrap_err();
        assert!(matches!(err, ReportError::Config(_)));
        assert!(out.is_empty());
        assert!(!dir.path().join("output").exists());
    }

    #[test]
    fn test_missing_file_aborts() {
        let dir = tempfile::tempdir().unwrap();
        let mut bad = scenario(dir.path(), "hawk dies", "hawkdies");
        bad.hawk_age_file = dir.path().join("missing.csv");

        let err = Orchestrator::new(config(dir.path(), vec![bad]))
            .run(&mut Vec::<u8>::new())
            .unwrap_err();
        assert!(matches!(err, ReportError::FileNotFound { .. }));
    }

    #[test]
    fn test_without_charts() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), vec![scenario(dir.path(), "hawk dies", "hawkdies")]);

        let results = Orchestrator::new(config).with_charts(false).run(&mut Vec::<u8>::new()).unwrap();
        assert!(results.scenarios[0].chart.is_none());
        assert!(!dir.path().join("output").exists());
    }

    #[test]
    fn test_replay_matches_run() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path(), vec![scenario(dir.path(), "hawk dies", "hawkdies")]);

        let mut first: Vec<u8> = Vec::new();
        let results = Orchestrator::new(config).with_charts(false).run(&mut first).unwrap();

        let mut second: Vec<u8> = Vec::new();
        let charts = replay(&results, &mut second, Some(&dir.path().join("replayed"))).unwrap();
        assert_eq!(first, second);
        assert_eq!(charts.len(), 1);
        assert!(charts[0].exists());
    }
}
