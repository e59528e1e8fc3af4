//! Predator-Prey Scenario Report
//!
//! Loads the population and per-animal logs written by the predator-prey
//! simulator for several experiment scenarios, reports age statistics per
//! scenario and species, and charts the two populations over simulation ticks.

pub mod analytics;
pub mod config;
pub mod data;
pub mod error;
pub mod pipeline;

pub use analytics::{plot_population, report_scenario, summarize_ages, SummaryStatistic};
pub use config::{ReportConfig, ScenarioConfig};
pub use data::{load_animal_log, load_population_log, AnimalLog, PopulationLog, Species};
pub use error::{ReportError, ReportResult};
pub use pipeline::Orchestrator;
