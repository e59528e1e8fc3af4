//! Report pipeline

pub mod orchestrator;

pub use orchestrator::{replay, Orchestrator, ReportResults, ScenarioResult};
