//! Statistics, console reporting, charts and result persistence

pub mod chart;
pub mod logger;
pub mod report;
pub mod stats;

pub use chart::plot_population;
pub use logger::ReportLogger;
pub use report::{report_scenario, write_scenario_report};
pub use stats::{summarize_ages, summarize_population, SpeciesSummary, SummaryStatistic};
