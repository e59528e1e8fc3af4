//! Console report

use crate::analytics::stats::{PopulationSummary, SpeciesSummary, SpeciesTrend};
use crate::data::{AnimalLog, Species};
use crate::pipeline::ReportResults;
use std::fmt;
use std::io::{self, Write};

/// Summarize each log and print the scenario's age statistics to `out`.
///
/// Species are reported in slice order. Returns the computed summaries.
pub fn report_scenario<W: Write>(
    out: &mut W,
    scenario_name: &str,
    logs: &[AnimalLog],
) -> io::Result<Vec<SpeciesSummary>> {
    let summaries: Vec<SpeciesSummary> = logs.iter().map(SpeciesSummary::from_log).collect();
    write_scenario_report(out, scenario_name, &summaries)?;
    Ok(summaries)
}

/// Print already computed summaries in the console report format.
pub fn write_scenario_report<W: Write>(
    out: &mut W,
    scenario_name: &str,
    summaries: &[SpeciesSummary],
) -> io::Result<()> {
    writeln!(out, "{} mean and avg", scenario_name)?;
    for summary in summaries {
        writeln!(out, "animal {}", summary.species)?;
        writeln!(out, "Age std: {}", summary.ages.stddev)?;
        writeln!(out, "Age avg: {}", summary.ages.mean)?;
        if summary.ages.missing > 0 {
            writeln!(out, "Excluded rows: {}", summary.ages.missing)?;
        }
    }
    Ok(())
}

/// Format results as a text summary
pub fn format_summary(results: &ReportResults) -> String {
    let mut text = String::new();
    // Writing into a String cannot fail.
    let _ = write_summary(&mut text, results);
    text
}

fn write_summary(text: &mut String, results: &ReportResults) -> fmt::Result {
    use std::fmt::Write as _;

    writeln!(text, "SCENARIO REPORT")?;
    writeln!(text, "Generated: {}", results.generated_at)?;

    for scenario in &results.scenarios {
        writeln!(text)?;
        writeln!(text, "== {} ==", scenario.name)?;

        for summary in &scenario.species {
            write_species(text, summary)?;
        }
        write_population(text, &scenario.population_summary)?;
    }
    Ok(())
}

fn write_species(text: &mut String, summary: &SpeciesSummary) -> fmt::Result {
    use std::fmt::Write as _;

    let a = &summary.ages;
    write!(
        text,
        "  {}\n    Age avg:        {:>12.4}\n    Age std:        {:>12.4}\n    Rows used:      {:>12}\n    Rows excluded:  {:>12}\n",
        summary.species, a.mean, a.stddev, a.count, a.missing
    )?;

    if !summary.death_causes.is_empty() {
        let causes: Vec<String> = summary
            .death_causes
            .iter()
            .map(|(cause, n)| format!("{}={}", cause, n))
            .collect();
        writeln!(text, "    Death causes:   {}", causes.join(", "))?;
    }
    Ok(())
}

fn write_population(text: &mut String, summary: &PopulationSummary) -> fmt::Result {
    use std::fmt::Write as _;

    writeln!(text, "  population over {} ticks", summary.ticks)?;
    for species in Species::ALL {
        writeln!(
            text,
            "    {:<9} {}",
            species.column(),
            describe_trend(summary.trend(species))
        )?;
    }
    Ok(())
}

pub(crate) fn describe_trend(trend: &SpeciesTrend) -> String {
    let count = |v: Option<f64>| v.map_or_else(|| "-".to_string(), |v| v.to_string());
    let peak_at = trend
        .peak_tick
        .map(|tick| format!(" (peak at tick {})", tick))
        .unwrap_or_default();
    let extinct_at = trend
        .extinction_tick
        .map(|tick| format!(", extinct at tick {}", tick))
        .unwrap_or_default();

    format!(
        "start {} / peak {} / end {}{}{}",
        count(trend.initial),
        count(trend.peak),
        count(trend.final_count),
        peak_at,
        extinct_at
    )
}
