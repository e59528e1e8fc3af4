//! Summary statistics over loaded logs

use crate::data::{AnimalLog, PopulationLog, Species};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Running mean / variance (Welford)
#[derive(Debug, Default)]
pub struct Accumulator {
    n_vals: usize,
    mean: f64,
    diff_2_sum: f64,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, val: f64) {
        self.n_vals += 1;

        let diff_a = val - self.mean;
        self.mean += diff_a / self.n_vals as f64;

        let diff_b = val - self.mean;
        self.diff_2_sum += diff_a * diff_b;
    }

    pub fn count(&self) -> usize {
        self.n_vals
    }

    pub fn mean(&self) -> f64 {
        if self.n_vals > 0 {
            self.mean
        } else {
            f64::NAN
        }
    }

    /// Sample standard deviation (N-1 denominator)
    pub fn std_dev(&self) -> f64 {
        if self.n_vals > 1 {
            (self.diff_2_sum / (self.n_vals as f64 - 1.0)).sqrt()
        } else {
            f64::NAN
        }
    }
}

/// Mean and sample standard deviation of an `Age` column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistic {
    #[serde(with = "nan_as_null")]
    pub mean: f64,
    #[serde(with = "nan_as_null")]
    pub stddev: f64,
    /// Values that contributed
    pub count: usize,
    /// Rows excluded for lack of a numeric value
    pub missing: usize,
}

/// Compute mean and sample standard deviation over the log's ages,
/// ignoring missing values.
///
/// With fewer than two values `stddev` is NaN; with none, `mean` is NaN too.
pub fn summarize_ages(log: &AnimalLog) -> SummaryStatistic {
    let mut acc = Accumulator::new();
    for age in log.valid_ages() {
        acc.add(age);
    }

    SummaryStatistic {
        mean: acc.mean(),
        stddev: acc.std_dev(),
        count: acc.count(),
        missing: log.missing_ages(),
    }
}

/// Everything reported for one species in one scenario
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesSummary {
    pub species: Species,
    pub ages: SummaryStatistic,
    pub death_causes: BTreeMap<String, u32>,
    pub foreign_rows: usize,
}

impl SpeciesSummary {
    pub fn from_log(log: &AnimalLog) -> Self {
        Self {
            species: log.species,
            ages: summarize_ages(log),
            death_causes: log.death_causes.clone(),
            foreign_rows: log.foreign_rows,
        }
    }
}

/// Shape of one species' population curve
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpeciesTrend {
    pub initial: Option<f64>,
    #[serde(rename = "final")]
    pub final_count: Option<f64>,
    pub peak: Option<f64>,
    pub peak_tick: Option<usize>,
    /// First tick at which the count reached zero
    pub extinction_tick: Option<usize>,
}

impl SpeciesTrend {
    fn from_series(log: &PopulationLog, species: Species) -> Self {
        let mut trend = SpeciesTrend::default();

        for sample in &log.samples {
            let Some(count) = sample.count(species) else {
                continue;
            };

            if trend.initial.is_none() {
                trend.initial = Some(count);
            }
            trend.final_count = Some(count);

            if trend.peak.map_or(true, |p| count > p) {
                trend.peak = Some(count);
                trend.peak_tick = Some(sample.tick);
            }
            if trend.extinction_tick.is_none() && count <= 0.0 {
                trend.extinction_tick = Some(sample.tick);
            }
        }

        trend
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopulationSummary {
    pub ticks: usize,
    pub hawk: SpeciesTrend,
    pub squirrel: SpeciesTrend,
}

impl PopulationSummary {
    pub fn trend(&self, species: Species) -> &SpeciesTrend {
        match species {
            Species::Hawk => &self.hawk,
            Species::Squirrel => &self.squirrel,
        }
    }
}

pub fn summarize_population(log: &PopulationLog) -> PopulationSummary {
    PopulationSummary {
        ticks: log.len(),
        hawk: SpeciesTrend::from_series(log, Species::Hawk),
        squirrel: SpeciesTrend::from_series(log, Species::Squirrel),
    }
}

/// JSON has no NaN; store undefined statistics as `null`.
mod nan_as_null {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_nan() {
            serializer.serialize_none()
        } else {
            serializer.serialize_f64(*value)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::PopulationSample;

    fn log_with(ages: Vec<Option<f64>>) -> AnimalLog {
        let mut log = AnimalLog::new(Species::Hawk, "hawk.csv");
        log.ages = ages;
        log
    }

    #[test]
    fn test_mean_and_sample_stddev() {
        let stat = summarize_ages(&log_with(vec![Some(10.0), Some(20.0), Some(30.0)]));
        assert!((stat.mean - 20.0).abs() < 1e-12);
        assert!((stat.stddev - 10.0).abs() < 1e-12);
        assert_eq!(stat.count, 3);
        assert_eq!(stat.missing, 0);
    }

    #[test]
    fn test_missing_values_are_excluded() {
        let stat = summarize_ages(&log_with(vec![Some(10.0), None, Some(30.0)]));
        assert!((stat.mean - 20.0).abs() < 1e-12);
        assert_eq!(stat.count, 2);
        assert_eq!(stat.missing, 1);
    }

    #[test]
    fn test_single_value() {
        let stat = summarize_ages(&log_with(vec![Some(7.0)]));
        assert_eq!(stat.mean, 7.0);
        assert!(stat.stddev.is_nan());
    }

    #[test]
    fn test_no_values() {
        let stat = summarize_ages(&log_with(vec![None, None]));
        assert!(stat.mean.is_nan());
        assert!(stat.stddev.is_nan());
        assert_eq!(stat.missing, 2);
    }

    #[test]
    fn test_nan_survives_json() {
        let stat = summarize_ages(&log_with(vec![Some(7.0)]));
        let json = serde_json::to_string(&stat).unwrap();
        assert!(json.contains("\"stddev\":null"));

        let back: SummaryStatistic = serde_json::from_str(&json).unwrap();
        assert_eq!(back.mean, 7.0);
        assert!(back.stddev.is_nan());
    }

    #[test]
    fn test_population_trend() {
        let counts = [(Some(4.0), Some(100.0)), (Some(6.0), None), (Some(0.0), Some(150.0)), (Some(0.0), Some(140.0))];
        let log = PopulationLog {
            source: "pop.csv".into(),
            samples: counts
                .iter()
                .enumerate()
                .map(|(tick, &(hawk, squirrel))| PopulationSample { tick, hawk, squirrel })
                .collect(),
        };

        let summary = summarize_population(&log);
        assert_eq!(summary.ticks, 4);
        assert_eq!(summary.hawk.initial, Some(4.0));
        assert_eq!(summary.hawk.peak, Some(6.0));
        assert_eq!(summary.hawk.peak_tick, Some(1));
        assert_eq!(summary.hawk.extinction_tick, Some(2));
        assert_eq!(summary.hawk.final_count, Some(0.0));
        assert_eq!(summary.squirrel.peak_tick, Some(2));
        assert_eq!(summary.squirrel.final_count, Some(140.0));
        assert_eq!(summary.squirrel.extinction_tick, None);
    }
}
