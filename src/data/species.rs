//! Tracked species

use serde::{Deserialize, Serialize};
use std::fmt;

/// A species tracked by the simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "UPPERCASE")]
pub enum Species {
    Hawk,
    Squirrel,
}

impl Species {
    pub const ALL: [Species; 2] = [Species::Hawk, Species::Squirrel];

    /// Column name used for this species in population logs
    pub fn column(self) -> &'static str {
        match self {
            Species::Hawk => "HAWK",
            Species::Squirrel => "SQUIRREL",
        }
    }

    /// Human readable label used in console reports
    pub fn label(self) -> &'static str {
        match self {
            Species::Hawk => "hawk",
            Species::Squirrel => "squirrel",
        }
    }

    /// Match the simulator's `Animal` cell (`HAWK`, `SQUIRREL`), case-insensitively.
    pub fn from_label(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.column().eq_ignore_ascii_case(value))
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_label() {
        assert_eq!(Species::from_label("HAWK"), Some(Species::Hawk));
        assert_eq!(Species::from_label(" squirrel "), Some(Species::Squirrel));
        assert_eq!(Species::from_label("UNDEFINED"), None);
    }
}
