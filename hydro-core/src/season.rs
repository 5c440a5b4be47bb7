use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// The four hydrological seasons, in the fixed order used for generation.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Season {
    Winter,
    Summer,
    Monsoon,
    #[serde(rename = "Post-Monsoon")]
    PostMonsoon,
}

impl Season {
    /// All seasons in enumeration order.
    pub const ALL: [Season; 4] = [
        Season::Winter,
        Season::Summer,
        Season::Monsoon,
        Season::PostMonsoon,
    ];

    /// Zero-based position in [`Season::ALL`].
    pub fn index(self) -> usize {
        match self {
            Season::Winter => 0,
            Season::Summer => 1,
            Season::Monsoon => 2,
            Season::PostMonsoon => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Summer => "Summer",
            Season::Monsoon => "Monsoon",
            Season::PostMonsoon => "Post-Monsoon",
        }
    }

    /// Month whose mid-point stands in for the season when a date is needed.
    pub fn representative_month(self) -> u32 {
        match self {
            Season::Winter => 1,
            Season::Summer => 5,
            Season::Monsoon => 8,
            Season::PostMonsoon => 11,
        }
    }

    /// Representative calendar date of this season in `year`.
    pub fn representative_date(self, year: i32) -> NaiveDate {
        hydro_utils::dates::mid_month(year, self.representative_month())
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "winter" => Ok(Season::Winter),
            "summer" => Ok(Season::Summer),
            "monsoon" => Ok(Season::Monsoon),
            "post-monsoon" | "post_monsoon" | "postmonsoon" => Ok(Season::PostMonsoon),
            other => Err(format!("unknown season: {}", other)),
        }
    }
}
