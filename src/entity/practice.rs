//! Practice types and their utility profiles

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::entity::values::ValueProfile;

/// The fixed category of an institution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PracticeType {
    Work,
    Church,
    Club,
    Education,
    PoliticalOrg,
    CommunityCenter,
}

/// Hours an agent commits when joining at bootstrap
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InitialHours {
    Fixed(f64),
    /// Uniform draw in `[low, high)`
    Range(f64, f64),
}

/// Static utility profile for a practice type
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PracticeProfile {
    /// Utility grows with `hours^(1 / exponent)`; must be > 1
    pub diminishing_returns: f64,
    /// Most hours per week the optimizer will give one institution
    pub hour_cap: f64,
    /// Benefit per effective hour, weighted by the agent's values
    pub benefits: ValueProfile,
    pub initial_hours: InitialHours,
}

const WORK: PracticeProfile = PracticeProfile {
    diminishing_returns: 1.5,
    hour_cap: 60.0,
    benefits: ValueProfile::new(0.01, 0.0, 0.02, 0.01, 0.03, -0.05, 0.0),
    initial_hours: InitialHours::Fixed(40.0),
};

const CHURCH: PracticeProfile = PracticeProfile {
    diminishing_returns: 1.3,
    hour_cap: 20.0,
    benefits: ValueProfile::new(0.15, 0.12, 0.05, 0.06, 0.04, 0.0, 0.0),
    initial_hours: InitialHours::Range(3.0, 8.0),
};

const CLUB: PracticeProfile = PracticeProfile {
    diminishing_returns: 1.4,
    hour_cap: 15.0,
    benefits: ValueProfile::new(0.10, 0.02, 0.08, 0.03, 0.06, 0.05, 0.0),
    initial_hours: InitialHours::Range(2.0, 6.0),
};

const EDUCATION: PracticeProfile = PracticeProfile {
    diminishing_returns: 1.1,
    hour_cap: 40.0,
    benefits: ValueProfile::new(0.05, 0.04, 0.15, 0.05, 0.10, 0.0, 0.0),
    initial_hours: InitialHours::Range(10.0, 20.0),
};

const POLITICAL_ORG: PracticeProfile = PracticeProfile {
    diminishing_returns: 1.2,
    hour_cap: 30.0,
    benefits: ValueProfile::new(0.07, 0.03, 0.06, 0.15, 0.09, 0.0, 0.0),
    initial_hours: InitialHours::Range(5.0, 15.0),
};

const COMMUNITY_CENTER: PracticeProfile = PracticeProfile {
    diminishing_returns: 1.2,
    hour_cap: 50.0,
    benefits: ValueProfile::new(0.12, 0.08, 0.04, 0.02, 0.02, 0.08, 0.0),
    initial_hours: InitialHours::Range(5.0, 15.0),
};

impl PracticeType {
    pub const ALL: [PracticeType; 6] = [
        PracticeType::Work,
        PracticeType::Church,
        PracticeType::Club,
        PracticeType::Education,
        PracticeType::PoliticalOrg,
        PracticeType::CommunityCenter,
    ];

    pub fn profile(self) -> &'static PracticeProfile {
        match self {
            PracticeType::Work => &WORK,
            PracticeType::Church => &CHURCH,
            PracticeType::Club => &CLUB,
            PracticeType::Education => &EDUCATION,
            PracticeType::PoliticalOrg => &POLITICAL_ORG,
            PracticeType::CommunityCenter => &COMMUNITY_CENTER,
        }
    }

    pub fn is_work(self) -> bool {
        self == PracticeType::Work
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PracticeType::Work => "work",
            PracticeType::Church => "church",
            PracticeType::Club => "club",
            PracticeType::Education => "education",
            PracticeType::PoliticalOrg => "political_org",
            PracticeType::CommunityCenter => "community_center",
        }
    }

    /// Human-readable label, e.g. "Political Org"
    pub fn title(self) -> String {
        self.as_str()
            .split('_')
            .map(|word| {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                    None => String::new(),
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for PracticeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PracticeType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        PracticeType::ALL
            .into_iter()
            .find(|p| p.as_str() == normalized)
            .ok_or_else(|| format!("Unknown practice type: {}", s))
    }
}
