//! Value dimensions shared by agents (preferences) and institutions (culture)

use serde::{Deserialize, Serialize};
use std::fmt;

/// The seven value dimensions an agent is scored on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueDimension {
    Community,
    Tradition,
    Growth,
    Civic,
    Status,
    Leisure,
    Wealth,
}

impl ValueDimension {
    pub const ALL: [ValueDimension; 7] = [
        ValueDimension::Community,
        ValueDimension::Tradition,
        ValueDimension::Growth,
        ValueDimension::Civic,
        ValueDimension::Status,
        ValueDimension::Leisure,
        ValueDimension::Wealth,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ValueDimension::Community => "community",
            ValueDimension::Tradition => "tradition",
            ValueDimension::Growth => "growth",
            ValueDimension::Civic => "civic",
            ValueDimension::Status => "status",
            ValueDimension::Leisure => "leisure",
            ValueDimension::Wealth => "wealth",
        }
    }
}

impl fmt::Display for ValueDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One float per value dimension
///
/// Used for agent values (in [0, 1]), institution culture (in [-1, 1]) and
/// practice benefit weights. Dimensions missing from a scenario file are 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueProfile {
    pub community: f64,
    pub tradition: f64,
    pub growth: f64,
    pub civic: f64,
    pub status: f64,
    pub leisure: f64,
    pub wealth: f64,
}

impl ValueProfile {
    pub const fn new(
        community: f64,
        tradition: f64,
        growth: f64,
        civic: f64,
        status: f64,
        leisure: f64,
        wealth: f64,
    ) -> Self {
        Self {
            community,
            tradition,
            growth,
            civic,
            status,
            leisure,
            wealth,
        }
    }

    /// Same value on every dimension
    pub const fn splat(value: f64) -> Self {
        Self::new(value, value, value, value, value, value, value)
    }

    pub fn get(&self, dimension: ValueDimension) -> f64 {
        match dimension {
            ValueDimension::Community => self.community,
            ValueDimension::Tradition => self.tradition,
            ValueDimension::Growth => self.growth,
            ValueDimension::Civic => self.civic,
            ValueDimension::Status => self.status,
            ValueDimension::Leisure => self.leisure,
            ValueDimension::Wealth => self.wealth,
        }
    }

    pub fn set(&mut self, dimension: ValueDimension, value: f64) {
        let slot = match dimension {
            ValueDimension::Community => &mut self.community,
            ValueDimension::Tradition => &mut self.tradition,
            ValueDimension::Growth => &mut self.growth,
            ValueDimension::Civic => &mut self.civic,
            ValueDimension::Status => &mut self.status,
            ValueDimension::Leisure => &mut self.leisure,
            ValueDimension::Wealth => &mut self.wealth,
        };
        *slot = value;
    }

    /// Dimensions paired with their values, in `ValueDimension::ALL` order
    pub fn iter(&self) -> impl Iterator<Item = (ValueDimension, f64)> + '_ {
        ValueDimension::ALL.into_iter().map(move |d| (d, self.get(d)))
    }

    /// Sum of per-dimension products
    pub fn dot(&self, other: &ValueProfile) -> f64 {
        ValueDimension::ALL
            .into_iter()
            .map(|d| self.get(d) * other.get(d))
            .sum()
    }

    /// True when every dimension lies within `[low, high]`
    pub fn within(&self, low: f64, high: f64) -> bool {
        self.iter().all(|(_, v)| (low..=high).contains(&v))
    }
}
