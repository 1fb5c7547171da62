//! StatBlock - Named stat values for one character state

mod snapshot;
mod stat_id;

pub use snapshot::{DpsChange, StatChange, StatDiff, StatSnapshot};
pub use stat_id::{StatId, StatKind};

use crate::types::StatError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Mapping from every [`StatId`] to its value
///
/// Every recognized stat is always present (defaulting to 0), so reads by
/// `StatId` never fail. Only string keys can be invalid.
///
/// Serializes as a map of camel-case keys. Missing keys deserialize as 0,
/// unknown keys are rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<StatId, f64>", into = "BTreeMap<StatId, f64>")]
pub struct StatBlock {
    values: [f64; StatId::COUNT],
}

impl Default for StatBlock {
    fn default() -> Self {
        Self::new()
    }
}

impl StatBlock {
    /// Create a StatBlock with every stat at 0
    pub fn new() -> Self {
        StatBlock {
            values: [0.0; StatId::COUNT],
        }
    }

    /// Builder-style setter
    pub fn with(mut self, stat: StatId, value: f64) -> Self {
        self.set(stat, value);
        self
    }

    /// Parse a StatBlock from a JSON object of camel-case keys
    pub fn from_json(json: &str) -> Result<Self, StatError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, StatError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn get(&self, stat: StatId) -> f64 {
        self.values[stat.index()]
    }

    /// Look up a stat by its camel-case key
    pub fn get_by_key(&self, key: &str) -> Result<f64, StatError> {
        let stat: StatId = key.parse()?;
        Ok(self.get(stat))
    }

    pub fn set(&mut self, stat: StatId, value: f64) {
        self.values[stat.index()] = value;
    }

    pub fn add(&mut self, stat: StatId, delta: f64) {
        self.values[stat.index()] += delta;
    }

    /// Iterate over all stats in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (StatId, f64)> + '_ {
        StatId::all().iter().map(move |stat| (*stat, self.get(*stat)))
    }

    /// Iterate over stats with a non-zero value
    pub fn non_zero(&self) -> impl Iterator<Item = (StatId, f64)> + '_ {
        self.iter().filter(|(_, value)| *value != 0.0)
    }
}

impl From<BTreeMap<StatId, f64>> for StatBlock {
    fn from(map: BTreeMap<StatId, f64>) -> Self {
        let mut block = StatBlock::new();
        for (stat, value) in map {
            block.set(stat, value);
        }
        block
    }
}

impl From<StatBlock> for BTreeMap<StatId, f64> {
    fn from(block: StatBlock) -> Self {
        block.iter().collect()
    }
}

impl FromIterator<(StatId, f64)> for StatBlock {
    fn from_iter<I: IntoIterator<Item = (StatId, f64)>>(iter: I) -> Self {
        let mut block = StatBlock::new();
        for (stat, value) in iter {
            block.set(stat, value);
        }
        block
    }
}
