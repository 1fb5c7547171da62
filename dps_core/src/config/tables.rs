//! Piecewise lookup tables

use super::ConfigError;
use serde::{Deserialize, Serialize};

/// How values between table thresholds are resolved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupPolicy {
    /// Value of the nearest threshold at or below the input
    #[default]
    Step,
    /// Linear interpolation between neighbouring thresholds
    Linear,
}

/// Resolve `x` against ascending `thresholds`
///
/// Returns `None` below the first threshold. Above the last threshold the
/// last value holds.
pub(crate) fn interpolate(
    thresholds: &[u32],
    values: &[f64],
    x: f64,
    policy: LookupPolicy,
) -> Option<f64> {
    let first = *thresholds.first()?;
    if x < first as f64 {
        return None;
    }

    let i = thresholds.partition_point(|t| *t as f64 <= x).saturating_sub(1);
    let value = *values.get(i)?;

    match (policy, thresholds.get(i + 1), values.get(i + 1)) {
        (LookupPolicy::Linear, Some(next), Some(next_value)) => {
            let lo = thresholds[i] as f64;
            let span = *next as f64 - lo;
            Some(value + (next_value - value) * (x - lo) / span)
        }
        _ => Some(value),
    }
}

/// Check thresholds are non-empty, strictly ascending and sized like `len`
pub(crate) fn validate_thresholds(
    name: &str,
    thresholds: &[u32],
    len: usize,
) -> Result<(), ConfigError> {
    if thresholds.is_empty() {
        return Err(ConfigError::ValidationError(format!("{}: no thresholds", name)));
    }
    if thresholds.windows(2).any(|w| w[0] >= w[1]) {
        return Err(ConfigError::ValidationError(format!(
            "{}: thresholds must be strictly ascending",
            name
        )));
    }
    if thresholds.len() != len {
        return Err(ConfigError::ValidationError(format!(
            "{}: {} thresholds but {} values",
            name,
            thresholds.len(),
            len
        )));
    }
    Ok(())
}

/// Skill level → value table for a passive bonus
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelTable {
    /// Skill level thresholds, ascending
    pub levels: Vec<u32>,
    /// Value at each threshold
    pub values: Vec<f64>,
    #[serde(default)]
    pub policy: LookupPolicy,
}

impl LevelTable {
    pub fn new(levels: Vec<u32>, values: Vec<f64>, policy: LookupPolicy) -> Self {
        LevelTable {
            levels,
            values,
            policy,
        }
    }

    /// Value at a skill level; 0 below the first threshold (skill not learned)
    pub fn value_at(&self, skill_level: i32) -> f64 {
        interpolate(&self.levels, &self.values, skill_level as f64, self.policy).unwrap_or(0.0)
    }

    pub fn validate(&self, name: &str) -> Result<(), ConfigError> {
        validate_thresholds(name, &self.levels, self.values.len())
    }
}
