//! ComparisonResult - Outcome of swapping an equipped item for a candidate

use crate::skill::PassiveBreakdown;
use crate::stat_block::{StatDiff, StatId, StatSnapshot};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Result of comparing an equipped item against a candidate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Stats and DPS with the equipped item
    pub before: StatSnapshot,
    /// Stats and DPS with the candidate swapped in
    pub after: StatSnapshot,

    // === Skill breakdown ===
    /// Signed skill coefficient change (percent)
    pub skill_coefficient_delta: f64,
    /// Passive stat changes applied to `after`
    pub passive_delta: BTreeMap<StatId, f64>,
    /// Present when any tier's skill level differs between the items
    pub passive_breakdown: Option<PassiveBreakdown>,
    /// Whether the final damage total was rewritten
    pub final_damage_restacked: bool,
}

impl ComparisonResult {
    pub fn diff(&self) -> StatDiff {
        self.after.diff(&self.before)
    }

    pub fn boss_dps_change_percent(&self) -> f64 {
        self.diff().boss_dps.percent()
    }

    pub fn normal_dps_change_percent(&self) -> f64 {
        self.diff().normal_dps.percent()
    }

    /// Whether the candidate raises boss DPS
    pub fn is_boss_upgrade(&self) -> bool {
        self.after.boss_dps > self.before.boss_dps
    }

    pub fn is_normal_upgrade(&self) -> bool {
        self.after.normal_dps > self.before.normal_dps
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        if self.skill_coefficient_delta != 0.0 {
            parts.push(format!("skill coefficient {:+.1}%", self.skill_coefficient_delta));
        }

        for (stat, delta) in &self.passive_delta {
            parts.push(format!("passive {} {:+.2}", stat, delta));
        }

        parts.push(format!("boss DPS {:+.2}%", self.boss_dps_change_percent()));
        parts.push(format!("normal DPS {:+.2}%", self.normal_dps_change_percent()));
        parts.join(", ")
    }
}
