//! StatSnapshot - A StatBlock plus its derived DPS values

use super::{StatBlock, StatId};
use crate::types::MonsterType;
use serde::{Deserialize, Serialize};

/// Full read-out of a calculator: source stats and derived DPS
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatSnapshot {
    pub stats: StatBlock,
    pub boss_dps: f64,
    pub normal_dps: f64,
}

impl StatSnapshot {
    pub fn get(&self, stat: StatId) -> f64 {
        self.stats.get(stat)
    }

    pub fn dps(&self, monster: MonsterType) -> f64 {
        match monster {
            MonsterType::Boss => self.boss_dps,
            MonsterType::Normal => self.normal_dps,
        }
    }

    /// Compare against an earlier snapshot
    pub fn diff(&self, before: &StatSnapshot) -> StatDiff {
        let changes = StatId::all()
            .iter()
            .filter_map(|stat| {
                let old = before.get(*stat);
                let new = self.get(*stat);
                (old != new).then_some(StatChange {
                    stat: *stat,
                    before: old,
                    after: new,
                })
            })
            .collect();

        StatDiff {
            changes,
            boss_dps: DpsChange::new(before.boss_dps, self.boss_dps),
            normal_dps: DpsChange::new(before.normal_dps, self.normal_dps),
        }
    }
}

/// One stat's before/after values
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatChange {
    pub stat: StatId,
    pub before: f64,
    pub after: f64,
}

impl StatChange {
    pub fn delta(&self) -> f64 {
        self.after - self.before
    }
}

/// Before/after DPS
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DpsChange {
    pub before: f64,
    pub after: f64,
}

impl DpsChange {
    pub fn new(before: f64, after: f64) -> Self {
        DpsChange { before, after }
    }

    pub fn delta(&self) -> f64 {
        self.after - self.before
    }

    /// Relative change in percent, 0 when there is no baseline
    pub fn percent(&self) -> f64 {
        if self.before <= 0.0 {
            return 0.0;
        }
        self.delta() / self.before * 100.0
    }
}

/// Every stat that changed between two snapshots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatDiff {
    pub changes: Vec<StatChange>,
    pub boss_dps: DpsChange,
    pub normal_dps: DpsChange,
}

impl StatDiff {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn change(&self, stat: StatId) -> Option<&StatChange> {
        self.changes.iter().find(|c| c.stat == stat)
    }

    /// Get a summary string
    pub fn summary(&self) -> String {
        let mut parts: Vec<String> = self
            .changes
            .iter()
            .map(|c| format!("{} {:+.2}", c.stat, c.delta()))
            .collect();

        parts.push(format!("boss DPS {:+.2}%", self.boss_dps.percent()));
        parts.push(format!("normal DPS {:+.2}%", self.normal_dps.percent()));
        parts.join(", ")
    }
}
