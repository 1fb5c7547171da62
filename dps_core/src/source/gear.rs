//! Item - Gear contribution snapshot

use crate::stat_block::StatId;
use crate::types::{SkillLevels, SkillTier, StatError};
use serde::{Deserialize, Serialize};

/// Stats contributed by one piece of gear
///
/// Items are read-only inputs to a comparison; the engine never mutates them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Item {
    pub attack: f64,
    pub main_stat: f64,
    pub defense: f64,
    pub crit_rate: f64,
    pub crit_damage: f64,
    pub boss_damage: f64,
    pub normal_damage: f64,
    pub damage: f64,
    pub min_damage: f64,
    pub max_damage: f64,
    pub final_damage: f64,
    pub skill_level_1st: i32,
    pub skill_level_2nd: i32,
    pub skill_level_3rd: i32,
    pub skill_level_4th: i32,
    pub skill_level_all: i32,
}

impl Item {
    /// Percentage stats that swap additively between items
    pub const ADDITIVE_STATS: [StatId; 7] = [
        StatId::CritRate,
        StatId::CritDamage,
        StatId::BossDamage,
        StatId::NormalDamage,
        StatId::Damage,
        StatId::MinDamage,
        StatId::MaxDamage,
    ];

    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an item from a JSON object of camel-case keys
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Read the item's contribution to a stat (0 for stats gear never carries)
    pub fn stat(&self, stat: StatId) -> f64 {
        match stat {
            StatId::Attack => self.attack,
            StatId::MainStat => self.main_stat,
            StatId::Defense => self.defense,
            StatId::CritRate => self.crit_rate,
            StatId::CritDamage => self.crit_damage,
            StatId::BossDamage => self.boss_damage,
            StatId::NormalDamage => self.normal_damage,
            StatId::Damage => self.damage,
            StatId::MinDamage => self.min_damage,
            StatId::MaxDamage => self.max_damage,
            StatId::FinalDamage => self.final_damage,
            StatId::SkillLevel1st => self.skill_level_1st as f64,
            StatId::SkillLevel2nd => self.skill_level_2nd as f64,
            StatId::SkillLevel3rd => self.skill_level_3rd as f64,
            StatId::SkillLevel4th => self.skill_level_4th as f64,
            StatId::SkillLevelAll => self.skill_level_all as f64,
            _ => 0.0,
        }
    }

    /// Skill levels the item grants to one tier, excluding all-skill levels
    pub fn skill_level(&self, tier: SkillTier) -> i32 {
        match tier {
            SkillTier::First => self.skill_level_1st,
            SkillTier::Second => self.skill_level_2nd,
            SkillTier::Third => self.skill_level_3rd,
            SkillTier::Fourth => self.skill_level_4th,
        }
    }

    /// Effective skill levels per tier, all-skill levels folded in
    pub fn skill_levels(&self) -> SkillLevels {
        let all = self.skill_level_all;
        SkillLevels::new(
            self.skill_level_1st + all,
            self.skill_level_2nd + all,
            self.skill_level_3rd + all,
            self.skill_level_4th + all,
        )
    }

    // === Builders ===

    pub fn with_attack(mut self, attack: f64) -> Self {
        self.attack = attack;
        self
    }

    pub fn with_main_stat(mut self, main_stat: f64) -> Self {
        self.main_stat = main_stat;
        self
    }

    pub fn with_defense(mut self, defense: f64) -> Self {
        self.defense = defense;
        self
    }

    pub fn with_final_damage(mut self, final_damage: f64) -> Self {
        self.final_damage = final_damage;
        self
    }

    /// Set one of the flat or percentage stats gear carries
    ///
    /// Skill levels go through [`Item::with_skill_level`]; any other stat is
    /// rejected.
    pub fn with_stat(mut self, stat: StatId, value: f64) -> Result<Self, StatError> {
        match stat {
            StatId::Attack => self.attack = value,
            StatId::MainStat => self.main_stat = value,
            StatId::Defense => self.defense = value,
            StatId::CritRate => self.crit_rate = value,
            StatId::CritDamage => self.crit_damage = value,
            StatId::BossDamage => self.boss_damage = value,
            StatId::NormalDamage => self.normal_damage = value,
            StatId::Damage => self.damage = value,
            StatId::MinDamage => self.min_damage = value,
            StatId::MaxDamage => self.max_damage = value,
            StatId::FinalDamage => self.final_damage = value,
            _ => return Err(StatError::NotGearStat(stat)),
        }
        Ok(self)
    }

    pub fn with_skill_level(mut self, tier: SkillTier, level: i32) -> Self {
        match tier {
            SkillTier::First => self.skill_level_1st = level,
            SkillTier::Second => self.skill_level_2nd = level,
            SkillTier::Third => self.skill_level_3rd = level,
            SkillTier::Fourth => self.skill_level_4th = level,
        }
        self
    }

    pub fn with_skill_level_all(mut self, level: i32) -> Self {
        self.skill_level_all = level;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_from_json() {
        let item = Item::from_json(
            r#"{"attack": 300, "finalDamage": 20, "skillLevel4th": 2, "skillLevelAll": 1}"#,
        )
        .unwrap();
        assert!((item.attack - 300.0).abs() < f64::EPSILON);
        assert!((item.stat(StatId::FinalDamage) - 20.0).abs() < f64::EPSILON);
        assert_eq!(item.skill_level(SkillTier::Fourth), 2);
        assert!(item.stat(StatId::DamageAmp).abs() < f64::EPSILON);
    }

    #[test]
    fn test_skill_levels_fold_in_all_skill() {
        let item = Item::new()
            .with_skill_level(SkillTier::Third, 2)
            .with_skill_level_all(1);
        assert_eq!(item.skill_levels(), SkillLevels::new(1, 1, 3, 1));
    }

    #[test]
    fn test_with_stat_sets_gear_stats() {
        let item = Item::new()
            .with_stat(StatId::BossDamage, 12.5)
            .unwrap()
            .with_stat(StatId::Attack, 40.0)
            .unwrap();
        assert!((item.boss_damage - 12.5).abs() < f64::EPSILON);
        assert!((item.stat(StatId::Attack) - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_with_stat_rejects_non_gear_stats() {
        for stat in [StatId::DamageAmp, StatId::SkillCoeff, StatId::SkillLevel4th] {
            let err = Item::new().with_stat(stat, 10.0).unwrap_err();
            assert!(matches!(err, StatError::NotGearStat(s) if s == stat));
        }
    }
}
