//! Damage formula constants

use super::ConfigError;
use crate::types::MonsterType;
use serde::{Deserialize, Serialize};

/// Tunable damage formula constants
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameConstants {
    #[serde(default)]
    pub attack: AttackConstants,
    #[serde(default)]
    pub crit: CritConstants,
    #[serde(default)]
    pub monster: MonsterConstants,
    #[serde(default)]
    pub skill: SkillConstants,
}

impl GameConstants {
    /// Defense (percent) of the given target kind
    pub fn monster_defense(&self, monster: MonsterType) -> f64 {
        match monster {
            MonsterType::Boss => self.monster.boss_defense,
            MonsterType::Normal => self.monster.normal_defense,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.attack.main_stat_ratio < 0.0 {
            return Err(ConfigError::ValidationError(
                "attack.main_stat_ratio must not be negative".to_string(),
            ));
        }
        if self.crit.max_rate <= 0.0 {
            return Err(ConfigError::ValidationError(
                "crit.max_rate must be positive".to_string(),
            ));
        }
        for (name, defense) in [
            ("boss_defense", self.monster.boss_defense),
            ("normal_defense", self.monster.normal_defense),
        ] {
            if !(0.0..=100.0).contains(&defense) {
                return Err(ConfigError::ValidationError(format!(
                    "monster.{} must be within 0..=100, got {}",
                    name, defense
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttackConstants {
    /// Attack gained per point of main stat
    #[serde(default = "default_main_stat_ratio")]
    pub main_stat_ratio: f64,
}

impl Default for AttackConstants {
    fn default() -> Self {
        AttackConstants {
            main_stat_ratio: 0.1,
        }
    }
}

fn default_main_stat_ratio() -> f64 {
    0.1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CritConstants {
    /// Crit rate cap in percent
    #[serde(default = "default_max_crit_rate")]
    pub max_rate: f64,
}

impl Default for CritConstants {
    fn default() -> Self {
        CritConstants { max_rate: 100.0 }
    }
}

fn default_max_crit_rate() -> f64 {
    100.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonsterConstants {
    /// Boss defense in percent
    #[serde(default = "default_boss_defense")]
    pub boss_defense: f64,
    /// Normal monster defense in percent
    #[serde(default = "default_normal_defense")]
    pub normal_defense: f64,
}

impl Default for MonsterConstants {
    fn default() -> Self {
        MonsterConstants {
            boss_defense: 30.0,
            normal_defense: 10.0,
        }
    }
}

fn default_boss_defense() -> f64 {
    30.0
}
fn default_normal_defense() -> f64 {
    10.0
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillConstants {
    /// Coefficient (percent) used when a stat block carries no skill coefficient
    #[serde(default = "default_unset_coefficient")]
    pub unset_coefficient: f64,
}

impl Default for SkillConstants {
    fn default() -> Self {
        SkillConstants {
            unset_coefficient: 100.0,
        }
    }
}

fn default_unset_coefficient() -> f64 {
    100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_toml;

    #[test]
    fn test_default_constants() {
        let constants = GameConstants::default();
        assert!((constants.attack.main_stat_ratio - 0.1).abs() < f64::EPSILON);
        assert!((constants.crit.max_rate - 100.0).abs() < f64::EPSILON);
        assert!((constants.monster_defense(MonsterType::Boss) - 30.0).abs() < f64::EPSILON);
        assert!((constants.monster_defense(MonsterType::Normal) - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_parse_constants() {
        let toml = r#"
[attack]
main_stat_ratio = 0.25

[monster]
boss_defense = 45
"#;

        let constants: GameConstants = parse_toml(toml).unwrap();
        assert!((constants.attack.main_stat_ratio - 0.25).abs() < f64::EPSILON);
        assert!((constants.monster.boss_defense - 45.0).abs() < f64::EPSILON);
        // Unspecified fields keep their defaults
        assert!((constants.monster.normal_defense - 10.0).abs() < f64::EPSILON);
        assert!((constants.skill.unset_coefficient - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_rejects_out_of_range_defense() {
        let mut constants = GameConstants::default();
        constants.monster.boss_defense = 150.0;
        assert!(matches!(
            constants.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }
}
