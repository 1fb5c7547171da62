//! Per-class data: defense conversion and passive skill tables

use super::tables::LevelTable;
use super::ConfigError;
use crate::stat_block::StatId;
use crate::types::{CharacterClass, SkillTier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Rounding applied to converted main stat
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rounding {
    #[default]
    None,
    Floor,
    Round,
}

/// Defense → main stat conversion for classes whose kit redirects defense
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefenseConversion {
    /// Main stat gained per point of defense
    pub ratio: f64,
    #[serde(default)]
    pub rounding: Rounding,
}

impl DefenseConversion {
    /// Main stat change for a defense change
    ///
    /// Rounding applies to the magnitude so that adding and then removing the
    /// same defense amount cancels exactly.
    pub fn convert(&self, defense: f64) -> f64 {
        let converted = defense.abs() * self.ratio;
        let rounded = match self.rounding {
            Rounding::None => converted,
            Rounding::Floor => converted.floor(),
            Rounding::Round => converted.round(),
        };
        rounded.copysign(defense)
    }
}

/// What a passive skill grants at a given skill level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PassiveEffect {
    /// Grants the table value to a stat
    Stat { stat: StatId, table: LevelTable },
    /// Grants the table value, as a percent of current defense, to a stat
    DefenseScaled { stat: StatId, table: LevelTable },
    /// Effect not expressible as a stat change; reported for display only
    Complex { description: String, table: LevelTable },
}

impl PassiveEffect {
    pub fn table(&self) -> &LevelTable {
        match self {
            PassiveEffect::Stat { table, .. }
            | PassiveEffect::DefenseScaled { table, .. }
            | PassiveEffect::Complex { table, .. } => table,
        }
    }
}

/// A passive skill in a class kit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassiveSkill {
    pub name: String,
    pub tier: SkillTier,
    /// Character level at which the passive unlocks
    #[serde(default)]
    pub required_level: u32,
    pub effect: PassiveEffect,
}

/// Data for one class
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassData {
    #[serde(default)]
    pub defense_conversion: Option<DefenseConversion>,
    #[serde(default)]
    pub passives: Vec<PassiveSkill>,
}

/// Class key → class data
///
/// Keys are validated against [`CharacterClass`] when the table is validated.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassTable {
    #[serde(default)]
    classes: BTreeMap<String, ClassData>,
}

impl ClassTable {
    pub fn insert(&mut self, class: CharacterClass, data: ClassData) {
        self.classes.insert(class.key().to_string(), data);
    }

    pub fn get(&self, class: CharacterClass) -> Option<&ClassData> {
        self.classes.get(class.key())
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    pub fn passive_count(&self) -> usize {
        self.classes.values().map(|c| c.passives.len()).sum()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        for (key, data) in &self.classes {
            let class: CharacterClass = key
                .parse()
                .map_err(|e| ConfigError::ValidationError(format!("classes.{}: {}", key, e)))?;
            if class.key() != key {
                return Err(ConfigError::ValidationError(format!(
                    "classes.{}: use the key `{}`",
                    key,
                    class.key()
                )));
            }

            if let Some(conversion) = &data.defense_conversion {
                if conversion.ratio < 0.0 {
                    return Err(ConfigError::ValidationError(format!(
                        "classes.{}: defense conversion ratio must not be negative",
                        key
                    )));
                }
            }

            for passive in &data.passives {
                passive
                    .effect
                    .table()
                    .validate(&format!("classes.{}.{}", key, passive.name))?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_toml, LookupPolicy};

    const CLASSES: &str = r#"
[classes.dark_knight]
defense_conversion = { ratio = 0.5, rounding = "floor" }

[[classes.dark_knight.passives]]
name = "Iron Wall"
tier = "2nd"
required_level = 30
effect = { type = "defense_scaled", stat = "attack", table = { levels = [1, 10], values = [1.0, 4.0], policy = "linear" } }

[[classes.dark_knight.passives]]
name = "Beholder"
tier = "3rd"
effect = { type = "complex", description = "Summons a beholder", table = { levels = [1], values = [1.0] } }

[classes.hero]
"#;

    #[test]
    fn test_parse_classes() {
        let table: ClassTable = parse_toml(CLASSES).unwrap();
        assert!(table.validate().is_ok());
        assert_eq!(table.len(), 2);
        assert_eq!(table.passive_count(), 2);

        let dk = table.get(CharacterClass::DarkKnight).unwrap();
        let conversion = dk.defense_conversion.as_ref().unwrap();
        assert_eq!(conversion.rounding, Rounding::Floor);

        match &dk.passives[0].effect {
            PassiveEffect::DefenseScaled { stat, table } => {
                assert_eq!(*stat, StatId::Attack);
                assert_eq!(table.policy, LookupPolicy::Linear);
            }
            other => panic!("unexpected effect: {:?}", other),
        }
        assert_eq!(dk.passives[1].required_level, 0);

        let hero = table.get(CharacterClass::Hero).unwrap();
        assert!(hero.defense_conversion.is_none());
        assert!(table.get(CharacterClass::Bishop).is_none());
    }

    #[test]
    fn test_unknown_class_key_rejected() {
        let table: ClassTable = parse_toml("[classes.pirate]\n").unwrap();
        assert!(matches!(
            table.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_display_name_key_rejected() {
        let table: ClassTable = parse_toml("[classes.\"Dark Knight\"]\n").unwrap();
        assert!(table.validate().is_err());
    }

    #[test]
    fn test_unknown_stat_rejected_at_parse() {
        let toml = r#"
[[classes.hero.passives]]
name = "Bad"
tier = "1st"
effect = { type = "stat", stat = "luck", table = { levels = [1], values = [1.0] } }
"#;
        assert!(parse_toml::<ClassTable>(toml).is_err());
    }

    #[test]
    fn test_conversion_rounding() {
        let exact = DefenseConversion {
            ratio: 0.127,
            rounding: Rounding::None,
        };
        assert!((exact.convert(1000.0) - 127.0).abs() < 1e-9);
        assert!((exact.convert(-1000.0) + 127.0).abs() < 1e-9);

        let floor = DefenseConversion {
            ratio: 0.127,
            rounding: Rounding::Floor,
        };
        assert!((floor.convert(100.0) - 12.0).abs() < f64::EPSILON);
        assert!((floor.convert(-100.0) + 12.0).abs() < f64::EPSILON);

        let round = DefenseConversion {
            ratio: 0.127,
            rounding: Rounding::Round,
        };
        assert!((round.convert(100.0) - 13.0).abs() < f64::EPSILON);
    }
}
