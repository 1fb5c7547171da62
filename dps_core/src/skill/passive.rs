//! Skill passive gains per class

use crate::config::{ClassTable, PassiveEffect};
use crate::stat_block::StatId;
use crate::types::{CalculationContext, CharacterClass, SkillLevels, SkillTier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Context the passive tables read from
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PassiveContext {
    /// Current character defense
    pub defense: f64,
    /// Skill levels before any delta
    pub base_skill_levels: SkillLevels,
}

impl From<&CalculationContext> for PassiveContext {
    fn from(context: &CalculationContext) -> Self {
        PassiveContext {
            defense: context.defense,
            base_skill_levels: context.base_skill_levels,
        }
    }
}

/// One passive's stat contribution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassiveContribution {
    pub name: String,
    pub tier: SkillTier,
    pub skill_level: i32,
    pub stat: StatId,
    pub value: f64,
}

/// A passive whose effect is not a plain stat change
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComplexPassive {
    pub name: String,
    pub tier: SkillTier,
    pub skill_level: i32,
    pub description: String,
    pub value: f64,
}

/// Passive bonuses at one set of skill levels
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassiveGains {
    /// Total bonus per stat
    pub stat_changes: BTreeMap<StatId, f64>,
    /// Per-passive contributions behind `stat_changes`
    pub breakdown: Vec<PassiveContribution>,
    pub complex_passives: Vec<ComplexPassive>,
}

impl PassiveGains {
    pub fn stat(&self, stat: StatId) -> f64 {
        self.stat_changes.get(&stat).copied().unwrap_or(0.0)
    }

    /// Per-stat difference from `baseline`, zero entries dropped
    pub fn difference(&self, baseline: &PassiveGains) -> BTreeMap<StatId, f64> {
        self.stat_changes
            .keys()
            .chain(baseline.stat_changes.keys())
            .map(|stat| (*stat, self.stat(*stat) - baseline.stat(*stat)))
            .filter(|(_, delta)| *delta != 0.0)
            .collect()
    }
}

/// Passive bonuses for a class at `context.base_skill_levels + deltas`
pub fn passive_gains(
    classes: &ClassTable,
    class: CharacterClass,
    level: u32,
    deltas: SkillLevels,
    context: &PassiveContext,
) -> PassiveGains {
    let mut gains = PassiveGains::default();
    let Some(data) = classes.get(class) else {
        log::warn!("No class data for {}, passives ignored", class);
        return gains;
    };

    let skill_levels = context.base_skill_levels + deltas;

    for passive in &data.passives {
        if level < passive.required_level {
            continue;
        }

        let skill_level = skill_levels.get(passive.tier);
        let value = passive.effect.table().value_at(skill_level);
        if value == 0.0 {
            continue;
        }

        match &passive.effect {
            PassiveEffect::Stat { stat, .. } => {
                *gains.stat_changes.entry(*stat).or_insert(0.0) += value;
                gains.breakdown.push(PassiveContribution {
                    name: passive.name.clone(),
                    tier: passive.tier,
                    skill_level,
                    stat: *stat,
                    value,
                });
            }
            PassiveEffect::DefenseScaled { stat, .. } => {
                let amount = context.defense * value / 100.0;
                *gains.stat_changes.entry(*stat).or_insert(0.0) += amount;
                gains.breakdown.push(PassiveContribution {
                    name: passive.name.clone(),
                    tier: passive.tier,
                    skill_level,
                    stat: *stat,
                    value: amount,
                });
            }
            PassiveEffect::Complex { description, .. } => {
                gains.complex_passives.push(ComplexPassive {
                    name: passive.name.clone(),
                    tier: passive.tier,
                    skill_level,
                    description: description.clone(),
                    value,
                });
            }
        }
    }

    gains
}

/// Baseline and changed passive gains with their per-stat difference
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassiveBreakdown {
    pub baseline: PassiveGains,
    pub with_change: PassiveGains,
    pub delta: BTreeMap<StatId, f64>,
}

/// Passive gains attributable to a skill level change
///
/// Evaluates the tables twice, at zero deltas and at `deltas`, and subtracts.
/// Passive tables have breakpoints and caps, so the change can't be read off
/// the deltas alone.
pub fn passive_delta(
    classes: &ClassTable,
    class: CharacterClass,
    level: u32,
    deltas: SkillLevels,
    context: &PassiveContext,
) -> PassiveBreakdown {
    let baseline = passive_gains(classes, class, level, SkillLevels::default(), context);
    let with_change = passive_gains(classes, class, level, deltas, context);
    let delta = with_change.difference(&baseline);

    PassiveBreakdown {
        baseline,
        with_change,
        delta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_toml;

    const CLASSES: &str = r#"
[[classes.hero.passives]]
name = "Combo Synergy"
tier = "3rd"
required_level = 60
effect = { type = "stat", stat = "damage", table = { levels = [1, 5], values = [2.0, 10.0], policy = "step" } }

[[classes.hero.passives]]
name = "Enrage"
tier = "4th"
required_level = 100
effect = { type = "stat", stat = "critDamage", table = { levels = [1, 11], values = [5.0, 15.0], policy = "linear" } }

[[classes.hero.passives]]
name = "Final Attack"
tier = "2nd"
effect = { type = "complex", description = "Chance to strike again", table = { levels = [1, 20], values = [10.0, 40.0], policy = "linear" } }

[[classes.dark_knight.passives]]
name = "Iron Wall"
tier = "2nd"
effect = { type = "defense_scaled", stat = "attack", table = { levels = [1, 10], values = [1.0, 4.0], policy = "step" } }
"#;

    fn classes() -> ClassTable {
        parse_toml(CLASSES).unwrap()
    }

    fn context(third: i32) -> PassiveContext {
        PassiveContext {
            defense: 0.0,
            base_skill_levels: SkillLevels::new(0, 0, third, 0),
        }
    }

    #[test]
    fn test_gains_at_base_levels() {
        let gains = passive_gains(
            &classes(),
            CharacterClass::Hero,
            60,
            SkillLevels::default(),
            &context(3),
        );
        assert!((gains.stat(StatId::Damage) - 2.0).abs() < f64::EPSILON);
        // Enrage needs level 100 and 4th job skills
        assert!(gains.stat(StatId::CritDamage).abs() < f64::EPSILON);
        assert_eq!(gains.breakdown.len(), 1);
        assert!(gains.complex_passives.is_empty());
    }

    #[test]
    fn test_required_level_gates_passive() {
        let ctx = PassiveContext {
            defense: 0.0,
            base_skill_levels: SkillLevels::new(0, 0, 3, 6),
        };
        let low = passive_gains(&classes(), CharacterClass::Hero, 99, SkillLevels::default(), &ctx);
        let high = passive_gains(&classes(), CharacterClass::Hero, 100, SkillLevels::default(), &ctx);
        assert!(low.stat(StatId::CritDamage).abs() < f64::EPSILON);
        assert!((high.stat(StatId::CritDamage) - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_breakpoint_crossing_is_not_additive() {
        let classes = classes();
        let ctx = context(3);

        // 3 → 7 crosses the level 5 breakpoint once
        let crossing = passive_delta(
            &classes,
            CharacterClass::Hero,
            60,
            SkillLevels::new(0, 0, 4, 0),
            &ctx,
        );
        // Two independent +2 deltas from level 3 each cross it too
        let half = passive_delta(
            &classes,
            CharacterClass::Hero,
            60,
            SkillLevels::new(0, 0, 2, 0),
            &ctx,
        );

        let crossing_gain = crossing.delta[&StatId::Damage];
        let split_gain = 2.0 * half.delta[&StatId::Damage];
        assert!((crossing_gain - 8.0).abs() < f64::EPSILON);
        assert!((split_gain - 16.0).abs() < f64::EPSILON);
        assert!((crossing_gain - split_gain).abs() > 1.0);
    }

    #[test]
    fn test_zero_delta_has_empty_difference() {
        let breakdown = passive_delta(
            &classes(),
            CharacterClass::Hero,
            60,
            SkillLevels::default(),
            &context(3),
        );
        assert!(breakdown.delta.is_empty());
        assert_eq!(breakdown.baseline, breakdown.with_change);
    }

    #[test]
    fn test_negative_delta_can_unlearn() {
        let breakdown = passive_delta(
            &classes(),
            CharacterClass::Hero,
            60,
            SkillLevels::new(0, 0, -3, 0),
            &context(3),
        );
        assert!((breakdown.delta[&StatId::Damage] + 2.0).abs() < f64::EPSILON);
        assert!(breakdown.with_change.breakdown.is_empty());
    }

    #[test]
    fn test_defense_scaled_passive() {
        let ctx = PassiveContext {
            defense: 2000.0,
            base_skill_levels: SkillLevels::new(0, 9, 0, 0),
        };
        let breakdown = passive_delta(
            &classes(),
            CharacterClass::DarkKnight,
            60,
            SkillLevels::new(0, 1, 0, 0),
            &ctx,
        );
        // 1% → 4% of 2000 defense as attack
        assert!((breakdown.baseline.stat(StatId::Attack) - 20.0).abs() < 1e-9);
        assert!((breakdown.delta[&StatId::Attack] - 60.0).abs() < 1e-9);
    }

    #[test]
    fn test_complex_passives_reported_not_applied() {
        let breakdown = passive_delta(
            &classes(),
            CharacterClass::Hero,
            10,
            SkillLevels::new(0, 1, 0, 0),
            &context(0),
        );
        assert!(breakdown.delta.is_empty());
        assert_eq!(breakdown.with_change.complex_passives.len(), 1);
        assert_eq!(breakdown.with_change.complex_passives[0].name, "Final Attack");
        assert!(breakdown.baseline.complex_passives.is_empty());
    }

    #[test]
    fn test_class_without_data() {
        let gains = passive_gains(
            &classes(),
            CharacterClass::Bishop,
            100,
            SkillLevels::new(1, 1, 1, 1),
            &PassiveContext::default(),
        );
        assert_eq!(gains, PassiveGains::default());
    }
}
