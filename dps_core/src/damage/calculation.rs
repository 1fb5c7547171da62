//! DPS calculation - turning a StatBlock into boss/normal DPS

use crate::config::GameConstants;
use crate::stat_block::{StatBlock, StatId};
use crate::types::MonsterType;
use serde::{Deserialize, Serialize};

/// Every factor of one DPS evaluation, in application order
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DpsBreakdown {
    pub monster: MonsterType,
    /// Attack + main stat scaling + weapon attack bonus
    pub effective_attack: f64,
    /// 1 + (damage% + boss or normal damage%)
    pub damage_multiplier: f64,
    /// 1 + final damage%
    pub final_damage_multiplier: f64,
    /// 1 + damage amp%
    pub damage_amp_multiplier: f64,
    /// Skill coefficient as a fraction
    pub skill_multiplier: f64,
    /// Expected crit multiplier: 1 + rate × (crit damage multiplier − 1)
    pub crit_multiplier: f64,
    /// Fraction of damage left after target defense and penetration
    pub mitigation: f64,
    /// Average of the min/max damage bonuses
    pub range_multiplier: f64,
    /// 1 + attack speed%
    pub speed_multiplier: f64,
}

impl DpsBreakdown {
    /// Final DPS: the product of every term, left to right
    pub fn total(&self) -> f64 {
        self.effective_attack
            * self.damage_multiplier
            * self.final_damage_multiplier
            * self.damage_amp_multiplier
            * self.skill_multiplier
            * self.crit_multiplier
            * self.mitigation
            * self.range_multiplier
            * self.speed_multiplier
    }
}

/// Evaluate DPS against one target kind from scratch
pub fn calculate_dps(
    stats: &StatBlock,
    weapon_attack_bonus: f64,
    monster: MonsterType,
    constants: &GameConstants,
) -> DpsBreakdown {
    // Step 1: Effective attack
    let effective_attack = (stats.get(StatId::Attack)
        + stats.get(StatId::MainStat) * constants.attack.main_stat_ratio
        + weapon_attack_bonus)
        .max(0.0);

    // Step 2: Damage% plus the target-specific damage%
    let target_damage = match monster {
        MonsterType::Boss => stats.get(StatId::BossDamage),
        MonsterType::Normal => stats.get(StatId::NormalDamage),
    };
    let damage_multiplier = percent_multiplier(stats.get(StatId::Damage) + target_damage);

    // Step 3: Final damage and damage amp
    let final_damage_multiplier = percent_multiplier(stats.get(StatId::FinalDamage));
    let damage_amp_multiplier = percent_multiplier(stats.get(StatId::DamageAmp));

    // Step 4: Skill coefficient
    let coefficient = stats.get(StatId::SkillCoeff);
    let skill_multiplier = if coefficient > 0.0 {
        coefficient / 100.0
    } else {
        constants.skill.unset_coefficient / 100.0
    };

    // Step 5: Crit expectation
    let crit_rate = stats.get(StatId::CritRate).clamp(0.0, constants.crit.max_rate) / 100.0;
    let crit_damage_multiplier = percent_multiplier(stats.get(StatId::CritDamage));
    let crit_multiplier = 1.0 + crit_rate * (crit_damage_multiplier - 1.0);

    // Step 6: Target defense after penetration
    let penetration = stats.get(StatId::DefPen).clamp(0.0, 100.0) / 100.0;
    let defense = constants.monster_defense(monster) / 100.0;
    let mitigation = (1.0 - defense * (1.0 - penetration)).max(0.0);

    // Step 7: Damage range and speed
    let range_multiplier =
        1.0 + (stats.get(StatId::MinDamage) + stats.get(StatId::MaxDamage)) / 200.0;
    let speed_multiplier = percent_multiplier(stats.get(StatId::AttackSpeed));

    DpsBreakdown {
        monster,
        effective_attack,
        damage_multiplier: damage_multiplier.max(0.0),
        final_damage_multiplier: final_damage_multiplier.max(0.0),
        damage_amp_multiplier: damage_amp_multiplier.max(0.0),
        skill_multiplier,
        crit_multiplier: crit_multiplier.max(0.0),
        mitigation,
        range_multiplier: range_multiplier.max(0.0),
        speed_multiplier: speed_multiplier.max(0.0),
    }
}

/// 12.5 → 1.125
fn percent_multiplier(percent: f64) -> f64 {
    1.0 + percent / 100.0
}
