//! StatCalculator - Mutable what-if stat state with derived DPS reads

use super::calculation::{calculate_dps, DpsBreakdown};
use crate::config::{DefenseConversion, GameConstants, GameData};
use crate::stat_block::{StatBlock, StatId, StatSnapshot};
use crate::types::{CharacterClass, MonsterType, StatError};

/// Stacks final damage multiplicatively: backs `equipped` out of `current`
/// and applies `comparison` in its place
///
/// `(1 + current) / (1 + equipped) × (1 + comparison) − 1`, in percent.
/// `None` when the equipped multiplier is not positive and can't be backed out.
pub fn stack_final_damage(current: f64, equipped: f64, comparison: f64) -> Option<f64> {
    let equipped_multiplier = 1.0 + equipped / 100.0;
    if equipped_multiplier <= 0.0 {
        return None;
    }
    let multiplier = (1.0 + current / 100.0) / equipped_multiplier * (1.0 + comparison / 100.0);
    Some((multiplier - 1.0) * 100.0)
}

/// Stat state for one what-if scenario
///
/// Built fresh per comparison or sweep and discarded afterwards. DPS is never
/// stored; every read recomputes from the current stats.
#[derive(Debug, Clone)]
pub struct StatCalculator<'a> {
    stats: StatBlock,
    weapon_attack_bonus: f64,
    constants: &'a GameConstants,
    defense_conversion: Option<&'a DefenseConversion>,
}

impl<'a> StatCalculator<'a> {
    pub fn new(base: &StatBlock, weapon_attack_bonus: f64, constants: &'a GameConstants) -> Self {
        StatCalculator {
            stats: base.clone(),
            weapon_attack_bonus,
            constants,
            defense_conversion: None,
        }
    }

    /// Calculator with the class's defense conversion from game data
    pub fn for_class(
        base: &StatBlock,
        weapon_attack_bonus: f64,
        data: &'a GameData,
        class: CharacterClass,
    ) -> Self {
        Self::new(base, weapon_attack_bonus, &data.constants)
            .with_defense_conversion(data.defense_conversion(class))
    }

    pub fn with_defense_conversion(mut self, conversion: Option<&'a DefenseConversion>) -> Self {
        self.defense_conversion = conversion;
        self
    }

    pub fn weapon_attack_bonus(&self) -> f64 {
        self.weapon_attack_bonus
    }

    pub fn stat(&self, stat: StatId) -> f64 {
        self.stats.get(stat)
    }

    /// Attack including the weapon attack bonus
    pub fn total_attack(&self) -> f64 {
        self.stats.get(StatId::Attack) + self.weapon_attack_bonus
    }

    // === Attack ===

    /// Add flat attack, or a percentage of current total attack
    pub fn add_attack(&mut self, amount: f64, is_flat: bool) {
        let delta = if is_flat {
            amount
        } else {
            self.total_attack() * amount / 100.0
        };
        self.stats.add(StatId::Attack, delta);
    }

    pub fn subtract_attack(&mut self, amount: f64, is_flat: bool) {
        let delta = if is_flat {
            amount
        } else {
            self.total_attack() * amount / 100.0
        };
        self.stats.add(StatId::Attack, -delta);
    }

    // === Main stat / defense ===

    pub fn add_main_stat(&mut self, delta: f64) {
        self.stats.add(StatId::MainStat, delta);
    }

    /// Add defense, redirected into main stat for converting classes
    pub fn add_defense(&mut self, amount: f64) {
        match self.defense_conversion {
            Some(conversion) => self.add_main_stat(conversion.convert(amount)),
            None => self.stats.add(StatId::Defense, amount),
        }
    }

    pub fn subtract_defense(&mut self, amount: f64) {
        self.add_defense(-amount);
    }

    // === Percentage stats ===

    /// Additive percentage composition: +10% twice is +20%
    pub fn add_percentage_stat(&mut self, stat: StatId, delta: f64) -> Result<(), StatError> {
        if !stat.is_percentage() {
            return Err(StatError::NotPercentageStat(stat));
        }
        self.stats.add(stat, delta);
        Ok(())
    }

    pub fn subtract_stat(&mut self, stat: StatId, amount: f64) -> Result<(), StatError> {
        self.add_percentage_stat(stat, -amount)
    }

    /// Apply a delta through whichever path the stat's kind requires
    pub fn apply_delta(&mut self, stat: StatId, delta: f64) {
        match stat {
            StatId::Attack => self.add_attack(delta, true),
            StatId::MainStat => self.add_main_stat(delta),
            StatId::Defense => self.add_defense(delta),
            _ => self.stats.add(stat, delta),
        }
    }

    /// Absolute overwrite
    pub fn set_stat(&mut self, stat: StatId, value: f64) {
        self.stats.set(stat, value);
    }

    /// Swap one item's final damage for another's, multiplicatively
    ///
    /// Skipped when both are zero or when both are equal, so no-op swaps
    /// leave the running total bit-for-bit unchanged. Also skipped when the
    /// equipped value is -100% or below. Returns whether the total was
    /// rewritten.
    pub fn swap_final_damage(&mut self, equipped: f64, comparison: f64) -> bool {
        if (equipped == 0.0 && comparison == 0.0) || equipped == comparison {
            return false;
        }
        let current = self.stats.get(StatId::FinalDamage);
        match stack_final_damage(current, equipped, comparison) {
            Some(updated) => {
                self.set_stat(StatId::FinalDamage, updated);
                true
            }
            None => {
                log::warn!(
                    "Equipped final damage {} can't be backed out, keeping {}",
                    equipped,
                    current
                );
                false
            }
        }
    }

    // === Derived reads ===

    pub fn breakdown(&self, monster: MonsterType) -> DpsBreakdown {
        let breakdown = calculate_dps(&self.stats, self.weapon_attack_bonus, monster, self.constants);
        log::trace!("DPS breakdown: {:?}", breakdown);
        breakdown
    }

    pub fn dps(&self, monster: MonsterType) -> f64 {
        self.breakdown(monster).total()
    }

    pub fn boss_dps(&self) -> f64 {
        self.dps(MonsterType::Boss)
    }

    pub fn normal_dps(&self) -> f64 {
        self.dps(MonsterType::Normal)
    }

    /// Current stats with freshly derived DPS
    pub fn get_stats(&self) -> StatSnapshot {
        StatSnapshot {
            stats: self.stats.clone(),
            boss_dps: self.boss_dps(),
            normal_dps: self.normal_dps(),
        }
    }
}
