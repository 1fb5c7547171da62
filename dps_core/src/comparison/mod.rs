//! Item comparison - evaluate swapping an equipped item for a candidate

mod result;

pub use result::ComparisonResult;

use crate::config::GameData;
use crate::damage::StatCalculator;
use crate::skill::{coefficient, coefficient_delta, passive_delta, total_skill_level, PassiveContext};
use crate::source::Item;
use crate::stat_block::{StatBlock, StatId};
use crate::types::CalculationContext;

/// Compare `equipped` against `comparison` on top of `base`
///
/// Inputs are read-only and the result is deterministic. Steps run in a
/// fixed order because later steps read totals written by earlier ones:
///
/// 1. attack, main stat and defense (class-aware) deltas
/// 2. skill coefficient delta
/// 3. passive gains delta
/// 4. final damage, stacked multiplicatively on the running total
/// 5. additive percentage stats
///
/// When the skill coefficient changes and `base` carries none, the running
/// coefficient is first set to the table value at the equipped item's skill
/// level, so `before` and `after` read the same table.
pub fn compare_items(
    data: &GameData,
    base: &StatBlock,
    weapon_attack_bonus: f64,
    equipped: &Item,
    comparison: &Item,
    context: &CalculationContext,
) -> ComparisonResult {
    let mut calc = StatCalculator::for_class(base, weapon_attack_bonus, data, context.class);

    let skill_coefficient_delta = coefficient_delta(&data.coefficients, context, equipped, comparison);
    if skill_coefficient_delta != 0.0 && calc.stat(StatId::SkillCoeff) <= 0.0 {
        let equipped_coefficient = coefficient(
            &data.coefficients,
            context.job_tier,
            context.level,
            total_skill_level(equipped, context),
        );
        log::debug!(
            "No skill coefficient on base stats, using {} from the {:?} job table",
            equipped_coefficient,
            context.job_tier
        );
        calc.set_stat(StatId::SkillCoeff, equipped_coefficient);
    }
    let before = calc.get_stats();

    // Step 1: Flat stats
    let attack = comparison.attack - equipped.attack;
    if attack != 0.0 {
        calc.add_attack(attack, true);
    }
    let main_stat = comparison.main_stat - equipped.main_stat;
    if main_stat != 0.0 {
        calc.add_main_stat(main_stat);
    }
    let defense = comparison.defense - equipped.defense;
    if defense != 0.0 {
        calc.add_defense(defense);
    }
    log::debug!(
        "Compare step 1: attack {:+}, main stat {:+}, defense {:+}",
        attack,
        main_stat,
        defense
    );

    // Step 2: Skill coefficient
    if skill_coefficient_delta != 0.0 {
        calc.apply_delta(StatId::SkillCoeff, skill_coefficient_delta);
    }
    log::debug!("Compare step 2: skill coefficient {:+}", skill_coefficient_delta);

    // Step 3: Passive gains, bracketed from the equipped item's skill levels
    let skill_deltas = comparison.skill_levels() - equipped.skill_levels();
    let passive_breakdown = (!skill_deltas.is_zero()).then(|| {
        let passive_context = PassiveContext {
            base_skill_levels: context.base_skill_levels + equipped.skill_levels(),
            ..PassiveContext::from(context)
        };
        passive_delta(
            &data.classes,
            context.class,
            context.level,
            skill_deltas,
            &passive_context,
        )
    });
    let passive_changes = passive_breakdown
        .as_ref()
        .map(|breakdown| breakdown.delta.clone())
        .unwrap_or_default();
    for (stat, delta) in &passive_changes {
        calc.apply_delta(*stat, *delta);
    }
    log::debug!("Compare step 3: passive changes {:?}", passive_changes);

    // Step 4: Final damage
    let final_damage_restacked = calc.swap_final_damage(equipped.final_damage, comparison.final_damage);
    log::debug!(
        "Compare step 4: final damage {} -> {} (restacked: {})",
        equipped.final_damage,
        comparison.final_damage,
        final_damage_restacked
    );

    // Step 5: Additive percentage stats
    for stat in Item::ADDITIVE_STATS {
        let delta = comparison.stat(stat) - equipped.stat(stat);
        if delta != 0.0 {
            calc.apply_delta(stat, delta);
        }
    }

    // Step 6: Read back
    let after = calc.get_stats();
    log::debug!(
        "Compare result: boss DPS {:.2} -> {:.2}, normal DPS {:.2} -> {:.2}",
        before.boss_dps,
        after.boss_dps,
        before.normal_dps,
        after.normal_dps
    );

    ComparisonResult {
        before,
        after,
        skill_coefficient_delta,
        passive_delta: passive_changes,
        passive_breakdown,
        final_damage_restacked,
    }
}
