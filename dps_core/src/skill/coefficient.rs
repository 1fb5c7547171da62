//! Skill coefficient lookup per job tier

use crate::config::{tables::interpolate, CoefficientTable, CoefficientTables};
use crate::source::Item;
use crate::types::{CalculationContext, JobTier};

impl CoefficientTable {
    /// Coefficient percentage for a character level and total skill level
    ///
    /// Inputs outside the table are clamped to its first/last row and column.
    pub fn lookup(&self, level: u32, skill_level: i32) -> f64 {
        let (Some(&min_level), Some(&max_level), Some(&min_skill), Some(&max_skill)) = (
            self.levels.first(),
            self.levels.last(),
            self.skill_levels.first(),
            self.skill_levels.last(),
        ) else {
            return 0.0;
        };

        if level < min_level {
            log::warn!(
                "Character level {} below coefficient table start {}, clamping",
                level,
                min_level
            );
        } else if level > max_level {
            log::warn!(
                "Character level {} above coefficient table end {}, clamping",
                level,
                max_level
            );
        }
        let row = self.levels.partition_point(|l| *l <= level).saturating_sub(1);

        let skill = if skill_level < min_skill as i32 {
            log::warn!(
                "Skill level {} below coefficient table start {}, clamping",
                skill_level,
                min_skill
            );
            min_skill as f64
        } else if skill_level > max_skill as i32 {
            log::warn!(
                "Skill level {} above coefficient table end {}, clamping",
                skill_level,
                max_skill
            );
            max_skill as f64
        } else {
            skill_level as f64
        };

        self.factors
            .get(row)
            .and_then(|factors| interpolate(&self.skill_levels, factors, skill, self.policy))
            .unwrap_or(0.0)
    }
}

/// 3rd job skill coefficient (percent)
pub fn coefficient_3rd_job(tables: &CoefficientTables, level: u32, total_skill_level: i32) -> f64 {
    tables.third_job.lookup(level, total_skill_level)
}

/// 4th job skill coefficient (percent)
pub fn coefficient_4th_job(tables: &CoefficientTables, level: u32, total_skill_level: i32) -> f64 {
    tables.fourth_job.lookup(level, total_skill_level)
}

/// Skill coefficient for whichever job tier is active
pub fn coefficient(
    tables: &CoefficientTables,
    tier: JobTier,
    level: u32,
    total_skill_level: i32,
) -> f64 {
    match tier {
        JobTier::Third => coefficient_3rd_job(tables, level, total_skill_level),
        JobTier::Fourth => coefficient_4th_job(tables, level, total_skill_level),
    }
}

/// Total skill level of the active tier while wearing `item`
pub fn total_skill_level(item: &Item, context: &CalculationContext) -> i32 {
    let tier = context.job_tier.skill_tier();
    context.base_skill_levels.get(tier) + item.skill_levels().get(tier)
}

/// Signed coefficient change from swapping `equipped` for `comparison`
pub fn coefficient_delta(
    tables: &CoefficientTables,
    context: &CalculationContext,
    equipped: &Item,
    comparison: &Item,
) -> f64 {
    let equipped_level = total_skill_level(equipped, context);
    let comparison_level = total_skill_level(comparison, context);
    if equipped_level == comparison_level {
        return 0.0;
    }

    let before = coefficient(tables, context.job_tier, context.level, equipped_level);
    let after = coefficient(tables, context.job_tier, context.level, comparison_level);
    after - before
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{parse_toml, LookupPolicy};
    use crate::types::{CharacterClass, SkillLevels, SkillTier};
    use proptest::prelude::*;

    const TABLES: &str = r#"
[third_job]
levels = [60, 100]
skill_levels = [1, 11, 21]
factors = [[200, 250, 300], [220, 270, 330]]
policy = "linear"

[fourth_job]
levels = [100, 150]
skill_levels = [1, 10, 20]
factors = [[300, 360, 430], [320, 380, 460]]
policy = "step"
"#;

    fn tables() -> CoefficientTables {
        parse_toml(TABLES).unwrap()
    }

    #[test]
    fn test_linear_interpolation() {
        let tables = tables();
        assert!((coefficient_3rd_job(&tables, 60, 1) - 200.0).abs() < 1e-9);
        assert!((coefficient_3rd_job(&tables, 60, 6) - 225.0).abs() < 1e-9);
        assert!((coefficient_3rd_job(&tables, 80, 16) - 275.0).abs() < 1e-9);
        // Row 100 applies from level 100 on
        assert!((coefficient_3rd_job(&tables, 120, 21) - 330.0).abs() < 1e-9);
    }

    #[test]
    fn test_step_lookup() {
        let tables = tables();
        assert!((coefficient_4th_job(&tables, 100, 9) - 300.0).abs() < f64::EPSILON);
        assert!((coefficient_4th_job(&tables, 100, 10) - 360.0).abs() < f64::EPSILON);
        assert!((coefficient_4th_job(&tables, 149, 19) - 360.0).abs() < f64::EPSILON);
        assert!((coefficient_4th_job(&tables, 150, 20) - 460.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_out_of_range_inputs_clamp() {
        let tables = tables();
        // Below the first level row and skill column
        assert!((coefficient_3rd_job(&tables, 1, -5) - 200.0).abs() < 1e-9);
        assert!((coefficient_3rd_job(&tables, 1, 0) - 200.0).abs() < 1e-9);
        // Past the last column
        assert!((coefficient_3rd_job(&tables, 300, 99) - 330.0).abs() < 1e-9);
        // Past the last level row only, and past the last column only
        assert!((coefficient_4th_job(&tables, 250, 10) - 380.0).abs() < f64::EPSILON);
        assert!((coefficient_4th_job(&tables, 100, 45) - 430.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_empty_table_yields_zero() {
        let table = CoefficientTable {
            levels: vec![],
            skill_levels: vec![],
            factors: vec![],
            policy: LookupPolicy::Step,
        };
        assert!(table.lookup(100, 10).abs() < f64::EPSILON);
    }

    #[test]
    fn test_coefficient_delta() {
        let tables = tables();
        let context = CalculationContext::new(CharacterClass::Hero, 60, JobTier::Third)
            .with_base_skill_levels(SkillLevels::new(0, 0, 5, 0));
        let equipped = Item::new();
        let comparison = Item::new()
            .with_skill_level(SkillTier::Third, 4)
            .with_skill_level_all(1);

        // 5 → 10 on the 3rd job row at level 60: 220 → 245
        let delta = coefficient_delta(&tables, &context, &equipped, &comparison);
        assert!((delta - 25.0).abs() < 1e-9);

        let reverse = coefficient_delta(&tables, &context, &comparison, &equipped);
        assert!((reverse + 25.0).abs() < 1e-9);
    }

    #[test]
    fn test_delta_ignores_other_tiers() {
        let tables = tables();
        let context = CalculationContext::new(CharacterClass::Hero, 100, JobTier::Fourth);
        let comparison = Item::new().with_skill_level(SkillTier::Third, 10);
        assert!(coefficient_delta(&tables, &context, &Item::new(), &comparison).abs() < f64::EPSILON);
    }

    proptest! {
        #[test]
        fn prop_coefficient_monotonic_in_skill_level(
            level in 0u32..250,
            skill in -5i32..60,
            step in 0i32..20,
        ) {
            let tables = tables();
            for tier in [JobTier::Third, JobTier::Fourth] {
                let lo = coefficient(&tables, tier, level, skill);
                let hi = coefficient(&tables, tier, level, skill + step);
                prop_assert!(hi >= lo, "{:?}: {} -> {}", tier, lo, hi);
            }
        }

        #[test]
        fn prop_bundled_tables_monotonic(
            level in 0u32..250,
            skill in -5i32..80,
            step in 0i32..20,
        ) {
            let data = crate::config::GameData::default();
            for tier in [JobTier::Third, JobTier::Fourth] {
                let lo = coefficient(&data.coefficients, tier, level, skill);
                let hi = coefficient(&data.coefficients, tier, level, skill + step);
                prop_assert!(hi >= lo);
            }
        }
    }
}
