//! dps_core - Stat calculation and item comparison for RPG characters
//!
//! This library provides:
//! - StatBlock: Named stat values for one character state
//! - StatCalculator: What-if stat mutations with derived boss/normal DPS
//! - compare_items: DPS impact of swapping an equipped item for a candidate
//! - CumulativeStatCalculator: Marginal DPS gain curves across a stat sweep
//! - Skill services: Coefficient tables and passive skill gains
//! - GameData: Constants, coefficient tables and class data loaded from TOML

pub mod comparison;
pub mod config;
pub mod cumulative;
pub mod damage;
pub mod prelude;
pub mod skill;
pub mod source;
pub mod stat_block;
pub mod types;

// Re-export core types for convenience
pub use comparison::{compare_items, ComparisonResult};
pub use config::{ConfigError, GameConstants, GameData};
pub use cumulative::{sweep, CumulativeStatCalculator, CurvePoint, SeriesConfig};
pub use damage::{calculate_dps, DpsBreakdown, StatCalculator};
pub use skill::{passive_gains, PassiveGains};
pub use source::Item;
pub use stat_block::{StatBlock, StatDiff, StatId, StatKind, StatSnapshot};
pub use types::{
    CalculationContext, CharacterClass, JobTier, MonsterType, SkillLevels, SkillTier, StatError,
};
