//! Prelude module for convenient imports
//!
//! ```rust
//! use dps_core::prelude::*;
//! ```

// Core types
pub use crate::stat_block::{StatBlock, StatId, StatSnapshot};
pub use crate::types::{
    CalculationContext, CharacterClass, JobTier, MonsterType, SkillLevels, SkillTier, StatError,
};

// Calculation services
pub use crate::damage::StatCalculator;
pub use crate::comparison::{compare_items, ComparisonResult};
pub use crate::cumulative::{sweep, CumulativeStatCalculator, CurvePoint, SeriesConfig};

// Sources
pub use crate::source::Item;

// Config
pub use crate::config::{ConfigError, GameData};
