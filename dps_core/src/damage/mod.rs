//! Damage system - DPS formula and the stat calculation service

mod calculation;
mod calculator;

pub use calculation::{calculate_dps, DpsBreakdown};
pub use calculator::{stack_final_damage, StatCalculator};
