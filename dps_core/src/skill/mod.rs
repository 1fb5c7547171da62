//! Skill services - coefficient lookup and passive gains

mod coefficient;
mod passive;

pub use coefficient::{
    coefficient, coefficient_3rd_job, coefficient_4th_job, coefficient_delta, total_skill_level,
};
pub use passive::{
    passive_delta, passive_gains, ComplexPassive, PassiveBreakdown, PassiveContext,
    PassiveContribution, PassiveGains,
};
