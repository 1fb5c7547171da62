//! StatId - Closed enumeration of every recognized stat

use crate::types::StatError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a stat composes when deltas are applied
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    /// Point value (attack, main stat, defense, attributes)
    Flat,
    /// Additive percentage, stored as the percent value (12.5 = +12.5%)
    Percentage,
    /// Character or skill level
    Level,
}

/// Identifier for a stat in a [`StatBlock`](super::StatBlock)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatId {
    // === Offense ===
    Attack,
    MainStat,
    Defense,
    CritRate,
    CritDamage,
    BossDamage,
    NormalDamage,
    Damage,
    FinalDamage,
    MinDamage,
    MaxDamage,
    DamageAmp,
    AttackSpeed,
    DefPen,
    SkillCoeff,

    // === Skill levels ===
    SkillLevel1st,
    SkillLevel2nd,
    SkillLevel3rd,
    SkillLevel4th,
    SkillLevelAll,

    // === Character ===
    PrimaryMainStat,
    SecondaryMainStat,
    CharacterLevel,
    Str,
    Dex,
    Int,
    Luk,
}

impl StatId {
    /// Number of recognized stats
    pub const COUNT: usize = 27;

    /// Get all stats in declaration order
    pub fn all() -> &'static [StatId; StatId::COUNT] {
        &[
            StatId::Attack,
            StatId::MainStat,
            StatId::Defense,
            StatId::CritRate,
            StatId::CritDamage,
            StatId::BossDamage,
            StatId::NormalDamage,
            StatId::Damage,
            StatId::FinalDamage,
            StatId::MinDamage,
            StatId::MaxDamage,
            StatId::DamageAmp,
            StatId::AttackSpeed,
            StatId::DefPen,
            StatId::SkillCoeff,
            StatId::SkillLevel1st,
            StatId::SkillLevel2nd,
            StatId::SkillLevel3rd,
            StatId::SkillLevel4th,
            StatId::SkillLevelAll,
            StatId::PrimaryMainStat,
            StatId::SecondaryMainStat,
            StatId::CharacterLevel,
            StatId::Str,
            StatId::Dex,
            StatId::Int,
            StatId::Luk,
        ]
    }

    /// Camel-case identifier, matching the serialized form
    pub fn key(&self) -> &'static str {
        match self {
            StatId::Attack => "attack",
            StatId::MainStat => "mainStat",
            StatId::Defense => "defense",
            StatId::CritRate => "critRate",
            StatId::CritDamage => "critDamage",
            StatId::BossDamage => "bossDamage",
            StatId::NormalDamage => "normalDamage",
            StatId::Damage => "damage",
            StatId::FinalDamage => "finalDamage",
            StatId::MinDamage => "minDamage",
            StatId::MaxDamage => "maxDamage",
            StatId::DamageAmp => "damageAmp",
            StatId::AttackSpeed => "attackSpeed",
            StatId::DefPen => "defPen",
            StatId::SkillCoeff => "skillCoeff",
            StatId::SkillLevel1st => "skillLevel1st",
            StatId::SkillLevel2nd => "skillLevel2nd",
            StatId::SkillLevel3rd => "skillLevel3rd",
            StatId::SkillLevel4th => "skillLevel4th",
            StatId::SkillLevelAll => "skillLevelAll",
            StatId::PrimaryMainStat => "primaryMainStat",
            StatId::SecondaryMainStat => "secondaryMainStat",
            StatId::CharacterLevel => "characterLevel",
            StatId::Str => "str",
            StatId::Dex => "dex",
            StatId::Int => "int",
            StatId::Luk => "luk",
        }
    }

    pub fn kind(&self) -> StatKind {
        match self {
            StatId::Attack
            | StatId::MainStat
            | StatId::Defense
            | StatId::PrimaryMainStat
            | StatId::SecondaryMainStat
            | StatId::Str
            | StatId::Dex
            | StatId::Int
            | StatId::Luk => StatKind::Flat,
            StatId::CritRate
            | StatId::CritDamage
            | StatId::BossDamage
            | StatId::NormalDamage
            | StatId::Damage
            | StatId::FinalDamage
            | StatId::MinDamage
            | StatId::MaxDamage
            | StatId::DamageAmp
            | StatId::AttackSpeed
            | StatId::DefPen
            | StatId::SkillCoeff => StatKind::Percentage,
            StatId::SkillLevel1st
            | StatId::SkillLevel2nd
            | StatId::SkillLevel3rd
            | StatId::SkillLevel4th
            | StatId::SkillLevelAll
            | StatId::CharacterLevel => StatKind::Level,
        }
    }

    pub fn is_percentage(&self) -> bool {
        self.kind() == StatKind::Percentage
    }

    pub(crate) fn index(&self) -> usize {
        *self as usize
    }
}

impl fmt::Display for StatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for StatId {
    type Err = StatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        StatId::all()
            .iter()
            .copied()
            .find(|stat| stat.key() == s)
            .ok_or_else(|| StatError::UnknownStat(s.to_string()))
    }
}
