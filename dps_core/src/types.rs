//! Core identifiers and per-calculation context

use crate::stat_block::StatId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;
use thiserror::Error;

/// Validation error for identifiers and calculator usage
#[derive(Error, Debug)]
pub enum StatError {
    #[error("Unknown stat identifier: {0}")]
    UnknownStat(String),
    #[error("Unknown character class: {0}")]
    UnknownClass(String),
    #[error("Unknown job tier: {0} (expected 3rd or 4th)")]
    UnknownJobTier(String),
    #[error("{0} is not a percentage stat")]
    NotPercentageStat(StatId),
    #[error("{0} is not carried by gear")]
    NotGearStat(StatId),
    #[error("Cumulative series has not been started")]
    SeriesNotStarted,
    #[error("Cumulative series is sweeping {expected}, got {found}")]
    StatMismatch { expected: StatId, found: StatId },
    #[error("Invalid step count: {0}")]
    InvalidStepCount(usize),
    #[error("Invalid stat JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Playable character classes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CharacterClass {
    // Warrior
    Hero,
    DarkKnight,
    Paladin,
    // Magician
    ArchMageFirePoison,
    ArchMageIceLightning,
    Bishop,
    // Bowman
    Bowmaster,
    Marksman,
    // Thief
    NightLord,
    Shadower,
}

impl CharacterClass {
    /// Get all classes
    pub fn all() -> &'static [CharacterClass] {
        &[
            CharacterClass::Hero,
            CharacterClass::DarkKnight,
            CharacterClass::Paladin,
            CharacterClass::ArchMageFirePoison,
            CharacterClass::ArchMageIceLightning,
            CharacterClass::Bishop,
            CharacterClass::Bowmaster,
            CharacterClass::Marksman,
            CharacterClass::NightLord,
            CharacterClass::Shadower,
        ]
    }

    /// Identifier used in class data files
    pub fn key(&self) -> &'static str {
        match self {
            CharacterClass::Hero => "hero",
            CharacterClass::DarkKnight => "dark_knight",
            CharacterClass::Paladin => "paladin",
            CharacterClass::ArchMageFirePoison => "arch_mage_fire_poison",
            CharacterClass::ArchMageIceLightning => "arch_mage_ice_lightning",
            CharacterClass::Bishop => "bishop",
            CharacterClass::Bowmaster => "bowmaster",
            CharacterClass::Marksman => "marksman",
            CharacterClass::NightLord => "night_lord",
            CharacterClass::Shadower => "shadower",
        }
    }

    /// Display name
    pub fn name(&self) -> &'static str {
        match self {
            CharacterClass::Hero => "Hero",
            CharacterClass::DarkKnight => "Dark Knight",
            CharacterClass::Paladin => "Paladin",
            CharacterClass::ArchMageFirePoison => "Arch Mage (F/P)",
            CharacterClass::ArchMageIceLightning => "Arch Mage (I/L)",
            CharacterClass::Bishop => "Bishop",
            CharacterClass::Bowmaster => "Bowmaster",
            CharacterClass::Marksman => "Marksman",
            CharacterClass::NightLord => "Night Lord",
            CharacterClass::Shadower => "Shadower",
        }
    }
}

impl fmt::Display for CharacterClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CharacterClass {
    type Err = StatError;

    /// Accepts data keys (`dark_knight`) and display names (`Dark Knight`)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, '(' | ')'))
            .map(|c| match c {
                ' ' | '-' | '/' => '_',
                c => c.to_ascii_lowercase(),
            })
            .collect();

        let class = match normalized.as_str() {
            "arch_mage_f_p" => Some(CharacterClass::ArchMageFirePoison),
            "arch_mage_i_l" => Some(CharacterClass::ArchMageIceLightning),
            key => CharacterClass::all().iter().copied().find(|c| c.key() == key),
        };
        class.ok_or_else(|| StatError::UnknownClass(s.to_string()))
    }
}

/// Job tier whose skill coefficient table applies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobTier {
    #[serde(rename = "3rd")]
    Third,
    #[serde(rename = "4th")]
    Fourth,
}

impl JobTier {
    /// The skill tier whose level drives this job tier's coefficient
    pub fn skill_tier(&self) -> SkillTier {
        match self {
            JobTier::Third => SkillTier::Third,
            JobTier::Fourth => SkillTier::Fourth,
        }
    }
}

impl FromStr for JobTier {
    type Err = StatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "3rd" | "third" | "3" => Ok(JobTier::Third),
            "4th" | "fourth" | "4" => Ok(JobTier::Fourth),
            _ => Err(StatError::UnknownJobTier(s.to_string())),
        }
    }
}

/// Skill tier (1st through 4th job skills)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SkillTier {
    #[serde(rename = "1st")]
    First,
    #[serde(rename = "2nd")]
    Second,
    #[serde(rename = "3rd")]
    Third,
    #[serde(rename = "4th")]
    Fourth,
}

impl SkillTier {
    pub fn all() -> &'static [SkillTier] {
        &[
            SkillTier::First,
            SkillTier::Second,
            SkillTier::Third,
            SkillTier::Fourth,
        ]
    }

    /// The stat that carries this tier's skill level
    pub fn level_stat(&self) -> StatId {
        match self {
            SkillTier::First => StatId::SkillLevel1st,
            SkillTier::Second => StatId::SkillLevel2nd,
            SkillTier::Third => StatId::SkillLevel3rd,
            SkillTier::Fourth => StatId::SkillLevel4th,
        }
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

/// Target kind for DPS reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonsterType {
    Boss,
    Normal,
}

/// Skill levels (or skill level deltas) per tier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillLevels([i32; 4]);

impl SkillLevels {
    pub fn new(first: i32, second: i32, third: i32, fourth: i32) -> Self {
        SkillLevels([first, second, third, fourth])
    }

    pub fn get(&self, tier: SkillTier) -> i32 {
        self.0[tier.index()]
    }

    pub fn set(&mut self, tier: SkillTier, level: i32) {
        self.0[tier.index()] = level;
    }

    pub fn is_zero(&self) -> bool {
        self.0.iter().all(|l| *l == 0)
    }
}

impl Add for SkillLevels {
    type Output = SkillLevels;

    fn add(self, rhs: SkillLevels) -> SkillLevels {
        let mut out = self;
        for (l, r) in out.0.iter_mut().zip(rhs.0) {
            *l += r;
        }
        out
    }
}

impl Sub for SkillLevels {
    type Output = SkillLevels;

    fn sub(self, rhs: SkillLevels) -> SkillLevels {
        let mut out = self;
        for (l, r) in out.0.iter_mut().zip(rhs.0) {
            *l -= r;
        }
        out
    }
}

/// Caller-supplied context for one calculation; never stored by the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationContext {
    pub class: CharacterClass,
    /// Character level
    pub level: u32,
    pub job_tier: JobTier,
    /// Skill levels before equipment bonuses
    #[serde(default)]
    pub base_skill_levels: SkillLevels,
    /// Current character defense
    #[serde(default)]
    pub defense: f64,
}

impl CalculationContext {
    pub fn new(class: CharacterClass, level: u32, job_tier: JobTier) -> Self {
        CalculationContext {
            class,
            level,
            job_tier,
            base_skill_levels: SkillLevels::default(),
            defense: 0.0,
        }
    }

    pub fn with_base_skill_levels(mut self, levels: SkillLevels) -> Self {
        self.base_skill_levels = levels;
        self
    }

    pub fn with_defense(mut self, defense: f64) -> Self {
        self.defense = defense;
        self
    }
}
