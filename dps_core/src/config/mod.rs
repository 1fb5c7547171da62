//! Configuration loading from TOML files
//!
//! All game data is read-only once loaded and is passed explicitly into
//! the calculation services.

mod classes;
mod coefficients;
mod constants;
pub(crate) mod tables;

pub use classes::{ClassData, ClassTable, DefenseConversion, PassiveEffect, PassiveSkill, Rounding};
pub use coefficients::{CoefficientTable, CoefficientTables};
pub use constants::{AttackConstants, CritConstants, GameConstants, MonsterConstants, SkillConstants};
pub use tables::{LevelTable, LookupPolicy};

use crate::types::CharacterClass;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration loading error
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Configuration validation error: {0}")]
    ValidationError(String),
}

/// Load a TOML file and deserialize it
pub fn load_toml<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: T = toml::from_str(&content)?;
    Ok(config)
}

/// Load a TOML string and deserialize it
pub fn parse_toml<T: serde::de::DeserializeOwned>(content: &str) -> Result<T, ConfigError> {
    let config: T = toml::from_str(content)?;
    Ok(config)
}

const CONSTANTS_FILE: &str = "constants.toml";
const COEFFICIENTS_FILE: &str = "coefficients.toml";
const CLASSES_FILE: &str = "classes.toml";

/// All static lookup data the engine consumes
#[derive(Debug, Clone)]
pub struct GameData {
    pub constants: GameConstants,
    pub coefficients: CoefficientTables,
    pub classes: ClassTable,
}

impl GameData {
    /// Parse and validate game data from TOML strings
    pub fn parse(constants: &str, coefficients: &str, classes: &str) -> Result<Self, ConfigError> {
        let data = GameData {
            constants: parse_toml(constants)?,
            coefficients: parse_toml(coefficients)?,
            classes: parse_toml(classes)?,
        };
        data.validate()?;
        Ok(data)
    }

    /// Load `constants.toml`, `coefficients.toml` and `classes.toml` from a directory
    pub fn load_from_dir(dir: &Path) -> Result<Self, ConfigError> {
        let data = GameData {
            constants: load_toml(&dir.join(CONSTANTS_FILE))?,
            coefficients: load_toml(&dir.join(COEFFICIENTS_FILE))?,
            classes: load_toml(&dir.join(CLASSES_FILE))?,
        };
        data.validate()?;
        log::info!(
            "Loaded game data from {}: {} classes, {} passives",
            dir.display(),
            data.classes.len(),
            data.classes.passive_count()
        );
        Ok(data)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.constants.validate()?;
        self.coefficients.validate()?;
        self.classes.validate()
    }

    /// Defense conversion for a class, if its kit converts defense into main stat
    pub fn defense_conversion(&self, class: CharacterClass) -> Option<&DefenseConversion> {
        self.classes
            .get(class)
            .and_then(|data| data.defense_conversion.as_ref())
    }
}

impl Default for GameData {
    /// Bundled game data
    fn default() -> Self {
        GameData::parse(
            include_str!("../../config/constants.toml"),
            include_str!("../../config/coefficients.toml"),
            include_str!("../../config/classes.toml"),
        )
        .unwrap_or_else(|e| {
            log::error!("Bundled game data is invalid, using fallback tables: {}", e);
            GameData {
                constants: GameConstants::default(),
                coefficients: CoefficientTables::default(),
                classes: ClassTable::default(),
            }
        })
    }
}
