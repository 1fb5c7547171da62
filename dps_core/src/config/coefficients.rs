//! Skill coefficient factor tables

use super::tables::{validate_thresholds, LookupPolicy};
use super::ConfigError;
use crate::types::JobTier;
use serde::{Deserialize, Serialize};

/// Character level × total skill level → coefficient percentage
///
/// Rows are selected by the nearest character level threshold at or below
/// the input. Within a row, `policy` decides between stepping and linear
/// interpolation across skill level thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientTable {
    /// Character level row thresholds, ascending
    pub levels: Vec<u32>,
    /// Total skill level column thresholds, ascending
    pub skill_levels: Vec<u32>,
    /// One row per character level threshold, one column per skill level threshold
    pub factors: Vec<Vec<f64>>,
    #[serde(default)]
    pub policy: LookupPolicy,
}

impl CoefficientTable {
    /// A table with a single constant coefficient
    pub fn flat(coefficient: f64) -> Self {
        CoefficientTable {
            levels: vec![1],
            skill_levels: vec![1],
            factors: vec![vec![coefficient]],
            policy: LookupPolicy::Step,
        }
    }

    /// Check shape and that coefficients never decrease with either level
    pub fn validate(&self, name: &str) -> Result<(), ConfigError> {
        validate_thresholds(&format!("{}.levels", name), &self.levels, self.factors.len())?;

        for (row, factors) in self.levels.iter().zip(&self.factors) {
            let row_name = format!("{} row {}", name, row);
            validate_thresholds(&row_name, &self.skill_levels, factors.len())?;
            if factors.windows(2).any(|w| w[1] < w[0]) {
                return Err(ConfigError::ValidationError(format!(
                    "{}: coefficients decrease with skill level",
                    row_name
                )));
            }
        }

        for pair in self.factors.windows(2) {
            if pair[0].iter().zip(&pair[1]).any(|(lo, hi)| hi < lo) {
                return Err(ConfigError::ValidationError(format!(
                    "{}: coefficients decrease with character level",
                    name
                )));
            }
        }
        Ok(())
    }
}

/// Coefficient tables per job tier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoefficientTables {
    pub third_job: CoefficientTable,
    pub fourth_job: CoefficientTable,
}

impl Default for CoefficientTables {
    fn default() -> Self {
        CoefficientTables {
            third_job: CoefficientTable::flat(100.0),
            fourth_job: CoefficientTable::flat(100.0),
        }
    }
}

impl CoefficientTables {
    pub fn table(&self, tier: JobTier) -> &CoefficientTable {
        match tier {
            JobTier::Third => &self.third_job,
            JobTier::Fourth => &self.fourth_job,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.third_job.validate("third_job")?;
        self.fourth_job.validate("fourth_job")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_toml;

    const TABLES: &str = r#"
[third_job]
levels = [60, 100]
skill_levels = [1, 10]
factors = [[200, 250], [220, 270]]
policy = "linear"

[fourth_job]
levels = [100]
skill_levels = [1, 10, 20]
factors = [[300, 360, 430]]
"#;

    #[test]
    fn test_parse_tables() {
        let tables: CoefficientTables = parse_toml(TABLES).unwrap();
        assert!(tables.validate().is_ok());
        assert_eq!(tables.table(JobTier::Third).policy, LookupPolicy::Linear);
        assert_eq!(tables.table(JobTier::Fourth).policy, LookupPolicy::Step);
        assert_eq!(tables.table(JobTier::Fourth).factors[0].len(), 3);
    }

    #[test]
    fn test_validate_rejects_decreasing_row() {
        let mut tables: CoefficientTables = parse_toml(TABLES).unwrap();
        tables.fourth_job.factors[0][2] = 350.0;
        assert!(matches!(
            tables.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_validate_rejects_decreasing_column() {
        let mut tables: CoefficientTables = parse_toml(TABLES).unwrap();
        tables.third_job.factors[1][0] = 150.0;
        assert!(tables.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_ragged_rows() {
        let mut tables: CoefficientTables = parse_toml(TABLES).unwrap();
        tables.third_job.factors[1].pop();
        assert!(tables.validate().is_err());
    }

    #[test]
    fn test_flat_table_is_valid() {
        assert!(CoefficientTables::default().validate().is_ok());
    }
}
