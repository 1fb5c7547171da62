//! Cumulative stat calculator - marginal DPS gain across a stat sweep

use crate::config::{DefenseConversion, GameConstants};
use crate::damage::StatCalculator;
use crate::stat_block::{StatBlock, StatId, StatSnapshot};
use crate::types::{MonsterType, StatError};
use serde::{Deserialize, Serialize};

/// Settings for one sweep
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesConfig {
    pub weapon_attack_bonus: f64,
    pub monster_type: MonsterType,
    pub num_steps: usize,
}

/// One point on a marginal gain curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    /// Cumulative stat increase
    pub x: f64,
    /// DPS gain over the previous step, in percent per unit of stat
    pub y: f64,
}

struct SeriesState<'a> {
    calc: StatCalculator<'a>,
    monster: MonsterType,
    num_steps: usize,
    stat: Option<StatId>,
    previous_increase: f64,
    previous_dps: f64,
}

/// Stepper that sweeps one stat upward and reports marginal DPS gain
///
/// Running totals persist between `next_step` calls until the next
/// `start_series`. One instance sweeps one stat at a time.
pub struct CumulativeStatCalculator<'a> {
    constants: &'a GameConstants,
    defense_conversion: Option<&'a DefenseConversion>,
    series: Option<SeriesState<'a>>,
}

impl<'a> CumulativeStatCalculator<'a> {
    pub fn new(constants: &'a GameConstants) -> Self {
        CumulativeStatCalculator {
            constants,
            defense_conversion: None,
            series: None,
        }
    }

    pub fn with_defense_conversion(mut self, conversion: Option<&'a DefenseConversion>) -> Self {
        self.defense_conversion = conversion;
        self
    }

    /// Begin a new sweep from `base`, discarding any previous running totals
    pub fn start_series(&mut self, base: &StatBlock, config: SeriesConfig) -> Result<(), StatError> {
        if config.num_steps == 0 {
            return Err(StatError::InvalidStepCount(config.num_steps));
        }

        let calc = StatCalculator::new(base, config.weapon_attack_bonus, self.constants)
            .with_defense_conversion(self.defense_conversion);
        let previous_dps = calc.dps(config.monster_type);

        self.series = Some(SeriesState {
            calc,
            monster: config.monster_type,
            num_steps: config.num_steps,
            stat: None,
            previous_increase: 0.0,
            previous_dps,
        });
        Ok(())
    }

    /// Advance the sweep to `cumulative_increase` and return the new point
    ///
    /// Only the increment since the previous step is applied.
    pub fn next_step(
        &mut self,
        stat: StatId,
        cumulative_increase: f64,
        step_index: usize,
        is_flat: bool,
    ) -> Result<CurvePoint, StatError> {
        let series = self.series.as_mut().ok_or(StatError::SeriesNotStarted)?;
        match series.stat {
            Some(expected) if expected != stat => {
                return Err(StatError::StatMismatch {
                    expected,
                    found: stat,
                });
            }
            _ => series.stat = Some(stat),
        }
        if step_index >= series.num_steps {
            log::warn!(
                "Step {} past the configured {} steps",
                step_index,
                series.num_steps
            );
        }

        let delta = cumulative_increase - series.previous_increase;
        match stat {
            StatId::Attack => series.calc.add_attack(delta, is_flat),
            stat if stat.is_percentage() => series.calc.add_percentage_stat(stat, delta)?,
            stat => series.calc.apply_delta(stat, delta),
        }

        let dps = series.calc.dps(series.monster);
        let y = if delta != 0.0 && series.previous_dps > 0.0 {
            (dps - series.previous_dps) / series.previous_dps * 100.0 / delta
        } else {
            0.0
        };

        log::debug!(
            "Step {}: {} +{} -> DPS {:.2}, gain {:.6}%/unit",
            step_index,
            stat,
            cumulative_increase,
            dps,
            y
        );

        series.previous_increase = cumulative_increase;
        series.previous_dps = dps;
        Ok(CurvePoint {
            x: cumulative_increase,
            y,
        })
    }

    /// Stats and DPS at the current point of the sweep
    pub fn current_stats(&self) -> Option<StatSnapshot> {
        self.series.as_ref().map(|s| s.calc.get_stats())
    }
}

/// Sweep `stat` from `min_increase` to `max_increase` in `config.num_steps`
/// evenly spaced points
pub fn sweep(
    calculator: &mut CumulativeStatCalculator<'_>,
    base: &StatBlock,
    config: SeriesConfig,
    stat: StatId,
    min_increase: f64,
    max_increase: f64,
    is_flat: bool,
) -> Result<Vec<CurvePoint>, StatError> {
    calculator.start_series(base, config)?;

    let steps = config.num_steps;
    let span = max_increase - min_increase;
    (0..steps)
        .map(|i| {
            let x = if steps == 1 {
                max_increase
            } else {
                min_increase + span * i as f64 / (steps - 1) as f64
            };
            calculator.next_step(stat, x, i, is_flat)
        })
        .collect()
}
