use serde::Serialize;

use crate::config::EngineConfig;
use crate::models::{Nutrient, Targets, Totals};

/// Round to the nearest multiple of `step`.
#[inline]
pub fn round_to_step(value: f64, step: f64) -> f64 {
    (value / step).round() * step
}

/// Round to the nearest multiple of `step`, never below `floor`.
#[inline]
pub fn round_quantity(value: f64, step: f64, floor: f64) -> f64 {
    round_to_step(value, step).max(floor)
}

/// Round a quantity to a multiple of `step` that stays inside `bounds` when
/// one exists; otherwise plain rounding with the floor.
pub fn round_within(value: f64, bounds: (f64, f64), step: f64, floor: f64) -> f64 {
    let (lo, hi) = bounds;
    let rounded = round_quantity(value, step, floor);

    if rounded > hi {
        let down = (hi / step).floor() * step;
        if down >= lo && down >= floor {
            return down;
        }
    } else if rounded < lo {
        let up = (lo / step).ceil() * step;
        if up <= hi {
            return up.max(floor);
        }
    }
    rounded
}

#[inline]
pub fn clamp_to_bounds(value: f64, bounds: (f64, f64)) -> f64 {
    value.max(bounds.0).min(bounds.1)
}

/// Allowed absolute deviation for a nutrient given its target.
pub fn tolerance(nutrient: Nutrient, target: f64, config: &EngineConfig) -> f64 {
    match nutrient {
        Nutrient::Calories => config.calorie_tolerance,
        Nutrient::Protein => config
            .protein_tolerance_g
            .max(target * config.protein_tolerance_pct),
        Nutrient::Fat => config.fat_tolerance_g.max(target * config.fat_tolerance_pct),
        Nutrient::Carbs => config
            .carbs_tolerance_g
            .max(target * config.carbs_tolerance_pct),
    }
}

/// Target minus actual; zero when the target is not enforced.
pub fn deficit(nutrient: Nutrient, totals: &Totals, targets: &Targets) -> f64 {
    let target = targets.get(nutrient);
    if target > 0.0 {
        target - totals.get(nutrient)
    } else {
        0.0
    }
}

/// Whether a nutrient is within tolerance. Unenforced targets always are.
pub fn within_tolerance(
    nutrient: Nutrient,
    totals: &Totals,
    targets: &Targets,
    config: &EngineConfig,
) -> bool {
    let target = targets.get(nutrient);
    target <= 0.0 || deficit(nutrient, totals, targets).abs() <= tolerance(nutrient, target, config)
}

/// True when every enforced target is within tolerance.
pub fn all_within_tolerance(totals: &Totals, targets: &Targets, config: &EngineConfig) -> bool {
    [
        Nutrient::Calories,
        Nutrient::Protein,
        Nutrient::Fat,
        Nutrient::Carbs,
    ]
    .into_iter()
    .all(|n| within_tolerance(n, totals, targets, config))
}

/// Parsed calories over target calories. 1.0 when there is no target.
pub fn completeness_ratio(parsed_calories: f64, target_calories: f64) -> f64 {
    if target_calories > 0.0 {
        parsed_calories / target_calories
    } else {
        1.0
    }
}

/// How aggressively to adjust, judged from parse completeness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletenessTier {
    /// Parsing judged unreliable; no adjustment.
    Skipped,
    /// Partial parse; fewer rounds with smaller steps.
    Reduced,
    Full,
}

impl CompletenessTier {
    pub fn from_ratio(ratio: f64, config: &EngineConfig) -> Self {
        if ratio < config.completeness_critical {
            CompletenessTier::Skipped
        } else if ratio < config.completeness_good {
            CompletenessTier::Reduced
        } else {
            CompletenessTier::Full
        }
    }

    pub fn iterations(self, config: &EngineConfig) -> usize {
        match self {
            CompletenessTier::Skipped => 0,
            CompletenessTier::Reduced => config.reduced_iterations,
            CompletenessTier::Full => config.full_iterations,
        }
    }

    /// Per-item calorie step cap for one iteration.
    pub fn calorie_step(self, config: &EngineConfig) -> f64 {
        match self {
            CompletenessTier::Full => config.full_calorie_step,
            _ => config.reduced_calorie_step,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_quantity() {
        assert_eq!(round_quantity(82.0, 5.0, 5.0), 80.0);
        assert_eq!(round_quantity(83.0, 5.0, 5.0), 85.0);
        assert_eq!(round_quantity(1.0, 5.0, 5.0), 5.0);
    }

    #[test]
    fn test_round_within_respects_bounds() {
        // 104 g anchor: bound is [62.4, 208]; 207 would round up to 210.
        assert_eq!(round_within(207.0, (62.4, 208.0), 5.0, 5.0), 205.0);
        // 63 rounds to 65 which is fine; 62.5 rounds to 65 as well.
        assert_eq!(round_within(62.5, (62.4, 208.0), 5.0, 5.0), 65.0);
        // No multiple of 5 in [1.2, 4]: fall back to the floor.
        assert_eq!(round_within(2.0, (1.2, 4.0), 5.0, 5.0), 5.0);
    }

    #[test]
    fn test_tolerances() {
        let config = EngineConfig::default();
        assert_eq!(tolerance(Nutrient::Calories, 1800.0, &config), 100.0);
        assert_eq!(tolerance(Nutrient::Protein, 60.0, &config), 5.0);
        assert_eq!(tolerance(Nutrient::Protein, 200.0, &config), 10.0);
        assert_eq!(tolerance(Nutrient::Fat, 40.0, &config), 3.0);
    }

    #[test]
    fn test_unenforced_targets_pass() {
        let config = EngineConfig::default();
        let totals = Totals {
            calories: 1750.0,
            protein: 10.0,
            ..Default::default()
        };
        let targets = Targets::new(1800.0);
        assert!(all_within_tolerance(&totals, &targets, &config));
        assert_eq!(deficit(Nutrient::Protein, &totals, &targets), 0.0);
    }

    #[test]
    fn test_completeness_tiers() {
        let config = EngineConfig::default();
        assert_eq!(CompletenessTier::from_ratio(0.3, &config), CompletenessTier::Skipped);
        assert_eq!(CompletenessTier::from_ratio(0.6, &config), CompletenessTier::Reduced);
        assert_eq!(CompletenessTier::from_ratio(0.85, &config), CompletenessTier::Full);
        assert_eq!(CompletenessTier::Reduced.iterations(&config), 4);
        assert_eq!(CompletenessTier::Reduced.calorie_step(&config), 30.0);
        assert_eq!(completeness_ratio(900.0, 0.0), 1.0);
    }
}
