use serde::{Deserialize, Serialize};

use crate::models::item::Nutrient;
use crate::planner::constants::{
    ESTIMATE_CARBS_SHARE, ESTIMATE_FAT_SHARE, ESTIMATE_PROTEIN_SHARE, FIBER_PER_1000_KCAL,
    KCAL_PER_G_CARBS, KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN,
};

/// Macro targets in grams. Zero means "not enforced".
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MacroTargets {
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
    pub fiber_g: f64,
}

impl MacroTargets {
    /// Split a calorie target 35% protein / 35% fat / 30% carbs, plus 14 g
    /// fiber per 1000 kcal.
    pub fn from_calories(calories: f64) -> Self {
        Self {
            protein_g: (calories * ESTIMATE_PROTEIN_SHARE / KCAL_PER_G_PROTEIN).round(),
            fat_g: (calories * ESTIMATE_FAT_SHARE / KCAL_PER_G_FAT).round(),
            carbs_g: (calories * ESTIMATE_CARBS_SHARE / KCAL_PER_G_CARBS).round(),
            fiber_g: (calories / 1000.0 * FIBER_PER_1000_KCAL).round(),
        }
    }
}

/// Caller-supplied daily targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Targets {
    /// Required for adjustment to run. Zero disables it.
    pub calories: f64,
    #[serde(default)]
    pub macros: MacroTargets,
}

impl Targets {
    pub fn new(calories: f64) -> Self {
        Self {
            calories,
            macros: MacroTargets::default(),
        }
    }

    pub fn with_macros(calories: f64, macros: MacroTargets) -> Self {
        Self { calories, macros }
    }

    /// Target for one nutrient; zero when not enforced.
    pub fn get(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Protein => self.macros.protein_g,
            Nutrient::Fat => self.macros.fat_g,
            Nutrient::Carbs => self.macros.carbs_g,
        }
    }
}

/// Per-invocation options besides the targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DayOptions {
    /// Used when the text carries no "Day N:" label.
    pub expected_day: Option<u32>,
    /// Floor applied when rounding gram/ml quantities.
    pub min_quantity: f64,
}

impl Default for DayOptions {
    fn default() -> Self {
        Self {
            expected_day: None,
            min_quantity: crate::planner::constants::DEFAULT_MIN_QUANTITY,
        }
    }
}

impl DayOptions {
    pub fn for_day(day: u32) -> Self {
        Self {
            expected_day: Some(day),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_macros_from_calories() {
        let m = MacroTargets::from_calories(2000.0);
        assert_eq!(m.protein_g, 175.0);
        assert_eq!(m.fat_g, 78.0);
        assert_eq!(m.carbs_g, 150.0);
        assert_eq!(m.fiber_g, 28.0);
    }

    #[test]
    fn test_targets_deserialize_without_macros() {
        let t: Targets = serde_json::from_str(r#"{"calories": 1800}"#).unwrap();
        assert_eq!(t.calories, 1800.0);
        assert_eq!(t.get(Nutrient::Protein), 0.0);
    }
}
