use serde::Serialize;

use crate::config::EngineConfig;
use crate::planner::constants::{
    ESTIMATE_CARBS_SHARE, ESTIMATE_FAT_SHARE, ESTIMATE_PROTEIN_SHARE, KCAL_PER_G_CARBS,
    KCAL_PER_G_FAT, KCAL_PER_G_PROTEIN,
};

/// How an item's quantity is measured. Fixed at parse time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitKind {
    Gram,
    Milliliter,
    /// Counted, volumetric or imperial portions. Never numerically adjusted.
    Serving,
}

impl UnitKind {
    /// Classify a unit token. Only exact gram and milliliter tokens are measured;
    /// anything else (`cup`, `medium`, `oz`) keeps its generated quantity.
    pub fn classify(unit: &str) -> Self {
        match unit.trim().to_lowercase().as_str() {
            "g" | "gram" | "grams" => UnitKind::Gram,
            "ml" | "milliliter" | "milliliters" => UnitKind::Milliliter,
            _ => UnitKind::Serving,
        }
    }

    /// Gram- and milliliter-based items are the only ones ever rescaled.
    #[inline]
    pub fn is_measured(self) -> bool {
        matches!(self, UnitKind::Gram | UnitKind::Milliliter)
    }
}

/// Nutrients per unit of quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct NutrientDensity {
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

impl NutrientDensity {
    fn from_totals(quantity: f64, calories: f64, protein: f64, fat: f64, carbs: f64) -> Self {
        if quantity <= 0.0 {
            return Self::default();
        }
        Self {
            calories: calories / quantity,
            protein: protein / quantity,
            fat: fat / quantity,
            carbs: carbs / quantity,
        }
    }

    /// Density for a single nutrient.
    pub fn of(&self, nutrient: Nutrient) -> f64 {
        match nutrient {
            Nutrient::Calories => self.calories,
            Nutrient::Protein => self.protein,
            Nutrient::Fat => self.fat,
            Nutrient::Carbs => self.carbs,
        }
    }
}

/// The four quantities the engine steers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Nutrient {
    Calories,
    Protein,
    Fat,
    Carbs,
}

/// Macro that makes up more than half of an item's macro grams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DominantMacro {
    Protein,
    Fat,
    Carbs,
    Mixed,
}

impl DominantMacro {
    pub fn as_str(self) -> &'static str {
        match self {
            DominantMacro::Protein => "protein",
            DominantMacro::Fat => "fat",
            DominantMacro::Carbs => "carbs",
            DominantMacro::Mixed => "mixed",
        }
    }
}

/// Estimate (protein, fat, carbs) grams from calories with the 35/35/30 split.
pub fn estimate_macros(calories: f64) -> (f64, f64, f64) {
    (
        calories * ESTIMATE_PROTEIN_SHARE / KCAL_PER_G_PROTEIN,
        calories * ESTIMATE_FAT_SHARE / KCAL_PER_G_FAT,
        calories * ESTIMATE_CARBS_SHARE / KCAL_PER_G_CARBS,
    )
}

/// A food item with quantity, nutrients and fixed per-unit densities.
///
/// Items are plain values: adjustment builds a new item from the fixed
/// densities instead of editing nutrient fields in place.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Item {
    pub name: String,
    pub quantity: f64,
    pub unit: String,
    pub kind: UnitKind,
    /// Numeric quantity text as generated, e.g. `"1/2"`. Re-emitted for servings.
    pub quantity_token: String,
    pub calories: f64,
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
    pub fiber: f64,
    pub density: NutrientDensity,
    /// Quantity the realism bound is computed from.
    pub anchor_quantity: f64,
    /// Calories as the generator reported them.
    pub generated_calories: f64,
}

impl Item {
    /// Build an item from parsed values. Macros are estimated when absent.
    pub fn new(
        name: impl Into<String>,
        quantity: f64,
        unit: impl Into<String>,
        quantity_token: impl Into<String>,
        calories: f64,
        macros: Option<(f64, f64, f64)>,
    ) -> Self {
        let unit = unit.into();
        let calories = calories.max(0.0);
        let (protein, fat, carbs) = macros.unwrap_or_else(|| estimate_macros(calories));
        let (protein, fat, carbs) = (protein.max(0.0), fat.max(0.0), carbs.max(0.0));

        Self {
            name: name.into(),
            quantity,
            kind: UnitKind::classify(&unit),
            unit,
            quantity_token: quantity_token.into(),
            calories,
            protein,
            fat,
            carbs,
            fiber: 0.0,
            density: NutrientDensity::from_totals(quantity, calories, protein, fat, carbs),
            anchor_quantity: quantity,
            generated_calories: calories,
        }
    }

    /// Same item at a new quantity, nutrients recomputed from the densities.
    pub fn with_quantity(&self, quantity: f64) -> Self {
        let quantity = quantity.max(0.0);
        Self {
            quantity,
            calories: quantity * self.density.calories,
            protein: quantity * self.density.protein,
            fat: quantity * self.density.fat,
            carbs: quantity * self.density.carbs,
            ..self.clone()
        }
    }

    /// Scale quantity and move the realism anchor along with it.
    pub fn rescaled(&self, factor: f64) -> Self {
        let mut item = self.with_quantity(self.quantity * factor);
        item.anchor_quantity = item.quantity;
        item
    }

    /// Whether the engine may change this item's quantity.
    pub fn is_adjustable(&self, config: &EngineConfig) -> bool {
        if !self.kind.is_measured() {
            return false;
        }
        if self.anchor_quantity < config.min_adjustable_quantity {
            return false;
        }
        !(self.anchor_quantity < config.dense_topping_quantity
            && self.density.calories > config.dense_topping_kcal_per_unit)
    }

    /// Realism window `[min, max]` around the anchor quantity.
    pub fn bounds(&self, config: &EngineConfig) -> (f64, f64) {
        (
            self.anchor_quantity * config.min_quantity_ratio,
            self.anchor_quantity * config.max_quantity_ratio,
        )
    }

    pub fn dominant_macro(&self) -> DominantMacro {
        let total = self.protein + self.fat + self.carbs;
        if total <= 0.0 {
            return DominantMacro::Mixed;
        }
        if self.protein / total > 0.5 {
            DominantMacro::Protein
        } else if self.fat / total > 0.5 {
            DominantMacro::Fat
        } else if self.carbs / total > 0.5 {
            DominantMacro::Carbs
        } else {
            DominantMacro::Mixed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oats() -> Item {
        Item::new("Oats", 80.0, "g", "80", 320.0, Some((10.0, 5.0, 50.0)))
    }

    #[test]
    fn test_classify_units() {
        assert_eq!(UnitKind::classify("g"), UnitKind::Gram);
        assert_eq!(UnitKind::classify("Grams"), UnitKind::Gram);
        assert_eq!(UnitKind::classify("ml"), UnitKind::Milliliter);
        assert_eq!(UnitKind::classify("cup"), UnitKind::Serving);
        assert_eq!(UnitKind::classify("pieces"), UnitKind::Serving);
        assert_eq!(UnitKind::classify("large"), UnitKind::Serving);
        assert_eq!(UnitKind::classify("oz"), UnitKind::Serving);
        assert_eq!(UnitKind::classify("gr"), UnitKind::Serving);
    }

    #[test]
    fn test_densities_fixed_at_creation() {
        let item = oats();
        assert!((item.density.calories - 4.0).abs() < 1e-9);
        assert!((item.density.carbs - 0.625).abs() < 1e-9);

        let bigger = item.with_quantity(120.0);
        assert_eq!(bigger.density, item.density);
        assert!((bigger.calories - 480.0).abs() < 1e-9);
        assert!((bigger.protein - 15.0).abs() < 1e-9);
        assert_eq!(bigger.anchor_quantity, 80.0);
    }

    #[test]
    fn test_estimated_macros() {
        let item = Item::new("Mystery stew", 300.0, "g", "300", 400.0, None);
        assert!((item.protein - 35.0).abs() < 1e-9);
        assert!((item.fat - 400.0 * 0.35 / 9.0).abs() < 1e-9);
        assert!((item.carbs - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_rescaled_moves_anchor() {
        let item = oats().rescaled(1.5);
        assert!((item.quantity - 120.0).abs() < 1e-9);
        assert!((item.anchor_quantity - 120.0).abs() < 1e-9);
        assert_eq!(item.generated_calories, 320.0);
    }

    #[test]
    fn test_adjustability_thresholds() {
        let config = EngineConfig::default();
        assert!(oats().is_adjustable(&config));

        // Tiny portion
        let salt = Item::new("Salt", 10.0, "g", "10", 0.5, None);
        assert!(!salt.is_adjustable(&config));

        // Dense topping under 20 g
        let butter = Item::new("Butter", 18.0, "g", "18", 130.0, None);
        assert!(!butter.is_adjustable(&config));

        // Servings are never adjusted
        let eggs = Item::new("Eggs", 2.0, "egg", "2", 140.0, None);
        assert!(!eggs.is_adjustable(&config));
    }

    #[test]
    fn test_dominant_macro() {
        let chicken = Item::new("Chicken", 150.0, "g", "150", 250.0, Some((40.0, 10.0, 0.0)));
        assert_eq!(chicken.dominant_macro(), DominantMacro::Protein);
        assert_eq!(oats().dominant_macro(), DominantMacro::Carbs);

        let balanced = Item::new("Bowl", 1.0, "bowl", "1", 300.0, Some((10.0, 10.0, 10.0)));
        assert_eq!(balanced.dominant_macro(), DominantMacro::Mixed);
    }
}
