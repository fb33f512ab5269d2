pub mod anomaly;
pub mod item;
pub mod plan;
pub mod targets;

pub use anomaly::{AnomalyKind, AnomalyReport, MacroActuals};
pub use item::{DominantMacro, Item, Nutrient, NutrientDensity, UnitKind, estimate_macros};
pub use plan::{DayPlan, Meal, MealName, Totals};
pub use targets::{DayOptions, MacroTargets, Targets};
