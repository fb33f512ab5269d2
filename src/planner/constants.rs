// Target tolerances

/// Daily calories must land within this many kcal of the target.
pub const CALORIE_TOLERANCE: f64 = 100.0;

/// Protein tolerance: max(5 g, 5% of target).
pub const PROTEIN_TOLERANCE_G: f64 = 5.0;
pub const PROTEIN_TOLERANCE_PCT: f64 = 0.05;

/// Fat tolerance: max(3 g, 5% of target).
pub const FAT_TOLERANCE_G: f64 = 3.0;
pub const FAT_TOLERANCE_PCT: f64 = 0.05;

/// Carbs tolerance: max(5 g, 5% of target).
pub const CARBS_TOLERANCE_G: f64 = 5.0;
pub const CARBS_TOLERANCE_PCT: f64 = 0.05;

// Realism bound and adjustability

/// Lowest allowed quantity as a fraction of the as-generated quantity.
pub const MIN_QUANTITY_RATIO: f64 = 0.6;

/// Highest allowed quantity as a multiple of the as-generated quantity.
pub const MAX_QUANTITY_RATIO: f64 = 2.0;

/// Items below this quantity are never adjusted.
pub const MIN_ADJUSTABLE_QUANTITY: f64 = 15.0;

/// Items below this quantity with a calorie density above
/// `DENSE_TOPPING_KCAL_PER_UNIT` are never adjusted.
pub const DENSE_TOPPING_QUANTITY: f64 = 20.0;
pub const DENSE_TOPPING_KCAL_PER_UNIT: f64 = 4.0;

/// Items need at least this much of a macro per unit to be nudged for it.
pub const MIN_MACRO_DENSITY: f64 = 0.05;

// Completeness gate

/// Below this parsed/target ratio, adjustment is skipped entirely.
pub const COMPLETENESS_CRITICAL: f64 = 0.5;

/// Below this ratio, adjustment runs with a reduced budget.
pub const COMPLETENESS_GOOD: f64 = 0.85;

pub const FULL_ITERATIONS: usize = 10;
pub const REDUCED_ITERATIONS: usize = 4;

/// Per-item calorie step caps per iteration.
pub const FULL_CALORIE_STEP: f64 = 60.0;
pub const REDUCED_CALORIE_STEP: f64 = 30.0;

/// Per-item calorie impact caps for macro steps.
pub const PROTEIN_CALORIE_CAP: f64 = 30.0;
pub const FAT_CALORIE_CAP: f64 = 25.0;
pub const CARBS_CALORIE_CAP: f64 = 25.0;

/// Macro correction is only unlocked while calories are this close.
pub const MACRO_UNLOCK_WINDOW: f64 = 200.0;

/// After a macro step, later macro steps need calories this close.
pub const MACRO_RELOCK_WINDOW: f64 = 150.0;

// Pre-scale, rounding, final passes

/// Meals whose stated/actual ratio exceeds this are scaled up.
pub const PRESCALE_TRIGGER: f64 = 1.3;

/// Upper limit on the pre-scale factor.
pub const PRESCALE_MAX: f64 = 2.5;

/// Gram/ml quantities are rounded to multiples of this step.
pub const ROUNDING_STEP: f64 = 5.0;

/// Default minimum quantity after rounding.
pub const DEFAULT_MIN_QUANTITY: f64 = 5.0;

pub const FINAL_PASSES: usize = 8;

/// A final pass that moves total calories less than this ends the passes.
pub const FINAL_PASS_MIN_PROGRESS: f64 = 10.0;

// Estimation and anomaly thresholds

/// Calorie split used when a line carries no macro token.
pub const ESTIMATE_PROTEIN_SHARE: f64 = 0.35;
pub const ESTIMATE_FAT_SHARE: f64 = 0.35;
pub const ESTIMATE_CARBS_SHARE: f64 = 0.30;

pub const KCAL_PER_G_PROTEIN: f64 = 4.0;
pub const KCAL_PER_G_FAT: f64 = 9.0;
pub const KCAL_PER_G_CARBS: f64 = 4.0;

/// Fiber target per 1000 kcal when deriving macro targets.
pub const FIBER_PER_1000_KCAL: f64 = 14.0;

/// Default quantity when a food line carries no recognizable portion.
pub const DEFAULT_QUANTITY_G: f64 = 100.0;

pub const ANOMALY_CALORIE_THRESHOLD: f64 = 100.0;

/// Protein miss (percent of target) that escalates to regeneration.
pub const ANOMALY_PROTEIN_PCT: f64 = 25.0;

/// Highest day number a plan covers.
pub const MAX_DAYS: usize = 7;
