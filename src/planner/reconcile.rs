use serde::Serialize;

use crate::config::EngineConfig;
use crate::models::{DayPlan, MealName, Nutrient, Targets};
use crate::planner::adjust::{Nudge, Rounding, adjustable_positions, apply_nudge};
use crate::planner::calculations::{
    CompletenessTier, all_within_tolerance, completeness_ratio, deficit, round_within,
    within_tolerance,
};

/// What the engine did to a day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconcileReport {
    /// Meals scaled up toward their stated header totals.
    pub prescaled_meals: Vec<MealName>,
    pub completeness_ratio: f64,
    pub tier: CompletenessTier,
    pub iterations: usize,
    pub final_passes: usize,
}

/// Scale up meals whose items fall well short of the header total.
///
/// Every gram/ml item of such a meal is multiplied by
/// `min(stated / actual, prescale_max)` and re-anchored at its new quantity.
pub fn prescale_meals(plan: &mut DayPlan, config: &EngineConfig) -> Vec<MealName> {
    let mut scaled = Vec::new();

    for meal in &mut plan.meals {
        let actual = meal.totals().calories;
        let stated = meal.stated_total as f64;
        if actual <= 0.0 || stated <= 0.0 {
            continue;
        }

        let ratio = stated / actual;
        if ratio <= config.prescale_trigger {
            continue;
        }

        let factor = ratio.min(config.prescale_max);
        meal.items = meal
            .items
            .iter()
            .map(|item| {
                if item.kind.is_measured() {
                    item.rescaled(factor)
                } else {
                    item.clone()
                }
            })
            .collect();

        tracing::info!(
            meal = %meal.name,
            stated,
            actual,
            factor,
            "pre-scaled under-reported meal"
        );
        scaled.push(meal.name);
    }

    scaled
}

/// One round of the priority cascade: calories, then protein, fat, carbs.
///
/// Macro steps only run while calories are within the unlock window, which
/// narrows to the relock window after the first macro step of the round.
fn run_round(plan: &mut DayPlan, targets: &Targets, step: f64, config: &EngineConfig) -> bool {
    let positions = adjustable_positions(plan, config);
    if positions.is_empty() {
        return false;
    }

    let totals = plan.totals();
    if !within_tolerance(Nutrient::Calories, &totals, targets, config) {
        let delta = deficit(Nutrient::Calories, &totals, targets);
        apply_nudge(plan, &positions, &Nudge::calories(delta, Some(step)), config);
    }

    let macro_steps = [
        (Nutrient::Protein, config.protein_calorie_cap),
        (Nutrient::Fat, config.fat_calorie_cap),
        (Nutrient::Carbs, config.carbs_calorie_cap),
    ];

    let mut window = config.macro_unlock_window;
    for (nutrient, cap) in macro_steps {
        let totals = plan.totals();
        let calorie_gap = deficit(Nutrient::Calories, &totals, targets).abs();
        if calorie_gap >= window {
            tracing::debug!(calorie_gap, window, "macro correction locked this round");
            break;
        }
        if within_tolerance(nutrient, &totals, targets, config) {
            continue;
        }

        let delta = deficit(nutrient, &totals, targets);
        apply_nudge(plan, &positions, &Nudge::macro_step(nutrient, delta, cap), config);
        window = config.macro_relock_window;
    }

    true
}

/// Round every gram/ml item to the rounding step, inside its bounds when possible.
pub fn round_quantities(plan: &mut DayPlan, min_quantity: f64, config: &EngineConfig) {
    for item in plan.items_mut() {
        if !item.kind.is_measured() {
            continue;
        }
        let quantity = round_within(
            item.quantity,
            item.bounds(config),
            config.rounding_step,
            min_quantity,
        );
        *item = item.with_quantity(quantity);
    }
}

/// Redistribute the residual calorie gap after rounding. Returns passes run.
fn run_final_passes(
    plan: &mut DayPlan,
    targets: &Targets,
    min_quantity: f64,
    config: &EngineConfig,
) -> usize {
    let rounding = Rounding {
        step: config.rounding_step,
        floor: min_quantity,
    };
    let mut passes = 0;

    while passes < config.final_passes {
        let totals = plan.totals();
        if within_tolerance(Nutrient::Calories, &totals, targets, config) {
            break;
        }
        let positions = adjustable_positions(plan, config);
        if positions.is_empty() {
            break;
        }

        let delta = deficit(Nutrient::Calories, &totals, targets);
        apply_nudge(
            plan,
            &positions,
            &Nudge::calories(delta, None).rounded(rounding),
            config,
        );
        passes += 1;

        let progress = (plan.totals().calories - totals.calories).abs();
        tracing::debug!(pass = passes, delta, progress, "final calorie pass");
        if progress < config.final_pass_min_progress {
            break;
        }
    }

    passes
}

/// Reconcile a parsed day in place.
///
/// Order: pre-scale, completeness gate, iteration loop, rounding, final
/// passes. A zero calorie target disables everything except rounding.
pub fn reconcile(
    plan: &mut DayPlan,
    targets: &Targets,
    min_quantity: f64,
    config: &EngineConfig,
) -> ReconcileReport {
    let prescaled_meals = prescale_meals(plan, config);

    let parsed_calories = plan.totals().calories;
    let ratio = completeness_ratio(parsed_calories, targets.calories);
    let tier = if targets.calories > 0.0 {
        CompletenessTier::from_ratio(ratio, config)
    } else {
        CompletenessTier::Skipped
    };

    match tier {
        CompletenessTier::Skipped if targets.calories > 0.0 => tracing::warn!(
            day = plan.day_number,
            ratio,
            "parsed calories too low for adjustment, skipping"
        ),
        CompletenessTier::Reduced => tracing::warn!(
            day = plan.day_number,
            ratio,
            "partial parse, running reduced adjustment"
        ),
        _ => {}
    }

    let step = tier.calorie_step(config);
    let mut iterations = 0;
    for _ in 0..tier.iterations(config) {
        if all_within_tolerance(&plan.totals(), targets, config) {
            break;
        }
        if !run_round(plan, targets, step, config) {
            tracing::debug!("no adjustable items left");
            break;
        }
        iterations += 1;
    }

    round_quantities(plan, min_quantity, config);

    let final_passes = if tier != CompletenessTier::Skipped {
        run_final_passes(plan, targets, min_quantity, config)
    } else {
        0
    };

    let totals = plan.totals();
    tracing::info!(
        day = plan.day_number,
        ?tier,
        iterations,
        final_passes,
        calories = totals.calories,
        protein = totals.protein,
        "reconciled day"
    );

    ReconcileReport {
        prescaled_meals,
        completeness_ratio: ratio,
        tier,
        iterations,
        final_passes,
    }
}
