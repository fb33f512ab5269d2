use std::cmp::Ordering;

use crate::config::EngineConfig;
use crate::models::{DayPlan, Item, Nutrient};
use crate::planner::calculations::{clamp_to_bounds, round_within};
use crate::planner::constants::MIN_MACRO_DENSITY;

/// Rounding applied after clamping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rounding {
    pub step: f64,
    pub floor: f64,
}

/// One "spread a delta evenly, clamp, recompute" step.
///
/// The calorie step, the post-rounding correction and the final passes are
/// all this primitive with different arguments.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Nudge {
    pub nutrient: Nutrient,
    /// Total change wanted in `nutrient`; negative to remove.
    pub delta: f64,
    /// Largest calorie change allowed per item.
    pub calorie_cap: Option<f64>,
    pub rounding: Option<Rounding>,
}

impl Nudge {
    pub fn calories(delta: f64, calorie_cap: Option<f64>) -> Self {
        Self {
            nutrient: Nutrient::Calories,
            delta,
            calorie_cap,
            rounding: None,
        }
    }

    pub fn macro_step(nutrient: Nutrient, delta: f64, calorie_cap: f64) -> Self {
        Self {
            nutrient,
            delta,
            calorie_cap: Some(calorie_cap),
            rounding: None,
        }
    }

    pub fn rounded(self, rounding: Rounding) -> Self {
        Self {
            rounding: Some(rounding),
            ..self
        }
    }
}

/// Position of an item inside a day plan: (meal index, item index).
pub type ItemPos = (usize, usize);

/// Positions of every adjustable item, in plan order.
pub fn adjustable_positions(plan: &DayPlan, config: &EngineConfig) -> Vec<ItemPos> {
    plan.meals
        .iter()
        .enumerate()
        .flat_map(|(mi, meal)| {
            meal.items
                .iter()
                .enumerate()
                .filter(|(_, item)| item.is_adjustable(config))
                .map(move |(ii, _)| (mi, ii))
        })
        .collect()
}

/// Minimum per-unit density an item needs to be nudged for `nutrient`.
fn min_density(nutrient: Nutrient) -> f64 {
    match nutrient {
        Nutrient::Calories => 0.0,
        _ => MIN_MACRO_DENSITY,
    }
}

/// The item after receiving `share` of the nudged nutrient.
pub fn nudge_item(item: &Item, share: f64, nudge: &Nudge, config: &EngineConfig) -> Item {
    let density = item.density.of(nudge.nutrient);
    if density <= 0.0 {
        return item.clone();
    }

    let mut qty_change = share / density;
    if let Some(cap) = nudge.calorie_cap {
        let cal_density = item.density.calories;
        if cal_density > 0.0 && (qty_change * cal_density).abs() > cap {
            qty_change = (cap / cal_density).copysign(qty_change);
        }
    }

    let bounds = item.bounds(config);
    let mut quantity = clamp_to_bounds(item.quantity + qty_change, bounds);
    if let Some(r) = nudge.rounding {
        quantity = round_within(quantity, bounds, r.step, r.floor);
    }
    item.with_quantity(quantity)
}

/// Spread `nudge.delta` evenly over the eligible items among `positions`.
///
/// Eligible items are sorted by their density for the nutrient (densest first
/// when adding, leanest first when removing). Returns how many items took part.
pub fn apply_nudge(
    plan: &mut DayPlan,
    positions: &[ItemPos],
    nudge: &Nudge,
    config: &EngineConfig,
) -> usize {
    let threshold = min_density(nudge.nutrient);
    let mut eligible: Vec<ItemPos> = positions
        .iter()
        .copied()
        .filter(|&(mi, ii)| plan.meals[mi].items[ii].density.of(nudge.nutrient) > threshold)
        .collect();

    if eligible.is_empty() {
        return 0;
    }

    let density_of = |pos: &ItemPos| plan.meals[pos.0].items[pos.1].density.of(nudge.nutrient);
    eligible.sort_by(|a, b| {
        let ord = density_of(a)
            .partial_cmp(&density_of(b))
            .unwrap_or(Ordering::Equal);
        if nudge.delta > 0.0 { ord.reverse() } else { ord }
    });

    let share = nudge.delta / eligible.len() as f64;
    for &(mi, ii) in &eligible {
        let item = &plan.meals[mi].items[ii];
        let updated = nudge_item(item, share, nudge, config);
        plan.meals[mi].items[ii] = updated;
    }

    tracing::debug!(
        nutrient = ?nudge.nutrient,
        delta = nudge.delta,
        items = eligible.len(),
        "applied nudge"
    );
    eligible.len()
}
