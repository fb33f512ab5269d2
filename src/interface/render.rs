use std::fmt::Write;

use crate::models::{DayPlan, Item, Meal};
use crate::planner::calculations::round_to_step;
use crate::planner::constants::ROUNDING_STEP;

/// Smallest calorie figure printed for an item.
const MIN_ITEM_KCAL: f64 = 5.0;

/// Quantity as printed: whole numbers for gram/ml items, the original token
/// for servings.
fn display_quantity(item: &Item) -> String {
    if item.kind.is_measured() {
        format!("{:.0}", item.quantity)
    } else {
        item.quantity_token.clone()
    }
}

/// `<index>. <name> — <qty> <unit> — <kcal> kcal`
pub fn format_item_line(index: usize, item: &Item) -> String {
    let kcal = round_to_step(item.calories, ROUNDING_STEP).max(MIN_ITEM_KCAL);
    format!(
        "{}. {} — {} {} — {:.0} kcal",
        index,
        item.name,
        display_quantity(item),
        item.unit,
        kcal
    )
}

fn format_meal(out: &mut String, meal: &Meal) {
    let total = round_to_step(meal.totals().calories, ROUNDING_STEP);
    // Writing to a String cannot fail.
    let _ = writeln!(out, "- {} ({:.0} kcal):", meal.name, total);
    for (i, item) in meal.items.iter().enumerate() {
        let _ = writeln!(out, "  {}", format_item_line(i + 1, item));
    }
}

/// Render a reconciled day in the canonical text format.
pub fn format_day_plan(plan: &DayPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Day {}:", plan.day_number);
    for meal in &plan.meals {
        format_meal(&mut out, meal);
    }
    let total = round_to_step(plan.totals().calories, ROUNDING_STEP);
    let _ = write!(out, "Total Daily Calories: {:.0} kcal", total);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MealName;

    fn sample() -> DayPlan {
        let mut plan = DayPlan::new(3);
        let mut breakfast = Meal::new(MealName::Breakfast, 400);
        breakfast
            .items
            .push(Item::new("Oats", 80.0, "g", "80", 312.0, None));
        breakfast
            .items
            .push(Item::new("Avocado", 0.5, "medium", "1/2", 2.0, None));
        plan.meals.push(breakfast);
        plan
    }

    #[test]
    fn test_format_day_plan() {
        let text = format_day_plan(&sample());
        let expected = "Day 3:\n\
                        - Breakfast (315 kcal):\n  \
                        1. Oats — 80 g — 310 kcal\n  \
                        2. Avocado — 1/2 medium — 5 kcal\n\
                        Total Daily Calories: 315 kcal";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_measured_quantity_is_integer() {
        let item = Item::new("Milk", 250.0, "ml", "250", 122.0, None).with_quantity(245.0);
        assert_eq!(format_item_line(1, &item), "1. Milk — 245 ml — 120 kcal");
    }
}
