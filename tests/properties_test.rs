use mealplan_reconciler::models::{DayOptions, MacroTargets, Targets};
use mealplan_reconciler::parser::normalize_text;
use mealplan_reconciler::{EngineConfig, process_single_day};

const PLANS: &[&str] = &[
    "Day 1:\n- Breakfast (450 kcal):\n  1. Greek yogurt - 170g - 150 kcal - 17p/4f/6c\n  2. Granola - 1/2 cup - 200 kcal - 5p/8f/28c\n  3. Banana - 1 medium - 105 kcal\n- Lunch (650 kcal):\n  1. Turkey breast - 120g - 160 kcal - 34p/2f/0c\n  2. Whole wheat wrap - 1 piece - 180 kcal\n  3. Hummus - 30g - 80 kcal\n- Snack (200 kcal):\n  1. Cottage cheese - 150g - 120 kcal - 18p/3f/5c\n- Dinner (700 kcal):\n  1. Beef stir fry - 250g - 420 kcal - 35p/20f/20c\n  2. Jasmine rice - 150g - 195 kcal - 4p/0.5f/43c\n",
    "Day 4:\n- Breakfast (500 kcal): Avocado toast with two poached eggs\n- Lunch (600 kcal):\n1. Quinoa bowl - 300g - 480 kcal\n2. Olive oil - 10ml - 90 kcal\n- Snack (150 kcal):\n1. Apple - 1 large - 110 kcal\n- Dinner (750 kcal):\n1. Pork loin - 200g - 380 kcal - 44p/20f/0c\n2. Sweet potato - 200g - 170 kcal - 3p/0f/40c\n3. Butter - 10g - 72 kcal\n",
    "Day 6:\n**Breakfast** (380 kcal):\n1. Oatmeal | 60g | 230 kcal\n2. Milk | 200ml | 100 kcal\n- Dinner (900 kcal):\n1. Pasta - 140g - 500 kcal\n2. Meatballs - 4 pieces - 300 kcal\n",
];

fn run(text: &str, targets: &Targets) -> mealplan_reconciler::DayOutcome {
    process_single_day(
        text,
        targets,
        &DayOptions::default(),
        &EngineConfig::default(),
    )
}

fn target_sets() -> Vec<Targets> {
    vec![
        Targets::new(2000.0),
        Targets::new(1500.0),
        Targets::with_macros(1800.0, MacroTargets::from_calories(1800.0)),
        Targets::new(0.0),
    ]
}

#[test]
fn test_normalize_is_idempotent() {
    for text in PLANS {
        let once = normalize_text(text);
        assert_eq!(normalize_text(&once), once);
    }
}

#[test]
fn test_rounding_law() {
    for text in PLANS {
        for targets in target_sets() {
            let outcome = run(text, &targets);
            let plan = outcome.plan.expect("sample plans always parse");
            for item in plan.items().filter(|i| i.kind.is_measured()) {
                assert_eq!(item.quantity % 5.0, 0.0, "{} = {}", item.name, item.quantity);
                assert!(item.quantity >= 5.0);
            }
        }
    }
}

#[test]
fn test_quantities_stay_in_realism_bound() {
    let config = EngineConfig::default();
    for text in PLANS {
        for targets in target_sets() {
            let plan = run(text, &targets).plan.unwrap();
            for item in plan.items().filter(|i| i.is_adjustable(&config)) {
                let (lo, hi) = item.bounds(&config);
                assert!(
                    item.quantity >= lo - 1e-9 && item.quantity <= hi + 1e-9,
                    "{} = {} outside [{lo}, {hi}]",
                    item.name,
                    item.quantity
                );
            }
        }
    }
}

#[test]
fn test_serving_tokens_survive() {
    for targets in target_sets() {
        let first = run(PLANS[0], &targets);
        assert!(first.text.contains("Granola — 1/2 cup —"));
        assert!(first.text.contains("Banana — 1 medium —"));
        assert!(first.text.contains("Whole wheat wrap — 1 piece —"));

        let third = run(PLANS[2], &targets);
        assert!(third.text.contains("Meatballs — 4 piece —"));
    }
}

#[test]
fn test_meals_in_fixed_order() {
    let outcome = run(PLANS[2], &Targets::new(1300.0));
    let text = outcome.text;
    let breakfast = text.find("- Breakfast").unwrap();
    let dinner = text.find("- Dinner").unwrap();
    assert!(breakfast < dinner);
    assert!(!text.contains("- Lunch"));
}

#[test]
fn test_inline_fallback_item_rendered() {
    let outcome = run(PLANS[1], &Targets::new(2000.0));
    assert_eq!(outcome.diagnostics.inline_fallbacks(), 1);
    assert!(
        outcome
            .text
            .contains("1. Avocado toast with two poached eggs — 1 serving — 500 kcal")
    );
}

#[test]
fn test_full_completeness_lands_within_tolerance() {
    let outcome = run(PLANS[0], &Targets::new(2000.0));
    let report = outcome.report.unwrap();
    assert!(report.completeness_ratio >= 0.85);
    let total = outcome.plan.unwrap().totals().calories;
    assert!((total - 2000.0).abs() <= 100.0, "total {total}");
}
