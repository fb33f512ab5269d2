use crate::config::EngineConfig;
use crate::models::{AnomalyKind, AnomalyReport, DayPlan, MacroActuals, Targets};
use crate::planner::calculations::round_to_step;

/// Percent a value is off from its target; zero for an unset target.
fn percent_off(actual: f64, target: f64) -> f64 {
    if target > 0.0 {
        (actual - target).abs() / target * 100.0
    } else {
        0.0
    }
}

/// Compare a reconciled day with its targets.
///
/// Only calories (beyond the calorie threshold) and protein (beyond the
/// protein percentage) escalate. Fat and carbs are logged, never flagged.
pub fn detect_anomaly(
    plan: &DayPlan,
    targets: &Targets,
    config: &EngineConfig,
) -> Option<AnomalyReport> {
    let totals = plan.totals();
    let day = plan.day_number;
    let daily_kcal = round_to_step(totals.calories, config.rounding_step);
    let macros = &targets.macros;

    let protein_off = percent_off(totals.protein, macros.protein_g);
    tracing::info!(
        day,
        target = targets.calories,
        actual = daily_kcal,
        diff = daily_kcal - targets.calories,
        "calorie check"
    );
    tracing::info!(
        day,
        protein = totals.protein.round(),
        protein_target = macros.protein_g,
        protein_off = protein_off.round(),
        fat = totals.fat.round(),
        fat_off = percent_off(totals.fat, macros.fat_g).round(),
        carbs = totals.carbs.round(),
        carbs_off = percent_off(totals.carbs, macros.carbs_g).round(),
        "macro check"
    );

    let mut problems = Vec::new();
    let calorie_diff = (daily_kcal - targets.calories).abs();
    if targets.calories > 0.0 && calorie_diff > config.anomaly_calorie_threshold {
        problems.push(format!(
            "Calories off by {calorie_diff:.0} kcal (target: {:.0}, actual: {daily_kcal:.0})",
            targets.calories
        ));
    }
    if protein_off > config.anomaly_protein_pct {
        problems.push(format!(
            "Protein off by {protein_off:.0}% (target: {:.0}g, actual: {:.0}g)",
            macros.protein_g, totals.protein
        ));
    }

    if problems.is_empty() {
        return None;
    }

    tracing::warn!(day, problems = %problems.join("; "), "day still off target after adjustment");

    Some(AnomalyReport {
        kind: AnomalyKind::CalorieDeficit,
        day_number: day,
        target_calories: targets.calories,
        actual_calories: daily_kcal,
        target_macros: *macros,
        actual_macros: MacroActuals {
            protein: totals.protein.round(),
            fat: totals.fat.round(),
            carbs: totals.carbs.round(),
        },
        problems,
    })
}
