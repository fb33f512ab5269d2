use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::error::{PlanError, Result};
use crate::models::{AnomalyReport, DayOptions, MacroActuals, MacroTargets, MealName, Targets};
use crate::parser::normalize_text;
use crate::parser::patterns::{DAY_LABEL, LEADING_DAY_HEADER, MEAL_BULLET};
use crate::pipeline::{DayOutcome, process_single_day};

/// What the caller should ask the text generator to fix for one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrectionRequest {
    pub day_number: u32,
    pub target_calories: f64,
    pub actual_calories: f64,
    pub target_macros: MacroTargets,
    pub actual_macros: MacroActuals,
    pub problems: Vec<String>,
    /// The day's current text without its `Day N:` header.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_text: Option<String>,
}

impl CorrectionRequest {
    pub fn from_report(report: &AnomalyReport) -> Self {
        Self {
            day_number: report.day_number,
            target_calories: report.target_calories,
            actual_calories: report.actual_calories,
            target_macros: report.target_macros,
            actual_macros: report.actual_macros,
            problems: report.problems.clone(),
            day_text: None,
        }
    }

    /// Attach the day's text, stripped of any leading `Day N:` line so the
    /// regenerated output does not repeat it.
    pub fn with_day_text(mut self, text: &str) -> Self {
        let cleaned = LEADING_DAY_HEADER.replace(text.trim(), "");
        self.day_text = Some(cleaned.into_owned());
        self
    }
}

/// Bulleted meal headers in `text`.
pub fn count_meal_headers(text: &str) -> usize {
    MEAL_BULLET
        .captures_iter(text)
        .filter(|caps| MealName::parse(&caps[1]).is_some())
        .count()
}

fn check_meal_count(text: &str) -> Result<usize> {
    match count_meal_headers(text) {
        0 => Err(PlanError::NoMeals),
        n if n > MealName::ALL.len() => Err(PlanError::DuplicatedMeals(n)),
        n => Ok(n),
    }
}

/// Validate regenerated text and cut out the block for `day`.
///
/// Rejects text with no meals or more than four meals, and text that never
/// labels the requested day.
pub fn isolate_corrected_day(text: &str, day: u32) -> Result<String> {
    let text = normalize_text(text);
    let meals = check_meal_count(&text)?;
    tracing::info!(day, meals, "validating corrected day");

    let labels: Vec<(usize, u32)> = DAY_LABEL
        .captures_iter(&text)
        .filter_map(|caps| {
            let start = caps.get(0)?.start();
            let number = caps[1].parse().ok()?;
            Some((start, number))
        })
        .collect();

    let index = labels
        .iter()
        .position(|&(_, number)| number == day)
        .ok_or(PlanError::DayNotFound(day))?;

    let start = labels[index].0;
    let end = labels.get(index + 1).map_or(text.len(), |&(pos, _)| pos);
    let isolated = text[start..end].trim().to_string();

    let isolated_meals = count_meal_headers(&isolated);
    if isolated_meals > MealName::ALL.len() {
        tracing::warn!(day, isolated_meals, "isolated day still has duplicated meals");
        return Err(PlanError::DuplicatedMeals(isolated_meals));
    }

    Ok(isolated)
}

/// Isolate a regenerated day and run it through the pipeline once more.
///
/// The second pass may still carry an anomaly; no further correction is
/// attempted.
pub fn apply_correction(
    text: &str,
    day: u32,
    targets: &Targets,
    options: &DayOptions,
    config: &EngineConfig,
) -> Result<DayOutcome> {
    let isolated = isolate_corrected_day(text, day).inspect_err(|e| {
        tracing::warn!(day, error = %e, "correction rejected, keeping original day");
    })?;

    let options = DayOptions {
        expected_day: Some(day),
        ..*options
    };
    let outcome = process_single_day(&isolated, targets, &options, config);
    if let Some(anomaly) = &outcome.anomaly {
        tracing::warn!(day, problems = ?anomaly.problems, "corrected day still off target");
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORRECTED: &str = "Day 3:\n\
        - Breakfast (400 kcal):\n  1. Oats - 100g - 400 kcal\n\
        - Lunch (600 kcal):\n  1. Rice - 200g - 600 kcal\n\
        - Snack (200 kcal):\n  1. Yogurt - 200g - 200 kcal\n\
        - Dinner (600 kcal):\n  1. Beef - 200g - 600 kcal\n";

    #[test]
    fn test_isolates_requested_day() {
        let text = format!("Sure!\n{CORRECTED}");
        let isolated = isolate_corrected_day(&text, 3).unwrap();
        assert!(isolated.starts_with("Day 3:"));
        assert_eq!(count_meal_headers(&isolated), 4);
    }

    #[test]
    fn test_rejects_duplicated_meals() {
        let text = format!("{CORRECTED}- Dinner (500 kcal):\n  1. Fish - 200g - 500 kcal\n");
        assert!(matches!(
            isolate_corrected_day(&text, 3),
            Err(PlanError::DuplicatedMeals(5))
        ));
    }

    #[test]
    fn test_rejects_missing_meals_and_day() {
        assert!(matches!(
            isolate_corrected_day("Day 3: nothing here", 3),
            Err(PlanError::NoMeals)
        ));
        assert!(matches!(
            isolate_corrected_day(CORRECTED, 13),
            Err(PlanError::DayNotFound(13))
        ));
    }

    #[test]
    fn test_request_strips_day_header() {
        let report = AnomalyReport::parse_failure(3, 1800.0);
        let request = CorrectionRequest::from_report(&report).with_day_text("Day 3:\n- Lunch (500 kcal):");
        assert_eq!(request.day_text.as_deref(), Some("- Lunch (500 kcal):"));
        assert_eq!(request.day_number, 3);
    }

    #[test]
    fn test_apply_correction_reprocesses() {
        let outcome = apply_correction(
            CORRECTED,
            3,
            &Targets::new(1800.0),
            &DayOptions::default(),
            &EngineConfig::default(),
        )
        .unwrap();
        assert_eq!(outcome.plan.as_ref().map(|p| p.day_number), Some(3));
        assert!(outcome.anomaly.is_none());
    }
}
