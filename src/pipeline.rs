use serde::Serialize;

use crate::config::EngineConfig;
use crate::interface::format_day_plan;
use crate::models::{AnomalyReport, DayOptions, DayPlan, Targets};
use crate::parser::{ParseDiagnostics, normalize_text, parse_day};
use crate::planner::{ReconcileReport, detect_anomaly, reconcile, round_to_step};

/// Everything one invocation produced.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayOutcome {
    /// Formatted plan, or the normalized input on parse failure.
    pub text: String,
    pub anomaly: Option<AnomalyReport>,
    /// `None` on parse failure.
    pub plan: Option<DayPlan>,
    pub diagnostics: ParseDiagnostics,
    pub report: Option<ReconcileReport>,
}

impl DayOutcome {
    pub fn is_parse_failure(&self) -> bool {
        self.plan.is_none()
    }

    /// The (text, anomaly) pair handed back to callers.
    pub fn into_parts(self) -> (String, Option<AnomalyReport>) {
        (self.text, self.anomaly)
    }
}

fn parse_failure(
    normalized: String,
    day_number: u32,
    targets: &Targets,
    diagnostics: ParseDiagnostics,
) -> DayOutcome {
    tracing::error!(
        day = day_number,
        tier = ?diagnostics.item_tier(),
        numbered_lines = diagnostics.numbered_lines,
        kcal_mentions = diagnostics.kcal_mentions,
        "no food items parsed, returning text unprocessed"
    );
    let mut anomaly = AnomalyReport::parse_failure(day_number, targets.calories);
    anomaly.target_macros = targets.macros;

    DayOutcome {
        text: normalized,
        anomaly: Some(anomaly),
        plan: None,
        diagnostics,
        report: None,
    }
}

/// Reconcile one day of generated text against its targets: normalize,
/// parse, reconcile, check, format.
///
/// Never fails: unusable input comes back unchanged (after normalization)
/// with a `parse_failure` anomaly.
pub fn process_single_day(
    text: &str,
    targets: &Targets,
    options: &DayOptions,
    config: &EngineConfig,
) -> DayOutcome {
    let normalized = normalize_text(text);
    let parsed = parse_day(&normalized, options.expected_day);
    let mut plan = parsed.plan;
    let diagnostics = parsed.diagnostics;

    if plan.item_count() == 0 || plan.totals().calories <= 0.0 {
        return parse_failure(normalized, plan.day_number, targets, diagnostics);
    }

    let report = reconcile(&mut plan, targets, options.min_quantity, config);

    let daily_kcal = round_to_step(plan.totals().calories, config.rounding_step);
    if plan.item_count() == 0 || daily_kcal <= 0.0 {
        return parse_failure(normalized, plan.day_number, targets, diagnostics);
    }

    let anomaly = detect_anomaly(&plan, targets, config);
    let text = format_day_plan(&plan);

    DayOutcome {
        text,
        anomaly,
        plan: Some(plan),
        diagnostics,
        report: Some(report),
    }
}

/// [`process_single_day`] with default options and configuration.
pub fn process_day(text: &str, targets: &Targets) -> (String, Option<AnomalyReport>) {
    process_single_day(
        text,
        targets,
        &DayOptions::default(),
        &EngineConfig::default(),
    )
    .into_parts()
}
