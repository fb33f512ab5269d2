use serde::{Deserialize, Serialize};

use crate::models::targets::MacroTargets;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyKind {
    /// Nothing usable was parsed; the text was passed through untouched.
    ParseFailure,
    /// The reconciled plan still misses calories or protein.
    CalorieDeficit,
}

/// Macro grams actually present in a reconciled plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MacroActuals {
    pub protein: f64,
    pub fat: f64,
    pub carbs: f64,
}

/// Signal that a day needs a narrow regeneration from the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyReport {
    pub kind: AnomalyKind,
    pub day_number: u32,
    pub target_calories: f64,
    pub actual_calories: f64,
    pub target_macros: MacroTargets,
    pub actual_macros: MacroActuals,
    /// Human-readable reasons, one per tolerance breach.
    pub problems: Vec<String>,
}

impl AnomalyReport {
    pub fn parse_failure(day_number: u32, target_calories: f64) -> Self {
        Self {
            kind: AnomalyKind::ParseFailure,
            day_number,
            target_calories,
            actual_calories: 0.0,
            target_macros: MacroTargets::default(),
            actual_macros: MacroActuals::default(),
            problems: vec!["No food items could be parsed".to_string()],
        }
    }

    pub fn calorie_gap(&self) -> f64 {
        self.target_calories - self.actual_calories
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_serializes_snake_case() {
        let report = AnomalyReport::parse_failure(4, 1800.0);
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"kind\":\"parse_failure\""));
        assert!(json.contains("\"day_number\":4"));
        assert_eq!(report.calorie_gap(), 1800.0);
    }
}
